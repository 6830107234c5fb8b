/// Gallery state module
///
/// This module handles what the user is looking at:
/// - Ordered (clip, preview) pairs for the grid
/// - The Idle / Previewing selection state machine

pub mod gallery;
