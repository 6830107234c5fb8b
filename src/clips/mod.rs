/// Clip storage module
///
/// This module handles the clip files themselves:
/// - The Clip data model (data.rs)
/// - Enumeration, chronological ordering, and deletion (store.rs)

pub mod data;
pub mod store;
