//! Identifier types shared across the library lending contexts.

pub mod types;

pub use types::{BookId, EventId, LibraryBranchId, PatronId};
