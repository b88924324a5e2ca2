//! Lending decision core for the library.
//!
//! This crate answers two questions for a patron whose state has already been
//! loaded by the caller:
//! - may a hold be placed on an available book?
//! - may a book previously placed on hold be collected?
//!
//! Each answer is returned as an immutable domain event. Persisting the
//! patron, publishing the events and serializing concurrent requests are left
//! to the surrounding application.

pub mod book;
pub mod config;
pub mod error;
pub mod event;
pub mod patron;

pub use book::{AvailableBook, BookInformation, BookOnHold, BookType};
pub use common::{BookId, EventId, LibraryBranchId, PatronId};
pub use config::PolicyConfig;
pub use error::{LendingError, Result};
pub use event::DomainEvent;
pub use patron::{
    BookCollectedByPatron, BookCollectingFailed, BookHoldFailed, BookPlacedOnHoldByPatron,
    CollectResult, CustomPolicy, HoldDuration, MaximumHoldsPolicy, OpenEndedHoldPolicy,
    OverdueCheckouts, OverdueCheckoutsPolicy, PatronBooks, PatronBooksEvent, PatronHold,
    PatronHolds, PatronInformation, PatronType, PlaceOnHoldResult, PlacingOnHoldPolicy, Policies,
    Reason, Rejection, RestrictedBookPolicy, all_current_policies, first_rejection,
};
