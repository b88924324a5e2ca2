//! Patron books aggregate and the policies that gate hold placement.

mod aggregate;
mod events;
mod policy;
mod rejection;
mod value_objects;

pub use aggregate::PatronBooks;
pub use events::{
    BookCollectedByPatron, BookCollectingFailed, BookHoldFailed, BookPlacedOnHoldByPatron,
    CollectResult, PatronBooksEvent, PlaceOnHoldResult,
};
pub use policy::{
    CustomPolicy, MaximumHoldsPolicy, OpenEndedHoldPolicy, OverdueCheckoutsPolicy,
    PlacingOnHoldPolicy, Policies, RestrictedBookPolicy, all_current_policies, first_rejection,
};
pub use rejection::{Reason, Rejection};
pub use value_objects::{
    HoldDuration, OverdueCheckouts, PatronHold, PatronHolds, PatronInformation, PatronType,
};
