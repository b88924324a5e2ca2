//! Patron books aggregate.

use std::hash::{Hash, Hasher};

use common::LibraryBranchId;

use crate::book::{AvailableBook, BookOnHold};

use super::policy::first_rejection;
use super::{
    BookCollectedByPatron, BookCollectingFailed, BookHoldFailed, BookPlacedOnHoldByPatron,
    CollectResult, HoldDuration, OverdueCheckouts, PatronHolds, PatronInformation,
    PlaceOnHoldResult, Policies, Reason,
};

/// Lending state of one patron and the rules that gate new holds.
///
/// The aggregate is rebuilt by the caller for every request and never changes
/// afterwards: `place_on_hold` and `collect` only decide, returning the event
/// that describes the decision. Applying that event to stored holds is the
/// caller's job.
///
/// Two aggregates are equal when they describe the same patron, whatever holds,
/// overdue checkouts or policies they were loaded with.
#[derive(Debug, Clone)]
pub struct PatronBooks {
    patron: PatronInformation,
    policies: Policies,
    overdue_checkouts: OverdueCheckouts,
    holds: PatronHolds,
}

impl PatronBooks {
    pub fn new(
        patron: PatronInformation,
        policies: Policies,
        overdue_checkouts: OverdueCheckouts,
        holds: PatronHolds,
    ) -> Self {
        Self {
            patron,
            policies,
            overdue_checkouts,
            holds,
        }
    }

    /// Places an open-ended hold on `book`.
    pub fn place_on_hold(&self, book: &AvailableBook) -> PlaceOnHoldResult {
        self.place_on_hold_for(book, HoldDuration::open_ended())
    }

    /// Places a hold on `book` for `duration` if every policy admits it.
    #[tracing::instrument(
        skip(self, book, duration),
        fields(patron_id = %self.patron.patron_id, book_id = %book.book_id)
    )]
    pub fn place_on_hold_for(
        &self,
        book: &AvailableBook,
        duration: HoldDuration,
    ) -> PlaceOnHoldResult {
        if let Some((policy, rejection)) = first_rejection(&self.policies, book, self, &duration) {
            tracing::debug!(
                policy = policy.name(),
                reason = %rejection.reason(),
                "hold refused"
            );
            metrics::counter!("lending_holds_failed_total").increment(1);
            return Err(BookHoldFailed::now(
                rejection.into_reason(),
                book.book_id,
                book.library_branch,
                self.patron.patron_id,
            ));
        }

        metrics::counter!("lending_holds_placed_total").increment(1);
        Ok(BookPlacedOnHoldByPatron::now(
            book.book_information(),
            book.library_branch,
            self.patron.patron_id,
            duration,
        ))
    }

    /// Hands `book` over if this patron holds it.
    #[tracing::instrument(
        skip(self, book),
        fields(patron_id = %self.patron.patron_id, book_id = %book.book_id)
    )]
    pub fn collect(&self, book: &BookOnHold) -> CollectResult {
        if self.holds.does_not_contain(book) {
            tracing::debug!("collect refused, book is not on hold by patron");
            metrics::counter!("lending_collecting_failed_total").increment(1);
            return Err(BookCollectingFailed::now(
                Reason::new("book is not on hold by patron"),
                book.book_id,
                book.hold_placed_at,
                self.patron.patron_id,
            ));
        }

        metrics::counter!("lending_books_collected_total").increment(1);
        Ok(BookCollectedByPatron::now(
            book.book_information(),
            book.library_branch,
            book.hold_placed_at,
            self.patron.patron_id,
        ))
    }

    /// The patron this aggregate decides for.
    pub fn patron(&self) -> &PatronInformation {
        &self.patron
    }

    /// Returns true if the patron is not a researcher.
    pub fn is_regular(&self) -> bool {
        self.patron.is_regular()
    }

    /// Overdue checkouts the patron has at `library_branch`.
    pub fn overdue_checkouts_at(&self, library_branch: LibraryBranchId) -> usize {
        self.overdue_checkouts.count_at(library_branch)
    }

    /// Holds the patron currently owns, across all branches.
    pub fn number_of_holds(&self) -> usize {
        self.holds.count()
    }

    /// Names of the configured policies, in evaluation order.
    pub fn policy_names(&self) -> Vec<&str> {
        self.policies.iter().map(|policy| policy.name()).collect()
    }
}

impl PartialEq for PatronBooks {
    fn eq(&self, other: &Self) -> bool {
        self.patron == other.patron
    }
}

impl Eq for PatronBooks {}

impl Hash for PatronBooks {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.patron.hash(state);
    }
}
