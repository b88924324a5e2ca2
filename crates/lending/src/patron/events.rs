//! Outcome events of hold placement and collection.

use chrono::{DateTime, Utc};
use common::{BookId, EventId, LibraryBranchId, PatronId};
use serde::{Deserialize, Serialize};

use crate::book::BookInformation;
use crate::error::Result;
use crate::event::DomainEvent;

use super::{HoldDuration, Reason};

/// Outcome of `PatronBooks::place_on_hold`.
pub type PlaceOnHoldResult = std::result::Result<BookPlacedOnHoldByPatron, BookHoldFailed>;

/// Outcome of `PatronBooks::collect`.
pub type CollectResult = std::result::Result<BookCollectedByPatron, BookCollectingFailed>;

/// A hold was admitted by every policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPlacedOnHoldByPatron {
    pub event_id: EventId,
    pub when: DateTime<Utc>,
    pub patron_id: PatronId,
    pub book_information: BookInformation,
    pub library_branch: LibraryBranchId,
    pub hold_duration: HoldDuration,
}

impl BookPlacedOnHoldByPatron {
    pub fn now(
        book_information: BookInformation,
        library_branch: LibraryBranchId,
        patron_id: PatronId,
        hold_duration: HoldDuration,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            when: Utc::now(),
            patron_id,
            book_information,
            library_branch,
            hold_duration,
        }
    }
}

/// A hold was refused by a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookHoldFailed {
    pub event_id: EventId,
    pub when: DateTime<Utc>,
    pub reason: Reason,
    pub book_id: BookId,
    pub library_branch: LibraryBranchId,
    pub patron_id: PatronId,
}

impl BookHoldFailed {
    pub fn now(
        reason: Reason,
        book_id: BookId,
        library_branch: LibraryBranchId,
        patron_id: PatronId,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            when: Utc::now(),
            reason,
            book_id,
            library_branch,
            patron_id,
        }
    }
}

/// A book on hold was handed to the patron who held it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCollectedByPatron {
    pub event_id: EventId,
    pub when: DateTime<Utc>,
    pub book_information: BookInformation,
    pub library_branch: LibraryBranchId,
    pub hold_placed_at: DateTime<Utc>,
    pub patron_id: PatronId,
}

impl BookCollectedByPatron {
    pub fn now(
        book_information: BookInformation,
        library_branch: LibraryBranchId,
        hold_placed_at: DateTime<Utc>,
        patron_id: PatronId,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            when: Utc::now(),
            book_information,
            library_branch,
            hold_placed_at,
            patron_id,
        }
    }
}

/// A collection was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCollectingFailed {
    pub event_id: EventId,
    pub when: DateTime<Utc>,
    pub reason: Reason,
    pub book_id: BookId,
    pub hold_placed_at: DateTime<Utc>,
    pub patron_id: PatronId,
}

impl BookCollectingFailed {
    pub fn now(
        reason: Reason,
        book_id: BookId,
        hold_placed_at: DateTime<Utc>,
        patron_id: PatronId,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            when: Utc::now(),
            reason,
            book_id,
            hold_placed_at,
            patron_id,
        }
    }
}

/// Every event the patron books aggregate can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PatronBooksEvent {
    BookPlacedOnHoldByPatron(BookPlacedOnHoldByPatron),
    BookHoldFailed(BookHoldFailed),
    BookCollectedByPatron(BookCollectedByPatron),
    BookCollectingFailed(BookCollectingFailed),
}

impl PatronBooksEvent {
    /// Serializes the event for an outbound publisher.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns true for the two refusal events.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PatronBooksEvent::BookHoldFailed(_) | PatronBooksEvent::BookCollectingFailed(_)
        )
    }
}

impl DomainEvent for PatronBooksEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PatronBooksEvent::BookPlacedOnHoldByPatron(_) => "BookPlacedOnHoldByPatron",
            PatronBooksEvent::BookHoldFailed(_) => "BookHoldFailed",
            PatronBooksEvent::BookCollectedByPatron(_) => "BookCollectedByPatron",
            PatronBooksEvent::BookCollectingFailed(_) => "BookCollectingFailed",
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            PatronBooksEvent::BookPlacedOnHoldByPatron(e) => e.event_id,
            PatronBooksEvent::BookHoldFailed(e) => e.event_id,
            PatronBooksEvent::BookCollectedByPatron(e) => e.event_id,
            PatronBooksEvent::BookCollectingFailed(e) => e.event_id,
        }
    }

    fn patron_id(&self) -> PatronId {
        match self {
            PatronBooksEvent::BookPlacedOnHoldByPatron(e) => e.patron_id,
            PatronBooksEvent::BookHoldFailed(e) => e.patron_id,
            PatronBooksEvent::BookCollectedByPatron(e) => e.patron_id,
            PatronBooksEvent::BookCollectingFailed(e) => e.patron_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PatronBooksEvent::BookPlacedOnHoldByPatron(e) => e.when,
            PatronBooksEvent::BookHoldFailed(e) => e.when,
            PatronBooksEvent::BookCollectedByPatron(e) => e.when,
            PatronBooksEvent::BookCollectingFailed(e) => e.when,
        }
    }
}

impl From<BookPlacedOnHoldByPatron> for PatronBooksEvent {
    fn from(event: BookPlacedOnHoldByPatron) -> Self {
        PatronBooksEvent::BookPlacedOnHoldByPatron(event)
    }
}

impl From<BookHoldFailed> for PatronBooksEvent {
    fn from(event: BookHoldFailed) -> Self {
        PatronBooksEvent::BookHoldFailed(event)
    }
}

impl From<BookCollectedByPatron> for PatronBooksEvent {
    fn from(event: BookCollectedByPatron) -> Self {
        PatronBooksEvent::BookCollectedByPatron(event)
    }
}

impl From<BookCollectingFailed> for PatronBooksEvent {
    fn from(event: BookCollectingFailed) -> Self {
        PatronBooksEvent::BookCollectingFailed(event)
    }
}

impl From<PlaceOnHoldResult> for PatronBooksEvent {
    fn from(result: PlaceOnHoldResult) -> Self {
        match result {
            Ok(placed) => placed.into(),
            Err(failed) => failed.into(),
        }
    }
}

impl From<CollectResult> for PatronBooksEvent {
    fn from(result: CollectResult) -> Self {
        match result {
            Ok(collected) => collected.into(),
            Err(failed) => failed.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookType;

    fn book_information() -> BookInformation {
        BookInformation::new(BookId::new(), BookType::Circulating)
    }

    #[test]
    fn test_event_type() {
        let patron_id = PatronId::new();
        let branch = LibraryBranchId::new();

        let event: PatronBooksEvent = BookPlacedOnHoldByPatron::now(
            book_information(),
            branch,
            patron_id,
            HoldDuration::open_ended(),
        )
        .into();
        assert_eq!(event.event_type(), "BookPlacedOnHoldByPatron");
        assert!(!event.is_failure());

        let event: PatronBooksEvent =
            BookHoldFailed::now(Reason::from("no"), BookId::new(), branch, patron_id).into();
        assert_eq!(event.event_type(), "BookHoldFailed");
        assert!(event.is_failure());

        let event: PatronBooksEvent =
            BookCollectedByPatron::now(book_information(), branch, Utc::now(), patron_id).into();
        assert_eq!(event.event_type(), "BookCollectedByPatron");
        assert!(!event.is_failure());

        let event: PatronBooksEvent =
            BookCollectingFailed::now(Reason::from("no"), BookId::new(), Utc::now(), patron_id)
                .into();
        assert_eq!(event.event_type(), "BookCollectingFailed");
        assert!(event.is_failure());
        assert_eq!(event.patron_id(), patron_id);
    }

    #[test]
    fn test_events_get_distinct_ids() {
        let patron_id = PatronId::new();
        let book_id = BookId::new();
        let branch = LibraryBranchId::new();
        let a = BookHoldFailed::now(Reason::from("a"), book_id, branch, patron_id);
        let b = BookHoldFailed::now(Reason::from("a"), book_id, branch, patron_id);
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn test_hold_failed_json_shape() {
        let failed = BookHoldFailed::now(
            Reason::from("too many overdue checkouts"),
            BookId::new(),
            LibraryBranchId::new(),
            PatronId::new(),
        );
        let event = PatronBooksEvent::from(failed.clone());

        let json = event.to_json().unwrap();
        assert!(json.contains("\"type\":\"BookHoldFailed\""));
        assert!(json.contains("too many overdue checkouts"));

        let deserialized = PatronBooksEvent::from_json(&json).unwrap();
        assert_eq!(deserialized, PatronBooksEvent::BookHoldFailed(failed));
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let result = PatronBooksEvent::from_json(r#"{"type":"BookReturned","data":{}}"#);
        assert!(matches!(
            result,
            Err(crate::error::LendingError::Serialization(_))
        ));
    }

    #[test]
    fn test_from_outcome_result() {
        let patron_id = PatronId::new();
        let result: PlaceOnHoldResult = Err(BookHoldFailed::now(
            Reason::from("no"),
            BookId::new(),
            LibraryBranchId::new(),
            patron_id,
        ));
        let event = PatronBooksEvent::from(result);
        assert_eq!(event.event_type(), "BookHoldFailed");
    }
}
