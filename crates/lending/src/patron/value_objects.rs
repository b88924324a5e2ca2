//! Value objects for the patron lending state.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroU32;

use chrono::{DateTime, Duration, Utc};
use common::{BookId, LibraryBranchId, PatronId};
use serde::{Deserialize, Serialize};

use crate::book::BookOnHold;
use crate::error::{LendingError, Result};

/// Classification of a patron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatronType {
    Regular,
    Researcher,
}

/// Identity and classification of a patron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatronInformation {
    pub patron_id: PatronId,
    pub patron_type: PatronType,
}

impl PatronInformation {
    pub fn new(patron_id: PatronId, patron_type: PatronType) -> Self {
        Self {
            patron_id,
            patron_type,
        }
    }

    pub fn regular(patron_id: PatronId) -> Self {
        Self::new(patron_id, PatronType::Regular)
    }

    pub fn researcher(patron_id: PatronId) -> Self {
        Self::new(patron_id, PatronType::Researcher)
    }

    pub fn is_regular(&self) -> bool {
        self.patron_type == PatronType::Regular
    }

    pub fn is_researcher(&self) -> bool {
        self.patron_type == PatronType::Researcher
    }
}

/// One book held by the patron at one branch.
///
/// Two holds are the same hold when they name the same book at the same branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatronHold {
    pub book_id: BookId,
    pub library_branch: LibraryBranchId,
}

impl PatronHold {
    pub fn new(book_id: BookId, library_branch: LibraryBranchId) -> Self {
        Self {
            book_id,
            library_branch,
        }
    }

    /// The hold a patron must own to collect `book`.
    pub fn for_book(book: &BookOnHold) -> Self {
        Self::new(book.book_id, book.library_branch)
    }
}

/// Holds currently owned by a patron.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronHolds {
    holds: HashSet<PatronHold>,
}

impl PatronHolds {
    pub fn new(holds: HashSet<PatronHold>) -> Self {
        Self { holds }
    }

    /// A patron without any holds.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if the patron holds `book` at its branch.
    pub fn contains(&self, book: &BookOnHold) -> bool {
        self.holds.contains(&PatronHold::for_book(book))
    }

    pub fn does_not_contain(&self, book: &BookOnHold) -> bool {
        !self.contains(book)
    }

    pub fn count(&self) -> usize {
        self.holds.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatronHold> {
        self.holds.iter()
    }
}

impl FromIterator<PatronHold> for PatronHolds {
    fn from_iter<I: IntoIterator<Item = PatronHold>>(iter: I) -> Self {
        Self {
            holds: iter.into_iter().collect(),
        }
    }
}

/// Overdue checkouts of a patron, grouped by the branch they were lent from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueCheckouts {
    by_branch: HashMap<LibraryBranchId, HashSet<BookId>>,
}

impl OverdueCheckouts {
    pub fn new(by_branch: HashMap<LibraryBranchId, HashSet<BookId>>) -> Self {
        Self { by_branch }
    }

    /// A patron without overdue checkouts.
    pub fn none() -> Self {
        Self::default()
    }

    /// Number of overdue books at `branch`; zero for a branch with no entry.
    pub fn count_at(&self, branch: LibraryBranchId) -> usize {
        self.by_branch.get(&branch).map_or(0, HashSet::len)
    }
}

impl FromIterator<(LibraryBranchId, BookId)> for OverdueCheckouts {
    fn from_iter<I: IntoIterator<Item = (LibraryBranchId, BookId)>>(iter: I) -> Self {
        let mut by_branch: HashMap<LibraryBranchId, HashSet<BookId>> = HashMap::new();
        for (branch, book_id) in iter {
            by_branch.entry(branch).or_default().insert(book_id);
        }
        Self { by_branch }
    }
}

/// How long a requested hold lasts.
///
/// An open-ended hold has no end; a close-ended hold ends a whole number of
/// days after it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldDuration {
    from: DateTime<Utc>,
    till: Option<DateTime<Utc>>,
}

impl HoldDuration {
    /// An open-ended hold starting now.
    pub fn open_ended() -> Self {
        Self::open_ended_from(Utc::now())
    }

    pub fn open_ended_from(from: DateTime<Utc>) -> Self {
        Self { from, till: None }
    }

    /// A hold starting now and lasting `days`.
    pub fn close_ended(days: NonZeroU32) -> Result<Self> {
        Self::close_ended_from(Utc::now(), days)
    }

    /// Fails when the end date would fall outside the calendar chrono can
    /// represent.
    pub fn close_ended_from(from: DateTime<Utc>, days: NonZeroU32) -> Result<Self> {
        let till = Duration::try_days(i64::from(days.get()))
            .and_then(|length| from.checked_add_signed(length))
            .ok_or(LendingError::HoldDurationOutOfRange {
                from,
                days: days.get(),
            })?;
        Ok(Self {
            from,
            till: Some(till),
        })
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.from
    }

    /// End of the hold; `None` when open-ended.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.till
    }

    pub fn is_open_ended(&self) -> bool {
        self.till.is_none()
    }
}

impl Default for HoldDuration {
    fn default() -> Self {
        Self::open_ended()
    }
}
