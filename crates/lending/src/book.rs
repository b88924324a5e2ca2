//! Book descriptors supplied by the catalogue and availability contexts.

use chrono::{DateTime, Utc};
use common::{BookId, LibraryBranchId, PatronId};
use serde::{Deserialize, Serialize};

/// Lending classification of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookType {
    /// Only researchers may place it on hold.
    Restricted,

    /// Any patron may place it on hold.
    Circulating,
}

impl BookType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Restricted => "Restricted",
            BookType::Circulating => "Circulating",
        }
    }
}

impl std::fmt::Display for BookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive information about a book carried in outcome events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookInformation {
    pub book_id: BookId,
    pub book_type: BookType,
}

impl BookInformation {
    pub fn new(book_id: BookId, book_type: BookType) -> Self {
        Self { book_id, book_type }
    }
}

/// A book that is currently available for hold at a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableBook {
    pub book_id: BookId,
    pub book_type: BookType,
    pub library_branch: LibraryBranchId,
}

impl AvailableBook {
    pub fn new(book_id: BookId, book_type: BookType, library_branch: LibraryBranchId) -> Self {
        Self {
            book_id,
            book_type,
            library_branch,
        }
    }

    /// Creates a circulating book with a random id.
    pub fn circulating_at(library_branch: LibraryBranchId) -> Self {
        Self::new(BookId::new(), BookType::Circulating, library_branch)
    }

    /// Creates a restricted book with a random id.
    pub fn restricted_at(library_branch: LibraryBranchId) -> Self {
        Self::new(BookId::new(), BookType::Restricted, library_branch)
    }

    pub fn book_information(&self) -> BookInformation {
        BookInformation::new(self.book_id, self.book_type)
    }

    pub fn is_restricted(&self) -> bool {
        self.book_type == BookType::Restricted
    }
}

/// A book some patron has placed on hold at a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOnHold {
    pub book_id: BookId,
    pub book_type: BookType,
    pub library_branch: LibraryBranchId,

    /// The patron the availability context recorded as holding the book.
    ///
    /// Informational only: `PatronBooks::collect` matches the patron's own
    /// holds by book and branch and never reads this field.
    pub by_patron: PatronId,

    /// When the hold was placed.
    pub hold_placed_at: DateTime<Utc>,
}

impl BookOnHold {
    pub fn new(
        book_information: BookInformation,
        library_branch: LibraryBranchId,
        by_patron: PatronId,
        hold_placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            book_id: book_information.book_id,
            book_type: book_information.book_type,
            library_branch,
            by_patron,
            hold_placed_at,
        }
    }

    pub fn book_information(&self) -> BookInformation {
        BookInformation::new(self.book_id, self.book_type)
    }
}
