//! Admission policies evaluated before a hold is placed.
//!
//! A policy looks at the candidate book, the patron's current lending state and
//! the requested duration, and either admits the hold or refuses it with a
//! [`Rejection`]. Policies never mutate their inputs and never emit events;
//! only [`PatronBooks`] turns their verdict into an outcome.
//!
//! The aggregate runs its policies in the order the caller supplied and stops
//! at the first refusal.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::book::AvailableBook;
use crate::config::PolicyConfig;

use super::{HoldDuration, PatronBooks, Rejection};

/// A single admission rule for placing a book on hold.
pub trait PlacingOnHoldPolicy: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Admits the hold with `Ok(())` or refuses it with a rejection.
    fn evaluate(
        &self,
        book: &AvailableBook,
        patron: &PatronBooks,
        duration: &HoldDuration,
    ) -> Result<(), Rejection>;
}

/// Ordered policy chain shared by every aggregate built for a deployment.
pub type Policies = Vec<Arc<dyn PlacingOnHoldPolicy>>;

/// The standard chain: restricted books, overdue checkouts, maximum holds,
/// open-ended holds.
pub fn all_current_policies(config: &PolicyConfig) -> Policies {
    vec![
        Arc::new(RestrictedBookPolicy),
        Arc::new(OverdueCheckoutsPolicy::new(config.overdue_checkouts_threshold)),
        Arc::new(MaximumHoldsPolicy::new(
            config.max_holds,
            config.researcher_max_holds,
        )),
        Arc::new(OpenEndedHoldPolicy),
    ]
}

/// Returns the first policy that refuses the hold, with its rejection.
pub fn first_rejection<'a>(
    policies: &'a [Arc<dyn PlacingOnHoldPolicy>],
    book: &AvailableBook,
    patron: &PatronBooks,
    duration: &HoldDuration,
) -> Option<(&'a dyn PlacingOnHoldPolicy, Rejection)> {
    policies.iter().find_map(|policy| {
        policy
            .evaluate(book, patron, duration)
            .err()
            .map(|rejection| (policy.as_ref(), rejection))
    })
}

/// Restricted books may only be held by researchers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictedBookPolicy;

impl PlacingOnHoldPolicy for RestrictedBookPolicy {
    fn name(&self) -> &str {
        "restricted_book"
    }

    fn evaluate(
        &self,
        book: &AvailableBook,
        patron: &PatronBooks,
        _duration: &HoldDuration,
    ) -> Result<(), Rejection> {
        if book.is_restricted() && patron.is_regular() {
            return Err(Rejection::with_reason(
                "book is restricted to researcher patrons",
            ));
        }
        Ok(())
    }
}

/// Refuses holds at a branch where the patron has too many overdue checkouts.
#[derive(Debug, Clone, Copy)]
pub struct OverdueCheckoutsPolicy {
    /// Overdue checkouts at the book's branch that block a new hold. Never
    /// zero, so a patron with no overdue books is always admitted.
    threshold: NonZeroUsize,
}

impl OverdueCheckoutsPolicy {
    pub fn new(threshold: NonZeroUsize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> NonZeroUsize {
        self.threshold
    }
}

impl Default for OverdueCheckoutsPolicy {
    fn default() -> Self {
        Self::new(PolicyConfig::default().overdue_checkouts_threshold)
    }
}

impl PlacingOnHoldPolicy for OverdueCheckoutsPolicy {
    fn name(&self) -> &str {
        "overdue_checkouts"
    }

    fn evaluate(
        &self,
        book: &AvailableBook,
        patron: &PatronBooks,
        _duration: &HoldDuration,
    ) -> Result<(), Rejection> {
        if patron.overdue_checkouts_at(book.library_branch) >= self.threshold.get() {
            return Err(Rejection::with_reason("too many overdue checkouts"));
        }
        Ok(())
    }
}

/// Caps the number of holds a patron may own at once.
#[derive(Debug, Clone, Copy)]
pub struct MaximumHoldsPolicy {
    regular_limit: usize,

    /// `None` exempts researchers.
    researcher_limit: Option<usize>,
}

impl MaximumHoldsPolicy {
    pub fn new(regular_limit: usize, researcher_limit: Option<usize>) -> Self {
        Self {
            regular_limit,
            researcher_limit,
        }
    }

    /// Caps regular patrons only.
    pub fn regular(limit: usize) -> Self {
        Self::new(limit, None)
    }

    fn limit_for(&self, patron: &PatronBooks) -> Option<usize> {
        if patron.is_regular() {
            Some(self.regular_limit)
        } else {
            self.researcher_limit
        }
    }
}

impl Default for MaximumHoldsPolicy {
    fn default() -> Self {
        let config = PolicyConfig::default();
        Self::new(config.max_holds, config.researcher_max_holds)
    }
}

impl PlacingOnHoldPolicy for MaximumHoldsPolicy {
    fn name(&self) -> &str {
        "maximum_holds"
    }

    fn evaluate(
        &self,
        _book: &AvailableBook,
        patron: &PatronBooks,
        _duration: &HoldDuration,
    ) -> Result<(), Rejection> {
        match self.limit_for(patron) {
            Some(limit) if patron.number_of_holds() >= limit => Err(Rejection::with_reason(
                "maximum number of holds reached",
            )),
            _ => Ok(()),
        }
    }
}

/// Only researchers may place holds without an end date.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenEndedHoldPolicy;

impl PlacingOnHoldPolicy for OpenEndedHoldPolicy {
    fn name(&self) -> &str {
        "open_ended_hold"
    }

    fn evaluate(
        &self,
        _book: &AvailableBook,
        patron: &PatronBooks,
        duration: &HoldDuration,
    ) -> Result<(), Rejection> {
        if patron.is_regular() && duration.is_open_ended() {
            return Err(Rejection::with_reason(
                "regular patrons cannot place open-ended holds",
            ));
        }
        Ok(())
    }
}

/// A caller-defined admission rule built from a closure.
pub struct CustomPolicy<F> {
    name: String,
    rule: F,
}

impl<F> CustomPolicy<F>
where
    F: Fn(&AvailableBook, &PatronBooks, &HoldDuration) -> Result<(), Rejection> + Send + Sync,
{
    pub fn new(name: impl Into<String>, rule: F) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

impl<F> fmt::Debug for CustomPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPolicy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> PlacingOnHoldPolicy for CustomPolicy<F>
where
    F: Fn(&AvailableBook, &PatronBooks, &HoldDuration) -> Result<(), Rejection> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(
        &self,
        book: &AvailableBook,
        patron: &PatronBooks,
        duration: &HoldDuration,
    ) -> Result<(), Rejection> {
        (self.rule)(book, patron, duration)
    }
}
