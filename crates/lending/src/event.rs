//! Domain event trait.

use chrono::{DateTime, Utc};
use common::{EventId, PatronId};
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name.
    ///
    /// Publishers use this for routing and subscriber filtering.
    fn event_type(&self) -> &'static str;

    /// Returns the unique id of this event.
    fn event_id(&self) -> EventId;

    /// Returns the patron the event concerns.
    fn patron_id(&self) -> PatronId;

    /// Returns when the event happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestEvent {
        event_id: EventId,
        patron_id: PatronId,
        when: DateTime<Utc>,
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str {
            "TestEvent"
        }

        fn event_id(&self) -> EventId {
            self.event_id
        }

        fn patron_id(&self) -> PatronId {
            self.patron_id
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.when
        }
    }

    #[test]
    fn test_domain_event_accessors() {
        let patron_id = PatronId::new();
        let event = TestEvent {
            event_id: EventId::new(),
            patron_id,
            when: Utc::now(),
        };

        assert_eq!(event.event_type(), "TestEvent");
        assert_eq!(event.patron_id(), patron_id);
        assert!(event.occurred_at() <= Utc::now());
    }
}
