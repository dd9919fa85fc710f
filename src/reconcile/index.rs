//! Calendar state indexing.
//!
//! Builds the per-pass lookup structures over the events already present in
//! the calendar: first occurrence per content key, the identities those
//! first occurrences represent, and the later occurrences that duplicate them.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{SyncError, SyncResult};
use crate::models::{CalendarEvent, EventDate};

use super::identity::{ContentKey, EventIdentity, IdentityScheme};

/// A first-seen calendar event together with its derived keys.
#[derive(Debug, Clone)]
pub struct IndexedEvent<'a> {
    /// The event itself.
    pub event: &'a CalendarEvent,
    /// Its duplicate-detection key.
    pub content_key: ContentKey,
    /// Its identity, or `None` if the summary does not name an employee and
    /// leave type.
    pub identity: Option<EventIdentity>,
}

/// Lookup indices over a snapshot of calendar events.
#[derive(Debug, Clone)]
pub struct CalendarIndex<'a> {
    content_keys: HashSet<ContentKey>,
    first_seen: Vec<IndexedEvent<'a>>,
    identities: HashSet<EventIdentity>,
    duplicates: Vec<&'a CalendarEvent>,
}

impl<'a> CalendarIndex<'a> {
    /// Indexes `events` in the order given.
    ///
    /// The first event seen for a content key is kept; every later event with
    /// the same key is recorded as a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MissingEventDate`] if any event's start or end has
    /// neither a date nor a date-time.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_calendar_sync::models::CalendarEvent;
    /// use leave_calendar_sync::reconcile::{CalendarIndex, DefaultIdentity};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let events = vec![
    ///     CalendarEvent::all_day("a", "Alice - Vacation", day, day),
    ///     CalendarEvent::all_day("b", "Alice - Vacation", day, day),
    /// ];
    ///
    /// let index = CalendarIndex::build(&events, &DefaultIdentity).unwrap();
    /// assert_eq!(index.len(), 1);
    /// assert_eq!(index.duplicates()[0].id, "b");
    /// ```
    pub fn build<S>(events: &'a [CalendarEvent], scheme: &S) -> SyncResult<Self>
    where
        S: IdentityScheme + ?Sized,
    {
        let mut content_keys = HashSet::with_capacity(events.len());
        let mut first_seen = Vec::with_capacity(events.len());
        let mut identities = HashSet::with_capacity(events.len());
        let mut duplicates = Vec::new();

        for event in events {
            let start = boundary_day(event, &event.start, "start")?;
            let end = boundary_day(event, &event.end, "end")?;
            let content_key = ContentKey::new(&event.summary, start, end);

            if content_keys.contains(&content_key) {
                duplicates.push(event);
                continue;
            }

            let identity = event
                .summary_parts()
                .map(|(employee, leave_type)| scheme.derive_identity(employee, leave_type, start, end));
            if let Some(identity) = &identity {
                identities.insert(identity.clone());
            }

            content_keys.insert(content_key.clone());
            first_seen.push(IndexedEvent {
                event,
                content_key,
                identity,
            });
        }

        Ok(Self {
            content_keys,
            first_seen,
            identities,
            duplicates,
        })
    }

    /// Returns true if a first-seen event carries this identity.
    pub fn contains_identity(&self, identity: &EventIdentity) -> bool {
        self.identities.contains(identity)
    }

    /// First occurrences, in calendar order.
    pub fn first_occurrences(&self) -> &[IndexedEvent<'a>] {
        &self.first_seen
    }

    /// Later occurrences of an already-seen content key, in calendar order.
    pub fn duplicates(&self) -> &[&'a CalendarEvent] {
        &self.duplicates
    }

    /// Number of distinct content keys.
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    /// Returns true if no events were indexed.
    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }
}

fn boundary_day(
    event: &CalendarEvent,
    boundary: &EventDate,
    field: &'static str,
) -> SyncResult<NaiveDate> {
    boundary
        .resolve_day()
        .ok_or_else(|| SyncError::MissingEventDate {
            event_id: event.id.clone(),
            field,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDate;
    use crate::reconcile::{DefaultIdentity, event_identity};
    use chrono::DateTime;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn event(id: &str, summary: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::all_day(id, summary, date(start), date(end))
    }

    #[test]
    fn test_empty_calendar() {
        let index = CalendarIndex::build(&[], &DefaultIdentity).unwrap();
        assert!(index.is_empty());
        assert!(index.duplicates().is_empty());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let events = vec![
            event("first", "Alice - Vacation", "2024-01-01", "2024-01-04"),
            event("second", "Alice - Vacation", "2024-01-01", "2024-01-04"),
            event("third", "Alice - Vacation", "2024-01-01", "2024-01-04"),
        ];

        let index = CalendarIndex::build(&events, &DefaultIdentity).unwrap();
        let key = ContentKey::new("Alice - Vacation", date("2024-01-01"), date("2024-01-04"));

        assert_eq!(index.len(), 1);
        assert_eq!(index.first_occurrences()[0].event.id, "first");
        assert_eq!(index.first_occurrences()[0].content_key, key);
        let duplicate_ids: Vec<&str> = index.duplicates().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(duplicate_ids, vec!["second", "third"]);
    }

    #[test]
    fn test_identity_set_holds_derived_identities() {
        let events = vec![
            event("a", "Alice - Vacation", "2024-01-01", "2024-01-04"),
            event("b", "Bob - Sick", "2024-02-01", "2024-02-01"),
        ];

        let index = CalendarIndex::build(&events, &DefaultIdentity).unwrap();
        assert!(index.contains_identity(&event_identity(
            "Alice",
            "Vacation",
            date("2024-01-01"),
            date("2024-01-04")
        )));
        assert!(index.contains_identity(&event_identity(
            "Bob",
            "Sick",
            date("2024-02-01"),
            date("2024-02-01")
        )));
        assert!(!index.contains_identity(&event_identity(
            "Bob",
            "Sick",
            date("2024-02-01"),
            date("2024-02-02")
        )));
    }

    #[test]
    fn test_summary_without_separator_has_no_identity() {
        let events = vec![event("a", "Company offsite", "2024-01-01", "2024-01-02")];

        let index = CalendarIndex::build(&events, &DefaultIdentity).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.first_occurrences()[0].identity.is_none());
    }

    #[test]
    fn test_date_time_events_key_by_day() {
        let timed = CalendarEvent {
            id: "timed".to_string(),
            summary: "Alice - Vacation".to_string(),
            location: None,
            start: EventDate::at(DateTime::parse_from_rfc3339("2024-01-01T09:00:00+00:00").unwrap()),
            end: EventDate::at(DateTime::parse_from_rfc3339("2024-01-01T17:00:00+00:00").unwrap()),
        };
        let all_day = event("day", "Alice - Vacation", "2024-01-01", "2024-01-01");
        let events = vec![timed, all_day];

        let index = CalendarIndex::build(&events, &DefaultIdentity).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.duplicates()[0].id, "day");
    }

    #[test]
    fn test_missing_date_fails_fast() {
        let mut broken = event("broken", "Alice - Vacation", "2024-01-01", "2024-01-02");
        broken.end = EventDate::default();
        let events = vec![event("ok", "Bob - Sick", "2024-02-01", "2024-02-01"), broken];

        let result = CalendarIndex::build(&events, &DefaultIdentity);
        match result {
            Err(SyncError::MissingEventDate { event_id, field }) => {
                assert_eq!(event_id, "broken");
                assert_eq!(field, "end");
            }
            other => panic!("Expected MissingEventDate error, got {:?}", other),
        }
    }
}
