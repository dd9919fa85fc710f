//! Google Calendar v3 REST backend.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CalendarConfig;
use crate::error::{SyncError, SyncResult};
use crate::models::{CalendarEvent, EventDate, NewCalendarEvent};

use super::{BatchOutcome, CalendarBackend, run_in_batches};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsPage {
    #[serde(default)]
    items: Vec<WireEvent>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    start: Option<WireEventDate>,
    #[serde(default)]
    end: Option<WireEventDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEventDate {
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    date_time: Option<DateTime<FixedOffset>>,
}

impl From<WireEventDate> for EventDate {
    fn from(wire: WireEventDate) -> Self {
        EventDate {
            date: wire.date,
            date_time: wire.date_time,
        }
    }
}

impl From<WireEvent> for CalendarEvent {
    fn from(wire: WireEvent) -> Self {
        CalendarEvent {
            id: wire.id,
            summary: wire.summary.unwrap_or_default(),
            location: wire.location,
            start: wire.start.unwrap_or_default().into(),
            end: wire.end.unwrap_or_default().into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WireDay {
    date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct InsertEvent<'a> {
    summary: &'a str,
    location: &'a str,
    start: WireDay,
    end: WireDay,
}

#[derive(Debug, Deserialize)]
struct InsertedEvent {
    id: String,
}

/// Google Calendar client.
///
/// Lists events page by page and writes creates/deletes in batches of
/// `batch_size` concurrent requests.
#[derive(Debug, Clone)]
pub struct GoogleCalendar {
    client: reqwest::Client,
    config: CalendarConfig,
}

impl GoogleCalendar {
    /// Creates a client with its own HTTP connection pool.
    pub fn new(config: CalendarConfig) -> SyncResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SyncError::calendar(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Returns true if an event belongs to this service.
    ///
    /// An event is managed when its location is the location stamped on
    /// created events, or when its summary or location contains one of the
    /// configured markers. An empty marker list manages every event.
    pub fn is_managed(&self, summary: &str, location: Option<&str>) -> bool {
        let markers = &self.config.summary_markers;
        if markers.is_empty() || location == Some(self.config.event_location.as_str()) {
            return true;
        }
        markers.iter().any(|marker| {
            summary.contains(marker.as_str())
                || location.is_some_and(|location| location.contains(marker.as_str()))
        })
    }

    fn events_url(&self, calendar_id: &str, event_id: Option<&str>) -> SyncResult<Url> {
        let mut url = Url::parse(&self.config.api_base_url)
            .map_err(|e| SyncError::calendar(format!("invalid api_base_url: {}", e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| SyncError::calendar("api_base_url cannot hold a path"))?;
            segments
                .pop_if_empty()
                .extend(["calendars", calendar_id, "events"]);
            if let Some(event_id) = event_id {
                segments.push(event_id);
            }
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_page(&self, calendar_id: &str, page_token: Option<&str>) -> SyncResult<EventsPage> {
        let url = self.events_url(calendar_id, None)?;
        let mut request = self
            .authorize(self.client.get(url))
            .query(&[("maxResults", self.config.page_size.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::calendar(format!("list request failed: {}", e)))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::calendar(format!(
                "list request returned HTTP {}: {}",
                status, body
            )));
        }

        response
            .json::<EventsPage>()
            .await
            .map_err(|e| SyncError::calendar(format!("invalid list response: {}", e)))
    }

    async fn insert_event(&self, calendar_id: &str, event: &NewCalendarEvent) -> SyncResult<()> {
        let url = self.events_url(calendar_id, None)?;
        let body = InsertEvent {
            summary: &event.summary,
            location: &event.location,
            start: WireDay {
                date: event.start_date,
            },
            end: WireDay {
                date: event.end_date,
            },
        };

        let response = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::calendar(format!("insert request failed: {}", e)))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::calendar(format!(
                "insert returned HTTP {}: {}",
                status, body
            )));
        }

        match response.json::<InsertedEvent>().await {
            Ok(inserted) => info!(
                event_id = %inserted.id,
                summary = %event.summary,
                start = %event.start_date,
                end = %event.end_date,
                "Event created"
            ),
            Err(err) => warn!(
                summary = %event.summary,
                start = %event.start_date,
                end = %event.end_date,
                error = %err,
                "Event created but the response body could not be decoded"
            ),
        }
        Ok(())
    }

    async fn remove_event(&self, calendar_id: &str, event: &CalendarEvent) -> SyncResult<()> {
        let url = self.events_url(calendar_id, Some(&event.id))?;
        let response = self
            .authorize(self.client.delete(url))
            .send()
            .await
            .map_err(|e| SyncError::calendar(format!("delete request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::GONE {
            debug!(event_id = %event.id, "Event already deleted");
            return Ok(());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::calendar(format!(
                "delete returned HTTP {}: {}",
                status, body
            )));
        }

        info!(event_id = %event.id, summary = %event.summary, "Event deleted");
        Ok(())
    }
}

#[async_trait]
impl CalendarBackend for GoogleCalendar {
    async fn list_events(&self, calendar_id: &str) -> SyncResult<Vec<CalendarEvent>> {
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = self.fetch_page(calendar_id, page_token.as_deref()).await?;
            pages += 1;

            events.extend(
                page.items
                    .into_iter()
                    .filter(|item| item.status.as_deref() != Some("cancelled"))
                    .filter(|item| {
                        self.is_managed(
                            item.summary.as_deref().unwrap_or_default(),
                            item.location.as_deref(),
                        )
                    })
                    .map(CalendarEvent::from),
            );

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(calendar_id, pages, events = events.len(), "Calendar events listed");
        Ok(events)
    }

    async fn create_events(&self, calendar_id: &str, events: &[NewCalendarEvent]) -> BatchOutcome {
        run_in_batches(
            events,
            self.config.batch_size,
            |event| event.identity.to_string(),
            |event| self.insert_event(calendar_id, event),
        )
        .await
    }

    async fn delete_events(&self, calendar_id: &str, events: &[CalendarEvent]) -> BatchOutcome {
        run_in_batches(
            events,
            self.config.batch_size,
            |event| format!("{} ({})", event.id, event.summary),
            |event| self.remove_event(calendar_id, event),
        )
        .await
    }
}
