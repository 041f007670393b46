//! In-memory fetch adapter and recording delay for collector/sweeper tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::Url;

use crate::delay::Delay;
use crate::error::PlacesError;
use crate::fetch::JsonFetch;
use crate::query::PlacesEndpoints;
use crate::session::{SessionOptions, SweepSession};

/// Shared, ordered log of fetches and pauses.
pub(crate) type EventLog = Arc<Mutex<Vec<String>>>;

/// Serves canned bodies keyed by request:
/// - `nearby:<lat>,<lng>` for first pages,
/// - `page:<token>` for continuation pages,
/// - `details:<place_id>` for details.
///
/// Keys with no canned body yield an empty search page, or `None` for details.
/// Keys in `failing` return a transport-style error.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    bodies: HashMap<String, Option<serde_json::Value>>,
    failing: HashSet<String>,
    log: EventLog,
}

impl FakeFetcher {
    pub(crate) fn new(log: &EventLog) -> Self {
        Self {
            log: Arc::clone(log),
            ..Self::default()
        }
    }

    pub(crate) fn with(mut self, key: &str, body: serde_json::Value) -> Self {
        self.bodies.insert(key.to_owned(), Some(body));
        self
    }

    /// Simulates a body that failed to parse.
    pub(crate) fn with_unparsable(mut self, key: &str) -> Self {
        self.bodies.insert(key.to_owned(), None);
        self
    }

    pub(crate) fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_owned());
        self
    }

    fn key_for(url: &Url) -> String {
        let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();
        if let Some(id) = pairs.get("placeid") {
            format!("details:{id}")
        } else if let Some(token) = pairs.get("pagetoken") {
            format!("page:{token}")
        } else {
            format!(
                "nearby:{}",
                pairs.get("location").map_or("", String::as_str)
            )
        }
    }
}

impl JsonFetch for FakeFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Option<serde_json::Value>, PlacesError> {
        let key = Self::key_for(url);
        self.log.lock().unwrap().push(format!("fetch {key}"));

        if self.failing.contains(&key) {
            return Err(PlacesError::UnexpectedStatus {
                status: 503,
                url: key,
            });
        }

        match self.bodies.get(&key) {
            Some(body) => Ok(body.clone()),
            None if key.starts_with("details:") => Ok(None),
            None => Ok(Some(serde_json::json!({"status": "ZERO_RESULTS", "results": []}))),
        }
    }
}

/// Records each requested pause instead of sleeping.
pub(crate) struct RecordingDelay {
    log: EventLog,
}

impl RecordingDelay {
    pub(crate) fn new(log: &EventLog) -> Self {
        Self {
            log: Arc::clone(log),
        }
    }
}

impl Delay for RecordingDelay {
    async fn pause(&self, duration: Duration) {
        self.log
            .lock()
            .unwrap()
            .push(format!("pause {}ms", duration.as_millis()));
    }
}

pub(crate) fn session(
    fetcher: FakeFetcher,
    log: &EventLog,
) -> SweepSession<FakeFetcher, RecordingDelay> {
    session_with_options(fetcher, log, SessionOptions::default())
}

pub(crate) fn session_with_options(
    fetcher: FakeFetcher,
    log: &EventLog,
    options: SessionOptions,
) -> SweepSession<FakeFetcher, RecordingDelay> {
    let endpoints = PlacesEndpoints::new("https://places.test/api", "test-key")
        .expect("test endpoints should build");
    SweepSession::new(fetcher, RecordingDelay::new(log), endpoints, options)
}

pub(crate) fn search_page(ids: &[&str], next_token: Option<&str>) -> serde_json::Value {
    let results: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({"place_id": id, "name": format!("summary {id}")}))
        .collect();
    let mut page = serde_json::json!({"status": "OK", "results": results});
    if let Some(token) = next_token {
        page["next_page_token"] = serde_json::Value::String(token.to_owned());
    }
    page
}

pub(crate) fn open_details(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "result": {
            "place_id": id,
            "name": name,
            "formatted_address": format!("{name}, Columbia, SC"),
            "geometry": {"location": {"lat": 34.0, "lng": -81.0}},
            "types": ["establishment"]
        }
    })
}

pub(crate) fn closed_details(id: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "permanently_closed": true,
        "result": {"place_id": id, "name": "Closed Shop"}
    })
}

pub(crate) fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}
