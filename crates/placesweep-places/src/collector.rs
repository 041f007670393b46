//! Page-chain walk and detail collection for one search.

use serde::Serialize;

use crate::delay::Delay;
use crate::error::PlacesError;
use crate::fetch::{redact_key, JsonFetch};
use crate::query::SearchQuery;
use crate::record::PlaceRecord;
use crate::session::SweepSession;
use crate::types::{DetailsResponse, SearchPage, STATUS_REQUEST_DENIED};

/// Counters for one page chain, or summed over a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectStats {
    pub pages: usize,
    pub details_fetched: usize,
    pub places_added: usize,
    pub closed_skipped: usize,
    pub unusable_details: usize,
    /// Identifiers skipped because they were already fetched this session.
    pub already_known: usize,
    /// Chains that reached the API page ceiling and may be missing results.
    pub truncated_chains: usize,
}

impl CollectStats {
    pub fn absorb(&mut self, other: &Self) {
        self.pages += other.pages;
        self.details_fetched += other.details_fetched;
        self.places_added += other.places_added;
        self.closed_skipped += other.closed_skipped;
        self.unusable_details += other.unusable_details;
        self.already_known += other.already_known;
        self.truncated_chains += other.truncated_chains;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailOutcome {
    Added,
    Closed,
    Unusable,
}

impl<F: JsonFetch, D: Delay> SweepSession<F, D> {
    /// Walks the page chain that starts at `query`.
    ///
    /// For each identifier not yet fetched this session, requests its details
    /// and stores a [`PlaceRecord`] unless the place is permanently closed or
    /// the response is unusable. Before every continuation page the session
    /// waits `page_token_delay`; the chain ends on the first page without a
    /// token.
    ///
    /// # Errors
    ///
    /// Any fetch error aborts the chain and is returned as-is; records stored
    /// before the failure stay in the store. Unparsable bodies are not errors.
    pub async fn collect(&mut self, query: SearchQuery) -> Result<CollectStats, PlacesError> {
        let mut stats = CollectStats::default();
        let mut next = Some(query);

        while let Some(query) = next.take() {
            if stats.pages > 0 {
                tracing::info!(
                    page = stats.pages + 1,
                    "page chain continues — waiting for token to activate"
                );
                self.delay.pause(self.options.page_token_delay).await;
            }

            let page = self.fetch_page(&query).await?;
            stats.pages += 1;

            for result in &page.results {
                let Some(place_id) = result.place_id.as_deref().filter(|id| !id.is_empty())
                else {
                    tracing::debug!("search result without place_id — skipping");
                    continue;
                };

                if self.store.is_known(place_id) {
                    stats.already_known += 1;
                    continue;
                }

                stats.details_fetched += 1;
                match self.collect_details(place_id).await? {
                    DetailOutcome::Added => stats.places_added += 1,
                    DetailOutcome::Closed => stats.closed_skipped += 1,
                    DetailOutcome::Unusable => stats.unusable_details += 1,
                }
            }

            next = page.next_token().map(|token| SearchQuery::NextPage {
                token: token.to_owned(),
            });
        }

        if stats.pages >= self.options.page_ceiling {
            stats.truncated_chains = 1;
            tracing::warn!(
                pages = stats.pages,
                "page chain reached the API page ceiling — results for this circle may be truncated; consider a smaller radius"
            );
        }

        Ok(stats)
    }

    /// Fetches one search page. Missing or malformed bodies become an empty
    /// page with no continuation token.
    async fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, PlacesError> {
        let url = self.endpoints.search_url(query)?;
        let Some(body) = self.fetcher.fetch_json(&url).await? else {
            return Ok(SearchPage::default());
        };
        check_request_denied(&body)?;

        match serde_json::from_value::<SearchPage>(body) {
            Ok(page) => {
                if let Some(status) = page
                    .status
                    .as_deref()
                    .filter(|s| !matches!(*s, "OK" | "ZERO_RESULTS"))
                {
                    tracing::warn!(
                        url = %redact_key(&url),
                        status,
                        error_message = page.error_message.as_deref().unwrap_or(""),
                        "search page returned non-OK status"
                    );
                }
                Ok(page)
            }
            Err(e) => {
                tracing::warn!(
                    url = %redact_key(&url),
                    error = %e,
                    "search page has unexpected shape — treating as empty"
                );
                Ok(SearchPage::default())
            }
        }
    }

    /// Fetches details for `place_id` and stores the record if the place is
    /// open. The identifier is marked as attempted before the request so it is
    /// never fetched twice, whatever the outcome.
    async fn collect_details(&mut self, place_id: &str) -> Result<DetailOutcome, PlacesError> {
        self.store.mark_attempted(place_id);
        let url = self.endpoints.details_url(place_id)?;
        tracing::debug!(place_id, "fetching place details");

        let Some(body) = self.fetcher.fetch_json(&url).await? else {
            tracing::warn!(place_id, "details body unusable — skipping place");
            return Ok(DetailOutcome::Unusable);
        };
        check_request_denied(&body)?;

        let response = match serde_json::from_value::<DetailsResponse>(body) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    place_id,
                    error = %e,
                    "details have unexpected shape — skipping place"
                );
                return Ok(DetailOutcome::Unusable);
            }
        };

        if response.is_permanently_closed() {
            tracing::debug!(place_id, "place permanently closed — not stored");
            return Ok(DetailOutcome::Closed);
        }

        let Some(details) = response.result else {
            tracing::warn!(
                place_id,
                status = response.status.as_deref().unwrap_or(""),
                "details response has no result — skipping place"
            );
            return Ok(DetailOutcome::Unusable);
        };

        self.store.insert(PlaceRecord::from_details(place_id, details));
        Ok(DetailOutcome::Added)
    }
}

/// Surfaces `REQUEST_DENIED` as an error; every later request would fail the
/// same way.
fn check_request_denied(body: &serde_json::Value) -> Result<(), PlacesError> {
    if body.get("status").and_then(serde_json::Value::as_str) == Some(STATUS_REQUEST_DENIED) {
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(PlacesError::RequestDenied { message });
    }
    Ok(())
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
