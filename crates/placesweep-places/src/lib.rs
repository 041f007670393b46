//! Grid sweep crawler for a places "nearby search" API.
//!
//! A [`SweepSession`] owns the API key, the fetch adapter, the page-token
//! delay, and the deduplicated [`PlaceStore`]. [`SweepSession::sweep`] walks a
//! rectangle grid point by grid point; [`SweepSession::collect`] follows one
//! page chain and fetches details for identifiers it has not seen yet.

mod collector;
pub mod delay;
pub mod error;
pub mod fetch;
pub mod grid;
pub mod query;
pub mod record;
mod session;
pub mod store;
mod sweep;
pub mod types;

#[cfg(test)]
mod test_support;

pub use collector::CollectStats;
pub use delay::{Delay, TokioDelay};
pub use error::PlacesError;
pub use fetch::{HttpFetcher, JsonFetch};
pub use grid::{generate_grid, GridSpacing, LongitudeCompression};
pub use query::{PlacesEndpoints, SearchQuery};
pub use record::PlaceRecord;
pub use session::{SessionOptions, SweepSession, API_PAGE_CEILING, DEFAULT_PAGE_TOKEN_DELAY};
pub use store::PlaceStore;
pub use sweep::SweepReport;
