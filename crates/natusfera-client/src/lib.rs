//! Rust client for the Natusfera biodiversity observations API
//!
//! Natusfera is an iNaturalist-compatible platform run by GBIF Spain. This
//! crate fetches projects, places and observations, walking page-numbered
//! list endpoints until a short page is returned and parsing the
//! `created_at`, `observed_on` and `updated_at` fields of every record.
//!
//! # Example
//!
//! ```no_run
//! use natusfera_client::{DateField, NatusferaClient};
//!
//! # async fn example() -> Result<(), natusfera_client::NatusferaError> {
//! let client = NatusferaClient::new()?;
//!
//! let observations = client.observations_by_taxon("Aves").await?;
//! for obs in &observations {
//!     println!("{:?} {:?}", obs.id(), obs.date(DateField::ObservedOn));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /projects/{id}.json` - Project by id
//! - `GET /projects/search.json` - Projects by name
//! - `GET /observations/{id}.json` - Observation by id
//! - `GET /observations.json?q=` - Free-text search, bounded by a probe page
//! - `GET /observations/{user}.json` - Observations of a user
//! - `GET /observations/project/{id}.json` - Observations of a project
//! - `GET /observations.json?iconic_taxa=` - Observations of an iconic taxon
//! - `GET /places.json` - Places by name
//! - `GET /observations.json?place_id=` - Observations of a place

mod client;
mod config;
mod endpoint;
mod error;
mod fetch;
mod normalize;
mod paginate;
mod record;
mod taxon;
#[cfg(test)]
mod testing;
mod types;

pub use client::NatusferaClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_PROBE_PAGE};
pub use endpoint::Endpoint;
pub use error::{FormatError, NatusferaError, Result, TransportError};
pub use fetch::{Fetch, HttpFetcher, PageFetcher};
pub use normalize::{normalize_many, normalize_one, normalize_page};
pub use paginate::PaginatedCollector;
pub use record::{DateField, Page, Record, Timestamp};
pub use taxon::IconicTaxon;
pub use types::Place;
