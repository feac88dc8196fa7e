//! Natusfera API client

use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::fetch::{Fetch, HttpFetcher, PageFetcher};
use crate::normalize::{normalize_one, normalize_page};
use crate::paginate::PaginatedCollector;
use crate::record::{Page, Record};
use crate::taxon::IconicTaxon;
use crate::types::Place;

/// Client for the Natusfera observations API
///
/// List queries are paginated until a short page is returned and every
/// record comes back with its date fields normalized.
pub struct NatusferaClient<F = HttpFetcher> {
    collector: PaginatedCollector<F>,
}

impl NatusferaClient<HttpFetcher> {
    /// Create a client against the public Natusfera host
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom settings
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(fetcher, config)
    }
}

impl<F: Fetch> NatusferaClient<F> {
    /// Create a client over any transport
    pub fn with_fetcher(fetcher: F, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let pages = PageFetcher::new(fetcher, &config);
        Ok(Self {
            collector: PaginatedCollector::new(pages, config.probe_page),
        })
    }

    /// Get a project by id
    pub async fn project_by_id(&self, id: u64) -> Result<Record> {
        self.fetch_record(&Endpoint::project(id)).await
    }

    /// Search projects by name
    pub async fn projects_by_name(&self, name: &str) -> Result<Vec<Record>> {
        let value = self
            .collector
            .pages()
            .fetch_one(&Endpoint::project_search(name))
            .await?;
        let mut page: Page = serde_json::from_value(value)?;
        normalize_page(&mut page)?;
        Ok(page.into_records())
    }

    /// Get a single observation by id
    pub async fn observation_by_id(&self, id: u64) -> Result<Record> {
        self.fetch_record(&Endpoint::observation(id)).await
    }

    /// Download observations matching a free-text query
    ///
    /// Fails with [`NatusferaError::ResultRange`](crate::NatusferaError::ResultRange)
    /// without paginating when the query matches too many observations.
    pub async fn observations_by_query(&self, query: &str) -> Result<Vec<Record>> {
        let endpoint = Endpoint::observation_search(query);
        self.collector.check_range(&endpoint, query).await?;
        self.collector.collect_all(&endpoint).await
    }

    /// Download every observation of a user
    pub async fn observations_by_user(&self, user: &str) -> Result<Vec<Record>> {
        self.collector
            .collect_all(&Endpoint::user_observations(user))
            .await
    }

    /// Download every observation of a project
    pub async fn observations_by_project(&self, project_id: u64) -> Result<Vec<Record>> {
        self.collector
            .collect_all(&Endpoint::project_observations(project_id))
            .await
    }

    /// Download observations of an iconic taxon given by name
    ///
    /// Unknown names fail with
    /// [`NatusferaError::InvalidTaxon`](crate::NatusferaError::InvalidTaxon)
    /// before any request is made.
    pub async fn observations_by_taxon(&self, taxon: &str) -> Result<Vec<Record>> {
        let taxon: IconicTaxon = taxon.parse()?;
        self.observations_by_iconic_taxon(taxon).await
    }

    /// Download observations of an iconic taxon
    pub async fn observations_by_iconic_taxon(&self, taxon: IconicTaxon) -> Result<Vec<Record>> {
        self.collector
            .collect_all(&Endpoint::taxon_observations(taxon))
            .await
    }

    /// Search places by name
    pub async fn places_by_name(&self, name: &str) -> Result<Vec<Place>> {
        let value = self
            .collector
            .pages()
            .fetch_one(&Endpoint::place_search(name))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Ids of the places matching a name, in the order the API returns them
    pub async fn place_ids(&self, name: &str) -> Result<Vec<u64>> {
        Ok(self
            .places_by_name(name)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect())
    }

    /// Download observations of every place matching a name
    ///
    /// Each record gets a `place_id` field naming the place it was found
    /// under. Results are concatenated in place order.
    pub async fn observations_by_place_name(&self, name: &str) -> Result<Vec<Record>> {
        let place_ids = self.place_ids(name).await?;
        if place_ids.is_empty() {
            warn!(place = name, "No places match name");
        }

        let mut observations = Vec::new();
        for place_id in place_ids {
            let mut records = self
                .collector
                .collect_all(&Endpoint::place_observations(place_id))
                .await?;
            for record in &mut records {
                record.insert("place_id", place_id);
            }
            observations.append(&mut records);
        }

        info!(
            place = name,
            records = observations.len(),
            "Collected observations for place name"
        );
        Ok(observations)
    }

    /// Download observations of a place by id
    pub async fn observations_by_place_id(&self, place_id: u64) -> Result<Vec<Record>> {
        let observations = self
            .collector
            .collect_all(&Endpoint::place_observations(place_id))
            .await?;
        if observations.is_empty() {
            info!(place_id, "No observations for place id");
        }
        Ok(observations)
    }

    async fn fetch_record(&self, endpoint: &Endpoint) -> Result<Record> {
        let value = self.collector.pages().fetch_one(endpoint).await?;
        let mut record: Record = serde_json::from_value(value)?;
        normalize_one(&mut record)?;
        Ok(record)
    }
}
