//! Page-number pagination over list endpoints

use tracing::{debug, info, warn};

use crate::endpoint::Endpoint;
use crate::error::{NatusferaError, Result};
use crate::fetch::{Fetch, PageFetcher};
use crate::normalize::normalize_many;
use crate::record::Record;

/// Drives a [`PageFetcher`] across pages and gathers every record
pub struct PaginatedCollector<F> {
    pages: PageFetcher<F>,
    probe_page: u32,
}

impl<F: Fetch> PaginatedCollector<F> {
    pub fn new(pages: PageFetcher<F>, probe_page: u32) -> Self {
        Self { pages, probe_page }
    }

    pub fn pages(&self) -> &PageFetcher<F> {
        &self.pages
    }

    /// Fetch pages 1, 2, ... until one comes back shorter than the page size
    ///
    /// Pages are requested strictly in order, each only after the previous
    /// one was full. The short page, which may be empty, is the last one
    /// added. Every record is normalized before returning.
    pub async fn collect_all(&self, endpoint: &Endpoint) -> Result<Vec<Record>> {
        let page_size = self.pages.page_size();
        let mut collection = Vec::new();
        let mut n = 1;

        let mut page = self.fetch_records(endpoint, n).await?;
        while page.len() == page_size {
            collection.append(&mut page);
            n += 1;
            page = self.fetch_records(endpoint, n).await?;
        }
        collection.append(&mut page);

        normalize_many(&mut collection)?;

        info!(
            endpoint = %endpoint,
            pages = n,
            records = collection.len(),
            "Collected paginated results"
        );
        Ok(collection)
    }

    /// Fail with [`NatusferaError::ResultRange`] if the probe page is still full
    ///
    /// The API does not report a total count, so a full page far down the
    /// result set is the only bound available before paginating.
    pub async fn check_range(&self, endpoint: &Endpoint, query: &str) -> Result<()> {
        let probe = self.fetch_records(endpoint, self.probe_page).await?;
        if probe.len() >= self.pages.page_size() {
            warn!(
                endpoint = %endpoint,
                probe_page = self.probe_page,
                "Result set too large to paginate"
            );
            return Err(NatusferaError::ResultRange {
                query: query.to_string(),
                probe_page: self.probe_page,
            });
        }
        Ok(())
    }

    async fn fetch_records(&self, endpoint: &Endpoint, page: u32) -> Result<Vec<Record>> {
        let value = self.pages.fetch_page(endpoint, page).await?;
        let records: Vec<Record> = serde_json::from_value(value)?;
        debug!(page, count = records.len(), "Received page");
        Ok(records)
    }
}
