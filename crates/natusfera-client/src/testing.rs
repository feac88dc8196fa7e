//! In-memory transport for unit tests

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::error::TransportError;
use crate::fetch::Fetch;

type Responder = Box<dyn Fn(&str) -> Result<Value, TransportError> + Send + Sync>;

/// Answers every request from a closure and records the URLs it was asked for
pub(crate) struct ScriptedFetcher {
    respond: Responder,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub(crate) fn new(
        respond: impl Fn(&str) -> Result<Value, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve page `n` with `counts[n - 1]` observations; later pages are empty
    pub(crate) fn pages(counts: Vec<usize>) -> Self {
        Self::new(move |url| {
            let page = page_param(url).unwrap_or(1) as usize;
            let count = counts.get(page - 1).copied().unwrap_or(0);
            Ok(observations(count, (page as u64) * 1000))
        })
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn requested_pages(&self) -> Vec<u32> {
        self.requests().iter().filter_map(|u| page_param(u)).collect()
    }
}

impl Fetch for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        (self.respond)(url)
    }
}

/// Value of the `page` query parameter
pub(crate) fn page_param(url: &str) -> Option<u32> {
    query_param(url, "page")?.parse().ok()
}

pub(crate) fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then_some(v)
    })
}

/// `count` observation objects with consecutive ids starting at `first_id`
pub(crate) fn observations(count: usize, first_id: u64) -> Value {
    Value::Array(
        (0..count as u64)
            .map(|i| {
                json!({
                    "id": first_id + i,
                    "species_guess": "Quercus ilex",
                    "observed_on": "2021-03-04",
                    "created_at": "2021-03-04T10:15:00+01:00"
                })
            })
            .collect(),
    )
}
