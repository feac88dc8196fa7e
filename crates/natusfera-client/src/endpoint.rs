//! Endpoint templates for each API resource

use std::fmt;

use crate::taxon::IconicTaxon;

/// A resource path plus its filters, before pagination parameters are added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    params: Vec<(&'static str, String)>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter; the value is percent-encoded when the URL is built
    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// URL without pagination parameters
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url, self.path);
        let mut sep = '?';
        for (key, value) in &self.params {
            url.push_str(&format!("{}{}={}", sep, key, urlencoding::encode(value)));
            sep = '&';
        }
        url
    }

    /// URL of one page of a list endpoint (1-based)
    pub fn page_url(&self, base_url: &str, per_page: usize, page: u32) -> String {
        let mut url = self.url(base_url);
        let sep = if self.params.is_empty() { '?' } else { '&' };
        url.push_str(&format!("{}per_page={}&page={}", sep, per_page, page));
        url
    }

    /// `GET /projects/{id}.json`
    pub fn project(id: u64) -> Self {
        Self::new(format!("/projects/{}.json", id))
    }

    /// `GET /projects/search.json?q={name}`
    pub fn project_search(name: &str) -> Self {
        Self::new("/projects/search.json").param("q", name)
    }

    /// `GET /observations/{id}.json`
    pub fn observation(id: u64) -> Self {
        Self::new(format!("/observations/{}.json", id))
    }

    /// `GET /observations.json?q="{query}"`, quoted for phrase search
    pub fn observation_search(query: &str) -> Self {
        Self::new("/observations.json").param("q", format!("\"{}\"", query))
    }

    /// `GET /observations/{user}.json`
    pub fn user_observations(user: &str) -> Self {
        Self::new(format!("/observations/{}.json", urlencoding::encode(user)))
    }

    /// `GET /observations/project/{id}.json`
    pub fn project_observations(id: u64) -> Self {
        Self::new(format!("/observations/project/{}.json", id))
    }

    /// `GET /observations.json?iconic_taxa={taxon}`
    pub fn taxon_observations(taxon: IconicTaxon) -> Self {
        Self::new("/observations.json").param("iconic_taxa", taxon)
    }

    /// `GET /places.json?q={name}`
    pub fn place_search(name: &str) -> Self {
        Self::new("/places.json").param("q", name)
    }

    /// `GET /observations.json?place_id={id}`
    pub fn place_observations(place_id: u64) -> Self {
        Self::new("/observations.json").param("place_id", place_id)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url(""))
    }
}
