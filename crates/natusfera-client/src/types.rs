//! Typed views of API responses

use serde::{Deserialize, Serialize};

/// Place from `/places.json`
///
/// Only `id` is needed to search observations; the names are kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: u64,
    pub name: Option<String>,
    pub display_name: Option<String>,
}
