//! Error types for the Natusfera API client

use std::fmt;

use crate::record::DateField;

/// Errors that can occur when interacting with the Natusfera API
#[derive(Debug)]
pub enum NatusferaError {
    /// The request could not be completed or its body could not be decoded
    Transport(TransportError),
    /// A date field held text that is not ISO-8601
    Format(FormatError),
    /// The query matches too many results to page through
    ResultRange { query: String, probe_page: u32 },
    /// The taxon is not one of the recognized iconic taxa
    InvalidTaxon(String),
    /// Configuration error
    Config(String),
}

impl fmt::Display for NatusferaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{}", e),
            Self::Format(e) => write!(f, "{}", e),
            Self::ResultRange { query, probe_page } => write!(
                f,
                "Number of results for {:?} out of range (page {} is still full), add more filters",
                query, probe_page
            ),
            Self::InvalidTaxon(taxon) => write!(f, "Not a valid iconic taxon: {}", taxon),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for NatusferaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for NatusferaError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<FormatError> for NatusferaError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<reqwest::Error> for NatusferaError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.into())
    }
}

impl From<serde_json::Error> for NatusferaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Transport(e.into())
    }
}

/// Network or HTTP level failure while fetching a page
#[derive(Debug)]
pub enum TransportError {
    /// HTTP request failed
    Http(Box<reqwest::Error>),
    /// Server answered with a non-success status
    Status { url: String, status: u16 },
    /// Failed to parse JSON response
    Json(serde_json::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Natusfera HTTP error: {}", e),
            Self::Status { url, status } => {
                write!(f, "Natusfera returned status {} for {}", status, url)
            }
            Self::Json(e) => write!(f, "Natusfera JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e.as_ref()),
            Self::Status { .. } => None,
            Self::Json(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(Box::new(e))
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// A date field that could not be parsed as ISO-8601
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub field: DateField,
    pub value: String,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid ISO-8601 value for {}: {:?}",
            self.field.key(),
            self.value
        )
    }
}

impl std::error::Error for FormatError {}

/// Result type for Natusfera API operations
pub type Result<T> = std::result::Result<T, NatusferaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_taxon_display() {
        let err = NatusferaError::InvalidTaxon("Dinosauria".to_string());
        assert_eq!(format!("{}", err), "Not a valid iconic taxon: Dinosauria");
    }

    #[test]
    fn test_format_error_display() {
        let err = NatusferaError::from(FormatError {
            field: DateField::ObservedOn,
            value: "yesterday".to_string(),
        });
        assert_eq!(
            format!("{}", err),
            "Invalid ISO-8601 value for observed_on: \"yesterday\""
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_status_error_display() {
        let err = TransportError::Status {
            url: "https://natusfera.gbif.es/projects/1.json".to_string(),
            status: 404,
        };
        assert_eq!(
            format!("{}", err),
            "Natusfera returned status 404 for https://natusfera.gbif.es/projects/1.json"
        );
    }

    #[test]
    fn test_result_range_mentions_filters() {
        let err = NatusferaError::ResultRange {
            query: "Quercus".to_string(),
            probe_page: 100,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("\"Quercus\""));
        assert!(msg.contains("page 100"));
        assert!(msg.contains("add more filters"));
    }
}
