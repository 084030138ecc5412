//! REST Countries endpoints and request tagging.
//!
//! The host performs HTTP on our behalf and hands the response back as a
//! separate event, so every request carries a [`FetchKind`] tag in its
//! context map. The tag tells the completion which endpoint answered and,
//! for detail and border reads, which country the request was issued for.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Projection for the list read. The API rejects `/all` without one and
/// caps it at ten fields.
pub const LIST_FIELDS: &str = "name,cca3,flags,capital,region,population,area,languages,currencies";

/// Projection for border-name lookups.
pub const BORDER_FIELDS: &str = "name,cca3";

/// Context-map key holding the serialized [`FetchKind`].
pub const CONTEXT_KEY: &str = "zatlas_fetch";

/// Which read a response belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum FetchKind {
    /// The full country list.
    All,
    /// One country's full record, for the detail view.
    Detail(String),
    /// Names of the countries bordering the given one.
    Borders(String),
}

impl FetchKind {
    /// The country code a detail or borders read was issued for.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Detail(code) | Self::Borders(code) => Some(code),
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Detail(_) => "detail",
            Self::Borders(_) => "borders",
        }
    }

    /// Encodes the tag into a request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        match serde_json::to_string(self) {
            Ok(tag) => {
                context.insert(CONTEXT_KEY.to_string(), tag);
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode fetch tag"),
        }
        context
    }

    /// Decodes the tag from a response context map. `None` for responses
    /// to requests this plugin did not tag.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let tag = context.get(CONTEXT_KEY)?;
        serde_json::from_str(tag)
            .map_err(|e| tracing::debug!(error = %e, "unrecognised fetch tag"))
            .ok()
    }
}

/// A GET the plugin shim should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub kind: FetchKind,
    pub url: String,
}

/// Normalises a country code for use in a URL path or query.
///
/// Codes are ASCII alphanumeric; anything else is dropped and the rest is
/// uppercased. Returns `None` if nothing usable remains.
#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let clean: String = code
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    (!clean.is_empty()).then_some(clean)
}

pub(crate) fn all_url(base: &str) -> String {
    format!("{base}/all?fields={LIST_FIELDS}")
}

pub(crate) fn alpha_url(base: &str, code: &str) -> String {
    format!("{base}/alpha/{code}")
}

pub(crate) fn codes_url(base: &str, codes: &[String]) -> String {
    format!("{base}/alpha?codes={}&fields={BORDER_FIELDS}", codes.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_round_trip() {
        for kind in [
            FetchKind::All,
            FetchKind::Detail("FRA".to_string()),
            FetchKind::Borders("DEU".to_string()),
        ] {
            let context = kind.to_context();
            assert_eq!(FetchKind::from_context(&context), Some(kind));
        }
    }

    #[test]
    fn test_untagged_context_is_ignored() {
        let mut context = BTreeMap::new();
        assert_eq!(FetchKind::from_context(&context), None);
        context.insert(CONTEXT_KEY.to_string(), "garbage".to_string());
        assert_eq!(FetchKind::from_context(&context), None);
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("fra").as_deref(), Some("FRA"));
        assert_eq!(normalize_code(" d/e?u ").as_deref(), Some("DEU"));
        assert_eq!(normalize_code("../"), None);
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            all_url(DEFAULT_BASE_URL),
            "https://restcountries.com/v3.1/all?fields=name,cca3,flags,capital,region,population,area,languages,currencies"
        );
        assert_eq!(alpha_url("http://x", "FRA"), "http://x/alpha/FRA");
        assert_eq!(
            codes_url("http://x", &["BEL".to_string(), "DEU".to_string()]),
            "http://x/alpha?codes=BEL,DEU&fields=name,cca3"
        );
    }
}
