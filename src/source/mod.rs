//! Country data source adapter.
//!
//! [`CountrySource`] builds the REST Countries reads and decodes their
//! responses. Each read is split in two: a `request_*` method returns the
//! [`FetchRequest`] the plugin shim hands to the host, and
//! [`CountrySource::complete`] turns the host's answer into records. One
//! attempt per read; nothing is retried.
//!
//! The last successful list read is kept as the catalog the pipeline works
//! from.

pub mod endpoint;

use serde::Deserialize;

use crate::domain::{Country, Result, ZatlasError};

pub use endpoint::{normalize_code, FetchKind, FetchRequest, DEFAULT_BASE_URL};

/// `/alpha/{code}` answers with an array on v3.1 but with a bare object on
/// some mirrors; accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Many(Vec<Country>),
    One(Box<Country>),
}

#[derive(Debug, Clone)]
pub struct CountrySource {
    base_url: String,
    catalog: Vec<Country>,
}

impl Default for CountrySource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CountrySource {
    /// Creates a source rooted at `base_url`. A trailing `/` is ignored.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            catalog: Vec::new(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The last successful list read, empty until one completes.
    #[must_use]
    pub fn catalog(&self) -> &[Country] {
        &self.catalog
    }

    /// Looks a country up in the catalog by identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Country> {
        self.catalog.iter().find(|c| c.id() == id)
    }

    /// `GET {base}/all`, projected to the list fields.
    #[must_use]
    pub fn request_all(&self) -> FetchRequest {
        FetchRequest {
            kind: FetchKind::All,
            url: endpoint::all_url(&self.base_url),
        }
    }

    /// `GET {base}/alpha/{code}` for the detail view.
    ///
    /// # Errors
    ///
    /// Returns [`ZatlasError::NotFound`] if `code` has no usable characters.
    pub fn request_by_code(&self, code: &str) -> Result<FetchRequest> {
        let code = normalize_code(code)
            .ok_or_else(|| ZatlasError::NotFound(format!("invalid country code '{code}'")))?;
        Ok(FetchRequest {
            url: endpoint::alpha_url(&self.base_url, &code),
            kind: FetchKind::Detail(code),
        })
    }

    /// `GET {base}/alpha?codes=A,B,C` resolving `ids`, tagged with the
    /// country (`owner`) whose borders they are.
    ///
    /// Returns `None` when there is nothing to look up.
    #[must_use]
    pub fn request_by_ids(&self, owner: &str, ids: &[String]) -> Option<FetchRequest> {
        let mut codes: Vec<String> = ids.iter().filter_map(|id| normalize_code(id)).collect();
        codes.dedup();
        if codes.is_empty() {
            return None;
        }
        let owner = normalize_code(owner)?;
        Some(FetchRequest {
            url: endpoint::codes_url(&self.base_url, &codes),
            kind: FetchKind::Borders(owner),
        })
    }

    /// Decodes a response.
    ///
    /// A successful [`FetchKind::All`] read replaces the catalog.
    ///
    /// # Errors
    ///
    /// - [`ZatlasError::NotFound`] for a non-2xx status or an empty array
    /// - [`ZatlasError::Decode`] for a body that is not a country payload
    ///
    /// # Examples
    ///
    /// ```
    /// use zatlas::source::{CountrySource, FetchKind};
    ///
    /// let mut source = CountrySource::default();
    /// let body = br#"{"cca3":"FRA","name":{"common":"France"}}"#;
    /// let found = source.complete(&FetchKind::Detail("FRA".into()), 200, body).unwrap();
    /// assert_eq!(found[0].id(), "FRA");
    ///
    /// let missing = source.complete(&FetchKind::Detail("XYZ".into()), 404, b"{}");
    /// assert!(missing.unwrap_err().is_not_found());
    /// ```
    pub fn complete(&mut self, kind: &FetchKind, status: u16, body: &[u8]) -> Result<Vec<Country>> {
        let _span = tracing::debug_span!("source_complete",
            kind = kind.label(),
            code = ?kind.code(),
            status = status,
            body_len = body.len()
        )
        .entered();

        if !(200..300).contains(&status) {
            tracing::debug!("non-success status");
            return Err(ZatlasError::NotFound(format!(
                "{} read answered HTTP {status}",
                kind.label()
            )));
        }

        let countries = match serde_json::from_slice::<Payload>(body) {
            Ok(Payload::Many(countries)) => countries,
            Ok(Payload::One(country)) => vec![*country],
            Err(e) => {
                tracing::debug!(error = %e, "undecodable body");
                return Err(ZatlasError::Decode(format!("{} read: {e}", kind.label())));
            }
        };

        if countries.is_empty() {
            return Err(ZatlasError::NotFound(format!("{} read returned no countries", kind.label())));
        }

        if *kind == FetchKind::All {
            self.catalog.clone_from(&countries);
            tracing::info!(count = countries.len(), "catalog loaded");
        } else {
            tracing::debug!(count = countries.len(), "countries decoded");
        }
        Ok(countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &[u8] = br#"[
        {"cca3":"FRA","name":{"common":"France"},"population":67000000},
        {"cca3":"DEU","name":{"common":"Germany"},"population":83000000}
    ]"#;

    #[test]
    fn test_all_success_fills_catalog() {
        let mut source = CountrySource::new("https://example.test/v3.1/");
        assert_eq!(
            source.request_all().url,
            format!("https://example.test/v3.1/all?fields={}", endpoint::LIST_FIELDS)
        );

        let countries = source.complete(&FetchKind::All, 200, TWO).unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(source.catalog().len(), 2);
        assert_eq!(source.find("DEU").map(Country::common_name), Some("Germany"));
    }

    #[test]
    fn test_non_success_is_not_found_and_keeps_catalog() {
        let mut source = CountrySource::default();
        source.complete(&FetchKind::All, 200, TWO).unwrap();

        let err = source.complete(&FetchKind::All, 503, b"").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(source.catalog().len(), 2);
    }

    #[test]
    fn test_empty_array_is_not_found() {
        let mut source = CountrySource::default();
        let err = source
            .complete(&FetchKind::Borders("FRA".to_string()), 200, b"[]")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let mut source = CountrySource::default();
        let err = source.complete(&FetchKind::All, 200, b"<html>").unwrap_err();
        assert!(matches!(err, ZatlasError::Decode(_)));

        let err = source
            .complete(&FetchKind::All, 200, br#"{"status":404,"message":"Not Found"}"#)
            .unwrap_err();
        assert!(matches!(err, ZatlasError::Decode(_)));
        assert!(source.catalog().is_empty());
    }

    #[test]
    fn test_detail_does_not_touch_catalog() {
        let mut source = CountrySource::default();
        let body = br#"[{"cca3":"FRA","name":{"common":"France"}}]"#;
        let found = source
            .complete(&FetchKind::Detail("FRA".to_string()), 200, body)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(source.catalog().is_empty());
    }

    #[test]
    fn test_request_by_code_normalizes() {
        let source = CountrySource::new("http://x");
        let request = source.request_by_code("fra").unwrap();
        assert_eq!(request.url, "http://x/alpha/FRA");
        assert_eq!(request.kind, FetchKind::Detail("FRA".to_string()));
        assert!(source.request_by_code("   ").unwrap_err().is_not_found());
    }

    #[test]
    fn test_request_by_ids() {
        let source = CountrySource::new("http://x");
        assert!(source.request_by_ids("FRA", &[]).is_none());

        let ids = vec!["BEL".to_string(), "DEU".to_string()];
        let request = source.request_by_ids("fra", &ids).unwrap();
        assert_eq!(request.kind, FetchKind::Borders("FRA".to_string()));
        assert!(request.url.starts_with("http://x/alpha?codes=BEL,DEU"));
    }
}
