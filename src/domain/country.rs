//! Country domain model.
//!
//! A [`Country`] is one record from the REST Countries API. Records are
//! read-only once decoded; the `cca3` identifier is the only equality key used
//! anywhere in the plugin. Decoding is lenient: everything except the
//! identifier and the common name may be missing from the payload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder shown for missing optional values.
pub const NOT_AVAILABLE: &str = "N/A";

/// A country record as supplied by the data source.
///
/// # Examples
///
/// ```
/// use zatlas::Country;
///
/// let json = r#"{"cca3":"FRA","name":{"common":"France","official":"French Republic"},
///               "region":"Europe","population":67000000,"capital":["Paris"]}"#;
/// let france: Country = serde_json::from_str(json).unwrap();
/// assert_eq!(france.id(), "FRA");
/// assert_eq!(france.capital(), Some("Paris"));
/// assert_eq!(france.area_or_zero(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-3 code, unique and stable.
    pub cca3: String,

    pub name: CountryName,

    #[serde(default)]
    pub flags: Flags,

    /// The API sends a list; only the first entry is meaningful.
    #[serde(default)]
    pub capital: Vec<String>,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub subregion: Option<String>,

    #[serde(default)]
    pub population: u64,

    /// Square kilometres. Absent for a handful of territories.
    #[serde(default)]
    pub area: Option<f64>,

    /// Language code → display name.
    #[serde(default)]
    pub languages: BTreeMap<String, String>,

    /// Currency code → name and symbol.
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,

    #[serde(default)]
    pub timezones: Vec<String>,

    /// Identifiers of bordering countries.
    #[serde(default)]
    pub borders: Vec<String>,

    #[serde(default)]
    pub maps: Maps,
}

/// Common and official names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

/// Flag image references.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub svg: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A currency entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// External map links.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maps {
    #[serde(default)]
    pub google_maps: Option<String>,
    #[serde(default)]
    pub open_street_maps: Option<String>,
}

impl Country {
    /// Returns the stable identifier (`cca3`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.cca3
    }

    /// Returns the common name.
    #[must_use]
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// Returns the capital, if the record has one.
    #[must_use]
    pub fn capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    /// Area used for comparisons; a missing area counts as zero.
    #[must_use]
    pub fn area_or_zero(&self) -> f64 {
        self.area.unwrap_or(0.0)
    }

    /// Preferred flag reference (SVG first, PNG otherwise).
    #[must_use]
    pub fn flag_url(&self) -> Option<&str> {
        self.flags.svg.as_deref().or(self.flags.png.as_deref())
    }

    /// Case-insensitive substring match against the common name.
    ///
    /// `needle_lower` must already be lowercased; callers filtering many
    /// records lowercase the query once.
    #[must_use]
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.common.to_lowercase().contains(needle_lower)
    }

    /// Whether the language mapping contains `code`.
    #[must_use]
    pub fn speaks(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Whether the currency mapping contains `code`.
    #[must_use]
    pub fn uses_currency(&self, code: &str) -> bool {
        self.currencies.contains_key(code)
    }

    #[must_use]
    pub fn capital_display(&self) -> &str {
        self.capital().unwrap_or(NOT_AVAILABLE)
    }

    #[must_use]
    pub fn region_display(&self) -> &str {
        if self.region.is_empty() {
            NOT_AVAILABLE
        } else {
            &self.region
        }
    }

    #[must_use]
    pub fn subregion_display(&self) -> &str {
        self.subregion
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Language display names joined with `", "`, or `N/A`.
    #[must_use]
    pub fn language_list(&self) -> String {
        if self.languages.is_empty() {
            return NOT_AVAILABLE.to_string();
        }
        self.languages
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Currencies formatted as `Name (symbol)` joined with `", "`, or `N/A`.
    #[must_use]
    pub fn currency_list(&self) -> String {
        if self.currencies.is_empty() {
            return NOT_AVAILABLE.to_string();
        }
        self.currencies
            .values()
            .map(|c| match &c.symbol {
                Some(symbol) => format!("{} ({symbol})", c.name),
                None => c.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn timezone_list(&self) -> String {
        if self.timezones.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.timezones.join(", ")
        }
    }

    /// Population with thousands separators, e.g. `67,391,582`.
    #[must_use]
    pub fn population_display(&self) -> String {
        group_thousands(self.population)
    }

    /// Area rounded to whole square kilometres, e.g. `551,695 km²`.
    #[must_use]
    pub fn area_display(&self) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = self.area_or_zero().max(0.0).round() as u64;
        format!("{} km²", group_thousands(whole))
    }
}

/// Formats an integer with `,` every three digits.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(json: &str) -> Country {
        serde_json::from_str(json).expect("fixture should decode")
    }

    #[test]
    fn test_lenient_decode_defaults() {
        let c = minimal(r#"{"cca3":"ATA","name":{"common":"Antarctica"}}"#);
        assert_eq!(c.id(), "ATA");
        assert_eq!(c.population, 0);
        assert!(c.area.is_none());
        assert!(c.languages.is_empty());
        assert_eq!(c.capital_display(), "N/A");
        assert_eq!(c.subregion_display(), "N/A");
        assert_eq!(c.language_list(), "N/A");
        assert_eq!(c.currency_list(), "N/A");
        assert_eq!(c.timezone_list(), "N/A");
    }

    #[test]
    fn test_decode_full_record() {
        let c = minimal(
            r#"{
                "cca3":"FRA",
                "name":{"common":"France","official":"French Republic","nativeName":{}},
                "flags":{"png":"f.png","svg":"f.svg"},
                "capital":["Paris"],
                "region":"Europe",
                "subregion":"Western Europe",
                "population":67391582,
                "area":551695.0,
                "languages":{"fra":"French"},
                "currencies":{"EUR":{"name":"Euro","symbol":"€"}},
                "timezones":["UTC-10:00","UTC+01:00"],
                "borders":["AND","BEL"],
                "maps":{"googleMaps":"https://goo.gl/maps/g7QxxSFsWyTPKuzd7"},
                "unknownField":true
            }"#,
        );
        assert_eq!(c.capital(), Some("Paris"));
        assert_eq!(c.flag_url(), Some("f.svg"));
        assert_eq!(c.currency_list(), "Euro (€)");
        assert_eq!(c.population_display(), "67,391,582");
        assert_eq!(c.area_display(), "551,695 km²");
        assert_eq!(c.timezone_list(), "UTC-10:00, UTC+01:00");
        assert_eq!(
            c.maps.google_maps.as_deref(),
            Some("https://goo.gl/maps/g7QxxSFsWyTPKuzd7")
        );
        assert!(c.speaks("fra"));
        assert!(c.uses_currency("EUR"));
        assert!(!c.uses_currency("USD"));
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let c = minimal(r#"{"cca3":"FRA","name":{"common":"France"}}"#);
        assert!(c.name_contains("fra"));
        assert!(c.name_contains("ance"));
        assert!(!c.name_contains("ger"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(83_240_525), "83,240,525");
    }
}
