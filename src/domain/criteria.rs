//! User-selected search, filter and sort criteria.
//!
//! [`FilterCriteria`] is owned by the list view and handed to
//! [`crate::pipeline::derive`] on every recomputation. It holds no references to
//! country data.

use serde::{Deserialize, Serialize};

/// Regions offered by the region selector, in display order.
pub const REGIONS: [&str; 5] = ["Africa", "Americas", "Asia", "Europe", "Oceania"];

/// Sort directive applied as the last pipeline stage.
///
/// The wire names (`population_asc`, ...) are stable and accepted by
/// [`SortDirective::parse`]; anything else parses to [`SortDirective::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirective {
    #[default]
    None,
    PopulationAsc,
    PopulationDesc,
    AreaAsc,
    AreaDesc,
}

impl SortDirective {
    /// Every directive, in the order the sort picker lists them.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::PopulationAsc,
        Self::PopulationDesc,
        Self::AreaAsc,
        Self::AreaDesc,
    ];

    /// Parses a wire name. Unknown or empty input means no sort.
    ///
    /// ```
    /// use zatlas::SortDirective;
    ///
    /// assert_eq!(SortDirective::parse("area_desc"), SortDirective::AreaDesc);
    /// assert_eq!(SortDirective::parse("by_vibes"), SortDirective::None);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "population_asc" => Self::PopulationAsc,
            "population_desc" => Self::PopulationDesc,
            "area_asc" => Self::AreaAsc,
            "area_desc" => Self::AreaDesc,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::PopulationAsc => "population_asc",
            Self::PopulationDesc => "population_desc",
            Self::AreaAsc => "area_asc",
            Self::AreaDesc => "area_desc",
        }
    }

    /// Human-readable label for pickers and the criteria bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No sorting",
            Self::PopulationAsc => "Population (Low to High)",
            Self::PopulationDesc => "Population (High to Low)",
            Self::AreaAsc => "Area (Small to Large)",
            Self::AreaDesc => "Area (Large to Small)",
        }
    }
}

/// The complete set of list-view criteria.
///
/// `None` selectors mean "any". An empty `search` disables the search stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub region: Option<String>,
    pub language: Option<String>,
    pub currency: Option<String>,
    pub sort: SortDirective,
    pub favorites_only: bool,
}

impl FilterCriteria {
    /// Whether no stage of the pipeline would narrow or reorder anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Resets every criterion to "any".
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_known_names() {
        for directive in SortDirective::ALL {
            assert_eq!(SortDirective::parse(directive.as_str()), directive);
        }
    }

    #[test]
    fn test_parse_unknown_is_none() {
        assert_eq!(SortDirective::parse(""), SortDirective::None);
        assert_eq!(SortDirective::parse("POPULATION_ASC"), SortDirective::None);
        assert_eq!(SortDirective::parse("name_asc"), SortDirective::None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&SortDirective::PopulationDesc).unwrap();
        assert_eq!(json, "\"population_desc\"");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut criteria = FilterCriteria {
            search: "fra".to_string(),
            region: Some("Europe".to_string()),
            sort: SortDirective::AreaAsc,
            favorites_only: true,
            ..FilterCriteria::default()
        };
        assert!(!criteria.is_empty());
        criteria.clear();
        assert!(criteria.is_empty());
    }
}
