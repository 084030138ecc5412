//! The filter/sort pipeline.
//!
//! [`derive`] turns the full catalog plus the current [`FilterCriteria`] into
//! the ordered list the list and favorites views display. It is a pure
//! function and is simply re-run whenever an input changes; at a few hundred
//! records there is nothing to gain from incremental updates.
//!
//! Stages run in a fixed order, each narrowing or reordering the output of
//! the previous one:
//!
//! 1. search (case-insensitive substring on the common name)
//! 2. region (exact match)
//! 3. language (key present in the language mapping)
//! 4. currency (key present in the currency mapping)
//! 5. favorites only
//! 6. sort (stable; a missing area compares as zero)
//!
//! [`options`] builds the selector lists the pickers offer.

pub mod options;

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::domain::{Country, FilterCriteria, SortDirective};

pub use options::{currency_options, filter_options, language_options, region_options, sort_options, SelectOption};

/// Membership test used by the favorites-only stage.
///
/// Implemented by the favorites store and by plain id sets so the pipeline
/// can be exercised without one.
pub trait FavoriteSet {
    fn is_favorite(&self, id: &str) -> bool;
}

impl FavoriteSet for HashSet<String> {
    fn is_favorite(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl FavoriteSet for BTreeSet<String> {
    fn is_favorite(&self, id: &str) -> bool {
        self.contains(id)
    }
}

/// Derives the visible countries from the catalog.
///
/// Never mutates `all`; the result holds clones in display order. An empty
/// catalog (e.g. before the initial load completes) yields an empty result.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use zatlas::domain::{FilterCriteria, SortDirective};
/// use zatlas::pipeline::derive;
/// use zatlas::Country;
///
/// let all: Vec<Country> = serde_json::from_str(r#"[
///     {"cca3":"FRA","name":{"common":"France"},"region":"Europe","population":67000000,"languages":{"fra":"French"}},
///     {"cca3":"DEU","name":{"common":"Germany"},"region":"Europe","population":83000000,"languages":{"deu":"German"}}
/// ]"#).unwrap();
///
/// let criteria = FilterCriteria {
///     region: Some("Europe".to_string()),
///     sort: SortDirective::PopulationDesc,
///     ..FilterCriteria::default()
/// };
/// let visible = derive(&all, &criteria, &HashSet::new());
/// let names: Vec<_> = visible.iter().map(|c| c.common_name()).collect();
/// assert_eq!(names, ["Germany", "France"]);
/// ```
#[must_use]
pub fn derive<F: FavoriteSet + ?Sized>(
    all: &[Country],
    criteria: &FilterCriteria,
    favorites: &F,
) -> Vec<Country> {
    let _span = tracing::debug_span!("derive",
        total = all.len(),
        query_len = criteria.search.len(),
        region = ?criteria.region,
        language = ?criteria.language,
        currency = ?criteria.currency,
        favorites_only = criteria.favorites_only,
        sort = criteria.sort.as_str()
    )
    .entered();

    let needle = criteria.search.to_lowercase();

    let mut visible: Vec<Country> = all
        .iter()
        .filter(|c| needle.is_empty() || c.name_contains(&needle))
        .filter(|c| criteria.region.as_deref().map_or(true, |r| c.region == r))
        .filter(|c| criteria.language.as_deref().map_or(true, |l| c.speaks(l)))
        .filter(|c| criteria.currency.as_deref().map_or(true, |cur| c.uses_currency(cur)))
        .filter(|c| !criteria.favorites_only || favorites.is_favorite(c.id()))
        .cloned()
        .collect();

    sort_countries(&mut visible, criteria.sort);

    tracing::debug!(visible = visible.len(), "pipeline derived");
    visible
}

/// Stable in-place sort by the given directive. [`SortDirective::None`]
/// leaves the order untouched.
pub fn sort_countries(countries: &mut [Country], sort: SortDirective) {
    let cmp: fn(&Country, &Country) -> Ordering = match sort {
        SortDirective::None => return,
        SortDirective::PopulationAsc => |a, b| a.population.cmp(&b.population),
        SortDirective::PopulationDesc => |a, b| b.population.cmp(&a.population),
        SortDirective::AreaAsc => |a, b| a.area_or_zero().total_cmp(&b.area_or_zero()),
        SortDirective::AreaDesc => |a, b| b.area_or_zero().total_cmp(&a.area_or_zero()),
    };
    countries.sort_by(cmp);
}

/// Byte ranges of `needle` inside `name`, case-insensitively, for
/// highlighting search hits. Empty when there is no hit or the lowercase
/// form changes byte offsets.
#[must_use]
pub fn match_ranges(name: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return vec![];
    }
    let haystack = name.to_lowercase();
    if haystack.len() != name.len() {
        return vec![];
    }
    haystack
        .match_indices(&needle)
        .map(|(start, hit)| (start, start + hit.len()))
        .collect()
}
