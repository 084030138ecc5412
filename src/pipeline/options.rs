//! Selector options for the region, language, currency and sort pickers.
//!
//! Language and currency options are derived from the loaded catalog, so the
//! pickers only ever offer values that can match something.

use std::collections::BTreeMap;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::domain::{Country, SortDirective, REGIONS};

/// One entry of a selector picker.
///
/// `value` is `None` for the leading "any" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: Option<String>,
    pub label: String,
}

impl SelectOption {
    fn any(label: &str) -> Self {
        Self { value: None, label: label.to_string() }
    }

    fn of(value: &str, label: &str) -> Self {
        Self { value: Some(value.to_string()), label: label.to_string() }
    }
}

#[must_use]
pub fn region_options() -> Vec<SelectOption> {
    std::iter::once(SelectOption::any("All regions"))
        .chain(REGIONS.iter().map(|r| SelectOption::of(r, r)))
        .collect()
}

#[must_use]
pub fn sort_options() -> Vec<SelectOption> {
    SortDirective::ALL
        .iter()
        .map(|d| match d {
            SortDirective::None => SelectOption::any(d.label()),
            _ => SelectOption::of(d.as_str(), d.label()),
        })
        .collect()
}

/// Distinct `(code, name)` language pairs in the catalog, sorted by name then
/// code, behind an "All languages" entry.
#[must_use]
pub fn language_options(all: &[Country]) -> Vec<SelectOption> {
    let pairs = all
        .iter()
        .flat_map(|c| c.languages.iter().map(|(code, name)| (code.as_str(), name.as_str())));
    collect_options("All languages", pairs)
}

/// Distinct `(code, name)` currency pairs in the catalog, sorted by name then
/// code, behind an "All currencies" entry.
#[must_use]
pub fn currency_options(all: &[Country]) -> Vec<SelectOption> {
    let pairs = all
        .iter()
        .flat_map(|c| c.currencies.iter().map(|(code, cur)| (code.as_str(), cur.name.as_str())));
    collect_options("All currencies", pairs)
}

fn collect_options<'a>(any_label: &str, pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Vec<SelectOption> {
    // First name seen wins for a code; names may differ between records.
    let mut by_code: BTreeMap<&str, &str> = BTreeMap::new();
    for (code, name) in pairs {
        by_code.entry(code).or_insert(name);
    }

    let mut entries: Vec<(&str, &str)> = by_code.into_iter().collect();
    entries.sort_by(|(code_a, name_a), (code_b, name_b)| name_a.cmp(name_b).then(code_a.cmp(code_b)));

    std::iter::once(SelectOption::any(any_label))
        .chain(entries.into_iter().map(|(code, name)| {
            let label = if name.is_empty() { code } else { name };
            SelectOption::of(code, label)
        }))
        .collect()
}

/// Indices of the options matching `query`, fuzzily, in their original
/// order. The "any" entry always stays first.
#[must_use]
pub fn filter_options(options: &[SelectOption], query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return (0..options.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| {
            option.value.as_deref().map_or(true, |code| {
                matcher.fuzzy_match(&option.label.to_lowercase(), &query).is_some()
                    || code.to_lowercase() == query
            })
        })
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Country> {
        serde_json::from_str(
            r#"[
                {"cca3":"BEL","name":{"common":"Belgium"},
                 "languages":{"deu":"German","fra":"French","nld":"Dutch"},
                 "currencies":{"EUR":{"name":"Euro","symbol":"€"}}},
                {"cca3":"FRA","name":{"common":"France"},
                 "languages":{"fra":"French"},
                 "currencies":{"EUR":{"name":"Euro","symbol":"€"}}},
                {"cca3":"CHE","name":{"common":"Switzerland"},
                 "languages":{"fra":"French","ita":"Italian"},
                 "currencies":{"CHF":{"name":"Swiss franc","symbol":"Fr."}}}
            ]"#,
        )
        .unwrap()
    }

    fn values(options: &[SelectOption]) -> Vec<Option<&str>> {
        options.iter().map(|o| o.value.as_deref()).collect()
    }

    #[test]
    fn test_language_options_are_distinct_and_sorted_by_name() {
        let options = language_options(&catalog());
        assert_eq!(
            values(&options),
            [None, Some("nld"), Some("fra"), Some("deu"), Some("ita")]
        );
        assert_eq!(options[0].label, "All languages");
        assert_eq!(options[1].label, "Dutch");
    }

    #[test]
    fn test_currency_options_use_currency_name() {
        let options = currency_options(&catalog());
        assert_eq!(values(&options), [None, Some("EUR"), Some("CHF")]);
        assert_eq!(options[2].label, "Swiss franc");
    }

    #[test]
    fn test_options_of_empty_catalog() {
        assert_eq!(language_options(&[]).len(), 1);
        assert_eq!(currency_options(&[]).len(), 1);
    }

    #[test]
    fn test_region_and_sort_options() {
        let regions = region_options();
        assert_eq!(regions.len(), 6);
        assert_eq!(regions[4].value.as_deref(), Some("Europe"));

        let sorts = sort_options();
        assert_eq!(sorts.len(), 5);
        assert!(sorts[0].value.is_none());
        assert_eq!(sorts[2].value.as_deref(), Some("population_desc"));
    }

    #[test]
    fn test_filter_options_keeps_any_on_top() {
        let options = language_options(&catalog());
        let hits = filter_options(&options, "fre");
        assert_eq!(hits, [0, 2]);

        let all = filter_options(&options, "  ");
        assert_eq!(all.len(), options.len());

        let none = filter_options(&options, "zzz");
        assert_eq!(none, [0]);
    }

    #[test]
    fn test_filter_options_matches_exact_code() {
        let options = currency_options(&catalog());
        assert_eq!(filter_options(&options, "chf"), [0, 2]);
    }
}
