use std::collections::HashSet;

use zatlas::domain::{FilterCriteria, SortDirective};
use zatlas::pipeline::{derive, language_options};
use zatlas::store::{FavoritesPolicy, FavoritesStore};
use zatlas::Country;

fn catalog() -> Vec<Country> {
    serde_json::from_str(include_str!("fixtures/countries.json")).unwrap()
}

fn ids(countries: &[Country]) -> Vec<&str> {
    countries.iter().map(Country::id).collect()
}

fn none() -> HashSet<String> {
    HashSet::new()
}

#[test]
fn search_fra_includes_france() {
    let all = catalog();
    let criteria = FilterCriteria {
        search: "fra".to_string(),
        ..FilterCriteria::default()
    };
    let out = derive(&all, &criteria, &none());
    assert!(out.iter().any(|c| c.common_name() == "France"));
    assert!(out.iter().all(|c| c.common_name().to_lowercase().contains("fra")));
}

#[test]
fn europe_and_french_speakers() {
    let all = catalog();
    let criteria = FilterCriteria {
        region: Some("Europe".to_string()),
        language: Some("fra".to_string()),
        ..FilterCriteria::default()
    };
    assert_eq!(ids(&derive(&all, &criteria, &none())), vec!["FRA", "BEL", "CHE"]);
}

#[test]
fn europe_by_population_desc() {
    let all: Vec<Country> = catalog()
        .into_iter()
        .filter(|c| c.id() == "FRA" || c.id() == "DEU")
        .collect();
    let criteria = FilterCriteria {
        region: Some("Europe".to_string()),
        sort: SortDirective::PopulationDesc,
        ..FilterCriteria::default()
    };
    let out = derive(&all, &criteria, &none());
    let names: Vec<&str> = out.iter().map(Country::common_name).collect();
    assert_eq!(names, vec!["Germany", "France"]);
}

#[test]
fn population_asc_is_reverse_of_desc() {
    let all = catalog();
    let asc = FilterCriteria {
        sort: SortDirective::PopulationAsc,
        ..FilterCriteria::default()
    };
    let desc = FilterCriteria {
        sort: SortDirective::PopulationDesc,
        ..FilterCriteria::default()
    };
    let mut up = ids(&derive(&all, &asc, &none()))
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    let down = ids(&derive(&all, &desc, &none()))
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    up.reverse();
    assert_eq!(up, down);
    assert_eq!(down.first().map(String::as_str), Some("JPN"));
}

#[test]
fn area_sort_puts_missing_area_first() {
    let all = catalog();
    let criteria = FilterCriteria {
        sort: SortDirective::AreaAsc,
        ..FilterCriteria::default()
    };
    let out = derive(&all, &criteria, &none());
    assert_eq!(out[0].id(), "ATA");
    assert_eq!(out.last().map(Country::id), Some("CAN"));
}

#[test]
fn output_is_always_a_subset() {
    let all = catalog();
    let known: HashSet<&str> = ids(&all).into_iter().collect();
    let favorites: HashSet<String> = ["JPN", "XXX"].iter().map(|s| (*s).to_string()).collect();

    for region in [None, Some("Europe"), Some("Antarctic"), Some("Nowhere")] {
        for sort in SortDirective::ALL {
            for favorites_only in [false, true] {
                let criteria = FilterCriteria {
                    search: "a".to_string(),
                    region: region.map(String::from),
                    sort,
                    favorites_only,
                    ..FilterCriteria::default()
                };
                let out = derive(&all, &criteria, &favorites);
                let seen: HashSet<&str> = ids(&out).into_iter().collect();
                assert_eq!(seen.len(), out.len(), "duplicated ids for {criteria:?}");
                assert!(seen.is_subset(&known), "invented ids for {criteria:?}");
            }
        }
    }
}

#[test]
fn favorites_only_with_empty_store_is_empty() {
    let all = catalog();
    let store = FavoritesStore::new(FavoritesPolicy::Open, false);
    let criteria = FilterCriteria {
        favorites_only: true,
        ..FilterCriteria::default()
    };
    assert!(derive(&all, &criteria, &store).is_empty());
}

#[test]
fn favorites_only_uses_the_store() {
    let all = catalog();
    let mut store = FavoritesStore::new(FavoritesPolicy::Open, false);
    store.toggle("SEN");
    store.toggle("CAN");
    let criteria = FilterCriteria {
        favorites_only: true,
        language: Some("fra".to_string()),
        ..FilterCriteria::default()
    };
    assert_eq!(ids(&derive(&all, &criteria, &store)), vec!["CAN", "SEN"]);
}

#[test]
fn language_options_cover_the_catalog() {
    let options = language_options(&catalog());
    assert_eq!(options[0].value, None);
    let codes: Vec<&str> = options.iter().filter_map(|o| o.value.as_deref()).collect();
    for code in ["fra", "deu", "jpn", "eng", "fij"] {
        assert!(codes.contains(&code), "missing {code}");
    }
    let unique: HashSet<&&str> = codes.iter().collect();
    assert_eq!(unique.len(), codes.len());
}
