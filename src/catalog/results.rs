//! Client-side post-processing of catalog result lists.
//!
//! Records are untyped JSON objects straight from the catalog provider; these
//! helpers only reorder or drop elements and never touch a record's shape.

use std::cmp::Ordering;

use serde_json::Value;

use super::query::SortKey;

/// Mutable access to the `results` array of a paged catalog response.
pub fn results_mut(page: &mut Value) -> Option<&mut Vec<Value>> {
    page.get_mut("results").and_then(Value::as_array_mut)
}

fn title_key(record: &Value) -> String {
    record
        .get("title")
        .and_then(Value::as_str)
        .or_else(|| record.get("name").and_then(Value::as_str))
        .unwrap_or("")
        .to_lowercase()
}

fn number(record: &Value, field: &str) -> f64 {
    record.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

fn rating(record: &Value) -> f64 {
    number(record, "vote_average")
}

fn date_key(record: &Value) -> &str {
    record
        .get("release_date")
        .and_then(Value::as_str)
        .or_else(|| record.get("first_air_date").and_then(Value::as_str))
        .unwrap_or("")
}

/// Stable sort of `results` by `key`; `Relevance` keeps upstream order.
pub fn sort_results(results: &mut [Value], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::TitleAsc => results.sort_by_cached_key(title_key),
        SortKey::TitleDesc => results.sort_by(|a, b| title_key(b).cmp(&title_key(a))),
        SortKey::RatingAsc => results.sort_by(|a, b| cmp_f64(rating(a), rating(b))),
        SortKey::RatingDesc => results.sort_by(|a, b| cmp_f64(rating(b), rating(a))),
        SortKey::DateAsc => results.sort_by(|a, b| date_key(a).cmp(date_key(b))),
        SortKey::DateDesc => results.sort_by(|a, b| date_key(b).cmp(date_key(a))),
        SortKey::PopularityDesc => results.sort_by(|a, b| {
            cmp_f64(number(b, "popularity"), number(a, "popularity"))
        }),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Drop records rated below `min_rating`. Unset or zero is a no-op.
pub fn filter_by_rating(results: &mut Vec<Value>, min_rating: Option<f64>) {
    let Some(min) = min_rating.filter(|m| *m > 0.0) else {
        return;
    };
    results.retain(|record| rating(record) >= min);
}

/// Keep records whose `genre_ids` contain `genre_id`. Unset is a no-op.
pub fn filter_by_genre(results: &mut Vec<Value>, genre_id: Option<u64>) {
    let Some(genre_id) = genre_id else {
        return;
    };
    results.retain(|record| {
        record
            .get("genre_ids")
            .and_then(Value::as_array)
            .is_some_and(|ids| ids.iter().any(|id| id.as_u64() == Some(genre_id)))
    });
}

/// Keep records whose `first_air_date` starts with `year`.
pub fn filter_by_first_air_year(results: &mut Vec<Value>, year: u16) {
    let prefix = year.to_string();
    results.retain(|record| {
        record
            .get("first_air_date")
            .and_then(Value::as_str)
            .is_some_and(|date| date.starts_with(&prefix))
    });
}
