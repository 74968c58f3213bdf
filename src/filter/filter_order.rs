use std::cmp::Ordering;

use bson::Document;
use serde_json::Value;

use super::types::{FilterOrderInfo, JsonDocument, SortDirection, SortMode};

pub struct FilterOrder;

impl FilterOrder {
    pub fn from_mode(column: &str, mode: SortMode) -> Option<FilterOrderInfo> {
        mode.direction().map(|sort| FilterOrderInfo { column: column.to_string(), sort })
    }

    pub fn generate(info: &FilterOrderInfo) -> Document {
        let mut sort = Document::new();
        sort.insert(info.column.clone(), info.sort.to_mongo());
        sort
    }

    /// Compare two documents the way the server orders them: missing and null
    /// values first, then numbers, then strings by code point.
    pub fn compare(info: &FilterOrderInfo, a: &JsonDocument, b: &JsonDocument) -> Ordering {
        let ordering = compare_values(a.get(&info.column), b.get(&info.column));
        match info.sort {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde_json::json;

    fn named(name: Value) -> JsonDocument {
        json!({ "name": name }).as_object().cloned().unwrap()
    }

    #[test]
    fn default_mode_has_no_order() {
        assert_eq!(FilterOrder::from_mode("name", SortMode::Default), None);
    }

    #[test]
    fn generates_mongo_sort_document() {
        let asc = FilterOrder::from_mode("name", SortMode::Ascending).unwrap();
        let desc = FilterOrder::from_mode("name", SortMode::Descending).unwrap();

        assert_eq!(FilterOrder::generate(&asc), doc! { "name": 1 });
        assert_eq!(FilterOrder::generate(&desc), doc! { "name": -1 });
    }

    #[test]
    fn compares_by_column() {
        let asc = FilterOrder::from_mode("name", SortMode::Ascending).unwrap();
        let desc = FilterOrder::from_mode("name", SortMode::Descending).unwrap();
        let (a, b) = (named(json!("Apple Truck")), named(json!("Bear Plush")));

        assert_eq!(FilterOrder::compare(&asc, &a, &b), Ordering::Less);
        assert_eq!(FilterOrder::compare(&desc, &a, &b), Ordering::Greater);
    }

    #[test]
    fn missing_values_sort_first() {
        let asc = FilterOrder::from_mode("name", SortMode::Ascending).unwrap();
        let missing = JsonDocument::new();

        assert_eq!(FilterOrder::compare(&asc, &missing, &named(json!("A"))), Ordering::Less);
        assert_eq!(FilterOrder::compare(&asc, &named(json!(3)), &named(json!("A"))), Ordering::Less);
    }
}
