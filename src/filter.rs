//! Feature filters in the renderer's array syntax.

use std::collections::HashSet;
use serde::{Serialize, Serializer};
use serde_json::{json, Value as Json};
use crate::value::Row;

/// Most features a selection may highlight at once.
pub const MAX_SELECTION_COUNT: usize = 1000;

/// A predicate over a feature property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `["in", property, v₁, v₂, …]`
    In { property: String, values: Vec<String> },
    /// `["==", property, value]`
    Eq { property: String, value: String },
    /// `["any", f₁, f₂, …]`
    Any(Vec<Filter>),
}

impl Filter {
    /// The filter matching no feature: `["==", property, ""]`.
    pub fn none(property: &str) -> Self {
        Filter::Eq { property: property.to_string(), value: String::new() }
    }

    /// The legacy JSON array form consumed by the renderer.
    pub fn to_json(&self) -> Json {
        match self {
            Filter::In { property, values } => {
                let mut a = vec![json!("in"), json!(property)];
                a.extend(values.iter().map(|v| json!(v)));
                Json::Array(a)
            }
            Filter::Eq { property, value } => json!(["==", property, value]),
            Filter::Any(filters) => {
                let mut a = vec![json!("any")];
                a.extend(filters.iter().map(Filter::to_json));
                Json::Array(a)
            }
        }
    }

    /// Whether a feature with the given properties passes the filter.
    /// Properties are compared by their key string; the empty string
    /// never matches.
    pub fn matches(&self, feature: &Row) -> bool {
        match self {
            Filter::In { property, values } => key_of(feature, property)
                .is_some_and(|k| values.iter().any(|v| *v == k)),
            Filter::Eq { property, value } => key_of(feature, property)
                .is_some_and(|k| k == *value),
            Filter::Any(filters) => filters.iter().any(|f| f.matches(feature)),
        }
    }
}

fn key_of(feature: &Row, property: &str) -> Option<String> {
    feature.get(property)?.key().filter(|k| !k.is_empty())
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(s)
    }
}

/// Filter highlighting the features whose `property` is one of `keys`:
/// `["any", ["==", property, k₁], …]`, or [`Filter::none`] when `keys`
/// is empty.
///
/// # Example
///
/// ```
/// use choropleth_stops::highlight_filter;
/// let f = highlight_filter("iso", &["BE", "NL"]);
/// assert_eq!(f.to_json().to_string(),
///            r#"["any",["==","iso","BE"],["==","iso","NL"]]"#);
/// ```
pub fn highlight_filter<K: AsRef<str>>(property: &str, keys: &[K]) -> Filter {
    if keys.is_empty() {
        return Filter::none(property);
    }
    Filter::Any(keys.iter().map(|k| hover_filter(property, k.as_ref()))
                .collect())
}

/// Filter matching the single feature `key`.
pub fn hover_filter(property: &str, key: &str) -> Filter {
    Filter::Eq { property: property.to_string(), value: key.to_string() }
}

/// Drop repeated keys (a feature can appear several times in a
/// rendered-feature query) and keep at most `cap` of them, in order.
pub fn dedup_selection<I>(keys: I, cap: usize) -> Vec<String>
where I: IntoIterator, I::Item: Into<String> {
    let mut seen = HashSet::new();
    keys.into_iter()
        .map(Into::into)
        .filter(|k| seen.insert(k.clone()))
        .take(cap)
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn feature(iso: &str) -> Row { Row::new().with("iso", iso) }

    #[test]
    fn empty_selection_matches_nothing() {
        let f = highlight_filter::<&str>("iso", &[]);
        assert_eq!(f, Filter::none("iso"));
        assert_eq!(f.to_json(), json!(["==", "iso", ""]));
        assert!(!f.matches(&feature("BE")));
        assert!(!f.matches(&feature("")));
        assert!(!f.matches(&Row::new()));
    }

    #[test]
    fn highlight_matches_selected() {
        let f = highlight_filter("iso", &["BE".to_string(), "NL".to_string()]);
        assert!(f.matches(&feature("NL")));
        assert!(!f.matches(&feature("FR")));
    }

    #[test]
    fn in_filter_json() {
        let f = Filter::In { property: "iso".into(),
                             values: vec!["A".into(), "B".into()] };
        assert_eq!(serde_json::to_string(&f).unwrap(), r#"["in","iso","A","B"]"#);
        assert!(f.matches(&feature("B")));
        let empty = Filter::In { property: "iso".into(), values: vec![] };
        assert!(!empty.matches(&feature("B")));
    }

    #[test]
    fn numeric_properties_compare_by_key() {
        let f = hover_filter("id", "42");
        assert!(f.matches(&Row::new().with("id", 42)));
    }

    #[test]
    fn selection_dedup_and_cap() {
        let keys = ["a", "b", "a", "c", "b", "d"];
        assert_eq!(dedup_selection(keys, 10), ["a", "b", "c", "d"]);
        assert_eq!(dedup_selection(keys, 2), ["a", "b"]);
        assert!(dedup_selection(Vec::<String>::new(), 2).is_empty());
    }
}
