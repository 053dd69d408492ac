//! Document filters for the storage shim.
//!
//! Filters are a conjunction of field equalities, plus a single
//! logical-OR combinator over equality clauses. That is the whole query
//! language the application needs: lookups by key, by owner, and the
//! station lookup by code-or-name.

use serde_json::Value;

/// One filter clause.
#[derive(Debug, Clone, PartialEq)]
enum Clause {
    /// `doc[field] == value`
    Eq(String, Value),

    /// Any of the `(field, value)` pairs matches.
    AnyOf(Vec<(String, Value)>),
}

/// A filter over stored documents.
///
/// # Examples
///
/// ```
/// use railbook_server::storage::Filter;
/// use serde_json::json;
///
/// let doc = json!({"code": "NDLS", "name": "New Delhi"});
///
/// assert!(Filter::all().matches(&doc));
/// assert!(Filter::eq("code", "NDLS").matches(&doc));
/// assert!(!Filter::eq("code", "BCT").matches(&doc));
///
/// // code-or-name lookup
/// let by_either = Filter::any_of([("code", "XXX"), ("name", "New Delhi")]);
/// assert!(by_either.matches(&doc));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    /// The filter that matches every document.
    pub fn all() -> Self {
        Filter::default()
    }

    /// A single field equality.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter {
            clauses: vec![Clause::Eq(field.into(), value.into())],
        }
    }

    /// Add a further equality; all clauses must hold.
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push(Clause::Eq(field.into(), value.into()));
        self
    }

    /// A disjunction of field equalities: the document matches when any
    /// pair does.
    pub fn any_of<F, V, I>(pairs: I) -> Self
    where
        F: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (F, V)>,
    {
        Filter {
            clauses: vec![Clause::AnyOf(
                pairs
                    .into_iter()
                    .map(|(f, v)| (f.into(), v.into()))
                    .collect(),
            )],
        }
    }

    /// Whether the document satisfies every clause.
    pub fn matches(&self, doc: &Value) -> bool {
        self.clauses.iter().all(|clause| match clause {
            Clause::Eq(field, value) => doc.get(field) == Some(value),
            Clause::AnyOf(pairs) => pairs
                .iter()
                .any(|(field, value)| doc.get(field) == Some(value)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_matches_everything() {
        assert!(Filter::all().matches(&json!({})));
        assert!(Filter::all().matches(&json!({"a": 1})));
    }

    #[test]
    fn eq_matches_exact_value() {
        let filter = Filter::eq("number", "12951");
        assert!(filter.matches(&json!({"number": "12951", "name": "Rajdhani"})));
        assert!(!filter.matches(&json!({"number": "12953"})));
        assert!(!filter.matches(&json!({})));
    }

    #[test]
    fn eq_distinguishes_types() {
        // "1" and 1 are different values; equality is not coerced.
        let filter = Filter::eq("n", 1);
        assert!(filter.matches(&json!({"n": 1})));
        assert!(!filter.matches(&json!({"n": "1"})));
    }

    #[test]
    fn conjunction_requires_all_clauses() {
        let filter = Filter::eq("username", "asha").and_eq("pnr", "0123456789");
        assert!(filter.matches(&json!({"username": "asha", "pnr": "0123456789"})));
        assert!(!filter.matches(&json!({"username": "asha", "pnr": "9999999999"})));
        assert!(!filter.matches(&json!({"username": "ravi", "pnr": "0123456789"})));
    }

    #[test]
    fn any_of_matches_either_field() {
        let filter = Filter::any_of([("code", "BCT"), ("name", "Mumbai Central")]);
        assert!(filter.matches(&json!({"code": "BCT", "name": "x"})));
        assert!(filter.matches(&json!({"code": "x", "name": "Mumbai Central"})));
        assert!(!filter.matches(&json!({"code": "x", "name": "y"})));
    }

    #[test]
    fn missing_field_never_matches_any_of() {
        let filter = Filter::any_of([("code", "BCT"), ("name", "Mumbai Central")]);
        assert!(!filter.matches(&json!({})));
    }
}
