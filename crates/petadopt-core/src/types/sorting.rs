//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One sort key: a field and its direction.
///
/// Generic over the field type so each resource can restrict sorting to
/// its own whitelist of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField<F> {
    /// Field to sort by.
    pub field: F,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl<F> SortField<F> {
    /// Create a new sort field.
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: F) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: F) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Parse an `ordering` parameter such as `"-age,name"`.
///
/// Terms are comma separated; a leading `-` means descending. Terms that
/// `parse_field` rejects are skipped, as are repeats of a field already
/// present.
pub fn parse_ordering<F, P>(raw: &str, parse_field: P) -> Vec<SortField<F>>
where
    F: PartialEq,
    P: Fn(&str) -> Option<F>,
{
    let mut fields: Vec<SortField<F>> = Vec::new();
    for term in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (direction, name) = match term.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, term),
        };
        let Some(field) = parse_field(name) else {
            continue;
        };
        if fields.iter().any(|f| f.field == field) {
            continue;
        }
        fields.push(SortField::new(field, direction));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> Option<&'static str> {
        match name {
            "name" => Some("name"),
            "age" => Some("age"),
            _ => None,
        }
    }

    #[test]
    fn test_parse_mixed_directions() {
        let fields = parse_ordering("-age, name", column);
        assert_eq!(
            fields,
            vec![SortField::desc("age"), SortField::asc("name")]
        );
    }

    #[test]
    fn test_unknown_and_duplicate_terms_skipped() {
        let fields = parse_ordering("owner,age,-age,,", column);
        assert_eq!(fields, vec![SortField::asc("age")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_ordering("", column).is_empty());
    }
}
