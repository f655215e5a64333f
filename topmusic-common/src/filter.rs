//! Catalog query model
//!
//! A filter is a conjunction of per-field clauses. Each clause tests the
//! field's string-coerced view: text as stored, numbers rendered as text, and
//! a missing or null field as the empty string.

use crate::db::SongField;

/// Test applied to one field's string-coerced view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPredicate {
    /// The view must equal the raw value exactly
    Exact(String),
    /// Match-any pattern; holds for every record, whether the field is text,
    /// numeric or missing
    Wildcard,
}

impl FieldPredicate {
    /// Build the predicate for an optional raw query parameter
    ///
    /// An absent or empty parameter becomes the wildcard.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(raw) if !raw.is_empty() => FieldPredicate::Exact(raw.to_string()),
            _ => FieldPredicate::Wildcard,
        }
    }
}

/// One field test within a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldClause {
    pub field: SongField,
    pub predicate: FieldPredicate,
}

/// Conjunction of field clauses; an empty filter matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    clauses: Vec<FieldClause>,
}

impl SongFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause (builder style)
    pub fn with(mut self, field: SongField, predicate: FieldPredicate) -> Self {
        self.clauses.push(FieldClause { field, predicate });
        self
    }

    pub fn clauses(&self) -> &[FieldClause] {
        &self.clauses
    }
}

/// Filtered find: records matching `filter`, ascending by `sort_by`, at most
/// `limit` of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub filter: SongFilter,
    pub sort_by: SongField,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_param_is_exact() {
        assert_eq!(
            FieldPredicate::from_param(Some("pop")),
            FieldPredicate::Exact("pop".to_string())
        );
        // No trimming or coercion of the raw value
        assert_eq!(
            FieldPredicate::from_param(Some(" 70")),
            FieldPredicate::Exact(" 70".to_string())
        );
    }

    #[test]
    fn test_absent_or_empty_param_is_wildcard() {
        assert_eq!(FieldPredicate::from_param(None), FieldPredicate::Wildcard);
        assert_eq!(FieldPredicate::from_param(Some("")), FieldPredicate::Wildcard);
    }

    #[test]
    fn test_filter_builder_keeps_order() {
        let filter = SongFilter::new()
            .with(SongField::Genre, FieldPredicate::Wildcard)
            .with(SongField::Danceability, FieldPredicate::Exact("70".to_string()));

        let fields: Vec<_> = filter.clauses().iter().map(|c| c.field).collect();
        assert_eq!(fields, vec![SongField::Genre, SongField::Danceability]);
    }
}
