//! Filter expression builder for the memo list endpoint.
//!
//! Search criteria become a list of typed [`Predicate`]s which render to the
//! service's CEL-like filter syntax. String literals are escaped in one place
//! so user input cannot break out of a quoted literal.

use std::fmt;

use super::error::MemosResult;
use super::models::SearchRequest;
use super::visibility::Visibility;

/// A single filter clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    CreatorId(i64),
    ContentContains(String),
    HasTag(String),
    Visibility(Visibility),
    Pinned(bool),
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::CreatorId(id) => write!(f, "creator_id == {id}"),
            Predicate::ContentContains(text) => {
                write!(f, "content.contains(\"{}\")", escape_literal(text))
            }
            Predicate::HasTag(tag) => write!(f, "tag in [\"{}\"]", escape_literal(tag)),
            Predicate::Visibility(v) => write!(f, "visibility == \"{v}\""),
            Predicate::Pinned(pinned) => write!(f, "pinned == {pinned}"),
        }
    }
}

/// Conjunction of predicates, rendered with `&&`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoFilter {
    predicates: Vec<Predicate>,
}

impl MemoFilter {
    /// Build the filter for a search request.
    ///
    /// Clause order is fixed: creator, content, tag, visibility, pinned.
    /// Empty strings count as absent. Fails only when visibility does not
    /// normalize.
    pub fn from_request(req: &SearchRequest) -> MemosResult<Self> {
        let mut predicates = Vec::with_capacity(5);

        if let Some(id) = req.creator_id {
            predicates.push(Predicate::CreatorId(id));
        }
        if let Some(query) = non_empty(&req.query) {
            predicates.push(Predicate::ContentContains(query.to_string()));
        }
        if let Some(tag) = non_empty(&req.tag) {
            predicates.push(Predicate::HasTag(tag.to_string()));
        }
        if let Some(visibility) = non_empty(&req.visibility) {
            predicates.push(Predicate::Visibility(Visibility::normalize(visibility)?));
        }
        if let Some(pinned) = req.pinned {
            predicates.push(Predicate::Pinned(pinned));
        }

        Ok(Self { predicates })
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Display for MemoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{predicate}")?;
        }
        Ok(())
    }
}

/// Render the filter string for a request; empty when no criteria are set.
pub fn build_memo_filter(req: &SearchRequest) -> MemosResult<String> {
    MemoFilter::from_request(req).map(|filter| filter.to_string())
}

/// Escape `\` and `"` for embedding in a double-quoted literal.
pub fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memos::MemosError;

    #[test]
    fn test_empty_request_yields_empty_filter() {
        let filter = build_memo_filter(&SearchRequest::default()).unwrap();
        assert_eq!(filter, "");
    }

    #[test]
    fn test_all_fields_in_fixed_order() {
        let req = SearchRequest {
            query: Some("hello \"world\"".to_string()),
            creator_id: Some(7),
            tag: Some("tag\"one".to_string()),
            visibility: Some("public".to_string()),
            pinned: Some(true),
            ..Default::default()
        };

        let filter = build_memo_filter(&req).unwrap();
        assert_eq!(
            filter,
            r#"creator_id == 7 && content.contains("hello \"world\"") && tag in ["tag\"one"] && visibility == "PUBLIC" && pinned == true"#
        );
    }

    #[test]
    fn test_query_escaping() {
        let req = SearchRequest {
            query: Some(r#"hello "world""#.to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_memo_filter(&req).unwrap(),
            r#"content.contains("hello \"world\"")"#
        );
    }

    #[test]
    fn test_backslash_escaped_before_quote() {
        assert_eq!(escape_literal(r#"a\"b"#), r#"a\\\"b"#);
        assert_eq!(escape_literal(r"C:\notes"), r"C:\\notes");
    }

    #[test]
    fn test_absent_fields_omitted() {
        let req = SearchRequest {
            tag: Some("work".to_string()),
            pinned: Some(false),
            ..Default::default()
        };
        assert_eq!(
            build_memo_filter(&req).unwrap(),
            r#"tag in ["work"] && pinned == false"#
        );
    }

    #[test]
    fn test_empty_strings_treated_as_absent() {
        let req = SearchRequest {
            query: Some(String::new()),
            tag: Some(String::new()),
            visibility: Some(String::new()),
            ..Default::default()
        };
        assert!(MemoFilter::from_request(&req).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_visibility_aborts() {
        let req = SearchRequest {
            query: Some("x".to_string()),
            visibility: Some("archived".to_string()),
            ..Default::default()
        };
        let err = build_memo_filter(&req).unwrap_err();
        assert!(matches!(err, MemosError::InvalidVisibility { ref value } if value == "archived"));
    }

    #[test]
    fn test_predicates_are_typed() {
        let req = SearchRequest {
            creator_id: Some(3),
            visibility: Some(" Protected ".to_string()),
            ..Default::default()
        };
        let filter = MemoFilter::from_request(&req).unwrap();
        assert_eq!(
            filter.predicates(),
            &[
                Predicate::CreatorId(3),
                Predicate::Visibility(Visibility::Protected)
            ]
        );
    }
}
