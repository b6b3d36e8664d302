//! Classification of storage errors raised by inserts.
//!
//! PostgreSQL reports uniqueness violations as text
//! (`duplicate key value violates unique constraint "..."`). This module is
//! the only place that inspects that text or interprets constraint names.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::DuplicateKind;

static DUPLICATE_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"duplicate key value(?: violates unique constraint "(?P<constraint>[^"]+)")?"#)
        .unwrap()
});

const SHORT_CODE_KEY_SUFFIX: &str = "_short_code_key";
const LONG_URL_KEY_SUFFIX: &str = "_long_url_key";

/// Outcome of classifying a failed insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertFault {
    /// A uniqueness constraint rejected the row.
    Duplicate {
        kind: DuplicateKind,
        constraint: Option<String>,
    },
    /// Connectivity, malformed statement, any other constraint, etc.
    Other,
}

/// Maps a constraint name such as `url_mappings_long_url_key` to the column it guards.
pub fn duplicate_kind(constraint: Option<&str>) -> DuplicateKind {
    match constraint {
        Some(name) if name.ends_with(SHORT_CODE_KEY_SUFFIX) => DuplicateKind::ShortCode,
        Some(name) if name.ends_with(LONG_URL_KEY_SUFFIX) => DuplicateKind::LongUrl,
        _ => DuplicateKind::Unknown,
    }
}

/// Classifies an error message by its duplicate-key signature.
pub fn classify_message(message: &str) -> InsertFault {
    match DUPLICATE_KEY_REGEX.captures(message) {
        Some(captures) => {
            let constraint = captures
                .name("constraint")
                .map(|m| m.as_str().to_string());

            InsertFault::Duplicate {
                kind: duplicate_kind(constraint.as_deref()),
                constraint,
            }
        }
        None => InsertFault::Other,
    }
}

/// Classifies an error returned by an `INSERT`.
pub fn classify(e: &sqlx::Error) -> InsertFault {
    classify_message(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_short_code() {
        let fault = classify_message(
            r#"error returned from database: duplicate key value violates unique constraint "url_mappings_short_code_key""#,
        );

        assert_eq!(
            fault,
            InsertFault::Duplicate {
                kind: DuplicateKind::ShortCode,
                constraint: Some("url_mappings_short_code_key".to_string())
            }
        );
    }

    #[test]
    fn test_duplicate_long_url() {
        let fault = classify_message(
            r#"duplicate key value violates unique constraint "links_long_url_key""#,
        );

        assert_eq!(
            fault,
            InsertFault::Duplicate {
                kind: DuplicateKind::LongUrl,
                constraint: Some("links_long_url_key".to_string())
            }
        );
    }

    #[test]
    fn test_duplicate_without_constraint() {
        let fault = classify_message("pq: duplicate key value");
        assert_eq!(
            fault,
            InsertFault::Duplicate {
                kind: DuplicateKind::Unknown,
                constraint: None
            }
        );
    }

    #[test]
    fn test_duplicate_kind_from_names() {
        assert_eq!(
            duplicate_kind(Some("Url Mappings_short_code_key")),
            DuplicateKind::ShortCode
        );
        assert_eq!(duplicate_kind(Some("links_pkey")), DuplicateKind::Unknown);
        assert_eq!(duplicate_kind(None), DuplicateKind::Unknown);
    }

    #[test]
    fn test_other_errors() {
        assert_eq!(
            classify_message("error returned from database: relation \"x\" does not exist"),
            InsertFault::Other
        );
        assert_eq!(
            classify_message(
                "error returned from database: null value in column \"long_url\" violates not-null constraint"
            ),
            InsertFault::Other
        );
        assert_eq!(
            classify_message("pool timed out while waiting for an open connection"),
            InsertFault::Other
        );
        assert_eq!(classify_message(""), InsertFault::Other);
    }

    #[test]
    fn test_classify_sqlx_pool_error() {
        assert_eq!(classify(&sqlx::Error::PoolTimedOut), InsertFault::Other);
        assert_eq!(classify(&sqlx::Error::RowNotFound), InsertFault::Other);
    }
}
