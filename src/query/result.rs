//! The uniform result envelope returned by every collection query.

use crate::backend::EntityRef;

/// Rows and/or a count, depending on the query intent.
///
/// "count only", "entities only", and "entities with count" stay
/// distinguishable: an empty page is `Some(vec![])`, never `None`.
/// Per-request and short-lived; owns no backend resources.
#[derive(Default)]
pub struct QueryResult {
    pub results: Option<Vec<EntityRef>>,
    pub count: Option<u64>,
}

impl QueryResult {
    pub fn entities(rows: Vec<EntityRef>) -> Self {
        QueryResult {
            results: Some(rows),
            count: None,
        }
    }

    pub fn count_only(count: u64) -> Self {
        QueryResult {
            results: None,
            count: Some(count),
        }
    }

    pub fn entities_with_count(rows: Vec<EntityRef>, count: u64) -> Self {
        QueryResult {
            results: Some(rows),
            count: Some(count),
        }
    }

    /// Adjust a raw backend count for the caller's top/skip window: rows
    /// before the window are subtracted (floored at zero), then the result
    /// is capped at the window size.
    pub fn adjust_count_for_paging(count: u64, top: Option<u64>, skip: Option<u64>) -> u64 {
        let remaining = count.saturating_sub(skip.unwrap_or(0));
        match top {
            Some(top) => remaining.min(top),
            None => remaining,
        }
    }
}

impl std::fmt::Debug for QueryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryResult")
            .field("results", &self.results.as_ref().map(Vec::len))
            .field("count", &self.count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(12, Some(5), Some(5), 5; "window in the middle")]
    #[test_case(12, None, Some(5), 7; "skip only")]
    #[test_case(12, Some(5), None, 5; "top only")]
    #[test_case(12, None, None, 12; "no window")]
    #[test_case(3, Some(5), Some(5), 0; "skip past the end")]
    #[test_case(7, Some(3), Some(6), 1; "truncated last page")]
    fn test_adjust_count_for_paging(count: u64, top: Option<u64>, skip: Option<u64>, expected: u64) {
        assert_eq!(QueryResult::adjust_count_for_paging(count, top, skip), expected);
    }

    #[test]
    fn test_envelope_shapes_stay_distinct() {
        assert!(QueryResult::entities(vec![]).results.is_some());
        assert!(QueryResult::entities(vec![]).count.is_none());
        assert!(QueryResult::count_only(0).results.is_none());
        assert_eq!(QueryResult::count_only(0).count, Some(0));
    }
}
