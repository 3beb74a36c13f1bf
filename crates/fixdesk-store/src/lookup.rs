// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status lookup over a record snapshot.
//!
//! The store is not indexed, so lookup is a full linear scan of the current
//! snapshot. A miss is a normal user-facing outcome, not an error.

use fixdesk_core::types::ComplaintRecord;

/// Finds the first record whose id matches `query`, comparing trimmed,
/// uppercased id strings. No side effects.
pub fn find_by_id<'a>(records: &'a [ComplaintRecord], query: &str) -> Option<&'a ComplaintRecord> {
    let normalized = query.trim().to_ascii_uppercase();
    records
        .iter()
        .find(|r| r.id.as_str().trim().to_ascii_uppercase() == normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixdesk_test_utils::record_fixture;

    #[test]
    fn lookup_is_case_insensitive() {
        let records = vec![record_fixture(7), record_fixture(8)];
        let lower = find_by_id(&records, "a0007").unwrap();
        let upper = find_by_id(&records, "A0007").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.id.as_str(), "A0007");
    }

    #[test]
    fn lookup_trims_input() {
        let records = vec![record_fixture(7)];
        assert!(find_by_id(&records, "  A0007  ").is_some());
    }

    #[test]
    fn miss_returns_none() {
        let records = vec![record_fixture(7)];
        assert!(find_by_id(&records, "A9999").is_none());
        assert!(find_by_id(&[], "A0007").is_none());
    }

    #[test]
    fn first_match_wins() {
        let mut duplicate = record_fixture(7);
        duplicate.location = "Duplicate row".into();
        let records = vec![record_fixture(7), duplicate];
        assert_eq!(find_by_id(&records, "A0007").unwrap().location, "Room 7");
    }
}
