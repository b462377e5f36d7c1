//! Reconciles an edited table against the table it was exported from.

use std::collections::HashSet;

use crate::types::{ChangeRecord, MergeResult, StringTable};

/// Compares every edited key with the original and classifies it.
///
/// A key is applied when the original has text for it and the edited text
/// differs. Keys missing from the original are left out of the result, so a
/// merge never introduces new entries.
pub fn merge(original: &StringTable, edited: &StringTable) -> MergeResult {
    merge_entries(original.iter(), edited)
}

/// Like [`merge`], over original entries that may repeat a key, such as the
/// elements of one document in order. Every entry is classified on its own,
/// so a repeated key yields one record per entry.
///
/// Records come out sorted by key; entries sharing a key keep their order.
pub fn merge_entries<'a, I>(original: I, edited: &StringTable) -> MergeResult
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut result = MergeResult::default();
    let mut seen = HashSet::new();

    for (key, old_value) in original {
        seen.insert(key);
        let Some(new_value) = edited.get(key) else {
            continue;
        };

        let record = ChangeRecord {
            key: key.to_string(),
            old_value: old_value.map(str::to_string),
            new_value: new_value.map(str::to_string),
        };

        if record.is_applicable() {
            tracing::debug!(key = %key, "value changed");
            result.applied.push(record);
        } else {
            result.skipped.push(record);
        }
    }

    for key in edited.keys().filter(|key| !seen.contains(*key)) {
        tracing::debug!(key = %key, "key not present in original, ignoring");
    }

    result.applied.sort_by(|a, b| a.key.cmp(&b.key));
    result.skipped.sort_by(|a, b| a.key.cmp(&b.key));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, Option<&str>)]) -> StringTable {
        entries
            .iter()
            .map(|(key, value)| (*key, value.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_changed_value_is_applied() {
        let original = table(&[("greeting", Some("Hello")), ("farewell", None)]);
        let edited = table(&[("greeting", Some("Good day"))]);

        let result = merge(&original, &edited);

        assert_eq!(result.applied_count(), 1);
        assert_eq!(result.skipped_count(), 0);
        assert_eq!(
            result.applied[0],
            ChangeRecord {
                key: "greeting".to_string(),
                old_value: Some("Hello".to_string()),
                new_value: Some("Good day".to_string()),
            }
        );
    }

    #[test]
    fn test_equal_and_absent_values_are_skipped() {
        let original = table(&[("same", Some("x")), ("absent", None), ("empty", Some(""))]);
        let edited = table(&[
            ("same", Some("x")),
            ("absent", Some("filled")),
            ("empty", Some("now set")),
        ]);

        let result = merge(&original, &edited);

        let applied: Vec<_> = result.applied.iter().map(|r| r.key.as_str()).collect();
        let skipped: Vec<_> = result.skipped.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(applied, vec!["empty"]);
        assert_eq!(skipped, vec!["absent", "same"]);
        assert_eq!(result.total_checked(), 3);
    }

    #[test]
    fn test_missing_new_value_is_skipped() {
        let original = table(&[("k", Some("v"))]);
        let edited = table(&[("k", None)]);

        let result = merge(&original, &edited);

        assert!(result.is_unchanged());
        assert_eq!(result.skipped_count(), 1);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let original = table(&[("known", Some("a"))]);
        let edited = table(&[("known", Some("b")), ("new_key", Some("c"))]);

        let result = merge(&original, &edited);

        assert_eq!(result.total_checked(), 1);
        assert!(
            result
                .applied
                .iter()
                .chain(result.skipped.iter())
                .all(|r| r.key != "new_key")
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let original = table(&[("a", Some("1")), ("b", Some("2"))]);
        let edited = table(&[("a", Some("one")), ("b", Some("2"))]);

        let first = merge(&original, &edited);
        assert_eq!(first.applied_count(), 1);

        // Original after applying the first pass
        let updated = table(&[("a", Some("one")), ("b", Some("2"))]);
        let second = merge(&updated, &edited);
        assert_eq!(second.applied_count(), 0);
        assert_eq!(second.skipped_count(), 2);
    }

    #[test]
    fn test_repeated_original_key_classified_per_entry() {
        let original = [("a", Some("1")), ("b", Some("x")), ("a", Some("2"))];
        let edited = table(&[("a", Some("2"))]);

        let result = merge_entries(original, &edited);

        assert_eq!(result.applied_count(), 1);
        assert_eq!(result.applied[0].old_value.as_deref(), Some("1"));
        assert_eq!(result.skipped_count(), 1);
        assert_eq!(result.skipped[0].old_value.as_deref(), Some("2"));
        assert_eq!(result.total_checked(), 2);
    }
}
