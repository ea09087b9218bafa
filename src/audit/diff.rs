//! Field-level change lines for update entries

use serde_json::Value;

/// Bookkeeping fields that change on every update
const IGNORED_FIELDS: &[&str] = &["created_at", "updated_at"];

/// Longest string value shown in full
const MAX_SHOWN_CHARS: usize = 50;

/// `field: old -> new` for every top-level field that differs
///
/// Fields are reported in the order of `before`, then fields only present in
/// `after`. Non-object values are compared as a whole.
pub(super) fn field_changes(before: &Value, after: &Value) -> Vec<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return if before == after {
            Vec::new()
        } else {
            vec![format!("{} -> {}", show(before), show(after))]
        };
    };

    let relevant = |key: &str| !IGNORED_FIELDS.contains(&key);

    let changed = before_obj
        .iter()
        .filter(|(k, _)| relevant(k.as_str()))
        .filter_map(|(key, old)| match after_obj.get(key) {
            Some(new) if new == old => None,
            Some(new) => Some(format!("{}: {} -> {}", key, show(old), show(new))),
            None => Some(format!("{}: {} -> (removed)", key, show(old))),
        });

    let added = after_obj
        .iter()
        .filter(|(k, _)| relevant(k.as_str()) && !before_obj.contains_key(k.as_str()))
        .map(|(key, new)| format!("{}: (added) -> {}", key, show(new)));

    changed.chain(added).collect()
}

fn show(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_SHOWN_CHARS => {
            let head: String = s.chars().take(MAX_SHOWN_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"email": "old@example.com", "first_name": "Al"});
        let after = json!({"email": "new@example.com", "first_name": "Al"});

        assert_eq!(
            field_changes(&before, &after),
            vec!["email: \"old@example.com\" -> \"new@example.com\""]
        );
    }

    #[test]
    fn test_timestamps_ignored() {
        let before = json!({"last_name": "x", "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"last_name": "x", "updated_at": "2025-01-02T00:00:00Z"});
        assert!(field_changes(&before, &after).is_empty());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"amount": 1, "description": "rent"});
        let after = json!({"amount": 1, "date": "2025-01-01"});

        let changes = field_changes(&before, &after);
        assert_eq!(
            changes,
            vec![
                "description: \"rent\" -> (removed)",
                "date: (added) -> \"2025-01-01\""
            ]
        );
    }

    #[test]
    fn test_whole_value_comparison() {
        assert_eq!(field_changes(&json!(1.5), &json!(2.0)), vec!["1.5 -> 2.0"]);
        assert!(field_changes(&json!("same"), &json!("same")).is_empty());
    }

    #[test]
    fn test_long_strings_are_shortened() {
        let before = json!({"description": "a".repeat(100)});
        let after = json!({"description": "short"});

        let changes = field_changes(&before, &after);
        assert!(changes[0].starts_with(&format!("description: \"{}...\"", "a".repeat(47))));
    }

    #[test]
    fn test_show_collections() {
        assert_eq!(show(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(show(&json!({"a": 1, "b": 2})), "{2 fields}");
    }
}
