//! Property-based tests for cell formatting, tables, and config validation.
//!
//! These tests use proptest to check that the renderer and the validator
//! behave for arbitrary input, including multibyte text.

use std::path::PathBuf;

use proptest::prelude::*;

use shuttle::core::config::{validate, ConfigLayer, OutputMode, NATS_SCHEME, PRIORITY_RANGE};
use shuttle::ui::format::truncate;
use shuttle::ui::output::render_table;

/// Printable text mixing ASCII, accented letters, and CJK.
fn any_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,40}",
        "[a-zé漢字 ]{0,40}",
    ]
}

/// Cell text that never contains the `#` used to mark row ids.
fn cell_text() -> impl Strategy<Value = String> {
    "[a-zA-Zé漢 ]{0,16}"
}

fn optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        any_text(),
        Just("nats://localhost:4222".to_string()),
        Just("table".to_string()),
        Just("json".to_string()),
        Just("   ".to_string()),
    ])
}

fn any_layer() -> impl Strategy<Value = ConfigLayer> {
    (
        (optional_text(), optional_text(), prop::option::of(any_text())),
        (optional_text(), prop::option::of(any::<i64>()), optional_text()),
        (optional_text(), optional_text()),
    )
        .prop_map(
            |(
                (nats_url, project_id, credentials_path),
                (default_boundary, default_priority, output_format),
                (api_url, api_token),
            )| ConfigLayer {
                nats_url,
                project_id,
                credentials_path: credentials_path.map(PathBuf::from),
                default_boundary,
                default_priority,
                output_format,
                api_url,
                api_token,
            },
        )
}

/// Count the rules `layer` breaks, checked directly against the constraints.
fn broken_rules(layer: &ConfigLayer) -> usize {
    let mut broken = 0;
    if layer.nats_url.as_deref().is_some_and(|u| !u.starts_with(NATS_SCHEME)) {
        broken += 1;
    }
    if layer.default_priority.is_some_and(|p| !PRIORITY_RANGE.contains(&p)) {
        broken += 1;
    }
    if layer.default_boundary.as_deref().is_some_and(|b| b.trim().is_empty()) {
        broken += 1;
    }
    if layer
        .output_format
        .as_deref()
        .is_some_and(|f| OutputMode::parse(f).is_none())
    {
        broken += 1;
    }
    broken
}

proptest! {
    /// Truncation never exceeds the limit, counted in characters.
    #[test]
    fn truncate_respects_the_limit(s in any_text(), max_len in 0usize..50) {
        let out = truncate(&s, max_len);
        prop_assert!(out.chars().count() <= max_len);
    }

    /// A string that already fits comes back unchanged; a longer one keeps
    /// its leading characters.
    #[test]
    fn truncate_keeps_what_fits(s in any_text(), max_len in 0usize..50) {
        let out = truncate(&s, max_len);
        let len = s.chars().count();
        if len <= max_len {
            prop_assert_eq!(out, s);
        } else if max_len > 0 {
            let kept: String = out.chars().take(max_len - 1).collect();
            prop_assert!(s.starts_with(&kept));
            prop_assert_eq!(out.chars().count(), max_len);
        }
    }

    /// Validation never fails and reports one message per broken rule.
    #[test]
    fn validate_is_total(layer in any_layer()) {
        let violations = validate(&layer);
        prop_assert_eq!(violations.len(), broken_rules(&layer));
        prop_assert_eq!(validate(&layer), violations);
    }

    /// Rows come out in the order they were given.
    #[test]
    fn render_table_keeps_row_order(cells in prop::collection::vec(cell_text(), 0..20)) {
        let rows: Vec<Vec<String>> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| vec![format!("#{}#", i), cell.clone()])
            .collect();

        let rendered = render_table(&["ID", "CELL"], &rows);

        let mut last = 0;
        for row in &rows {
            let at = rendered.find(row[0].as_str());
            prop_assert!(at.is_some(), "row {} missing", row[0]);
            let at = at.unwrap_or_default();
            prop_assert!(at >= last, "row {} out of order", row[0]);
            last = at;
        }
    }
}
