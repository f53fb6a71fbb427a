//! Resolves per-slide item overrides against a layout template's base items.
//!
//! The same template may back multiple slides (and multiple concurrent
//! requests), so the base list is never mutated: every result is a fresh
//! item list.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::{DeckItem, ItemKind, ItemOverride};

/// Merges `overrides` onto `base`, matched by stable item id.
///
/// Matched items get a shallow merge of layout fields plus a key-by-key merge
/// of the `data` payload (override keys replace base keys; keys absent from
/// the override are preserved). Unmatched base items pass through unchanged.
/// Overrides whose id matches no base item are ignored: overrides tune
/// fields, they never inject items.
pub fn merge_items(base: &[DeckItem], overrides: &[ItemOverride]) -> Vec<DeckItem> {
    if overrides.is_empty() {
        return base.to_vec();
    }

    let by_id: HashMap<&str, &ItemOverride> =
        overrides.iter().map(|ov| (ov.i.as_str(), ov)).collect();

    base.iter()
        .map(|item| match by_id.get(item.id.as_str()) {
            Some(ov) => apply_override(item, ov),
            None => item.clone(),
        })
        .collect()
}

fn apply_override(item: &DeckItem, ov: &ItemOverride) -> DeckItem {
    let mut merged = item.clone();
    if let Some(x) = ov.x {
        merged.rect.x = x;
    }
    if let Some(y) = ov.y {
        merged.rect.y = y;
    }
    if let Some(w) = ov.w {
        merged.rect.w = w;
    }
    if let Some(h) = ov.h {
        merged.rect.h = h;
    }
    if let Some(is_static) = ov.is_static {
        merged.is_static = is_static;
    }
    if let Some(patch) = &ov.data {
        let data = merge_data(item.kind.to_data_value(), patch);
        merged.kind = ItemKind::from_tagged(item.kind.tag(), data);
    }
    merged
}

/// Top-level keys of the override's data object replace the base's; all other
/// base keys are preserved. A non-object patch replaces the data wholesale.
fn merge_data(base: Value, patch: &Value) -> Value {
    match (base, patch) {
        (Value::Object(mut base_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                base_map.insert(key.clone(), value.clone());
            }
            Value::Object(base_map)
        }
        (_, patch) => patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridRect, KpiCardData, TextContent};
    use serde_json::json;

    fn kpi(id: &str, x: f64, metric: &str, label: &str, icon: &str) -> DeckItem {
        DeckItem::new(
            id,
            GridRect::new(x, 0.0, 3.0, 4.0),
            ItemKind::KpiCard(KpiCardData {
                metric: TextContent::from(metric),
                label: label.to_string(),
                icon: Some(icon.to_string()),
                trend: None,
            }),
        )
    }

    #[test]
    fn override_replaces_only_named_data_keys() {
        let base = vec![kpi("metric1", 0.0, "24%", "Growth", "trending-up")];
        let overrides = vec![ItemOverride::data("metric1", json!({ "label": "Custom Label" }))];

        let merged = merge_items(&base, &overrides);
        match &merged[0].kind {
            ItemKind::KpiCard(kpi) => {
                assert_eq!(kpi.label, "Custom Label");
                assert_eq!(kpi.metric.flatten(), "24%");
                assert_eq!(kpi.icon.as_deref(), Some("trending-up"));
            }
            other => panic!("expected kpi-card, got {}", other.tag()),
        }
        assert_eq!(merged[0].rect, base[0].rect);
    }

    #[test]
    fn base_is_never_mutated_and_results_are_independent() {
        let base = vec![kpi("metric1", 0.0, "24%", "Growth", "trending-up")];

        let first = merge_items(&base, &[ItemOverride::data("metric1", json!({ "label": "One" }))]);
        let second =
            merge_items(&base, &[ItemOverride::data("metric1", json!({ "label": "Two" }))]);
        let untouched = merge_items(&base, &[]);

        match (&first[0].kind, &second[0].kind) {
            (ItemKind::KpiCard(a), ItemKind::KpiCard(b)) => {
                assert_eq!(a.label, "One");
                assert_eq!(b.label, "Two");
            }
            _ => panic!("expected kpi cards"),
        }
        assert_eq!(untouched, base);
        match &base[0].kind {
            ItemKind::KpiCard(kpi) => assert_eq!(kpi.label, "Growth"),
            _ => panic!("base changed kind"),
        }
    }

    #[test]
    fn unmatched_override_has_no_effect() {
        let base = vec![kpi("metric1", 0.0, "24%", "Growth", "trending-up")];
        let overrides = vec![ItemOverride::data("ghost", json!({ "label": "Nope" }))];

        let merged = merge_items(&base, &overrides);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged, base);
    }

    #[test]
    fn position_overrides_apply_shallowly() {
        let base = vec![kpi("metric1", 0.0, "24%", "Growth", "trending-up")];
        let overrides = vec![ItemOverride {
            i: "metric1".to_string(),
            x: Some(6.0),
            h: Some(6.0),
            ..Default::default()
        }];

        let merged = merge_items(&base, &overrides);
        assert_eq!(merged[0].rect.x, 6.0);
        assert_eq!(merged[0].rect.h, 6.0);
        assert_eq!(merged[0].rect.w, 3.0);
    }
}
