use serde_json::{Value, json};

use crate::model::Layout;

/// Serialize a `Layout` as a JSON object `{ cards, unplaced, extent, space }`
/// (array-of-cards style). Suitable for generic tooling and simple
/// consumption.
pub fn to_json<K: ToString>(layout: &Layout<K>) -> Value {
    let cards: Vec<Value> = layout
        .placed
        .iter()
        .map(|p| {
            let eff = p.effective_region();
            json!({
                "key": p.card.key().to_string(),
                "pos": {"x": p.pos.x, "y": p.pos.y},
                "size": {"w": p.card.width(), "h": p.card.height()},
                "padding": p.card.padding(),
                "pinned": p.pinned,
                "effective": {"x": eff.x, "y": eff.y, "w": eff.w, "h": eff.h},
            })
        })
        .collect();
    let unplaced: Vec<Value> = layout
        .unplaced
        .iter()
        .map(|c| {
            json!({
                "key": c.key().to_string(),
                "size": {"w": c.width(), "h": c.height()},
                "padding": c.padding(),
            })
        })
        .collect();
    json!({
        "cards": cards,
        "unplaced": unplaced,
        "extent": layout.extent,
        "space": &layout.space,
    })
}

/// Flatten placed cards keyed by name.
/// Shape: `{ cards: { name: { pos, size, padding, pinned, effective } },
/// unplaced: [name], extent, space }`.
pub fn to_json_hash<K: ToString>(layout: &Layout<K>) -> Value {
    let mut cards = serde_json::Map::new();
    for p in &layout.placed {
        let eff = p.effective_region();
        cards.insert(
            p.card.key().to_string(),
            json!({
                "pos": {"x": p.pos.x, "y": p.pos.y},
                "size": {"w": p.card.width(), "h": p.card.height()},
                "padding": p.card.padding(),
                "pinned": p.pinned,
                "effective": {"x": eff.x, "y": eff.y, "w": eff.w, "h": eff.h},
            }),
        );
    }
    let unplaced: Vec<Value> = layout
        .unplaced
        .iter()
        .map(|c| Value::String(c.key().to_string()))
        .collect();
    json!({
        "cards": cards,
        "unplaced": unplaced,
        "extent": layout.extent,
        "space": &layout.space,
    })
}
