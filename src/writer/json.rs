use serde_json::{json, Map, Value};

use crate::filter::FilterState;
use crate::schema::DisplayRow;
use crate::view::{Section, View, RESULTS_CLEARED};

/// Build the JSON document for a view: the filters that produced it plus
/// each section's rows keyed by header
pub fn view_to_json(view: &View<'_>, state: &FilterState) -> Value {
    let body = match view {
        View::Cleared => json!({ "kind": "cleared", "notice": RESULTS_CLEARED }),
        View::Harvest(section) => json!({
            "kind": "harvest",
            "harvest": section_to_json(section),
        }),
        View::Recipes { recipes, sources } => json!({
            "kind": "recipes",
            "recipes": section_to_json(recipes),
            "sources": sources.as_ref().map(section_to_json),
        }),
    };

    json!({ "filters": state, "view": body })
}

pub fn section_to_json<R: DisplayRow>(section: &Section<'_, R>) -> Value {
    let rows: Vec<Value> = section
        .rows()
        .iter()
        .map(|row| {
            let record: Map<String, Value> = section
                .headers
                .iter()
                .zip(row.cells())
                .map(|(h, c)| {
                    let value = c.as_ref().map_or(Value::Null, |s| Value::String(s.clone()));
                    (h.clone(), value)
                })
                .collect();
            Value::Object(record)
        })
        .collect();

    json!({
        "title": section.title,
        "notice": section.notice(),
        "rows": rows,
    })
}
