//! Adapter call sites for the persona's editable collections.
//!
//! Each submodule binds one sub-resource to the shared
//! [`CollectionController`](crate::collection::CollectionController): the
//! UI-shaped form struct (text inputs deliver strings), the adapter pair
//! translating between form shape and wire shape, and a constructor wiring
//! the persona route. Adding another collection type is one more module in
//! this folder.

pub mod accomplishments;
pub mod certifications;
pub mod filters;
pub mod work_history;

use chrono::NaiveDate;
use serde_json::Value;

/// Trimmed empty strings from optional inputs become JSON null on the wire.
fn optional_text(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::String(trimmed.to_string())
    }
}

/// Date inputs exchange ISO `YYYY-MM-DD` strings; the wire shape is the same,
/// so form values pass through unparsed and the server validates them.
fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}
