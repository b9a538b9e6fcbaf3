use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use super::{format_date, format_optional_date, optional_text};
use crate::collection::{CollectionController, CollectionTransport, EntityAdapter};
use crate::models::persona::WorkHistoryEntry;

/// Work history form state as the shell's inputs deliver it. An empty
/// `date_end` means the position is current.
#[derive(Debug, Clone, Default)]
pub struct WorkHistoryForm {
    pub company: String,
    pub title: String,
    pub date_start: String,
    pub date_end: String,
    pub location: String,
    pub summary: String,
}

pub struct WorkHistoryAdapter;

impl EntityAdapter for WorkHistoryAdapter {
    type Entity = WorkHistoryEntry;
    type Form = WorkHistoryForm;
    const COLLECTION: &'static str = "work-history";

    fn to_form_values(entity: &WorkHistoryEntry) -> WorkHistoryForm {
        WorkHistoryForm {
            company: entity.company.clone(),
            title: entity.title.clone(),
            date_start: format_date(entity.date_start),
            date_end: format_optional_date(entity.date_end),
            location: entity.location.clone().unwrap_or_default(),
            summary: entity.summary.clone().unwrap_or_default(),
        }
    }

    fn to_request_body(form: &WorkHistoryForm) -> Value {
        json!({
            "company": form.company.trim(),
            "title": form.title.trim(),
            "date_start": form.date_start.trim(),
            "date_end": optional_text(&form.date_end),
            "location": optional_text(&form.location),
            "summary": optional_text(&form.summary),
        })
    }
}

pub fn controller(
    transport: Arc<dyn CollectionTransport>,
    persona_id: Uuid,
) -> CollectionController<WorkHistoryAdapter> {
    CollectionController::for_persona(transport, persona_id)
}
