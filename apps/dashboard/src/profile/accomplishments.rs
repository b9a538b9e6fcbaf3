use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use super::optional_text;
use crate::collection::{CollectionController, CollectionTransport, EntityAdapter};
use crate::models::persona::AccomplishmentBullet;

#[derive(Debug, Clone, Default)]
pub struct AccomplishmentForm {
    pub text: String,
    pub context: String,
}

pub struct AccomplishmentAdapter;

impl EntityAdapter for AccomplishmentAdapter {
    type Entity = AccomplishmentBullet;
    type Form = AccomplishmentForm;
    const COLLECTION: &'static str = "accomplishments";

    fn to_form_values(entity: &AccomplishmentBullet) -> AccomplishmentForm {
        AccomplishmentForm {
            text: entity.text.clone(),
            context: entity.context.clone().unwrap_or_default(),
        }
    }

    fn to_request_body(form: &AccomplishmentForm) -> Value {
        json!({
            "text": form.text.trim(),
            "context": optional_text(&form.context),
        })
    }
}

pub fn controller(
    transport: Arc<dyn CollectionTransport>,
    persona_id: Uuid,
) -> CollectionController<AccomplishmentAdapter> {
    CollectionController::for_persona(transport, persona_id)
}
