use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::collection::{CollectionController, CollectionTransport, EntityAdapter};
use crate::models::persona::CustomFilter;

/// Filter rule form. `field` and `op` arrive as the select inputs' snake_case
/// values and pass through to the wire unparsed; the server rejects unknown
/// combinations with a validation error the form surfaces.
#[derive(Debug, Clone, Default)]
pub struct CustomFilterForm {
    pub field: String,
    pub op: String,
    pub value: String,
}

pub struct CustomFilterAdapter;

impl EntityAdapter for CustomFilterAdapter {
    type Entity = CustomFilter;
    type Form = CustomFilterForm;
    const COLLECTION: &'static str = "filters";

    fn to_form_values(entity: &CustomFilter) -> CustomFilterForm {
        CustomFilterForm {
            field: entity.field.as_str().to_string(),
            op: entity.op.as_str().to_string(),
            value: entity.value.clone(),
        }
    }

    fn to_request_body(form: &CustomFilterForm) -> Value {
        json!({
            "field": form.field,
            "op": form.op,
            "value": form.value.trim(),
        })
    }
}

pub fn controller(
    transport: Arc<dyn CollectionTransport>,
    persona_id: Uuid,
) -> CollectionController<CustomFilterAdapter> {
    CollectionController::for_persona(transport, persona_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::persona::{FilterField, FilterOp};

    #[test]
    fn test_prefill_uses_select_values() {
        let filter = CustomFilter {
            id: Uuid::new_v4(),
            display_order: 0,
            field: FilterField::Title,
            op: FilterOp::NotContains,
            value: "staff".to_string(),
        };
        let form = CustomFilterAdapter::to_form_values(&filter);
        assert_eq!(form.field, "title");
        assert_eq!(form.op, "not_contains");

        // A resubmitted prefill deserializes back to the same rule.
        let body = CustomFilterAdapter::to_request_body(&form);
        let round: CustomFilter = serde_json::from_value(json!({
            "id": filter.id,
            "display_order": 0,
            "field": body["field"],
            "op": body["op"],
            "value": body["value"],
        }))
        .unwrap();
        assert_eq!(round.field, FilterField::Title);
        assert_eq!(round.op, FilterOp::NotContains);
    }
}
