use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use super::{format_date, format_optional_date, optional_text};
use crate::collection::{CollectionController, CollectionTransport, EntityAdapter};
use crate::models::persona::Certification;

#[derive(Debug, Clone, Default)]
pub struct CertificationForm {
    pub name: String,
    pub issuer: String,
    pub date_issued: String,
    /// Empty when the credential does not expire.
    pub date_expires: String,
    pub credential_id: String,
}

pub struct CertificationAdapter;

impl EntityAdapter for CertificationAdapter {
    type Entity = Certification;
    type Form = CertificationForm;
    const COLLECTION: &'static str = "certifications";

    fn to_form_values(entity: &Certification) -> CertificationForm {
        CertificationForm {
            name: entity.name.clone(),
            issuer: entity.issuer.clone(),
            date_issued: format_date(entity.date_issued),
            date_expires: format_optional_date(entity.date_expires),
            credential_id: entity.credential_id.clone().unwrap_or_default(),
        }
    }

    fn to_request_body(form: &CertificationForm) -> Value {
        json!({
            "name": form.name.trim(),
            "issuer": form.issuer.trim(),
            "date_issued": form.date_issued.trim(),
            "date_expires": optional_text(&form.date_expires),
            "credential_id": optional_text(&form.credential_id),
        })
    }
}

pub fn controller(
    transport: Arc<dyn CollectionTransport>,
    persona_id: Uuid,
) -> CollectionController<CertificationAdapter> {
    CollectionController::for_persona(transport, persona_id)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_prefill_and_resubmit_preserve_expiry() {
        let cert = Certification {
            id: Uuid::new_v4(),
            display_order: 1,
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date_issued: NaiveDate::from_ymd_opt(2023, 6, 12).unwrap(),
            date_expires: Some(NaiveDate::from_ymd_opt(2026, 6, 12).unwrap()),
            credential_id: None,
        };
        let form = CertificationAdapter::to_form_values(&cert);
        assert_eq!(form.date_expires, "2026-06-12");

        let body = CertificationAdapter::to_request_body(&form);
        assert_eq!(body["date_expires"], "2026-06-12");
        assert_eq!(body["credential_id"], Value::Null);
    }
}
