use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::OrderedEntity;

/// The profile record built during onboarding. Sub-resource collections
/// (work history, certifications, filters, accomplishments) hang off its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: Uuid,
    pub name: String,
    pub target_role: String,
    pub location: Option<String>,
    pub seniority: Option<String>,
}

/// Client-side draft submitted to create a persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaDraft {
    pub name: String,
    pub target_role: String,
    pub location: Option<String>,
    pub seniority: Option<String>,
}

macro_rules! ordered_entity {
    ($ty:ty) => {
        impl OrderedEntity for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
            fn display_order(&self) -> u32 {
                self.display_order
            }
            fn set_display_order(&mut self, order: u32) {
                self.display_order = order;
            }
        }
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkHistoryEntry {
    pub id: Uuid,
    pub display_order: u32,
    pub company: String,
    pub title: String,
    pub date_start: NaiveDate,
    /// `None` while the position is current.
    pub date_end: Option<NaiveDate>,
    pub location: Option<String>,
    pub summary: Option<String>,
}

ordered_entity!(WorkHistoryEntry);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub id: Uuid,
    pub display_order: u32,
    pub name: String,
    pub issuer: String,
    pub date_issued: NaiveDate,
    pub date_expires: Option<NaiveDate>,
    pub credential_id: Option<String>,
}

ordered_entity!(Certification);

/// Which posting field a custom filter inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Title,
    Company,
    Location,
    Description,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Company => "company",
            FilterField::Location => "location",
            FilterField::Description => "description",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Contains,
    NotContains,
    Equals,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Contains => "contains",
            FilterOp::NotContains => "not_contains",
            FilterOp::Equals => "equals",
        }
    }
}

/// A user-defined rule applied by the scoring backend when ranking postings,
/// e.g. "title not_contains staff".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomFilter {
    pub id: Uuid,
    pub display_order: u32,
    pub field: FilterField,
    pub op: FilterOp,
    pub value: String,
}

ordered_entity!(CustomFilter);

/// A standalone achievement bullet surfaced on generated materials, ordered
/// by how prominently the user wants it shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccomplishmentBullet {
    pub id: Uuid,
    pub display_order: u32,
    pub text: String,
    /// Free-form context line shown under the bullet, if any.
    pub context: Option<String>,
}

ordered_entity!(AccomplishmentBullet);
