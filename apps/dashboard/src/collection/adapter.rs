use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

/// An entity that lives in an ordered sub-resource collection.
///
/// `display_order` is zero-based, dense and unique within the collection;
/// the server is the arbiter of its persisted value.
pub trait OrderedEntity: Clone + Send {
    fn id(&self) -> Uuid;
    fn display_order(&self) -> u32;
    fn set_display_order(&mut self, order: u32);
}

/// The adapter pair for one collection type: the only place that knows the
/// wire shape of a specific entity. `to_form_values` fills the edit form from
/// a stored entity; `to_request_body` turns submitted form state into the
/// create/update payload. Both are pure.
///
/// Adding a new collection type means implementing this trait once and
/// reusing [`CollectionController`](super::CollectionController) unchanged.
pub trait EntityAdapter {
    type Entity: OrderedEntity + DeserializeOwned;
    type Form: Clone;

    /// URL segment for this collection, e.g. `"certifications"`.
    const COLLECTION: &'static str;

    fn to_form_values(entity: &Self::Entity) -> Self::Form;

    fn to_request_body(form: &Self::Form) -> Value;
}
