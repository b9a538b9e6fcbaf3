use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ApiError;

/// Addresses one sub-resource collection under a parent record,
/// e.g. `/personas/{id}/certifications`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRoute {
    parent: String,
    collection: &'static str,
}

impl CollectionRoute {
    pub fn new(parent: impl Into<String>, collection: &'static str) -> Self {
        Self {
            parent: parent.into(),
            collection,
        }
    }

    /// Route for a persona sub-resource collection.
    pub fn persona(persona_id: Uuid, collection: &'static str) -> Self {
        Self::new(format!("personas/{persona_id}"), collection)
    }

    pub fn path(&self) -> String {
        format!("/{}/{}", self.parent, self.collection)
    }

    pub fn entry_path(&self, id: Uuid) -> String {
        format!("/{}/{}/{}", self.parent, self.collection, id)
    }
}

/// The remote-resource protocol the controller consumes.
///
/// Payloads are opaque JSON; only the entity adapters know the wire shape of
/// a specific collection type. Object-safe so controllers can hold an
/// `Arc<dyn CollectionTransport>` and tests can substitute an in-memory fake.
#[async_trait]
pub trait CollectionTransport: Send + Sync {
    /// `GET /{parent}/{collection}` — the full collection, server order.
    async fn fetch_all(&self, route: &CollectionRoute) -> Result<Vec<Value>, ApiError>;

    /// `POST /{parent}/{collection}` — create; server assigns id and echoes
    /// the stored entity.
    async fn create(&self, route: &CollectionRoute, body: Value) -> Result<Value, ApiError>;

    /// `PATCH /{parent}/{collection}/{id}` — partial update; server echoes
    /// the full updated entity.
    async fn update(
        &self,
        route: &CollectionRoute,
        id: Uuid,
        body: Value,
    ) -> Result<Value, ApiError>;

    /// `DELETE /{parent}/{collection}/{id}` — no body.
    async fn remove(&self, route: &CollectionRoute, id: Uuid) -> Result<(), ApiError>;
}
