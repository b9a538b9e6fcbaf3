use super::adapter::EntityAdapter;
use super::controller::{CollectionController, DeleteTarget, ViewMode};

/// Whether the open form creates a new entry or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormIntent {
    Create,
    Update,
}

/// Snapshot of the single-entry form surface.
#[derive(Debug, Clone)]
pub struct FormView<F> {
    pub intent: FormIntent,
    /// Prefill for `Update` (via the adapter's `to_form_values`); `None` for
    /// a blank `Create` form.
    pub initial: Option<F>,
    pub error: Option<String>,
    pub is_submitting: bool,
}

/// Snapshot of the list surface.
#[derive(Debug, Clone)]
pub struct ListView<E> {
    /// Entries in display order.
    pub entries: Vec<E>,
    /// Set while the delete confirmation dialog should be shown.
    pub pending_delete: Option<DeleteTarget<E>>,
    pub reorder_error: Option<String>,
    pub is_loading: bool,
    pub is_deleting: bool,
    pub is_reordering: bool,
}

/// What the shell renders: exactly one surface at a time. A pure projection
/// of controller state; building it performs no network calls.
#[derive(Debug, Clone)]
pub enum CollectionView<E, F> {
    List(ListView<E>),
    Form(FormView<F>),
}

impl<A: EntityAdapter> CollectionController<A> {
    /// Projects controller state into the surface the shell renders.
    pub fn view(&self) -> CollectionView<A::Entity, A::Form> {
        match self.mode() {
            ViewMode::List => CollectionView::List(ListView {
                entries: self.entries().to_vec(),
                pending_delete: self.delete_target().cloned(),
                reorder_error: self.reorder_error().map(str::to_string),
                is_loading: self.is_loading(),
                is_deleting: self.is_deleting(),
                is_reordering: self.is_reordering(),
            }),
            ViewMode::Add => CollectionView::Form(FormView {
                intent: FormIntent::Create,
                initial: None,
                error: self.add_error().map(str::to_string),
                is_submitting: self.is_submitting(),
            }),
            ViewMode::Edit(entry) => CollectionView::Form(FormView {
                intent: FormIntent::Update,
                initial: Some(A::to_form_values(entry)),
                error: self.edit_error().map(str::to_string),
                is_submitting: self.is_submitting(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use super::*;
    use crate::collection::adapter::OrderedEntity;
    use crate::collection::transport::{CollectionRoute, CollectionTransport};
    use crate::errors::ApiError;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Pin {
        id: Uuid,
        display_order: u32,
        note: String,
    }

    impl OrderedEntity for Pin {
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

    struct PinAdapter;

    impl EntityAdapter for PinAdapter {
        type Entity = Pin;
        type Form = String;
        const COLLECTION: &'static str = "pins";

        fn to_form_values(entity: &Pin) -> String {
            entity.note.clone()
        }

        fn to_request_body(form: &String) -> Value {
            json!({ "note": form })
        }
    }

    /// Serves one pin; building views must never reach it again after load.
    struct OnePin(Pin);

    #[async_trait]
    impl CollectionTransport for OnePin {
        async fn fetch_all(&self, _route: &CollectionRoute) -> Result<Vec<Value>, ApiError> {
            Ok(vec![json!(self.0)])
        }
        async fn create(&self, _: &CollectionRoute, _: Value) -> Result<Value, ApiError> {
            panic!("view construction must not call the network")
        }
        async fn update(&self, _: &CollectionRoute, _: Uuid, _: Value) -> Result<Value, ApiError> {
            panic!("view construction must not call the network")
        }
        async fn remove(&self, _: &CollectionRoute, _: Uuid) -> Result<(), ApiError> {
            panic!("view construction must not call the network")
        }
    }

    async fn loaded_controller() -> (CollectionController<PinAdapter>, Pin) {
        let pin = Pin {
            id: Uuid::new_v4(),
            display_order: 0,
            note: "follow up".to_string(),
        };
        let mut ctrl = CollectionController::new(
            Arc::new(OnePin(pin.clone())),
            CollectionRoute::persona(Uuid::new_v4(), "pins"),
        );
        ctrl.load().await;
        (ctrl, pin)
    }

    #[tokio::test]
    async fn test_list_view_carries_pending_delete() {
        let (mut ctrl, pin) = loaded_controller().await;
        ctrl.request_delete(pin.id);
        match ctrl.view() {
            CollectionView::List(list) => {
                assert_eq!(list.entries.len(), 1);
                assert_eq!(list.pending_delete.unwrap().entry.id, pin.id);
            }
            CollectionView::Form(_) => panic!("expected list surface"),
        }
    }

    #[tokio::test]
    async fn test_edit_view_prefills_from_adapter() {
        let (mut ctrl, pin) = loaded_controller().await;
        ctrl.open_edit(pin.id);
        match ctrl.view() {
            CollectionView::Form(form) => {
                assert_eq!(form.intent, FormIntent::Update);
                assert_eq!(form.initial.as_deref(), Some("follow up"));
            }
            CollectionView::List(_) => panic!("expected form surface"),
        }
    }

    #[tokio::test]
    async fn test_add_view_is_blank() {
        let (mut ctrl, _) = loaded_controller().await;
        ctrl.open_add();
        match ctrl.view() {
            CollectionView::Form(form) => {
                assert_eq!(form.intent, FormIntent::Create);
                assert!(form.initial.is_none());
            }
            CollectionView::List(_) => panic!("expected form surface"),
        }
    }
}
