use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use super::adapter::{EntityAdapter, OrderedEntity};
use super::reorder::{order_patches, restamp_order};
use super::transport::{CollectionRoute, CollectionTransport};

/// Which surface the shell renders. `Add` and `Edit` occupy the view with a
/// single-entry form; `Edit` carries the entry being edited, which is always
/// one of the entries currently in the collection.
#[derive(Debug, Clone)]
pub enum ViewMode<E> {
    List,
    Add,
    Edit(E),
}

impl<E> ViewMode<E> {
    pub fn is_list(&self) -> bool {
        matches!(self, ViewMode::List)
    }
}

/// Entry pending delete confirmation, plus the error from the last failed
/// delete attempt against it (so the dialog can show what went wrong and
/// offer retry or cancel).
#[derive(Debug, Clone)]
pub struct DeleteTarget<E> {
    pub entry: E,
    pub error: Option<String>,
}

/// State machine for one ordered sub-resource collection.
///
/// Owns the entry list (always held in server order), the active view mode,
/// the delete-confirmation gate, and per-action error slots. Every mutating
/// operation dispatches one network action, reconciles local state with the
/// server response, and converts failures into user-facing state — nothing
/// is thrown past this boundary and nothing is retried automatically.
///
/// The busy flags (`is_loading` / `is_submitting` / `is_deleting` /
/// `is_reordering`) are advisory: the shell disables the triggering control
/// while they are set, but the controller does not queue or serialize
/// concurrent actions.
pub struct CollectionController<A: EntityAdapter> {
    transport: Arc<dyn CollectionTransport>,
    route: CollectionRoute,
    entries: Vec<A::Entity>,
    mode: ViewMode<A::Entity>,
    delete_target: Option<DeleteTarget<A::Entity>>,
    is_loading: bool,
    is_submitting: bool,
    is_deleting: bool,
    is_reordering: bool,
    add_error: Option<String>,
    edit_error: Option<String>,
    reorder_error: Option<String>,
}

impl<A: EntityAdapter> CollectionController<A> {
    /// Controller for this adapter's collection under a persona.
    pub fn for_persona(transport: Arc<dyn CollectionTransport>, persona_id: Uuid) -> Self {
        Self::new(transport, CollectionRoute::persona(persona_id, A::COLLECTION))
    }

    pub fn new(transport: Arc<dyn CollectionTransport>, route: CollectionRoute) -> Self {
        Self {
            transport,
            route,
            entries: Vec::new(),
            mode: ViewMode::List,
            delete_target: None,
            is_loading: false,
            is_submitting: false,
            is_deleting: false,
            is_reordering: false,
            add_error: None,
            edit_error: None,
            reorder_error: None,
        }
    }

    // ── accessors ───────────────────────────────────────────────────────────

    pub fn entries(&self) -> &[A::Entity] {
        &self.entries
    }

    pub fn mode(&self) -> &ViewMode<A::Entity> {
        &self.mode
    }

    pub fn delete_target(&self) -> Option<&DeleteTarget<A::Entity>> {
        self.delete_target.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    pub fn is_reordering(&self) -> bool {
        self.is_reordering
    }

    pub fn add_error(&self) -> Option<&str> {
        self.add_error.as_deref()
    }

    pub fn edit_error(&self) -> Option<&str> {
        self.edit_error.as_deref()
    }

    pub fn reorder_error(&self) -> Option<&str> {
        self.reorder_error.as_deref()
    }

    // ── load ────────────────────────────────────────────────────────────────

    /// Fetches the full collection. A failed fetch is tolerated: the
    /// collection stays empty and the user can still add entries manually,
    /// so onboarding is never blocked on a flaky list. The loading flag is
    /// cleared on every path.
    pub async fn load(&mut self) {
        self.is_loading = true;
        match self.transport.fetch_all(&self.route).await {
            Ok(values) => match parse_entries::<A::Entity>(values) {
                Ok(mut entries) => {
                    entries.sort_by_key(|e| e.display_order());
                    debug!(
                        collection = A::COLLECTION,
                        count = entries.len(),
                        "collection loaded"
                    );
                    self.entries = entries;
                }
                Err(e) => {
                    warn!(collection = A::COLLECTION, error = %e, "discarding unreadable collection payload");
                }
            },
            Err(e) => {
                warn!(collection = A::COLLECTION, error = %e, "collection fetch failed; starting empty");
            }
        }
        self.is_loading = false;
    }

    // ── add ─────────────────────────────────────────────────────────────────

    /// Opens the add form, clearing any previous submission error.
    pub fn open_add(&mut self) {
        self.mode = ViewMode::Add;
        self.add_error = None;
    }

    /// Submits a new entry with `display_order` set to the current length.
    /// On success the server-returned entity is appended and the view returns
    /// to the list; on failure the form stays open so the input is not lost.
    pub async fn save_new(&mut self, form: &A::Form) {
        self.is_submitting = true;
        let body = with_display_order(A::to_request_body(form), self.entries.len() as u32);
        match self.transport.create(&self.route, body).await {
            Ok(value) => match serde_json::from_value::<A::Entity>(value) {
                Ok(entity) => {
                    self.entries.push(entity);
                    self.mode = ViewMode::List;
                    self.add_error = None;
                }
                Err(e) => {
                    warn!(collection = A::COLLECTION, error = %e, "created entity unreadable");
                    self.add_error = Some(crate::errors::ApiError::Parse(e).friendly_message());
                }
            },
            Err(e) => {
                warn!(collection = A::COLLECTION, error = %e, "create failed");
                self.add_error = Some(e.friendly_message());
            }
        }
        self.is_submitting = false;
    }

    // ── edit ────────────────────────────────────────────────────────────────

    /// Opens the edit form for an entry currently in the collection. A stale
    /// id (entry already deleted) is ignored rather than opening an edit
    /// session on nothing.
    pub fn open_edit(&mut self, id: Uuid) {
        match self.entries.iter().find(|e| e.id() == id) {
            Some(entry) => {
                self.mode = ViewMode::Edit(entry.clone());
                self.edit_error = None;
            }
            None => warn!(collection = A::COLLECTION, %id, "edit requested for unknown entry"),
        }
    }

    /// Submits the edit form against the entry opened by
    /// [`open_edit`](Self::open_edit). On success the server response
    /// replaces that entry in place (matched by id); on failure the form
    /// stays open with the input preserved.
    pub async fn save_edit(&mut self, form: &A::Form) {
        let id = match &self.mode {
            ViewMode::Edit(entry) => entry.id(),
            _ => {
                warn!(collection = A::COLLECTION, "save_edit outside edit mode ignored");
                return;
            }
        };
        self.is_submitting = true;
        match self
            .transport
            .update(&self.route, id, A::to_request_body(form))
            .await
        {
            Ok(value) => match serde_json::from_value::<A::Entity>(value) {
                Ok(entity) => {
                    if let Some(slot) = self.entries.iter_mut().find(|e| e.id() == id) {
                        *slot = entity;
                    }
                    self.mode = ViewMode::List;
                    self.edit_error = None;
                }
                Err(e) => {
                    warn!(collection = A::COLLECTION, error = %e, "updated entity unreadable");
                    self.edit_error = Some(crate::errors::ApiError::Parse(e).friendly_message());
                }
            },
            Err(e) => {
                warn!(collection = A::COLLECTION, error = %e, "update failed");
                self.edit_error = Some(e.friendly_message());
            }
        }
        self.is_submitting = false;
    }

    /// Discards the open form and returns to the list. No network call.
    pub fn cancel(&mut self) {
        self.mode = ViewMode::List;
        self.add_error = None;
        self.edit_error = None;
    }

    // ── delete gate ─────────────────────────────────────────────────────────

    /// Records delete intent. Nothing is removed and no network call is made;
    /// the shell renders a confirmation surface while a target is set.
    pub fn request_delete(&mut self, id: Uuid) {
        match self.entries.iter().find(|e| e.id() == id) {
            Some(entry) => {
                self.delete_target = Some(DeleteTarget {
                    entry: entry.clone(),
                    error: None,
                });
            }
            None => warn!(collection = A::COLLECTION, %id, "delete requested for unknown entry"),
        }
    }

    /// Issues the delete call for the pending target. On success the entry is
    /// removed by id and the gate closes; on failure the dialog stays open
    /// with the error attached so the user can retry or cancel. The entry is
    /// never removed on a failed delete.
    pub async fn confirm_delete(&mut self) {
        let id = match &self.delete_target {
            Some(target) => target.entry.id(),
            None => return,
        };
        self.is_deleting = true;
        match self.transport.remove(&self.route, id).await {
            Ok(()) => {
                self.entries.retain(|e| e.id() != id);
                self.delete_target = None;
            }
            Err(e) => {
                warn!(collection = A::COLLECTION, %id, error = %e, "delete failed");
                if let Some(target) = &mut self.delete_target {
                    target.error = Some(e.friendly_message());
                }
            }
        }
        self.is_deleting = false;
    }

    /// Closes the confirmation dialog without touching the collection.
    pub fn cancel_delete(&mut self) {
        self.delete_target = None;
    }

    // ── reorder ─────────────────────────────────────────────────────────────

    /// Reconciles a full reordered array from the drag-and-drop collaborator.
    ///
    /// The new order is applied optimistically, then one update per entry
    /// whose position actually changed is dispatched concurrently. If any
    /// patch in the batch fails, local state rolls back wholesale to the
    /// pre-reorder snapshot — a half-applied order is never left visible.
    /// A reorder that changes nothing performs zero network calls.
    pub async fn reorder(&mut self, reordered: Vec<A::Entity>) {
        let patches = order_patches(&reordered);
        if patches.is_empty() {
            return;
        }

        let snapshot = std::mem::replace(&mut self.entries, reordered);
        restamp_order(&mut self.entries);
        self.is_reordering = true;

        let transport = Arc::clone(&self.transport);
        let route = self.route.clone();
        let results = join_all(
            patches
                .iter()
                .map(|patch| transport.update(&route, patch.id, patch.body())),
        )
        .await;

        match results.into_iter().find_map(Result::err) {
            Some(e) => {
                warn!(collection = A::COLLECTION, error = %e, "reorder batch failed; rolling back");
                self.entries = snapshot;
                self.reorder_error = Some(e.friendly_message());
            }
            None => {
                self.reorder_error = None;
            }
        }
        self.is_reordering = false;
    }
}

fn parse_entries<E: serde::de::DeserializeOwned>(
    values: Vec<Value>,
) -> Result<Vec<E>, serde_json::Error> {
    values.into_iter().map(serde_json::from_value).collect()
}

/// Create payloads carry the computed `display_order` alongside the adapter's
/// request body.
fn with_display_order(body: Value, display_order: u32) -> Value {
    match body {
        Value::Object(mut map) => {
            map.insert("display_order".to_string(), display_order.into());
            Value::Object(map)
        }
        other => {
            warn!("request body is not a JSON object; display_order not attached");
            other
        }
    }
}
