//! Editable ordered collection core.
//!
//! One generalized state machine manages add/edit/delete/reorder for every
//! persona sub-resource list (work history, certifications, custom filters,
//! accomplishment bullets). A collection type plugs in by implementing
//! [`EntityAdapter`]; the view-mode machine, the delete confirmation gate,
//! and the optimistic reorder reconciler are shared.

pub mod adapter;
pub mod controller;
pub mod reorder;
pub mod transport;
pub mod view;

pub use adapter::{EntityAdapter, OrderedEntity};
pub use controller::{CollectionController, DeleteTarget, ViewMode};
pub use reorder::{order_patches, OrderPatch};
pub use transport::{CollectionRoute, CollectionTransport};
pub use view::{CollectionView, FormIntent, FormView, ListView};
