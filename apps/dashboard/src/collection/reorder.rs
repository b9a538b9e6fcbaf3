use serde_json::{json, Value};
use uuid::Uuid;

use super::adapter::OrderedEntity;

/// One order-changing update for a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPatch {
    pub id: Uuid,
    pub display_order: u32,
}

impl OrderPatch {
    pub fn body(&self) -> Value {
        json!({ "display_order": self.display_order })
    }
}

/// Computes the minimal patch set for a reordered collection.
///
/// An entry is included only when its position in the new array differs from
/// its currently-recorded `display_order`, so a drag that snaps back to its
/// origin produces an empty set and no network traffic, even when the input
/// is a fresh array object with identical order.
pub fn order_patches<E: OrderedEntity>(reordered: &[E]) -> Vec<OrderPatch> {
    reordered
        .iter()
        .enumerate()
        .filter(|(position, entry)| entry.display_order() != *position as u32)
        .map(|(position, entry)| OrderPatch {
            id: entry.id(),
            display_order: position as u32,
        })
        .collect()
}

/// Re-stamps each entry's `display_order` to its array position. Applied at
/// optimistic-update time so list indices and recorded order agree while the
/// patch batch is in flight; the rollback snapshot keeps the old stamps.
pub fn restamp_order<E: OrderedEntity>(entries: &mut [E]) {
    for (position, entry) in entries.iter_mut().enumerate() {
        entry.set_display_order(position as u32);
    }
}
