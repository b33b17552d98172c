//! Selection
//!
//! The set of lines a shopper has ticked for checkout. Selection lives in
//! memory only and starts over whenever the cart is loaded.

use rustc_hash::FxHashSet;

use crate::items::{CartItem, CartItemId};

/// Line ids included in checkout totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: FxHashSet<CartItemId>,
}

impl SelectionSet {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection containing every given line.
    pub fn all<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> Self {
        Self {
            ids: items.into_iter().map(|item| item.id().clone()).collect(),
        }
    }

    /// Selects exactly the given lines.
    pub fn reset_to<'a>(&mut self, items: impl IntoIterator<Item = &'a CartItem>) {
        *self = Self::all(items);
    }

    /// Flips a single line in or out of the selection.
    pub fn toggle(&mut self, id: &CartItemId) {
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        }
    }

    /// Selects every given line, or clears the selection.
    pub fn select_all<'a>(&mut self, items: impl IntoIterator<Item = &'a CartItem>, selected: bool) {
        if selected {
            *self = Self::all(items);
        } else {
            self.ids.clear();
        }
    }

    /// Replaces the selection after the line collection changed.
    ///
    /// Ids that no longer exist are dropped; lines that were not present in
    /// `before` are selected.
    pub fn reconcile(&mut self, before: &[CartItem], after: &[CartItem]) {
        let previous: FxHashSet<&CartItemId> = before.iter().map(CartItem::id).collect();

        self.ids = after
            .iter()
            .map(CartItem::id)
            .filter(|id| self.ids.contains(*id) || !previous.contains(id))
            .cloned()
            .collect();
    }

    /// Whether the line is selected.
    pub fn contains(&self, id: &CartItemId) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drops every id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected lines, in collection order.
    pub fn filter<'a>(&self, items: &'a [CartItem]) -> Vec<&'a CartItem> {
        items.iter().filter(|item| self.contains(item.id())).collect()
    }
}
