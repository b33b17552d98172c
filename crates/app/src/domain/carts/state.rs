//! Cart state
//!
//! The value published to views. Exactly one of the two collections is
//! active at a time, chosen by the authentication state when it is read.

use imports::prelude::{Cart, CartItem, CartItemId, GuestItems, SelectionSet, Totals};
use tokio::sync::watch;

/// Snapshot of everything a cart view renders.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    /// Server cart, `None` until loaded or after a failed load
    pub cart: Option<Cart>,

    /// Lines held locally for a visitor
    pub guest_items: GuestItems,

    /// Lines ticked for checkout
    pub selection: SelectionSet,

    /// Sum of quantities in the active collection
    pub item_count: u32,

    in_flight: usize,
}

impl CartState {
    /// Whether a remote operation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Lines of the collection that is active for the given auth mode.
    #[must_use]
    pub fn items(&self, authenticated: bool) -> &[CartItem] {
        if authenticated {
            self.cart
                .as_ref()
                .map(|cart| cart.items.as_slice())
                .unwrap_or_default()
        } else {
            self.guest_items.items()
        }
    }

    /// Selected lines of the active collection, in display order.
    #[must_use]
    pub fn selected_items(&self, authenticated: bool) -> Vec<CartItem> {
        self.selection
            .filter(self.items(authenticated))
            .into_iter()
            .cloned()
            .collect()
    }

    /// Order summary for the current selection.
    #[must_use]
    pub fn totals(&self, authenticated: bool) -> Totals {
        match (authenticated, &self.cart) {
            (true, Some(cart)) => Totals::for_cart(cart, &self.selection),
            (true, None) => Totals::empty(),
            (false, _) => Totals::for_guest(self.guest_items.items(), &self.selection),
        }
    }

    /// Flips a line of the active collection. Unknown ids are ignored.
    pub(super) fn toggle(&mut self, authenticated: bool, id: &CartItemId) -> bool {
        if !self.items(authenticated).iter().any(|item| item.id() == id) {
            return false;
        }

        self.selection.toggle(id);

        true
    }

    pub(super) fn select_all(&mut self, authenticated: bool, selected: bool) {
        let items = if authenticated {
            self.cart
                .as_ref()
                .map(|cart| cart.items.as_slice())
                .unwrap_or_default()
        } else {
            self.guest_items.items()
        };

        self.selection.select_all(items, selected);
    }

    /// Drops both collections and the selection, keeping loading state.
    pub(super) fn reset(&mut self) {
        *self = Self {
            in_flight: self.in_flight,
            ..Self::default()
        };
    }
}

/// Marks a remote operation as in flight until dropped.
///
/// Dropping on success, error or cancellation all clear the mark.
pub(super) struct LoadingGuard<'a> {
    state: &'a watch::Sender<CartState>,
}

impl<'a> LoadingGuard<'a> {
    pub(super) fn start(state: &'a watch::Sender<CartState>) -> Self {
        state.send_modify(|state| state.in_flight += 1);

        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .send_modify(|state| state.in_flight = state.in_flight.saturating_sub(1));
    }
}
