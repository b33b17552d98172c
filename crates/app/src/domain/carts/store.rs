//! Cart store.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use imports::prelude::{
    Cart, CartItem, CartItemId, GuestItems, GuestItemsError, Product, Totals, Variant,
};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::{
    auth::AuthState,
    guest::GuestStore,
    remote::{AddCartItem, RemoteCartError, RemoteCartService},
};

use super::{
    CartError,
    merge::merge_guest_cart,
    state::{CartState, LoadingGuard},
};

/// Single source of truth for the shopper's cart.
///
/// Signed-in shoppers work against the server cart; visitors work against
/// guest lines persisted in the guest store. The mode is read from
/// [`AuthState`] on every call. Views observe changes through
/// [`CartStore::subscribe`].
pub struct CartStore {
    remote: Arc<dyn RemoteCartService>,
    guest: Arc<dyn GuestStore>,
    auth: Arc<dyn AuthState>,
    state: watch::Sender<CartState>,
    /// Serializes guest slot writes; `true` once memory mirrors the slot.
    guest_synced: Mutex<bool>,
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    #[must_use]
    pub fn new(
        remote: Arc<dyn RemoteCartService>,
        guest: Arc<dyn GuestStore>,
        auth: Arc<dyn AuthState>,
    ) -> Self {
        let (state, _) = watch::channel(CartState::default());

        Self {
            remote,
            guest,
            auth,
            state,
            guest_synced: Mutex::new(false),
        }
    }

    /// Load the active cart and select every line.
    ///
    /// Signed in, any guest lines are merged into the server cart first. A
    /// failed load leaves an empty cart rather than an error.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) {
        if self.auth.is_authenticated() {
            self.fetch_server_cart().await;
        } else {
            self.load_guest_cart();
        }
    }

    /// Add `quantity` units of a product. Quantities below one add one.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is incomplete, the line total would
    /// overflow, the cart service rejects the line, or the guest cart cannot
    /// be read or saved.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(
        &self,
        product: &Product,
        quantity: i64,
        variant: Variant,
    ) -> Result<(), CartError> {
        let snapshot = product.snapshot()?;
        let quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);

        if self.auth.is_authenticated() {
            let _loading = LoadingGuard::start(&self.state);

            let cart = self
                .remote
                .add_item(AddCartItem {
                    product_id: snapshot.id,
                    quantity,
                    variant,
                })
                .await?;

            self.apply_cart(cart);
        } else {
            self.mutate_guest(|items| {
                items.add(snapshot, quantity, variant)?;
                Ok(true)
            })?;
        }

        debug!(quantity, "added to cart");

        Ok(())
    }

    /// Remove a line. Unknown ids leave the cart as it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart service rejects the removal or the guest
    /// cart cannot be saved.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, item: &CartItemId) -> Result<(), CartError> {
        if !self.auth.is_authenticated() {
            return self.mutate_guest(|items| Ok(items.remove(item)));
        }

        if self.cart_line(item).is_none() {
            debug!("line not in cart");
            return Ok(());
        }

        let _loading = LoadingGuard::start(&self.state);
        let cart = self.remote.remove_item(item).await?;

        self.apply_cart(cart);

        Ok(())
    }

    /// Set a line's quantity. Zero or below removes the line.
    ///
    /// When the cart service cannot update quantities directly, the line is
    /// removed and added back with the new quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart service rejects the change or the guest
    /// cart cannot be saved.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, item: &CartItemId, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_from_cart(item).await;
        }

        if !self.auth.is_authenticated() {
            return self.mutate_guest(|items| items.set_quantity(item, quantity));
        }

        let Some(line) = self.cart_line(item) else {
            debug!("line not in cart");
            return Ok(());
        };

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let _loading = LoadingGuard::start(&self.state);

        let cart = match self.remote.update_item(item, quantity).await {
            Err(RemoteCartError::Unsupported) => {
                debug!("direct update unsupported, replacing line");

                let cart = self.remote.remove_item(item).await?;
                self.apply_cart(cart);

                self.remote
                    .add_item(AddCartItem {
                        quantity,
                        ..AddCartItem::from(&line)
                    })
                    .await?
            }
            result => result?,
        };

        self.apply_cart(cart);

        Ok(())
    }

    /// Forget every line locally and erase the guest slot.
    ///
    /// The server cart is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the guest slot cannot be erased.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) -> Result<(), CartError> {
        let mut synced = self.lock_guest();

        self.state.send_modify(CartState::reset);

        let erased = self.guest.erase();
        *synced = erased.is_ok();
        erased?;

        debug!("cart cleared");

        Ok(())
    }

    /// Flip a line in or out of the checkout selection.
    pub fn toggle_selection(&self, item: &CartItemId) {
        let authenticated = self.auth.is_authenticated();

        self.state
            .send_if_modified(|state| state.toggle(authenticated, item));
    }

    /// Select every line, or none.
    pub fn select_all(&self, selected: bool) {
        let authenticated = self.auth.is_authenticated();

        self.state
            .send_modify(|state| state.select_all(authenticated, selected));
    }

    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn cart(&self) -> Option<Cart> {
        self.state.borrow().cart.clone()
    }

    #[must_use]
    pub fn guest_items(&self) -> GuestItems {
        self.state.borrow().guest_items.clone()
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state.borrow().item_count
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Lines of the active collection.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        let authenticated = self.auth.is_authenticated();

        self.state.borrow().items(authenticated).to_vec()
    }

    /// Selected lines, as handed to checkout.
    #[must_use]
    pub fn selected_items(&self) -> Vec<CartItem> {
        let authenticated = self.auth.is_authenticated();

        self.state.borrow().selected_items(authenticated)
    }

    /// Order summary for the current selection.
    #[must_use]
    pub fn totals(&self) -> Totals {
        let authenticated = self.auth.is_authenticated();

        self.state.borrow().totals(authenticated)
    }

    async fn fetch_server_cart(&self) {
        let _loading = LoadingGuard::start(&self.state);

        if let Some(report) = merge_guest_cart(self.guest.as_ref(), self.remote.as_ref()).await {
            let mut synced = self.lock_guest();

            if !report.persisted {
                warn!(
                    uploaded = report.uploaded,
                    "guest cart still holds merged lines, the next load uploads them again"
                );
            }

            *synced = report.persisted;
            self.state
                .send_modify(|state| state.guest_items = report.retained);
        }

        match self.remote.get_cart().await {
            Ok(cart) => self.state.send_modify(|state| {
                state.selection.reset_to(&cart.items);
                state.item_count = cart.item_count();
                state.cart = Some(cart);
            }),
            Err(error) => {
                warn!(%error, "failed to load cart, showing it empty");

                self.state.send_modify(|state| {
                    state.cart = None;
                    state.item_count = 0;
                    state.selection.clear();
                });
            }
        }
    }

    fn load_guest_cart(&self) {
        let mut synced = self.lock_guest();

        let items = match self.read_guest_slot() {
            Ok(items) => {
                *synced = true;
                items
            }
            Err(error) => {
                warn!(%error, "failed to read guest cart");
                *synced = false;
                GuestItems::new()
            }
        };

        self.state.send_modify(|state| {
            state.selection.reset_to(items.items());
            state.item_count = items.item_count();
            state.guest_items = items;
        });
    }

    fn cart_line(&self, item: &CartItemId) -> Option<CartItem> {
        self.state
            .borrow()
            .cart
            .as_ref()
            .and_then(|cart| cart.get(item))
            .cloned()
    }

    /// Replace the server cart with a service response.
    fn apply_cart(&self, cart: Cart) {
        self.state.send_modify(|state| {
            let before = state
                .cart
                .as_ref()
                .map(|cart| cart.items.as_slice())
                .unwrap_or_default();

            state.selection.reconcile(before, &cart.items);
            state.item_count = cart.item_count();
            state.cart = Some(cart);
        });
    }

    /// Apply a change to the guest lines, saving them before memory changes.
    ///
    /// The slot is read first if this store has not loaded it yet, so lines
    /// from an earlier session are kept. `mutate` returns whether it changed
    /// anything; unchanged lines are not saved and subscribers are not
    /// notified.
    fn mutate_guest(
        &self,
        mutate: impl FnOnce(&mut GuestItems) -> Result<bool, GuestItemsError>,
    ) -> Result<(), CartError> {
        let mut synced = self.lock_guest();

        if !*synced {
            let stored = self.read_guest_slot()?;

            self.publish_guest_items(stored);
            *synced = true;
        }

        let mut items = self.state.borrow().guest_items.clone();

        if !mutate(&mut items)? {
            return Ok(());
        }

        self.save_guest_items(&items)?;
        self.publish_guest_items(items);

        Ok(())
    }

    /// Reads the guest slot. An unreadable payload counts as no lines.
    fn read_guest_slot(&self) -> Result<GuestItems, CartError> {
        let Some(payload) = self.guest.load()? else {
            return Ok(GuestItems::new());
        };

        Ok(GuestItems::from_json(&payload).unwrap_or_else(|error| {
            warn!(%error, "ignoring unreadable guest cart");
            GuestItems::new()
        }))
    }

    fn publish_guest_items(&self, items: GuestItems) {
        self.state.send_modify(|state| {
            state.selection.reconcile(state.guest_items.items(), items.items());
            state.item_count = items.item_count();
            state.guest_items = items;
        });
    }

    fn lock_guest(&self) -> MutexGuard<'_, bool> {
        self.guest_synced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn save_guest_items(&self, items: &GuestItems) -> Result<(), CartError> {
        self.guest.save(&items.to_json()?)?;

        Ok(())
    }
}
