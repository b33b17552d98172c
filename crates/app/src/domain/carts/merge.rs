//! Guest cart merge
//!
//! Uploads the lines a visitor collected before signing in into their server
//! cart. Runs at most once per load, and only while the guest slot holds
//! lines.

use futures::future::join_all;
use imports::prelude::GuestItems;
use tracing::{info, warn};

use crate::{
    guest::GuestStore,
    remote::{AddCartItem, RemoteCartService},
};

use super::CartError;

/// Outcome of a merge attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Lines accepted by the cart service
    pub uploaded: usize,

    /// Lines the cart service rejected, kept for the next load
    pub retained: GuestItems,

    /// Whether the guest slot was unreadable and discarded
    pub abandoned: bool,

    /// Whether the guest slot now holds only `retained`.
    ///
    /// When `false` the slot still lists uploaded lines and the next merge
    /// sends them again.
    pub persisted: bool,
}

/// Uploads every guest line concurrently, then rewrites the guest slot with
/// the lines that failed.
///
/// Returns `None` when there was nothing to merge. Lines are uploaded as
/// they are stored; the cart service consolidates repeated products.
pub(crate) async fn merge_guest_cart(
    guest: &dyn GuestStore,
    remote: &dyn RemoteCartService,
) -> Option<MergeReport> {
    let payload = match guest.load() {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(error) => {
            warn!(%error, "failed to read guest cart, skipping merge");
            return None;
        }
    };

    let items = match GuestItems::from_json(&payload) {
        Ok(items) => items,
        Err(error) => {
            warn!(%error, "discarding unreadable guest cart");

            let persisted = match guest.erase() {
                Ok(()) => true,
                Err(error) => {
                    warn!(%error, "failed to erase unreadable guest cart");
                    false
                }
            };

            return Some(MergeReport {
                abandoned: true,
                persisted,
                ..MergeReport::default()
            });
        }
    };

    if items.is_empty() {
        return None;
    }

    let results = join_all(
        items
            .items()
            .iter()
            .map(|item| remote.add_item(AddCartItem::from(item))),
    )
    .await;

    let mut uploaded = 0;
    let mut failed = Vec::new();

    for (item, result) in items.into_iter().zip(results) {
        match result {
            Ok(_) => uploaded += 1,
            Err(error) => {
                warn!(
                    item_id = %item.id(),
                    product_id = %item.product_id(),
                    %error,
                    "failed to merge guest line"
                );
                failed.push(item);
            }
        }
    }

    let retained = GuestItems::from(failed);

    let persisted = match persist_retained(guest, &retained) {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "failed to update guest cart after merge");
            false
        }
    };

    info!(uploaded, retained = retained.len(), persisted, "merged guest cart");

    Some(MergeReport {
        uploaded,
        retained,
        abandoned: false,
        persisted,
    })
}

fn persist_retained(guest: &dyn GuestStore, retained: &GuestItems) -> Result<(), CartError> {
    if retained.is_empty() {
        guest.erase()?;
    } else {
        guest.save(&retained.to_json()?)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use imports::prelude::{ProductId, Variant};
    use testresult::TestResult;

    use crate::{
        guest::{GuestStoreError, MemoryGuestStore, MockGuestStore},
        remote::{MockRemoteCartService, RemoteCartError},
        test::helpers::{guest_payload, product, server_cart},
    };

    use super::*;

    #[tokio::test]
    async fn empty_slot_is_not_merged() {
        let guest = MemoryGuestStore::new();
        let mut remote = MockRemoteCartService::new();
        remote.expect_add_item().never();

        let report = merge_guest_cart(&guest, &remote).await;

        assert_eq!(report, None);
    }

    #[tokio::test]
    async fn empty_array_is_not_merged() {
        let guest = MemoryGuestStore::with_payload("[]");
        let mut remote = MockRemoteCartService::new();
        remote.expect_add_item().never();

        let report = merge_guest_cart(&guest, &remote).await;

        assert_eq!(report, None);
    }

    #[tokio::test]
    async fn uploads_every_line_and_erases_the_slot() -> TestResult {
        let guest =
            MemoryGuestStore::with_payload(guest_payload(&[("p1", 100, 2), ("p2", 50, 1)])?);
        let mut remote = MockRemoteCartService::new();

        remote
            .expect_add_item()
            .times(2)
            .returning(|_| Ok(server_cart(Vec::new())));

        let report = merge_guest_cart(&guest, &remote)
            .await
            .ok_or("merge should run")?;

        assert_eq!(report.uploaded, 2);
        assert!(report.retained.is_empty(), "nothing should be retained");
        assert!(report.persisted, "slot should be erased");
        assert_eq!(guest.payload(), None);

        Ok(())
    }

    #[tokio::test]
    async fn failed_uploads_stay_in_the_slot() -> TestResult {
        let guest =
            MemoryGuestStore::with_payload(guest_payload(&[("p1", 100, 2), ("p2", 50, 1)])?);
        let mut remote = MockRemoteCartService::new();

        remote.expect_add_item().times(2).returning(|item| {
            if item.product_id == ProductId::from("p2") {
                Err(RemoteCartError::Validation("out of stock".to_string()))
            } else {
                Ok(server_cart(Vec::new()))
            }
        });

        let report = merge_guest_cart(&guest, &remote)
            .await
            .ok_or("merge should run")?;

        assert_eq!(report.uploaded, 1);
        assert_eq!(report.retained.len(), 1);

        let stored = GuestItems::from_json(&guest.payload().ok_or("slot should be kept")?)?;
        let line = stored.items().first().ok_or("one line should remain")?;

        assert_eq!(line.product_id(), &ProductId::from("p2"));
        assert_eq!(line.quantity(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn uploads_carry_quantity_and_variant() -> TestResult {
        let mut items = GuestItems::new();
        items.add(
            product("p1", 100).snapshot()?,
            3,
            Variant::new(Some("M".to_string()), None),
        )?;

        let guest = MemoryGuestStore::with_payload(items.to_json()?);
        let mut remote = MockRemoteCartService::new();

        remote
            .expect_add_item()
            .withf(|item| {
                item.product_id == ProductId::from("p1")
                    && item.quantity == 3
                    && item.variant.size.as_deref() == Some("M")
            })
            .times(1)
            .returning(|_| Ok(server_cart(Vec::new())));

        let report = merge_guest_cart(&guest, &remote).await;

        assert_eq!(report.map(|report| report.uploaded), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn unreadable_slot_is_abandoned() {
        let mut guest = MockGuestStore::new();
        guest
            .expect_load()
            .returning(|| Ok(Some("{not json".to_string())));
        guest.expect_erase().times(1).returning(|| Ok(()));
        guest.expect_save().never();

        let mut remote = MockRemoteCartService::new();
        remote.expect_add_item().never();

        let report = merge_guest_cart(&guest, &remote).await;

        assert_eq!(
            report,
            Some(MergeReport {
                abandoned: true,
                persisted: true,
                ..MergeReport::default()
            })
        );
    }

    #[tokio::test]
    async fn save_failure_still_reports_the_merge() -> TestResult {
        let payload = guest_payload(&[("p1", 100, 1)])?;

        let mut guest = MockGuestStore::new();
        guest
            .expect_load()
            .returning(move || Ok(Some(payload.clone())));
        guest.expect_save().returning(|_| {
            Err(GuestStoreError::Write {
                path: "guest_cart.json".into(),
                source: std::io::Error::other("disk full"),
            })
        });

        let mut remote = MockRemoteCartService::new();
        remote
            .expect_add_item()
            .returning(|_| Err(RemoteCartError::Unauthorized));

        let report = merge_guest_cart(&guest, &remote)
            .await
            .ok_or("merge should run")?;

        assert_eq!(report.uploaded, 0);
        assert_eq!(report.retained.len(), 1);
        assert!(!report.persisted, "slot could not be rewritten");

        Ok(())
    }

    #[tokio::test]
    async fn failed_erase_after_upload_is_reported() -> TestResult {
        let payload = guest_payload(&[("p1", 100, 1)])?;

        let mut guest = MockGuestStore::new();
        guest
            .expect_load()
            .returning(move || Ok(Some(payload.clone())));
        guest.expect_erase().times(1).returning(|| {
            Err(GuestStoreError::Write {
                path: "guest_cart.json".into(),
                source: std::io::Error::other("read-only"),
            })
        });

        let mut remote = MockRemoteCartService::new();
        remote
            .expect_add_item()
            .returning(|_| Ok(server_cart(Vec::new())));

        let report = merge_guest_cart(&guest, &remote)
            .await
            .ok_or("merge should run")?;

        assert_eq!(report.uploaded, 1);
        assert!(report.retained.is_empty(), "the upload succeeded");
        assert!(!report.persisted, "slot still lists the uploaded line");

        Ok(())
    }
}
