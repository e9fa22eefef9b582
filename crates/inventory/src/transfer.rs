//! Stock transfer between warehouse records.
//!
//! A transfer debits the source record and credits the record holding the same
//! sku in the destination warehouse, opening that record when it does not exist
//! yet. Planning is pure: stores resolve the records, call [`plan_transfer`], and
//! persist both halves of the returned [`TransferPlan`] in one atomic write.

use stockboard_core::{DomainError, DomainResult, ProductId, WarehouseTag};

use crate::product::Product;

/// Command: move `quantity` units of the source record's sku from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferStock {
    pub product_id: ProductId,
    pub from: WarehouseTag,
    pub to: WarehouseTag,
    pub quantity: u32,
}

impl TransferStock {
    /// Validate raw input before any record is looked up.
    pub fn new(product_id: &str, from: &str, to: &str, quantity: i64) -> DomainResult<Self> {
        let product_id = ProductId::parse(product_id)?;
        let from = WarehouseTag::parse(from)?;
        let to = WarehouseTag::parse(to)?;

        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| DomainError::validation("quantity is too large"))?;

        if from == to {
            return Err(DomainError::validation(
                "source and destination warehouse must differ",
            ));
        }

        Ok(Self {
            product_id,
            from,
            to,
            quantity,
        })
    }
}

/// What the store found where the destination record should live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationSlot<'a> {
    /// A record for (sku, destination warehouse) already exists.
    Existing(&'a Product),
    /// No record exists and the synthesized id is free.
    Vacant,
    /// The synthesized id belongs to a record of another sku or warehouse.
    Taken(&'a Product),
}

impl<'a> DestinationSlot<'a> {
    /// Combine the two lookups a store performs: by (sku, warehouse) and by the
    /// synthesized destination id.
    ///
    /// The id lookup may see a record the location lookup missed (a row
    /// committed by a concurrent transfer after the location snapshot was
    /// taken). When that record holds `sku` in `to` it is the destination.
    pub fn resolve(
        by_location: Option<&'a Product>,
        by_id: Option<&'a Product>,
        sku: &str,
        to: &WarehouseTag,
    ) -> Self {
        match (by_location, by_id) {
            (Some(existing), _) => DestinationSlot::Existing(existing),
            (None, Some(found)) if found.sku() == sku && found.warehouse() == to => {
                DestinationSlot::Existing(found)
            }
            (None, Some(other)) => DestinationSlot::Taken(other),
            (None, None) => DestinationSlot::Vacant,
        }
    }
}

/// Both records as they must look after the transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub source: Product,
    pub destination: Product,
    pub destination_created: bool,
}

/// Decide the outcome of a transfer without touching storage.
///
/// Checks run in order: warehouse match, stock availability, destination.
/// Any failure means nothing may be written.
pub fn plan_transfer(
    cmd: &TransferStock,
    source: &Product,
    destination: DestinationSlot<'_>,
) -> DomainResult<TransferPlan> {
    if source.id_typed() != &cmd.product_id {
        return Err(DomainError::invalid_state("product_id mismatch"));
    }

    if source.warehouse() != &cmd.from {
        return Err(DomainError::invalid_state(format!(
            "product {} is stocked in '{}', not '{}'",
            source.id_typed(),
            source.warehouse(),
            cmd.from
        )));
    }

    if source.stock() < cmd.quantity {
        return Err(DomainError::insufficient_stock(source.stock(), cmd.quantity));
    }

    let debited = source.with_stock(source.stock() - cmd.quantity);

    let (credited, destination_created) = match destination {
        DestinationSlot::Existing(existing) => {
            if existing.sku() != source.sku() || existing.warehouse() != &cmd.to {
                return Err(DomainError::invalid_state(
                    "destination record does not hold the transferred sku",
                ));
            }
            let stock = existing.stock().checked_add(cmd.quantity).ok_or_else(|| {
                DomainError::invalid_state("destination stock would overflow")
            })?;
            (existing.with_stock(stock), false)
        }
        DestinationSlot::Vacant => {
            let opened = Product::new(
                ProductId::for_transfer_destination(source.sku(), &cmd.to),
                source.name(),
                source.sku(),
                cmd.to.clone(),
                cmd.quantity,
                source.demand(),
            )?;
            (opened, true)
        }
        DestinationSlot::Taken(other) => {
            return Err(DomainError::invalid_state(format!(
                "destination id {} already belongs to sku {} in '{}'",
                other.id_typed(),
                other.sku(),
                other.warehouse()
            )));
        }
    };

    Ok(TransferPlan {
        source: debited,
        destination: credited,
        destination_created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StockStatus;

    fn wh(tag: &str) -> WarehouseTag {
        WarehouseTag::parse(tag).unwrap()
    }

    fn product(id: &str, sku: &str, warehouse: &str, stock: u32, demand: u32) -> Product {
        Product::new(
            ProductId::parse(id).unwrap(),
            "Widget",
            sku,
            wh(warehouse),
            stock,
            demand,
        )
        .unwrap()
    }

    #[test]
    fn command_rejects_non_positive_quantity() {
        for qty in [0, -5] {
            let err = TransferStock::new("P-1", "Warehouse A", "Warehouse B", qty).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn command_rejects_same_warehouse() {
        let err = TransferStock::new("P-1", "Warehouse A", "Warehouse A", 3).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn command_rejects_blank_destination() {
        let err = TransferStock::new("P-1", "Warehouse A", " ", 3).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn transfer_to_vacant_warehouse_opens_record() {
        let source = product("P-1", "SKU-1", "Warehouse A", 100, 40);
        let cmd = TransferStock::new("P-1", "Warehouse A", "Warehouse B", 30).unwrap();

        let plan = plan_transfer(&cmd, &source, DestinationSlot::Vacant).unwrap();

        assert!(plan.destination_created);
        assert_eq!(plan.source.stock(), 70);
        assert_eq!(plan.destination.id_typed().as_str(), "SKU-1-Warehouse B");
        assert_eq!(plan.destination.stock(), 30);
        assert_eq!(plan.destination.demand(), 40);
        assert_eq!(plan.destination.sku(), "SKU-1");
        assert_eq!(plan.destination.warehouse(), &wh("Warehouse B"));
    }

    #[test]
    fn transfer_to_existing_record_only_increments_stock() {
        let source = product("P-1", "SKU-1", "Warehouse A", 100, 40);
        let dest = product("P-9", "SKU-1", "Warehouse B", 5, 77);
        let cmd = TransferStock::new("P-1", "Warehouse A", "Warehouse B", 30).unwrap();

        let plan = plan_transfer(&cmd, &source, DestinationSlot::Existing(&dest)).unwrap();

        assert!(!plan.destination_created);
        assert_eq!(plan.destination.id_typed().as_str(), "P-9");
        assert_eq!(plan.destination.stock(), 35);
        assert_eq!(plan.destination.demand(), 77);
    }

    #[test]
    fn insufficient_stock_is_rejected() {
        let source = product("P-1", "SKU-1", "Warehouse A", 10, 0);
        let cmd = TransferStock::new("P-1", "Warehouse A", "Warehouse B", 11).unwrap();

        let err = plan_transfer(&cmd, &source, DestinationSlot::Vacant).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock(10, 11));
    }

    #[test]
    fn warehouse_mismatch_is_invalid_state() {
        let source = product("P-1", "SKU-1", "Warehouse A", 10, 0);
        let cmd = TransferStock::new("P-1", "Warehouse C", "Warehouse B", 1).unwrap();

        let err = plan_transfer(&cmd, &source, DestinationSlot::Vacant).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[test]
    fn warehouse_mismatch_wins_over_insufficient_stock() {
        let source = product("P-1", "SKU-1", "Warehouse A", 1, 0);
        let cmd = TransferStock::new("P-1", "Warehouse C", "Warehouse B", 50).unwrap();

        let err = plan_transfer(&cmd, &source, DestinationSlot::Vacant).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[test]
    fn taken_destination_id_is_invalid_state() {
        let source = product("P-1", "SKU-1", "Warehouse A", 10, 0);
        let squatter = product("SKU-1-Warehouse B", "SKU-2", "Warehouse C", 1, 1);
        let cmd = TransferStock::new("P-1", "Warehouse A", "Warehouse B", 1).unwrap();

        let err = plan_transfer(&cmd, &source, DestinationSlot::Taken(&squatter)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[test]
    fn draining_the_source_leaves_it_critical_when_demand_remains() {
        let source = product("P-1", "SKU-1", "Warehouse A", 10, 4);
        let cmd = TransferStock::new("P-1", "Warehouse A", "Warehouse B", 10).unwrap();

        let plan = plan_transfer(&cmd, &source, DestinationSlot::Vacant).unwrap();
        assert_eq!(plan.source.stock(), 0);
        assert_eq!(plan.source.status(), StockStatus::Critical);
    }

    #[test]
    fn resolve_prefers_location_match() {
        let dest = product("P-9", "SKU-1", "Warehouse B", 5, 7);
        let other = product("SKU-1-Warehouse B", "SKU-2", "Warehouse C", 1, 1);

        let to = wh("Warehouse B");

        assert_eq!(
            DestinationSlot::resolve(Some(&dest), Some(&other), "SKU-1", &to),
            DestinationSlot::Existing(&dest)
        );
        assert_eq!(
            DestinationSlot::resolve(None, Some(&other), "SKU-1", &to),
            DestinationSlot::Taken(&other)
        );
        assert_eq!(
            DestinationSlot::resolve(None, None, "SKU-1", &to),
            DestinationSlot::Vacant
        );
    }

    #[test]
    fn id_hit_for_same_sku_and_warehouse_is_existing() {
        // Opened by an earlier transfer but missed by the location lookup.
        let source = product("P-1", "SKU-1", "Warehouse A", 100, 40);
        let opened = product("SKU-1-Warehouse B", "SKU-1", "Warehouse B", 30, 40);
        let cmd = TransferStock::new("P-1", "Warehouse A", "Warehouse B", 20).unwrap();

        let slot = DestinationSlot::resolve(None, Some(&opened), "SKU-1", &cmd.to);
        assert_eq!(slot, DestinationSlot::Existing(&opened));

        let plan = plan_transfer(&cmd, &source, slot).unwrap();
        assert!(!plan.destination_created);
        assert_eq!(plan.source.stock(), 80);
        assert_eq!(plan.destination.id_typed().as_str(), "SKU-1-Warehouse B");
        assert_eq!(plan.destination.stock(), 50);
    }

    #[test]
    fn id_hit_in_another_warehouse_stays_taken() {
        let same_sku_elsewhere = product("SKU-1-Warehouse B", "SKU-1", "Warehouse C", 3, 3);
        let to = wh("Warehouse B");
        assert_eq!(
            DestinationSlot::resolve(None, Some(&same_sku_elsewhere), "SKU-1", &to),
            DestinationSlot::Taken(&same_sku_elsewhere)
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a successful transfer conserves the sku's total stock.
            #[test]
            fn transfer_conserves_total_stock(
                source_stock in 0u32..100_000,
                dest_stock in 0u32..100_000,
                qty in 1i64..200_000,
                existing in any::<bool>(),
            ) {
                let source = product("P-1", "SKU-1", "Warehouse A", source_stock, 10);
                let dest = product("P-2", "SKU-1", "Warehouse B", dest_stock, 20);
                let cmd = TransferStock::new("P-1", "Warehouse A", "Warehouse B", qty).unwrap();
                let slot = if existing { DestinationSlot::Existing(&dest) } else { DestinationSlot::Vacant };
                let before = u64::from(source_stock) + if existing { u64::from(dest_stock) } else { 0 };

                match plan_transfer(&cmd, &source, slot) {
                    Ok(plan) => {
                        let after = u64::from(plan.source.stock()) + u64::from(plan.destination.stock());
                        prop_assert_eq!(before, after);
                        prop_assert_eq!(plan.destination_created, !existing);
                    }
                    Err(e) => {
                        prop_assert!(qty > i64::from(source_stock));
                        prop_assert_eq!(e, DomainError::insufficient_stock(source_stock, qty as u32));
                    }
                }
            }
        }
    }
}
