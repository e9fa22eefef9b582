//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! | SQLx error | PostgreSQL code | Mapped to |
//! |------------|-----------------|-----------|
//! | Database (unique violation) | `23505` | `DomainError::InvalidState` |
//! | Database (check violation) | `23514` | `DomainError::Validation` |
//! | Database (other) | any | `StoreError::Backend` |
//! | PoolClosed / Io / other | n/a | `StoreError::Backend` |
//!
//! ## Transfers
//!
//! A transfer runs in one transaction. All rows of the transferred sku are
//! locked with `SELECT ... FOR UPDATE` in id order, so concurrent transfers of
//! the same sku serialize instead of deadlocking. Both writes commit together.

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::instrument;

use stockboard_core::{DomainError, Entity, ProductId, WarehouseTag};
use stockboard_inventory::{
    DestinationSlot, Product, TransferPlan, TransferStock, UpdateDemand, plan_transfer,
};

use crate::error::{InventoryError, InventoryResult, StoreError};
use crate::store::ProductStore;

const PRODUCT_COLUMNS: &str = "id, name, sku, warehouse, stock, demand";

/// Postgres-backed product store.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a small connection pool against `database_url`.
    pub async fn connect(database_url: &str) -> InventoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table when it does not exist.
    pub async fn migrate(&self) -> InventoryResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id        TEXT PRIMARY KEY,
                name      TEXT NOT NULL,
                sku       TEXT NOT NULL,
                warehouse TEXT NOT NULL,
                stock     INTEGER NOT NULL CHECK (stock >= 0),
                demand    INTEGER NOT NULL CHECK (demand >= 0),
                UNIQUE (sku, warehouse)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self))]
    async fn list(&self) -> InventoryResult<Vec<Product>> {
        let rows = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_products", e))?;

        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &ProductId) -> InventoryResult<Option<Product>> {
        let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_product", e))?;

        row.as_ref().map(row_to_product).transpose()
    }

    #[instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn insert(&self, product: Product) -> InventoryResult<()> {
        insert_product(&self.pool, &product, "insert_product").await
    }

    #[instrument(skip(self), fields(product_id = %cmd.product_id))]
    async fn update_demand(&self, cmd: &UpdateDemand) -> InventoryResult<Product> {
        let row = sqlx::query(&format!(
            "UPDATE products SET demand = $2 WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(cmd.product_id.as_str())
        .bind(to_db_int(cmd.demand)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_demand", e))?;

        match row {
            Some(row) => row_to_product(&row),
            None => Err(DomainError::not_found(cmd.product_id.as_str()).into()),
        }
    }

    #[instrument(skip(self), fields(product_id = %cmd.product_id, qty = cmd.quantity))]
    async fn transfer(&self, cmd: &TransferStock) -> InventoryResult<TransferPlan> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        // Dropping `tx` on any early return rolls the transaction back.
        let sku: String = sqlx::query("SELECT sku FROM products WHERE id = $1")
            .bind(cmd.product_id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("load_source", e))?
            .ok_or_else(|| DomainError::not_found(cmd.product_id.as_str()))?
            .try_get("sku")
            .map_err(|e| map_sqlx_error("load_source", e))?;

        let locked = lock_sku(&mut tx, &sku).await?;
        let source = locked
            .iter()
            .find(|p| p.id() == &cmd.product_id)
            .ok_or_else(|| DomainError::not_found(cmd.product_id.as_str()))?;

        let destination_id = ProductId::for_transfer_destination(&sku, &cmd.to);
        let by_location = locked.iter().find(|p| p.warehouse() == &cmd.to);
        let by_id = match by_location {
            Some(_) => None,
            None => fetch_for_update(&mut tx, &destination_id).await?,
        };

        // `by_id` re-reads with a fresh snapshot, so it also sees a destination
        // row committed by a concurrent transfer after `lock_sku` started.
        let slot = DestinationSlot::resolve(by_location, by_id.as_ref(), &sku, &cmd.to);
        let plan = plan_transfer(cmd, source, slot)?;

        write_stock(&mut tx, &plan.source).await?;
        if plan.destination_created {
            insert_product(&mut *tx, &plan.destination, "insert_destination").await?;
        } else {
            write_stock(&mut tx, &plan.destination).await?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(plan)
    }
}

async fn lock_sku(tx: &mut Transaction<'_, Postgres>, sku: &str) -> InventoryResult<Vec<Product>> {
    let rows = sqlx::query(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = $1 ORDER BY id FOR UPDATE"
    ))
    .bind(sku)
    .fetch_all(&mut **tx)
    .await
    .map_err(|e| map_sqlx_error("lock_sku", e))?;

    rows.iter().map(row_to_product).collect()
}

async fn fetch_for_update(
    tx: &mut Transaction<'_, Postgres>,
    id: &ProductId,
) -> InventoryResult<Option<Product>> {
    let row = sqlx::query(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
    ))
    .bind(id.as_str())
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| map_sqlx_error("lock_destination_id", e))?;

    row.as_ref().map(row_to_product).transpose()
}

async fn write_stock(tx: &mut Transaction<'_, Postgres>, product: &Product) -> InventoryResult<()> {
    sqlx::query("UPDATE products SET stock = $2 WHERE id = $1")
        .bind(product.id().as_str())
        .bind(to_db_int(product.stock())?)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("write_stock", e))?;
    Ok(())
}

async fn insert_product<'e, E>(executor: E, product: &Product, operation: &str) -> InventoryResult<()>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO products (id, name, sku, warehouse, stock, demand)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(product.id().as_str())
    .bind(product.name())
    .bind(product.sku())
    .bind(product.warehouse().as_str())
    .bind(to_db_int(product.stock())?)
    .bind(to_db_int(product.demand())?)
    .execute(executor)
    .await
    .map_err(|e| map_sqlx_error(operation, e))?;
    Ok(())
}

fn to_db_int(value: u32) -> InventoryResult<i32> {
    i32::try_from(value)
        .map_err(|_| DomainError::validation(format!("{value} exceeds the storable range")).into())
}

fn row_to_product(row: &PgRow) -> InventoryResult<Product> {
    let get_str = |col: &str| -> InventoryResult<String> {
        row.try_get::<String, _>(col)
            .map_err(|e| StoreError::Corrupt(format!("column {col}: {e}")).into())
    };
    let get_count = |col: &str| -> InventoryResult<u32> {
        let v = row
            .try_get::<i32, _>(col)
            .map_err(|e| StoreError::Corrupt(format!("column {col}: {e}")))?;
        u32::try_from(v).map_err(|_| StoreError::Corrupt(format!("column {col} is negative: {v}")).into())
    };

    let corrupt = |e: DomainError| InventoryError::from(StoreError::Corrupt(e.to_string()));

    Product::new(
        ProductId::parse(get_str("id")?).map_err(corrupt)?,
        get_str("name")?,
        get_str("sku")?,
        WarehouseTag::parse(get_str("warehouse")?).map_err(corrupt)?,
        get_count("stock")?,
        get_count("demand")?,
    )
    .map_err(corrupt)
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> InventoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => DomainError::invalid_state(msg).into(),
                Some("23514") => DomainError::validation(msg).into(),
                _ => StoreError::Backend(msg).into(),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Backend(format!("connection pool closed in {}", operation)).into()
        }
        _ => StoreError::Backend(format!("sqlx error in {}: {}", operation, err)).into(),
    }
}
