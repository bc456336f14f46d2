//! PostgreSQL storage backend using sqlx.
//!
//! Provides [`PostgresStore`], a `sqlx::PgPool`-backed implementation of the
//! three store traits.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! factura = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! Three tables: `customers` (read-only here), `invoices` with a foreign
//! key on `customer_id`, and `revenue`. The listing query joins invoices
//! with customers and matches the free-text filter with ILIKE across the
//! name, email, amount, date and status columns.

use crate::core::service::{CustomerStore, InvoiceStore, RevenueStore};
use crate::model::{
    Customer, Invoice, InvoiceChanges, InvoiceRow, InvoiceStatus, InvoiceTotals, NewInvoice,
    Revenue,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required tables and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            image_url VARCHAR(255) NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create customers table: {}", e))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS invoices (
            id UUID PRIMARY KEY,
            customer_id UUID NOT NULL REFERENCES customers(id),
            amount BIGINT NOT NULL,
            status VARCHAR(255) NOT NULL,
            date DATE NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create invoices table: {}", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_invoices_date ON invoices (date DESC)")
        .execute(pool)
        .await
        .map_err(|e| anyhow!("Failed to create invoices date index: {}", e))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS revenue (
            month VARCHAR(4) NOT NULL UNIQUE,
            revenue BIGINT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create revenue table: {}", e))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// PostgresStore
// ---------------------------------------------------------------------------

/// Store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// use factura::storage::postgres::{self, PostgresStore};
///
/// let store = PostgresStore::connect("postgres://localhost/factura").await?;
/// postgres::ensure_schema(store.pool()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with a bounded pool.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| anyhow!("Failed to connect to PostgreSQL: {}", e))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn parse_reference(reference: &str) -> Result<Uuid> {
        Uuid::parse_str(reference)
            .map_err(|_| anyhow!("invalid customer reference: '{}'", reference))
    }

    fn parse_status(status: &str) -> Result<InvoiceStatus> {
        InvoiceStatus::parse(status)
            .ok_or_else(|| anyhow!("unexpected status value in store: '{}'", status))
    }

    fn row_from_tuple(
        (id, customer_id, name, email, image_url, date, amount, status): (
            Uuid,
            Uuid,
            String,
            String,
            String,
            NaiveDate,
            i64,
            String,
        ),
    ) -> Result<InvoiceRow> {
        Ok(InvoiceRow {
            id,
            customer_id,
            name,
            email,
            image_url,
            date,
            amount,
            status: Self::parse_status(&status)?,
        })
    }
}

/// Columns of the joined listing query, in [`PostgresStore::row_from_tuple`] order.
const ROW_COLUMNS: &str = "invoices.id, invoices.customer_id, customers.name, customers.email, \
     customers.image_url, invoices.date, invoices.amount, invoices.status";

/// Free-text match across customer and invoice columns.
const ROW_FILTER: &str = "customers.name ILIKE $1 OR \
     customers.email ILIKE $1 OR \
     invoices.amount::text ILIKE $1 OR \
     invoices.date::text ILIKE $1 OR \
     invoices.status ILIKE $1";

#[async_trait]
impl InvoiceStore for PostgresStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice> {
        let id = Uuid::new_v4();
        let customer_id = Self::parse_reference(&invoice.customer_id)?;

        sqlx::query(
            "INSERT INTO invoices (id, customer_id, amount, status, date) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(customer_id)
        .bind(invoice.amount)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert invoice: {}", e))?;

        Ok(Invoice {
            id,
            customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        })
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>> {
        let row = sqlx::query_as::<_, (Uuid, Uuid, i64, String, NaiveDate)>(
            "SELECT id, customer_id, amount, status, date FROM invoices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to get invoice: {}", e))?;

        match row {
            Some((id, customer_id, amount, status, date)) => Ok(Some(Invoice {
                id,
                customer_id,
                amount,
                status: Self::parse_status(&status)?,
                date,
            })),
            None => Ok(None),
        }
    }

    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64> {
        let customer_id = Self::parse_reference(&changes.customer_id)?;

        let result = sqlx::query(
            "UPDATE invoices SET customer_id = $1, amount = $2, status = $3 WHERE id = $4",
        )
        .bind(customer_id)
        .bind(changes.amount)
        .bind(changes.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to update invoice: {}", e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete invoice: {}", e))?;

        Ok(result.rows_affected())
    }

    async fn list_filtered(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<InvoiceRow>> {
        let pattern = format!("%{}%", query);
        let sql = format!(
            "SELECT {ROW_COLUMNS} \
             FROM invoices JOIN customers ON invoices.customer_id = customers.id \
             WHERE {ROW_FILTER} \
             ORDER BY invoices.date DESC \
             LIMIT $2 OFFSET $3"
        );

        let rows = sqlx::query_as::<
            _,
            (Uuid, Uuid, String, String, String, NaiveDate, i64, String),
        >(&sql)
        .bind(&pattern)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list invoices: {}", e))?;

        rows.into_iter().map(Self::row_from_tuple).collect()
    }

    async fn count_filtered(&self, query: &str) -> Result<u64> {
        let pattern = format!("%{}%", query);
        let sql = format!(
            "SELECT COUNT(*) \
             FROM invoices JOIN customers ON invoices.customer_id = customers.id \
             WHERE {ROW_FILTER}"
        );

        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count invoices: {}", e))?;

        Ok(count as u64)
    }

    async fn latest(&self, limit: usize) -> Result<Vec<InvoiceRow>> {
        let sql = format!(
            "SELECT {ROW_COLUMNS} \
             FROM invoices JOIN customers ON invoices.customer_id = customers.id \
             ORDER BY invoices.date DESC \
             LIMIT $1"
        );

        let rows = sqlx::query_as::<
            _,
            (Uuid, Uuid, String, String, String, NaiveDate, i64, String),
        >(&sql)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list latest invoices: {}", e))?;

        rows.into_iter().map(Self::row_from_tuple).collect()
    }

    async fn totals(&self) -> Result<InvoiceTotals> {
        let (count, paid, pending): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
             COALESCE(SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END), 0), \
             COALESCE(SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END), 0) \
             FROM invoices",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to aggregate invoices: {}", e))?;

        Ok(InvoiceTotals {
            count: count as u64,
            paid,
            pending,
        })
    }
}

#[async_trait]
impl CustomerStore for PostgresStore {
    async fn list(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query_as::<_, (Uuid, String, String, String)>(
            "SELECT id, name, email, image_url FROM customers ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list customers: {}", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, name, email, image_url)| Customer {
                id,
                name,
                email,
                image_url,
            })
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count customers: {}", e))?;

        Ok(count as u64)
    }
}

#[async_trait]
impl RevenueStore for PostgresStore {
    async fn monthly(&self) -> Result<Vec<Revenue>> {
        let rows = sqlx::query_as::<_, (String, i64)>("SELECT month, revenue FROM revenue")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch revenue: {}", e))?;

        Ok(rows
            .into_iter()
            .map(|(month, revenue)| Revenue { month, revenue })
            .collect())
    }
}
