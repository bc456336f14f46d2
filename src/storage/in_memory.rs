//! In-memory store implementation for testing and development
//!
//! Uses RwLock for thread-safe access. The customer-reference invariant is
//! enforced here the way the relational backend's foreign key does it: an
//! insert or update naming an unknown customer is rejected.

use crate::core::service::{CustomerStore, InvoiceStore, RevenueStore};
use crate::model::{
    Customer, Invoice, InvoiceChanges, InvoiceRow, InvoiceStatus, InvoiceTotals, NewInvoice,
    Revenue,
};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    customers: HashMap<Uuid, Customer>,
    invoices: HashMap<Uuid, Invoice>,
    revenue: Vec<Revenue>,
}

/// In-memory store over the three tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a customer row. Customers are read-only through the service
    /// traits; this is the seeding/test entry point.
    pub fn insert_customer(&self, customer: Customer) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        tables.customers.insert(customer.id, customer);
        Ok(())
    }

    /// Replace the revenue series. Seeding/test entry point.
    pub fn set_revenue(&self, revenue: Vec<Revenue>) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        tables.revenue = revenue;
        Ok(())
    }

    fn resolve_customer(tables: &Tables, reference: &str) -> Result<Uuid> {
        let id = Uuid::parse_str(reference)
            .map_err(|_| anyhow!("invalid customer reference: '{}'", reference))?;
        if !tables.customers.contains_key(&id) {
            bail!("unknown customer reference: '{}'", reference);
        }
        Ok(id)
    }

    /// Joined invoice+customer rows, newest first.
    fn joined_rows(tables: &Tables) -> Vec<InvoiceRow> {
        let mut rows: Vec<InvoiceRow> = tables
            .invoices
            .values()
            .filter_map(|invoice| {
                let customer = tables.customers.get(&invoice.customer_id)?;
                Some(InvoiceRow {
                    id: invoice.id,
                    customer_id: invoice.customer_id,
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    image_url: customer.image_url.clone(),
                    date: invoice.date,
                    amount: invoice.amount,
                    status: invoice.status,
                })
            })
            .collect();
        // Date descending; id as tie-breaker so pagination is stable
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        rows
    }

    fn matches(row: &InvoiceRow, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        row.name.to_lowercase().contains(&needle)
            || row.email.to_lowercase().contains(&needle)
            || row.amount.to_string().contains(&needle)
            || row.date.to_string().contains(&needle)
            || row.status.as_str().contains(&needle)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let customer_id = Self::resolve_customer(&tables, &invoice.customer_id)?;
        let created = Invoice {
            id: Uuid::new_v4(),
            customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        };
        tables.invoices.insert(created.id, created.clone());

        Ok(created)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(tables.invoices.get(id).cloned())
    }

    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !tables.invoices.contains_key(id) {
            return Ok(0);
        }
        let customer_id = Self::resolve_customer(&tables, &changes.customer_id)?;

        let invoice = tables
            .invoices
            .get_mut(id)
            .ok_or_else(|| anyhow!("invoice disappeared during update"))?;
        invoice.customer_id = customer_id;
        invoice.amount = changes.amount;
        invoice.status = changes.status;

        Ok(1)
    }

    async fn delete(&self, id: &Uuid) -> Result<u64> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(if tables.invoices.remove(id).is_some() {
            1
        } else {
            0
        })
    }

    async fn list_filtered(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<InvoiceRow>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(Self::joined_rows(&tables)
            .into_iter()
            .filter(|row| Self::matches(row, query))
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count_filtered(&self, query: &str) -> Result<u64> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(Self::joined_rows(&tables)
            .iter()
            .filter(|row| Self::matches(row, query))
            .count() as u64)
    }

    async fn latest(&self, limit: usize) -> Result<Vec<InvoiceRow>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(Self::joined_rows(&tables).into_iter().take(limit).collect())
    }

    async fn totals(&self) -> Result<InvoiceTotals> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut totals = InvoiceTotals::default();
        for invoice in tables.invoices.values() {
            totals.count += 1;
            match invoice.status {
                InvoiceStatus::Paid => totals.paid += invoice.amount,
                InvoiceStatus::Pending => totals.pending += invoice.amount,
            }
        }
        Ok(totals)
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Customer>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut customers: Vec<Customer> = tables.customers.values().cloned().collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn count(&self) -> Result<u64> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(tables.customers.len() as u64)
    }
}

#[async_trait]
impl RevenueStore for InMemoryStore {
    async fn monthly(&self) -> Result<Vec<Revenue>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(tables.revenue.clone())
    }
}
