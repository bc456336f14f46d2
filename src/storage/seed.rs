//! Demo dataset for the in-memory backend
//!
//! A handful of customers, a year of revenue buckets and a spread of
//! invoices so the dashboard has something to show on first launch.

use crate::core::service::InvoiceStore;
use crate::model::{Customer, InvoiceStatus, NewInvoice, Revenue};
use crate::storage::InMemoryStore;
use anyhow::Result;
use chrono::NaiveDate;
use uuid::Uuid;

/// The demo customer roster.
pub fn demo_customers() -> Vec<Customer> {
    [
        ("Evil Rabbit", "evil@rabbit.com", "/customers/evil-rabbit.png"),
        ("Delba de Oliveira", "delba@oliveira.com", "/customers/delba-de-oliveira.png"),
        ("Lee Robinson", "lee@robinson.com", "/customers/lee-robinson.png"),
        ("Michael Novotny", "michael@novotny.com", "/customers/michael-novotny.png"),
        ("Amy Burns", "amy@burns.com", "/customers/amy-burns.png"),
        ("Balazs Orban", "balazs@orban.com", "/customers/balazs-orban.png"),
    ]
    .into_iter()
    .map(|(name, email, image_url)| Customer {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        image_url: image_url.to_string(),
    })
    .collect()
}

/// Invoice rows as (customer index, amount in cents, status, date).
fn demo_invoices() -> Vec<(usize, i64, InvoiceStatus, &'static str)> {
    use InvoiceStatus::{Paid, Pending};
    vec![
        (0, 15_795, Pending, "2022-12-06"),
        (1, 20_348, Pending, "2022-11-14"),
        (4, 3_040, Paid, "2022-10-29"),
        (3, 44_800, Paid, "2023-09-10"),
        (5, 34_577, Pending, "2023-08-05"),
        (2, 54_246, Pending, "2023-07-16"),
        (0, 666, Pending, "2023-06-27"),
        (3, 32_545, Paid, "2023-06-09"),
        (4, 1_250, Paid, "2023-06-17"),
        (5, 8_546, Paid, "2023-06-07"),
        (1, 500, Paid, "2023-08-19"),
        (5, 8_945, Paid, "2023-06-03"),
        (2, 1_000, Paid, "2022-06-05"),
    ]
}

/// Monthly revenue buckets, January through December.
pub fn demo_revenue() -> Vec<Revenue> {
    [
        ("Jan", 2000),
        ("Feb", 1800),
        ("Mar", 2200),
        ("Apr", 2500),
        ("May", 2300),
        ("Jun", 3200),
        ("Jul", 3500),
        ("Aug", 3700),
        ("Sep", 2500),
        ("Oct", 2800),
        ("Nov", 3000),
        ("Dec", 4800),
    ]
    .into_iter()
    .map(|(month, revenue)| Revenue {
        month: month.to_string(),
        revenue,
    })
    .collect()
}

/// Populate an in-memory store with the demo dataset.
pub async fn populate(store: &InMemoryStore) -> Result<()> {
    let customers = demo_customers();
    for customer in &customers {
        store.insert_customer(customer.clone())?;
    }

    for (customer_index, amount, status, date) in demo_invoices() {
        store
            .insert(NewInvoice {
                customer_id: customers[customer_index].id.to_string(),
                amount,
                status,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d")?,
            })
            .await?;
    }

    store.set_revenue(demo_revenue())?;

    tracing::info!(
        customers = customers.len(),
        "seeded in-memory store with demo data"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::{CustomerStore, RevenueStore};

    #[tokio::test]
    async fn test_populate_fills_all_three_tables() {
        let store = InMemoryStore::new();
        populate(&store).await.unwrap();

        assert_eq!(CustomerStore::count(&store).await.unwrap(), 6);
        assert_eq!(store.count_filtered("").await.unwrap(), 13);
        assert_eq!(store.monthly().await.unwrap().len(), 12);
    }
}
