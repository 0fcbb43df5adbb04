//! # Sale Ledger
//!
//! Append-only record of completed sales.
//!
//! ## Append Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Who Writes the Ledger                               │
//! │                                                                         │
//! │  ReconciliationEngine ──► stage_append ──► WriteBatch ──► commit       │
//! │                                                                         │
//! │  Appends only happen INSIDE a reconciliation commit, alongside the     │
//! │  stock update they correspond to. There is no public append; a ledger  │
//! │  entry with no matching stock movement cannot be created through this  │
//! │  API. No update or delete either: corrections are modeled as new       │
//! │  entries by the caller, never as history rewrites.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use vetstock_core::Sale;
use vetstock_store::{DocumentStore, WriteBatch};

use crate::codec::{collections, decode, encode};
use crate::error::EngineResult;

/// Read-side queries over the sale ledger.
#[derive(Clone)]
pub struct SaleLedger {
    store: Arc<dyn DocumentStore>,
}

impl SaleLedger {
    /// Creates a new SaleLedger over a document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        SaleLedger { store }
    }

    /// Stages a ledger append onto a reconciliation batch.
    ///
    /// Internal to the engine: the entry only lands if the whole batch
    /// commits, stock movement included.
    pub(crate) fn stage_append(batch: &mut WriteBatch, sale: &Sale) -> EngineResult<()> {
        batch.set(collections::SALES, &sale.id, encode(sale)?);
        Ok(())
    }

    /// Every sale, newest first.
    ///
    /// Ordered by sale date descending; entries sharing a date keep their
    /// store order, so the listing is stable across reads.
    pub async fn all_sales(&self) -> EngineResult<Vec<Sale>> {
        let docs = self.store.list(collections::SALES).await?;

        let mut sales = Vec::with_capacity(docs.len());
        for doc in docs {
            sales.push(decode::<Sale>(doc)?);
        }
        sales.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));
        Ok(sales)
    }

    /// Sales recorded on one calendar day.
    pub async fn sales_on_date(&self, date: NaiveDate) -> EngineResult<Vec<Sale>> {
        Ok(self
            .all_sales()
            .await?
            .into_iter()
            .filter(|s| s.sale_date == date)
            .collect())
    }

    /// Sales within an inclusive date range.
    pub async fn sales_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<Sale>> {
        Ok(self
            .all_sales()
            .await?
            .into_iter()
            .filter(|s| s.sale_date >= from && s.sale_date <= to)
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vetstock_core::Money;
    use vetstock_store::MemoryStore;

    fn sale(id: &str, date: NaiveDate, quantity: i64) -> Sale {
        Sale {
            id: id.to_string(),
            product_id: "prod_1".to_string(),
            product_name: "Catnip Toy Mouse".to_string(),
            customer_name: "Meera Desai".to_string(),
            quantity,
            sale_date: date,
            total_amount_paise: Money::from_rupees(350).multiply_quantity(quantity).paise(),
        }
    }

    async fn ledger_with(sales: &[Sale]) -> SaleLedger {
        let store = Arc::new(MemoryStore::new());
        for s in sales {
            let mut batch = WriteBatch::new();
            SaleLedger::stage_append(&mut batch, s).unwrap();
            store.commit(batch).await.unwrap();
        }
        SaleLedger::new(store)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_all_sales_newest_first_stable() {
        let ledger = ledger_with(&[
            sale("sale_a", d(2026, 8, 10), 1),
            sale("sale_b", d(2026, 8, 12), 2),
            sale("sale_c", d(2026, 8, 10), 3),
        ])
        .await;

        let sales = ledger.all_sales().await.unwrap();
        assert_eq!(sales.len(), 3);
        assert_eq!(sales[0].id, "sale_b");
        // Same-date entries keep store order (id-ordered).
        assert_eq!(sales[1].id, "sale_a");
        assert_eq!(sales[2].id, "sale_c");
    }

    #[tokio::test]
    async fn test_repeated_reads_return_equal_sequences() {
        let ledger = ledger_with(&[
            sale("sale_a", d(2026, 8, 10), 1),
            sale("sale_b", d(2026, 8, 12), 2),
            sale("sale_c", d(2026, 8, 10), 3),
        ])
        .await;

        let first = ledger.all_sales().await.unwrap();
        let second = ledger.all_sales().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_sales_on_date() {
        let ledger = ledger_with(&[
            sale("sale_a", d(2026, 8, 10), 1),
            sale("sale_b", d(2026, 8, 12), 2),
        ])
        .await;

        let on_tenth = ledger.sales_on_date(d(2026, 8, 10)).await.unwrap();
        assert_eq!(on_tenth.len(), 1);
        assert_eq!(on_tenth[0].id, "sale_a");

        assert!(ledger.sales_on_date(d(2026, 8, 11)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sales_in_range_is_inclusive() {
        let ledger = ledger_with(&[
            sale("sale_a", d(2026, 8, 10), 1),
            sale("sale_b", d(2026, 8, 12), 2),
            sale("sale_c", d(2026, 8, 15), 3),
        ])
        .await;

        let range = ledger
            .sales_in_range(d(2026, 8, 10), d(2026, 8, 12))
            .await
            .unwrap();
        assert_eq!(range.len(), 2);

        // Reads never mutate the ledger.
        assert_eq!(ledger.all_sales().await.unwrap().len(), 3);
    }
}
