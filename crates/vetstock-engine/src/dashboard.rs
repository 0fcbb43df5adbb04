//! # Dashboard Aggregator
//!
//! Read-only figures computed from the ledger and the catalog.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dashboard Figures                                  │
//! │                                                                         │
//! │  Sale ledger ─────► revenue_for_day / revenue_for_month                │
//! │               ────► items_sold_on_day                                  │
//! │               ────► top_seller_in_range (by display name)              │
//! │               ────► daily_revenue_series                               │
//! │                                                                         │
//! │  Product catalog ─► total_stock_in_hand                                │
//! │                  ─► expiring_soon_count                                │
//! │                                                                         │
//! │  Every figure is recomputed from stored documents on demand; nothing   │
//! │  here is cached or persisted, so a read can never drift from the       │
//! │  ledger it derives from.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};

use vetstock_core::{Money, Sale, ValidationError, EXPIRY_WINDOW_DAYS};
use vetstock_store::DocumentStore;

use crate::catalog::ProductCatalog;
use crate::error::{EngineError, EngineResult};
use crate::ledger::SaleLedger;

// =============================================================================
// Aggregates
// =============================================================================

/// The best-selling product over some range, by units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSeller {
    pub product_name: String,
    pub quantity: i64,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Computes dashboard figures over the ledger and catalog.
#[derive(Clone)]
pub struct Dashboard {
    ledger: SaleLedger,
    catalog: ProductCatalog,
}

impl Dashboard {
    /// Creates a new Dashboard over a document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Dashboard {
            ledger: SaleLedger::new(store.clone()),
            catalog: ProductCatalog::new(store),
        }
    }

    /// Revenue for one calendar day. Zero when no sales landed.
    pub async fn revenue_for_day(&self, date: NaiveDate) -> EngineResult<Money> {
        let sales = self.ledger.sales_on_date(date).await?;
        Ok(sales.iter().map(Sale::total_amount).sum())
    }

    /// Revenue for one calendar month. `Validation` error on a month
    /// outside 1..=12.
    pub async fn revenue_for_month(&self, year: i32, month: u32) -> EngineResult<Money> {
        let (from, to) = month_bounds(year, month)?;
        let sales = self.ledger.sales_in_range(from, to).await?;
        Ok(sales.iter().map(Sale::total_amount).sum())
    }

    /// Units sold on one calendar day, across all products.
    pub async fn items_sold_on_day(&self, date: NaiveDate) -> EngineResult<i64> {
        let sales = self.ledger.sales_on_date(date).await?;
        Ok(sales.iter().map(|s| s.quantity).sum())
    }

    /// The product with the most units sold in an inclusive range.
    ///
    /// ## Rules
    /// - Units are summed per DISPLAY NAME, so all batches of one product
    ///   count together
    /// - Ties go to the name first reached while scanning the range's
    ///   sales, which keeps the answer stable across reads
    /// - `None` when the range holds no sales
    pub async fn top_seller_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Option<TopSeller>> {
        let sales = self.ledger.sales_in_range(from, to).await?;

        // First-encounter order matters for the tie rule, so a plain Vec
        // rather than a map keyed by name.
        let mut tallies: Vec<TopSeller> = Vec::new();
        for sale in &sales {
            match tallies.iter_mut().find(|t| t.product_name == sale.product_name) {
                Some(tally) => tally.quantity += sale.quantity,
                None => tallies.push(TopSeller {
                    product_name: sale.product_name.clone(),
                    quantity: sale.quantity,
                }),
            }
        }

        let mut best: Option<TopSeller> = None;
        for tally in tallies {
            let beats = match &best {
                Some(current) => tally.quantity > current.quantity,
                None => true,
            };
            if beats {
                best = Some(tally);
            }
        }
        Ok(best)
    }

    /// Top seller over the seven days ending `today`, inclusive.
    pub async fn top_seller_last_week(&self, today: NaiveDate) -> EngineResult<Option<TopSeller>> {
        self.top_seller_in_range(today - Duration::days(6), today)
            .await
    }

    /// Top seller for one calendar month.
    pub async fn top_seller_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> EngineResult<Option<TopSeller>> {
        let (from, to) = month_bounds(year, month)?;
        self.top_seller_in_range(from, to).await
    }

    /// Units currently in hand across every batch.
    pub async fn total_stock_in_hand(&self) -> EngineResult<i64> {
        let products = self.catalog.list_all().await?;
        Ok(products.iter().map(|p| p.stock_in_hand).sum())
    }

    /// Batches expiring within the standard window from `today`.
    pub async fn expiring_soon_count(&self, today: NaiveDate) -> EngineResult<usize> {
        Ok(self
            .catalog
            .expiring_within(today, EXPIRY_WINDOW_DAYS)
            .await?
            .len())
    }

    /// Revenue per day over an inclusive range, zero-filled.
    ///
    /// Days without sales appear as zero so a chart over the result has no
    /// gaps.
    pub async fn daily_revenue_series(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<(NaiveDate, Money)>> {
        let sales = self.ledger.sales_in_range(from, to).await?;

        let mut series = Vec::new();
        let mut day = from;
        while day <= to {
            let revenue = sales
                .iter()
                .filter(|s| s.sale_date == day)
                .map(Sale::total_amount)
                .sum();
            series.push((day, revenue));
            day += Duration::days(1);
        }
        Ok(series)
    }
}

/// First and last day of a calendar month. Rejects months outside 1..=12.
fn month_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::Validation(ValidationError::OutOfRange {
            field: "month".to_string(),
            min: 1,
            max: 12,
        })
    })?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let to = next_month
        .map(|d| d - Duration::days(1))
        .unwrap_or(from);
    debug_assert_eq!(from.month(), to.month());
    Ok((from, to))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vetstock_store::{MemoryStore, WriteBatch};

    use crate::codec::collections;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sale(id: &str, name: &str, date: NaiveDate, quantity: i64, rupees: i64) -> Sale {
        Sale {
            id: id.to_string(),
            product_id: format!("prod_{id}"),
            product_name: name.to_string(),
            customer_name: "Meera Desai".to_string(),
            quantity,
            sale_date: date,
            total_amount_paise: Money::from_rupees(rupees).paise(),
        }
    }

    async fn dashboard_with(sales: &[Sale]) -> Dashboard {
        let store = Arc::new(MemoryStore::new());
        for s in sales {
            store
                .set(collections::SALES, &s.id, serde_json::to_value(s).unwrap())
                .await
                .unwrap();
        }
        Dashboard::new(store)
    }

    #[tokio::test]
    async fn test_revenue_for_day_and_month() {
        let dashboard = dashboard_with(&[
            sale("a", "Canine Plus Dog Food", d(2026, 8, 10), 2, 3000),
            sale("b", "Catnip Toy Mouse", d(2026, 8, 10), 1, 350),
            sale("c", "Catnip Toy Mouse", d(2026, 8, 15), 3, 1050),
            sale("d", "Catnip Toy Mouse", d(2026, 7, 31), 1, 350),
        ])
        .await;

        assert_eq!(
            dashboard.revenue_for_day(d(2026, 8, 10)).await.unwrap(),
            Money::from_rupees(3350)
        );
        assert_eq!(
            dashboard.revenue_for_day(d(2026, 8, 11)).await.unwrap(),
            Money::zero()
        );
        assert_eq!(
            dashboard.revenue_for_month(2026, 8).await.unwrap(),
            Money::from_rupees(4400)
        );
        assert_eq!(
            dashboard.revenue_for_month(2026, 7).await.unwrap(),
            Money::from_rupees(350)
        );
    }

    #[tokio::test]
    async fn test_items_sold_on_day() {
        let dashboard = dashboard_with(&[
            sale("a", "Canine Plus Dog Food", d(2026, 8, 10), 2, 3000),
            sale("b", "Catnip Toy Mouse", d(2026, 8, 10), 5, 1750),
        ])
        .await;

        assert_eq!(dashboard.items_sold_on_day(d(2026, 8, 10)).await.unwrap(), 7);
        assert_eq!(dashboard.items_sold_on_day(d(2026, 8, 11)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_top_seller_sums_across_batches() {
        // Scenario E: units are tallied by display name, not by batch.
        let dashboard = dashboard_with(&[
            sale("a", "Rabies Vaccine (1-year)", d(2026, 8, 10), 4, 3200),
            sale("b", "Rabies Vaccine (1-year)", d(2026, 8, 11), 3, 2400),
            sale("c", "Canine Plus Dog Food", d(2026, 8, 11), 6, 9000),
        ])
        .await;

        let top = dashboard
            .top_seller_in_range(d(2026, 8, 1), d(2026, 8, 31))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(top.product_name, "Rabies Vaccine (1-year)");
        assert_eq!(top.quantity, 7);
    }

    #[tokio::test]
    async fn test_top_seller_tie_and_empty_range() {
        let dashboard = dashboard_with(&[
            sale("a", "Canine Plus Dog Food", d(2026, 8, 12), 5, 7500),
            sale("b", "Catnip Toy Mouse", d(2026, 8, 10), 5, 1750),
        ])
        .await;

        // Tie: the name encountered first wins. Newest-first scan puts the
        // Aug 12 sale ahead of the Aug 10 one.
        let top = dashboard
            .top_seller_in_range(d(2026, 8, 1), d(2026, 8, 31))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(top.quantity, 5);
        assert_eq!(top.product_name, "Canine Plus Dog Food");

        assert!(dashboard
            .top_seller_in_range(d(2026, 1, 1), d(2026, 1, 31))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_daily_revenue_series_zero_fills() {
        let dashboard = dashboard_with(&[
            sale("a", "Catnip Toy Mouse", d(2026, 8, 10), 1, 350),
            sale("b", "Catnip Toy Mouse", d(2026, 8, 12), 2, 700),
        ])
        .await;

        let series = dashboard
            .daily_revenue_series(d(2026, 8, 10), d(2026, 8, 13))
            .await
            .unwrap();
        assert_eq!(
            series,
            vec![
                (d(2026, 8, 10), Money::from_rupees(350)),
                (d(2026, 8, 11), Money::zero()),
                (d(2026, 8, 12), Money::from_rupees(700)),
                (d(2026, 8, 13), Money::zero()),
            ]
        );
    }

    #[tokio::test]
    async fn test_month_bounds() {
        assert_eq!(month_bounds(2026, 8).unwrap(), (d(2026, 8, 1), d(2026, 8, 31)));
        assert_eq!(month_bounds(2026, 2).unwrap(), (d(2026, 2, 1), d(2026, 2, 28)));
        assert_eq!(month_bounds(2024, 2).unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(month_bounds(2026, 12).unwrap(), (d(2026, 12, 1), d(2026, 12, 31)));
    }

    #[tokio::test]
    async fn test_monthly_figures_reject_invalid_month() {
        let dashboard = dashboard_with(&[]).await;

        let err = dashboard.revenue_for_month(2026, 13).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let err = dashboard.revenue_for_month(2026, 0).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let err = dashboard.top_seller_for_month(2026, 13).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_stock_figures_from_catalog() {
        use vetstock_core::{Category, Product, ReceivedEntry};

        let store = Arc::new(MemoryStore::new());
        let today = d(2026, 8, 23);
        let mut batch = WriteBatch::new();
        for (id, stock, expiry) in [
            ("prod_a", 12, Some(today + Duration::days(10))),
            ("prod_b", 30, Some(today + Duration::days(200))),
            ("prod_c", 5, None),
        ] {
            let product = Product {
                id: id.to_string(),
                name: id.to_string(),
                category: Category::Vaccines,
                batch_number: format!("B-{id}"),
                source: None,
                price_paise: 80_000,
                stock_in_hand: stock,
                items_sold: 0,
                expiry_date: expiry,
                received_log: vec![ReceivedEntry {
                    date: today,
                    quantity: stock,
                }],
            };
            batch.set(
                collections::PRODUCTS,
                id,
                serde_json::to_value(&product).unwrap(),
            );
        }
        store.commit(batch).await.unwrap();

        let dashboard = Dashboard::new(store);
        assert_eq!(dashboard.total_stock_in_hand().await.unwrap(), 47);
        assert_eq!(dashboard.expiring_soon_count(today).await.unwrap(), 1);
    }
}
