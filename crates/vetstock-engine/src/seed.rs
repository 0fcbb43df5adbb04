//! # Bootstrap Seeding
//!
//! Loads a realistic sample shop into an empty store: ten product batches,
//! twenty historical sales dated relative to today, and nine customers.
//!
//! ## Rules
//! - Runs only against an empty products collection; a populated store is
//!   left untouched and the call reports `false`
//! - Everything lands in ONE atomic commit, so a half-seeded store cannot
//!   exist
//! - Sale dates shift with the current date so the dashboard always has
//!   "today" and "last week" data to show

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use vetstock_core::{Category, Customer, Money, Pet, Product, ReceivedEntry, Sale};
use vetstock_store::{DocumentStore, WriteBatch};

use crate::codec::{collections, encode};
use crate::error::EngineResult;

/// Seeds the sample shop. Returns `true` when data was written, `false`
/// when the store already held products.
pub async fn seed_database(store: &Arc<dyn DocumentStore>) -> EngineResult<bool> {
    if !store.list(collections::PRODUCTS).await?.is_empty() {
        info!("store already has products, skipping seed");
        return Ok(false);
    }

    let today = Utc::now().date_naive();
    let mut batch = WriteBatch::new();

    for product in sample_products(today) {
        batch.set(collections::PRODUCTS, &product.id, encode(&product)?);
    }
    for sale in sample_sales(today) {
        batch.set(collections::SALES, &sale.id, encode(&sale)?);
    }
    for customer in sample_customers() {
        batch.set(collections::CUSTOMERS, &customer.id, encode(&customer)?);
    }

    let ops = batch.len();
    store.commit(batch).await?;
    info!(ops = %ops, "sample shop seeded");
    Ok(true)
}

// =============================================================================
// Sample Data
// =============================================================================
// Stock levels are pre-reconciled: for every batch, received minus sold
// equals stock in hand.

const CANINE_PLUS: &str = "prod_canine_plus_food_a";
const FELINE_FINE: &str = "prod_feline_fine_treats_b";
const RABIES_VAC: &str = "prod_rabies_vaccine_c";
const LEPTO_VAC: &str = "prod_lepto_vaccine_d";
const PET_CARRIER: &str = "prod_pet_carrier_e";
const CHEW_TOY: &str = "prod_chew_toy_f";
const FLEA_TICK_MED: &str = "prod_flea_tick_med_g";
const VITAMIN_DROPS: &str = "prod_vitamin_drops_h";
const GROOM_BRUSH: &str = "prod_grooming_brush_i";
const NAIL_CLIPPERS: &str = "prod_nail_clippers_j";

struct ProductSpec {
    id: &'static str,
    name: &'static str,
    category: Category,
    batch_number: &'static str,
    source: &'static str,
    stock_in_hand: i64,
    items_sold: i64,
    price_rupees: i64,
    expires_in_days: Option<i64>,
    received_days_ago: i64,
    received_quantity: i64,
}

fn sample_products(today: NaiveDate) -> Vec<Product> {
    let specs = [
        ProductSpec {
            id: CANINE_PLUS,
            name: "Canine Plus Dog Food",
            category: Category::MedicinesAndPetFoods,
            batch_number: "CPDF2024A",
            source: "Pet Food Inc.",
            stock_in_hand: 85,
            items_sold: 15,
            price_rupees: 1500,
            expires_in_days: Some(365),
            received_days_ago: 45,
            received_quantity: 100,
        },
        ProductSpec {
            id: FELINE_FINE,
            name: "Feline Fine Cat Treats",
            category: Category::MedicinesAndPetFoods,
            batch_number: "FFCT2024B",
            source: "Pet Food Inc.",
            stock_in_hand: 180,
            items_sold: 20,
            price_rupees: 350,
            expires_in_days: Some(180),
            received_days_ago: 60,
            received_quantity: 200,
        },
        ProductSpec {
            id: RABIES_VAC,
            name: "Rabies Vaccine (1-year)",
            category: Category::Vaccines,
            batch_number: "RABVAC25A",
            source: "Vet Pharma",
            stock_in_hand: 42,
            items_sold: 8,
            price_rupees: 800,
            expires_in_days: Some(730),
            received_days_ago: 20,
            received_quantity: 50,
        },
        ProductSpec {
            id: LEPTO_VAC,
            name: "Leptospirosis Vaccine",
            category: Category::Vaccines,
            batch_number: "LEPVAC25B",
            source: "Vet Pharma",
            stock_in_hand: 45,
            items_sold: 5,
            price_rupees: 650,
            // Inside the 30-day window, so the dashboard flags it.
            expires_in_days: Some(25),
            received_days_ago: 20,
            received_quantity: 50,
        },
        ProductSpec {
            id: PET_CARRIER,
            name: "Deluxe Pet Carrier",
            category: Category::Accessories,
            batch_number: "DPCAR24A",
            source: "Happy Pets Gear",
            stock_in_hand: 27,
            items_sold: 3,
            price_rupees: 2500,
            expires_in_days: None,
            received_days_ago: 90,
            received_quantity: 30,
        },
        ProductSpec {
            id: CHEW_TOY,
            name: "Durable Chew Toy",
            category: Category::Accessories,
            batch_number: "DCTOY24B",
            source: "Happy Pets Gear",
            stock_in_hand: 88,
            items_sold: 12,
            price_rupees: 400,
            expires_in_days: None,
            received_days_ago: 15,
            received_quantity: 100,
        },
        ProductSpec {
            id: FLEA_TICK_MED,
            name: "Flea & Tick Prevention",
            category: Category::MedicinesAndPetFoods,
            batch_number: "FTP2024C",
            source: "Vet Pharma",
            stock_in_hand: 55,
            items_sold: 5,
            price_rupees: 950,
            expires_in_days: Some(400),
            received_days_ago: 35,
            received_quantity: 60,
        },
        ProductSpec {
            id: VITAMIN_DROPS,
            name: "Multi-Vitamin Drops",
            category: Category::MedicinesAndPetFoods,
            batch_number: "MVD2024D",
            source: "Vet Pharma",
            stock_in_hand: 68,
            items_sold: 7,
            price_rupees: 550,
            expires_in_days: Some(15),
            received_days_ago: 40,
            received_quantity: 75,
        },
        ProductSpec {
            id: GROOM_BRUSH,
            name: "Grooming Brush",
            category: Category::Accessories,
            batch_number: "GRB24C",
            source: "Happy Pets Gear",
            stock_in_hand: 35,
            items_sold: 15,
            price_rupees: 700,
            expires_in_days: None,
            received_days_ago: 10,
            received_quantity: 50,
        },
        ProductSpec {
            id: NAIL_CLIPPERS,
            name: "Nail Clippers",
            category: Category::Accessories,
            batch_number: "NLC24D",
            source: "Happy Pets Gear",
            stock_in_hand: 42,
            items_sold: 8,
            price_rupees: 600,
            expires_in_days: None,
            received_days_ago: 25,
            received_quantity: 50,
        },
    ];

    specs
        .into_iter()
        .map(|spec| Product {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            category: spec.category,
            batch_number: spec.batch_number.to_string(),
            source: Some(spec.source.to_string()),
            price_paise: Money::from_rupees(spec.price_rupees).paise(),
            stock_in_hand: spec.stock_in_hand,
            items_sold: spec.items_sold,
            expiry_date: spec.expires_in_days.map(|d| today + Duration::days(d)),
            received_log: vec![ReceivedEntry {
                date: today - Duration::days(spec.received_days_ago),
                quantity: spec.received_quantity,
            }],
        })
        .collect()
}

fn sample_sales(today: NaiveDate) -> Vec<Sale> {
    let entries: [(&str, &str, &str, i64, i64, i64); 20] = [
        // (product_id, product_name, customer, quantity, unit price ₹, days ago)
        (CANINE_PLUS, "Canine Plus Dog Food", "Ravi Kumar", 1, 1500, 0),
        (CHEW_TOY, "Durable Chew Toy", "Priya Sharma", 2, 400, 0),
        (FELINE_FINE, "Feline Fine Cat Treats", "Anjali Verma", 3, 350, 1),
        (RABIES_VAC, "Rabies Vaccine (1-year)", "Suresh Gupta", 1, 800, 1),
        (GROOM_BRUSH, "Grooming Brush", "Anjali Verma", 1, 700, 1),
        (CANINE_PLUS, "Canine Plus Dog Food", "Amit Singh", 5, 1500, 3),
        (PET_CARRIER, "Deluxe Pet Carrier", "Sunita Rao", 1, 2500, 4),
        (NAIL_CLIPPERS, "Nail Clippers", "Vikram Mehta", 1, 600, 5),
        (FELINE_FINE, "Feline Fine Cat Treats", "Rina Desai", 10, 350, 6),
        (LEPTO_VAC, "Leptospirosis Vaccine", "Deepak Kumar", 2, 650, 7),
        (CHEW_TOY, "Durable Chew Toy", "Amit Singh", 5, 400, 8),
        (VITAMIN_DROPS, "Multi-Vitamin Drops", "Priya Sharma", 2, 550, 9),
        (FLEA_TICK_MED, "Flea & Tick Prevention", "Ravi Kumar", 1, 950, 10),
        (GROOM_BRUSH, "Grooming Brush", "Sunita Rao", 3, 700, 12),
        (CANINE_PLUS, "Canine Plus Dog Food", "Vikram Mehta", 3, 1500, 15),
        (RABIES_VAC, "Rabies Vaccine (1-year)", "Rina Desai", 5, 800, 18),
        (FELINE_FINE, "Feline Fine Cat Treats", "Suresh Gupta", 5, 350, 20),
        (NAIL_CLIPPERS, "Nail Clippers", "Deepak Kumar", 4, 600, 22),
        (CHEW_TOY, "Durable Chew Toy", "Anjali Verma", 5, 400, 25),
        (PET_CARRIER, "Deluxe Pet Carrier", "Amit Singh", 2, 2500, 28),
    ];

    entries
        .into_iter()
        .map(
            |(product_id, product_name, customer_name, quantity, rupees, days_ago)| Sale {
                id: Uuid::new_v4().to_string(),
                product_id: product_id.to_string(),
                product_name: product_name.to_string(),
                customer_name: customer_name.to_string(),
                quantity,
                sale_date: today - Duration::days(days_ago),
                total_amount_paise: Money::from_rupees(rupees).multiply_quantity(quantity).paise(),
            },
        )
        .collect()
}

fn sample_customers() -> Vec<Customer> {
    fn pet(species: &str, breed: &str, count: i64) -> Pet {
        Pet {
            species: species.to_string(),
            breed: breed.to_string(),
            count,
        }
    }

    fn customer(
        name: &str,
        phone: &str,
        whatsapp: Option<&str>,
        email: Option<&str>,
        pets: Vec<Pet>,
    ) -> Customer {
        Customer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone_number: phone.to_string(),
            whatsapp_number: whatsapp.map(String::from),
            email: email.map(String::from),
            pets,
        }
    }

    vec![
        customer(
            "Ravi Kumar",
            "9876543210",
            Some("9876543210"),
            Some("ravi.k@example.com"),
            vec![pet("Dog", "Labrador Retriever", 1)],
        ),
        customer(
            "Priya Sharma",
            "9876543211",
            None,
            Some("priya.s@example.com"),
            vec![pet("Cat", "Siamese", 2), pet("Dog", "Golden Retriever", 1)],
        ),
        customer(
            "Anjali Verma",
            "9876543212",
            Some("9876543212"),
            Some("anjali.v@example.com"),
            vec![pet("Cat", "Persian", 1)],
        ),
        customer(
            "Suresh Gupta",
            "9876543213",
            None,
            None,
            vec![pet("Dog", "German Shepherd", 1)],
        ),
        customer(
            "Amit Singh",
            "9876543214",
            None,
            Some("amit.s@example.com"),
            vec![pet("Dog", "Pug", 2)],
        ),
        customer(
            "Sunita Rao",
            "9876543215",
            None,
            None,
            vec![pet("Dog", "Beagle", 1)],
        ),
        customer(
            "Vikram Mehta",
            "9876543216",
            None,
            Some("vikram.m@example.com"),
            vec![pet("Parrot", "Macaw", 2)],
        ),
        customer(
            "Rina Desai",
            "9876543217",
            None,
            None,
            vec![pet("Cat", "Maine Coon", 1)],
        ),
        customer(
            "Deepak Kumar",
            "9876543218",
            Some("9876543218"),
            None,
            vec![pet("Rabbit", "Holland Lop", 3)],
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vetstock_store::MemoryStore;

    #[tokio::test]
    async fn test_seed_populates_every_collection() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

        assert!(seed_database(&store).await.unwrap());
        assert_eq!(store.list(collections::PRODUCTS).await.unwrap().len(), 10);
        assert_eq!(store.list(collections::SALES).await.unwrap().len(), 20);
        assert_eq!(store.list(collections::CUSTOMERS).await.unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

        assert!(seed_database(&store).await.unwrap());
        assert!(!seed_database(&store).await.unwrap());
        assert_eq!(store.list(collections::SALES).await.unwrap().len(), 20);
    }

    #[test]
    fn test_sample_stock_is_reconciled() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        for product in sample_products(today) {
            assert!(
                product.stock_is_consistent(),
                "batch {} is not reconciled",
                product.batch_number
            );
        }
    }

    #[test]
    fn test_sample_sales_fit_seeded_counters() {
        // The seeded ledger covers roughly the last month; items_sold also
        // counts older sales, so it bounds the ledger from above.
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let sales = sample_sales(today);
        for product in sample_products(today) {
            let sold: i64 = sales
                .iter()
                .filter(|s| s.product_id == product.id)
                .map(|s| s.quantity)
                .sum();
            assert!(sold <= product.items_sold, "batch {}", product.batch_number);
        }
    }
}
