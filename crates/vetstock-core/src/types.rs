//! # Domain Types
//!
//! Core domain types used throughout Vetstock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  batch_number   │   │  product_id     │   │  name           │       │
//! │  │  stock_in_hand  │   │  quantity       │   │  phone_number   │       │
//! │  │  items_sold     │   │  total_amount   │   │  pets []        │       │
//! │  │  received_log []│   │  sale_date      │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │  ReceivedEntry  │   │      Pet        │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Medicines&Food │   │  date           │   │  species        │       │
//! │  │  Vaccines       │   │  quantity       │   │  breed          │       │
//! │  │  Accessories    │   └─────────────────┘   │  count          │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Batch Identity
//! A `Product` is a *batch record*: many batches may share a display name,
//! and are told apart by `batch_number`. Every stock receipt (including the
//! initial one) is appended to `received_log`, which together with
//! `items_sold` reconstructs `stock_in_hand` at any point.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// The shop's product categories.
///
/// Serialized with the display strings the documents carry, so categories
/// round-trip through the store unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Consumables with expiry dates (medicines, pet foods, supplements).
    #[serde(rename = "Medicines & Pet Foods")]
    MedicinesAndPetFoods,
    /// Vaccines (always expiry-dated).
    #[serde(rename = "Vaccines")]
    Vaccines,
    /// Durable goods (carriers, toys, grooming gear).
    #[serde(rename = "Accessories")]
    Accessories,
}

impl Category {
    /// Human-readable label, identical to the serialized form.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::MedicinesAndPetFoods => "Medicines & Pet Foods",
            Category::Vaccines => "Vaccines",
            Category::Accessories => "Accessories",
        }
    }
}

// =============================================================================
// Received Log
// =============================================================================

/// One stock receipt against a batch.
///
/// The received log is append-only: registration writes the first entry,
/// every later receipt appends one more. Entries are never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedEntry {
    /// Calendar date the stock arrived.
    pub date: NaiveDate,
    /// Quantity received (always positive).
    pub quantity: i64,
}

// =============================================================================
// Product (batch record)
// =============================================================================

/// A product batch available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the shopkeeper. Many batches share a name.
    pub name: String,

    /// Product category.
    pub category: Category,

    /// Batch number - business identifier, unique per name+batch combination.
    pub batch_number: String,

    /// Supplier this batch came from.
    pub source: Option<String>,

    /// Unit price in paise (smallest currency unit).
    pub price_paise: i64,

    /// Current available quantity of this batch.
    pub stock_in_hand: i64,

    /// Total units ever sold from this batch. Monotonically non-decreasing.
    pub items_sold: i64,

    /// Expiry date, if the batch expires.
    pub expiry_date: Option<NaiveDate>,

    /// Append-only record of every stock receipt, including the initial one.
    pub received_log: Vec<ReceivedEntry>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Checks whether this batch can cover a sale of `quantity` units.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock_in_hand >= quantity
    }

    /// Total quantity ever received, per the received log.
    pub fn total_received(&self) -> i64 {
        self.received_log.iter().map(|e| e.quantity).sum()
    }

    /// Checks the stock conservation invariant:
    /// `stock_in_hand == Σ received − items_sold`.
    pub fn stock_is_consistent(&self) -> bool {
        self.stock_in_hand == self.total_received() - self.items_sold
    }

    /// Whether the batch expires on or before `cutoff`.
    pub fn expires_by(&self, cutoff: NaiveDate) -> bool {
        matches!(self.expiry_date, Some(d) if d <= cutoff)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale, one line of the ledger.
///
/// Uses the snapshot pattern: `product_name` and `total_amount` are frozen
/// at sale time, so later catalog edits never rewrite sale history.
/// Immutable once created; only the Reconciliation Engine creates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The batch this sale drew stock from.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Customer attribution. A loose textual link to the directory, not a
    /// strict foreign key.
    pub customer_name: String,

    /// Units sold (always >= 1).
    pub quantity: i64,

    /// Calendar date of the sale (never in the future).
    pub sale_date: NaiveDate,

    /// quantity × unit price at time of sale, in paise (frozen).
    pub total_amount_paise: i64,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paise(self.total_amount_paise)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A pet owned by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub species: String,
    pub breed: String,
    /// How many of this species/breed the customer keeps (>= 1).
    pub count: i64,
}

/// A customer in the directory.
///
/// Created via directory registration; read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub whatsapp_number: Option<String>,
    pub email: Option<String>,
    pub pets: Vec<Pet>,
}

// =============================================================================
// Unit Tests
// =============================================================================
