//! # vetstock-core: Pure Business Logic for Vetstock
//!
//! This crate is the **heart** of Vetstock. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vetstock Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Delivery layer (out of scope)                │   │
//! │  │    Stock entry forms ──► Sales forms ──► Dashboard views        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vetstock-engine                              │   │
//! │  │    Catalog, Reconciliation, Ledger, Dashboard, Directory        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vetstock-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Product  │  │   Money   │  │   rules   │                  │   │
//! │  │   │   Sale    │  │  paise    │  │  checks   │                  │   │
//! │  │   │  Customer │  │  math     │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vetstock-store                               │   │
//! │  │          Document store boundary, in-memory store               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Customer, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Store, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vetstock_core::money::Money;
//! use vetstock_core::validation::validate_quantity;
//!
//! // Create money from paise (never from floats!)
//! let price = Money::from_rupees(800); // ₹800.00
//!
//! // Validate before touching stock
//! validate_quantity(3).unwrap();
//!
//! // Sale total = price × quantity
//! let total = price.multiply_quantity(3);
//! assert_eq!(total, Money::from_rupees(2400));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vetstock_core::Money` instead of
// `use vetstock_core::money::Money`

pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item in a sale or receipt.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Can be made configurable in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum line items allowed in a single bulk sale.
///
/// ## Business Reason
/// A bulk sale is one customer checkout; anything beyond this is almost
/// certainly bad input.
pub const MAX_BULK_SALE_ITEMS: usize = 50;

/// Maximum unit price, in paise (₹1 crore).
///
/// ## Business Reason
/// Nothing in a pet shop costs more. Also keeps every line total well
/// inside i64: `MAX_PRICE_PAISE × MAX_ITEM_QUANTITY` is ~1e12, far below
/// the overflow boundary.
pub const MAX_PRICE_PAISE: i64 = 1_000_000_000;

/// Days ahead the dashboard counts a batch as "expiring soon".
pub const EXPIRY_WINDOW_DAYS: i64 = 30;
