//! # Validation Module
//!
//! Input validation utilities for Vetstock.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (form / API surface)                                  │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - field validation before any mutation           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reconciliation engine - stock sufficiency, duplicates,       │
//! │           atomicity at the store boundary                              │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vetstock_core::validation::{validate_batch_number, validate_quantity};
//!
//! // Validate a batch number before registering a product
//! validate_batch_number("RABVAC25A").unwrap();
//!
//! // Validate a quantity before recording a sale
//! validate_quantity(5).unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};
use crate::types::Pet;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_PAISE};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use vetstock_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Canine Plus Dog Food").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a batch number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use vetstock_core::validation::validate_batch_number;
///
/// assert!(validate_batch_number("CPDF2024A").is_ok());
/// assert!(validate_batch_number("").is_err());
/// ```
pub fn validate_batch_number(batch_number: &str) -> ValidationResult<()> {
    let batch_number = batch_number.trim();

    if batch_number.is_empty() {
        return Err(ValidationError::Required {
            field: "batch number".to_string(),
        });
    }

    if batch_number.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "batch number".to_string(),
            max: 50,
        });
    }

    if !batch_number
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "batch number".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a customer name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 20 characters
/// - Digits with optional leading `+`, spaces, and hyphens
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone number".to_string(),
        });
    }

    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone number".to_string(),
            max: 20,
        });
    }

    let rest = phone.strip_prefix('+').unwrap_or(phone);
    if !rest.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "phone number".to_string(),
            reason: "must contain only digits, spaces, and hyphens".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale or receipt quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Record Sale                                                            │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with stock check                                │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in paise.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, samples)
/// - Must not exceed MAX_PRICE_PAISE; the cap guarantees price × quantity
///   never overflows i64
///
/// ## Example
/// ```rust
/// use vetstock_core::validation::validate_price_paise;
///
/// assert!(validate_price_paise(150_000).is_ok()); // ₹1500.00
/// assert!(validate_price_paise(0).is_ok());       // Free sample
/// assert!(validate_price_paise(-100).is_err());   // Invalid
/// ```
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    if paise > MAX_PRICE_PAISE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_PAISE,
        });
    }

    Ok(())
}

/// Validates an initial stock level at registration.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (register the batch, receive stock later)
pub fn validate_initial_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "initial stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a sale date is not in the future.
///
/// `today` is injected rather than read from the clock so the rule stays a
/// pure function.
pub fn validate_sale_date(sale_date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if sale_date > today {
        return Err(ValidationError::FutureDate {
            field: "sale date".to_string(),
            date: sale_date,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a customer's pet entry.
///
/// ## Rules
/// - Species and breed must not be empty
/// - Count must be at least 1
pub fn validate_pet(pet: &Pet) -> ValidationResult<()> {
    if pet.species.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "pet species".to_string(),
        });
    }

    if pet.breed.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "pet breed".to_string(),
        });
    }

    if pet.count < 1 {
        return Err(ValidationError::MustBePositive {
            field: "pet count".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Feline Fine Cat Treats").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_batch_number() {
        assert!(validate_batch_number("CPDF2024A").is_ok());
        assert!(validate_batch_number("LEP-VAC_25B").is_ok());

        assert!(validate_batch_number("").is_err());
        assert!(validate_batch_number("has space").is_err());
        assert!(validate_batch_number(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("9876543210").is_ok());
        assert!(validate_phone_number("+91 98765-43210").is_ok());

        assert!(validate_phone_number("").is_err());
        assert!(validate_phone_number("call me").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_paise() {
        assert!(validate_price_paise(0).is_ok());
        assert!(validate_price_paise(150_000).is_ok());
        assert!(validate_price_paise(MAX_PRICE_PAISE).is_ok());

        assert!(validate_price_paise(-100).is_err());
        assert!(validate_price_paise(MAX_PRICE_PAISE + 1).is_err());
    }

    #[test]
    fn test_max_price_times_max_quantity_fits_i64() {
        // The caps exist so a line total can never overflow.
        assert!(MAX_PRICE_PAISE.checked_mul(MAX_ITEM_QUANTITY).is_some());
    }

    #[test]
    fn test_validate_initial_stock() {
        assert!(validate_initial_stock(0).is_ok());
        assert!(validate_initial_stock(100).is_ok());
        assert!(validate_initial_stock(-1).is_err());
    }

    #[test]
    fn test_validate_sale_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert!(validate_sale_date(today, today).is_ok());
        assert!(validate_sale_date(today.pred_opt().unwrap(), today).is_ok());
        assert!(validate_sale_date(today.succ_opt().unwrap(), today).is_err());
    }

    #[test]
    fn test_validate_pet() {
        let pet = Pet {
            species: "Dog".to_string(),
            breed: "Labrador Retriever".to_string(),
            count: 1,
        };
        assert!(validate_pet(&pet).is_ok());

        let mut no_species = pet.clone();
        no_species.species = "".to_string();
        assert!(validate_pet(&no_species).is_err());

        let mut zero_count = pet;
        zero_count.count = 0;
        assert!(validate_pet(&zero_count).is_err());
    }
}
