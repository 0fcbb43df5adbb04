//! # Customer Directory
//!
//! Standalone record-keeping for customers and their pets.
//!
//! Deliberately decoupled from the ledger: a sale records a customer NAME
//! as entered, and no directory entry is required or created for it. The
//! directory exists for contact details and pet records, nothing more.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use vetstock_core::validation::{validate_customer_name, validate_phone_number, validate_pet};
use vetstock_core::{Customer, Pet};
use vetstock_store::DocumentStore;

use crate::codec::{collections, decode, encode};
use crate::error::{EngineError, EngineResult};

// =============================================================================
// Registration Input
// =============================================================================

/// Input for adding a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone_number: String,
    pub whatsapp_number: Option<String>,
    pub email: Option<String>,
    pub pets: Vec<Pet>,
}

// =============================================================================
// Customer Directory
// =============================================================================

/// Directory store for customer records.
#[derive(Clone)]
pub struct CustomerDirectory {
    store: Arc<dyn DocumentStore>,
}

impl CustomerDirectory {
    /// Creates a new CustomerDirectory over a document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        CustomerDirectory { store }
    }

    /// Adds a customer record.
    ///
    /// ## Rules
    /// - Name and phone number must be present and well-formed
    /// - A WhatsApp number, when given, follows the phone number rules
    /// - Each pet entry needs species, breed, and a positive count
    /// - Duplicate names are allowed; two customers may share a name
    pub async fn add_customer(&self, input: NewCustomer) -> EngineResult<Customer> {
        validate_customer_name(&input.name)?;
        validate_phone_number(&input.phone_number)?;
        if let Some(whatsapp) = &input.whatsapp_number {
            validate_phone_number(whatsapp)?;
        }
        for pet in &input.pets {
            validate_pet(pet)?;
        }

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            phone_number: input.phone_number.trim().to_string(),
            whatsapp_number: input.whatsapp_number.map(|w| w.trim().to_string()),
            email: input.email,
            pets: input.pets,
        };

        debug!(id = %customer.id, "adding customer");

        self.store
            .set(collections::CUSTOMERS, &customer.id, encode(&customer)?)
            .await?;

        Ok(customer)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, customer_id: &str) -> EngineResult<Customer> {
        let doc = self
            .store
            .get(collections::CUSTOMERS, customer_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Customer", customer_id))?;

        decode(doc)
    }

    /// Every customer, ordered by name.
    pub async fn list_customers(&self) -> EngineResult<Vec<Customer>> {
        let docs = self.store.list(collections::CUSTOMERS).await?;

        let mut customers = Vec::with_capacity(docs.len());
        for doc in docs {
            customers.push(decode::<Customer>(doc)?);
        }
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    /// Customers whose name contains the query, case-insensitive.
    pub async fn find_by_name(&self, query: &str) -> EngineResult<Vec<Customer>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .list_customers()
            .await?
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
