//! # Notification Text Service
//!
//! Seam for composing customer-facing message text.
//!
//! ## Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Notification Flow                                     │
//! │                                                                         │
//! │  Caller builds a NotificationRequest (facts only: names, quantities,   │
//! │  dates, totals)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NotificationService::compose ──► NotificationMessage { message }      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller decides what to do with the text (show it, send it, drop it)  │
//! │                                                                         │
//! │  Composing text never touches the store and never mutates stock or    │
//! │  the ledger. A failed composition fails ONLY the notification.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The default [`TemplateNotifier`] fills fixed templates. A remote
//! text-generation backend slots in behind the same trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use vetstock_core::Money;

// =============================================================================
// Request / Response Types
// =============================================================================

/// One line of a sale, as facts for message composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLineSummary {
    pub product_name: String,
    pub quantity: i64,
    pub price: Money,
}

/// What to compose a message about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationRequest {
    /// A batch is approaching its expiry date.
    Expiry {
        product_type: String,
        product_name: String,
        quantity: i64,
        expiry_date: NaiveDate,
    },
    /// A completed sale, for a receipt-style message.
    Sale {
        customer_name: String,
        items: Vec<SaleLineSummary>,
        total_amount: Money,
    },
}

/// Composed message text, ready for the caller to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub message: String,
}

/// Errors raised while composing message text.
///
/// Isolated from [`crate::EngineError`] on purpose: notification failures
/// must never look like reconciliation failures.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The request held nothing to write about.
    #[error("nothing to compose: {reason}")]
    EmptyRequest { reason: String },

    /// The backing text service failed.
    #[error("notification backend failed: {reason}")]
    Backend { reason: String },
}

// =============================================================================
// Service Trait
// =============================================================================

/// Composes notification text from sale and expiry facts.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn compose(&self, request: NotificationRequest)
        -> Result<NotificationMessage, NotifyError>;
}

// =============================================================================
// Template Notifier
// =============================================================================

/// Default [`NotificationService`] that fills fixed templates.
///
/// Deterministic and offline. Output is plain text a shopkeeper can forward
/// over WhatsApp as-is.
#[derive(Debug, Default, Clone)]
pub struct TemplateNotifier;

impl TemplateNotifier {
    pub fn new() -> Self {
        TemplateNotifier
    }
}

#[async_trait]
impl NotificationService for TemplateNotifier {
    async fn compose(
        &self,
        request: NotificationRequest,
    ) -> Result<NotificationMessage, NotifyError> {
        let message = match request {
            NotificationRequest::Expiry {
                product_type,
                product_name,
                quantity,
                expiry_date,
            } => {
                format!(
                    "Reminder: {quantity} units of {product_name} ({product_type}) \
                     expire on {expiry_date}. Please plan a discount or clearance \
                     before that date."
                )
            }
            NotificationRequest::Sale {
                customer_name,
                items,
                total_amount,
            } => {
                if items.is_empty() {
                    return Err(NotifyError::EmptyRequest {
                        reason: "sale has no items".to_string(),
                    });
                }
                let mut lines = vec![format!("Hi {customer_name}, thank you for your purchase!")];
                for item in &items {
                    lines.push(format!(
                        "- {} x{} @ {}",
                        item.product_name, item.quantity, item.price
                    ));
                }
                lines.push(format!("Total: {total_amount}. See you again soon!"));
                lines.join("\n")
            }
        };

        Ok(NotificationMessage { message })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
