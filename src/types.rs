use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

/// unique identifier for a customer
pub type CustomerId = Uuid;

/// unique identifier for a credit agreement
pub type AgreementId = Uuid;

/// unique identifier for a recorded payment
pub type PaymentId = Uuid;

/// unique identifier for a finalized sale
pub type SaleId = Uuid;

/// agreement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgreementStatus {
    /// debt outstanding, accepts allocations
    Active,
    /// balance reached zero; terminal, never mutated again
    Completed,
}

/// display status of a single scheduled installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// covered by payments received so far
    Paid,
    /// due date already passed
    Overdue,
    /// due within the warning window
    DueSoon,
    /// the next unpaid installment, not yet near due
    Upcoming,
    /// a later unpaid installment
    Pending,
}

/// how a payment was made, with the reference interpretation chosen by the method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    GCash { reference: String },
    BankTransfer { reference: String },
    Check { check_number: String },
}

impl PaymentMethod {
    /// short name for display and error messages
    pub fn name(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::GCash { .. } => "gcash",
            PaymentMethod::BankTransfer { .. } => "transfer",
            PaymentMethod::Check { .. } => "check",
        }
    }

    /// reference number carried by the method, if any
    pub fn reference(&self) -> Option<&str> {
        match self {
            PaymentMethod::Cash => None,
            PaymentMethod::GCash { reference } => Some(reference),
            PaymentMethod::BankTransfer { reference } => Some(reference),
            PaymentMethod::Check { check_number } => Some(check_number),
        }
    }

    pub fn requires_reference(&self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }

    /// non-cash methods must carry a non-empty reference
    pub fn validate(&self) -> Result<()> {
        if self.requires_reference() {
            let empty = self
                .reference()
                .map(|r| r.trim().is_empty())
                .unwrap_or(true);
            if empty {
                return Err(LedgerError::MissingReference {
                    method: self.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// recorded payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub customer_id: CustomerId,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub method: PaymentMethod,
    pub sale_id: Option<SaleId>,
}
