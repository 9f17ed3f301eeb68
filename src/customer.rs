use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AgreementId, CustomerId};

/// a customer carrying (or able to carry) installment debt
///
/// Agreements are stored once in the ledger, keyed by id; the customer holds
/// an ordered list of references only. The list only grows; allocation order
/// is the stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub contact: String,
    /// denormalized total owed, maintained incrementally by the ledger;
    /// intended to equal the sum of remaining balances over the customer's
    /// agreements
    pub credit_balance: Money,
    pub agreement_ids: Vec<AgreementId>,
    pub join_date: DateTime<Utc>,
    pub last_payment_date: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        contact: impl Into<String>,
        join_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            contact: contact.into(),
            credit_balance: Money::ZERO,
            agreement_ids: Vec::new(),
            join_date,
            last_payment_date: None,
        }
    }

    /// whether this customer currently owes anything
    pub fn has_debt(&self) -> bool {
        self.credit_balance.is_positive()
    }
}
