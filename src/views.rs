/// serializable views composed for presentation and export collaborators
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agreement::{CreditAgreement, Installment};
use crate::config::LedgerConfig;
use crate::customer::Customer;
use crate::decimal::Money;
use crate::errors::Result;
use crate::ledger::CreditLedger;
use crate::types::{AgreementId, AgreementStatus, CustomerId, SaleId};

/// view of one agreement with its classified installment rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementView {
    pub id: AgreementId,
    pub status: AgreementStatus,
    pub principal_amount: Money,
    pub remaining_balance: Money,
    pub total_paid: Money,
    pub monthly_payment: Money,
    pub total_terms: u32,
    pub remaining_terms: u32,
    pub next_payment_due: Option<DateTime<Utc>>,
    pub due_date: DateTime<Utc>,
    pub installments: Vec<Installment>,
    pub sale_id: Option<SaleId>,
}

impl AgreementView {
    pub fn from_agreement(agreement: &CreditAgreement, today: DateTime<Utc>) -> Self {
        Self::from_agreement_with_config(agreement, today, &LedgerConfig::standard())
    }

    pub fn from_agreement_with_config(
        agreement: &CreditAgreement,
        today: DateTime<Utc>,
        config: &LedgerConfig,
    ) -> Self {
        Self {
            id: agreement.id,
            status: agreement.status,
            principal_amount: agreement.principal_amount,
            remaining_balance: agreement.remaining_balance,
            total_paid: agreement.total_paid(),
            monthly_payment: agreement.monthly_payment,
            total_terms: agreement.total_terms,
            remaining_terms: agreement.remaining_terms,
            next_payment_due: agreement.next_payment_due,
            due_date: agreement.due_date,
            installments: agreement.installments_with_config(today, config),
            sale_id: agreement.sale_id,
        }
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// view of a customer with agreements composed by lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerView {
    pub id: CustomerId,
    pub name: String,
    pub contact: String,
    pub credit_balance: Money,
    /// recomputed from the agreements, for auditing the denormalized balance
    pub outstanding_balance: Money,
    pub last_payment_date: Option<DateTime<Utc>>,
    pub agreements: Vec<AgreementView>,
}

impl CustomerView {
    pub fn from_ledger(
        ledger: &CreditLedger,
        customer: &Customer,
        today: DateTime<Utc>,
    ) -> Result<Self> {
        let agreements = ledger
            .agreements_for(customer.id)?
            .into_iter()
            .map(|a| AgreementView::from_agreement_with_config(a, today, ledger.config()))
            .collect();

        Ok(Self {
            id: customer.id,
            name: customer.name.clone(),
            contact: customer.contact.clone(),
            credit_balance: customer.credit_balance,
            outstanding_balance: ledger.outstanding_balance(customer.id)?,
            last_payment_date: customer.last_payment_date,
            agreements,
        })
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl CreditLedger {
    /// composed view of one customer for presentation code
    pub fn customer_view(&self, customer_id: CustomerId, today: DateTime<Utc>) -> Result<CustomerView> {
        let customer = self.customer(customer_id)?;
        CustomerView::from_ledger(self, customer, today)
    }
}
