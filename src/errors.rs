use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::AgreementStatus;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("reference required for {method} payments")]
    MissingReference {
        method: String,
    },

    #[error("payment exceeds outstanding balance: available {available}, requested {requested}")]
    PaymentExceedsBalance {
        available: Money,
        requested: Money,
    },

    #[error("agreement would start with non-positive debt: sale total {sale_total}, paid upfront {paid_upfront}")]
    NonPositiveDebt {
        sale_total: Money,
        paid_upfront: Money,
    },

    #[error("invalid term count: {terms}")]
    InvalidTermCount {
        terms: u32,
    },

    #[error("agreement not active: current status is {status:?}")]
    AgreementNotActive {
        status: AgreementStatus,
    },

    #[error("customer not found: {id}")]
    CustomerNotFound {
        id: Uuid,
    },

    #[error("agreement not found: {id}")]
    AgreementNotFound {
        id: Uuid,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
