use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::agreement::CreditAgreement;
use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::schedule::generate_schedule_with_interval;
use crate::types::{AgreementStatus, SaleId};

/// result of building an agreement
///
/// `balance_delta` is the amount the customer's credit balance must grow by;
/// the factory performs no persistence itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AgreementOutcome {
    pub agreement: CreditAgreement,
    pub balance_delta: Money,
}

/// builder for credit agreements
///
/// Two register modes, both starting from a finalized sale total:
/// - full credit: nothing paid at sale time, one installment for the whole
///   total, due 30 days out
/// - partial with terms: `paid_upfront` collected at the register, the rest
///   split into N unrounded installments
///
/// The builder is strictly more general than the register surface: an
/// explicit term count with nothing paid upfront splits the whole total into
/// N installments. Ledgers running a non-standard interval pass their config
/// so the schedule matches the allocator's cadence.
pub struct AgreementBuilder {
    sale_total: Option<Money>,
    paid_upfront: Money,
    terms: u32,
    start_date: Option<DateTime<Utc>>,
    sale_id: Option<SaleId>,
    notes: Option<String>,
    config: LedgerConfig,
}

impl CreditAgreement {
    pub fn builder() -> AgreementBuilder {
        AgreementBuilder::new()
    }
}

impl AgreementBuilder {
    pub fn new() -> Self {
        Self {
            sale_total: None,
            paid_upfront: Money::ZERO,
            terms: 1,
            start_date: None,
            sale_id: None,
            notes: None,
            config: LedgerConfig::standard(),
        }
    }

    pub fn sale_total(mut self, total: Money) -> Self {
        self.sale_total = Some(total);
        self
    }

    pub fn paid_upfront(mut self, amount: Money) -> Self {
        self.paid_upfront = amount;
        self
    }

    pub fn terms(mut self, terms: u32) -> Self {
        self.terms = terms;
        self
    }

    pub fn start_date(mut self, date: DateTime<Utc>) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn sale_id(mut self, sale_id: SaleId) -> Self {
        self.sale_id = Some(sale_id);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// build with the provided clock when no start date was set
    pub fn build_with_time(self, time: &SafeTimeProvider) -> Result<AgreementOutcome> {
        let now = time.now();
        self.build_at(now)
    }

    /// build with an explicit creation instant
    pub fn build_at(self, now: DateTime<Utc>) -> Result<AgreementOutcome> {
        let sale_total = self.sale_total.ok_or(LedgerError::InvalidConfiguration {
            message: "sale total required".to_string(),
        })?;

        if !sale_total.is_positive() {
            return Err(LedgerError::NonPositiveDebt {
                sale_total,
                paid_upfront: self.paid_upfront,
            });
        }
        if self.paid_upfront.is_negative() {
            return Err(LedgerError::InvalidPaymentAmount {
                amount: self.paid_upfront,
            });
        }
        if self.terms < 1 {
            return Err(LedgerError::InvalidTermCount { terms: self.terms });
        }

        // an agreement must start with positive debt
        let principal = sale_total - self.paid_upfront;
        if !principal.is_positive() {
            return Err(LedgerError::NonPositiveDebt {
                sale_total,
                paid_upfront: self.paid_upfront,
            });
        }

        let start_date = self.start_date.unwrap_or(now);
        let monthly_payment = principal / Decimal::from(self.terms);
        let payment_dates = generate_schedule_with_interval(
            start_date,
            self.terms,
            self.config.installment_interval_days,
        );

        // terms >= 1, so the schedule is never empty
        let next_payment_due = payment_dates[0];
        let due_date = *payment_dates.last().unwrap();

        let agreement = CreditAgreement {
            id: Uuid::new_v4(),
            principal_amount: principal,
            remaining_balance: principal,
            monthly_payment,
            total_terms: self.terms,
            remaining_terms: self.terms,
            start_date,
            due_date,
            next_payment_due: Some(next_payment_due),
            payment_dates: Some(payment_dates),
            payment_history: Vec::new(),
            status: AgreementStatus::Active,
            created_at: now,
            sale_id: self.sale_id,
            notes: self.notes,
        };

        Ok(AgreementOutcome {
            balance_delta: principal,
            agreement,
        })
    }
}

impl Default for AgreementBuilder {
    fn default() -> Self {
        Self::new()
    }
}
