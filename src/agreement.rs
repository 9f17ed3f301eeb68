use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::schedule::generate_schedule_with_interval;
use crate::status::classify_with_window;
use crate::types::{AgreementId, AgreementStatus, InstallmentStatus, PaymentId, SaleId};

/// an installment credit agreement attached to a customer
///
/// Created once, atomically with a credit sale; mutated only by payment
/// allocation; immutable once completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditAgreement {
    pub id: AgreementId,
    /// amount owed at creation, never changes
    pub principal_amount: Money,
    /// amount still owed; 0 <= remaining_balance <= principal_amount
    pub remaining_balance: Money,
    /// fixed installment amount computed at creation, not recomputed as the
    /// balance shrinks
    pub monthly_payment: Money,
    pub total_terms: u32,
    pub remaining_terms: u32,
    pub start_date: DateTime<Utc>,
    /// date of the final installment
    pub due_date: DateTime<Utc>,
    pub next_payment_due: Option<DateTime<Utc>>,
    /// precomputed schedule; absent on some stored agreements and regenerated
    /// on demand from start_date and total_terms
    pub payment_dates: Option<Vec<DateTime<Utc>>>,
    /// ordered audit trail of payment ids applied to this agreement
    pub payment_history: Vec<PaymentId>,
    pub status: AgreementStatus,
    pub created_at: DateTime<Utc>,
    pub sale_id: Option<SaleId>,
    pub notes: Option<String>,
}

/// one row of the composed installment view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position in the schedule
    pub number: u32,
    pub due_date: DateTime<Utc>,
    pub amount: Money,
    pub status: InstallmentStatus,
}

impl CreditAgreement {
    /// the repayment schedule, regenerated when not precomputed
    ///
    /// Regeneration is safe because the generator is idempotent over
    /// (start_date, total_terms).
    pub fn schedule(&self) -> Vec<DateTime<Utc>> {
        self.schedule_with_config(&LedgerConfig::standard())
    }

    /// the schedule under an explicit config; regeneration uses the
    /// configured interval
    pub fn schedule_with_config(&self, config: &LedgerConfig) -> Vec<DateTime<Utc>> {
        match &self.payment_dates {
            Some(dates) => dates.clone(),
            None => generate_schedule_with_interval(
                self.start_date,
                self.total_terms,
                config.installment_interval_days,
            ),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AgreementStatus::Active && self.remaining_balance.is_positive()
    }

    /// total allocated to this agreement so far
    pub fn total_paid(&self) -> Money {
        self.principal_amount - self.remaining_balance
    }

    /// cumulative amount scheduled through installment `index` (0-based)
    ///
    /// Clamped to the principal on the final installment so that unrounded
    /// division (e.g. 1000 / 3) still reconciles exactly.
    fn cumulative_due(&self, index: u32) -> Money {
        if index + 1 >= self.total_terms {
            self.principal_amount
        } else {
            self.monthly_payment * rust_decimal::Decimal::from(index + 1)
        }
    }

    /// whether installment `index` (0-based) is covered by payments received
    ///
    /// Amount-reconciled: cumulative paid vs cumulative scheduled, rather
    /// than inferring from the length of the payment history, so partial and
    /// out-of-order payments are counted correctly.
    pub fn is_installment_paid(&self, index: u32) -> bool {
        index < self.total_terms && self.total_paid() >= self.cumulative_due(index)
    }

    /// 0-based index of the first not-yet-paid installment
    pub fn earliest_unpaid_index(&self) -> Option<u32> {
        (0..self.total_terms).find(|&i| !self.is_installment_paid(i))
    }

    /// composed per-installment view with display statuses
    pub fn installments(&self, today: DateTime<Utc>) -> Vec<Installment> {
        self.installments_with_config(today, &LedgerConfig::standard())
    }

    /// installment view under an explicit config; the ledger passes its own
    /// so a shrunk due-soon window or interval carries through
    pub fn installments_with_config(
        &self,
        today: DateTime<Utc>,
        config: &LedgerConfig,
    ) -> Vec<Installment> {
        let earliest_unpaid = self.earliest_unpaid_index();

        self.schedule_with_config(config)
            .into_iter()
            .enumerate()
            .map(|(i, due_date)| {
                let i = i as u32;
                let status = classify_with_window(
                    due_date,
                    self.is_installment_paid(i),
                    earliest_unpaid == Some(i),
                    today,
                    config.due_soon_window_days,
                );
                Installment {
                    number: i + 1,
                    due_date,
                    amount: self.monthly_payment,
                    status,
                }
            })
            .collect()
    }

    /// installments left: ceil(remaining / monthly), 0 once settled
    pub fn recompute_remaining_terms(&self) -> u32 {
        if !self.remaining_balance.is_positive() || self.monthly_payment.is_zero() {
            return 0;
        }
        (self.remaining_balance.as_decimal() / self.monthly_payment.as_decimal())
            .ceil()
            .to_u32()
            .unwrap_or(0)
    }

    /// apply an allocated amount to this agreement
    ///
    /// `amount` must not exceed the remaining balance; the allocator computes
    /// it as min(pool, remaining). Completes the agreement when the balance
    /// reaches zero, otherwise recomputes the remaining terms and pushes the
    /// next due date out by `next_due`.
    pub(crate) fn apply_payment(
        &mut self,
        amount: Money,
        payment_id: PaymentId,
        next_due: DateTime<Utc>,
    ) -> Result<()> {
        if self.status != AgreementStatus::Active {
            return Err(LedgerError::AgreementNotActive { status: self.status });
        }
        if !amount.is_positive() || amount > self.remaining_balance {
            return Err(LedgerError::InvalidPaymentAmount { amount });
        }

        self.remaining_balance -= amount;
        self.payment_history.push(payment_id);

        if self.remaining_balance.is_positive() {
            self.remaining_terms = self.recompute_remaining_terms();
            self.next_payment_due = Some(next_due);
        } else {
            self.remaining_balance = Money::ZERO;
            self.remaining_terms = 0;
            self.next_payment_due = None;
            self.status = AgreementStatus::Completed;
        }

        Ok(())
    }
}
