use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agreement::CreditAgreement;
use crate::config::LedgerConfig;
use crate::customer::Customer;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{AgreementId, CustomerId, Payment, PaymentMethod, SaleId};

/// an incoming payment to allocate across a customer's agreements
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub customer_id: CustomerId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub date: DateTime<Utc>,
    pub sale_id: Option<SaleId>,
}

impl PaymentRequest {
    pub fn new(
        customer_id: CustomerId,
        amount: Money,
        method: PaymentMethod,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            customer_id,
            amount,
            method,
            date,
            sale_id: None,
        }
    }

    /// synchronous validation against the customer's recorded balance
    pub fn validate(&self, available: Money) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(LedgerError::InvalidPaymentAmount { amount: self.amount });
        }
        self.method.validate()?;
        if self.amount > available {
            return Err(LedgerError::PaymentExceedsBalance {
                available,
                requested: self.amount,
            });
        }
        Ok(())
    }
}

/// how much of a payment landed on one agreement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementAllocation {
    pub agreement_id: AgreementId,
    pub amount_applied: Money,
    pub new_balance: Money,
    pub completed: bool,
}

/// proposed mutations from one allocation
///
/// Everything in here is cloned state; the caller commits it as one unit or
/// discards it. The allocator never mutates its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    pub payment: Payment,
    pub customer: Customer,
    pub agreements: Vec<CreditAgreement>,
    pub applications: Vec<AgreementAllocation>,
    pub allocated_total: Money,
    /// pool left over after every eligible agreement was settled; reported,
    /// never silently dropped
    pub unallocated_remainder: Money,
}

/// allocates payments across a customer's agreements in stored order
pub struct PaymentAllocator {
    config: LedgerConfig,
}

impl PaymentAllocator {
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    /// allocate a payment
    ///
    /// `agreements` must be the customer's agreements in their stored order;
    /// non-active or zero-balance entries are skipped. Each eligible
    /// agreement absorbs `min(pool, remaining_balance)` until the pool runs
    /// out. Total applied never exceeds the request amount.
    pub fn allocate(
        &self,
        customer: &Customer,
        agreements: &[CreditAgreement],
        request: PaymentRequest,
    ) -> Result<AllocationOutcome> {
        request.validate(customer.credit_balance)?;

        let payment_id = Uuid::new_v4();
        let next_due = request.date + Duration::days(self.config.installment_interval_days as i64);

        let mut pool = request.amount;
        let mut updated_agreements = Vec::new();
        let mut applications = Vec::new();

        for agreement in agreements {
            if !pool.is_positive() {
                break;
            }
            if !agreement.is_active() {
                continue;
            }

            let slice = pool.min(agreement.remaining_balance);

            let mut updated = agreement.clone();
            updated.apply_payment(slice, payment_id, next_due)?;

            pool -= slice;
            applications.push(AgreementAllocation {
                agreement_id: updated.id,
                amount_applied: slice,
                new_balance: updated.remaining_balance,
                completed: !updated.is_active(),
            });
            updated_agreements.push(updated);
        }

        let allocated_total = request.amount - pool;

        let mut updated_customer = customer.clone();
        updated_customer.credit_balance =
            (updated_customer.credit_balance - allocated_total).max(Money::ZERO);
        updated_customer.last_payment_date = Some(request.date);

        let payment = Payment {
            id: payment_id,
            customer_id: request.customer_id,
            amount: request.amount,
            date: request.date,
            method: request.method,
            sale_id: request.sale_id,
        };

        Ok(AllocationOutcome {
            payment,
            customer: updated_customer,
            agreements: updated_agreements,
            applications,
            allocated_total,
            unallocated_remainder: pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn setup(balances: &[i64]) -> (Customer, Vec<CreditAgreement>) {
        let mut customer = Customer::new(Uuid::new_v4(), "test", "none", start());
        let mut agreements = Vec::new();

        for &b in balances {
            let outcome = CreditAgreement::builder()
                .sale_total(Money::from_major(b))
                .build_at(start())
                .unwrap();
            customer.agreement_ids.push(outcome.agreement.id);
            customer.credit_balance += outcome.balance_delta;
            agreements.push(outcome.agreement);
        }

        (customer, agreements)
    }

    fn cash(customer: &Customer, amount: i64) -> PaymentRequest {
        PaymentRequest::new(
            customer.id,
            Money::from_major(amount),
            PaymentMethod::Cash,
            start() + Duration::days(10),
        )
    }

    #[test]
    fn test_spans_agreements_in_order() {
        let (customer, agreements) = setup(&[500, 300]);
        let allocator = PaymentAllocator::new(LedgerConfig::standard());

        let outcome = allocator
            .allocate(&customer, &agreements, cash(&customer, 700))
            .unwrap();

        assert_eq!(outcome.applications.len(), 2);

        let first = &outcome.applications[0];
        assert_eq!(first.amount_applied, Money::from_major(500));
        assert_eq!(first.new_balance, Money::ZERO);
        assert!(first.completed);

        let second = &outcome.applications[1];
        assert_eq!(second.amount_applied, Money::from_major(200));
        assert_eq!(second.new_balance, Money::from_major(100));
        assert!(!second.completed);

        assert_eq!(outcome.allocated_total, Money::from_major(700));
        assert_eq!(outcome.unallocated_remainder, Money::ZERO);
        assert_eq!(outcome.customer.credit_balance, Money::from_major(100));
        assert_eq!(
            outcome.customer.last_payment_date,
            Some(start() + Duration::days(10))
        );
    }

    #[test]
    fn test_inputs_untouched() {
        let (customer, agreements) = setup(&[500, 300]);
        let allocator = PaymentAllocator::new(LedgerConfig::standard());

        allocator
            .allocate(&customer, &agreements, cash(&customer, 700))
            .unwrap();

        // proposed state only; originals unchanged until the ledger commits
        assert_eq!(customer.credit_balance, Money::from_major(800));
        assert_eq!(agreements[0].remaining_balance, Money::from_major(500));
        assert!(agreements[0].payment_history.is_empty());
    }

    #[test]
    fn test_completed_agreements_skipped() {
        let (customer, mut agreements) = setup(&[500, 300]);

        // settle the first out of band
        let next_due = start() + Duration::days(30);
        agreements[0]
            .apply_payment(Money::from_major(500), Uuid::new_v4(), next_due)
            .unwrap();
        let mut customer = customer;
        customer.credit_balance = Money::from_major(300);

        let allocator = PaymentAllocator::new(LedgerConfig::standard());
        let outcome = allocator
            .allocate(&customer, &agreements, cash(&customer, 200))
            .unwrap();

        assert_eq!(outcome.applications.len(), 1);
        assert_eq!(outcome.applications[0].agreement_id, agreements[1].id);
        assert_eq!(outcome.applications[0].amount_applied, Money::from_major(200));
    }

    #[test]
    fn test_overpayment_rejected() {
        let (customer, agreements) = setup(&[500]);
        let allocator = PaymentAllocator::new(LedgerConfig::standard());

        let err = allocator.allocate(&customer, &agreements, cash(&customer, 501));
        assert!(matches!(err, Err(LedgerError::PaymentExceedsBalance { .. })));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let (customer, agreements) = setup(&[500]);
        let allocator = PaymentAllocator::new(LedgerConfig::standard());

        let err = allocator.allocate(&customer, &agreements, cash(&customer, 0));
        assert!(matches!(err, Err(LedgerError::InvalidPaymentAmount { .. })));
    }

    #[test]
    fn test_missing_reference_rejected() {
        let (customer, agreements) = setup(&[500]);
        let allocator = PaymentAllocator::new(LedgerConfig::standard());

        let request = PaymentRequest::new(
            customer.id,
            Money::from_major(100),
            PaymentMethod::GCash {
                reference: String::new(),
            },
            start(),
        );

        let err = allocator.allocate(&customer, &agreements, request);
        assert!(matches!(err, Err(LedgerError::MissingReference { .. })));
    }

    #[test]
    fn test_remainder_reported_on_balance_drift() {
        // recorded balance says 600 but eligible agreements only carry 500
        let (mut customer, agreements) = setup(&[500]);
        customer.credit_balance = Money::from_major(600);

        let allocator = PaymentAllocator::new(LedgerConfig::standard());
        let outcome = allocator
            .allocate(&customer, &agreements, cash(&customer, 600))
            .unwrap();

        assert_eq!(outcome.allocated_total, Money::from_major(500));
        assert_eq!(outcome.unallocated_remainder, Money::from_major(100));
        // only the allocated part leaves the balance
        assert_eq!(outcome.customer.credit_balance, Money::from_major(100));
    }

    #[test]
    fn test_allocated_never_exceeds_amount() {
        let (customer, agreements) = setup(&[250, 250, 250]);
        let allocator = PaymentAllocator::new(LedgerConfig::standard());

        let outcome = allocator
            .allocate(&customer, &agreements, cash(&customer, 600))
            .unwrap();

        let applied: Money = outcome
            .applications
            .iter()
            .fold(Money::ZERO, |acc, a| acc + a.amount_applied);
        assert_eq!(applied, outcome.allocated_total);
        assert!(applied <= Money::from_major(600));

        // no negative balances anywhere
        for a in &outcome.agreements {
            assert!(!a.remaining_balance.is_negative());
        }
    }

    #[test]
    fn test_partial_allocation_updates_terms_and_due_date() {
        let start_date = start();
        let outcome = CreditAgreement::builder()
            .sale_total(Money::from_major(900))
            .terms(3)
            .build_at(start_date)
            .unwrap();

        let mut customer = Customer::new(Uuid::new_v4(), "test", "none", start_date);
        customer.agreement_ids.push(outcome.agreement.id);
        customer.credit_balance = outcome.balance_delta;
        let agreements = vec![outcome.agreement];

        let allocator = PaymentAllocator::new(LedgerConfig::standard());
        let paid_on = start_date + Duration::days(25);
        let request = PaymentRequest::new(
            customer.id,
            Money::from_major(300),
            PaymentMethod::Cash,
            paid_on,
        );

        let result = allocator.allocate(&customer, &agreements, request).unwrap();
        let updated = &result.agreements[0];

        assert_eq!(updated.remaining_balance, Money::from_major(600));
        assert_eq!(updated.remaining_terms, 2);
        assert_eq!(updated.next_payment_due, Some(paid_on + Duration::days(30)));
        assert_eq!(updated.payment_history, vec![result.payment.id]);
    }
}
