use std::collections::HashMap;

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::agreement::{CreditAgreement, Installment};
use crate::allocator::{AgreementAllocation, PaymentAllocator, PaymentRequest};
use crate::config::LedgerConfig;
use crate::customer::Customer;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::factory::AgreementOutcome;
use crate::types::{AgreementId, CustomerId, Payment, PaymentId, PaymentMethod};

/// summary returned to the caller after a committed allocation
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    pub payment_id: PaymentId,
    pub applications: Vec<AgreementAllocation>,
    pub updated_balance: Money,
    pub allocated_total: Money,
    pub unallocated_remainder: Money,
}

/// the credit/installment ledger
///
/// Owns customers and agreements keyed by id (each agreement stored exactly
/// once; customers hold ordered references). Every mutating operation takes a
/// clock, validates up front, computes the full set of mutations on cloned
/// state, and commits them together; a failed operation leaves the ledger
/// exactly as it was.
pub struct CreditLedger {
    config: LedgerConfig,
    customers: HashMap<CustomerId, Customer>,
    agreements: HashMap<AgreementId, CreditAgreement>,
    payments: Vec<Payment>,
    events: EventStore,
}

impl CreditLedger {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::standard()).expect("standard config is valid")
    }

    pub fn with_config(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            customers: HashMap::new(),
            agreements: HashMap::new(),
            payments: Vec::new(),
            events: EventStore::new(),
        })
    }

    /// register a customer
    pub fn add_customer(
        &mut self,
        name: impl Into<String>,
        contact: impl Into<String>,
        time: &SafeTimeProvider,
    ) -> CustomerId {
        let id = Uuid::new_v4();
        let customer = Customer::new(id, name, contact, time.now());

        self.events.emit(Event::CustomerAdded {
            customer_id: id,
            name: customer.name.clone(),
            timestamp: customer.join_date,
        });
        self.customers.insert(id, customer);
        id
    }

    pub fn customer(&self, id: CustomerId) -> Result<&Customer> {
        self.customers
            .get(&id)
            .ok_or(LedgerError::CustomerNotFound { id })
    }

    pub fn agreement(&self, id: AgreementId) -> Result<&CreditAgreement> {
        self.agreements
            .get(&id)
            .ok_or(LedgerError::AgreementNotFound { id })
    }

    /// a customer's agreements in their stored (allocation) order
    pub fn agreements_for(&self, customer_id: CustomerId) -> Result<Vec<&CreditAgreement>> {
        let customer = self.customer(customer_id)?;
        customer
            .agreement_ids
            .iter()
            .map(|id| self.agreement(*id))
            .collect()
    }

    /// attach a factory outcome to a customer
    ///
    /// Stores the agreement, appends its id to the customer's ordered list,
    /// and grows the credit balance by the outcome's delta, as one atomic
    /// step.
    pub fn open_agreement(
        &mut self,
        customer_id: CustomerId,
        outcome: AgreementOutcome,
        time: &SafeTimeProvider,
    ) -> Result<AgreementId> {
        // validate before touching anything
        if !self.customers.contains_key(&customer_id) {
            return Err(LedgerError::CustomerNotFound { id: customer_id });
        }

        let AgreementOutcome {
            agreement,
            balance_delta,
        } = outcome;
        let agreement_id = agreement.id;
        let now = time.now();

        let customer = self.customers.get_mut(&customer_id).expect("checked above");
        let old_balance = customer.credit_balance;
        customer.credit_balance += balance_delta;
        customer.agreement_ids.push(agreement_id);
        let new_balance = customer.credit_balance;

        self.events.emit(Event::AgreementOpened {
            agreement_id,
            customer_id,
            principal: agreement.principal_amount,
            monthly_payment: agreement.monthly_payment,
            total_terms: agreement.total_terms,
            timestamp: now,
        });
        self.events.emit(Event::CustomerBalanceUpdated {
            customer_id,
            old_balance,
            new_balance,
            timestamp: now,
        });

        self.agreements.insert(agreement_id, agreement);
        Ok(agreement_id)
    }

    /// record a payment and allocate it across the customer's agreements
    ///
    /// Validation and allocation run against a snapshot of the current state;
    /// only a fully successful allocation is committed. Any remainder the
    /// eligible agreements could not absorb comes back in the result.
    pub fn record_payment(
        &mut self,
        customer_id: CustomerId,
        amount: Money,
        method: PaymentMethod,
        time: &SafeTimeProvider,
    ) -> Result<AllocationResult> {
        let now = time.now();
        let customer = self.customer(customer_id)?;
        let agreements: Vec<CreditAgreement> = self
            .agreements_for(customer_id)?
            .into_iter()
            .cloned()
            .collect();

        let allocator = PaymentAllocator::new(self.config);
        let request = PaymentRequest::new(customer_id, amount, method, now);
        let outcome = allocator.allocate(customer, &agreements, request)?;

        // commit: everything below is infallible
        let old_balance = self.customers[&customer_id].credit_balance;
        let new_balance = outcome.customer.credit_balance;

        self.events.emit(Event::PaymentReceived {
            payment_id: outcome.payment.id,
            customer_id,
            amount: outcome.payment.amount,
            method: outcome.payment.method.name().to_string(),
            timestamp: now,
        });

        for (updated, application) in outcome.agreements.iter().zip(&outcome.applications) {
            self.events.emit(Event::PaymentApplied {
                payment_id: outcome.payment.id,
                agreement_id: application.agreement_id,
                amount_applied: application.amount_applied,
                remaining_balance: application.new_balance,
                timestamp: now,
            });
            if application.completed {
                self.events.emit(Event::AgreementCompleted {
                    agreement_id: application.agreement_id,
                    customer_id,
                    final_payment_id: outcome.payment.id,
                    timestamp: now,
                });
            }
            self.agreements.insert(updated.id, updated.clone());
        }

        if outcome.unallocated_remainder.is_positive() {
            self.events.emit(Event::RemainderUnallocated {
                payment_id: outcome.payment.id,
                customer_id,
                amount: outcome.unallocated_remainder,
                timestamp: now,
            });
        }

        self.events.emit(Event::CustomerBalanceUpdated {
            customer_id,
            old_balance,
            new_balance,
            timestamp: now,
        });

        self.customers.insert(customer_id, outcome.customer);

        let result = AllocationResult {
            payment_id: outcome.payment.id,
            applications: outcome.applications,
            updated_balance: new_balance,
            allocated_total: outcome.allocated_total,
            unallocated_remainder: outcome.unallocated_remainder,
        };
        self.payments.push(outcome.payment);

        Ok(result)
    }

    /// customers currently carrying debt, for payment screens and alerts
    pub fn customers_with_debt(&self) -> Vec<&Customer> {
        self.customers.values().filter(|c| c.has_debt()).collect()
    }

    /// recomputed outstanding balance: the audit figure against the
    /// incrementally maintained credit_balance
    pub fn outstanding_balance(&self, customer_id: CustomerId) -> Result<Money> {
        Ok(self
            .agreements_for(customer_id)?
            .iter()
            .filter(|a| a.is_active())
            .fold(Money::ZERO, |acc, a| acc + a.remaining_balance))
    }

    /// classified installment rows for one agreement
    pub fn installment_statuses(
        &self,
        agreement_id: AgreementId,
        today: DateTime<Utc>,
    ) -> Result<Vec<Installment>> {
        Ok(self
            .agreement(agreement_id)?
            .installments_with_config(today, &self.config))
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}

impl Default for CreditLedger {
    fn default() -> Self {
        Self::new()
    }
}
