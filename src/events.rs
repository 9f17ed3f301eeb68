use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AgreementId, CustomerId, PaymentId};

/// all events emitted by ledger operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // customer events
    CustomerAdded {
        customer_id: CustomerId,
        name: String,
        timestamp: DateTime<Utc>,
    },
    CustomerBalanceUpdated {
        customer_id: CustomerId,
        old_balance: Money,
        new_balance: Money,
        timestamp: DateTime<Utc>,
    },

    // agreement lifecycle events
    AgreementOpened {
        agreement_id: AgreementId,
        customer_id: CustomerId,
        principal: Money,
        monthly_payment: Money,
        total_terms: u32,
        timestamp: DateTime<Utc>,
    },
    AgreementCompleted {
        agreement_id: AgreementId,
        customer_id: CustomerId,
        final_payment_id: PaymentId,
        timestamp: DateTime<Utc>,
    },

    // payment events
    PaymentReceived {
        payment_id: PaymentId,
        customer_id: CustomerId,
        amount: Money,
        method: String,
        timestamp: DateTime<Utc>,
    },
    PaymentApplied {
        payment_id: PaymentId,
        agreement_id: AgreementId,
        amount_applied: Money,
        remaining_balance: Money,
        timestamp: DateTime<Utc>,
    },
    RemainderUnallocated {
        payment_id: PaymentId,
        customer_id: CustomerId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
