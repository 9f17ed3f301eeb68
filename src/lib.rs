pub mod agreement;
pub mod allocator;
pub mod config;
pub mod customer;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod factory;
pub mod ledger;
pub mod schedule;
pub mod status;
pub mod types;
pub mod views;

// re-export key types
pub use agreement::{CreditAgreement, Installment};
pub use allocator::{AgreementAllocation, AllocationOutcome, PaymentAllocator, PaymentRequest};
pub use config::{LedgerConfig, DUE_SOON_WINDOW_DAYS, INSTALLMENT_INTERVAL_DAYS};
pub use customer::Customer;
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use factory::{AgreementBuilder, AgreementOutcome};
pub use ledger::{AllocationResult, CreditLedger};
pub use schedule::{final_due_date, generate_schedule, generate_schedule_with_interval};
pub use status::{classify_installment, classify_with_window};
pub use types::{
    AgreementId, AgreementStatus, CustomerId, InstallmentStatus, Payment, PaymentId,
    PaymentMethod, SaleId,
};
pub use views::{AgreementView, CustomerView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
