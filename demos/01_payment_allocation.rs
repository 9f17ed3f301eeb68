/// payment allocation - one payment spanning several agreements
use credit_ledger_rs::{
    CreditAgreement, CreditLedger, Money, PaymentMethod, SafeTimeProvider, TimeSource,
};
use chrono::{TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));

    let mut ledger = CreditLedger::new();
    let customer_id = ledger.add_customer("Santos Supply", "0917-555-0000", &time);

    // two outstanding credit sales, oldest first
    for total in [500, 300] {
        let outcome = CreditAgreement::builder()
            .sale_total(Money::from_major(total))
            .build_with_time(&time)?;
        ledger.open_agreement(customer_id, outcome, &time)?;
    }
    println!(
        "customer owes {}",
        ledger.customer(customer_id)?.credit_balance
    );

    // a 700 gcash payment settles the first agreement and dents the second
    let result = ledger.record_payment(
        customer_id,
        Money::from_major(700),
        PaymentMethod::GCash {
            reference: "GC-88213".to_string(),
        },
        &time,
    )?;

    for application in &result.applications {
        println!(
            "agreement {}: applied {}, remaining {}{}",
            application.agreement_id,
            application.amount_applied,
            application.new_balance,
            if application.completed { " (completed)" } else { "" },
        );
    }
    println!("remaining balance: {}", result.updated_balance);
    println!("unallocated remainder: {}", result.unallocated_remainder);

    // drain the event trail
    for event in ledger.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}
