/// quick start - a credit sale, a payment, a printed ledger view
use credit_ledger_rs::{
    CreditAgreement, CreditLedger, Money, PaymentMethod, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);
    let mut ledger = CreditLedger::new();

    // a customer buys 12,000 worth of materials, pays 3,000 at the counter,
    // the rest over 3 installments
    let customer_id = ledger.add_customer("Reyes Builders", "0918-111-2222", &time);

    let outcome = CreditAgreement::builder()
        .sale_total(Money::from_major(12_000))
        .paid_upfront(Money::from_major(3_000))
        .terms(3)
        .build_with_time(&time)?;
    ledger.open_agreement(customer_id, outcome, &time)?;

    // first installment arrives in cash
    let result = ledger.record_payment(
        customer_id,
        Money::from_major(3_000),
        PaymentMethod::Cash,
        &time,
    )?;
    println!("allocated {} across {} agreement(s)", result.allocated_total, result.applications.len());

    // print current state
    let view = ledger.customer_view(customer_id, time.now())?;
    println!("{}", view.to_json_pretty()?);

    Ok(())
}
