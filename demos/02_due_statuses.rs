/// due statuses - watching installment statuses change with controlled time
use credit_ledger_rs::{
    CreditAgreement, CreditLedger, Money, PaymentMethod, SafeTimeProvider, TimeSource,
};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut ledger = CreditLedger::new();
    let customer_id = ledger.add_customer("Reyes Builders", "0918-111-2222", &time);

    let outcome = CreditAgreement::builder()
        .sale_total(Money::from_major(900))
        .terms(3)
        .build_with_time(&time)?;
    let agreement_id = ledger.open_agreement(customer_id, outcome, &time)?;

    let show = |ledger: &CreditLedger, label: &str, now| -> Result<(), Box<dyn std::error::Error>> {
        println!("\n{} ({})", label, time.now().format("%Y-%m-%d"));
        for row in ledger.installment_statuses(agreement_id, now)? {
            println!(
                "  #{} due {} {:?}",
                row.number,
                row.due_date.format("%Y-%m-%d"),
                row.status
            );
        }
        Ok(())
    };

    show(&ledger, "at creation", time.now())?;

    // three days before the first due date
    controller.advance(Duration::days(27));
    show(&ledger, "first installment near", time.now())?;

    // a day past it
    controller.advance(Duration::days(4));
    show(&ledger, "first installment missed", time.now())?;

    // the overdue installment gets paid
    ledger.record_payment(
        customer_id,
        Money::from_major(300),
        PaymentMethod::Cash,
        &time,
    )?;
    show(&ledger, "after catching up", time.now())?;

    Ok(())
}
