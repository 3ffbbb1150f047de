//! Summary command - payment overview for one year.

use anyhow::Result;

use crate::aggregation::{member_summary, summarize};
use crate::export::format_currency;
use crate::storage::RecordStore;


/// Show the payment summary for a year.
pub fn run(store: &RecordStore, year: i32) -> Result<()> {
    let record = store.load(year);
    let summary = summarize(&record);

    println!("\n{}", "=".repeat(60));
    println!("{:^60}", format!("Subscription Payments {year}"));
    println!("{}\n", "=".repeat(60));

    if record.members.is_empty() {
        println!("No members on the roster. Run 'ssp member add {year} <name>' first.");
        return Ok(());
    }

    println!("OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  Members:            {:>14}", summary.total_members);
    println!("  Max Slots:          {:>14}", record.settings.max_slots);
    println!("  Price per Slot:     {:>14}", format_currency(summary.price_per_slot));
    println!("  Total Possible:     {:>14}", format_currency(summary.total_possible_amount));
    println!("  Total Paid:         {:>14}", format_currency(summary.total_paid_amount));
    println!("  Outstanding:        {:>14}", format_currency(summary.total_outstanding_amount));
    println!("  Payment Rate:       {:>13.1}%", summary.overall_payment_rate);

    println!("\nMEMBERS");
    println!("{}", "-".repeat(60));
    println!(
        "  {:<20} {:>4} {:>6} {:>11} {:>11} {:>6}",
        "Name", "Paid", "Unpaid", "Paid $", "Owed $", "Rate"
    );

    for member in &record.members {
        let ms = member_summary(&record, member);
        println!(
            "  {:<20} {:>4} {:>6} {:>11} {:>11} {:>5.1}%",
            member,
            ms.months_paid,
            ms.months_unpaid,
            format_currency(ms.amount_paid),
            format_currency(ms.amount_owed),
            ms.payment_rate,
        );
    }

    Ok(())
}
