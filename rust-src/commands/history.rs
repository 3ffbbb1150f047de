//! History command - payment change log.

use anyhow::Result;

use crate::ledger::Ledger;


/// Show payment change history, newest first.
pub fn run(ledger: &Ledger, year: i32, member: Option<&str>, limit: Option<usize>) -> Result<()> {
    let history = ledger.get_history(year, member, limit);

    if history.is_empty() {
        match member {
            Some(name) => println!("No payment changes recorded for {name} in {year}."),
            None => println!("No payment changes recorded for {year}."),
        }
        return Ok(());
    }

    println!("Payment history for {year} (newest first):");
    for entry in &history {
        println!(
            "  {}  {:<20} {}  {:<13} {} -> {}",
            entry.timestamp,
            entry.member,
            entry.month,
            entry.action.as_str(),
            entry.old_status,
            entry.new_status,
        );
    }

    Ok(())
}
