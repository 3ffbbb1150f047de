//! Payment recording commands.

use anyhow::Result;

use crate::auth::AuthorizedCaller;
use crate::models::Month;


/// Set the paid flag for one member and month.
pub fn set(caller: &AuthorizedCaller, year: i32, member: &str, month: Month, paid: bool) -> Result<()> {
    let changed = caller.ledger().set_payment(year, member, month, paid)?;
    let label = if paid { "paid" } else { "unpaid" };

    if changed {
        println!("\x1b[32m+ Marked {member} {label} for {month} {year}\x1b[0m");
    } else {
        println!("\x1b[33m{member} was already {label} for {month} {year}\x1b[0m");
    }

    Ok(())
}


/// Set the paid flag for consecutive months starting at `start`.
pub fn bulk(
    caller: &AuthorizedCaller,
    year: i32,
    member: &str,
    start: Month,
    count: usize,
    paid: bool,
) -> Result<()> {
    let months = Month::cycle_from(start, count);
    let changed = caller.ledger().bulk_set_payments(year, member, &months, paid)?;

    let codes: Vec<&str> = months.iter().map(|m| m.code()).collect();
    let label = if paid { "paid" } else { "unpaid" };
    println!(
        "\x1b[32m+ Marked {member} {label} for {} ({changed} change{})\x1b[0m",
        codes.join(", "),
        if changed == 1 { "" } else { "s" },
    );

    Ok(())
}
