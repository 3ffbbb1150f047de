//! Settings command.

use anyhow::Result;

use crate::auth::AuthorizedCaller;
use crate::export::format_currency;


/// Overwrite a year's subscription settings.
pub fn update(caller: &AuthorizedCaller, year: i32, total_price: f64, max_slots: u32) -> Result<()> {
    caller.ledger().update_settings(year, total_price, max_slots)?;

    let record = caller.ledger().store().load(year);
    println!("\x1b[32m+ Updated settings for {year}\x1b[0m");
    println!("  Total Price:    {}", format_currency(total_price));
    println!("  Max Slots:      {max_slots}");
    println!("  Price per Slot: {}", format_currency(record.price_per_slot()));

    Ok(())
}
