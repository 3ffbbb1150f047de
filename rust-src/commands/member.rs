//! Member roster commands.

use anyhow::Result;

use crate::auth::AuthorizedCaller;


/// Add a member to a year's roster.
pub fn add(caller: &AuthorizedCaller, year: i32, name: &str) -> Result<()> {
    if caller.ledger().add_member(year, name)? {
        println!("\x1b[32m+ Added {} to {year}\x1b[0m", name.trim());
    } else {
        println!("\x1b[33m{} is already on the {year} roster\x1b[0m", name.trim());
    }

    Ok(())
}


/// Remove a member from a year's roster.
pub fn remove(caller: &AuthorizedCaller, year: i32, name: &str) -> Result<()> {
    if caller.ledger().remove_member(year, name)? {
        println!("\x1b[32m+ Removed {name} from {year}\x1b[0m");
        println!("\x1b[2mPayment history entries for {name} were kept.\x1b[0m");
    } else {
        println!("\x1b[33m{name} is not on the {year} roster\x1b[0m");
    }

    Ok(())
}
