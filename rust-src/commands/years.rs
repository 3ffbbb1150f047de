//! Year management commands.

use anyhow::Result;

use crate::auth::AuthorizedCaller;
use crate::storage::RecordStore;


/// List all years with ledger data.
pub fn list(store: &RecordStore) -> Result<()> {
    let years = store.list_years();

    if years.is_empty() {
        println!("No ledger data found. Run 'ssp create-year <year>' to start one.");
        return Ok(());
    }

    println!("Years with ledger data:");
    for year in years {
        let record = store.load(year);
        println!(
            "  {year}  {} member{}, updated {}",
            record.members.len(),
            if record.members.len() == 1 { "" } else { "s" },
            record.updated_at,
        );
    }

    Ok(())
}


/// Create an empty ledger for a year.
pub fn create(store: &RecordStore, year: i32) -> Result<()> {
    if store.year_exists(year) {
        println!("\x1b[33mYear {year} already has ledger data\x1b[0m");
        return Ok(());
    }

    store.create_year(year)?;
    println!("\x1b[32m+ Created ledger for {year}\x1b[0m");

    Ok(())
}


/// Copy the member roster from one year into another.
pub fn copy_members(caller: &AuthorizedCaller, source_year: i32, target_year: i32) -> Result<()> {
    let copied = caller
        .ledger()
        .copy_members_forward(source_year, target_year)?;

    println!("\x1b[32m+ Copied {copied} member(s) from {source_year} to {target_year}\x1b[0m");
    println!("\x1b[2mPayment flags in {target_year} were reset; history was kept.\x1b[0m");

    Ok(())
}
