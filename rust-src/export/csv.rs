//! CSV rendering of a year's payment table.

use crate::aggregation::member_summary;
use crate::models::{Month, YearRecord};


/// Format an amount with the fixed currency symbol and two decimals.
pub fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}


/// Render the member/month payment table as CSV.
///
/// Columns: Member, Jan..Dec, Months Paid, Amount Paid, Amount Owed.
/// Month cells are "Yes"/"No"; amounts carry the currency symbol and
/// two decimals.
pub fn year_to_csv(record: &YearRecord) -> String {
    let mut out = String::from("Member");
    for month in Month::ALL {
        out.push(',');
        out.push_str(month.code());
    }
    out.push_str(",Months Paid,Amount Paid,Amount Owed\n");

    for member in &record.members {
        let summary = member_summary(record, member);

        out.push_str(&csv_field(member));
        for month in Month::ALL {
            out.push(',');
            out.push_str(if record.payment_status(member, month) {
                "Yes"
            } else {
                "No"
            });
        }
        out.push_str(&format!(
            ",{},{},{}\n",
            summary.months_paid,
            format_currency(summary.amount_paid),
            format_currency(summary.amount_owed),
        ));
    }

    out
}


/// Quote a field when it contains CSV metacharacters.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_record() -> YearRecord {
        let mut record = YearRecord::new(2024);
        record.members.push("Alice".to_string());
        record.members.push("Bob".to_string());

        let alice = record.payments.entry("Alice".to_string()).or_default();
        for month in [Month::Jan, Month::Feb, Month::Mar] {
            alice.insert(month, true);
        }
        record.payments.entry("Bob".to_string()).or_default();
        record
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(150.0), "$150.00");
        assert_eq!(format_currency(0.5), "$0.50");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn test_header_row() {
        let record = YearRecord::new(2024);
        let csv = year_to_csv(&record);
        assert_eq!(
            csv,
            "Member,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,Nov,Dec,Months Paid,Amount Paid,Amount Owed\n"
        );
    }

    #[test]
    fn test_member_rows() {
        let csv = year_to_csv(&scenario_record());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);

        assert_eq!(
            lines[1],
            "Alice,Yes,Yes,Yes,No,No,No,No,No,No,No,No,No,3,$150.00,$450.00"
        );
        assert_eq!(
            lines[2],
            "Bob,No,No,No,No,No,No,No,No,No,No,No,No,0,$0.00,$600.00"
        );
    }

    #[test]
    fn test_member_name_with_comma_is_quoted() {
        let mut record = YearRecord::new(2024);
        record.members.push("Doe, Jane".to_string());
        record.payments.entry("Doe, Jane".to_string()).or_default();

        let csv = year_to_csv(&record);
        assert!(csv.contains("\"Doe, Jane\",No"));
    }
}
