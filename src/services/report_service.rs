//! Plain-text library report, the format staff export from the reports tab

use chrono::NaiveDate;
use std::fmt::Write;

use crate::services::Ledger;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `library_report_<yyyy-MM-dd>.txt`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("library_report_{}.txt", date.format(DATE_FORMAT))
}

/// Renders the full report as of the ledger's current date
pub fn render_report(ledger: &Ledger) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(ledger, &mut out);
    out
}

fn write_report(ledger: &Ledger, out: &mut String) -> std::fmt::Result {
    let today = ledger.today();

    writeln!(out, "=== Library Report ===")?;
    writeln!(out, "Date: {}", today.format(DATE_FORMAT))?;
    writeln!(out)?;
    writeln!(out, "Total Books: {}", ledger.total_books())?;
    writeln!(out, "Total Members: {}", ledger.total_members())?;
    writeln!(out, "Active Loans: {}", ledger.active_loans_count())?;
    writeln!(out, "Overdue Books: {}", ledger.overdue_count())?;
    writeln!(
        out,
        "Total Fines Collected: ${:.2}",
        ledger.total_fines_collected()
    )?;
    writeln!(
        out,
        "Outstanding Fines: ${:.2}",
        ledger.total_outstanding_fines()
    )?;

    writeln!(out, "\n=== Books ===")?;
    for b in ledger.books() {
        writeln!(
            out,
            "  {}. {} by {} [{}] - {}, Shelf {} (Qty: {}, Available: {})",
            b.id,
            b.title,
            b.author,
            b.genre_label(),
            b.section,
            b.shelf,
            b.quantity(),
            b.available_quantity()
        )?;
    }

    writeln!(out, "\n=== Members ===")?;
    for m in ledger.members() {
        writeln!(
            out,
            "  {}. {} ({}) - Borrowed: {}",
            m.id,
            m.name,
            m.email,
            ledger.member_borrowed_count(m.id)
        )?;
    }

    writeln!(out, "\n=== Active Transactions ===")?;
    for t in ledger.active_transactions() {
        writeln!(
            out,
            "  {}. {} -> {} (Due: {})",
            t.id,
            t.book_title,
            t.member_name,
            t.due_date.format(DATE_FORMAT)
        )?;
    }

    writeln!(out, "\n=== Overdue Transactions ===")?;
    for t in ledger.overdue_transactions() {
        writeln!(
            out,
            "  {}. {} -> {} (Due: {}, Fine: ${:.2})",
            t.id,
            t.book_title,
            t.member_name,
            t.due_date.format(DATE_FORMAT),
            ledger.fine_of(&t)
        )?;
    }

    Ok(())
}
