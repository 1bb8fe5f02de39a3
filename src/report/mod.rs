//! Invoice rendering: the human-readable per-room statement for a
//! computed (not yet applied) bill split.
//!
//! Rendering is pure text construction; the caller supplies the issue
//! date and decides where the output goes (screen, file).

use std::fmt::Write as _;

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::config::InvoiceSettings;
use crate::core::services::{BillSplit, BillingService};
use crate::domain::Room;

const RULE: &str = "--------------------";

/// Renders the invoice for one room under a quoted split.
///
/// The room's stored balance is treated as the outstanding amount from
/// earlier bills; the new total previews what the balance becomes once
/// the split is applied.
pub fn render_invoice(
    room: &Room,
    split: &BillSplit,
    bill_amount: f64,
    settings: &InvoiceSettings,
    issue_date: NaiveDate,
) -> String {
    let charge = BillingService::room_charge(room, split);
    let without_subtotal = f64::from(room.no_laptop_count) * split.student_share;
    let with_rate = split.student_share + split.laptop_share;
    let with_subtotal = f64::from(room.laptop_count) * with_rate;
    let due_date = issue_date + Days::new(u64::from(settings.payment_window_days));

    let mut out = String::new();
    let _ = writeln!(out, "{}", settings.residence_name);
    let _ = writeln!(out);
    let _ = writeln!(out, "Utility bill");
    let _ = writeln!(out, "Total bill amount: {:.2}", bill_amount);
    let _ = writeln!(out, "Per-student rate: {:.2}", split.student_share);
    let _ = writeln!(out, "Laptop surcharge per owner: {:.2}", split.laptop_share);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out);
    let _ = writeln!(out, "Room share:");
    let _ = writeln!(out, "Responsible: {}", room.responsible_name);
    let _ = writeln!(out, "Room: {}", room.id);
    let _ = writeln!(out, "Occupants: {}", room.occupants());
    let _ = writeln!(out, "Without laptop: {}", room.no_laptop_count);
    let _ = writeln!(out, "With laptop: {}", room.laptop_count);
    let _ = writeln!(out);
    let _ = writeln!(out, "Without laptop:");
    let _ = writeln!(out, "- rate: {:.2}", split.student_share);
    let _ = writeln!(out, "- count: {}", room.no_laptop_count);
    let _ = writeln!(out, "- subtotal: {:.2}", without_subtotal);
    let _ = writeln!(out);
    let _ = writeln!(out, "With laptop:");
    let _ = writeln!(out, "- rate: {:.2}", with_rate);
    let _ = writeln!(out, "- count: {}", room.laptop_count);
    let _ = writeln!(out, "- subtotal: {:.2}", with_subtotal);
    let _ = writeln!(out);
    let _ = writeln!(out, "This bill: {:.2}", charge);
    let _ = writeln!(
        out,
        "Outstanding from earlier bills: {:.2}",
        room.accumulated_balance
    );
    let _ = writeln!(out, "New room total: {:.2}", room.accumulated_balance + charge);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out);
    let _ = writeln!(out, "Notes:");
    let _ = writeln!(
        out,
        "- Payment window: {} days from issue",
        settings.payment_window_days
    );
    let _ = writeln!(out, "- Due by: {}", due_date.format("%Y-%m-%d"));
    if settings.has_bank_details() {
        let _ = writeln!(out, "- Pay to:");
        let _ = writeln!(out, "  Bank: {}", settings.bank_name);
        let _ = writeln!(out, "  Account: {}", settings.account_number);
        let _ = writeln!(out, "  Holder: {}", settings.account_holder);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Issued: {}", issue_date.format("%Y-%m-%d"));
    out
}

/// File name used when an invoice is exported to disk.
pub fn invoice_file_name(room_id: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "invoice_room_{}_{}.txt",
        room_id,
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Room, BillSplit, InvoiceSettings, NaiveDate) {
        let mut room = Room::new("13");
        room.responsible_name = "Sami".into();
        room.laptop_count = 2;
        room.no_laptop_count = 3;
        room.accumulated_balance = 20.0;

        let split = BillSplit {
            student_share: 10.0,
            laptop_share: 25.0,
        };
        let settings = InvoiceSettings::default();
        let issued = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        (room, split, settings, issued)
    }

    #[test]
    fn invoice_shows_breakdown_and_totals() {
        let (room, split, settings, issued) = fixtures();
        let text = render_invoice(&room, &split, 100.0, &settings, issued);

        assert!(text.contains("Room: 13"));
        assert!(text.contains("Responsible: Sami"));
        assert!(text.contains("Per-student rate: 10.00"));
        assert!(text.contains("Laptop surcharge per owner: 25.00"));
        // 3 x 10 without, 2 x 35 with, 100 total on top of 20 outstanding.
        assert!(text.contains("- subtotal: 30.00"));
        assert!(text.contains("- subtotal: 70.00"));
        assert!(text.contains("This bill: 100.00"));
        assert!(text.contains("Outstanding from earlier bills: 20.00"));
        assert!(text.contains("New room total: 120.00"));
    }

    #[test]
    fn due_date_is_issue_plus_payment_window() {
        let (room, split, settings, issued) = fixtures();
        let text = render_invoice(&room, &split, 100.0, &settings, issued);
        assert!(text.contains("Issued: 2025-03-01"));
        assert!(text.contains("Due by: 2025-03-04"));
    }

    #[test]
    fn bank_block_only_renders_when_configured() {
        let (room, split, mut settings, issued) = fixtures();
        let plain = render_invoice(&room, &split, 100.0, &settings, issued);
        assert!(!plain.contains("Pay to:"));

        settings.bank_name = "Cooperative Bank".into();
        settings.account_number = "3170319515".into();
        settings.account_holder = "H. Fares".into();
        let with_bank = render_invoice(&room, &split, 100.0, &settings, issued);
        assert!(with_bank.contains("Bank: Cooperative Bank"));
        assert!(with_bank.contains("Account: 3170319515"));
    }

    #[test]
    fn export_file_name_includes_room_and_timestamp() {
        let stamp = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap();
        assert_eq!(
            invoice_file_name("13", stamp),
            "invoice_room_13_20250301_093005.txt"
        );
    }
}
