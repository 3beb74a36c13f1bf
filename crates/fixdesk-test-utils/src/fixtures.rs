// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record fixtures shared across test suites.

use chrono::NaiveDate;

use fixdesk_core::types::{Category, ComplaintId, ComplaintRecord, ComplaintStatus, UserId};

/// A complete record with the given sequence number, dated 14 February 2026.
pub fn record_fixture(seq: usize) -> ComplaintRecord {
    record_fixture_dated(seq, 2026, 2, 14)
}

/// A complete record with the given sequence number and creation date.
pub fn record_fixture_dated(seq: usize, year: i32, month: u32, day: u32) -> ComplaintRecord {
    let created_at = NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid fixture date")
        .and_hms_opt(9, 30, 0)
        .expect("valid fixture time");

    ComplaintRecord {
        id: ComplaintId::from_sequence(seq),
        created_at,
        reporter_name: format!("Reporter {seq}"),
        reporter_id: UserId(format!("{}", 1000 + seq)),
        category: Category::ALL[seq % Category::ALL.len()],
        location: format!("Room {seq}"),
        description: format!("Fault {seq}"),
        photo_url: format!("mock://blob/complaints/{}_photo{seq}.jpg", 1000 + seq),
        status: ComplaintStatus::New.to_string(),
    }
}
