// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row codec for the fixed 11-column record schema.
//!
//! Column order (0-indexed) is stable and load-bearing for compatibility:
//! `[id, createdAtIso, date, time, reporterName, reporterId, category,
//! location, description, photoUrl, status]`. Earlier deployments drifted
//! between 10, 11, and 12 columns (one revision carried an extra display
//! formula between description and photoUrl); rows that do not match this
//! layout are rejected on read rather than silently tolerated.

use chrono::NaiveDateTime;

use fixdesk_core::FixdeskError;
use fixdesk_core::types::{Category, ComplaintId, ComplaintRecord, UserId};

/// Number of columns in the record schema.
pub const COLUMN_COUNT: usize = 11;

/// Format of the canonical `createdAtIso` column.
const ISO_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serializes a record into its 11-cell row form.
///
/// The date and time cells are derived display forms of `created_at`.
pub fn to_row(record: &ComplaintRecord) -> [String; COLUMN_COUNT] {
    [
        record.id.to_string(),
        record.iso_timestamp(),
        record.display_date(),
        record.display_time(),
        record.reporter_name.clone(),
        record.reporter_id.to_string(),
        record.category.to_string(),
        record.location.clone(),
        record.description.clone(),
        record.photo_url.clone(),
        record.status.clone(),
    ]
}

/// Parses a stored row back into a record, validating the schema.
///
/// `row` is the 1-based sheet row number, used only for error reporting.
/// The canonical timestamp is the ISO cell; the date and time cells are
/// display copies and are not read back.
pub fn from_row(row: usize, cells: &[String]) -> Result<ComplaintRecord, FixdeskError> {
    if cells.len() != COLUMN_COUNT {
        return Err(FixdeskError::InvalidRecord {
            row,
            reason: format!("expected {COLUMN_COUNT} columns, found {}", cells.len()),
        });
    }

    let id = ComplaintId::parse(&cells[0]).ok_or_else(|| FixdeskError::InvalidRecord {
        row,
        reason: format!("malformed complaint id `{}`", cells[0]),
    })?;

    let created_at = NaiveDateTime::parse_from_str(cells[1].trim(), ISO_FORMAT).map_err(|e| {
        FixdeskError::InvalidRecord {
            row,
            reason: format!("malformed timestamp `{}`: {e}", cells[1]),
        }
    })?;

    Ok(ComplaintRecord {
        id,
        created_at,
        reporter_name: cells[4].clone(),
        reporter_id: UserId(cells[5].clone()),
        category: Category::from_store_cell(&cells[6]),
        location: cells[7].clone(),
        description: cells[8].clone(),
        photo_url: cells[9].clone(),
        status: cells[10].clone(),
    })
}
