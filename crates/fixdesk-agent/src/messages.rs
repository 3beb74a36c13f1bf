// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing message catalog.
//!
//! Every reply text lives here, including the single mapping from error
//! kinds to what the user sees. Internals never leak into chat: anything
//! that is not an authorization refusal collapses to the generic system
//! error line.

use fixdesk_core::FixdeskError;
use fixdesk_core::types::ComplaintRecord;

use crate::session::Prompt;

pub const MAIN_MENU: &str =
    "Facility complaint desk. Pick an option from the keyboard below.";

pub const CHOOSE_CATEGORY: &str = "Select the fault category:";

pub const ASK_LOCATION: &str =
    "Where is the fault? (e.g. Room 5A, Computer Lab)";

pub const ASK_DESCRIPTION: &str = "Describe the problem:";

pub const ASK_PHOTO: &str = "Send one photo of the fault (required).";

pub const ASK_COMPLAINT_ID: &str = "Enter your complaint ID (e.g. A0007):";

pub const ASK_REPORT_MONTH: &str = "Which month? Reply as MM/YYYY (e.g. 02/2026):";

pub const REFUSAL: &str = "You are not authorized to use this action.";

pub const SYSTEM_ERROR: &str =
    "A system error occurred. Your complaint may not have been recorded. \
     Please contact an administrator.";

pub const NO_RECORDS: &str = "No complaints recorded yet.";

/// Text for a step prompt.
pub fn prompt_text(prompt: Prompt) -> &'static str {
    match prompt {
        Prompt::MainMenu => MAIN_MENU,
        Prompt::ChooseCategory => CHOOSE_CATEGORY,
        Prompt::AskLocation => ASK_LOCATION,
        Prompt::AskDescription => ASK_DESCRIPTION,
        Prompt::AskPhoto => ASK_PHOTO,
        Prompt::AskComplaintId => ASK_COMPLAINT_ID,
        Prompt::AskReportMonth => ASK_REPORT_MONTH,
    }
}

/// The one error-to-chat mapping. Logs carry the detail; users get a fixed
/// line per error kind.
pub fn user_message(error: &FixdeskError) -> &'static str {
    match error {
        FixdeskError::Unauthorized => REFUSAL,
        FixdeskError::Config(_)
        | FixdeskError::Channel { .. }
        | FixdeskError::Store { .. }
        | FixdeskError::Blob { .. }
        | FixdeskError::Render { .. }
        | FixdeskError::InvalidRecord { .. }
        | FixdeskError::Timeout { .. }
        | FixdeskError::Internal(_) => SYSTEM_ERROR,
    }
}

/// Confirmation shown after a successful commit.
pub fn confirmation(record: &ComplaintRecord) -> String {
    format!(
        "Complaint recorded.\n\n\
         ID: {}\n\
         Date: {}\n\
         Time: {}\n\n\
         Thank you for your report.",
        record.id,
        record.display_date(),
        record.display_time()
    )
}

/// Status line for a found record.
pub fn status_found(record: &ComplaintRecord) -> String {
    format!(
        "Complaint {}\n\
         Status: {}\n\
         Category: {}\n\
         Location: {}\n\
         Filed: {} {}",
        record.id,
        record.status,
        record.category,
        record.location,
        record.display_date(),
        record.display_time()
    )
}

/// Status line for a lookup miss. A miss is a normal outcome.
pub fn status_not_found(query: &str) -> String {
    format!("No complaint found with ID {}.", query.trim().to_ascii_uppercase())
}

/// Recent-records summary for administrators, newest first.
pub fn recent_records(records: &[ComplaintRecord], limit: usize) -> String {
    if records.is_empty() {
        return NO_RECORDS.to_string();
    }

    let mut out = String::from("Most recent complaints:\n");
    for record in records.iter().take(limit) {
        out.push_str(&format!(
            "{} | {} | {} | {} | {}\n",
            record.id,
            record.display_date(),
            record.category,
            record.location,
            record.status
        ));
    }
    out
}
