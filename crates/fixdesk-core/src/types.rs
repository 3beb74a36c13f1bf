// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Fixdesk workspace.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Stable external identity of a messaging user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The person filing a complaint, as reported by the messaging channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reporter {
    pub id: UserId,
    /// Display name as provided by the channel; free text.
    pub name: String,
}

/// Fault categories offered during intake.
///
/// The list is static for the process lifetime. Store cells are parsed
/// leniently: text that is not a known category reads back as [`Category::Other`]
/// so that an externally edited cell cannot poison a whole snapshot read.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Electrical,
    #[strum(serialize = "ICT")]
    Ict,
    Plumbing,
    Furniture,
    Building,
    Other,
}

impl Category {
    /// All categories in the order they are offered and grouped.
    pub const ALL: [Category; 6] = [
        Category::Electrical,
        Category::Ict,
        Category::Plumbing,
        Category::Furniture,
        Category::Building,
        Category::Other,
    ];

    /// Lenient parse for store cells: unknown text maps to `Other`.
    pub fn from_store_cell(cell: &str) -> Category {
        cell.trim().parse().unwrap_or(Category::Other)
    }
}

static ID_FORMAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^A\d{4,}$").unwrap());

/// Human-readable complaint identifier: `A` followed by the zero-padded
/// sequence number, at least four digits (`A0000`, `A0001`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplaintId(String);

impl ComplaintId {
    /// Derives the identifier for the given sequence number.
    ///
    /// Sequence numbers are record counts: the first record in an empty
    /// store is `A0000`. Numbers above 9999 widen naturally (`A10000`).
    pub fn from_sequence(seq: usize) -> Self {
        Self(format!("A{seq:04}"))
    }

    /// Parses user input into a normalized identifier.
    ///
    /// Input is trimmed and uppercased before matching, so `a0007` and
    /// `A0007` are the same identifier. Returns `None` when the input does
    /// not have the identifier shape.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_uppercase();
        if ID_FORMAT.is_match(&normalized) {
            Some(Self(normalized))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The closed status set as far as the UI is concerned.
///
/// The backing store holds status as free text and it may be mutated
/// externally; records carry the raw text and are always read fresh. This
/// enum exists for the configurable initial value and for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    New,
    #[strum(serialize = "In progress")]
    InProgress,
    Resolved,
}

/// A partially filled complaint, accumulated while a session walks the
/// intake steps. Never durable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub category: Option<Category>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl Draft {
    /// Returns the completed draft once all three fields are present.
    pub fn complete(&self) -> Option<CompleteDraft> {
        Some(CompleteDraft {
            category: self.category?,
            location: self.location.clone()?,
            description: self.description.clone()?,
        })
    }
}

/// A fully populated draft, ready for commit. Construction goes through
/// [`Draft::complete`], so the commit path never re-validates field presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteDraft {
    pub category: Category,
    pub location: String,
    pub description: String,
}

/// Photo bytes received from the messaging channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// A durable complaint entry in the backing store.
///
/// `created_at` is the canonical timestamp (local clock); the ISO, date, and
/// 12-hour time columns in the store are derived display forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintRecord {
    pub id: ComplaintId,
    pub created_at: NaiveDateTime,
    pub reporter_name: String,
    pub reporter_id: UserId,
    pub category: Category,
    pub location: String,
    pub description: String,
    pub photo_url: String,
    /// Free text in the store; written from [`ComplaintStatus`], read raw.
    pub status: String,
}

impl ComplaintRecord {
    /// ISO-style datetime display form, e.g. `2026-02-14 09:05:00`.
    pub fn iso_timestamp(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Date display form, e.g. `14/02/2026`.
    pub fn display_date(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }

    /// 12-hour time display form, e.g. `09:05 AM`.
    pub fn display_time(&self) -> String {
        self.created_at.format("%I:%M %p").to_string()
    }
}

/// Storage path for a complaint photo, namespaced by submission:
/// `complaints/<userId>_<YYYYmmdd_HHMMSS>.jpg`.
pub fn photo_object_path(user: &UserId, at: &NaiveDateTime) -> String {
    format!("complaints/{}_{}.jpg", user.0, at.format("%Y%m%d_%H%M%S"))
}

static MONTH_FORMAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{4})$").unwrap());

/// A validated `MM/YYYY` report month.
///
/// Matching against records is always done on the parsed creation date,
/// never by substring: `02/2026` must not match a record dated `02/12/2026`
/// (day 2 of December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMonth {
    pub month: u32,
    pub year: i32,
}

impl ReportMonth {
    /// Parses `MM/YYYY`. Returns `None` for any other shape or an
    /// out-of-range month.
    pub fn parse(input: &str) -> Option<Self> {
        let caps = MONTH_FORMAT.captures(input.trim())?;
        let month: u32 = caps[1].parse().ok()?;
        let year: i32 = caps[2].parse().ok()?;
        if (1..=12).contains(&month) {
            Some(Self { month, year })
        } else {
            None
        }
    }

    /// Whether the given creation timestamp falls in this month.
    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        use chrono::Datelike;
        at.month() == self.month && at.year() == self.year
    }
}

impl std::fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Fixed main-menu choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum MenuChoice {
    #[strum(serialize = "File complaint")]
    FileComplaint,
    #[strum(serialize = "Check status")]
    CheckStatus,
    #[strum(serialize = "View records")]
    ViewRecords,
    #[strum(serialize = "Monthly report")]
    MonthlyReport,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::FileComplaint,
        MenuChoice::CheckStatus,
        MenuChoice::ViewRecords,
        MenuChoice::MonthlyReport,
    ];

    /// Whether the choice is gated by the administrator allow-list.
    pub fn is_admin_only(&self) -> bool {
        matches!(self, MenuChoice::ViewRecords | MenuChoice::MonthlyReport)
    }
}

/// An inbound conversational event, routed by user identity.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub user: Reporter,
    /// Channel-specific conversation id used to address replies.
    pub chat_id: String,
    pub kind: EventKind,
}

/// What the user did, already shaped by the channel adapter.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Explicit main-menu navigation (e.g. the `/start` command).
    Start,
    /// A fixed menu choice.
    Menu(MenuChoice),
    /// A category picked from the inline keyboard.
    Category(Category),
    /// Free-text input.
    Text(String),
    /// Exactly one photo attachment.
    Photo(PhotoUpload),
}

/// An outbound reply to be delivered by the channel adapter.
#[derive(Debug, Clone)]
pub struct Reply {
    pub chat_id: String,
    pub body: ReplyBody,
}

/// Reply payloads the channel must be able to render.
#[derive(Debug, Clone)]
pub enum ReplyBody {
    Text(String),
    /// Text plus the persistent main-menu keyboard.
    Menu { text: String },
    /// Text plus the inline category picker.
    CategoryPicker { text: String },
    /// A file attachment (the monthly report artifact).
    Document {
        filename: String,
        mime_type: String,
        data: Vec<u8>,
        caption: Option<String>,
    },
}

/// Unique identifier for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a [`crate::traits::PluginAdapter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Channel,
    RecordStore,
    BlobStore,
    Renderer,
}
