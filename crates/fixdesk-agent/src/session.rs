// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation state machine.
//!
//! One [`Session`] exists per user identity, created lazily on first
//! interaction and never persisted: a restart simply drops everyone back to
//! the main menu. [`Session::apply`] is pure with respect to session state:
//! it mutates the step and draft, performs no I/O, and returns a
//! [`Transition`] naming the effect the agent loop must run.
//!
//! Input that does not match the expected shape for the current step is
//! ignored outright (no transition, no side effect). Partial or garbled
//! input must never corrupt or silently drop an in-progress draft.

use fixdesk_core::types::{
    CompleteDraft, ComplaintId, Draft, EventKind, MenuChoice, PhotoUpload, ReportMonth, UserId,
};

/// Steps of the intake conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// At the main menu; no flow in progress.
    Idle,
    /// Filing: waiting for a category pick.
    AwaitingCategory,
    /// Filing: waiting for the fault location.
    AwaitingLocation,
    /// Filing: waiting for the fault description.
    AwaitingDescription,
    /// Filing: waiting for the mandatory photo.
    AwaitingPhoto,
    /// Status check: waiting for a complaint id.
    AwaitingComplaintId,
    /// Report: waiting for an MM/YYYY month.
    AwaitingReportMonth,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Idle => write!(f, "idle"),
            Step::AwaitingCategory => write!(f, "awaiting_category"),
            Step::AwaitingLocation => write!(f, "awaiting_location"),
            Step::AwaitingDescription => write!(f, "awaiting_description"),
            Step::AwaitingPhoto => write!(f, "awaiting_photo"),
            Step::AwaitingComplaintId => write!(f, "awaiting_complaint_id"),
            Step::AwaitingReportMonth => write!(f, "awaiting_report_month"),
        }
    }
}

/// Prompts the agent loop turns into channel replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    MainMenu,
    ChooseCategory,
    AskLocation,
    AskDescription,
    AskPhoto,
    AskComplaintId,
    AskReportMonth,
}

/// Effect requested by a state transition.
#[derive(Debug, Clone)]
pub enum Transition {
    /// Send a prompt for the (possibly new) current step.
    Prompt(Prompt),
    /// Upload the photo and commit the completed draft.
    ///
    /// The session stays in [`Step::AwaitingPhoto`]; the agent loop resets
    /// it only once the commit has succeeded, so a failed commit leaves the
    /// user free to resend the photo without losing the draft.
    Commit {
        draft: CompleteDraft,
        photo: PhotoUpload,
    },
    /// Look up a complaint by id and report the result.
    Lookup { id: ComplaintId },
    /// Generate and deliver the monthly report.
    Report { month: ReportMonth },
    /// Send the recent-records summary.
    ListRecords,
    /// Fixed refusal: a non-administrator asked for an admin action.
    Refused,
    /// Input did not match the current step; nothing happened.
    Ignored,
}

/// Conversation state for one user.
#[derive(Debug, Clone)]
pub struct Session {
    user_id: UserId,
    step: Step,
    draft: Draft,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            step: Step::Idle,
            draft: Draft::default(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns to the main menu. Entering idle always discards the draft.
    pub fn reset(&mut self) {
        self.step = Step::Idle;
        self.draft = Draft::default();
    }

    /// Applies one inbound event and returns the effect to run.
    pub fn apply(&mut self, kind: &EventKind, is_admin: bool) -> Transition {
        match kind {
            EventKind::Start => {
                self.reset();
                Transition::Prompt(Prompt::MainMenu)
            }

            EventKind::Menu(choice) => {
                // Menu presses only act from the main menu; mid-flow they are
                // indistinguishable from stray input and must not clobber the
                // draft.
                if self.step != Step::Idle {
                    return Transition::Ignored;
                }
                match choice {
                    MenuChoice::FileComplaint => {
                        self.draft = Draft::default();
                        self.step = Step::AwaitingCategory;
                        Transition::Prompt(Prompt::ChooseCategory)
                    }
                    MenuChoice::CheckStatus => {
                        self.step = Step::AwaitingComplaintId;
                        Transition::Prompt(Prompt::AskComplaintId)
                    }
                    MenuChoice::ViewRecords => {
                        if is_admin {
                            Transition::ListRecords
                        } else {
                            Transition::Refused
                        }
                    }
                    MenuChoice::MonthlyReport => {
                        if is_admin {
                            self.step = Step::AwaitingReportMonth;
                            Transition::Prompt(Prompt::AskReportMonth)
                        } else {
                            Transition::Refused
                        }
                    }
                }
            }

            EventKind::Category(category) => {
                if self.step != Step::AwaitingCategory {
                    return Transition::Ignored;
                }
                self.draft.category = Some(*category);
                self.step = Step::AwaitingLocation;
                Transition::Prompt(Prompt::AskLocation)
            }

            EventKind::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Transition::Ignored;
                }
                match self.step {
                    Step::AwaitingLocation => {
                        self.draft.location = Some(text.to_string());
                        self.step = Step::AwaitingDescription;
                        Transition::Prompt(Prompt::AskDescription)
                    }
                    Step::AwaitingDescription => {
                        self.draft.description = Some(text.to_string());
                        self.step = Step::AwaitingPhoto;
                        Transition::Prompt(Prompt::AskPhoto)
                    }
                    Step::AwaitingComplaintId => match ComplaintId::parse(text) {
                        // Back to idle whatever the lookup finds.
                        Some(id) => {
                            self.reset();
                            Transition::Lookup { id }
                        }
                        None => Transition::Ignored,
                    },
                    Step::AwaitingReportMonth => match ReportMonth::parse(text) {
                        Some(month) => {
                            self.reset();
                            Transition::Report { month }
                        }
                        None => Transition::Ignored,
                    },
                    Step::Idle
                    | Step::AwaitingCategory
                    | Step::AwaitingPhoto => Transition::Ignored,
                }
            }

            EventKind::Photo(photo) => {
                if self.step != Step::AwaitingPhoto {
                    return Transition::Ignored;
                }
                match self.draft.complete() {
                    Some(draft) => Transition::Commit {
                        draft,
                        photo: photo.clone(),
                    },
                    None => Transition::Ignored,
                }
            }
        }
    }
}
