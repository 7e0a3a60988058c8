//! Time-bounded role assignments and their derived lifecycle status.
//!
//! Only revocation is stored. `Pending`, `Active` and `Expired` are computed
//! from the dates every time they are asked for, so a stored status can never
//! drift from the calendar.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use usra_calendar::{CalendarError, HijriDate};
use usra_core::{AssignmentId, DomainError, Entity, RoleId, UserId};

use crate::roles::RoleCatalog;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("date has neither a hijri nor a gregorian value")]
    MissingDate,

    #[error("hijri date {hijri} does not fall on gregorian date {gregorian}")]
    CalendarMismatch {
        hijri: HijriDate,
        gregorian: NaiveDate,
    },

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("end date {end} must be after start date {start}")]
    DateRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown role {0}")]
    UnknownRole(RoleId),

    #[error("assignment {0} is revoked")]
    AlreadyRevoked(AssignmentId),
}

impl From<AssignmentError> for DomainError {
    fn from(value: AssignmentError) -> Self {
        match value {
            AssignmentError::UnknownRole(_) => DomainError::not_found(value.to_string()),
            AssignmentError::DateRange { .. } | AssignmentError::AlreadyRevoked(_) => {
                DomainError::invariant(value.to_string())
            }
            _ => DomainError::validation(value.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dates
// ─────────────────────────────────────────────────────────────────────────────

/// A boundary date as entered: one calendar or both.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateInput {
    #[serde(default)]
    pub hijri: Option<HijriDate>,
    #[serde(default)]
    pub gregorian: Option<NaiveDate>,
}

impl DateInput {
    pub fn hijri(date: HijriDate) -> Self {
        Self {
            hijri: Some(date),
            gregorian: None,
        }
    }

    pub fn gregorian(date: NaiveDate) -> Self {
        Self {
            hijri: None,
            gregorian: Some(date),
        }
    }

    pub fn both(hijri: HijriDate, gregorian: NaiveDate) -> Self {
        Self {
            hijri: Some(hijri),
            gregorian: Some(gregorian),
        }
    }
}

/// A normalized boundary date carrying both calendars.
///
/// Ordered by day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateInput", into = "DateInput")]
pub struct AssignmentDate {
    gregorian: NaiveDate,
    hijri: HijriDate,
}

impl AssignmentDate {
    pub fn gregorian(&self) -> NaiveDate {
        self.gregorian
    }

    pub fn hijri(&self) -> HijriDate {
        self.hijri
    }
}

impl TryFrom<DateInput> for AssignmentDate {
    type Error = AssignmentError;

    fn try_from(input: DateInput) -> Result<Self, Self::Error> {
        match (input.hijri, input.gregorian) {
            (None, None) => Err(AssignmentError::MissingDate),
            (Some(hijri), None) => Ok(Self {
                gregorian: hijri.to_gregorian()?,
                hijri,
            }),
            (None, Some(gregorian)) => Ok(Self {
                gregorian,
                hijri: HijriDate::from_gregorian(gregorian)?,
            }),
            (Some(hijri), Some(gregorian)) => {
                if hijri.to_gregorian()? != gregorian {
                    return Err(AssignmentError::CalendarMismatch { hijri, gregorian });
                }
                Ok(Self { gregorian, hijri })
            }
        }
    }
}

impl From<AssignmentDate> for DateInput {
    fn from(value: AssignmentDate) -> Self {
        DateInput::both(value.hijri, value.gregorian)
    }
}

fn normalize_range(
    start: DateInput,
    end: Option<DateInput>,
) -> Result<(AssignmentDate, Option<AssignmentDate>), AssignmentError> {
    let start = AssignmentDate::try_from(start)?;
    let end = end.map(AssignmentDate::try_from).transpose()?;
    if let Some(end) = end {
        if end.gregorian <= start.gregorian {
            return Err(AssignmentError::DateRange {
                start: start.gregorian,
                end: end.gregorian,
            });
        }
    }
    Ok((start, end))
}

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Start date not reached yet.
    Pending,
    Active,
    /// End date reached.
    Expired,
    /// Terminal; overrides every date-based state.
    Revoked,
}

impl core::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AssignmentStatus::Pending => f.write_str("pending"),
            AssignmentStatus::Active => f.write_str("active"),
            AssignmentStatus::Expired => f.write_str("expired"),
            AssignmentStatus::Revoked => f.write_str("revoked"),
        }
    }
}

/// Status of `assignment` on the local date `today`.
///
/// The start date is inclusive and the end date exclusive.
pub fn status_of(assignment: &RoleAssignment, today: NaiveDate) -> AssignmentStatus {
    if assignment.revoked_at.is_some() {
        return AssignmentStatus::Revoked;
    }
    if today < assignment.start.gregorian {
        return AssignmentStatus::Pending;
    }
    match assignment.end {
        Some(end) if today >= end.gregorian => AssignmentStatus::Expired,
        _ => AssignmentStatus::Active,
    }
}

/// Per-status counts for an admin overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusSummary {
    pub pending: usize,
    pub active: usize,
    pub expired: usize,
    pub revoked: usize,
}

impl StatusSummary {
    pub fn tally<'a, I>(assignments: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a RoleAssignment>,
    {
        let mut summary = Self::default();
        for assignment in assignments {
            match status_of(assignment, today) {
                AssignmentStatus::Pending => summary.pending += 1,
                AssignmentStatus::Active => summary.active += 1,
                AssignmentStatus::Expired => summary.expired += 1,
                AssignmentStatus::Revoked => summary.revoked += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.pending + self.active + self.expired + self.revoked
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Assignment
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted shape of an assignment, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignmentRecord {
    pub id: AssignmentId,
    pub user_id: UserId,
    pub role_id: RoleId,
    pub start_date: DateInput,
    #[serde(default)]
    pub end_date: Option<DateInput>,
    #[serde(default)]
    pub revoked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub assigned_by: UserId,
    pub assigned_at: DateTime<Utc>,
}

/// Administrative request to grant a role for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoleAssignment {
    pub id: AssignmentId,
    pub user_id: UserId,
    pub role_id: RoleId,
    pub start_date: DateInput,
    pub end_date: Option<DateInput>,
    pub notes: Option<String>,
    pub assigned_by: UserId,
    pub assigned_at: DateTime<Utc>,
}

/// One grant of one role to one user over a date range.
///
/// # Invariants
/// - The start date is present and, when given in both calendars, both denote
///   the same day.
/// - The end date, when present, is strictly after the start date.
/// - Once revoked, an assignment stays revoked and its dates are frozen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoleAssignmentRecord", into = "RoleAssignmentRecord")]
pub struct RoleAssignment {
    id: AssignmentId,
    user_id: UserId,
    role_id: RoleId,
    start: AssignmentDate,
    end: Option<AssignmentDate>,
    revoked_at: Option<DateTime<Utc>>,
    notes: Option<String>,
    assigned_by: UserId,
    assigned_at: DateTime<Utc>,
}

impl RoleAssignment {
    /// Validate an administrative grant. An unknown role is fatal here.
    pub fn create<C>(cmd: NewRoleAssignment, catalog: &C) -> Result<Self, AssignmentError>
    where
        C: RoleCatalog + ?Sized,
    {
        if !catalog.contains(&cmd.role_id) {
            return Err(AssignmentError::UnknownRole(cmd.role_id));
        }
        let (start, end) = normalize_range(cmd.start_date, cmd.end_date)?;
        Ok(Self {
            id: cmd.id,
            user_id: cmd.user_id,
            role_id: cmd.role_id,
            start,
            end,
            revoked_at: None,
            notes: cmd.notes,
            assigned_by: cmd.assigned_by,
            assigned_at: cmd.assigned_at,
        })
    }

    /// Replace the date range. Status is re-derived on the next evaluation.
    pub fn update_dates(
        &mut self,
        start: DateInput,
        end: Option<DateInput>,
    ) -> Result<(), AssignmentError> {
        self.ensure_not_revoked()?;
        let (start, end) = normalize_range(start, end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Revoke the assignment. Terminal.
    pub fn revoke(&mut self, at: DateTime<Utc>) -> Result<(), AssignmentError> {
        self.ensure_not_revoked()?;
        self.revoked_at = Some(at);
        Ok(())
    }

    pub fn status(&self, today: NaiveDate) -> AssignmentStatus {
        status_of(self, today)
    }

    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.status(today) == AssignmentStatus::Active
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    pub fn start(&self) -> AssignmentDate {
        self.start
    }

    pub fn end(&self) -> Option<AssignmentDate> {
        self.end
    }

    pub fn revoked_at(&self) -> Option<DateTime<Utc>> {
        self.revoked_at
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn assigned_by(&self) -> UserId {
        self.assigned_by
    }

    pub fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    fn ensure_not_revoked(&self) -> Result<(), AssignmentError> {
        if self.revoked_at.is_some() {
            return Err(AssignmentError::AlreadyRevoked(self.id));
        }
        Ok(())
    }
}

impl Entity for RoleAssignment {
    type Id = AssignmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<RoleAssignmentRecord> for RoleAssignment {
    type Error = AssignmentError;

    /// Stored records go through the same date checks as new grants. Role
    /// existence is not checked: the catalog may have changed since.
    fn try_from(record: RoleAssignmentRecord) -> Result<Self, Self::Error> {
        let (start, end) = normalize_range(record.start_date, record.end_date)?;
        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            role_id: record.role_id,
            start,
            end,
            revoked_at: record.revoked_at,
            notes: record.notes,
            assigned_by: record.assigned_by,
            assigned_at: record.assigned_at,
        })
    }
}

impl From<RoleAssignment> for RoleAssignmentRecord {
    fn from(value: RoleAssignment) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            role_id: value.role_id,
            start_date: value.start.into(),
            end_date: value.end.map(Into::into),
            revoked_at: value.revoked_at,
            notes: value.notes,
            assigned_by: value.assigned_by,
            assigned_at: value.assigned_at,
        }
    }
}
