//! Entity records and the weekly cell grid they are scheduled into.
//!
//! All ids are dense non-negative integers assigned by whatever loaded the
//! entities (the [`crate::repository::Repository`] implementation); nothing
//! in this module allocates ids itself.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type ClassroomId = u32;
pub type FacultyId = u32;
pub type SubjectId = u32;
pub type BatchId = u32;
pub type TimetableId = u32;

/// Days in the weekly timetable. Fixed per the problem definition.
pub const DAYS: usize = 5;
/// Time slots per day. Fixed per the problem definition.
pub const SLOTS_PER_DAY: usize = 8;
/// Total cells in the week (`DAYS * SLOTS_PER_DAY`).
pub const CELLS: usize = DAYS * SLOTS_PER_DAY;

pub const DAY_NAMES: [&str; DAYS] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Literal hour-range strings; note the 13:00-14:00 lunch gap is deliberate.
pub const TIME_SLOT_NAMES: [&str; SLOTS_PER_DAY] = [
    "09:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-13:00",
    "14:00-15:00",
    "15:00-16:00",
    "16:00-17:00",
    "17:00-18:00",
];

/// A (day, slot) pair: the atomic scheduling unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub day: u8,
    pub slot: u8,
}

impl Cell {
    pub fn new(day: u8, slot: u8) -> Self {
        Self { day, slot }
    }

    pub fn index(self) -> usize {
        self.day as usize * SLOTS_PER_DAY + self.slot as usize
    }

    /// All `DAYS * SLOTS_PER_DAY` cells in `(day, slot)` order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..DAYS as u8).flat_map(|d| (0..SLOTS_PER_DAY as u8).map(move |t| Cell::new(d, t)))
    }

    pub fn day_name(self) -> &'static str {
        DAY_NAMES[self.day as usize]
    }

    pub fn slot_name(self) -> &'static str {
        TIME_SLOT_NAMES[self.slot as usize]
    }
}

/// A bitset over the `DAYS * SLOTS_PER_DAY` weekly cells. `CELLS` (40) fits
/// comfortably in a `u64`, so availability is a single machine word rather
/// than a `Vec<bool>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityMask(pub u64);

impl AvailabilityMask {
    pub const EMPTY: AvailabilityMask = AvailabilityMask(0);

    pub fn full() -> Self {
        AvailabilityMask((1u64 << CELLS) - 1)
    }

    /// Builds a mask that is available everywhere except the given cells.
    pub fn from_unavailable(unavailable: impl IntoIterator<Item = Cell>) -> Self {
        let mut mask = Self::full().0;
        for cell in unavailable {
            mask &= !(1u64 << cell.index());
        }
        AvailabilityMask(mask)
    }

    pub fn is_available(self, cell: Cell) -> bool {
        (self.0 >> cell.index()) & 1 == 1
    }
}

/// The kind of room. Lab sessions require `Lab`; lecture sessions accept
/// `Lecture` or `Seminar` rooms (see [`RoomKind::matches`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Lecture,
    Lab,
    Seminar,
}

/// The kind of teaching session a subject's required hours break down into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Lecture,
    Lab,
}

impl RoomKind {
    /// Seminar rooms are treated as lecture-compatible, never lab-compatible.
    pub fn matches(self, session: SessionKind) -> bool {
        matches!(
            (self, session),
            (RoomKind::Lecture, SessionKind::Lecture)
                | (RoomKind::Seminar, SessionKind::Lecture)
                | (RoomKind::Lab, SessionKind::Lab)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    pub capacity: u32,
    pub kind: RoomKind,
    pub availability: AvailabilityMask,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub max_daily_classes: u32,
    pub availability: AvailabilityMask,
    pub teachable: HashSet<SubjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub code: String,
    pub lecture_hours: u32,
    pub lab_hours: u32,
    pub elective_group: Option<String>,
}

impl Subject {
    pub fn required_hours(&self) -> u32 {
        self.lecture_hours + self.lab_hours
    }

    /// The non-empty (session kind, required hours) demand lines for this
    /// subject. A subject with both lecture and lab hours yields two lines.
    pub fn sessions(&self) -> Vec<(SessionKind, u32)> {
        let mut sessions = Vec::with_capacity(2);
        if self.lecture_hours > 0 {
            sessions.push((SessionKind::Lecture, self.lecture_hours));
        }
        if self.lab_hours > 0 {
            sessions.push((SessionKind::Lab, self.lab_hours));
        }
        sessions
    }
}

/// A cohort of students. Batches carry no availability mask of their own in
/// this data model; they are schedulable at any cell their faculty and
/// classroom agree on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub student_count: u32,
    pub enrolled_subjects: Vec<SubjectId>,
}

/// The persisted shape of a single scheduled class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub batch_id: BatchId,
    pub day_name: String,
    pub time_slot: String,
    pub classroom_id: ClassroomId,
    pub subject_id: SubjectId,
    pub faculty_id: FacultyId,
    pub is_fixed: bool,
    pub is_approved: bool,
}
