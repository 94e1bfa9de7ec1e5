//! Core data model: the schedule grid, employees and their identities.
//!
//! The grid is indexed by (week, day-of-week, shift-slot). Weekday and
//! shift-slot are small closed enums; employees are referenced by a
//! stable small integer id rather than by pointer/reference identity
//! (see the "Reference identity vs value identity" design note).

use crate::constraint::Constraint;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of shift slots per day: D1, D2, N.
pub const SLOTS_PER_DAY: usize = 3;
/// Number of days per week.
pub const DAYS_PER_WEEK: usize = 7;

/// A day of the week, Monday-first to match the pay-period/weekend layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx % DAYS_PER_WEEK]
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The three shift slots of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Slot {
    /// Primary day shift.
    D1 = 0,
    /// Secondary day shift (absent Tue/Fri and weekends of odd weeks).
    D2 = 1,
    /// Night shift (12h).
    N = 2,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::D1, Slot::D2, Slot::N];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Slot::D1,
            1 => Slot::D2,
            2 => Slot::N,
            other => panic!("invalid slot index {other}"),
        }
    }
}

/// A (week, day, slot) coordinate into the schedule grid.
pub type Cell = (usize, usize, usize);

/// Stable small-integer identity for an employee. `0` is reserved for the
/// [`EmployeePool::UNFILLED`](EmployeeId::UNFILLED) sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmployeeId(pub u32);

impl EmployeeId {
    pub const UNFILLED: EmployeeId = EmployeeId(0);

    pub fn is_unfilled(self) -> bool {
        self == Self::UNFILLED
    }
}

/// An employee (or the UNFILLED sentinel) with their attached constraints.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub fte: f64,
    pub constraints: Vec<Constraint>,
}

impl Employee {
    fn unfilled() -> Self {
        Self {
            id: EmployeeId::UNFILLED,
            name: "UNFILLED".to_string(),
            fte: 0.0,
            constraints: Vec::new(),
        }
    }
}

/// The employee catalogue: every real employee plus the UNFILLED sentinel
/// at id 0. Employees are created once and are immutable during solving.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmployeePool {
    employees: Vec<Employee>,
}

impl Default for EmployeePool {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeePool {
    pub fn new() -> Self {
        Self {
            employees: vec![Employee::unfilled()],
        }
    }

    /// Registers an employee and returns their freshly minted id.
    pub fn insert(&mut self, name: impl Into<String>, fte: f64, constraints: Vec<Constraint>) -> EmployeeId {
        let id = EmployeeId(self.employees.len() as u32);
        self.employees.push(Employee {
            id,
            name: name.into(),
            fte,
            constraints,
        });
        id
    }

    pub fn get(&self, id: EmployeeId) -> &Employee {
        &self.employees[id.0 as usize]
    }

    pub fn find_by_name(&self, name: &str) -> Option<EmployeeId> {
        self.employees.iter().find(|e| e.name == name).map(|e| e.id)
    }

    /// Iterates every real employee (never the UNFILLED sentinel).
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().skip(1)
    }

    pub fn len(&self) -> usize {
        self.employees.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The 3-dimensional assignment grid, indexed by (week, day, slot).
///
/// Every cell holds an [`EmployeeId`], possibly [`EmployeeId::UNFILLED`];
/// there are no nulls. `weeks` is expected to be even (pay periods are two
/// weeks) but this is not enforced by the type itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    weeks: usize,
    cells: Vec<EmployeeId>,
}

impl Schedule {
    pub fn new(weeks: usize) -> Self {
        Self {
            weeks,
            cells: vec![EmployeeId::UNFILLED; weeks * DAYS_PER_WEEK * SLOTS_PER_DAY],
        }
    }

    pub fn weeks(&self) -> usize {
        self.weeks
    }

    #[inline]
    fn index(&self, week: usize, day: usize, slot: usize) -> usize {
        debug_assert!(week < self.weeks && day < DAYS_PER_WEEK && slot < SLOTS_PER_DAY);
        (week * DAYS_PER_WEEK + day) * SLOTS_PER_DAY + slot
    }

    pub fn get(&self, week: usize, day: usize, slot: usize) -> EmployeeId {
        self.cells[self.index(week, day, slot)]
    }

    pub fn set(&mut self, week: usize, day: usize, slot: usize, employee: EmployeeId) {
        let idx = self.index(week, day, slot);
        self.cells[idx] = employee;
    }

    /// Every slot for a given day, e.g. to check "already working today".
    pub fn day_slots(&self, week: usize, day: usize) -> [EmployeeId; SLOTS_PER_DAY] {
        [self.get(week, day, 0), self.get(week, day, 1), self.get(week, day, 2)]
    }

    /// Iterates every (week, day, slot) coordinate in the grid.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let weeks = self.weeks;
        (0..weeks).flat_map(|w| (0..DAYS_PER_WEEK).flat_map(move |d| (0..SLOTS_PER_DAY).map(move |s| (w, d, s))))
    }

    /// Begins a trial assignment at `cell`. The previous occupant is
    /// restored automatically when the returned guard is dropped, on
    /// every code path including early returns and panics. This is the
    /// single-cell undo log the design notes call for in the hot path;
    /// whole-grid clones are reserved for phase-boundary snapshots.
    ///
    /// Precondition: the solver is single-threaded and never holds two
    /// overlapping trial assignments against the same schedule.
    pub fn trial_assign(&mut self, cell: Cell, candidate: EmployeeId) -> TrialAssignment<'_> {
        let previous = self.get(cell.0, cell.1, cell.2);
        self.set(cell.0, cell.1, cell.2, candidate);
        TrialAssignment {
            schedule: self,
            cell,
            previous,
        }
    }
}

/// RAII guard for a temporary grid mutation. Restores the original
/// occupant of the cell when dropped.
pub struct TrialAssignment<'a> {
    schedule: &'a mut Schedule,
    cell: Cell,
    previous: EmployeeId,
}

impl std::ops::Deref for TrialAssignment<'_> {
    type Target = Schedule;
    fn deref(&self) -> &Schedule {
        self.schedule
    }
}

impl Drop for TrialAssignment<'_> {
    fn drop(&mut self) {
        self.schedule.set(self.cell.0, self.cell.1, self.cell.2, self.previous);
    }
}
