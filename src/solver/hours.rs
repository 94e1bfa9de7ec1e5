//! Per-(week, employee) hours ledger, kept alongside the schedule so hard
//! filters and tie-breaks don't need to re-walk the whole grid on every
//! candidate check. Mirrors `Solver._calculate_hours_used`.

use crate::model::{EmployeeId, Schedule};

#[derive(Debug, Clone)]
pub(super) struct HoursLedger {
    weeks: usize,
    stride: usize,
    hours: Vec<f64>,
}

impl HoursLedger {
    pub(super) fn from_schedule(schedule: &Schedule, employee_count: usize, shift_length_hours: f64) -> Self {
        let stride = employee_count + 1; // +1 for the UNFILLED slot at id 0, never added to but kept for simple indexing
        let mut ledger = Self {
            weeks: schedule.weeks(),
            stride,
            hours: vec![0.0; schedule.weeks() * stride],
        };
        for cell in schedule.cells() {
            let emp = schedule.get(cell.0, cell.1, cell.2);
            if !emp.is_unfilled() {
                ledger.add(cell.0, emp, shift_length_hours);
            }
        }
        ledger
    }

    fn idx(&self, week: usize, employee: EmployeeId) -> usize {
        week * self.stride + employee.0 as usize
    }

    pub(super) fn add(&mut self, week: usize, employee: EmployeeId, amount: f64) {
        let idx = self.idx(week, employee);
        self.hours[idx] += amount;
    }

    pub(super) fn subtract(&mut self, week: usize, employee: EmployeeId, amount: f64) {
        let idx = self.idx(week, employee);
        self.hours[idx] -= amount;
    }

    pub(super) fn week_hours(&self, week: usize, employee: EmployeeId) -> f64 {
        self.hours[self.idx(week, employee)]
    }

    /// Hours worked across the two-week pay period containing `week`
    /// (spec.md §9's resolved `[w-1, w+1]` window, expressed as the even
    /// start index of that window).
    pub(super) fn pay_period_hours(&self, week: usize, employee: EmployeeId) -> f64 {
        let start = (week / 2) * 2;
        let end = (start + 1).min(self.weeks.saturating_sub(1));
        (start..=end).map(|w| self.week_hours(w, employee)).sum()
    }

    pub(super) fn weeks(&self) -> usize {
        self.weeks
    }
}
