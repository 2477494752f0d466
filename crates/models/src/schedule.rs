use crate::days::DayOfWeek;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents a time range for a class meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// Creates a new `TimeRange` if `start` is before `end`
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Whether the two ranges share any instant; touching endpoints do not overlap
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One occupied interval in a weekly schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSlot<S> {
    pub section: S,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl<S> ScheduleSlot<S> {
    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }
}

/// Two slots on the same day whose times overlap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleConflict<S> {
    pub day: DayOfWeek,
    pub first: ScheduleSlot<S>,
    pub second: ScheduleSlot<S>,
}

/// A student's week, bucketed by day.
///
/// Every day is always present, and each day's slots are kept sorted by start
/// time (then end time) no matter the order they were added in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeeklySchedule<S> {
    days: BTreeMap<DayOfWeek, Vec<ScheduleSlot<S>>>,
}

impl<S> Default for WeeklySchedule<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> WeeklySchedule<S> {
    pub fn new() -> Self {
        let days = DayOfWeek::ALL
            .into_iter()
            .map(|day| (day, Vec::new()))
            .collect();

        Self { days }
    }

    /// Builds a schedule from `(day, slot)` pairs in any order
    pub fn from_slots(slots: impl IntoIterator<Item = (DayOfWeek, ScheduleSlot<S>)>) -> Self {
        let mut schedule = Self::new();
        for (day, slot) in slots {
            schedule.bucket(day).push(slot);
        }

        for slots in schedule.days.values_mut() {
            slots.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        }

        schedule
    }

    fn bucket(&mut self, day: DayOfWeek) -> &mut Vec<ScheduleSlot<S>> {
        self.days.entry(day).or_default()
    }

    pub fn day(&self, day: DayOfWeek) -> &[ScheduleSlot<S>] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &[ScheduleSlot<S>])> {
        self.days
            .iter()
            .map(|(day, slots)| (*day, slots.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_days(self) -> BTreeMap<DayOfWeek, Vec<ScheduleSlot<S>>> {
        self.days
    }
}

impl<S: Clone> WeeklySchedule<S> {
    /// Overlapping slot pairs, reported in day then start-time order.
    ///
    /// Nothing stops a student from enrolling in overlapping sections, so this
    /// only describes the week.
    pub fn conflicts(&self) -> Vec<ScheduleConflict<S>> {
        let mut conflicts = Vec::new();

        for (day, slots) in self.iter() {
            for (i, first) in slots.iter().enumerate() {
                // Slots are sorted by start, so stop once a later slot starts after this one ends
                for second in slots[i + 1..]
                    .iter()
                    .take_while(|second| second.start < first.end)
                {
                    if first.range().overlaps(&second.range()) {
                        conflicts.push(ScheduleConflict {
                            day,
                            first: first.clone(),
                            second: second.clone(),
                        });
                    }
                }
            }
        }

        conflicts
    }
}
