//! Projection of time offsets onto calendar dates.
//!
//! Offsets are measured in days from the project start. A task occupying
//! `[2.5, 4.2)` touches days 2 through 4, so starts round down and ends round
//! up.

use chrono::{Days, NaiveDate};

use crate::scheduler::Schedule;

/// A machine assignment expressed in dates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatedAssignment {
    pub task_id: String,
    pub machine: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub critical: bool,
}

fn add_days(origin: NaiveDate, days: f64) -> NaiveDate {
    // `as` saturates, so huge offsets land on NaiveDate::MAX below.
    let days = days.max(0.0) as u64;
    origin
        .checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Date on which work starting at `offset` begins.
pub fn offset_to_start_date(origin: NaiveDate, offset: f64) -> NaiveDate {
    add_days(origin, offset.floor())
}

/// Date by which work ending at `offset` is done.
pub fn offset_to_end_date(origin: NaiveDate, offset: f64) -> NaiveDate {
    add_days(origin, offset.ceil())
}

/// Dated view of every assignment, machine by machine in start order.
pub fn project_schedule(schedule: &Schedule, origin: NaiveDate) -> Vec<DatedAssignment> {
    schedule
        .machines()
        .iter()
        .enumerate()
        .flat_map(|(machine, timeline)| {
            timeline.assignments().iter().map(move |a| DatedAssignment {
                task_id: a.task_id.clone(),
                machine,
                start_date: offset_to_start_date(origin, a.start),
                end_date: offset_to_end_date(origin, a.end),
                critical: a.critical,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward_pass::forward_pass;
    use crate::network::NetworkKind;
    use crate::registry::TaskRegistry;
    use crate::scheduler::MachineScheduler;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rounding() {
        let origin = date(2025, 1, 30);
        assert_eq!(offset_to_start_date(origin, 0.0), origin);
        assert_eq!(offset_to_start_date(origin, 2.9), date(2025, 2, 1));
        assert_eq!(offset_to_end_date(origin, 2.1), date(2025, 2, 2));
        assert_eq!(offset_to_end_date(origin, 3.0), date(2025, 2, 2));
    }

    #[test]
    fn test_overflow_saturates() {
        let origin = date(2025, 1, 1);
        assert_eq!(offset_to_end_date(origin, 1e300), NaiveDate::MAX);
    }

    #[test]
    fn test_project_schedule() {
        let mut registry = TaskRegistry::new();
        registry.add_task("design", 1.5, &[]).unwrap();
        registry.add_task("build", 2.0, &["design"]).unwrap();
        registry.add_task("docs", 1.0, &[]).unwrap();
        let network = registry.build(NetworkKind::OnNode).unwrap();
        let earliest = forward_pass(&network, 0).unwrap();
        let schedule = MachineScheduler::new(2)
            .unwrap()
            .schedule(&network, &earliest)
            .unwrap();

        let origin = date(2025, 6, 2);
        let dated = project_schedule(&schedule, origin);
        assert_eq!(dated.len(), 3);

        let build = dated.iter().find(|a| a.task_id == "build").unwrap();
        assert_eq!(build.machine, 0);
        assert_eq!(build.start_date, date(2025, 6, 3));
        assert_eq!(build.end_date, date(2025, 6, 6));

        let docs = dated.iter().find(|a| a.task_id == "docs").unwrap();
        assert_eq!(docs.machine, 1);
        assert_eq!(docs.start_date, origin);
        assert_eq!(docs.end_date, date(2025, 6, 3));
    }
}
