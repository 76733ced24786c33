use chrono::NaiveDate;
use log::debug;

use crate::engine::calendar::{
    advance_working_days, count_working_days, first_working_day_from, last_working_day_until,
    next_working_day,
};
use crate::error::EngineError;
use crate::model::{Phase, Schedule, SchedulePhase, WorkBreakdown};

/// Maximum number of milestone labels carried per phase.
const MAX_MILESTONES: usize = 3;

/// Lay a work breakdown out over Mon–Fri working days, phase by phase.
///
/// With no `end_date` the schedule is open-ended: each phase lasts
/// `ceil(hours / hours_per_day)` working days. With an `end_date` (and a
/// non-zero hour total) working days are allocated proportionally so the
/// whole breakdown fits the window. The final phase always ends exactly
/// on the end date: the deadline is a hard external constraint, so it
/// absorbs any rounding drift from earlier phases.
///
/// A zero-hour breakdown falls back to the open-ended path even when an
/// end date is given, since there is nothing to distribute.
pub fn allocate_schedule(
    breakdown: &WorkBreakdown,
    start_date: NaiveDate,
    hours_per_day: f64,
    end_date: Option<NaiveDate>,
) -> Result<Schedule, EngineError> {
    if hours_per_day <= 0.0 || !hours_per_day.is_finite() {
        return Err(EngineError::HoursPerDayNotPositive { got: hours_per_day });
    }
    breakdown.validate()?;

    match end_date {
        Some(end) if breakdown.total_hours() > 0.0 => {
            allocate_fixed_window(breakdown, start_date, end)
        }
        _ => Ok(allocate_open_ended(breakdown, start_date, hours_per_day)),
    }
}

/// Open-ended allocation: duration driven by hours at the given pace.
fn allocate_open_ended(
    breakdown: &WorkBreakdown,
    start_date: NaiveDate,
    hours_per_day: f64,
) -> Schedule {
    let mut phases = Vec::with_capacity(breakdown.phases.len());
    let mut cursor = first_working_day_from(start_date);

    for phase in &breakdown.phases {
        let hours = phase.resolved_hours();
        if hours == 0.0 {
            // Zero-hour phases still appear on the timeline, but occupy
            // no working days and do not move the cursor.
            phases.push(scheduled(phase, cursor, cursor, hours, 0));
            continue;
        }

        let working_days = (hours / hours_per_day).ceil().max(1.0) as u32;
        let end = advance_working_days(cursor, working_days - 1);
        phases.push(scheduled(phase, cursor, end, hours, working_days));
        cursor = next_working_day(end);
    }

    Schedule { phases }
}

/// Fixed-window allocation: each phase gets a share of the window's
/// working days proportional to its hours, floored at one day; the last
/// phase is pinned to the end date.
fn allocate_fixed_window(
    breakdown: &WorkBreakdown,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Schedule, EngineError> {
    if end_date < start_date {
        return Err(EngineError::EndBeforeStart {
            start: start_date,
            end: end_date,
        });
    }

    // Schedule dates always land on working days; a weekend deadline
    // means the last working day before it. The Mon–Fri count over the
    // window is unchanged by this normalization.
    let start = first_working_day_from(start_date);
    let end = last_working_day_until(end_date);
    if end < start {
        return Err(EngineError::NoWorkingDays {
            start: start_date,
            end: end_date,
        });
    }

    let total_working_days = count_working_days(start, end);
    let total_hours = breakdown.total_hours();
    let last_index = breakdown.phases.len() - 1;

    let mut phases = Vec::with_capacity(breakdown.phases.len());
    let mut cursor = start;

    for (index, phase) in breakdown.phases.iter().enumerate() {
        let hours = phase.resolved_hours();

        if index == last_index {
            let phase_start = if cursor > end {
                debug!(
                    "phases before '{}' overran the window; clamping its start to {}",
                    phase.name, end
                );
                end
            } else {
                cursor
            };
            let working_days = count_working_days(phase_start, end);
            phases.push(scheduled(phase, phase_start, end, hours, working_days));
            continue;
        }

        let proportion = hours / total_hours;
        let working_days = ((total_working_days as f64 * proportion).round() as u32).max(1);
        let phase_end = advance_working_days(cursor, working_days - 1);
        phases.push(scheduled(phase, cursor, phase_end, hours, working_days));
        cursor = next_working_day(phase_end);
    }

    Ok(Schedule { phases })
}

fn scheduled(
    phase: &Phase,
    start_date: NaiveDate,
    end_date: NaiveDate,
    hours: f64,
    working_days: u32,
) -> SchedulePhase {
    SchedulePhase {
        phase_id: Some(phase.id),
        phase_name: phase.name.clone(),
        start_date,
        end_date,
        hours,
        working_days,
        milestones: milestones_for(phase),
    }
}

/// The first few task names when the phase has tasks, otherwise a single
/// synthesized closing milestone.
fn milestones_for(phase: &Phase) -> Vec<String> {
    if phase.tasks.is_empty() {
        vec![format!("Conclusão de {}", phase.name)]
    } else {
        phase
            .tasks
            .iter()
            .take(MAX_MILESTONES)
            .map(|t| t.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PhaseTask;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2026-03-02 is a Monday; 2026-03-27 is the Friday four weeks later,
    // giving exactly 20 working days inclusive.
    fn monday() -> NaiveDate {
        date(2026, 3, 2)
    }

    #[test]
    fn forty_hours_at_eight_per_day_fill_one_week() {
        let breakdown = WorkBreakdown::new(vec![
            Phase::new("Planejamento", 40.0),
            Phase::new("Desenvolvimento", 8.0),
        ]);
        let schedule = allocate_schedule(&breakdown, monday(), 8.0, None).unwrap();

        assert_eq!(schedule.phases[0].working_days, 5);
        assert_eq!(schedule.phases[0].start_date, date(2026, 3, 2));
        assert_eq!(schedule.phases[0].end_date, date(2026, 3, 6));
        // The next phase starts the following Monday.
        assert_eq!(schedule.phases[1].start_date, date(2026, 3, 9));
        assert_eq!(schedule.phases[1].end_date, date(2026, 3, 9));
    }

    #[test]
    fn partial_days_round_up() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("Ajustes", 9.0)]);
        let schedule = allocate_schedule(&breakdown, monday(), 8.0, None).unwrap();
        assert_eq!(schedule.phases[0].working_days, 2);
    }

    #[test]
    fn weekend_start_rolls_to_monday() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("Planejamento", 8.0)]);
        // 2026-03-07 is a Saturday.
        let schedule = allocate_schedule(&breakdown, date(2026, 3, 7), 8.0, None).unwrap();
        assert_eq!(schedule.phases[0].start_date, date(2026, 3, 9));
    }

    #[test]
    fn zero_hour_phase_is_listed_but_occupies_no_days() {
        let breakdown = WorkBreakdown::new(vec![
            Phase::new("Kickoff", 0.0),
            Phase::new("Desenvolvimento", 8.0),
        ]);
        let schedule = allocate_schedule(&breakdown, monday(), 8.0, None).unwrap();

        assert_eq!(schedule.phases[0].working_days, 0);
        assert_eq!(schedule.phases[0].start_date, schedule.phases[0].end_date);
        // The following phase starts that same day.
        assert_eq!(schedule.phases[1].start_date, date(2026, 3, 2));
    }

    #[test]
    fn fixed_window_allocates_proportionally() {
        let breakdown = WorkBreakdown::new(vec![
            Phase::new("Descoberta", 100.0),
            Phase::new("Entrega", 300.0),
        ]);
        let schedule =
            allocate_schedule(&breakdown, monday(), 8.0, Some(date(2026, 3, 27))).unwrap();

        // 25% of 20 working days.
        assert_eq!(schedule.phases[0].working_days, 5);
        assert_eq!(schedule.phases[0].end_date, date(2026, 3, 6));
        assert_eq!(schedule.phases[1].start_date, date(2026, 3, 9));
        assert_eq!(schedule.phases[1].end_date, date(2026, 3, 27));
        assert_eq!(schedule.phases[1].working_days, 15);
    }

    #[test]
    fn last_phase_absorbs_rounding_drift() {
        // Proportions that do not divide evenly: the final phase still
        // ends on the requested date.
        let breakdown = WorkBreakdown::new(vec![
            Phase::new("Fase 1", 70.0),
            Phase::new("Fase 2", 50.0),
            Phase::new("Fase 3", 30.0),
        ]);
        let end = date(2026, 3, 27);
        let schedule = allocate_schedule(&breakdown, monday(), 8.0, Some(end)).unwrap();
        assert_eq!(schedule.phases.last().unwrap().end_date, end);
    }

    #[test]
    fn weekend_deadline_is_normalized_to_friday() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("Entrega", 40.0)]);
        // 2026-03-28 is a Saturday.
        let schedule =
            allocate_schedule(&breakdown, monday(), 8.0, Some(date(2026, 3, 28))).unwrap();
        assert_eq!(schedule.phases[0].end_date, date(2026, 3, 27));
    }

    #[test]
    fn tiny_phases_keep_a_one_day_floor() {
        let breakdown = WorkBreakdown::new(vec![
            Phase::new("Fase 1", 1.0),
            Phase::new("Fase 2", 1.0),
            Phase::new("Fase 3", 98.0),
        ]);
        let schedule =
            allocate_schedule(&breakdown, monday(), 8.0, Some(date(2026, 3, 27))).unwrap();

        assert_eq!(schedule.phases[0].working_days, 1);
        assert_eq!(schedule.phases[1].working_days, 1);
        assert_eq!(schedule.phases[2].end_date, date(2026, 3, 27));
    }

    #[test]
    fn zero_total_hours_with_deadline_falls_back_to_open_ended() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("Kickoff", 0.0)]);
        let schedule =
            allocate_schedule(&breakdown, monday(), 8.0, Some(date(2026, 3, 27))).unwrap();
        assert_eq!(schedule.phases[0].working_days, 0);
    }

    #[test]
    fn milestones_come_from_tasks_when_present() {
        let mut phase = Phase::new("Desenvolvimento", 40.0);
        phase.tasks = vec![
            PhaseTask::new("API", 10.0),
            PhaseTask::new("Front-end", 10.0),
            PhaseTask::new("Integração", 10.0),
            PhaseTask::new("Deploy", 10.0),
        ];
        let breakdown = WorkBreakdown::new(vec![phase, Phase::new("Entrega", 8.0)]);
        let schedule = allocate_schedule(&breakdown, monday(), 8.0, None).unwrap();

        assert_eq!(
            schedule.phases[0].milestones,
            vec!["API", "Front-end", "Integração"]
        );
        assert_eq!(
            schedule.phases[1].milestones,
            vec!["Conclusão de Entrega"]
        );
    }

    #[test]
    fn non_positive_pace_is_rejected_before_allocation() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("Planejamento", 8.0)]);
        assert!(matches!(
            allocate_schedule(&breakdown, monday(), 0.0, None),
            Err(EngineError::HoursPerDayNotPositive { .. })
        ));
        assert!(matches!(
            allocate_schedule(&breakdown, monday(), -4.0, None),
            Err(EngineError::HoursPerDayNotPositive { .. })
        ));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("Planejamento", 8.0)]);
        assert!(matches!(
            allocate_schedule(&breakdown, monday(), 8.0, Some(date(2026, 2, 27))),
            Err(EngineError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn weekend_only_window_is_rejected() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("Planejamento", 8.0)]);
        // Saturday through Sunday.
        assert!(matches!(
            allocate_schedule(&breakdown, date(2026, 3, 7), 8.0, Some(date(2026, 3, 8))),
            Err(EngineError::NoWorkingDays { .. })
        ));
    }

    #[test]
    fn empty_breakdown_yields_empty_schedule() {
        let schedule =
            allocate_schedule(&WorkBreakdown::default(), monday(), 8.0, None).unwrap();
        assert!(schedule.is_empty());
    }
}
