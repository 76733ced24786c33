use chrono::NaiveDate;

use crate::engine::investment::phase_value_cents;
use crate::engine::schedule::allocate_schedule;
use crate::error::EngineError;
use crate::model::{InvestmentBreakdown, InvestmentPhase, Schedule, WorkBreakdown};

/// Re-price an existing breakdown at a new hourly rate.
///
/// Hours, phase identity and order are untouched; only the monetary
/// values are derived again. Idempotent: the same breakdown and rate
/// always produce identical output.
pub fn recalculate_investment(
    breakdown: &InvestmentBreakdown,
    new_rate_cents: i64,
) -> Result<InvestmentBreakdown, EngineError> {
    if new_rate_cents < 0 {
        return Err(EngineError::NegativeRate { got: new_rate_cents });
    }

    let phases: Vec<InvestmentPhase> = breakdown
        .phases
        .iter()
        .map(|phase| InvestmentPhase {
            name: phase.name.clone(),
            hours: phase.hours,
            value_cents: phase_value_cents(phase.hours, new_rate_cents),
            deliverables: phase.deliverables.clone(),
        })
        .collect();
    let total_value_cents = phases.iter().map(|p| p.value_cents).sum();

    Ok(InvestmentBreakdown {
        phases,
        total_hours: breakdown.total_hours,
        total_value_cents,
        hourly_rate_cents: new_rate_cents,
    })
}

/// Re-derive an open-ended schedule after a start-date or pace change.
///
/// Only the open-ended mode is exposed here; refitting a fixed window is
/// a separate, explicit `allocate_schedule` call with the end date.
pub fn recalculate_schedule(
    breakdown: &WorkBreakdown,
    start_date: NaiveDate,
    hours_per_day: f64,
) -> Result<Schedule, EngineError> {
    allocate_schedule(breakdown, start_date, hours_per_day, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::investment::calculate_investment;
    use crate::model::{Phase, PhaseTask};

    fn sample_investment() -> InvestmentBreakdown {
        let mut dev = Phase::new("Desenvolvimento", 80.0);
        dev.tasks.push(PhaseTask::new("API", 80.0));
        let breakdown = WorkBreakdown::new(vec![Phase::new("Planejamento", 40.0), dev]);
        calculate_investment(&breakdown, 150).unwrap()
    }

    #[test]
    fn new_rate_reprices_every_phase() {
        let investment = sample_investment();
        let repriced = recalculate_investment(&investment, 300).unwrap();

        assert_eq!(repriced.hourly_rate_cents, 300);
        assert_eq!(repriced.phases[0].value_cents, 12_000);
        assert_eq!(repriced.phases[1].value_cents, 24_000);
        assert_eq!(repriced.total_value_cents, 36_000);
    }

    #[test]
    fn hours_and_order_survive_unchanged() {
        let investment = sample_investment();
        let repriced = recalculate_investment(&investment, 999).unwrap();

        assert_eq!(repriced.total_hours, investment.total_hours);
        let before: Vec<_> = investment.phases.iter().map(|p| (&p.name, p.hours)).collect();
        let after: Vec<_> = repriced.phases.iter().map(|p| (&p.name, p.hours)).collect();
        assert_eq!(before, after);
        assert_eq!(repriced.phases[1].deliverables, investment.phases[1].deliverables);
    }

    #[test]
    fn repricing_is_idempotent() {
        let investment = sample_investment();
        let once = recalculate_investment(&investment, 250).unwrap();
        let twice = recalculate_investment(&investment, 250).unwrap();
        assert_eq!(once, twice);
        // Applying the original rate reproduces the original breakdown.
        assert_eq!(
            recalculate_investment(&investment, 150).unwrap(),
            investment
        );
    }

    #[test]
    fn negative_rate_is_rejected() {
        let investment = sample_investment();
        assert!(matches!(
            recalculate_investment(&investment, -10),
            Err(EngineError::NegativeRate { .. })
        ));
    }

    #[test]
    fn schedule_recalculation_is_deterministic() {
        let breakdown = WorkBreakdown::new(vec![
            Phase::new("Planejamento", 40.0),
            Phase::new("Desenvolvimento", 80.0),
        ]);
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let first = recalculate_schedule(&breakdown, start, 8.0).unwrap();
        let second = recalculate_schedule(&breakdown, start, 8.0).unwrap();
        assert_eq!(first, second);
    }
}
