use crate::error::EngineError;
use crate::model::{InvestmentBreakdown, InvestmentPhase, WorkBreakdown};

/// Price a work breakdown at an hourly rate (minor currency units).
///
/// Phase order is preserved and zero-hour phases are kept with a zero
/// value. An empty breakdown yields a valid zero result, not an error.
pub fn calculate_investment(
    breakdown: &WorkBreakdown,
    hourly_rate_cents: i64,
) -> Result<InvestmentBreakdown, EngineError> {
    if hourly_rate_cents < 0 {
        return Err(EngineError::NegativeRate {
            got: hourly_rate_cents,
        });
    }
    breakdown.validate()?;

    let phases: Vec<InvestmentPhase> = breakdown
        .phases
        .iter()
        .map(|phase| {
            let hours = phase.resolved_hours();
            InvestmentPhase {
                name: phase.name.clone(),
                hours,
                value_cents: phase_value_cents(hours, hourly_rate_cents),
                deliverables: phase.tasks.iter().map(|t| t.name.clone()).collect(),
            }
        })
        .collect();

    let total_hours = phases.iter().map(|p| p.hours).sum();
    let total_value_cents = phases.iter().map(|p| p.value_cents).sum();

    Ok(InvestmentBreakdown {
        phases,
        total_hours,
        total_value_cents,
        hourly_rate_cents,
    })
}

/// Cost of one phase in minor units, rounded to the nearest cent.
pub(crate) fn phase_value_cents(hours: f64, rate_cents: i64) -> i64 {
    (hours * rate_cents as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Phase, PhaseTask};

    #[test]
    fn prices_each_phase_and_totals() {
        let breakdown = WorkBreakdown::new(vec![
            Phase::new("Planejamento", 40.0),
            Phase::new("Desenvolvimento", 80.0),
        ]);
        let investment = calculate_investment(&breakdown, 150).unwrap();

        assert_eq!(investment.phases[0].value_cents, 6_000);
        assert_eq!(investment.phases[1].value_cents, 12_000);
        assert_eq!(investment.total_hours, 120.0);
        assert_eq!(investment.total_value_cents, 18_000);
        assert_eq!(investment.hourly_rate_cents, 150);
    }

    #[test]
    fn task_detail_wins_over_phase_estimate() {
        let mut phase = Phase::new("Desenvolvimento", 10.0);
        phase.tasks = vec![
            PhaseTask::new("API", 30.0),
            PhaseTask::new("Front-end", 20.0),
        ];
        let breakdown = WorkBreakdown::new(vec![phase]);
        let investment = calculate_investment(&breakdown, 100).unwrap();

        assert_eq!(investment.phases[0].hours, 50.0);
        assert_eq!(investment.phases[0].value_cents, 5_000);
        assert_eq!(
            investment.phases[0].deliverables,
            vec!["API".to_string(), "Front-end".to_string()]
        );
    }

    #[test]
    fn zero_hour_phases_are_retained() {
        let breakdown = WorkBreakdown::new(vec![
            Phase::new("Kickoff", 0.0),
            Phase::new("Desenvolvimento", 8.0),
        ]);
        let investment = calculate_investment(&breakdown, 200).unwrap();

        assert_eq!(investment.phases.len(), 2);
        assert_eq!(investment.phases[0].value_cents, 0);
        assert_eq!(investment.total_value_cents, 1_600);
    }

    #[test]
    fn empty_breakdown_yields_zero_result() {
        let investment = calculate_investment(&WorkBreakdown::default(), 150).unwrap();
        assert!(investment.phases.is_empty());
        assert_eq!(investment.total_hours, 0.0);
        assert_eq!(investment.total_value_cents, 0);
    }

    #[test]
    fn negative_rate_is_rejected() {
        let err = calculate_investment(&WorkBreakdown::default(), -1).unwrap_err();
        assert_eq!(err, EngineError::NegativeRate { got: -1 });
    }

    #[test]
    fn fractional_hours_round_to_the_cent() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("Ajustes", 1.5)]);
        let investment = calculate_investment(&breakdown, 333).unwrap();
        assert_eq!(investment.phases[0].value_cents, 500);
    }
}
