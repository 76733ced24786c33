use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// A single item of work inside a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTask {
    pub name: String,
    pub estimated_hours: f64,
}

impl PhaseTask {
    pub fn new(name: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            name: name.into(),
            estimated_hours,
        }
    }
}

/// A named unit of project work with an hour estimate, optionally
/// decomposed into tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub estimated_hours: f64,
    #[serde(default)]
    pub tasks: Vec<PhaseTask>,
}

impl Phase {
    /// Create a new phase with no description or tasks.
    pub fn new(name: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            estimated_hours,
            tasks: Vec::new(),
        }
    }

    /// The hours that count for pricing and scheduling.
    ///
    /// Task-level hours override the phase estimate when tasks exist and
    /// their sum is non-zero. An all-zero task list usually means hours
    /// were never entered at task granularity, so the phase estimate
    /// stands.
    pub fn resolved_hours(&self) -> f64 {
        let task_sum: f64 = self.tasks.iter().map(|t| t.estimated_hours).sum();
        if !self.tasks.is_empty() && task_sum > 0.0 {
            task_sum
        } else {
            self.estimated_hours
        }
    }
}

/// The authoritative ordered list of phases for a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkBreakdown {
    pub phases: Vec<Phase>,
}

impl WorkBreakdown {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    /// Sum of resolved hours across all phases.
    pub fn total_hours(&self) -> f64 {
        self.phases.iter().map(|p| p.resolved_hours()).sum()
    }

    /// Reject breakdowns that cannot be priced or scheduled.
    ///
    /// Negative hours (phase or task level) are a data-entry mistake
    /// upstream and are reported, never clamped to zero. An empty phase
    /// list is valid.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (index, phase) in self.phases.iter().enumerate() {
            if phase.name.trim().is_empty() {
                return Err(EngineError::EmptyPhaseName { index });
            }
            if phase.estimated_hours < 0.0 {
                return Err(EngineError::NegativeHours {
                    phase: phase.name.clone(),
                    hours: phase.estimated_hours,
                });
            }
            if let Some(task) = phase.tasks.iter().find(|t| t.estimated_hours < 0.0) {
                return Err(EngineError::NegativeHours {
                    phase: phase.name.clone(),
                    hours: task.estimated_hours,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_estimate_stands_without_tasks() {
        let phase = Phase::new("Planejamento", 16.0);
        assert_eq!(phase.resolved_hours(), 16.0);
    }

    #[test]
    fn task_hours_override_phase_estimate() {
        let mut phase = Phase::new("Desenvolvimento", 40.0);
        phase.tasks = vec![
            PhaseTask::new("API", 30.0),
            PhaseTask::new("Front-end", 25.0),
        ];
        assert_eq!(phase.resolved_hours(), 55.0);
    }

    #[test]
    fn all_zero_task_list_does_not_override() {
        let mut phase = Phase::new("Desenvolvimento", 40.0);
        phase.tasks = vec![PhaseTask::new("API", 0.0), PhaseTask::new("Front-end", 0.0)];
        assert_eq!(phase.resolved_hours(), 40.0);
    }

    #[test]
    fn negative_phase_hours_are_rejected() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("Testes", -8.0)]);
        assert!(matches!(
            breakdown.validate(),
            Err(EngineError::NegativeHours { .. })
        ));
    }

    #[test]
    fn negative_task_hours_are_rejected() {
        let mut phase = Phase::new("Testes", 8.0);
        phase.tasks.push(PhaseTask::new("Regressão", -1.0));
        let breakdown = WorkBreakdown::new(vec![phase]);
        assert!(matches!(
            breakdown.validate(),
            Err(EngineError::NegativeHours { .. })
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        let breakdown = WorkBreakdown::new(vec![Phase::new("  ", 8.0)]);
        assert_eq!(
            breakdown.validate(),
            Err(EngineError::EmptyPhaseName { index: 0 })
        );
    }

    #[test]
    fn empty_breakdown_is_valid() {
        assert!(WorkBreakdown::default().validate().is_ok());
        assert_eq!(WorkBreakdown::default().total_hours(), 0.0);
    }
}
