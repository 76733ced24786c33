use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A phase anchored to the calendar.
///
/// Both dates always fall on a working day (Mon–Fri).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePhase {
    /// Correlation key back to the source phase, when known.
    pub phase_id: Option<Uuid>,
    pub phase_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours: f64,
    /// Mon–Fri days spanned, inclusive.
    pub working_days: u32,
    /// Up to three short labels shown on the timeline.
    pub milestones: Vec<String>,
}

/// Ordered list of scheduled phases, contiguous in phase order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub phases: Vec<SchedulePhase>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Total hours allocated across all phases.
    pub fn total_hours(&self) -> f64 {
        self.phases.iter().map(|p| p.hours).sum()
    }

    /// Overall calendar span, when any phases exist.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.phases.first()?;
        let last = self.phases.last()?;
        Some((first.start_date, last.end_date))
    }
}
