use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{
    allocate_schedule, calculate_investment, recalculate_investment, recalculate_schedule,
};
use crate::error::EngineError;
use crate::model::{InvestmentBreakdown, Schedule, WorkBreakdown};
use crate::source::PhaseOrigin;

/// Free-text sections authored by the external content generator.
///
/// Opaque to the engine: investment and schedule computation never read
/// them, and every operation succeeds when all sections are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeSections {
    pub executive_summary: Option<String>,
    pub methodology: Option<String>,
    pub terms: Option<String>,
}

/// The numeric inputs of a proposal generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposalParams {
    /// Hourly rate in minor currency units (cents).
    pub hourly_rate_cents: i64,
    pub start_date: NaiveDate,
    /// Fixed delivery date; `None` for an open-ended schedule.
    pub end_date: Option<NaiveDate>,
    pub hours_per_day: f64,
}

/// An immutable numbered snapshot of a generated proposal.
///
/// Regeneration creates a new snapshot with the next version number;
/// numeric recalculation (rate or timeline edits) produces an updated
/// snapshot under the *same* version, since only numbers change, not
/// content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: Uuid,
    pub project_id: Uuid,
    /// Monotonically increasing per project, starting at 1. Never reused.
    pub version: u32,
    pub investment: InvestmentBreakdown,
    pub schedule: Schedule,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub hours_per_day: f64,
    /// Which phase source won at generation time.
    pub phase_origin: PhaseOrigin,
    pub narrative: NarrativeSections,
    /// Supplied by the caller; the engine never reads a global clock.
    pub created: DateTime<Utc>,
}

impl Proposal {
    /// Generate a proposal from an already-resolved work breakdown.
    ///
    /// `previous_version` is the latest version stored for the project,
    /// if any; the new snapshot gets the next number.
    pub fn generate(
        project_id: Uuid,
        breakdown: &WorkBreakdown,
        origin: PhaseOrigin,
        params: &ProposalParams,
        narrative: NarrativeSections,
        previous_version: Option<u32>,
        created: DateTime<Utc>,
    ) -> Result<Self, EngineError> {
        let investment = calculate_investment(breakdown, params.hourly_rate_cents)?;
        let schedule = allocate_schedule(
            breakdown,
            params.start_date,
            params.hours_per_day,
            params.end_date,
        )?;

        Ok(Self {
            id: Uuid::new_v4(),
            project_id,
            version: previous_version.map_or(1, |v| v + 1),
            investment,
            schedule,
            start_date: params.start_date,
            end_date: params.end_date,
            hours_per_day: params.hours_per_day,
            phase_origin: origin,
            narrative,
            created,
        })
    }

    /// Re-price this proposal at a new hourly rate. Only numbers change,
    /// so the version is kept.
    pub fn with_rate(&self, new_rate_cents: i64) -> Result<Self, EngineError> {
        let investment = recalculate_investment(&self.investment, new_rate_cents)?;
        Ok(Self {
            investment,
            ..self.clone()
        })
    }

    /// Re-derive the open-ended schedule for a new start date or pace.
    /// Same version; phases and hours come from the supplied breakdown,
    /// which is never re-selected here.
    pub fn with_timeline(
        &self,
        breakdown: &WorkBreakdown,
        start_date: NaiveDate,
        hours_per_day: f64,
    ) -> Result<Self, EngineError> {
        let schedule = recalculate_schedule(breakdown, start_date, hours_per_day)?;
        Ok(Self {
            schedule,
            start_date,
            end_date: None,
            hours_per_day,
            ..self.clone()
        })
    }
}
