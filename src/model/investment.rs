use serde::{Deserialize, Serialize};

/// The priced counterpart of a single phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPhase {
    pub name: String,
    /// Resolved hours (task sum when present, phase estimate otherwise).
    pub hours: f64,
    /// Cost in minor currency units: hours × hourly rate, rounded to the
    /// nearest cent.
    pub value_cents: i64,
    /// Task names, for display in the proposal document.
    pub deliverables: Vec<String>,
}

/// Full cost breakdown for a proposal.
///
/// All monetary amounts are integer minor currency units (cents);
/// callers convert to and from display units at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentBreakdown {
    pub phases: Vec<InvestmentPhase>,
    pub total_hours: f64,
    pub total_value_cents: i64,
    pub hourly_rate_cents: i64,
}
