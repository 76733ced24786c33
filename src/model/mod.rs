pub mod investment;
pub mod phase;
pub mod proposal;
pub mod schedule;

pub use investment::{InvestmentBreakdown, InvestmentPhase};
pub use phase::{Phase, PhaseTask, WorkBreakdown};
pub use proposal::{NarrativeSections, Proposal, ProposalParams};
pub use schedule::{Schedule, SchedulePhase};
