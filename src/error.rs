use chrono::NaiveDate;

/// Fatal input errors raised before any allocation work starts.
///
/// Every variant points at a value the caller supplied; the engine never
/// clamps or silently repairs bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("hours per day must be positive, got {got}")]
    HoursPerDayNotPositive { got: f64 },

    #[error("hourly rate must not be negative, got {got} cents")]
    NegativeRate { got: i64 },

    #[error("phase '{phase}' has a negative hour estimate ({hours})")]
    NegativeHours { phase: String, hours: f64 },

    #[error("phase at position {index} has an empty name")]
    EmptyPhaseName { index: usize },

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("no working days available between {start} and {end}")]
    NoWorkingDays { start: NaiveDate, end: NaiveDate },
}
