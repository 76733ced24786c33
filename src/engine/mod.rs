pub mod calendar;
pub mod investment;
pub mod recalc;
pub mod schedule;

pub use investment::calculate_investment;
pub use recalc::{recalculate_investment, recalculate_schedule};
pub use schedule::allocate_schedule;
