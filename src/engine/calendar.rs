use chrono::{Datelike, Duration, NaiveDate};

/// True for Monday through Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() < 5
}

/// The first working day at or after `date`.
pub fn first_working_day_from(date: NaiveDate) -> NaiveDate {
    let mut day = date;
    while !is_working_day(day) {
        day += Duration::days(1);
    }
    day
}

/// The last working day at or before `date`.
pub fn last_working_day_until(date: NaiveDate) -> NaiveDate {
    let mut day = date;
    while !is_working_day(day) {
        day -= Duration::days(1);
    }
    day
}

/// The first working day strictly after `date`.
pub fn next_working_day(date: NaiveDate) -> NaiveDate {
    first_working_day_from(date + Duration::days(1))
}

/// The working day reached by stepping `days` working days forward from
/// `date`, skipping weekends. `date` itself is not counted:
/// `advance_working_days(monday, 1)` is the Tuesday after it.
///
/// Driven by a plain counter, so it terminates for any input.
pub fn advance_working_days(date: NaiveDate, days: u32) -> NaiveDate {
    let mut day = date;
    for _ in 0..days {
        day = next_working_day(day);
    }
    day
}

/// Count of Mon–Fri days in `[start, end]` inclusive. Zero when the
/// range is empty.
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = start;
    while day <= end {
        if is_working_day(day) {
            count += 1;
        }
        day += Duration::days(1);
    }
    count
}
