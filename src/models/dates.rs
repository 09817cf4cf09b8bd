use chrono::{Datelike, Months, NaiveDate};

/// Returns the 5th of the month after `today`
///
/// This is the default monthly due date assigned to students created without
/// one.
pub fn fifth_of_next_month(today: NaiveDate) -> NaiveDate {
    let first = today.with_day(1).expect("day 1 is valid in every month");
    let next = first
        .checked_add_months(Months::new(1))
        .expect("adding one month to day 1 never overflows");
    next.with_day(5).expect("day 5 is valid in every month")
}

/// Advances a due date by exactly one calendar month
///
/// Days past the end of the target month clamp to its last day (Jan 31
/// becomes Feb 28/29).
pub fn one_month_after(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1))
        .expect("date arithmetic stays within supported range")
}

/// Parses a wire date string into a `NaiveDate`
///
/// Only the leading `YYYY-MM-DD` portion is considered, so full ISO
/// timestamps stored by older data files parse to their date part.
pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    let head = value.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
