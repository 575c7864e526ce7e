//! Clock and date strings shown on the board header.
//!
//! The board treats both as plain character sequences; formatting quirks
//! (unpadded hours, two-digit year) are part of the display contract and are
//! pinned by tests.

use chrono::{DateTime, Datelike, Local, Timelike, Weekday};

/// Formats the header clock, e.g. `3:07:09 PM`.
///
/// Hours above twelve wrap into the afternoon and flip the suffix; hours are
/// never zero-padded.
#[must_use]
pub fn time_string(now: DateTime<Local>) -> String {
    let mut hours = now.hour();
    let mut pm = false;
    if hours > 12 {
        hours -= 12;
        pm = true;
    }
    format!(
        "{}:{:02}:{:02} {}",
        hours,
        now.minute(),
        now.second(),
        if pm { "PM" } else { "AM" }
    )
}

/// Formats the header date, e.g. `WEDNESDAY 8/6/26`.
#[must_use]
pub fn date_string(now: DateTime<Local>) -> String {
    let weekday = match now.weekday() {
        Weekday::Sun => "SUNDAY",
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
    };
    format!(
        "{} {}/{}/{}",
        weekday,
        now.month(),
        now.day(),
        now.year() - 2000
    )
}
