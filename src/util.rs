use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Calendar-day key for daily results.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub fn date_key<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DATE_KEY_FORMAT).to_string()
}

/// Calendar day a daily result belongs to; days roll over at UTC midnight.
pub fn daily_date<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.with_timezone(&Utc).date_naive()
}

pub fn daily_key<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    date_key(&at.with_timezone(&Utc))
}

/// `MM:SS`, minutes keep growing past an hour.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
