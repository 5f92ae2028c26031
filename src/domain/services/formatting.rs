#[cfg(test)]
#[path = "formatting_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Datelike;
use chrono::Duration;
use chrono::Local;
use chrono::TimeZone;
use chrono::Timelike;

use crate::domain::models::Message;

/// True when `current` starts a new calendar day compared to `previous`, or when there
/// is no previous message at all. Compares calendar components in the timestamps' own
/// time zone, never elapsed time.
pub fn should_insert_date_separator<Tz: TimeZone>(
    current: &DateTime<Tz>,
    previous: Option<&DateTime<Tz>>,
) -> bool {
    if let Some(previous) = previous {
        return current.year() != previous.year()
            || current.month() != previous.month()
            || current.day() != previous.day();
    }

    return true;
}

/// `오늘` and `어제` for the two most recent calendar days relative to `now`, an absolute
/// `YYYY년 M월 D일` label otherwise.
pub fn format_relative_date_label<Tz: TimeZone>(
    timestamp: &DateTime<Tz>,
    now: &DateTime<Tz>,
) -> String {
    let date = timestamp.date_naive();
    let today = now.date_naive();

    if date == today {
        return "오늘".to_string();
    }
    if Some(date) == today.checked_sub_signed(Duration::days(1)) {
        return "어제".to_string();
    }

    return format!("{}년 {}월 {}일", date.year(), date.month(), date.day());
}

pub fn format_clock_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    return format!("{:02}:{:02}", timestamp.hour(), timestamp.minute());
}

pub fn message_needs_date_separator(current: &Message, previous: Option<&Message>) -> bool {
    let current_local = current.created_at.with_timezone(&Local);
    let previous_local = previous.map(|msg| return msg.created_at.with_timezone(&Local));

    return should_insert_date_separator(&current_local, previous_local.as_ref());
}

pub fn message_date_label(message: &Message) -> String {
    return format_relative_date_label(&message.created_at.with_timezone(&Local), &Local::now());
}

pub fn message_clock_time(message: &Message) -> String {
    return format_clock_time(&message.created_at.with_timezone(&Local));
}
