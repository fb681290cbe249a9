use chrono::{DateTime, Local};

/// ctime(3) layout, e.g. `Sun Oct 18 09:15:02 2026`.
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

// Get current local timestamp as a formatted string
pub fn current_local_timestamp_str(format_str: &str) -> String {
    let now: DateTime<Local> = Local::now();
    now.format(format_str).to_string()
}

/// Today's date as `YYYY-MM-DD`.
pub fn today_stamp() -> String {
    Local::now().date_naive().to_string()
}

pub fn ctime_stamp() -> String {
    current_local_timestamp_str(CTIME_FORMAT)
}

pub fn ctime_of(time: &DateTime<Local>) -> String {
    time.format(CTIME_FORMAT).to_string()
}

/// Formats an elapsed duration in seconds.
///
/// Sub-second values are rounded to two decimals (half to even) and printed
/// as-is (`0.4`).
/// Anything else is rounded to whole seconds (half to even) and broken down
/// into `D days, H hours, M minutes, S seconds`, using the singular form only
/// for a value of exactly one.
pub fn format_elapsed(seconds: f64) -> String {
    if (0.0..1.0).contains(&seconds) {
        let rounded = (seconds * 100.0).round_ties_even() / 100.0;
        let mut text = rounded.to_string();
        if !text.contains('.') {
            text.push_str(".0");
        }
        return text;
    }

    let total = seconds.round_ties_even() as i64;
    let (minutes, secs) = (total.div_euclid(60), total.rem_euclid(60));
    let (hours, minutes) = (minutes.div_euclid(60), minutes.rem_euclid(60));
    let (days, hours) = (hours.div_euclid(24), hours.rem_euclid(24));

    format!(
        "{} day{}, {} hour{}, {} minute{}, {} second{}",
        days, plural(days),
        hours, plural(hours),
        minutes, plural(minutes),
        secs, plural(secs)
    )
}

fn plural(value: i64) -> &'static str {
    if value == 1 { "" } else { "s" }
}
