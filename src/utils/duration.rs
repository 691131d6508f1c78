//! Human readable durations for notifications and command replies

fn unit(count: u64, singular: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}s", count, singular)
    }
}

/// Render a signed number of seconds as "1 week, 2 days, 3 hours, ...".
///
/// The sign is ignored. Zero units are left out, except that "0 minutes" is
/// always shown below one hour and "0 seconds" is shown for a zero input.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.unsigned_abs();

    let weeks = seconds / 60 / 60 / 24 / 7;
    let days = seconds / 60 / 60 / 24 % 7;
    let hours = seconds / 60 / 60 % 24;
    let minutes = seconds / 60 % 60;
    let secs = seconds % 60;

    let mut output = Vec::new();
    if weeks != 0 {
        output.push(unit(weeks, "week"));
    }
    if days != 0 {
        output.push(unit(days, "day"));
    }
    if hours != 0 {
        output.push(unit(hours, "hour"));
    }
    if minutes != 0 || (weeks == 0 && days == 0 && hours == 0) {
        output.push(unit(minutes, "minute"));
    }
    if secs != 0 || seconds == 0 {
        output.push(unit(secs, "second"));
    }

    output.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_shows_both_forced_units() {
        assert_eq!(format_duration(0), "0 minutes, 0 seconds");
    }

    #[test]
    fn singular_and_plural_units() {
        assert_eq!(format_duration(65), "1 minute, 5 seconds");
        assert_eq!(format_duration(3661), "1 hour, 1 minute, 1 second");
        assert_eq!(format_duration(7322), "2 hours, 2 minutes, 2 seconds");
    }

    #[test]
    fn zero_minutes_only_forced_below_an_hour() {
        assert_eq!(format_duration(5), "0 minutes, 5 seconds");
        assert_eq!(format_duration(60), "1 minute");
        assert_eq!(format_duration(3600), "1 hour");
        assert_eq!(format_duration(3605), "1 hour, 5 seconds");
    }

    #[test]
    fn weeks_and_days() {
        let week = 7 * 24 * 3600;
        assert_eq!(format_duration(week), "1 week");
        assert_eq!(format_duration(2 * week + 24 * 3600 + 1), "2 weeks, 1 day, 1 second");
    }

    #[test]
    fn sign_is_ignored() {
        assert_eq!(format_duration(-42), format_duration(42));
        assert_eq!(format_duration(-3661), "1 hour, 1 minute, 1 second");
    }
}
