/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Render a millisecond timestamp in the server's local time zone
///
/// Used for the human-readable suffix of scan log details.
pub fn display_timestamp(millis: i64) -> String {
    use chrono::TimeZone;
    match chrono::Local.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(t) | chrono::LocalResult::Ambiguous(t, _) => {
            t.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        chrono::LocalResult::None => millis.to_string(),
    }
}

/// Unix millis of the most recent local midnight
pub fn local_midnight_millis() -> i64 {
    use chrono::{Local, TimeZone};
    let today = Local::now().date_naive();
    let midnight = today.and_hms_opt(0, 0, 0).unwrap_or_default();
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|t| t.timestamp_millis())
        .unwrap_or_else(now_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_is_not_in_the_future() {
        let midnight = local_midnight_millis();
        let now = now_millis();
        assert!(midnight <= now);
        assert!(now - midnight <= 25 * 60 * 60 * 1000);
    }

    #[test]
    fn display_timestamp_format() {
        let rendered = display_timestamp(now_millis());
        assert_eq!(rendered.len(), "2026-01-01 00:00:00".len());
    }
}
