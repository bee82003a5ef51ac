//! Relative age labels such as `3h ago`.

use chrono::{DateTime, Utc};

/// Describe how long ago `created` was, relative to `now`.
///
/// Whole days win; below a day the remainder is reported in hours when
/// it exceeds an hour and in minutes when it exceeds a minute. Future
/// timestamps read as `just now`.
pub fn time_ago(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - created;
    let days = elapsed.num_days();
    if days > 0 {
        return format!("{days}d ago");
    }
    let seconds = elapsed.num_seconds();
    if seconds > 3600 {
        format!("{}h ago", seconds / 3600)
    } else if seconds > 60 {
        format!("{}m ago", seconds / 60)
    } else {
        "just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(secs: i64) -> String {
        let now = Utc::now();
        time_ago(now - Duration::seconds(secs), now)
    }

    #[test]
    fn test_buckets() {
        assert_eq!(ago(0), "just now");
        assert_eq!(ago(60), "just now");
        assert_eq!(ago(61), "1m ago");
        assert_eq!(ago(3600), "60m ago");
        assert_eq!(ago(3601), "1h ago");
        assert_eq!(ago(86_399), "23h ago");
        assert_eq!(ago(86_400), "1d ago");
        assert_eq!(ago(3 * 86_400 + 7200), "3d ago");
    }

    #[test]
    fn test_future_is_just_now() {
        assert_eq!(ago(-500), "just now");
    }
}
