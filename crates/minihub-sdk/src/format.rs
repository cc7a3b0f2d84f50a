//! Display helpers for amounts, timestamps and ids

use chrono::{Local, TimeZone, Utc};
use minihub_primitives::{Address, TimestampMs};

const MINUTE_MS: u64 = 60_000;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;

/// Current wall-clock time in milliseconds since the epoch
pub fn now_ms() -> TimestampMs {
    Utc::now().timestamp_millis().max(0) as u64
}

/// `"12,500 SUI"`, or `"Not specified"` without a salary
pub fn format_salary(salary: Option<u64>) -> String {
    match salary {
        Some(amount) => format!("{} SUI", group_thousands(amount)),
        None => "Not specified".to_string(),
    }
}

/// Local time as `DD.MM.YYYY HH:MM:SS`
pub fn format_timestamp(ms: TimestampMs) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%d.%m.%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "Invalid date".to_string())
}

/// Age of `ms` relative to `now`, e.g. `"3 hours ago"`
pub fn relative_time(ms: TimestampMs, now: TimestampMs) -> String {
    let diff = now.saturating_sub(ms);
    if diff < MINUTE_MS {
        "just now".to_string()
    } else if diff < HOUR_MS {
        format!("{} ago", plural(diff / MINUTE_MS, "minute"))
    } else if diff < DAY_MS {
        format!("{} ago", plural(diff / HOUR_MS, "hour"))
    } else {
        format!("{} ago", plural(diff / DAY_MS, "day"))
    }
}

/// Time left until `deadline`, e.g. `"2 days left"`, or `"Expired"`
pub fn time_until_deadline(deadline: TimestampMs, now: TimestampMs) -> String {
    if now > deadline {
        return "Expired".to_string();
    }
    let left = deadline - now;
    if left >= DAY_MS {
        format!("{} left", plural(left / DAY_MS, "day"))
    } else if left >= HOUR_MS {
        format!("{} left", plural(left / HOUR_MS, "hour"))
    } else {
        format!("{} left", plural(left / MINUTE_MS, "minute"))
    }
}

/// `0x1234...abcd` form of an id for tables
pub fn short_id(id: &Address) -> String {
    let hex = id.to_hex();
    format!("{}...{}", &hex[..6], &hex[hex.len() - 4..])
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(None), "Not specified");
        assert_eq!(format_salary(Some(0)), "0 SUI");
        assert_eq!(format_salary(Some(950)), "950 SUI");
        assert_eq!(format_salary(Some(12_500)), "12,500 SUI");
        assert_eq!(format_salary(Some(1_000_000)), "1,000,000 SUI");
    }

    #[test]
    fn test_format_timestamp_shape() {
        let s = format_timestamp(1_700_000_000_000);
        assert_eq!(s.len(), "14.11.2023 22:13:20".len());
        assert_eq!(&s[2..3], ".");
        assert_eq!(&s[5..6], ".");
    }

    #[test]
    fn test_relative_time() {
        let now = 10 * DAY_MS;
        assert_eq!(relative_time(now - 30_000, now), "just now");
        assert_eq!(relative_time(now - 5 * MINUTE_MS, now), "5 minutes ago");
        assert_eq!(relative_time(now - HOUR_MS, now), "1 hour ago");
        assert_eq!(relative_time(now - 3 * DAY_MS, now), "3 days ago");
        assert_eq!(relative_time(now + 1_000, now), "just now");
    }

    #[test]
    fn test_time_until_deadline() {
        let now = 1_000;
        assert_eq!(time_until_deadline(999, now), "Expired");
        assert_eq!(time_until_deadline(now + 2 * DAY_MS + HOUR_MS, now), "2 days left");
        assert_eq!(time_until_deadline(now + 3 * HOUR_MS, now), "3 hours left");
        assert_eq!(time_until_deadline(now + 90_000, now), "1 minute left");
    }

    #[test]
    fn test_short_id() {
        let id = Address::from_hex("0x6").unwrap();
        assert_eq!(short_id(&id), "0x0000...0006");
    }
}
