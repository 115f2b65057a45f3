use chrono::{DateTime, Utc};

/// "YYYYMM" billing period label for a reading timestamp.
pub fn period_label(now: DateTime<Utc>) -> String {
    now.format("%Y%m").to_string()
}

/// Timestamp format used for stored meter readings.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y/%m/%d-%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn period_label_is_year_month() {
        let now = Utc.with_ymd_and_hms(2025, 8, 31, 9, 30, 0).unwrap();
        assert_eq!(period_label(now), "202508");
        assert_eq!(format_timestamp(now), "2025/08/31-09:30");
    }
}
