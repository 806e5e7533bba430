use chrono::{DateTime, Utc};

/// Format a UTC time the way the report header shows it
pub fn format_report_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Get current timestamp as formatted string
pub fn current_timestamp() -> String {
    format_report_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_report_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_report_timestamp(at), "2024-03-09 07:05:01 UTC");
    }
}
