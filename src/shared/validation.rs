use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Report date in day/month/year order
    /// - Valid: "15/03/2025", "1/3/2025"
    /// - Invalid: "2025-03-15", "15-03-2025", "15/03/25"
    pub static ref REPORT_DATE_REGEX: Regex =
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap();

    /// Report time on a 12-hour clock with an AM/PM suffix
    /// - Valid: "10:30 AM", "2:15 PM", "12:00 am"
    /// - Invalid: "14:15", "10:30", "10.30 AM"
    pub static ref REPORT_TIME_REGEX: Regex =
        Regex::new(r"^(\d{1,2}):(\d{2})\s*([AaPp][Mm])$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_date_regex_valid() {
        assert!(REPORT_DATE_REGEX.is_match("15/03/2025"));
        assert!(REPORT_DATE_REGEX.is_match("1/3/2025"));
        assert!(REPORT_DATE_REGEX.is_match("31/12/1999"));
    }

    #[test]
    fn test_report_date_regex_invalid() {
        assert!(!REPORT_DATE_REGEX.is_match("2025-03-15"));
        assert!(!REPORT_DATE_REGEX.is_match("15-03-2025"));
        assert!(!REPORT_DATE_REGEX.is_match("15/03/25"));
        assert!(!REPORT_DATE_REGEX.is_match(""));
    }

    #[test]
    fn test_report_time_regex() {
        assert!(REPORT_TIME_REGEX.is_match("10:30 AM"));
        assert!(REPORT_TIME_REGEX.is_match("2:15 PM"));
        assert!(REPORT_TIME_REGEX.is_match("12:00 am"));
        assert!(!REPORT_TIME_REGEX.is_match("14:15"));
        assert!(!REPORT_TIME_REGEX.is_match("10.30 AM"));
        assert!(!REPORT_TIME_REGEX.is_match("10:3 AM"));
    }
}
