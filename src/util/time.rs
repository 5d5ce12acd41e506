use chrono::{DateTime, Local, NaiveDate, Utc};

/// Get the current time in seconds since the UNIX epoch
pub fn current_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Wall-clock timestamp for saved records
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Formats a date as `DD.MM.YYYY`
pub fn date_label(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Today's local date as `DD.MM.YYYY`
pub fn today_label() -> String {
    date_label(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_label_pads_day_and_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_label(date), "07.03.2024");
    }

    #[test]
    fn test_today_label_shape() {
        let label = today_label();
        assert_eq!(label.len(), 10);
        assert_eq!(&label[2..3], ".");
        assert_eq!(&label[5..6], ".");
    }
}
