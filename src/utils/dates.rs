use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// 解析課程資料中的日期字串
///
/// 支援 RFC 3339 (`2024-03-01T12:00:00Z`)、不含時區的日期時間與純日期
/// (`2024-03-01`)。沒有時區資訊的值一律視為 UTC。無法解析時回傳 `None`，
/// 呼叫端把它當成「無效日期」處理，不會拋錯。
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn parse_optional_date(value: Option<&str>) -> Option<DateTime<Utc>> {
    value.and_then(parse_date)
}
