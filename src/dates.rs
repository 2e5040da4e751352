use time::{macros::format_description, Date, Duration, Month, OffsetDateTime};

pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Strict `YYYY-MM-DD`; anything else is treated as undated.
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

pub fn days_before(date: Date, days: i64) -> Date {
    date.checked_sub(Duration::days(days)).unwrap_or(Date::MIN)
}

/// Same day one calendar month earlier, clamped to the shorter month's last day.
pub fn minus_one_month(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::January => (date.year() - 1, Month::December),
        m => (date.year(), m.previous()),
    };
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN)
}

pub fn week_bounds(date: Date) -> (Date, Date) {
    let offset = i64::from(date.weekday().number_days_from_monday());
    let monday = days_before(date, offset);
    let sunday = monday
        .checked_add(Duration::days(6))
        .unwrap_or(Date::MAX);
    (monday, sunday)
}
