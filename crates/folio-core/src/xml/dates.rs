use chrono::NaiveDate;

/// Partial calendar date recovered from a loosely formatted string.
/// bepress exports mix `2019-06-01`, `2019-06`, `6/1/2019`, and spelled-out
/// forms like `June 1, 2019`, sometimes with a trailing time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateParts {
    /// A full calendar date; requires month and day and calendar validity.
    pub fn full_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month?, self.day?)
    }

    /// Date with the day defaulted to 1; requires a month.
    pub fn month_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month?, self.day.unwrap_or(1))
    }
}

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parses year/month/day parts out of a date string, or `None` when no
/// usable year is present or a part is out of range.
pub fn parse_date_parts(raw: &str) -> Option<DateParts> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // Drop any time component ("2019-06-01 10:30:00", "2019-06-01T10:30:00").
    let date_part = raw.split('T').next().unwrap_or(raw);

    if date_part.chars().any(|c| c.is_ascii_alphabetic()) {
        return parse_spelled_out(date_part);
    }

    let date_part = date_part.split_whitespace().next()?;
    let segments: Vec<&str> = date_part
        .split(['-', '/', '.'])
        .filter(|s| !s.is_empty())
        .collect();
    if segments.iter().any(|s| s.parse::<u32>().is_err()) {
        return None;
    }

    let parts = match segments.as_slice() {
        [year] if year.len() == 4 => DateParts {
            year: year.parse().ok()?,
            month: None,
            day: None,
        },
        [year, month] if year.len() == 4 => DateParts {
            year: year.parse().ok()?,
            month: Some(month.parse().ok()?),
            day: None,
        },
        // US style "6/2019"
        [month, year] if year.len() == 4 => DateParts {
            year: year.parse().ok()?,
            month: Some(month.parse().ok()?),
            day: None,
        },
        [year, month, day] if year.len() == 4 => DateParts {
            year: year.parse().ok()?,
            month: Some(month.parse().ok()?),
            day: Some(day.parse().ok()?),
        },
        // US style "6/1/2019"
        [month, day, year] if year.len() == 4 => DateParts {
            year: year.parse().ok()?,
            month: Some(month.parse().ok()?),
            day: Some(day.parse().ok()?),
        },
        _ => return None,
    };

    validate(parts)
}

/// `June 1, 2019` / `1 June 2019` / `June 2019`.
fn parse_spelled_out(input: &str) -> Option<DateParts> {
    let mut month = None;
    let mut day = None;
    let mut year = None;

    for token in input.split_whitespace() {
        let token = token.trim_matches(|c: char| c == ',' || c == '.');
        if token.is_empty() {
            continue;
        }
        let lower = token.to_lowercase();
        if let Some(m) = MONTHS.iter().position(|name| name.starts_with(&lower) && lower.len() >= 3)
        {
            month = Some(m as u32 + 1);
        } else if let Ok(num) = token.parse::<u32>() {
            if token.len() == 4 {
                year = Some(num as i32);
            } else {
                day = Some(num);
            }
        } else {
            return None;
        }
    }

    validate(DateParts {
        year: year?,
        month,
        day,
    })
}

fn validate(parts: DateParts) -> Option<DateParts> {
    if let Some(month) = parts.month {
        if !(1..=12).contains(&month) {
            return None;
        }
    }
    if let Some(day) = parts.day {
        if !(1..=31).contains(&day) {
            return None;
        }
    }
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_full_date() {
        let parts = parse_date_parts("2019-06-01").unwrap();
        assert_eq!(parts, DateParts { year: 2019, month: Some(6), day: Some(1) });
        assert_eq!(parts.full_date(), NaiveDate::from_ymd_opt(2019, 6, 1));
    }

    #[test]
    fn iso_year_month_defaults_day() {
        let parts = parse_date_parts("2020-03").unwrap();
        assert_eq!(parts.day, None);
        assert_eq!(parts.month_start(), NaiveDate::from_ymd_opt(2020, 3, 1));
        assert_eq!(parts.full_date(), None);
    }

    #[test]
    fn us_slash_date() {
        let parts = parse_date_parts("6/15/2019").unwrap();
        assert_eq!(parts, DateParts { year: 2019, month: Some(6), day: Some(15) });
    }

    #[test]
    fn spelled_out_date() {
        let parts = parse_date_parts("June 1, 2019").unwrap();
        assert_eq!(parts, DateParts { year: 2019, month: Some(6), day: Some(1) });
        let parts = parse_date_parts("1 June 2019").unwrap();
        assert_eq!(parts.month, Some(6));
    }

    #[test]
    fn trailing_time_ignored() {
        let parts = parse_date_parts("2019-06-01 10:30:00").unwrap();
        assert_eq!(parts.day, Some(1));
    }

    #[test]
    fn year_only() {
        let parts = parse_date_parts("2019").unwrap();
        assert_eq!(parts, DateParts { year: 2019, month: None, day: None });
    }

    #[test]
    fn out_of_range_month_rejected() {
        assert_eq!(parse_date_parts("2020-13"), None);
        assert_eq!(parse_date_parts("2020-00-05"), None);
    }

    #[test]
    fn garbage_rejected() {
        assert_eq!(parse_date_parts("soon"), None);
        assert_eq!(parse_date_parts(""), None);
        assert_eq!(parse_date_parts("12-05"), None);
    }

    #[test]
    fn invalid_calendar_date_has_no_full_date() {
        let parts = parse_date_parts("2019-02-30").unwrap();
        assert_eq!(parts.full_date(), None);
    }
}
