//! Month view grids.
//!
//! A grid always covers whole weeks, so every row of seven cells starts on
//! the configured week start. The builder never looks at a habit's history;
//! callers pair each [`CellSpec::key`] with [`crate::HistoryMap::get`].

use std::fmt;

use time::{Date, Duration, Month, OffsetDateTime, Weekday};

use crate::DateKey;

/// First column of every grid and header row.
pub const WEEK_START: Weekday = Weekday::Sunday;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpec {
    pub date: Date,
    pub key: DateKey,
    pub in_current_month: bool,
    pub is_today: bool,
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

fn days_after_start(week_start: Weekday, day: Weekday) -> u8 {
    (day.number_days_from_monday() + 7 - week_start.number_days_from_monday()) % 7
}

fn month_bounds(year: i32, month: Month) -> dinho_shared::Result<(Date, Date)> {
    let out_of_range =
        || dinho_shared::Error::Validation(format!("{month} {year} is out of range"));

    let first = Date::from_calendar_date(year, month, 1).map_err(|_| out_of_range())?;
    let next_year = if month == Month::December {
        year + 1
    } else {
        year
    };
    let last = Date::from_calendar_date(next_year, month.next(), 1)
        .ok()
        .and_then(|d| d.previous_day())
        .ok_or_else(out_of_range)?;

    Ok((first, last))
}

pub fn build_month_grid(
    year: i32,
    month: Month,
    today: Date,
    week_start: Weekday,
) -> dinho_shared::Result<Vec<CellSpec>> {
    let (first, last) = month_bounds(year, month)?;

    let lead = days_after_start(week_start, first.weekday());
    let trail = 6 - days_after_start(week_start, last.weekday());

    let (Some(start), Some(end)) = (
        first.checked_sub(Duration::days(lead.into())),
        last.checked_add(Duration::days(trail.into())),
    ) else {
        dinho_shared::invalid!("{} {} is out of range", month, year);
    };

    let mut cells = Vec::with_capacity(42);
    let mut current = Some(start);
    while let Some(date) = current.filter(|d| *d <= end) {
        cells.push(CellSpec {
            date,
            key: DateKey::try_from(date)?,
            in_current_month: date.month() == month && date.year() == year,
            is_today: date == today,
        });
        current = date.next_day();
    }

    Ok(cells)
}

pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    let mut labels = [""; 7];
    let mut day = week_start;
    for label in labels.iter_mut() {
        *label = short_name(day);
        day = day.next();
    }
    labels
}

fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// Month currently shown by a calendar view, with prev/next navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month: Month,
}

impl MonthCursor {
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self.month {
            Month::December => Self {
                year: self.year + 1,
                month: Month::January,
            },
            month => Self {
                year: self.year,
                month: month.next(),
            },
        }
    }

    #[must_use]
    pub fn previous(self) -> Self {
        match self.month {
            Month::January => Self {
                year: self.year - 1,
                month: Month::December,
            },
            month => Self {
                year: self.year,
                month: month.previous(),
            },
        }
    }

    pub fn grid(&self, today: Date) -> dinho_shared::Result<Vec<CellSpec>> {
        build_month_grid(self.year, self.month, today, WEEK_START)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HistoryMap;
    use proptest::prelude::*;

    fn date(y: i32, m: Month, d: u8) -> Date {
        Date::from_calendar_date(y, m, d).unwrap()
    }

    fn weekday_from(n: u8) -> Weekday {
        let mut day = Weekday::Monday;
        for _ in 0..n {
            day = day.next();
        }
        day
    }

    proptest! {
        #[test]
        fn prop_grid_covers_month_in_whole_weeks(
            year in 1900i32..2200,
            month in 1u8..=12,
            start in 0u8..7,
        ) {
            let month = Month::try_from(month).unwrap();
            let week_start = weekday_from(start);
            let today = date(2024, Month::June, 15);
            let cells = build_month_grid(year, month, today, week_start).unwrap();
            let (first, last) = month_bounds(year, month).unwrap();

            prop_assert_eq!(cells.len() % 7, 0);
            prop_assert!((28..=42).contains(&cells.len()));
            prop_assert_eq!(cells[0].date.weekday(), week_start);

            let in_month = cells.iter().filter(|c| c.in_current_month).count();
            prop_assert_eq!(in_month, usize::from(last.day()));

            for cell in &cells {
                if cell.in_current_month {
                    prop_assert!(cell.date >= first && cell.date <= last);
                } else {
                    prop_assert!(cell.date < first || cell.date > last);
                }
            }

            for pair in cells.windows(2) {
                prop_assert_eq!(pair[0].date.next_day(), Some(pair[1].date));
            }
        }
    }

    #[test]
    fn test_june_2024_sunday_start() {
        let today = date(2024, Month::June, 12);
        let cells = build_month_grid(2024, Month::June, today, Weekday::Sunday).unwrap();

        // June 1st 2024 is a Saturday, June 30th a Sunday.
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[0].date, date(2024, Month::May, 26));
        assert_eq!(cells[6].key.to_string(), "2024-06-01");
        assert_eq!(cells[41].date, date(2024, Month::July, 6));

        let todays = cells.iter().filter(|c| c.is_today).collect::<Vec<_>>();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].key.to_string(), "2024-06-12");
    }

    #[test]
    fn test_february_can_fill_exactly_four_weeks() {
        // February 2015 starts on a Sunday and has 28 days.
        let cells =
            build_month_grid(2015, Month::February, date(2015, Month::March, 1), Weekday::Sunday)
                .unwrap();
        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(|c| c.in_current_month));
        assert!(cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_monday_start_moves_boundaries() {
        let today = date(2024, Month::June, 12);
        let cells = build_month_grid(2024, Month::June, today, Weekday::Monday).unwrap();

        assert_eq!(cells.len(), 35);
        assert_eq!(cells[0].date, date(2024, Month::May, 27));
        assert_eq!(cells[34].date, date(2024, Month::June, 30));
    }

    #[test]
    fn test_labels_follow_week_start() {
        assert_eq!(weekday_labels(WEEK_START)[0], "Sun");
        assert_eq!(
            weekday_labels(Weekday::Monday),
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
    }

    #[test]
    fn test_completion_is_a_separate_lookup() {
        let history = HistoryMap::new()
            .set(DateKey::parse("2024-06-01").unwrap(), true)
            .set(DateKey::parse("2024-05-31").unwrap(), true);
        let cells =
            build_month_grid(2024, Month::June, date(2024, Month::June, 1), WEEK_START).unwrap();

        let done = cells
            .iter()
            .filter(|c| history.get(&c.key))
            .map(|c| (c.key.to_string(), c.in_current_month))
            .collect::<Vec<_>>();

        assert_eq!(
            done,
            vec![
                ("2024-05-31".to_string(), false),
                ("2024-06-01".to_string(), true)
            ]
        );
    }

    #[test]
    fn test_cursor_navigation() {
        let cursor = MonthCursor::containing(date(2024, Month::January, 20));
        assert_eq!(cursor.previous(), MonthCursor { year: 2023, month: Month::December });
        assert_eq!(cursor.next().to_string(), "February 2024");
        assert_eq!(cursor.previous().next(), cursor);
    }
}
