use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use time::{Date, Month};

static RE_DATE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// Calendar-local date used as a history key, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(Date);

impl DateKey {
    pub fn date(&self) -> Date {
        self.0
    }

    pub fn parse(value: &str) -> dinho_shared::Result<Self> {
        if !RE_DATE_KEY.is_match(value) {
            dinho_shared::invalid!("date key `{}` must match YYYY-MM-DD", value);
        }

        // The regex guarantees three ASCII digit groups at fixed offsets.
        let year: i32 = value[0..4].parse().map_err(|_| invalid_key(value))?;
        let month: u8 = value[5..7].parse().map_err(|_| invalid_key(value))?;
        let day: u8 = value[8..10].parse().map_err(|_| invalid_key(value))?;

        let month = Month::try_from(month).map_err(|_| invalid_key(value))?;
        let date = Date::from_calendar_date(year, month, day).map_err(|_| invalid_key(value))?;

        Ok(Self(date))
    }
}

fn invalid_key(value: &str) -> dinho_shared::Error {
    dinho_shared::Error::Validation(format!("date key `{value}` is not a calendar date"))
}

impl TryFrom<Date> for DateKey {
    type Error = dinho_shared::Error;

    fn try_from(date: Date) -> Result<Self, Self::Error> {
        if !(0..=9999).contains(&date.year()) {
            dinho_shared::invalid!("year {} cannot be written as a date key", date.year());
        }

        Ok(Self(date))
    }
}

impl FromStr for DateKey {
    type Err = dinho_shared::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        DateKey::parse(&value).map_err(de::Error::custom)
    }
}
