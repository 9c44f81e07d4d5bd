//! Calendar dates travel as `YYYY-MM-DD` strings on the wire and in SQLite.

use time::{format_description::FormatItem, macros::format_description, Date, Duration};

use crate::error::AppError;

pub const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_iso(field: &'static str, raw: &str) -> Result<Date, AppError> {
    Date::parse(raw.trim(), ISO_DATE)
        .map_err(|_| AppError::validation(field, "Date must be formatted as YYYY-MM-DD"))
}

/// Monday of the week containing `day`.
pub fn week_start(day: Date) -> Date {
    day - Duration::days(i64::from(day.weekday().number_days_from_monday()))
}

pub fn today_utc() -> Date {
    time::OffsetDateTime::now_utc().date()
}

/// `#[serde(with = "crate::dates::iso_date")]`
pub mod iso_date {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::ISO_DATE;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(ISO_DATE).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(raw.trim(), ISO_DATE).map_err(D::Error::custom)
    }

    /// Blank strings deserialize to `None`.
    pub mod option {
        use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
        use time::Date;

        use super::super::ISO_DATE;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(s) => Date::parse(s, ISO_DATE).map(Some).map_err(D::Error::custom),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso("day", "2024-03-05").unwrap(), date!(2024 - 03 - 05));
        assert_eq!(parse_iso("day", " 2024-03-05 ").unwrap(), date!(2024 - 03 - 05));
    }

    #[test]
    fn rejects_other_formats_naming_the_field() {
        let err = parse_iso("log_date", "05/03/2024").unwrap_err();
        assert_eq!(err.field(), Some("log_date"));
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-03-07 is a Thursday
        assert_eq!(week_start(date!(2024 - 03 - 07)), date!(2024 - 03 - 04));
        assert_eq!(week_start(date!(2024 - 03 - 04)), date!(2024 - 03 - 04));
        assert_eq!(week_start(date!(2024 - 03 - 10)), date!(2024 - 03 - 04));
    }

    #[test]
    fn serde_helpers_use_iso_strings() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Row {
            #[serde(with = "iso_date")]
            day: Date,
            #[serde(default, with = "iso_date::option")]
            other: Option<Date>,
        }

        let row: Row = serde_json::from_str(r#"{"day":"2024-01-31","other":""}"#).unwrap();
        assert_eq!(row.day, date!(2024 - 01 - 31));
        assert!(row.other.is_none());
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"day":"2024-01-31","other":null}"#);
    }
}
