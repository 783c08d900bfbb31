use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Date {
    year: i16,
    month: i8,
    day: i8,
}

impl Date {
    pub fn new(year: i16, month: i8, day: i8) -> Self {
        Date { year, month, day }
    }

    pub fn year(self) -> i16 {
        self.year
    }

    pub fn month(self) -> i8 {
        self.month
    }

    pub fn day(self) -> i8 {
        self.day
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Dates in script are always written as `year.month.day`, all three fields present.
    /// The month must be 1 to 12 and the day 1 to 31.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut splits = s.split('.');
        let year = splits.next().ok_or(Error)?;
        let month = splits.next().ok_or(Error)?;
        let day = splits.next().ok_or(Error)?;
        if splits.next().is_some() {
            return Err(Error);
        }
        let date = Date {
            year: year.parse().map_err(|_| Error)?,
            month: month.parse().map_err(|_| Error)?,
            day: day.parse().map_err(|_| Error)?,
        };
        if !(1..=12).contains(&date.month) || !(1..=31).contains(&date.day) {
            return Err(Error);
        }
        Ok(date)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}.{}.{}", self.year, self.month, self.day)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let date: Date = "1444.11.11".parse().unwrap();
        assert_eq!(date, Date::new(1444, 11, 11));
        assert_eq!(date.to_string(), "1444.11.11");
    }

    #[test]
    fn test_reject() {
        assert!("1444.11".parse::<Date>().is_err());
        assert!("1444.11.11.1".parse::<Date>().is_err());
        assert!("1444.11.300".parse::<Date>().is_err());
        assert!("1444.0.1".parse::<Date>().is_err());
        assert!("1444.13.1".parse::<Date>().is_err());
        assert!("1444.1.0".parse::<Date>().is_err());
        assert!("1444.1.32".parse::<Date>().is_err());
        assert_eq!("-50.12.31".parse::<Date>().unwrap(), Date::new(-50, 12, 31));
        assert!("a.b.c".parse::<Date>().is_err());
    }

    #[test]
    fn test_order() {
        assert!(Date::new(1936, 1, 1) < Date::new(1936, 1, 2));
        assert!(Date::new(1444, 12, 31) < Date::new(1445, 1, 1));
    }
}
