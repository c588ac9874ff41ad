// src/schema/period.rs

use std::{fmt, path::PathBuf, str::FromStr};

use crate::error::ScrapeError;

const MONTHS: &[(&str, u32)] = &[
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("SEPT", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

/// Month number for an abbreviation such as `"Oct"` or `"Sept"`.
pub fn month_number(token: &str) -> Result<u32, ScrapeError> {
    let upper = token.to_uppercase();
    MONTHS
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|&(_, n)| n)
        .ok_or_else(|| ScrapeError::UnknownMonth(token.to_string()))
}

/// Month and year a ranking applies to, read from the top-20 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportingPeriod {
    pub year: i32,
    pub month: u32,
}

impl ReportingPeriod {
    /// `<year>/<year>-<MM>.tsv`
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.year.to_string()).join(format!("{}.tsv", self))
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReportingPeriod {
    type Err = ScrapeError;

    /// Parses `"Oct 2025"`: exactly a month token and a year token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let (Some(month), Some(year), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(ScrapeError::MalformedPeriod(s.to_string()));
        };
        let month = month_number(month)?;
        let year = year
            .parse()
            .map_err(|_| ScrapeError::MalformedPeriod(s.to_string()))?;
        Ok(Self { year, month })
    }
}
