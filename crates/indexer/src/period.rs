use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Quarterly sub-period of the full index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Directory/file label used by the registry (`QTR1` .. `QTR4`)
    pub const fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "QTR1",
            Quarter::Q2 => "QTR2",
            Quarter::Q3 => "QTR3",
            Quarter::Q4 => "QTR4",
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Quarter::Q1),
            2 => Some(Quarter::Q2),
            3 => Some(Quarter::Q3),
            4 => Some(Quarter::Q4),
            _ => None,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quarter {
    type Err = String;

    /// Accepts `3`, `q3`, `QTR3` (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let digits = lowered
            .strip_prefix("qtr")
            .or_else(|| lowered.strip_prefix('q'))
            .unwrap_or(&lowered);
        digits
            .parse::<u8>()
            .ok()
            .and_then(Quarter::from_number)
            .ok_or_else(|| format!("invalid quarter: {s}"))
    }
}

/// Year selector, optionally narrowed to specific quarters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    quarters: BTreeSet<Quarter>,
}

impl Period {
    /// Whole year (all four quarters)
    pub fn year(year: i32) -> Self {
        Self {
            year,
            quarters: Quarter::ALL.into_iter().collect(),
        }
    }

    /// Year narrowed to the given quarters; an empty set means the whole year
    pub fn with_quarters(year: i32, quarters: impl IntoIterator<Item = Quarter>) -> Self {
        let quarters: BTreeSet<Quarter> = quarters.into_iter().collect();
        if quarters.is_empty() {
            return Self::year(year);
        }
        Self { year, quarters }
    }

    pub fn year_value(&self) -> i32 {
        self.year
    }

    /// Quarters in canonical (chronological) order
    pub fn quarters(&self) -> impl Iterator<Item = Quarter> + '_ {
        self.quarters.iter().copied()
    }

    /// Text matched against `date_filed` when selecting filings
    pub fn token(&self) -> String {
        self.year.to_string()
    }

    /// Expected index file names, in merge order
    pub fn file_names(&self) -> Vec<String> {
        self.quarters()
            .map(|quarter| index_file_name(self.year, quarter))
            .collect()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quarters.len() == Quarter::ALL.len() {
            return write!(f, "{}", self.year);
        }
        let labels: Vec<&str> = self.quarters().map(Quarter::label).collect();
        write!(f, "{} ({})", self.year, labels.join(", "))
    }
}

/// `{year}_{QTRn}_company.idx`
pub fn index_file_name(year: i32, quarter: Quarter) -> String {
    format!("{year}_{}_company.idx", quarter.label())
}
