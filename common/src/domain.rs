use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset of a calendar day from today, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Tomorrow,
    Yesterday,
    /// Two or more days in the future
    InDays(u64),
    /// Two or more days in the past
    DaysAgo(u64),
}

impl RelativeDay {
    pub fn from_day_offset(days: i64) -> Self {
        match days {
            0 => RelativeDay::Today,
            1 => RelativeDay::Tomorrow,
            -1 => RelativeDay::Yesterday,
            d if d > 1 => RelativeDay::InDays(d.unsigned_abs()),
            d => RelativeDay::DaysAgo(d.unsigned_abs()),
        }
    }

    pub fn is_upcoming(&self) -> bool {
        matches!(
            self,
            RelativeDay::Today | RelativeDay::Tomorrow | RelativeDay::InDays(_)
        )
    }
}

impl fmt::Display for RelativeDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeDay::Today => write!(f, "Today"),
            RelativeDay::Tomorrow => write!(f, "Tomorrow"),
            RelativeDay::Yesterday => write!(f, "Yesterday"),
            RelativeDay::InDays(n) => write!(f, "In {} days", n),
            RelativeDay::DaysAgo(n) => write!(f, "{} days ago", n),
        }
    }
}

/// Whether a formatted date carries its year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearDisplay {
    #[default]
    Always,
    Never,
    /// Only when the year differs from the current one
    OtherYears,
}

impl YearDisplay {
    pub fn include_year(&self, year: i32, current_year: i32) -> bool {
        match self {
            YearDisplay::Always => true,
            YearDisplay::Never => false,
            YearDisplay::OtherYears => year != current_year,
        }
    }
}
