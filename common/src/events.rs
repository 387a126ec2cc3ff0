use chrono::{Datelike, NaiveDate};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::warn;

use crate::date::{format_date, parse_event_date, relative_day};
use crate::domain::YearDisplay;

/// An event record as stored in the content file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,

    /// ISO date, `YYYY-MM-DD`
    pub date: String,

    /// Free-form time of day, e.g. "9:00 AM - 3:00 PM"
    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventCatalog {
    pub events: Vec<Event>,
}

// Content files are either a bare array or wrapped in an object
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Event>),
    Wrapped { events: Vec<Event> },
}

impl From<CatalogFile> for EventCatalog {
    fn from(file: CatalogFile) -> Self {
        match file {
            CatalogFile::List(events) | CatalogFile::Wrapped { events } => Self { events },
        }
    }
}

impl EventCatalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .wrap_err_with(|| format!("Failed to open events file {}", path.display()))?;
        serde_json::from_reader::<_, CatalogFile>(file)
            .map(Self::from)
            .wrap_err_with(|| format!("Failed to parse events file {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<CatalogFile>(json)
            .map(Self::from)
            .wrap_err("Failed to parse events")
    }

    /// Split events into upcoming (soonest first) and past (most recent
    /// first). Events with an unparseable date are left out.
    pub fn listings(&self, today: NaiveDate, year_display: YearDisplay) -> Listings {
        let mut dated = self
            .events
            .iter()
            .filter_map(|event| match parse_event_date(&event.date) {
                Ok(date) => Some((date, event)),
                Err(error) => {
                    warn!("Skipping event {:?}: {}", event.title, error);
                    None
                }
            })
            .collect::<Vec<_>>();

        // Stable sort keeps file order for events on the same day
        dated.sort_by_key(|(date, _)| *date);

        let (upcoming, mut past): (Vec<_>, Vec<_>) = dated
            .into_iter()
            .map(|(date, event)| EventListing::new(event, date, today, year_display))
            .partition(|listing| listing.upcoming);
        past.sort_by(|a, b| b.date.cmp(&a.date));

        Listings { upcoming, past }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listings {
    pub upcoming: Vec<EventListing>,
    pub past: Vec<EventListing>,
}

/// An event prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventListing {
    pub title: String,
    pub date: NaiveDate,
    pub date_label: String,
    pub relative_label: String,
    pub upcoming: bool,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl EventListing {
    fn new(event: &Event, date: NaiveDate, today: NaiveDate, year_display: YearDisplay) -> Self {
        let relative = relative_day(date, today);
        Self {
            title: event.title.clone(),
            date,
            date_label: format_date(date, year_display.include_year(date.year(), today.year())),
            relative_label: relative.to_string(),
            upcoming: relative.is_upcoming(),
            time: event.time.clone(),
            location: event.location.clone(),
            description: event.description.clone(),
            category: event.category.clone(),
        }
    }
}
