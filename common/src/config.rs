use chrono::{Local, NaiveDate};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::date::LocalExt;
use crate::domain::YearDisplay;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the event records
    pub events_file: PathBuf,

    /// Address for the web server
    pub bind: String,

    /// When formatted dates include the year
    pub year_display: YearDisplay,

    /// Pin "today" to a fixed date instead of reading the clock
    pub today: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events_file: PathBuf::from("content/events.json"),
            bind: "127.0.0.1:8000".to_string(),
            year_display: YearDisplay::default(),
            today: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .wrap_err_with(|| format!("Failed to open {}", path.display()))?;
        serde_json::from_reader(file)
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))
    }

    /// Like `load`, but a missing file gives the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match File::open(path.as_ref()) {
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Self::default()),
            _ => Self::load(path),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(Local::current_date)
    }
}
