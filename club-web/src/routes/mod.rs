pub mod events;
pub mod feed;

use chrono::NaiveDate;
use common::config::Config;
use common::events::{EventCatalog, Listings};
use eyre::Result;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct EventsQuery {
    /// View the listing as if this were today
    date: Option<NaiveDate>,

    #[serde(default)]
    past: bool,
}

impl EventsQuery {
    fn today(&self, config: &Config) -> NaiveDate {
        self.date.unwrap_or_else(|| config.today())
    }
}

// Re-read on every request so content edits show up without a restart
fn load_listings(config: &Config, today: NaiveDate) -> Result<Listings> {
    let catalog = EventCatalog::load(&config.events_file)?;
    Ok(catalog.listings(today, config.year_display))
}
