use chrono::NaiveDate;
use eyre::{bail, Result, WrapErr};
use pico_args::Arguments;
use std::path::{Path, PathBuf};
use tracing::debug;

use common::config::Config;
use common::date::{
    format_event_date, get_relative_event_time_on, is_upcoming_event_on, parse_event_date,
};
use common::events::{EventCatalog, EventListing};

const DEFAULT_CONFIG: &str = "config.json";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "club_events=info,common=warn".into()),
        )
        .init();

    let mut args = Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        let bin = PathBuf::from(std::env::args_os().next().unwrap_or_default());
        let bin = bin.file_name().unwrap_or_default().to_string_lossy();
        println!("{}", usage(&bin));
        return Ok(());
    }

    let config_path: PathBuf = args
        .opt_value_from_str("--config")?
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = Config::load_or_default(&config_path)?;

    print!("{}", run(args, &config)?);
    Ok(())
}

/// Dispatch a command and return what it prints.
fn run(mut args: Arguments, config: &Config) -> Result<String> {
    let today = args
        .opt_value_from_fn("--today", parse_event_date)?
        .unwrap_or_else(|| config.today());
    debug!("Using {} as today", today);

    let output = match args.subcommand()?.as_deref() {
        Some("format") => {
            let include_year = !args.contains("--no-year");
            let date: String = args.free_from_str()?;
            finish(args)?;
            format_event_date(&date, include_year)? + "\n"
        }
        Some("relative") => {
            let date: String = args.free_from_str()?;
            finish(args)?;
            get_relative_event_time_on(&date, today)? + "\n"
        }
        Some("upcoming") => {
            let date: String = args.free_from_str()?;
            finish(args)?;
            format!("{}\n", is_upcoming_event_on(&date, today)?)
        }
        Some("list") | None => {
            let show_past = args.contains("--past");
            let file: PathBuf = args
                .opt_value_from_str("--file")?
                .unwrap_or_else(|| config.events_file.clone());
            finish(args)?;
            list(&file, today, config, show_past)?
        }
        Some(other) => bail!("Unknown command '{}'\n\n{}", other, usage("club-events")),
    };
    Ok(output)
}

fn usage(bin: &str) -> String {
    format!(
        "Usage: {bin} [--config FILE] [--today YYYY-MM-DD] <command>\n\
         \n\
         Commands:\n  \
           format <DATE> [--no-year]    Format a date for display\n  \
           relative <DATE>              Describe a date relative to today\n  \
           upcoming <DATE>              Whether the date is today or later\n  \
           list [--past] [--file FILE]  List events from the events file"
    )
}

fn finish(args: Arguments) -> Result<()> {
    let rest = args.finish();
    if !rest.is_empty() {
        bail!("Unexpected arguments: {:?}", rest);
    }
    Ok(())
}

fn list(file: &Path, today: NaiveDate, config: &Config, show_past: bool) -> Result<String> {
    let catalog = EventCatalog::load(file).wrap_err("Unable to list events")?;
    let listings = catalog.listings(today, config.year_display);

    let mut output = String::from("Upcoming events\n");
    push_section(&mut output, &listings.upcoming);
    if show_past {
        output.push_str("\nPast events\n");
        push_section(&mut output, &listings.past);
    }
    Ok(output)
}

fn push_section(output: &mut String, listings: &[EventListing]) {
    if listings.is_empty() {
        output.push_str("  (none)\n");
    }
    for listing in listings {
        output.push_str(&render_listing(listing));
        output.push('\n');
    }
}

fn render_listing(listing: &EventListing) -> String {
    let mut line = format!(
        "  {} ({}): {}",
        listing.date_label, listing.relative_label, listing.title
    );
    if let Some(time) = &listing.time {
        line.push_str(&format!(", {}", time));
    }
    if let Some(location) = &listing.location {
        line.push_str(&format!(" @ {}", location));
    }
    line
}
