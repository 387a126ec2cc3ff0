use askama::Template;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum_extra::extract::Query;
use common::config::Config;
use common::date::format_date;
use common::events::EventListing;
use std::sync::Arc;
use tracing::error;

use crate::routes::{load_listings, EventsQuery};

#[derive(Template)]
#[template(path = "pages/events.html")]
struct EventsTemplate {
    today: String,
    upcoming: Vec<EventListing>,
    show_past: bool,
    past: Vec<EventListing>,
}

pub async fn events_route(
    Extension(config): Extension<Arc<Config>>,
    query: Query<EventsQuery>,
) -> Response {
    let today = query.today(&config);
    let listings = match load_listings(&config, today) {
        Ok(listings) => listings,
        Err(error) => {
            error!("Unable to load events: {:?}", error);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unable to load events: {}", error),
            )
                .into_response();
        }
    };

    EventsTemplate {
        today: format_date(today, true),
        upcoming: listings.upcoming,
        show_past: query.past,
        past: listings.past,
    }
    .into_response()
}
