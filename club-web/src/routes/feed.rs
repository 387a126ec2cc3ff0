use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use axum_extra::extract::Query;
use common::config::Config;
use std::sync::Arc;
use tracing::error;

use crate::routes::{load_listings, EventsQuery};

pub async fn feed_route(
    Extension(config): Extension<Arc<Config>>,
    query: Query<EventsQuery>,
) -> Response {
    let today = query.today(&config);
    match load_listings(&config, today) {
        Ok(mut listings) => {
            if !query.past {
                listings.past.clear();
            }
            Json(listings).into_response()
        }
        Err(error) => {
            error!("Unable to load events: {:?}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unable to load events: {}", error),
            )
                .into_response()
        }
    }
}
