mod routes;

use axum::routing::get;
use axum::{Extension, Router};
use common::config::Config;
use eyre::{Result, WrapErr};
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::routes::events::events_route;
use crate::routes::feed::feed_route;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "club_web=debug,common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config = Config::load_or_default(&config_path)?;
    info!("Reading events from {}", config.events_file.display());

    let bind = std::env::var("BIND").unwrap_or_else(|_| config.bind.clone());
    let addr = SocketAddr::from_str(&bind)
        .wrap_err_with(|| format!("Invalid bind address {}", bind))?;

    let assets_path = std::env::current_dir()?.join("assets");
    let app = app(config, &assets_path);
    let listener = TcpListener::bind(&addr).await?;

    info!("Starting server on {}", addr);
    axum::serve(listener, app.into_make_service())
        .await
        .wrap_err("Error starting server")?;

    Ok(())
}

fn app(config: Config, assets_path: &Path) -> Router {
    Router::new()
        .route("/", get(events_route))
        .route("/events.json", get(feed_route))
        .nest_service("/assets", ServeDir::new(assets_path).precompressed_gzip())
        .layer(Extension(Arc::new(config)))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tower::ServiceExt;

    const EVENTS: &str = r#"{ "events": [
        { "title": "Summer Trap League", "date": "2023-06-20", "location": "Trap Field 2" },
        { "title": "Range Safety Officer Course", "date": "2023-06-15", "time": "9:00 AM" },
        { "title": "Spring Sporting Clays", "date": "2023-06-10" },
        { "title": "Fish & Game <Dinner>", "date": "2023-07-04", "category": "Social" }
    ] }"#;

    fn events_file(name: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("club-web-{}-{}.json", name, std::process::id()));
        write!(File::create(&path).unwrap(), "{}", EVENTS).unwrap();
        path
    }

    fn test_app(events_file: PathBuf) -> Router {
        let config = Config {
            events_file,
            today: NaiveDate::from_ymd_opt(2023, 6, 15),
            ..Config::default()
        };
        app(config, Path::new("assets"))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_events_page() {
        let path = events_file("page");
        let (status, body) = get_body(test_app(path.clone()), "/").await;
        std::fs::remove_file(path).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("June 15, 2023"));
        assert!(body.contains("Today"));
        assert!(body.contains("In 5 days"));
        assert!(body.contains("Trap Field 2"));
        assert!(body.contains("Fish &amp; Game &lt;Dinner&gt;"));
        assert!(!body.contains("Spring Sporting Clays"));
    }

    #[tokio::test]
    async fn test_events_page_with_past_and_date() {
        let path = events_file("past");
        let (status, body) =
            get_body(test_app(path.clone()), "/?date=2023-06-19&past=true").await;
        std::fs::remove_file(path).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("June 19, 2023"));
        assert!(body.contains("Tomorrow"));
        assert!(body.contains("Past events"));
        assert!(body.contains("Spring Sporting Clays"));
        assert!(body.contains("9 days ago"));
    }

    #[tokio::test]
    async fn test_feed() {
        let path = events_file("feed");
        let (status, body) = get_body(test_app(path.clone()), "/events.json?past=true").await;
        std::fs::remove_file(path).unwrap();

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let upcoming = json["upcoming"].as_array().unwrap();
        assert_eq!(upcoming.len(), 3);
        assert_eq!(upcoming[0]["title"], "Range Safety Officer Course");
        assert_eq!(upcoming[0]["date"], "2023-06-15");
        assert_eq!(upcoming[0]["relative_label"], "Today");
        assert_eq!(json["past"][0]["relative_label"], "5 days ago");
    }

    #[tokio::test]
    async fn test_feed_without_past() {
        let path = events_file("nopast");
        let (_, body) = get_body(test_app(path.clone()), "/events.json").await;
        std::fs::remove_file(path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["past"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_date_query() {
        let path = events_file("baddate");
        let (status, _) = get_body(test_app(path.clone()), "/?date=not-a-date").await;
        std::fs::remove_file(path).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_events_file() {
        let app = test_app(PathBuf::from("/nonexistent/events.json"));
        let (status, body) = get_body(app.clone(), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("Unable to load events"));

        let (status, body) = get_body(app, "/events.json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("Unable to load events"));
    }
}
