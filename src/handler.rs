use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tracing::{error, instrument};

use crate::cache::FeedCache;
use crate::espn::ScheduleSource;
use crate::league::League;

pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

/// One `/{code}.ics` route per league plus the `/` status line.
pub fn router<S>(cache: Arc<FeedCache<S>>) -> Router
where
    S: ScheduleSource + 'static,
{
    let mut app = Router::new().route("/", get(status));
    for league in League::ALL {
        app = app.route(
            &league.feed_path(),
            get(move |State(cache): State<Arc<FeedCache<S>>>| feed(cache, league)),
        );
    }
    app.with_state(cache)
}

pub fn status_line() -> String {
    let feeds: Vec<String> = League::ALL.iter().map(|l| l.feed_path()).collect();
    format!("Sports ICS server is running. Available feeds: {}\n", feeds.join(", "))
}

async fn status() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], status_line())
}

/// Serve a league's calendar. The cache may block on upstream, so it runs off the async workers.
#[instrument(skip(cache))]
pub async fn feed<S>(cache: Arc<FeedCache<S>>, league: League) -> Response
where
    S: ScheduleSource + 'static,
{
    match tokio::task::spawn_blocking(move || cache.get(league)).await {
        Ok(Ok(bytes)) => ([(header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE)], bytes).into_response(),
        Ok(Err(e)) => {
            error!(%league, error = %e, "Calendar unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{} calendar is unavailable\n", league),
            )
                .into_response()
        }
        Err(e) => {
            error!(%league, error = %e, "Calendar task join error");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
