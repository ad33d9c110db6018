use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use serde_json::json;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

use crate::state::AppState;

/// Live state of the refresh task, one event per poll.
pub async fn refresh_task_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, std::convert::Infallible>>> {
    let rx = state.page.live_tasks().subscribe();

    // Lagged receivers just skip ahead to the next snapshot
    let stream = BroadcastStream::new(rx).filter_map(|res| res.ok()).map(|ev| {
        let data = serde_json::to_string(&ev)
            .unwrap_or_else(|_| json!({"type":"missing"}).to_string());
        Ok::<Event, std::convert::Infallible>(Event::default().data(data))
    });

    let stream = futures::StreamExt::take_until(stream, state.shutdown.clone().cancelled_owned());

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(10)).text("keep-alive"))
}
