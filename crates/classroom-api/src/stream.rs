use std::convert::Infallible;

use async_stream::stream;
use axum::{
    extract::State,
    http::{HeaderValue, header},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use tracing::debug;

use crate::state::AppState;

/// GET /events: server-sent event stream of every hub broadcast.
///
/// The subscription is registered before the response is returned, so a
/// mutation made after this handler completes is always delivered (queue
/// space permitting). When the client goes away hyper drops the body stream,
/// and with it the subscription, which unregisters from the hub.
pub async fn events(State(state): State<AppState>) -> Response {
    let mut subscription = state.hub.subscribe();
    let subscriber_id = subscription.id();
    debug!("Opening event stream for subscriber {}", subscriber_id);

    let stream = stream! {
        while let Some(json) = subscription.recv().await {
            yield Ok::<_, Infallible>(Event::default().data(&*json));
        }
        debug!("Hub closed event stream for subscriber {}", subscriber_id);
    };

    let headers = [(header::CONNECTION, HeaderValue::from_static("keep-alive"))];

    match state.keep_alive {
        Some(interval) => (
            headers,
            Sse::new(stream).keep_alive(KeepAlive::new().interval(interval)),
        )
            .into_response(),
        None => (headers, Sse::new(stream)).into_response(),
    }
}
