//! Display API endpoints.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};

use super::{load_menu, ApiResult};
use crate::display::{Carousel, DisplaySnapshot, PageEvent, SpecialEvent};
use crate::errors::AppError;
use crate::AppState;

/// GET /api/display/{clientSlug} - Paginated board for a TV screen.
pub async fn get_display(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<DisplaySnapshot> {
    let menu = load_menu(&state, &slug).await?;
    Ok(Json(DisplaySnapshot::from_menu(&menu)))
}

/// GET /api/display/{clientSlug}/stream - Server-sent `page` and `special` events as the
/// board and its specials slider rotate.
///
/// Both carousels are owned by the response stream, so their timers stop when the screen
/// disconnects.
pub async fn stream_display(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let menu = load_menu(&state, &slug).await?;
    let snapshot = DisplaySnapshot::from_menu(&menu);
    let specials = snapshot.slider_specials().to_vec();
    let pages = snapshot.pages;

    tracing::debug!(
        "Display stream opened for {} with {} page(s) and {} special(s)",
        slug,
        pages.len(),
        specials.len()
    );

    let carousel = Carousel::start(pages.len(), Duration::from_millis(snapshot.rotate_ms));
    let page_events = WatchStream::new(carousel.subscribe()).map(move |index| {
        let _carousel = &carousel;
        Event::default()
            .event("page")
            .json_data(PageEvent::at(&pages, index))
    });

    let slider = Carousel::start_slider(
        specials.len(),
        Duration::from_millis(snapshot.specials_rotate_ms),
    );
    let special_events = WatchStream::new(slider.subscribe()).filter_map(move |index| {
        let _slider = &slider;
        SpecialEvent::at(&specials, index)
            .map(|event| Event::default().event("special").json_data(event))
    });

    Ok(Sse::new(page_events.merge(special_events)).keep_alive(KeepAlive::default()))
}
