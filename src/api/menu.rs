//! Menu API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{load_menu, ApiResult};
use crate::models::{MenuData, MobileMenu};
use crate::AppState;

/// GET /api/menu/{clientSlug} - Full menu snapshot.
pub async fn get_menu(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<MenuData> {
    let menu = load_menu(&state, &slug).await?;
    Ok(Json(menu))
}

/// GET /api/m/{clientSlug} - Menu shaped for mobile ordering.
pub async fn get_mobile_menu(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<MobileMenu> {
    let menu = load_menu(&state, &slug).await?;
    Ok(Json(MobileMenu::from(&menu)))
}
