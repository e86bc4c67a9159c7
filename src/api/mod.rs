//! REST API module.
//!
//! Contains the menu, display and checkout routes.

mod checkout;
mod display;
mod menu;

pub use checkout::*;
pub use display::*;
pub use menu::*;

use axum::Json;

use crate::errors::AppError;
use crate::models::MenuData;
use crate::AppState;

/// Response type for JSON handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Load a client's menu or fail with 404.
async fn load_menu(state: &AppState, slug: &str) -> Result<MenuData, AppError> {
    state
        .repo
        .get_menu_by_slug(slug)
        .await
        .ok_or_else(|| AppError::NotFound(crate::checkout::CLIENT_NOT_FOUND.to_string()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::db::Repository;
    use crate::{create_router, AppState};

    fn router_without_schema() -> axum::Router {
        // Nothing has been migrated, so every store query fails.
        let pool = SqlitePoolOptions::new()
            .connect_lazy("sqlite::memory:")
            .unwrap();
        let config = Config {
            db_path: ":memory:".into(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            payment_api_base: "http://127.0.0.1:1".to_string(),
            payment_secret_key: None,
            checkout_success_url: None,
            checkout_cancel_url: None,
            currency: "usd".to_string(),
        };
        create_router(AppState::new(Repository::new(pool), config))
    }

    #[tokio::test]
    async fn test_unreadable_store_reports_not_found() {
        let response = router_without_schema()
            .oneshot(
                Request::get("/api/menu/any-shop")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_checkout_requires_post() {
        let response = router_without_schema()
            .oneshot(
                Request::get("/api/checkout/any-shop")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
