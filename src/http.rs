use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, ingredients, recipes, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    let mut router = Router::new()
        .route("/api/autocomplete", get(ingredients::autocomplete))
        .route("/api/ingredients/popular", get(ingredients::popular))
        .route(
            "/api/recipes-with-ingredients",
            post(recipes::match_recipes),
        )
        .route("/api/recipes/{id}", get(recipes::get_recipe))
        .route("/api/stats", get(admin::get_stats));

    if ctx.consts.enable_reload {
        router = router.route("/api/reload", post(admin::reload));
        log::info!("reload route enabled");
    }

    router.with_state(ctx)
}
