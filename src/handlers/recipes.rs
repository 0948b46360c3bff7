use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{json, ApiErr, ApiResp, Ctx, Result};
use crate::{
    manager::Error,
    models::{RecipeDetail, RecipeSummary},
};

/// Ingredient match request.
#[derive(Debug, serde::Deserialize)]
pub struct MatchReq {
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Find recipes that use the most of the given ingredients.
pub async fn match_recipes(
    State(ctx): State<Arc<Ctx>>,
    Json(req): Json<MatchReq>,
) -> Result<ApiResp<Vec<RecipeSummary>>> {
    if req.ingredients.is_empty() {
        return Err(ApiErr::new(
            "at least one ingredient is required",
            StatusCode::BAD_REQUEST,
        ));
    }

    let out = ctx
        .mgr
        .match_recipes(&req.ingredients, ctx.consts.max_recipe_matches);
    Ok(json(out))
}

/// Get a recipe by its position in the corpus.
pub async fn get_recipe(
    State(ctx): State<Arc<Ctx>>,
    Path(id): Path<usize>,
) -> Result<ApiResp<RecipeDetail>> {
    let recipe = ctx.mgr.recipe_detail(id).map_err(|e| {
        if matches!(e, Error::NotFound) {
            ApiErr::new("recipe not found", StatusCode::NOT_FOUND)
        } else {
            ApiErr::new(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
        }
    })?;

    Ok(json(recipe))
}
