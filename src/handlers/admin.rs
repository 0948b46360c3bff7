use std::sync::Arc;

use axum::extract::State;

use super::{json, ApiResp, Ctx, Result};
use crate::models::Stats;

/// Get library statistics.
pub async fn get_stats(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<Stats>> {
    Ok(json(ctx.mgr.stats()))
}

/// Rebuild the library from the corpus file and swap it in. Queries keep
/// being served from the old library until the new one is ready.
pub async fn reload(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<Stats>> {
    let mgr = ctx.mgr.clone();
    let stats = tokio::task::spawn_blocking(move || mgr.reload()).await??;

    Ok(json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{testutil, Consts};

    #[tokio::test]
    async fn test_get_stats() {
        let ctx = testutil::ctx(Consts::default());
        let stats = get_stats(State(ctx)).await.unwrap().data.unwrap();
        assert_eq!(
            stats,
            Stats {
                recipes: 5,
                ingredients: 10,
                skipped_rows: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_reload_error() {
        // The test library has no backing file.
        let ctx = testutil::ctx(Consts::default());
        let err = reload(State(ctx.clone())).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ctx.mgr.stats().recipes, 5);
    }
}
