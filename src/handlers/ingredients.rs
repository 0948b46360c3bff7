use std::sync::Arc;

use axum::extract::{Query, State};

use super::{json, limit, ApiResp, Ctx, Result};

/// Autocomplete query params.
#[derive(Debug, serde::Deserialize, Default)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, serde::Deserialize, Default)]
pub struct PopularQuery {
    pub limit: Option<usize>,
}

/// Suggest ingredient names for a partial query, most popular first.
/// Short or empty queries yield an empty list.
pub async fn autocomplete(
    State(ctx): State<Arc<Ctx>>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<ApiResp<Vec<String>>> {
    let num = limit(query.limit, ctx.consts.max_suggestions);
    Ok(json(ctx.mgr.autocomplete(&query.q, num)))
}

/// Most frequent ingredients in the corpus.
pub async fn popular(
    State(ctx): State<Arc<Ctx>>,
    Query(query): Query<PopularQuery>,
) -> Result<ApiResp<Vec<String>>> {
    let num = limit(query.limit, ctx.consts.num_popular);
    Ok(json(ctx.mgr.popular(num)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{testutil, Consts};

    async fn suggest(ctx: &Arc<Ctx>, q: &str, limit: Option<usize>) -> Vec<String> {
        let query = AutocompleteQuery {
            q: q.to_string(),
            limit,
        };
        autocomplete(State(ctx.clone()), Query(query))
            .await
            .unwrap()
            .data
            .unwrap()
    }

    #[tokio::test]
    async fn test_autocomplete() {
        let ctx = testutil::ctx(Consts::default());

        assert_eq!(suggest(&ctx, "gar", None).await, vec!["garlic"]);
        assert_eq!(suggest(&ctx, "  BUT ", None).await, vec!["butter"]);
        assert_eq!(
            suggest(&ctx, "olive oil", None).await,
            vec!["olive oil"]
        );
        assert_eq!(
            suggest(&ctx, "virgin oil", None).await,
            vec!["extra virgin olive oil"]
        );
        assert!(suggest(&ctx, "g", None).await.is_empty());
        assert!(suggest(&ctx, "", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_autocomplete_limit() {
        let ctx = testutil::ctx(Consts {
            max_suggestions: 2,
            ..Default::default()
        });

        // "oil" is only a token: olive oil, extra virgin olive oil.
        assert_eq!(suggest(&ctx, "oil", Some(1)).await.len(), 1);
        assert_eq!(suggest(&ctx, "oil", Some(100)).await.len(), 2);
        assert!(suggest(&ctx, "oil", Some(0)).await.is_empty());
    }

    #[tokio::test]
    async fn test_popular() {
        let ctx = testutil::ctx(Consts::default());

        let out = popular(State(ctx.clone()), Query(PopularQuery { limit: Some(2) }))
            .await
            .unwrap()
            .data
            .unwrap();
        // chicken and butter tie; chicken was seen first.
        assert_eq!(out, vec!["garlic", "chicken"]);

        let out = popular(State(ctx.clone()), Query(PopularQuery::default()))
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(out.len(), 10);

        let out = popular(State(ctx), Query(PopularQuery { limit: Some(0) }))
            .await
            .unwrap()
            .data
            .unwrap();
        assert!(out.is_empty());
    }
}
