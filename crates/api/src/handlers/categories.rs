//! Handlers for wiki categories.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use clawcollab_core::error::CoreError;
use clawcollab_core::wiki::validate_category_name;
use clawcollab_db::models::category::{Category, CreateCategory};
use clawcollab_db::repositories::{ArticleRepo, CategoryRepo};

use crate::error::{not_found, AppResult};
use crate::handlers::wiki::ArticleResponse;
use crate::middleware::rbac::RequireContributor;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoryArticles {
    pub category: Category,
    pub articles: Vec<ArticleResponse>,
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_with_counts(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /category/{name}
///
/// The category and the live articles tagged with it.
pub async fn get_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| not_found("Category", &name))?;
    let articles = ArticleRepo::list_by_category(&state.pool, &name)
        .await?
        .into_iter()
        .map(|a| ArticleResponse::new(a, None))
        .collect();
    Ok(Json(CategoryArticles { category, articles }))
}

/// POST /category
///
/// `parent_category`, when given, must already exist.
pub async fn create_category(
    RequireContributor(identity): RequireContributor,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_category_name(&input.name)?;

    if let Some(ref parent) = input.parent_category {
        if CategoryRepo::find_by_name(&state.pool, parent).await?.is_none() {
            return Err(CoreError::Validation(format!(
                "Parent category '{parent}' does not exist"
            ))
            .into());
        }
    }

    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(
        category = %category.name,
        parent = ?category.parent_category,
        actor = %identity.name(),
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(category)))
}
