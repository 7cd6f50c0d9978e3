/**
 * Category Handlers
 *
 * CRUD endpoints for the catalog category tree. Reads are public;
 * mutations sit behind the ADMIN role gate applied at route
 * registration.
 *
 * Categories form a tree through `parent_id`. Listing defaults to the
 * root level; `?parentId=<uuid>` lists a subtree's direct children and
 * `?nested=true` expands descendants recursively.
 */

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::MessageResponse;
use crate::error::ApiError;
use crate::store::{Category, CategoryStore, NewCategory, UpdateCategory};

/// Query parameters accepted by the read endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub nested: Option<bool>,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<Uuid>,
}

/// A category with optionally expanded children.
///
/// `children` is omitted from the JSON entirely unless the request
/// asked for a nested expansion.
#[derive(Debug, Serialize)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CategoryTree>>,
}

/// Response payload for category mutations.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub message: String,
    pub category: Category,
}

/// Recursively expand a category's descendants.
///
/// Boxed because async recursion needs an indirected future. `seen`
/// holds the ids already on the current path: parent links form a tree
/// in healthy data, but a cyclic link (a row parented to itself or to
/// one of its descendants) must not recurse the server to death, so a
/// child whose id is already on the path is skipped.
fn expand(
    store: Arc<dyn CategoryStore>,
    category: Category,
    mut seen: HashSet<Uuid>,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<CategoryTree, ApiError>> + Send>> {
    Box::pin(async move {
        seen.insert(category.id);

        let mut children = Vec::new();
        for child in store.list(Some(category.id)).await? {
            if seen.contains(&child.id) {
                tracing::warn!(
                    category_id = %category.id,
                    child_id = %child.id,
                    "Cyclic parent link in category data, skipping"
                );
                continue;
            }
            children.push(expand(store.clone(), child, seen.clone()).await?);
        }
        Ok(CategoryTree {
            category,
            children: Some(children),
        })
    })
}

/// GET /api/categories
pub async fn list_categories(
    State(store): State<Arc<dyn CategoryStore>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CategoryTree>>, ApiError> {
    let categories = store.list(query.parent_id).await?;

    let mut result = Vec::with_capacity(categories.len());
    if query.nested.unwrap_or(false) {
        for category in categories {
            result.push(expand(store.clone(), category, HashSet::new()).await?);
        }
    } else {
        result.extend(categories.into_iter().map(|category| CategoryTree {
            category,
            children: None,
        }));
    }

    Ok(Json(result))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(store): State<Arc<dyn CategoryStore>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CategoryTree>, ApiError> {
    let category = store
        .by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    let tree = if query.nested.unwrap_or(false) {
        expand(store, category, HashSet::new()).await?
    } else {
        CategoryTree {
            category,
            children: None,
        }
    };

    Ok(Json(tree))
}

/// POST /api/categories (ADMIN)
pub async fn create_category(
    State(store): State<Arc<dyn CategoryStore>>,
    Json(payload): Json<NewCategory>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = store.create(payload).await?;

    tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse {
            message: "Category created successfully".to_string(),
            category,
        }),
    ))
}

/// PATCH /api/categories/{id} (ADMIN)
pub async fn update_category(
    State(store): State<Arc<dyn CategoryStore>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategory>,
) -> Result<Json<CategoryResponse>, ApiError> {
    if payload.parent_id == Some(id) {
        return Err(ApiError::validation("Category cannot be its own parent"));
    }

    let category = store
        .update(id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    tracing::info!(category_id = %category.id, "Category updated");

    Ok(Json(CategoryResponse {
        message: "Category updated successfully".to_string(),
        category,
    }))
}

/// DELETE /api/categories/{id} (ADMIN)
///
/// Idempotent: deleting an id that no longer exists still reports
/// success.
pub async fn delete_category(
    State(store): State<Arc<dyn CategoryStore>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    store.delete(id).await?;

    tracing::info!(category_id = %id, "Category deleted");

    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
