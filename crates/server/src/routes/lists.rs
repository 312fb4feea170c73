//! Shopping-list and product route handlers.
//!
//! Product create/update accept either a JSON body or multipart form
//! data; multipart is what carries the optional `image` field. Both
//! shapes funnel into the same [`ProductInput`] before validation.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use shoplist_core::{ListId, ProductId};

use crate::error::{AppError, Result, ValidationError};
use crate::middleware::RequireAuth;
use crate::models::ShoppingList;
use crate::services::lists::{ListService, ProductInput};
use crate::state::AppState;
use crate::storage::ImageUpload;

/// Create-list request body.
#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Response for collection reads.
#[derive(Debug, Serialize)]
struct ListsResponse {
    success: bool,
    count: usize,
    data: Vec<ShoppingList>,
}

/// Response carrying a single list.
#[derive(Debug, Serialize)]
struct ListResponse {
    success: bool,
    data: ShoppingList,
}

/// Response for a deleted list.
#[derive(Debug, Serialize)]
struct ListDeletedResponse {
    success: bool,
    message: &'static str,
}

/// Response for a deleted product: message plus the remaining list.
#[derive(Debug, Serialize)]
struct ProductDeletedResponse {
    success: bool,
    message: &'static str,
    data: ShoppingList,
}

/// `GET /api/shopping-lists`
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> impl IntoResponse {
    let service = ListService::new(state.store(), state.images());
    let data = service.all_for_owner(user.id).await;

    Json(ListsResponse {
        success: true,
        count: data.len(),
        data,
    })
}

/// `GET /api/shopping-lists/{id}`
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ListId>,
) -> Result<impl IntoResponse> {
    let service = ListService::new(state.store(), state.images());
    let data = service.find(user.id, id).await?;

    Ok(Json(ListResponse {
        success: true,
        data,
    }))
}

/// `POST /api/shopping-lists`
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateListRequest>,
) -> Result<impl IntoResponse> {
    let service = ListService::new(state.store(), state.images());
    let data = service
        .create(user.id, body.name.as_deref().unwrap_or(""))
        .await?;

    tracing::info!(user_id = %user.id, list_id = %data.id, "shopping list created");

    Ok((
        StatusCode::CREATED,
        Json(ListResponse {
            success: true,
            data,
        }),
    ))
}

/// `DELETE /api/shopping-lists/{id}`
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ListId>,
) -> Result<impl IntoResponse> {
    let service = ListService::new(state.store(), state.images());
    service.delete(user.id, id).await?;

    Ok(Json(ListDeletedResponse {
        success: true,
        message: "Shopping list deleted",
    }))
}

/// `POST /api/shopping-lists/{id}/products`
pub async fn add_product(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ListId>,
    ProductPayload(input): ProductPayload,
) -> Result<impl IntoResponse> {
    let service = ListService::new(state.store(), state.images());
    let data = service.add_product(user.id, id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ListResponse {
            success: true,
            data,
        }),
    ))
}

/// `PUT /api/shopping-lists/{id}/products/{product_id}`
pub async fn update_product(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((id, product_id)): Path<(ListId, ProductId)>,
    ProductPayload(input): ProductPayload,
) -> Result<impl IntoResponse> {
    let service = ListService::new(state.store(), state.images());
    let data = service.update_product(user.id, id, product_id, input).await?;

    Ok(Json(ListResponse {
        success: true,
        data,
    }))
}

/// `DELETE /api/shopping-lists/{id}/products/{product_id}`
pub async fn remove_product(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((id, product_id)): Path<(ListId, ProductId)>,
) -> Result<impl IntoResponse> {
    let service = ListService::new(state.store(), state.images());
    let data = service.remove_product(user.id, id, product_id).await?;

    Ok(Json(ProductDeletedResponse {
        success: true,
        message: "Product deleted",
        data,
    }))
}

/// JSON shape of a product create/update body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProductBody {
    name: Option<String>,
    quantity: Option<i64>,
    is_checked: Option<bool>,
}

/// Extractor that reads product fields from JSON or multipart form data.
///
/// A request with neither content type yields an empty input; validation
/// downstream decides whether that is acceptable.
pub struct ProductPayload(pub ProductInput);

impl FromRequest<AppState> for ProductPayload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|err| AppError::BadRequest(err.to_string()))?;
            return from_multipart(multipart).await.map(Self);
        }

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<ProductBody>::from_request(req, state)
                .await
                .map_err(|err| AppError::BadRequest(err.to_string()))?;
            return Ok(Self(ProductInput {
                name: body.name,
                quantity: body.quantity,
                is_checked: body.is_checked,
                image: None,
            }));
        }

        Ok(Self(ProductInput::default()))
    }
}

/// Collect product fields out of a multipart body.
async fn from_multipart(mut multipart: Multipart) -> Result<ProductInput> {
    let mut input = ProductInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("name") => {
                input.name = Some(read_text(field).await?);
            }
            Some("quantity") => {
                let raw = read_text(field).await?;
                input.quantity = Some(raw.trim().parse().map_err(|_| {
                    field_error("quantity", "Quantity must be a positive integer")
                })?);
            }
            Some("isChecked") => {
                let raw = read_text(field).await?;
                input.is_checked = Some(match raw.trim() {
                    "true" => true,
                    "false" => false,
                    _ => return Err(field_error("isChecked", "isChecked must be a boolean")),
                });
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::BadRequest(err.to_string()))?
                    .to_vec();
                input.image = Some(ImageUpload { file_name, bytes });
            }
            // Unknown fields are ignored, like unknown JSON keys.
            _ => {}
        }
    }

    Ok(input)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

fn field_error(field: &'static str, message: &str) -> AppError {
    let mut errors = ValidationError::new();
    errors.push(field, message);
    AppError::Validation(errors)
}
