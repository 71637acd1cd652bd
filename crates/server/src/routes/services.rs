use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use service::orders::domain::{CreateServiceItem, CreateServiceOrder, ServiceOrder, ServiceOrderView};
use service::orders::outcome::success;

use crate::errors::{status_code, JsonApiError};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayInput {
    pub value: Decimal,
    pub payment_type_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct AddItemsInput {
    pub items: Vec<CreateServiceItem>,
}

#[utoipa::path(post, path = "/services", tag = "services", request_body = crate::openapi::CreateServiceOrderDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized"), (status = 403, description = "Forbidden")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateServiceOrder>,
) -> Result<(StatusCode, Json<ServiceOrder>), JsonApiError> {
    let order = state.orders.create(input).await?;
    Ok((status_code(success::CREATE), Json(order)))
}

#[utoipa::path(get, path = "/services", tag = "services", responses((status = 200, description = "OK")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ServiceOrder>>, JsonApiError> {
    Ok(Json(state.orders.get_all().await?))
}

#[utoipa::path(get, path = "/services/{id}", tag = "services", params(("id" = i32, Path, description = "Service order id")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<ServiceOrderView>, JsonApiError> {
    Ok(Json(state.orders.get_by_id(id).await?))
}

#[utoipa::path(patch, path = "/services/{id}/pay", tag = "services", params(("id" = i32, Path, description = "Service order id")), request_body = crate::openapi::PayRequest, responses((status = 200, description = "OK"), (status = 404, description = "Not Found"), (status = 409, description = "Already paid or value invalid")))]
pub async fn pay(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<PayInput>,
) -> Result<Json<ServiceOrderView>, JsonApiError> {
    Ok(Json(state.orders.pay(id, input.value, input.payment_type_id).await?))
}

#[utoipa::path(post, path = "/services/{id}/items", tag = "services", params(("id" = i32, Path, description = "Service order id")), request_body = crate::openapi::AddItemsRequest, responses((status = 200, description = "OK"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn add_items(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<AddItemsInput>,
) -> Result<Json<ServiceOrderView>, JsonApiError> {
    Ok(Json(state.orders.add_items(id, input.items).await?))
}

#[utoipa::path(delete, path = "/services/{id}", tag = "services", params(("id" = i32, Path, description = "Service order id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.orders.delete_service(id).await?;
    Ok(status_code(success::DELETE))
}
