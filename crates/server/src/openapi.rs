use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginResponse { pub token: String }

/// Money values are decimal strings such as `"150.00"`; plain numbers are accepted too.
#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItemDoc { pub description: String, pub price: String }

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceOrderDoc {
    pub client_name: String,
    pub description: Option<String>,
    pub employee_id: Option<i32>,
    pub items: Vec<ServiceItemDoc>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest { pub value: String, pub payment_type_id: i32 }

#[derive(ToSchema)]
pub struct AddItemsRequest { pub items: Vec<ServiceItemDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::services::create,
        crate::routes::services::list,
        crate::routes::services::get_by_id,
        crate::routes::services::pay,
        crate::routes::services::add_items,
        crate::routes::services::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponse,
            ServiceItemDoc,
            CreateServiceOrderDoc,
            PayRequest,
            AddItemsRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "services")
    )
)]
pub struct ApiDoc;
