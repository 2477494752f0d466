use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
}

/// Names the service and points at its API documentation
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "Health"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "campus-backend",
        version: env!("CARGO_PKG_VERSION"),
        docs: "/swagger-ui",
    })
}
