use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, put},
    Router,
};

use crate::error::AppError;
use crate::models::{ApiRequest, ApiResponse, ResponseBuilder};
use crate::service::CarService;

/// `PUT` and `DELETE` on the collection path reach the service without an id
/// and are answered with its missing-path-parameter response.
pub fn router() -> Router<CarService> {
    Router::new()
        .route(
            "/",
            get(list_cars)
                .post(create_car)
                .put(update_car_without_id)
                .delete(delete_car_without_id)
                .options(preflight),
        )
        .route(
            "/:id",
            put(update_car).delete(delete_car).options(preflight),
        )
}

/// Raw bodies are decoded here so a non-UTF-8 payload still gets the JSON
/// error contract instead of axum's plain-text rejection.
fn with_body(request: ApiRequest, body: Bytes) -> Result<ApiRequest, ApiResponse> {
    String::from_utf8(body.to_vec())
        .map(|body| request.with_body(body))
        .map_err(|e| AppError::from(e).into_api_response())
}

async fn create_car(State(service): State<CarService>, body: Bytes) -> ApiResponse {
    match with_body(ApiRequest::new(), body) {
        Ok(request) => service.create_car(&request).await,
        Err(response) => response,
    }
}

async fn list_cars(State(service): State<CarService>) -> ApiResponse {
    service.list_cars(&ApiRequest::new()).await
}

async fn update_car(
    State(service): State<CarService>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResponse {
    match with_body(ApiRequest::new().with_id(id), body) {
        Ok(request) => service.update_car(&request).await,
        Err(response) => response,
    }
}

async fn update_car_without_id(State(service): State<CarService>, body: Bytes) -> ApiResponse {
    match with_body(ApiRequest::new(), body) {
        Ok(request) => service.update_car(&request).await,
        Err(response) => response,
    }
}

async fn delete_car(State(service): State<CarService>, Path(id): Path<String>) -> ApiResponse {
    service.delete_car(&ApiRequest::new().with_id(id)).await
}

async fn delete_car_without_id(State(service): State<CarService>) -> ApiResponse {
    service.delete_car(&ApiRequest::new()).await
}

async fn preflight() -> ApiResponse {
    ResponseBuilder::ok().body(serde_json::Value::String(String::new()))
}
