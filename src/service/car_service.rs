use std::sync::Arc;

use anyhow::Context;
use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::constants::{API_NAME, KEY_ATTRIBUTE, MSG_CREATED, MSG_DELETED, MSG_EMPTY_COLLECTION, MSG_UPDATED};
use crate::error::AppError;
use crate::models::{normalize_item, ApiRequest, ApiResponse, CarRecord, ResponseBuilder};
use crate::repository::{CarStore, StoreError};
use crate::validation::{decode_fields, missing_fields, parse_body};

/// The four car handlers. Each call turns one request into one response and
/// makes at most one store call; every failure is mapped to a response.
#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn CarStore>,
}

impl CarService {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }

    pub async fn create_car(&self, request: &ApiRequest) -> ApiResponse {
        self.try_create_car(request)
            .await
            .unwrap_or_else(AppError::into_api_response)
    }

    pub async fn list_cars(&self, _request: &ApiRequest) -> ApiResponse {
        self.try_list_cars()
            .await
            .unwrap_or_else(AppError::into_api_response)
    }

    pub async fn update_car(&self, request: &ApiRequest) -> ApiResponse {
        self.try_update_car(request)
            .await
            .unwrap_or_else(AppError::into_api_response)
    }

    pub async fn delete_car(&self, request: &ApiRequest) -> ApiResponse {
        self.try_delete_car(request)
            .await
            .unwrap_or_else(AppError::into_api_response)
    }

    async fn try_create_car(&self, request: &ApiRequest) -> Result<ApiResponse, AppError> {
        let body = parse_body(request)?;
        if let Some(first) = missing_fields(&body).first() {
            return Err(AppError::MissingFields(first.to_string()));
        }
        let fields = decode_fields(body)?;

        let record = CarRecord::new(fields);
        self.store.put(record.to_item()).await?;

        tracing::info!("{} Created car {}", API_NAME, record.id);

        let car = serde_json::to_value(&record).context("Failed to serialize created car")?;
        Ok(ResponseBuilder::ok().body(json!({ "message": MSG_CREATED, "car": car })))
    }

    async fn try_list_cars(&self) -> Result<ApiResponse, AppError> {
        let items = self.store.scan().await?;

        if items.is_empty() {
            tracing::info!("{} Listed cars: collection is empty", API_NAME);
            return Ok(ResponseBuilder::new(StatusCode::NO_CONTENT).message(MSG_EMPTY_COLLECTION));
        }

        let cars = items
            .iter()
            .map(normalize_item)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;

        tracing::info!("{} Listed {} cars", API_NAME, cars.len());
        Ok(ResponseBuilder::ok().body(Value::Array(cars)))
    }

    /// Writes all four fields without checking that `id` exists, so an
    /// unknown id is created rather than rejected.
    async fn try_update_car(&self, request: &ApiRequest) -> Result<ApiResponse, AppError> {
        let id = request
            .path_id()
            .ok_or(AppError::MissingPathParameter(KEY_ATTRIBUTE))?;

        let body = parse_body(request)?;
        let missing = missing_fields(&body);
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing.join(", ")));
        }
        let fields = decode_fields(body)?;

        self.store.update(id, fields.to_attributes()).await?;

        tracing::info!("{} Updated car {}", API_NAME, id);
        Ok(ResponseBuilder::ok().message(MSG_UPDATED))
    }

    async fn try_delete_car(&self, request: &ApiRequest) -> Result<ApiResponse, AppError> {
        let id = request
            .path_id()
            .ok_or(AppError::MissingPathParameter(KEY_ATTRIBUTE))?;

        self.store.delete_existing(id).await?;

        tracing::info!("{} Deleted car {}", API_NAME, id);
        Ok(ResponseBuilder::ok().message(MSG_DELETED))
    }
}
