use std::sync::Arc;

use cars_api_rust::{
    models::ApiRequest,
    repository::{CarStore, MemoryCarStore},
    service::CarService,
};
use serde_json::json;
use tracing_test::traced_test;

fn service() -> CarService {
    let store: Arc<dyn CarStore> = Arc::new(MemoryCarStore::new());
    CarService::new(store)
}

#[tokio::test]
#[traced_test]
async fn test_create_car_should_log_created_id() {
    let service = service();

    let response = service
        .create_car(&ApiRequest::new().with_json(
            &json!({"nombre": "Civic", "tipo": "sedan", "potencia": 158, "capacidad": 5}),
        ))
        .await;

    assert_eq!(response.status_code, 200);
    let id = response.body["car"]["id"].as_str().unwrap();
    assert!(logs_contain(&format!("[cars-api-rust] Created car {}", id)));
}

#[tokio::test]
#[traced_test]
async fn test_missing_fields_should_log_warning() {
    let service = service();

    let response = service
        .update_car(
            &ApiRequest::new()
                .with_id("car-1")
                .with_json(&json!({"nombre": "Civic"})),
        )
        .await;

    assert_eq!(response.status_code, 400);
    assert!(logs_contain("Missing required fields: tipo, potencia, capacidad"));
}

#[tokio::test]
#[traced_test]
async fn test_list_cars_should_log_count() {
    let service = service();
    let car = json!({"nombre": "Civic", "tipo": "sedan", "potencia": 158, "capacidad": 5});
    for _ in 0..3 {
        service.create_car(&ApiRequest::new().with_json(&car)).await;
    }

    let response = service.list_cars(&ApiRequest::new()).await;

    assert_eq!(response.status_code, 200);
    assert!(logs_contain("[cars-api-rust] Listed 3 cars"));
}

#[tokio::test]
#[traced_test]
async fn test_invalid_json_should_log_warning() {
    let service = service();

    let response = service
        .create_car(&ApiRequest::new().with_body("{not json"))
        .await;

    assert_eq!(response.status_code, 400);
    assert!(logs_contain("[cars-api-rust] Invalid JSON body"));
}
