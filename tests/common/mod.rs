#![allow(dead_code)]

use actix_web::{web, App};
use serde_json::json;

use travel_planner_api::models::itinerary::ItineraryRequest;
use travel_planner_api::routes;

/// App exposing the generation endpoint. The endpoint does not touch the
/// document store, so no MongoDB client is required here.
pub fn itinerary_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().route(
        "/itinerary/generate",
        web::post().to(routes::itinerary::generate),
    )
}

/// Make sure the pipeline cannot reach a real generation service, so the
/// deterministic fallback path is exercised.
pub fn clear_generation_env() {
    std::env::remove_var("OPENAI_API_KEY");
}

pub fn paris_request_body() -> serde_json::Value {
    json!({
        "destination": "Paris",
        "budget": 1000,
        "currency": "USD",
        "travelers": 2,
        "start_date": "2024-06-01",
        "end_date": "2024-06-02",
        "preferences": []
    })
}

pub fn paris_request() -> ItineraryRequest {
    ItineraryRequest {
        destination: Some("Paris".to_string()),
        budget: Some(1000.0),
        currency: Some("USD".to_string()),
        travelers: Some(2),
        start_date: Some("2024-06-01".to_string()),
        end_date: Some("2024-06-02".to_string()),
        preferences: Vec::new(),
    }
}
