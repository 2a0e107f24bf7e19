use actix_web::{web, HttpResponse, Responder};

use crate::models::itinerary::{ItineraryRequest, ItineraryResponse};
use crate::services::itinerary_service;

/*
    POST /api/itinerary/generate

    Service and parsing failures degrade to the fallback itinerary inside
    the service layer, so this only ever answers 200 or 400.
*/
pub async fn generate(input: web::Json<ItineraryRequest>) -> impl Responder {
    match itinerary_service::generate_itinerary(&input.into_inner()).await {
        Ok(items) => HttpResponse::Ok().json(ItineraryResponse { itinerary: items }),
        Err(err) => HttpResponse::BadRequest().body(err.message().to_string()),
    }
}
