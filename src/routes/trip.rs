use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::oid::ObjectId, Client};
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::trip::{Trip, TripCreate, TripUpdate};

fn trips_collection(client: &Client) -> mongodb::Collection<Trip> {
    client.database("TravelPlanner").collection("Trips")
}

/*
    POST /api/trips
*/
pub async fn create_trip(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    input: web::Json<TripCreate>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = trips_collection(&client);

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(user_id) => user_id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let curr_time = Utc::now();
    let input = input.into_inner();
    let mut trip = Trip {
        id: None,
        user_id,
        destination: input.destination,
        start_date: input.start_date,
        end_date: input.end_date,
        budget: input.budget,
        currency: input.currency,
        travelers: input.travelers,
        preferences: input.preferences,
        itinerary: Vec::new(),
        flights: Vec::new(),
        expenses: Vec::new(),
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    match collection.insert_one(&trip).await {
        Ok(result) => {
            trip.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(trip)
        }
        Err(err) => {
            eprintln!("Failed to insert trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create trip")
        }
    }
}

/*
    GET /api/trips
*/
pub async fn get_trips(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = trips_collection(&client);

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(user_id) => user_id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let cursor = collection
        .find(doc! { "user_id": user_id })
        .sort(doc! { "created_at": -1 })
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<Trip>>().await {
            Ok(trips) => HttpResponse::Ok().json(trips),
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to process trips")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve trips: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trips")
        }
    }
}

/*
    PUT /api/trips/{id}
*/
pub async fn update_trip(
    path: web::Path<String>,
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    input: web::Json<TripUpdate>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = trips_collection(&client);

    let trip_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid trip ID"),
    };
    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(user_id) => user_id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    // Ownership check before touching anything
    let filter = doc! { "_id": trip_id, "user_id": user_id };
    match collection.find_one(filter.clone()).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to fetch trip: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch trip");
        }
    }

    let mut set = input.into_inner().to_set_document();
    if set.is_empty() {
        return HttpResponse::BadRequest().body("No recognized fields to update");
    }
    set.insert("updated_at", Utc::now().to_rfc3339());

    match collection
        .update_one(filter.clone(), doc! { "$set": set })
        .await
    {
        Ok(_) => match collection.find_one(filter).await {
            Ok(Some(trip)) => HttpResponse::Ok().json(trip),
            Ok(None) => HttpResponse::NotFound().body("Trip not found"),
            Err(err) => {
                eprintln!("Failed to fetch updated trip: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch updated trip")
            }
        },
        Err(err) => {
            eprintln!("Failed to update trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update trip")
        }
    }
}
