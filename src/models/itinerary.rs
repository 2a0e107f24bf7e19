use serde::{Deserialize, Serialize};

/// Raw generation request as posted by the frontend. Everything except the
/// preferences list is optional at the wire level; required fields are
/// enforced during normalization so the endpoint can answer with a useful
/// validation message instead of a deserialization error.
#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryRequest {
    pub destination: Option<String>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    pub travelers: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Validated, defaulted form of a request. `start_date`/`end_date` are both
/// set when the raw pair parsed, both absent otherwise. `num_days` is the
/// inclusive date span, or 3 when no usable dates were given; a reversed
/// range passes through as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRequest {
    pub destination: String,
    pub budget: f64,
    pub currency: String,
    pub travelers: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub preferences: Vec<String>,
    pub num_days: i64,
}

/// One scheduled activity/expense entry. Ids are sequential strings starting
/// at "1" within a single response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub id: String,
    pub day: i64,
    pub time: String,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub duration: String,
    pub cost: f64,
    pub rating: f64,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItineraryResponse {
    pub itinerary: Vec<ItineraryItem>,
}
