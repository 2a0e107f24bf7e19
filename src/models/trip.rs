use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct TripCreate {
    pub destination: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub budget: f64,
    pub currency: String,
    pub travelers: i32,
    #[serde(default)]
    pub preferences: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Trip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub destination: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub budget: f64,
    pub currency: String,
    pub travelers: i32,
    #[serde(default)]
    pub preferences: Vec<String>,
    // Saved planner output; the generation pipeline itself never writes these
    #[serde(default)]
    pub itinerary: Vec<Document>,
    #[serde(default)]
    pub flights: Vec<Document>,
    #[serde(default)]
    pub expenses: Vec<Document>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for a stored trip. Recognized fields are enumerated here;
/// unknown keys are rejected at deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TripUpdate {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    pub travelers: Option<i32>,
    pub preferences: Option<Vec<String>>,
    pub itinerary: Option<Vec<Document>>,
    pub flights: Option<Vec<Document>>,
    pub expenses: Option<Vec<Document>>,
}

impl TripUpdate {
    /// Build the `$set` document from the fields that are present. An empty
    /// document means the update carried nothing recognizable.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();

        if let Some(start_date) = &self.start_date {
            set.insert("start_date", start_date.clone());
        }
        if let Some(end_date) = &self.end_date {
            set.insert("end_date", end_date.clone());
        }
        if let Some(budget) = self.budget {
            set.insert("budget", budget);
        }
        if let Some(currency) = &self.currency {
            set.insert("currency", currency.clone());
        }
        if let Some(travelers) = self.travelers {
            set.insert("travelers", travelers);
        }
        if let Some(preferences) = &self.preferences {
            set.insert("preferences", preferences.clone());
        }
        if let Some(itinerary) = &self.itinerary {
            set.insert("itinerary", itinerary.clone());
        }
        if let Some(flights) = &self.flights {
            set.insert("flights", flights.clone());
        }
        if let Some(expenses) = &self.expenses {
            set.insert("expenses", expenses.clone());
        }

        set
    }
}
