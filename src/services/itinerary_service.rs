use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;

use crate::models::itinerary::{CanonicalRequest, ItineraryItem, ItineraryRequest};
use crate::services::openai_service::OpenAiService;

const SYSTEM_PROMPT: &str = "You are an expert travel planner with deep knowledge of destinations worldwide. Generate detailed, personalized itineraries in JSON format only. Always consider budget constraints, traveler preferences, and realistic timing.";

const FOOD_KEYWORDS: [&str; 13] = [
    "lunch",
    "dinner",
    "breakfast",
    "brunch",
    "wine",
    "meal",
    "restaurant",
    "cafe",
    "food",
    "tasting",
    "snack",
    "coffee",
    "tea",
];

const DEFAULT_NUM_DAYS: i64 = 3;
const DEFAULT_CURRENCY: &str = "USD";
const GENERATION_TEMPERATURE: f64 = 0.7;
const GENERATION_MAX_TOKENS: u32 = 2500;
const GENERATED_ITEM_RATING: f64 = 4.5;

// The model has no structured-output guarantee, so the required shape is
// spelled out in the prompt itself: category set, worked mappings, and a
// complete two-day example. Identical on every call.
const INSTRUCTION_BLOCK: &str = concat!(
    "\nFor each activity/expense, use one of these categories: 'food', 'activities', 'transportation', 'accommodation', 'shopping', 'entertainment', 'health', 'other'.",
    "\nExamples:",
    "\n- 'Lunch at Bistro' → category: 'food'",
    "\n- 'Wine tasting tour' → category: 'food'",
    "\n- 'Visit the Louvre' → category: 'activities'",
    "\n- 'Metro ticket' → category: 'transportation'",
    "\n- 'Hotel check-in' → category: 'accommodation'",
    "\n- 'Buy souvenirs' → category: 'shopping'",
    "\n- 'Concert ticket' → category: 'entertainment'",
    "\n- 'Pharmacy purchase' → category: 'health'",
    "\nIf unsure, use the closest matching category.",
    "\nPlease return the itinerary as a JSON array. Each element should be an object with: 'day' (integer), and 'expenses' (an object with keys as categories like 'food', 'activities', 'transportation', etc., and values as lists of activities/expenses for that category).",
    "\nEach activity/expense should have: 'name', 'description', 'cost', 'time', and 'category'.",
    "\nExample:\n",
    "[\n",
    "  {\"day\": 1, \"expenses\": {\n",
    "    \"food\": [\n",
    "      {\"name\": \"Lunch at Bistro\", \"description\": \"French cuisine\", \"cost\": 25.0, \"time\": \"12:00\", \"category\": \"food\"}\n",
    "    ],\n",
    "    \"activities\": [\n",
    "      {\"name\": \"Louvre Visit\", \"description\": \"Art museum\", \"cost\": 17.0, \"time\": \"09:00\", \"category\": \"activities\"}\n",
    "    ],\n",
    "    \"transportation\": [\n",
    "      {\"name\": \"Metro Ticket\", \"description\": \"Subway ride\", \"cost\": 2.5, \"time\": \"08:30\", \"category\": \"transportation\"}\n",
    "    ]\n",
    "  }},\n",
    "  {\"day\": 2, \"expenses\": {\n",
    "    \"food\": [\n",
    "      {\"name\": \"Breakfast at Cafe\", \"description\": \"Coffee and croissant\", \"cost\": 8.0, \"time\": \"08:00\", \"category\": \"food\"}\n",
    "    ],\n",
    "    \"activities\": [\n",
    "      {\"name\": \"Eiffel Tower\", \"description\": \"Landmark visit\", \"cost\": 20.0, \"time\": \"10:00\", \"category\": \"activities\"}\n",
    "    ]\n",
    "  }}\n",
    "]",
);

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ValidationError {}

/// Outcome of walking a generation response: either a (possibly empty) list
/// of items, or a signal that the whole response must be discarded.
#[derive(Debug, PartialEq)]
pub enum Interpretation {
    Items(Vec<ItineraryItem>),
    NeedsFallback,
}

/// Validate and default a raw request into its canonical form.
pub fn normalize_request(request: &ItineraryRequest) -> Result<CanonicalRequest, ValidationError> {
    let destination = request
        .destination
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_string();
    if destination.is_empty() {
        return Err(ValidationError::new("Destination is required."));
    }

    let budget = request.budget.unwrap_or(0.0);
    if budget <= 0.0 {
        return Err(ValidationError::new("Budget must be greater than 0."));
    }

    let currency = match request.currency.as_deref().map(str::trim) {
        Some(currency) if !currency.is_empty() => currency.to_string(),
        _ => DEFAULT_CURRENCY.to_string(),
    };

    let travelers = match request.travelers {
        Some(travelers) if travelers > 0 => travelers,
        _ => 1,
    };

    // Dates are all-or-nothing: both must be present and parse as
    // YYYY-MM-DD, otherwise the pair is dropped and num_days stays at the
    // default. A reversed range passes through unclamped.
    let mut num_days = DEFAULT_NUM_DAYS;
    let mut dates: Option<(String, String)> = None;
    if let (Some(start), Some(end)) = (request.start_date.as_deref(), request.end_date.as_deref()) {
        if !start.trim().is_empty() && !end.trim().is_empty() {
            if let (Ok(start_date), Ok(end_date)) = (
                chrono::NaiveDate::parse_from_str(start, "%Y-%m-%d"),
                chrono::NaiveDate::parse_from_str(end, "%Y-%m-%d"),
            ) {
                num_days = (end_date - start_date).num_days() + 1;
                dates = Some((start.to_string(), end.to_string()));
            }
        }
    }
    let (start_date, end_date) = match dates {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    };

    Ok(CanonicalRequest {
        destination,
        budget,
        currency,
        travelers,
        start_date,
        end_date,
        preferences: request.preferences.clone(),
        num_days,
    })
}

/// Render the canonical request into the user prompt for the generation
/// service. Deterministic: the same request always yields the same string.
pub fn compose_prompt(request: &CanonicalRequest) -> String {
    let mut prompt = format!(
        "Generate a {}-day itinerary for me. You are my travel agent. My budget is {} {}. I am travelling to {} with {} traveler(s).",
        request.num_days, request.budget, request.currency, request.destination, request.travelers
    );

    if let (Some(start), Some(end)) = (&request.start_date, &request.end_date) {
        prompt.push_str(&format!(" My trip is from {} to {}.", start, end));
    }

    let preferences_text = if request.preferences.is_empty() {
        "general travel".to_string()
    } else {
        request.preferences.join(", ")
    };
    if preferences_text != "general travel" {
        prompt.push_str(&format!(" My interests are: {}.", preferences_text));
    }

    prompt.push_str(INSTRUCTION_BLOCK);
    prompt
}

pub fn is_food_item(title: &str, description: &str) -> bool {
    let text = format!("{} {}", title, description).to_lowercase();
    FOOD_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Walk the raw generation response into itinerary items.
///
/// Unparsable text means fallback. Well-formed JSON that is not an array
/// yields zero items. Any shape or coercion violation below the top level
/// abandons the entire response; partial results are never returned.
pub fn interpret_response(raw: &str, request: &CanonicalRequest) -> Interpretation {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return Interpretation::NeedsFallback,
    };

    let day_entries = match parsed {
        Value::Array(entries) => entries,
        _ => return Interpretation::Items(Vec::new()),
    };

    let mut items = Vec::new();
    let mut item_id: u64 = 1;

    for day_value in &day_entries {
        let day_obj = match day_value.as_object() {
            Some(obj) => obj,
            None => return Interpretation::NeedsFallback,
        };
        let day_field = day_obj.get("day");
        let expenses = match day_obj.get("expenses") {
            Some(Value::Object(map)) => map,
            None => continue,
            Some(_) => return Interpretation::NeedsFallback,
        };

        for (category, activities) in expenses {
            let activities = match activities.as_array() {
                Some(list) => list,
                None => return Interpretation::NeedsFallback,
            };

            for activity_value in activities {
                let activity = match activity_value.as_object() {
                    Some(obj) => obj,
                    None => return Interpretation::NeedsFallback,
                };

                let title = match string_field(activity, "name") {
                    Some(title) => title,
                    None => return Interpretation::NeedsFallback,
                };
                let description = match string_field(activity, "description") {
                    Some(description) => description,
                    None => return Interpretation::NeedsFallback,
                };
                let cost = match coerce_cost(activity.get("cost")) {
                    Some(cost) => cost,
                    None => return Interpretation::NeedsFallback,
                };
                let time = match string_field(activity, "time") {
                    Some(time) => time,
                    None => return Interpretation::NeedsFallback,
                };

                // The activity may declare its own category; the enclosing
                // expenses key is the default. Food keywords win either way.
                let mut item_type = match activity.get("category") {
                    None => category.clone(),
                    Some(Value::String(declared)) => declared.clone(),
                    Some(_) => return Interpretation::NeedsFallback,
                };
                if is_food_item(&title, &description) {
                    item_type = "food".to_string();
                }

                let day = match day_field.and_then(Value::as_i64) {
                    Some(day) => day,
                    None => return Interpretation::NeedsFallback,
                };

                items.push(ItineraryItem {
                    id: item_id.to_string(),
                    day,
                    time,
                    title,
                    description,
                    location: request.destination.clone(),
                    item_type,
                    duration: String::new(),
                    cost,
                    rating: GENERATED_ITEM_RATING,
                    completed: false,
                });
                item_id += 1;
            }
        }
    }

    Interpretation::Items(items)
}

fn string_field(activity: &Map<String, Value>, key: &str) -> Option<String> {
    match activity.get(key) {
        None => Some(String::new()),
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => None,
    }
}

fn coerce_cost(value: Option<&Value>) -> Option<f64> {
    match value {
        None => Some(0.0),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    }
}

/// Deterministic itinerary used whenever the generation service fails or its
/// output cannot be interpreted. Three items per day, no network access.
pub fn fallback_itinerary(request: &CanonicalRequest) -> Vec<ItineraryItem> {
    let mut items = Vec::new();
    let mut item_id: u64 = 1;

    for day in 1..=request.num_days {
        items.push(ItineraryItem {
            id: item_id.to_string(),
            day,
            time: "09:00".to_string(),
            title: format!("Day {} Morning Activity", day),
            description: format!(
                "Explore {} and discover local attractions.",
                request.destination
            ),
            location: format!("{} City Center", request.destination),
            item_type: "activity".to_string(),
            duration: "2 hours".to_string(),
            cost: 20.0,
            rating: 4.5,
            completed: false,
        });
        item_id += 1;

        items.push(ItineraryItem {
            id: item_id.to_string(),
            day,
            time: "12:00".to_string(),
            title: "Lunch at Local Restaurant".to_string(),
            description: format!(
                "Enjoy local cuisine at a recommended restaurant in {}.",
                request.destination
            ),
            location: "Local Restaurant".to_string(),
            item_type: "restaurant".to_string(),
            duration: "1 hour".to_string(),
            cost: 30.0,
            rating: 4.3,
            completed: false,
        });
        item_id += 1;

        items.push(ItineraryItem {
            id: item_id.to_string(),
            day,
            time: "14:00".to_string(),
            title: "Afternoon Exploration".to_string(),
            description: format!(
                "Continue exploring {} and visit popular attractions.",
                request.destination
            ),
            location: format!("{} Attractions", request.destination),
            item_type: "attraction".to_string(),
            duration: "3 hours".to_string(),
            cost: 25.0,
            rating: 4.4,
            completed: false,
        });
        item_id += 1;
    }

    items
}

/// Generate a personalized itinerary for the request.
///
/// Only validation failures surface to the caller. Service and
/// interpretation failures degrade to the fallback itinerary, so a valid
/// request always produces a response.
pub async fn generate_itinerary(
    request: &ItineraryRequest,
) -> Result<Vec<ItineraryItem>, ValidationError> {
    let canonical = normalize_request(request)?;
    let prompt = compose_prompt(&canonical);

    let service = match OpenAiService::from_env() {
        Ok(service) => service,
        Err(err) => {
            eprintln!(
                "Generation service unavailable: {}. Using fallback itinerary.",
                err
            );
            return Ok(fallback_itinerary(&canonical));
        }
    };

    match service
        .chat_completion(
            SYSTEM_PROMPT,
            &prompt,
            GENERATION_TEMPERATURE,
            GENERATION_MAX_TOKENS,
        )
        .await
    {
        Ok(raw) => match interpret_response(&raw, &canonical) {
            Interpretation::Items(items) => Ok(items),
            Interpretation::NeedsFallback => {
                eprintln!("Could not interpret generation response. Using fallback itinerary.");
                Ok(fallback_itinerary(&canonical))
            }
        },
        Err(err) => {
            eprintln!(
                "Generation request failed: {}. Using fallback itinerary.",
                err
            );
            Ok(fallback_itinerary(&canonical))
        }
    }
}
