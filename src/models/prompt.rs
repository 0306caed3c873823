use crate::entities::{Prediction, RouteQuery};

pub const SYSTEM_PROMPT: &str =
    "You are an expert in geospatial navigation and route planning. Answer with a single JSON object.";

pub fn reverse_route_prompt(query: &RouteQuery) -> String {
    format!(
        "Given the following information about a route, determine the most likely path taken.

Region: {region}
Difficulty: {difficulty}
Start Point: Latitude {start_lat}, Longitude {start_lon}
End Point: Latitude {end_lat}, Longitude {end_lon}

Task: Work backwards from the destination to determine the route that was most likely taken to reach this endpoint from the starting point.

Respond with a JSON object containing:
- \"predicted_route\": a step-by-step description of the likely route
- \"intermediate_points\": key waypoints in travel order, as [latitude, longitude] pairs
- \"confidence\": your confidence level between 0 and 1
- \"reasoning\": the reasoning behind your route choice

Response:",
        region = query.region,
        difficulty = query.difficulty,
        start_lat = query.start_point.latitude,
        start_lon = query.start_point.longitude,
        end_lat = query.end_point.latitude,
        end_lon = query.end_point.longitude,
    )
}

/// Decodes the first JSON object embedded in a completion. Anything else is
/// kept verbatim as the route description.
pub fn parse_prediction(completion: &str) -> Prediction {
    if let Some(object) = first_json_object(completion) {
        match serde_json::from_str::<Prediction>(object) {
            Ok(prediction) => return prediction,
            Err(err) => tracing::warn!("completion JSON did not decode as a prediction: {}", err),
        }
    } else {
        tracing::warn!("completion contained no JSON object");
    }

    Prediction::from_text(completion.trim())
}

fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => (),
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => (),
        }
    }

    None
}
