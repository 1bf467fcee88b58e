//! AWS Lambda HTTP entry point
//!
//! - `POST .../evaluate` with `{"profile": {...}, "assumptions": {...}?}`
//! - `POST .../compare` with `{"query": {...}, "sort": {...}?, "rate_cards": [...]?}`
//!
//! Malformed payloads and invalid numeric input answer 400.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use loan_engine::{
    ApplicantProfile, EligibilityScorer, EngineError, LenderRateCard, LoanComparator, LoanQuery,
    RateCatalog, ScoringAssumptions, SortSpec,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
struct EvaluateRequest {
    profile: ApplicantProfile,
    #[serde(default)]
    assumptions: Option<ScoringAssumptions>,
}

#[derive(Debug, Deserialize)]
struct CompareRequest {
    query: LoanQuery,
    #[serde(default)]
    sort: SortSpec,
    #[serde(default)]
    rate_cards: Option<Vec<LenderRateCard>>,
}

fn json_response<T: Serialize>(status: u16, value: &T) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(value)?;
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))?;
    Ok(response)
}

fn bad_request(message: impl std::fmt::Display) -> Result<Response<Body>, Error> {
    json_response(400, &json!({ "error": message.to_string() }))
}

fn handle_evaluate(payload: &[u8]) -> Result<Response<Body>, Error> {
    let request: EvaluateRequest = match serde_json::from_slice(payload) {
        Ok(request) => request,
        Err(err) => return bad_request(format!("malformed payload: {}", err)),
    };

    let scorer = match request.assumptions {
        Some(assumptions) => match EligibilityScorer::new(assumptions) {
            Ok(scorer) => scorer,
            Err(err) => return bad_request(err),
        },
        None => EligibilityScorer::default(),
    };

    match scorer.try_evaluate(&request.profile) {
        Ok(result) => json_response(200, &result),
        Err(err) => bad_request(err),
    }
}

fn handle_compare(payload: &[u8]) -> Result<Response<Body>, Error> {
    let request: CompareRequest = match serde_json::from_slice(payload) {
        Ok(request) => request,
        Err(err) => return bad_request(format!("malformed payload: {}", err)),
    };

    let cards = request
        .rate_cards
        .unwrap_or_else(|| RateCatalog::default_catalog().cards().to_vec());

    match LoanComparator::new().compare(&request.query, &cards, request.sort) {
        Ok(results) => json_response(200, &results),
        Err(err @ EngineError::InvalidInput { .. }) => bad_request(err),
        Err(err) => Err(err.into()),
    }
}

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let path = event.uri().path().to_string();
    let payload: &[u8] = event.body().as_ref();
    log::info!("{} {}", event.method(), path);

    if event.method() != "POST" {
        return json_response(405, &json!({ "error": "use POST" }));
    }

    if path.ends_with("/evaluate") {
        handle_evaluate(payload)
    } else if path.ends_with("/compare") {
        handle_compare(payload)
    } else {
        json_response(404, &json!({ "error": format!("no route for {}", path) }))
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(function_handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        let bytes: &[u8] = response.body().as_ref();
        serde_json::from_slice(bytes).expect("json body")
    }

    #[test]
    fn test_evaluate_route() {
        let payload = json!({
            "profile": {
                "monthly_income": 20_000_000.0,
                "monthly_expenses": 3_000_000.0,
                "current_monthly_debt": 1_000_000.0,
                "credit_history": "good",
                "bad_debt_group": "none",
                "requested_loan_amount": 100_000_000.0,
                "employment_duration": "gt5y"
            }
        });
        let response = handle_evaluate(payload.to_string().as_bytes()).expect("response");
        assert_eq!(response.status(), 200);

        let body = body_json(&response);
        assert_eq!(body["score"], 80);
        assert_eq!(body["category"], "A");
        assert_eq!(body["eligible"], true);
    }

    #[test]
    fn test_evaluate_rejects_negative_amounts() {
        let payload = json!({
            "profile": {
                "monthly_income": -1.0,
                "monthly_expenses": 0.0,
                "current_monthly_debt": 0.0,
                "credit_history": "good",
                "bad_debt_group": "none",
                "requested_loan_amount": 1.0,
                "employment_duration": "lt1y"
            }
        });
        let response = handle_evaluate(payload.to_string().as_bytes()).expect("response");
        assert_eq!(response.status(), 400);
    }

    #[test]
    fn test_compare_route_with_default_catalog() {
        let payload = json!({
            "query": { "principal": 100_000_000.0, "term_years": 5, "product": "home" },
            "sort": { "key": "monthly_payment", "direction": "ascending" }
        });
        let response = handle_compare(payload.to_string().as_bytes()).expect("response");
        assert_eq!(response.status(), 200);

        let body = body_json(&response);
        let offers = body.as_array().expect("array");
        assert!(!offers.is_empty());
        assert_eq!(offers[0]["rank"], 1);
    }

    #[test]
    fn test_malformed_payload() {
        let response = handle_compare(b"{\"query\": 5}").expect("response");
        assert_eq!(response.status(), 400);
    }
}
