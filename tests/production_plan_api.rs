//! HTTP tests for the production plan endpoint, driven through the router
//! without binding a socket.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use powerplant_dispatch::{api, config::Config, controller::AppState};

const PAYLOAD_WINDY: &str = include_str!("../demos/payloads/payload1.json");
const PAYLOAD_CALM: &str = include_str!("../demos/payloads/payload2.json");
const PAYLOAD_TOO_HIGH: &str = include_str!("../demos/payloads/payload3.json");

fn app() -> Router {
    let cfg = Config::default();
    let state = AppState::new(&cfg).expect("state");
    api::router(state, &cfg)
}

async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(request).await
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn outputs(value: &Value) -> Vec<(String, f64)> {
    value
        .as_array()
        .expect("plan list")
        .iter()
        .map(|entry| {
            (
                entry["name"].as_str().unwrap().to_string(),
                entry["p"].as_f64().unwrap(),
            )
        })
        .collect()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{a} != {b}");
}

#[tokio::test]
async fn test_windy_payload_is_dispatched_in_merit_order() {
    let (status, body) = post_json("/productionplan", PAYLOAD_WINDY).await;
    assert_eq!(status, StatusCode::OK);

    let plan = outputs(&body);
    let names: Vec<&str> = plan.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "windpark1",
            "windpark2",
            "gasfiredbig1",
            "gasfiredbig2",
            "gasfiredsomewhatsmaller",
            "tj1"
        ]
    );

    assert_close(plan[0].1, 90.0);
    assert_close(plan[1].1, 21.6);
    assert_close(plan[2].1, 243.8);
    assert_close(plan[3].1, 109.8);
    assert_close(plan[4].1, 14.8);
    assert_close(plan[5].1, 0.0);

    let total: f64 = plan.iter().map(|(_, p)| p).sum();
    assert_close(total, 480.0);
}

#[tokio::test]
async fn test_calm_payload_skips_wind() {
    let (status, body) = post_json("/productionplan", PAYLOAD_CALM).await;
    assert_eq!(status, StatusCode::OK);

    let plan = outputs(&body);
    let by_name = |name: &str| plan.iter().find(|(n, _)| n == name).unwrap().1;
    assert_close(by_name("windpark1"), 0.0);
    assert_close(by_name("windpark2"), 0.0);
    assert_close(by_name("gasfiredbig1"), 243.8);
    assert_close(by_name("gasfiredbig2"), 221.4);
    assert_close(by_name("gasfiredsomewhatsmaller"), 14.8);
    assert_close(by_name("tj1"), 0.0);
}

#[tokio::test]
async fn test_unreachable_load_reports_shortfall() {
    let (status, body) = post_json("/productionplan", PAYLOAD_TOO_HIGH).await;
    assert_eq!(status, StatusCode::OK);

    assert_close(body["requested_load"].as_f64().unwrap(), 910.0);
    assert_close(body["achieved_load"].as_f64().unwrap(), 681.7);
    assert_close(body["shortfall"].as_f64().unwrap(), 228.3);
    assert!(body["message"].as_str().unwrap().contains("Infeasible"));

    // every plant at max: 2 × 460 + 210 MWh of gas at 13.4, 16 MWh of kerosine at 50.8
    assert_close(body["total_cost"].as_f64().unwrap(), 1130.0 * 13.4 + 16.0 * 50.8);

    let plan = outputs(&body["plan"]);
    assert_eq!(plan.len(), 6);
    let tj1 = plan.iter().find(|(n, _)| n == "tj1").unwrap();
    assert_close(tj1.1, 4.8);
}

#[tokio::test]
async fn test_summary_reports_cost_per_plant() {
    let (status, body) = post_json("/productionplan/summary", PAYLOAD_WINDY).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["reached"], true);
    assert_close(body["requested_load"].as_f64().unwrap(), 480.0);
    assert_close(body["total_load"].as_f64().unwrap(), 480.0);
    assert!(body["load_difference"].as_f64().unwrap().abs() < 1e-6);

    let plants = body["plants"].as_array().unwrap();
    assert_eq!(plants.len(), 6);
    assert_eq!(plants[0]["name"], "windpark1");
    assert_close(plants[0]["output"].as_f64().unwrap(), 150.0);
    assert_close(plants[0]["cost"].as_f64().unwrap(), 0.0);
    assert_eq!(plants[2]["name"], "gasfiredbig1");
    assert_close(plants[2]["output"].as_f64().unwrap(), 460.0);
    assert_close(plants[2]["cost"].as_f64().unwrap(), 460.0 * 13.4);

    // gas burnt: 460 + 109.8 / 0.53 + 40 MWh at 13.4
    let expected = (500.0 + 109.8 / 0.53) * 13.4;
    assert_close(body["total_cost"].as_f64().unwrap(), expected);
}

#[tokio::test]
async fn test_summary_of_unreachable_load() {
    let (status, body) = post_json("/api/v1/productionplan/summary", PAYLOAD_TOO_HIGH).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reached"], false);
    assert_close(body["load_difference"].as_f64().unwrap(), -228.3);
}

#[tokio::test]
async fn test_versioned_route() {
    let (status, body) = post_json("/api/v1/productionplan", PAYLOAD_WINDY).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outputs(&body).len(), 6);
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let mut payload: Value = serde_json::from_str(PAYLOAD_WINDY).unwrap();
    payload["powerplants"][0]
        .as_object_mut()
        .unwrap()
        .remove("pmin");

    let (status, body) = post_json("/productionplan", &payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert!(body["message"].as_str().unwrap().contains("pmin"));
}

#[tokio::test]
async fn test_inverted_bounds_are_rejected() {
    let mut payload: Value = serde_json::from_str(PAYLOAD_WINDY).unwrap();
    payload["powerplants"][3]["pmin"] = 20.into();

    let (status, body) = post_json("/productionplan", &payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("pmin 20 exceeds pmax 16"));
}

#[tokio::test]
async fn test_negative_load_is_rejected() {
    let mut payload: Value = serde_json::from_str(PAYLOAD_WINDY).unwrap();
    payload["load"] = (-5).into();

    let (status, body) = post_json("/productionplan", &payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert!(body["message"].as_str().unwrap().contains("load"));
}

#[tokio::test]
async fn test_non_json_content_type_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/productionplan")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(PAYLOAD_WINDY))
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (status, body) = post_json("/productionplan", "{\"load\": 480,").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_health_endpoints() {
    let (status, body) = send(
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["strategy"], "merit-order");

    for uri in ["/health/live", "/health/ready", "/api/v1/health/live"] {
        let (status, _) = send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}
