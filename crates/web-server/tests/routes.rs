use analytics::AnalyticsEngine;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use core_types::Transaction;
use dashboard::DashboardContext;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn order(customer: &str, country: &str, year: i32, product: &str, sub: &str, sales: Decimal) -> Transaction {
    let date = NaiveDate::from_ymd_opt(year, 6, 1).unwrap();
    Transaction {
        customer_id: customer.to_string(),
        country: country.to_string(),
        order_date: date,
        ship_date: date,
        postal_code: None,
        product_id: product.to_string(),
        category: "Office Supplies".to_string(),
        sub_category: sub.to_string(),
        product_name: format!("{product} item"),
        sales,
        profit: sales / dec!(10),
        quantity: 1,
        discount: Decimal::ZERO,
        shipping_cost: Decimal::ZERO,
    }
}

fn router() -> Router {
    let transactions = vec![
        order("A", "USA", 2020, "P1", "Paper", dec!(500)),
        order("B", "France", 2020, "P2", "Binders", dec!(1500)),
        order("A", "USA", 2021, "P1", "Paper", dec!(200)),
    ];
    let ctx = DashboardContext::from_transactions(&AnalyticsEngine::default(), &transactions);
    web_server::build_router(Arc::new(ctx))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let response = router().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn years_are_sorted() {
    let (status, body) = send(get("/api/years")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([2020, 2021]));
}

#[tokio::test]
async fn layout_starts_on_the_first_year() {
    let (status, body) = send(get("/api/layout")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], json!("Exploring Worldwide Retail Trends: Global Superstore"));
    assert_eq!(body["year_slider"]["id"], json!("year-slider"));
    assert_eq!(body["year_slider"]["value"], json!(2020));
    assert_eq!(body["year_slider"]["step"], json!(1));
    assert_eq!(body["year_slider"]["marks"]["2021"], json!("2021"));
    assert_eq!(body["updates"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["updates"][2]["value"], json!("Total Sales by Country in 2020"));
}

#[tokio::test]
async fn slider_change_returns_map_and_caption() {
    let (status, body) = send(post_json("/api/controls/year-slider", json!({ "value": 2021 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["output"], json!("world-map"));
    assert_eq!(body[0]["value"]["data"][0]["type"], json!("scattergeo"));
    assert_eq!(body[0]["value"]["data"][0]["locations"], json!(["USA"]));
    assert_eq!(body[1], json!({ "output": "world-map-caption", "value": "Total Sales by Country in 2021" }));
}

#[tokio::test]
async fn unknown_control_is_not_found() {
    let (status, body) = send(post_json("/api/controls/slct_year", json!({ "value": 2021 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Unknown control 'slct_year'"));
}

#[tokio::test]
async fn malformed_control_body_is_rejected() {
    let response = router()
        .oneshot(post_json("/api/controls/year-dropdown", json!({ "value": "twenty" })))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn charts_default_to_the_initial_year() {
    let (_, explicit) = send(get("/api/charts/category?year=2020")).await;
    let (status, implicit) = send(get("/api/charts/category")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(explicit, implicit);
    assert_eq!(implicit["data"][0]["values"], json!([2000.0]));

    let (_, sub) = send(get("/api/charts/sub-category?year=2020")).await;
    assert_eq!(sub["data"][0]["labels"], json!(["Binders", "Paper"]));
}

#[tokio::test]
async fn top_products_span_all_years() {
    let (status, body) = send(get("/api/charts/top-products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], json!("Sales"));
    assert_eq!(body["data"][0]["y"], json!(["P1_Paper", "P2_Binders"]));
    assert_eq!(body["data"][0]["x"], json!([700.0, 1500.0]));
    assert_eq!(body["layout"]["barmode"], json!("relative"));
}

#[tokio::test]
async fn map_for_an_empty_year_has_empty_layers() {
    let (status, body) = send(get("/api/charts/world-map?year=1999")).await;
    assert_eq!(status, StatusCode::OK);
    let layers = body["data"].as_array().unwrap();
    assert_eq!(layers.len(), 4);
    assert!(layers.iter().all(|layer| layer["locations"] == json!([])));
}
