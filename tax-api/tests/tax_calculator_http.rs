//! Drives the full router in-process with a stub bracket provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tax_api::{AppState, build_router};
use tax_core::{BracketSchedule, FetchError, TaxBracket, TaxBracketFetcher};
use tower::ServiceExt;

fn schedule_2022() -> BracketSchedule {
    BracketSchedule::new(vec![
        TaxBracket::bounded(0.0, 50197.0, 0.15),
        TaxBracket::bounded(50197.0, 100392.0, 0.205),
        TaxBracket::bounded(100392.0, 155625.0, 0.26),
        TaxBracket::bounded(155625.0, 221708.0, 0.29),
        TaxBracket::unbounded(221708.0, 0.33),
    ])
}

/// Serves the 2022 schedule and nothing else.
#[derive(Default)]
struct StubFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl TaxBracketFetcher for StubFetcher {
    async fn fetch_tax_brackets(
        &self,
        year: i32,
    ) -> Result<BracketSchedule, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match year {
            2022 => Ok(schedule_2022()),
            2020 => Ok(BracketSchedule::new(vec![TaxBracket::bounded(10.0, 5.0, 0.1)])),
            _ => Err(FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}

fn app(fetcher: Arc<StubFetcher>) -> Router {
    build_router(AppState::new(fetcher), Duration::from_secs(5))
}

async fn get(
    app: Router,
    uri: &str,
) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn returns_band_breakdown() {
    let (status, body) = get(
        app(Arc::default()),
        "/v1/tax-calculator?income=100000&taxYear=2022",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "totalTax": 17739.17,
            "taxesPerBand": [
                {"band": "0.00 to 50197.00", "taxedAt": 15.0, "taxAmount": 7529.55},
                {"band": "50197.00 to 100392.00", "taxedAt": 20.5, "taxAmount": 10209.62}
            ],
            "effectiveRate": 17.74
        })
    );
}

#[tokio::test]
async fn zero_income_has_no_bands() {
    let (status, body) = get(
        app(Arc::default()),
        "/v1/tax-calculator?income=0&taxYear=2022",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"totalTax": 0.0, "taxesPerBand": [], "effectiveRate": 0.0})
    );
}

#[tokio::test]
async fn missing_income_is_bad_request() {
    let (status, body) = get(app(Arc::default()), "/v1/tax-calculator?taxYear=2022").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "missing required parameter: income"}));
}

#[tokio::test]
async fn missing_tax_year_is_bad_request() {
    let (status, body) = get(app(Arc::default()), "/v1/tax-calculator?income=100").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "missing required parameter: taxYear"}));
}

#[tokio::test]
async fn unparseable_values_are_bad_request() {
    let (status, body) = get(
        app(Arc::default()),
        "/v1/tax-calculator?income=lots&taxYear=2022",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid income parameter"}));

    let (status, body) = get(
        app(Arc::default()),
        "/v1/tax-calculator?income=100&taxYear=twenty",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid tax year parameter"}));
}

#[tokio::test]
async fn negative_income_is_rejected_before_fetching() {
    let fetcher = Arc::new(StubFetcher::default());

    let (status, body) = get(
        app(fetcher.clone()),
        "/v1/tax-calculator?income=-1000&taxYear=2022",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().unwrap().contains("-1000"),
        "got: {body}"
    );
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_failure_is_bad_gateway() {
    let (status, body) = get(
        app(Arc::default()),
        "/v1/tax-calculator?income=100&taxYear=1999",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("tax year 1999"), "got: {message}");
}

#[tokio::test]
async fn invalid_bracket_data_is_bad_gateway() {
    let (status, body) = get(
        app(Arc::default()),
        "/v1/tax-calculator?income=100&taxYear=2020",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("position 0"), "got: {message}");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = app(Arc::default())
        .oneshot(Request::get("/v1/unknown").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
