//! HTTP-level tests for the scoring API
//!
//! The router is driven in-process; each test gets its own SQLite file and
//! hand-built artifacts.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tempfile::TempDir;
use tower::ServiceExt;

use fraud_scoring_server::{
    config::Config,
    create_router,
    db::Database,
    features::{FEATURE_COUNT, FEATURE_LAYOUT},
    model::{Artifacts, ClassifierArtifact, LogisticRegression, ScalerArtifact, StandardScaler},
    scoring::ScoringEngine,
    AppState,
};

struct TestApp {
    _dir: TempDir,
    router: Router,
}

fn layout() -> Vec<String> {
    FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()
}

/// Classifier that only looks at `Amount`, so tests can steer the risk band.
fn amount_only_artifacts(names: Vec<String>, amount_weight: f64, intercept: f64) -> Artifacts {
    let mut coefficients = vec![0.0; FEATURE_COUNT];
    coefficients[FEATURE_COUNT - 1] = amount_weight;

    let scaler = ScalerArtifact::Standard(StandardScaler {
        feature_names: Some(names.clone()),
        mean: vec![0.0; FEATURE_COUNT],
        scale: vec![1.0; FEATURE_COUNT],
    });
    let classifier = ClassifierArtifact::LogisticRegression(LogisticRegression {
        feature_names: Some(names),
        coefficients,
        intercept,
    });

    Artifacts::new(Arc::new(scaler), Arc::new(classifier))
}

async fn spawn_app(artifacts: Artifacts, init_schema: bool) -> TestApp {
    let dir = TempDir::new().unwrap();

    let template = dir.path().join("index.html");
    std::fs::write(&template, "<html><body>Fraud Scoring</body></html>").unwrap();

    let config = Config {
        database_url: format!("sqlite://{}", dir.path().join("test.db").display()),
        template_path: template.display().to_string(),
        ..Config::default()
    };

    let db = Database::new(&config.database_url).unwrap();
    if init_schema {
        db.init().await.unwrap();
    }

    let state = AppState {
        db,
        engine: ScoringEngine::new(artifacts),
        config,
    };

    TestApp { _dir: dir, router: create_router(state) }
}

async fn default_app() -> TestApp {
    spawn_app(amount_only_artifacts(layout(), 0.01, -2.0), true).await
}

async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn post_predict(app: &TestApp, body: &str) -> (StatusCode, Value) {
    post_predict_as(app, "application/json", body).await
}

async fn post_predict_as(app: &TestApp, content_type: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, bytes) = send(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn stored_rows(app: &TestApp) -> Vec<Value> {
    let (status, body) = get_json(app, "/transactions").await;
    assert_eq!(status, StatusCode::OK);
    body["transactions"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_predict_scores_and_stores_one_row() {
    let app = default_app().await;

    let (status, body) = post_predict(&app, r#"{"Time": 100000, "Amount": 250.0}"#).await;
    assert_eq!(status, StatusCode::OK);

    let p = body["fraud_probability"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&p));
    assert!(((p * 10_000.0).round() - p * 10_000.0).abs() < 1e-6, "not 4dp: {}", p);

    let risk = body["risk_level"].as_str().unwrap();
    let expected = match risk {
        "low" => "Transaction Approved",
        "medium" => "Manual Verification Required",
        "high" => "Transaction Blocked",
        other => panic!("unexpected risk level {}", other),
    };
    assert_eq!(body["decision"], expected);
    assert!(body.get("error").is_none());

    let rows = stored_rows(&app).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["amount"], 250.0);
    assert_eq!(rows[0]["time"], 100000.0);
    assert_eq!(rows[0]["risk_level"], risk);
    assert!(rows[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_amount_drives_risk_band() {
    // sigmoid(0.01 * amount - 2.0)
    let app = default_app().await;

    let (_, low) = post_predict(&app, r#"{"Time": 1, "Amount": 10}"#).await;
    assert_eq!(low["risk_level"], "low");
    assert_eq!(low["decision"], "Transaction Approved");

    let (_, medium) = post_predict(&app, r#"{"Time": 1, "Amount": 220}"#).await;
    assert_eq!(medium["risk_level"], "medium");
    assert_eq!(medium["decision"], "Manual Verification Required");

    let (_, high) = post_predict(&app, r#"{"Time": 1, "Amount": 500}"#).await;
    assert_eq!(high["risk_level"], "high");
    assert_eq!(high["decision"], "Transaction Blocked");
}

#[tokio::test]
async fn test_missing_amount_is_error_with_ok_status() {
    let app = default_app().await;

    let (status, body) = post_predict(&app, r#"{"Time": 100000}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].as_str().unwrap().contains("Amount"));
    assert!(body.get("fraud_probability").is_none());

    assert!(stored_rows(&app).await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_error_with_ok_status() {
    let app = default_app().await;

    for body in ["", "not json", "[1, 2, 3]", r#"{"Time": 1, "Amount": "lots"}"#] {
        let (status, resp) = post_predict(&app, body).await;
        assert_eq!(status, StatusCode::OK, "body {:?}", body);
        assert!(resp["error"].is_string(), "body {:?}", body);
    }

    assert!(stored_rows(&app).await.is_empty());
}

#[tokio::test]
async fn test_numeric_strings_are_coerced() {
    let app = default_app().await;

    let (_, body) = post_predict(&app, r#"{"Time": "100000", "Amount": "250.5"}"#).await;
    assert!(body.get("error").is_none());

    let rows = stored_rows(&app).await;
    assert_eq!(rows[0]["amount"], 250.5);
}

#[tokio::test]
async fn test_non_finite_values_are_rejected_and_not_stored() {
    let app = default_app().await;

    for body in [
        r#"{"Time": 1, "Amount": "inf"}"#,
        r#"{"Time": 1, "Amount": "-Infinity"}"#,
        r#"{"Time": 1, "Amount": "NaN"}"#,
        r#"{"Time": "nan", "Amount": 10}"#,
    ] {
        let (status, resp) = post_predict(&app, body).await;
        assert_eq!(status, StatusCode::OK, "body {:?}", body);
        assert!(resp["error"].is_string(), "body {:?}", body);
        assert!(resp.get("risk_level").is_none(), "body {:?}", body);
    }

    assert!(stored_rows(&app).await.is_empty());
}

#[tokio::test]
async fn test_booleans_are_coerced_to_numbers() {
    let app = default_app().await;

    let (status, body) = post_predict(&app, r#"{"Time": true, "Amount": 5}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("error").is_none());

    let rows = stored_rows(&app).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["time"], 1.0);
    assert_eq!(rows[0]["amount"], 5.0);
}

#[tokio::test]
async fn test_non_json_content_type_is_error_and_not_stored() {
    let app = default_app().await;

    let (status, body) = post_predict_as(&app, "text/plain", r#"{"Time": 1, "Amount": 5}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].as_str().unwrap().contains("Content-Type"));

    let (_, body) = post_predict_as(&app, "application/json; charset=utf-8", r#"{"Time": 1, "Amount": 5}"#).await;
    assert!(body.get("error").is_none());

    assert_eq!(stored_rows(&app).await.len(), 1);
}

#[tokio::test]
async fn test_schema_mismatch_is_error_and_not_stored() {
    let mut names = layout();
    names.reverse();
    let app = spawn_app(amount_only_artifacts(names, 0.01, 0.0), true).await;

    let (status, body) = post_predict(&app, r#"{"Time": 100000, "Amount": 250.0}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].is_string());

    assert!(stored_rows(&app).await.is_empty());
}

#[tokio::test]
async fn test_store_failure_on_predict_is_error_with_ok_status() {
    let app = spawn_app(amount_only_artifacts(layout(), 0.01, 0.0), false).await;

    let (status, body) = post_predict(&app, r#"{"Time": 100000, "Amount": 250.0}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].as_str().unwrap().contains("transactions"));
}

#[tokio::test]
async fn test_history_lists_every_row_newest_first() {
    let app = default_app().await;

    for amount in 1..=5 {
        let (_, body) = post_predict(&app, &format!(r#"{{"Time": 0, "Amount": {}}}"#, amount)).await;
        assert!(body.get("error").is_none());
    }

    let rows = stored_rows(&app).await;
    assert_eq!(rows.len(), 5);

    let amounts: Vec<f64> = rows.iter().map(|r| r["amount"].as_f64().unwrap()).collect();
    assert_eq!(amounts, vec![5.0, 4.0, 3.0, 2.0, 1.0]);

    let stamps: Vec<&str> = rows.iter().map(|r| r["created_at"].as_str().unwrap()).collect();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));

    for key in ["id", "amount", "time", "fraud_probability", "risk_level", "decision", "created_at"] {
        assert!(rows[0].get(key).is_some(), "missing {}", key);
    }
}

#[tokio::test]
async fn test_history_store_failure_is_server_error() {
    let app = spawn_app(amount_only_artifacts(layout(), 0.01, 0.0), false).await;

    let (status, body) = get_json(&app, "/transactions").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_landing_page_served() {
    let app = default_app().await;

    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, bytes) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(bytes).unwrap().contains("Fraud Scoring"));
}

#[tokio::test]
async fn test_health() {
    let app = default_app().await;

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["model_sha256"].is_null());
}

#[tokio::test]
async fn test_health_reports_loaded_model_fingerprint() {
    let dir = TempDir::new().unwrap();
    let names = layout();

    let scaler_doc = json!({
        "kind": "standard",
        "feature_names": &names,
        "mean": vec![0.0; FEATURE_COUNT],
        "scale": vec![1.0; FEATURE_COUNT],
    })
    .to_string();
    let model_doc = json!({
        "kind": "logistic_regression",
        "feature_names": &names,
        "coefficients": vec![0.01; FEATURE_COUNT],
        "intercept": -2.0,
    })
    .to_string();

    let scaler_path = dir.path().join("scaler.json");
    let model_path = dir.path().join("fraud_model.json");
    std::fs::write(&scaler_path, &scaler_doc).unwrap();
    std::fs::write(&model_path, &model_doc).unwrap();

    let artifacts = Artifacts::load(&model_path, &scaler_path).unwrap();
    let app = spawn_app(artifacts, true).await;

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let expected = hex::encode(Sha256::digest(model_doc.as_bytes()));
    assert_eq!(body["model_sha256"], expected);

    let (_, scored) = post_predict(&app, r#"{"Time": 0, "Amount": 0}"#).await;
    assert!(scored.get("error").is_none());
}
