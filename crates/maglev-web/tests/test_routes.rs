//! Drive the router end to end with an in-process model.
//!
//! Run with: cargo test --package maglev-web --test test_routes

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use maglev_common::{AssetConfig, LoadPolicy};
use maglev_model::{
    FeatureScaler, ForcePredictor, ModelError, ModelLoader, ModelStore, Regressor, ScaledFeatures,
};
use maglev_web::router::build_router;
use maglev_web::state::AppState;
use tower::ServiceExt;

const DEFAULT_FORM: &str = "J=1&R=10&h=10&J_1=-1&R_1=10&h_1=10&xi=10";

/// Returns a constant, or the first scaled feature when `None`.
struct Fixed(Option<f32>);

impl Regressor for Fixed {
    fn predict(&self, features: &ScaledFeatures) -> maglev_model::Result<f32> {
        Ok(self.0.unwrap_or(features.as_slice()[0]))
    }
}

struct FixedLoader(Option<f32>);

impl ModelLoader for FixedLoader {
    fn load(&self) -> maglev_model::Result<Arc<dyn Regressor>> {
        Ok(Arc::new(Fixed(self.0)))
    }

    fn source(&self) -> String {
        "fixed".into()
    }
}

struct MissingLoader;

impl ModelLoader for MissingLoader {
    fn load(&self) -> maglev_model::Result<Arc<dyn Regressor>> {
        Err(ModelError::ModelLoad("trained_model_with_random not found".into()))
    }

    fn source(&self) -> String {
        "missing".into()
    }
}

fn identity_scaler() -> FeatureScaler {
    FeatureScaler::Standard { mean: vec![0.0; 5], scale: vec![1.0; 5] }
}

fn app_with(
    scaler: FeatureScaler,
    loader: Box<dyn ModelLoader>,
    policy: LoadPolicy,
    assets: AssetConfig,
    debug: bool,
) -> Router {
    let store = ModelStore::new(loader, policy).unwrap();
    let state = AppState::new(ForcePredictor::new(scaler, store), assets, debug).unwrap();
    build_router(state)
}

fn app(output: f32) -> Router {
    app_with(
        identity_scaler(),
        Box::new(FixedLoader(Some(output))),
        LoadPolicy::Cached,
        AssetConfig::default(),
        false,
    )
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_entry_page_shows_defaults() {
    let req = Request::get("/").body(Body::empty()).unwrap();
    let (status, html) = send(app(0.0), req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Fig.1 - Parameters of levitated cylinders"));
    assert!(html.contains(r#"name="J" value="1""#));
    assert!(html.contains(r#"name="J_1" value="-1""#));
    for field in ["R", "h", "R_1", "h_1", "xi"] {
        assert!(html.contains(&format!(r#"name="{field}" value="10""#)), "{field}");
    }
    assert!(html.contains(r#"<output id="predicted_force">11.546</output>"#));
    assert!(html.contains(r#"id="arrow_J" class="arrow arrow-upper" src="/static/images/plus_arrow.svg""#));
    assert!(html.contains(r#"id="arrow_J_1" class="arrow arrow-lower" src="/static/images/minus_arrow.svg""#));
    assert!(html.contains(r#"id="arrow_F" class="arrow arrow-force" src="/static/images/plus_arrow.svg""#));
}

#[tokio::test]
async fn test_predict_reproduces_default_force() {
    let (status, html) = send(app(11.546), post_form(DEFAULT_FORM)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Fig.2 - Schematic of predicted results"));
    assert!(html.contains(r#"<output id="predicted_force">11.546</output>"#));
}

#[tokio::test]
async fn test_predict_echoes_inputs_and_signs() {
    let form = "J=2&R=2.5&h=3&J_1=3&R_1=4&h_1=5&xi=0.5";
    let (status, html) = send(app(1.5), post_form(form)).await;

    assert_eq!(status, StatusCode::OK);
    // -2 * 3 * 1.5
    assert!(html.contains(r#"<output id="predicted_force">-9</output>"#));
    assert!(html.contains(r#"name="J" value="2""#));
    assert!(html.contains(r#"name="R" value="2.5""#));
    assert!(html.contains(r#"name="h" value="3""#));
    assert!(html.contains(r#"name="J_1" value="3""#));
    assert!(html.contains(r#"name="R_1" value="4""#));
    assert!(html.contains(r#"name="h_1" value="5""#));
    assert!(html.contains(r#"name="xi" value="0.5""#));
    assert!(html.contains(r#"id="arrow_J" class="arrow arrow-upper" src="/static/images/plus_arrow.svg""#));
    assert!(html.contains(r#"id="arrow_J_1" class="arrow arrow-lower" src="/static/images/plus_arrow.svg""#));
    assert!(html.contains(r#"id="arrow_F" class="arrow arrow-force" src="/static/images/minus_arrow.svg""#));
}

#[tokio::test]
async fn test_zero_moment_gives_zero_force_and_minus_arrows() {
    let form = "J=0&R=10&h=10&J_1=-1&R_1=10&h_1=10&xi=10";
    let (status, html) = send(app(1.5), post_form(form)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<output id="predicted_force">0</output>"#));
    assert!(!html.contains(r#"<output id="predicted_force">-0</output>"#));
    assert!(html.contains(r#"name="J" value="0""#));
    // zero counts as non-positive for every arrow
    assert!(html.contains(r#"id="arrow_J" class="arrow arrow-upper" src="/static/images/minus_arrow.svg""#));
    assert!(html.contains(r#"id="arrow_J_1" class="arrow arrow-lower" src="/static/images/minus_arrow.svg""#));
    assert!(html.contains(r#"id="arrow_F" class="arrow arrow-force" src="/static/images/minus_arrow.svg""#));
    assert!(!html.contains("&#x2f;static"));
}

#[tokio::test]
async fn test_field_order_does_not_matter() {
    let form = "xi=0.5&h_1=5&R_1=4&J_1=3&h=3&R=2.5&J=2";
    let (status, html) = send(app(1.5), post_form(form)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<output id="predicted_force">-9</output>"#));
}

#[tokio::test]
async fn test_model_sees_scaled_features() {
    let scaler = FeatureScaler::Standard { mean: vec![1.0; 5], scale: vec![2.0; 5] };
    let app = app_with(
        scaler,
        Box::new(FixedLoader(None)),
        LoadPolicy::PerRequest,
        AssetConfig::default(),
        false,
    );
    // R_1 = 5 scales to 2, force = -(1)(-1)(2)
    let form = "J=1&R=10&h=10&J_1=-1&R_1=5&h_1=10&xi=10";
    let (status, html) = send(app, post_form(form)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<output id="predicted_force">2</output>"#));
}

#[tokio::test]
async fn test_non_numeric_value_is_server_error() {
    let form = "J=1&R=10&h=10&J_1=-1&R_1=10&h_1=10&xi=abc";
    let (status, body) = send(app(1.0), post_form(form)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("abc"));
}

#[tokio::test]
async fn test_missing_field_is_server_error() {
    let form = "J=1&R=10&h=10&J_1=-1&R_1=10&h_1=10";
    let (status, _) = send(app(1.0), post_form(form)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_wrong_content_type_is_server_error() {
    let req = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"J": 1}"#))
        .unwrap();
    let (status, _) = send(app(1.0), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_debug_mode_reports_error_detail() {
    let app = app_with(
        identity_scaler(),
        Box::new(FixedLoader(Some(1.0))),
        LoadPolicy::Cached,
        AssetConfig::default(),
        true,
    );
    let form = "J=1&R=10&h=10&J_1=-1&R_1=10&h_1=10&xi=abc";
    let (status, body) = send(app, post_form(form)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Field xi is not a number"));
}

#[tokio::test]
async fn test_model_load_failure_is_server_error() {
    let app = app_with(
        identity_scaler(),
        Box::new(MissingLoader),
        LoadPolicy::PerRequest,
        AssetConfig::default(),
        true,
    );
    let (status, body) = send(app, post_form(DEFAULT_FORM)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Model loading failed"));
}

#[tokio::test]
async fn test_get_predict_is_not_allowed() {
    let req = Request::get("/predict").body(Body::empty()).unwrap();
    let (status, _) = send(app(1.0), req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_serves_static_images() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("images")).unwrap();
    std::fs::write(dir.path().join("images/plus_arrow.svg"), "<svg/>").unwrap();
    let assets = AssetConfig { static_dir: dir.path().to_path_buf(), ..AssetConfig::default() };
    let app = app_with(
        identity_scaler(),
        Box::new(FixedLoader(Some(1.0))),
        LoadPolicy::Cached,
        assets,
        false,
    );

    let req = Request::get("/static/images/plus_arrow.svg").body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<svg/>");
}
