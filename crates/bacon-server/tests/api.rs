//! Route tests for the HTTP API.

use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use bacon_core::CastGroup;
use bacon_graph::actors::load_graph;
use bacon_graph::JsonlCastLog;
use bacon_pathfind::DegreeService;
use bacon_server::{router, AppState};

// ============================================================================
// Helpers
// ============================================================================

/// Kevin Bacon - A - B - C, plus a separate X - Y.
fn service() -> DegreeService {
    DegreeService::build(vec![
        CastGroup::new(["Kevin Bacon", "A"]),
        CastGroup::new(["A", "B"]),
        CastGroup::new(["B", "C"]),
        CastGroup::new(["X", "Y"]),
    ])
}

fn app() -> axum::Router {
    router(AppState::new(Arc::new(service()), "Kevin Bacon"))
}

async fn send_request(
    app: axum::Router,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
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

// ============================================================================
// Documentation
// ============================================================================

#[tokio::test]
async fn test_docs_lists_endpoints() {
    let (status, body) = send_request(app(), "GET", "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    for endpoint in ["bacon-number", "actor-number", "movie", "multiple-degrees"] {
        assert!(body.get(endpoint).is_some(), "missing {endpoint}");
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = send_request(app(), "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// bacon-number
// ============================================================================

#[tokio::test]
async fn test_bacon_number() {
    let (status, body) = send_request(app(), "GET", "/api/bacon-number?actor=C", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"Results": [["Kevin Bacon", "C", 3]], "Description": "Success"})
    );
}

#[tokio::test]
async fn test_bacon_number_unknown_actor() {
    let (status, body) =
        send_request(app(), "GET", "/api/bacon-number?actor=Big%20Foot", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "Results": [["Kevin Bacon", "Big Foot", -2]],
            "Description": "\"Big Foot\" is not in the dataset"
        })
    );
}

#[tokio::test]
async fn test_bacon_number_unreachable_is_null() {
    let (_, body) = send_request(app(), "GET", "/api/bacon-number?actor=X", None).await;
    assert_eq!(body["Results"], json!([["Kevin Bacon", "X", null]]));
    assert_eq!(body["Description"], "Success");
}

#[tokio::test]
async fn test_bacon_number_missing_parameter() {
    let (status, body) = send_request(app(), "GET", "/api/bacon-number?name=C", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Code"], -2);
    assert_eq!(body["Error"], "Missing Parameters");
    assert_eq!(body["Details"], "Missing parameter \"actor\"");
}

// ============================================================================
// actor-number
// ============================================================================

#[tokio::test]
async fn test_actor_number_descriptions() {
    let cases = [
        ("root=A&target=C", json!(["A", "C", 2]), "Success"),
        ("root=A&target=A", json!(["A", "A", 0]), "Success"),
        ("root=Q&target=C", json!(["Q", "C", -1]), "\"Q\" is not in the dataset"),
        ("root=A&target=Q", json!(["A", "Q", -2]), "\"Q\" is not in the dataset"),
        (
            "root=P&target=Q",
            json!(["P", "Q", -3]),
            "Neither \"P\" nor \"Q\" is in the dataset",
        ),
        ("root=A&target=Y&extra=1", json!(["A", "Y", null]), "Success"),
    ];
    for (query, result, description) in cases {
        let path = format!("/api/actor-number?{query}");
        let (status, body) = send_request(app(), "GET", &path, None).await;
        assert_eq!(status, StatusCode::OK, "{query}");
        assert_eq!(body["Results"], json!([result]), "{query}");
        assert_eq!(body["Description"], description, "{query}");
    }
}

#[tokio::test]
async fn test_actor_number_missing_target() {
    let (status, body) = send_request(app(), "GET", "/api/actor-number?root=A", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Details"], "Missing parameter \"target\"");
}

// ============================================================================
// multiple-degrees
// ============================================================================

#[tokio::test]
async fn test_multiple_degrees() {
    let (status, body) = send_request(
        app(),
        "GET",
        "/api/multiple-degrees",
        Some(r#"[["A", "C"], ["Kevin Bacon", "Nobody"], ["X", "Y"]]"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "Results": [["A", "C", 2], ["Kevin Bacon", "Nobody", -2], ["X", "Y", 1]],
            "Description": "Degrees for 3 pairs found successfully"
        })
    );
}

#[tokio::test]
async fn test_multiple_degrees_empty() {
    let (status, body) =
        send_request(app(), "GET", "/api/multiple-degrees", Some("[]")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"Results": [], "Description": "No pairs provided"}));
}

#[tokio::test]
async fn test_multiple_degrees_stops_at_bad_pair() {
    let (status, body) = send_request(
        app(),
        "GET",
        "/api/multiple-degrees",
        Some(r#"[["A", "B"], ["A", "B", "C"], ["X", "Y"]]"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Code"], -4);
    assert_eq!(
        body["Details"],
        "1 pairs succeeded; processing stopped at first failure: [[\"A\",\"B\",1]]"
    );
}

#[tokio::test]
async fn test_multiple_degrees_invalid_json() {
    let (status, body) = send_request(
        app(),
        "GET",
        "/api/multiple-degrees",
        Some("[[\"A\", \"B\"],\n oops]"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Code"], -3);
    assert_eq!(body["Error"], "JSON decode error");
    assert!(body["Details"]
        .as_str()
        .unwrap()
        .starts_with("Parsing failed at line 2, column "));
}

// ============================================================================
// movie
// ============================================================================

#[tokio::test]
async fn test_add_movie_then_query() {
    let app = app();
    let (status, body) = send_request(
        app.clone(),
        "POST",
        "/api/movie",
        Some(r#"{"Crossover": ["C", "X"], "Ignored Title": ["Y", "Z"]}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"Results": [], "Description": "All movies added successfully"})
    );

    let (_, body) = send_request(app, "GET", "/api/bacon-number?actor=Z", None).await;
    assert_eq!(body["Results"], json!([["Kevin Bacon", "Z", 6]]));
}

#[tokio::test]
async fn test_add_movie_empty_cast_is_rejected() {
    let app = app();
    let (status, body) = send_request(
        app.clone(),
        "POST",
        "/api/movie",
        Some(r#"{"Crossover": ["C", "X"], "Empty": []}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Code"], -5);

    // Nothing from the batch was applied.
    let (_, body) = send_request(app, "GET", "/api/actor-number?root=C&target=X", None).await;
    assert_eq!(body["Results"], json!([["C", "X", null]]));
}

#[tokio::test]
async fn test_add_movie_wrong_shape_is_rejected() {
    let (status, body) =
        send_request(app(), "POST", "/api/movie", Some(r#"[["A", "B"]]"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Code"], -5);
}

#[tokio::test]
async fn test_add_movie_invalid_json() {
    let (status, body) = send_request(app(), "POST", "/api/movie", Some("{")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Code"], -3);
}

#[tokio::test]
async fn test_movie_route_is_post_only() {
    let (status, _) = send_request(app(), "GET", "/api/movie", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_added_movies_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("actors.jsonl");
    fs::write(&path, "[\"Kevin Bacon\",\"A\"]\n").unwrap();

    let service = DegreeService::new(load_graph(&path).unwrap())
        .with_cast_log(Box::new(JsonlCastLog::new(&path)));
    let app = router(AppState::new(Arc::new(service), "Kevin Bacon"));

    let (status, _) =
        send_request(app, "POST", "/api/movie", Some(r#"{"Sequel": ["A", "B"]}"#)).await;
    assert_eq!(status, StatusCode::CREATED);

    let reloaded = DegreeService::new(load_graph(&path).unwrap());
    assert_eq!(reloaded.query("Kevin Bacon", "B").degree(), Some(2));
}
