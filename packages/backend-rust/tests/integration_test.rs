use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn test_health_root() {
    let app = common::create_test_app();

    let (status, body) = common::send(&app, common::get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["rules"], 10);
}

#[tokio::test]
async fn test_health_live() {
    let app = common::create_test_app();

    let (status, body) = common::send(&app, common::get("/health/live")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_info() {
    let app = common::create_test_app_with_limit(7);

    let (status, body) = common::send(&app, common::get("/health/info")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "kelelahan-backend");
    assert_eq!(body["historyLimit"], 7);
}

#[tokio::test]
async fn test_404_not_found() {
    let app = common::create_test_app();

    let (status, body) = common::send(&app, common::get("/nonexistent/path")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
}
