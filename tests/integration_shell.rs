mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{create_test_user, json_request, read_json, setup_test_app, sign_in};

#[sqlx::test(migrations = "./migrations")]
async fn test_shell_requires_session(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request("GET", "/api/shell?path=/students", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["redirect_to"], "/auth");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_shell_marks_active_entry_and_footer(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", true).await;
    let app = setup_test_app(pool);
    let token = sign_in(&app, &user).await;

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/shell?path=/students/STU0001",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["title"], "Tuition Manager");
    assert_eq!(body["sidebar"], "expanded");

    let navigation = body["navigation"].as_array().unwrap();
    assert_eq!(navigation.len(), 7);
    let active: Vec<&str> = navigation
        .iter()
        .filter(|entry| entry["active"] == true)
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(active, vec!["Students"]);

    assert_eq!(body["footer"]["email"], user.email);
    assert_eq!(body["footer"]["role"], "Staff");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_collapsed_shell_hides_footer(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", true).await;
    let app = setup_test_app(pool);
    let token = sign_in(&app, &user).await;

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/shell?path=/&sidebar=collapsed",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    let body = read_json(response).await;
    assert_eq!(body["sidebar"], "collapsed");
    assert!(body["footer"].is_null());
    assert_eq!(body["navigation"][0]["active"], true);
}
