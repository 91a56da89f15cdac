use std::time::Duration;

use nasa_explorer::config::RateLimitConfig;

use crate::helpers::{get_json, spawn_app, spawn_app_with_rate_limit, TEST_ORIGIN};

#[tokio::test]
async fn health_reports_ok() {
    let app = spawn_app().await;

    let (status, response) = get_json(&app.api_url("/health")).await;
    assert_eq!(status, 200);
    assert_eq!(response["status"], "OK");
    assert_eq!(response["environment"], "test");
    assert!(response["uptime"].as_f64().unwrap() >= 0.0);
    assert!(response["timestamp"].is_string());
}

#[tokio::test]
async fn unmatched_routes_return_404_envelope() {
    let app = spawn_app().await;

    for url in [
        app.api_url("/nasa/unknown"),
        app.api_url("/nope"),
        format!("{}/health", app.address),
    ] {
        let (status, response) = get_json(&url).await;
        assert_eq!(status, 404, "{url}");
        assert_eq!(response["error"], "Route not found");
        assert!(response["message"].is_string());
    }
}

#[tokio::test]
async fn excess_requests_are_rate_limited() {
    let app = spawn_app_with_rate_limit(RateLimitConfig {
        max_requests: 3,
        window: Duration::from_secs(60),
    })
    .await;

    for _ in 0..3 {
        let (status, _) = get_json(&app.api_url("/health")).await;
        assert_eq!(status, 200);
    }

    let (status, response) = get_json(&app.api_url("/health")).await;
    assert_eq!(status, 429);
    assert_eq!(
        response["message"],
        "Too many requests from this IP, please try again later."
    );
}

#[tokio::test]
async fn allowed_origin_receives_cors_headers() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(app.api_url("/health"))
        .header("Origin", TEST_ORIGIN)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(TEST_ORIGIN)
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn foreign_origin_gets_no_cors_grant() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(app.api_url("/health"))
        .header("Origin", "https://evil.example.com")
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn security_headers_on_every_response() {
    let app = spawn_app_with_rate_limit(RateLimitConfig {
        max_requests: 2,
        window: Duration::from_secs(60),
    })
    .await;
    let client = reqwest::Client::new();

    // success, 404 and 429 alike
    let urls = [
        app.api_url("/health"),
        app.api_url("/nope"),
        app.api_url("/health"),
    ];
    let mut statuses = Vec::new();
    for url in urls {
        let response = client
            .get(&url)
            .send()
            .await
            .expect("Failed to execute request");
        statuses.push(response.status().as_u16());

        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        assert_eq!(header("x-content-type-options").as_deref(), Some("nosniff"), "{url}");
        assert_eq!(header("x-frame-options").as_deref(), Some("SAMEORIGIN"), "{url}");
        assert_eq!(header("referrer-policy").as_deref(), Some("no-referrer"), "{url}");
    }
    assert_eq!(statuses, vec![200, 404, 429]);
}
