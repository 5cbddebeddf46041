use crate::helpers::{spawn_app, spawn_app_with, valid_booking, ALLOWED_ORIGIN};
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn a_disallowed_origin_cannot_submit_a_booking() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .api_client
        .post(format!("{}/api/booking", test_app.address))
        .header("Origin", "https://evil.example")
        .json(&valid_booking())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(403, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Access denied.");
}

#[tokio::test]
async fn an_allowed_origin_gets_cors_headers() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .api_client
        .post(format!("{}/api/booking", test_app.address))
        .header("Origin", ALLOWED_ORIGIN)
        .json(&valid_booking())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn preflight_requests_from_an_allowed_origin_are_answered() {
    let test_app = spawn_app().await;

    let response = test_app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/contact", test_app.address),
        )
        .header("Origin", ALLOWED_ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(204, response.status().as_u16());
    let allowed_methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap();
    assert!(allowed_methods.contains("POST"));
}

#[tokio::test]
async fn every_response_carries_security_headers() {
    let test_app = spawn_app().await;

    let response = test_app.get("/api/health").await;

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn requests_beyond_the_global_window_are_throttled() {
    let test_app = spawn_app_with(|c| c.rate_limit.global.max_requests = 2).await;

    for _ in 0..2 {
        assert_eq!(200, test_app.get("/api/health").await.status().as_u16());
    }

    let response = test_app.get("/api/health").await;

    assert_eq!(429, response.status().as_u16());
    let retry_after: u64 = response.headers()["retry-after"]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 60);
}

#[tokio::test]
async fn clients_behind_a_trusted_proxy_are_limited_separately() {
    let test_app = spawn_app_with(|c| {
        c.application.trusted_proxies = vec!["127.0.0.1/32".to_string()];
        c.rate_limit.forms.max_requests = 1;
    })
    .await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&test_app.email_server)
        .await;

    let post_as = |client_ip: &'static str| {
        test_app
            .api_client
            .post(format!("{}/api/booking", test_app.address))
            .header("X-Forwarded-For", client_ip)
            .json(&valid_booking())
            .send()
    };

    assert_eq!(200, post_as("203.0.113.1").await.unwrap().status().as_u16());
    assert_eq!(200, post_as("203.0.113.2").await.unwrap().status().as_u16());
    assert_eq!(429, post_as("203.0.113.1").await.unwrap().status().as_u16());
}
