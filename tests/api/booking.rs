use crate::helpers::{spawn_app, spawn_app_with, valid_booking};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn booking_returns_a_200_and_relays_one_email_for_valid_data() {
    let test_app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_booking(&valid_booking()).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("Booking request sent"));
}

#[tokio::test]
async fn booking_email_replies_to_the_normalized_visitor_address() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;

    test_app.post_booking(&valid_booking()).await;

    let emails = test_app.sent_emails().await;
    assert_eq!(emails.len(), 1);
    let email = &emails[0];
    assert_eq!(email["ReplyTo"], "ursula_le_guin@example.com");
    assert_eq!(email["To"], "hello@example.com");
    assert_eq!(email["Subject"], "📅 New Booking Request: Ursula Le Guin");
    let html = email["HtmlBody"].as_str().unwrap();
    assert!(html.contains("2026-11-03 at 14:30"));
}

#[tokio::test]
async fn booking_accepts_url_encoded_forms() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .post_urlencoded(
            "/api/booking",
            "firstName=Ursula&lastName=Le%20Guin&email=ursula%40example.com&date=2026-11-03&time=14%3A30",
        )
        .await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn booking_returns_a_400_without_sending_when_a_field_is_missing() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    for field in ["firstName", "lastName", "email", "date", "time"] {
        let mut body = valid_booking();
        body.as_object_mut().unwrap().remove(field);

        let response = test_app.post_booking(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when {} was missing",
            field
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid form data"));
    }
}

#[tokio::test]
async fn booking_returns_a_400_when_fields_are_present_but_invalid() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let test_cases = vec![
        ("firstName", serde_json::json!("   "), "a blank first name"),
        ("lastName", serde_json::json!("x".repeat(51)), "a 51 character last name"),
        ("email", serde_json::json!("definitely-not-an-email"), "an invalid email"),
        ("date", serde_json::json!("2026-02-30"), "an impossible date"),
        ("time", serde_json::json!("t".repeat(21)), "a 21 character time"),
    ];

    for (field, value, description) in test_cases {
        let mut body = valid_booking();
        body[field] = value;

        let response = test_app.post_booking(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload had {}",
            description
        );
    }
}

#[tokio::test]
async fn booking_returns_a_400_for_an_unreadable_body() {
    let test_app = spawn_app().await;

    let response = test_app
        .api_client
        .post(format!("{}/api/booking", test_app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn booking_returns_a_generic_500_when_the_relay_fails() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(535).set_body_string("5.7.8 Authentication credentials invalid"))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_booking(&valid_booking()).await;

    assert_eq!(500, response.status().as_u16());
    let text = response.text().await.unwrap();
    assert!(!text.contains("Authentication"));
    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Failed to send booking request. Please try again later."
    );
}

#[tokio::test]
async fn booking_returns_a_500_when_the_relay_times_out() {
    let test_app = spawn_app_with(|c| c.email_client.timeout_milliseconds = 200).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(30)))
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_booking(&valid_booking()).await;

    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn the_sixth_booking_within_the_window_is_throttled() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(5)
        .mount(&test_app.email_server)
        .await;

    for attempt in 1..=5 {
        let response = test_app.post_booking(&valid_booking()).await;
        assert_eq!(
            200,
            response.status().as_u16(),
            "Booking number {} should have been accepted",
            attempt
        );
    }

    let response = test_app.post_booking(&valid_booking()).await;

    assert_eq!(429, response.status().as_u16());
    assert!(response.headers().contains_key("retry-after"));
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn non_post_requests_get_a_json_405_and_do_not_use_up_the_form_window() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    for _ in 0..5 {
        let response = test_app.get("/api/booking").await;
        assert_eq!(405, response.status().as_u16());
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
    }

    let response = test_app.post_booking(&valid_booking()).await;

    assert_eq!(200, response.status().as_u16());
}
