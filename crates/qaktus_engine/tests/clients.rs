use std::time::Duration;

use pretty_assertions::assert_eq;
use qaktus_core::{LinkTarget, SignupReceipt};
use qaktus_engine::{
    ClientSettings, FailureKind, LinkGenerator, ReqwestLinkGenerator, ReqwestWaitlistClient,
    WaitlistClient,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        generate_endpoint: format!("{}/links", server.uri()),
        waitlist_endpoint: format!("{}/api/waitlist", server.uri()),
        ..ClientSettings::default()
    }
}

fn targets() -> Vec<LinkTarget> {
    vec![
        LinkTarget {
            original_url: "https://a.com".to_string(),
            weight: 3.0,
        },
        LinkTarget {
            original_url: "https://b.com".to_string(),
            weight: 1.0,
        },
    ]
}

#[tokio::test]
async fn generator_posts_urls_and_returns_short_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/links"))
        .and(body_json(json!({
            "urls": [
                {"original_url": "https://a.com", "weight": 3},
                {"original_url": "https://b.com", "weight": 1},
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "short_code": "aD2f3",
            "short_url": "https://short.ly/aD2f3",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = ReqwestLinkGenerator::new(&settings_for(&server)).unwrap();
    let code = generator.generate(&targets()).await.expect("generate ok");
    assert_eq!(code, "aD2f3");
}

#[tokio::test]
async fn generator_falls_back_to_short_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/links"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"short_url": "https://qaktus.com/Zk3"})),
        )
        .mount(&server)
        .await;

    let generator = ReqwestLinkGenerator::new(&settings_for(&server)).unwrap();
    assert_eq!(generator.generate(&targets()).await.unwrap(), "Zk3");
}

#[tokio::test]
async fn generator_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/links"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let generator = ReqwestLinkGenerator::new(&settings_for(&server)).unwrap();
    let err = generator.generate(&targets()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn generator_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/links"))
        .respond_with(ResponseTemplate::new(201).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let generator = ReqwestLinkGenerator::new(&settings_for(&server)).unwrap();
    let err = generator.generate(&targets()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn generator_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/links"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"short_code": "late"})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let generator = ReqwestLinkGenerator::new(&settings).unwrap();
    let err = generator.generate(&targets()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn generator_reports_invalid_endpoint() {
    let settings = ClientSettings {
        generate_endpoint: "not a url".to_string(),
        ..ClientSettings::default()
    };
    let generator = ReqwestLinkGenerator::new(&settings).unwrap();
    let err = generator.generate(&targets()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[tokio::test]
async fn waitlist_sends_trimmed_email_and_maps_created() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/waitlist"))
        .and(body_json(json!({"email": "a@b.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestWaitlistClient::new(&settings_for(&server)).unwrap();
    assert_eq!(client.join(" a@b.com ").await, Ok(SignupReceipt::Created));
}

#[tokio::test]
async fn waitlist_conflict_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/waitlist"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let client = ReqwestWaitlistClient::new(&settings_for(&server)).unwrap();
    assert_eq!(client.join("a@b.com").await, Ok(SignupReceipt::AlreadyListed));
    assert_eq!(client.join("a@b.com").await, Ok(SignupReceipt::AlreadyListed));
}

#[tokio::test]
async fn waitlist_rejection_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/waitlist"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid email"})))
        .mount(&server)
        .await;

    let client = ReqwestWaitlistClient::new(&settings_for(&server)).unwrap();
    let err = client.join("a@b.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
}
