use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use ys_monitor::core::client::build_http_client;
use ys_monitor::core::{DiscordNotifier, Monitor, ProductId, Step, YeezySupplyClient};
use ys_monitor::Config;

const AVAILABILITY_PATH: &str = "/api/products/FX4145/availability";
const WEBHOOK_PATH: &str = "/api/webhooks/1/tok";

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::new(server.url(WEBHOOK_PATH), vec![ProductId::new("FX4145")]);
    config.api_base_url = server.url("/api");
    config.user_agent = "test-agent".to_string();
    config
}

fn monitor_with(config: &Config) -> Monitor {
    let client = YeezySupplyClient::from_config(config).unwrap();
    let notifier = DiscordNotifier::new(
        build_http_client(config).unwrap(),
        config.webhook_target().unwrap(),
        config.site_url.clone(),
    );

    Monitor::new(
        config.skus[0].clone(),
        0,
        Arc::new(client),
        Arc::new(notifier),
        config.intervals,
    )
}

fn monitor_for(server: &MockServer) -> Monitor {
    monitor_with(&config_for(server))
}

fn availability(sizes: &[(&str, u32)]) -> serde_json::Value {
    let variants: Vec<_> = sizes
        .iter()
        .map(|(size, count)| json!({ "size": size, "availability": count }))
        .collect();

    json!({ "id": "FX4145", "variation_list": variants })
}

#[tokio::test]
async fn test_restock_then_unchanged_then_sold_out() {
    let server = MockServer::start_async().await;

    let mut stock_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(AVAILABILITY_PATH);
            then.status(200).json_body(availability(&[("9", 0), ("10", 3)]));
        })
        .await;
    let metadata_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products/FX4145");
            then.status(200).json_body(json!({
                "name": "YEEZY BOOST 350 V2",
                "view_list": [],
                "pricing_information": { "standard_price": 220 },
                "attribute_list": { "color": "CREAM" }
            }));
        })
        .await;
    let webhook_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(WEBHOOK_PATH)
                .json_body_partial(r#"{"embeds":[{"title":"YEEZY BOOST 350 V2 CREAM"}]}"#);
            then.status(204);
        })
        .await;

    let mut monitor = monitor_for(&server);

    // Stock appears
    assert_eq!(monitor.poll().await, Step::Sleep(Duration::from_secs(30)));
    assert_eq!(webhook_mock.hits_async().await, 1);
    assert_eq!(metadata_mock.hits_async().await, 1);

    // Same stock again
    assert_eq!(monitor.poll().await, Step::Sleep(Duration::from_secs(30)));
    assert_eq!(webhook_mock.hits_async().await, 1);
    assert_eq!(metadata_mock.hits_async().await, 1);

    // Sold out
    stock_mock.delete_async().await;
    stock_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(AVAILABILITY_PATH);
            then.status(200).json_body(availability(&[("9", 0), ("10", 0)]));
        })
        .await;

    assert_eq!(monitor.poll().await, Step::Done);
    assert_eq!(stock_mock.hits_async().await, 1);
    assert_eq!(webhook_mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_metadata_failure_still_sends_notification() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path(AVAILABILITY_PATH);
            then.status(200).json_body(availability(&[("11", 15)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products/FX4145");
            then.status(502);
        })
        .await;
    let expected = r#"{"embeds":[{"title":"FX4145","fields":[{"name":"11","value":"15+"}]}]}"#;
    let webhook_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(WEBHOOK_PATH).json_body_partial(expected);
            then.status(204);
        })
        .await;

    let mut monitor = monitor_for(&server);

    assert_eq!(monitor.poll().await, Step::Sleep(Duration::from_secs(30)));
    webhook_mock.assert_async().await;
}

#[tokio::test]
async fn test_webhook_failure_does_not_stop_polling() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path(AVAILABILITY_PATH);
            then.status(200).json_body(availability(&[("10", 2)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products/FX4145");
            then.status(404);
        })
        .await;
    let webhook_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(WEBHOOK_PATH);
            then.status(429);
        })
        .await;

    let mut monitor = monitor_for(&server);

    assert_eq!(monitor.poll().await, Step::Sleep(Duration::from_secs(30)));
    assert_eq!(webhook_mock.hits_async().await, 1);
    assert!(monitor.state().last_snapshot.is_some());
}

#[tokio::test]
async fn test_unresponsive_remote_backs_off_as_error() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path(AVAILABILITY_PATH);
            then.status(200)
                .delay(Duration::from_secs(5))
                .json_body(availability(&[("10", 2)]));
        })
        .await;

    let mut config = config_for(&server);
    config.request_timeout_secs = 1;
    let mut monitor = monitor_with(&config);

    assert_eq!(monitor.poll().await, Step::Sleep(Duration::from_secs(10)));
    assert!(monitor.state().last_snapshot.is_none());
}
