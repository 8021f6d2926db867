mod common;

#[tokio::test]
async fn test_health_reports_ok() {
    let (state, repo) = common::create_test_state();
    common::create_test_link(&repo, "hlth01", "https://example.com/h").await;
    let server = common::test_server(state);

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "OK");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["links"], 1);
    assert_eq!(json["storage"], "memory only");
    assert!(json["timestamp"].is_string());
    assert!(json["uptimeSeconds"].is_u64());
}
