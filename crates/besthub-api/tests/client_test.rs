#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use besthub_api::models::OrderBody;
use besthub_api::{ApiClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn order_body() -> OrderBody {
    OrderBody {
        package_id: "pkg-1".into(),
        package_name: "MTN 1GB".into(),
        phone_number: "0241234567".into(),
        user_id: "u-1".into(),
        network: "mtn".into(),
        amount: json!(6.5),
        email: None,
    }
}

// ── Envelope & errors ───────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_auth_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shop/wallet/balance/u-1"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "success": false, "message": "Unauthorised user!" })),
        )
        .mount(&server)
        .await;

    let result = client.wallet_balance("u-1").await;
    match result {
        Err(Error::AuthExpired { message }) => assert_eq!(message, "Unauthorised user!"),
        other => panic!("expected AuthExpired, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_forbidden_is_distinct_from_expiry() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let result = client.list_users().await;
    assert!(
        matches!(result, Err(Error::Forbidden { .. })),
        "expected Forbidden, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_uses_envelope_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "success": false, "message": "Database unavailable" })),
        )
        .mount(&server)
        .await;

    let err = client.dashboard().await.unwrap_err();
    match err {
        Error::Http { status, ref message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Database unavailable");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_success_false_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/shop/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "Insufficient balance" })),
        )
        .mount(&server)
        .await;

    let result = client.place_order(&order_body()).await;
    assert!(
        matches!(result, Err(Error::Rejected { ref message }) if message == "Insufficient balance"),
        "expected Rejected, got: {result:?}"
    );
}

#[tokio::test]
async fn test_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = client.settings().await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("gateway")),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_returns_user_beside_data() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ama@example.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Logged in successfully",
            "user": { "id": "u-1", "userName": "Ama", "email": "ama@example.com", "role": "agent" }
        })))
        .mount(&server)
        .await;

    let secret = SecretString::from("secret".to_string());
    let outcome = client.login("ama@example.com", &secret).await.unwrap();
    let user = outcome.user.unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.user_name, "Ama");
    assert_eq!(user.role.as_deref(), Some("agent"));
}

#[tokio::test]
async fn test_session_cookie_is_replayed() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::new(base_url, &TransportConfig::default()).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "token=abc123; Path=/; HttpOnly")
                .set_body_json(json!({ "success": true, "user": { "id": "u-1" } })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/check-auth"))
        .and(header("cookie", "token=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": { "id": "u-1", "userName": "Ama" }
        })))
        .mount(&server)
        .await;

    let secret = SecretString::from("pw".to_string());
    client.login("ama@example.com", &secret).await.unwrap();
    assert_eq!(client.cookie_header().as_deref(), Some("token=abc123"));

    let user = client.check_auth().await.unwrap().unwrap();
    assert_eq!(user.user_name, "Ama");
}

#[tokio::test]
async fn test_bearer_token_is_attached_when_configured() {
    let (server, client) = setup().await;
    client.set_bearer_token(SecretString::from("legacy-token".to_string()));

    Mock::given(method("GET"))
        .and(path("/api/auth/check-auth"))
        .and(header("authorization", "Bearer legacy-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": { "_id": "u-9" }
        })))
        .mount(&server)
        .await;

    let user = client.check_auth().await.unwrap().unwrap();
    assert_eq!(user.id, "u-9");
}

// ── Shop ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_top_up_sends_minor_units() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/shop/wallet/topup"))
        .and(body_json(json!({ "amount": 5000, "email": "ama@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "authorizationURL": "https://checkout.paystack.com/xyz",
            "reference": "ref-1"
        })))
        .mount(&server)
        .await;

    let init = client.top_up(5000, "ama@example.com").await.unwrap();
    assert_eq!(init.authorization_url, "https://checkout.paystack.com/xyz");
    assert_eq!(init.reference.as_deref(), Some("ref-1"));
}

#[tokio::test]
async fn test_verify_top_up_reads_new_balance() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/shop/wallet/verify-topup"))
        .and(body_json(json!({ "reference": "ref-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "newBalance": 75.5,
                "transaction": { "_id": "t-1", "type": "topup", "amount": 50 }
            }
        })))
        .mount(&server)
        .await;

    let verified = client.verify_top_up("ref-1").await.unwrap();
    assert_eq!(verified.new_balance.as_str(), "75.5");
    assert_eq!(verified.transaction.unwrap().amount.as_str(), "50");
}

#[tokio::test]
async fn test_wallet_balance_at_top_level() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shop/wallet/balance/u-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "balance": "20.00" })),
        )
        .mount(&server)
        .await;

    let balance = client.wallet_balance("u-1").await.unwrap();
    assert_eq!(balance.as_str(), "20.00");
}

#[tokio::test]
async fn test_create_order_returns_redirect_and_order_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/shop/orders/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "authorizationURL": "https://checkout.paystack.com/abc",
            "orderId": "o-77"
        })))
        .mount(&server)
        .await;

    let session = client.create_order(&order_body()).await.unwrap();
    assert_eq!(session.authorization_url, "https://checkout.paystack.com/abc");
    assert_eq!(session.order_id.as_deref(), Some("o-77"));
}

#[tokio::test]
async fn test_path_parameters_are_encoded() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shop/orders/user/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .mount(&server)
        .await;

    let orders = client.list_user_orders("a/b").await.unwrap();
    assert!(orders.is_empty());
}

// ── Admin ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_bulk_status_sends_ids_and_reads_count() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/orders/telecel/bulk-status"))
        .and(body_json(json!({ "orderIds": ["o1", "o2"], "status": "completed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "updatedCount": 2 }
        })))
        .mount(&server)
        .await;

    let count = client
        .set_order_status_bulk("telecel", &["o1", "o2"], "completed")
        .await
        .unwrap();
    assert_eq!(count, Some(2));
}

#[tokio::test]
async fn test_adjust_wallet_returns_stored_wallet() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/wallets/adjust-balance"))
        .and(body_json(json!({
            "userId": "u-1",
            "amount": -5.0,
            "description": "Admin adjustment"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "wallet": { "userId": "u-1", "balance": 15 } }
        })))
        .mount(&server)
        .await;

    let wallet = client
        .adjust_wallet("u-1", &json!(-5.0), "Admin adjustment")
        .await
        .unwrap();
    assert_eq!(wallet.user_id, "u-1");
    assert_eq!(wallet.balance.as_str(), "15");
}

#[tokio::test]
async fn test_price_book_is_keyed_by_network_and_role() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/prices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "MTN": {
                    "customer": [{ "_id": "p1", "dataAmount": "1GB", "price": 6 }],
                    "agent": []
                },
                "AT": { "wholesaler": [{ "_id": "p2", "dataAmount": "5GB", "price": "25.5" }] }
            }
        })))
        .mount(&server)
        .await;

    let book = client.price_book().await.unwrap();
    assert_eq!(book["MTN"]["customer"].len(), 1);
    assert!(book["MTN"]["agent"].is_empty());
    assert_eq!(book["AT"]["wholesaler"][0].price.as_str(), "25.5");
}

#[tokio::test]
async fn test_restored_cookie_is_sent() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::new(base_url, &TransportConfig::default()).unwrap();
    client.restore_cookies("token=persisted");

    Mock::given(method("GET"))
        .and(path("/api/auth/check-auth"))
        .and(header("cookie", "token=persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": { "id": "u-5" }
        })))
        .mount(&server)
        .await;

    let user = client.check_auth().await.unwrap().unwrap();
    assert_eq!(user.id, "u-5");
}
