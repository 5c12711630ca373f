#![allow(clippy::unwrap_used)]
// Container behaviour against a mocked backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use besthub_api::ApiClient;
use besthub_core::view::Selection;
use besthub_core::{
    CoreError, EntityId, ErrorKind, Money, Network, OrderStatus, PurchaseRequest, Role,
    SessionStore, Store, SystemSettings, User, UserStatus,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Store) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let api = ApiClient::with_client(reqwest::Client::new(), base_url);
    let store = Store::new(Arc::new(api), SessionStore::in_memory());
    (server, store)
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "success": false, "message": message }))
}

fn admin() -> User {
    User {
        id: EntityId::new("admin-1"),
        user_name: "Kwame".into(),
        email: "kwame@example.com".into(),
        phone: None,
        role: Role::Admin,
        status: UserStatus::Active,
        wallet_balance: None,
        created_at: None,
    }
}

async fn mount_users(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ok(json!([
            { "_id": "admin-1", "userName": "Kwame", "email": "kwame@example.com", "role": "admin" },
            { "_id": "u-2", "userName": "Ama", "email": "ama@example.com", "role": "customer" },
            { "_id": "u-3", "userName": "Esi", "email": "esi@example.com", "role": "agent", "status": "pending" },
        ])))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

async fn mount_mtn_orders(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/mtn"))
        .respond_with(ok(json!([
            { "_id": "o1", "packageName": "MTN 1GB", "phoneNumber": "0241234567", "amount": 6, "status": "pending" },
            { "_id": "o2", "packageName": "MTN 2GB", "phoneNumber": "0247654321", "amount": 11, "status": "processing" },
            { "_id": "o3", "packageName": "MTN 5GB", "phoneNumber": "0245550000", "amount": 25, "status": "pending" },
        ])))
        .mount(server)
        .await;
}

// ── Fetch semantics ─────────────────────────────────────────────────

#[tokio::test]
async fn test_failed_fetch_keeps_previous_entities() {
    let (server, store) = setup().await;
    mount_users(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(failure(500, "database unavailable"))
        .mount(&server)
        .await;

    let users = store.admin_users();
    assert_eq!(users.fetch_all().await.unwrap().len(), 3);

    let err = users.fetch_all().await.unwrap_err();
    assert!(matches!(err, CoreError::Http { status: 500, .. }));

    let state = users.state();
    assert_eq!(state.data.len(), 3);
    assert!(!state.loading);
    assert_eq!(state.error.as_ref().unwrap().kind, ErrorKind::Http);

    users.clear_error();
    assert!(users.state().error.is_none());
}

#[tokio::test]
async fn test_repeated_fetch_yields_identical_state() {
    let (server, store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ok(json!([
            { "_id": "admin-1", "userName": "Kwame", "email": "kwame@example.com", "role": "admin" },
            { "_id": "u-2", "userName": "Ama", "email": "ama@example.com", "phone": "0241234567", "role": "customer" },
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let users = store.admin_users();
    users.fetch_all().await.unwrap();
    let first = users.state();
    users.fetch_all().await.unwrap();
    let second = users.state();

    assert_eq!(*first.data, *second.data);
    assert_eq!(second.data.len(), 2);
    assert!(second.error.is_none());
    assert!(second.provisional.is_empty());
    assert!(!second.loading);
}

#[tokio::test]
async fn test_role_update_is_provisional_until_next_fetch() {
    let (server, store) = setup().await;
    mount_users(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/users/u-2/role"))
        .and(body_json(json!({ "role": "agent" })))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    let users = store.admin_users();
    users.fetch_all().await.unwrap();
    users.update_role(&EntityId::new("u-2"), Role::Agent).await.unwrap();

    let state = users.state();
    let ama = state.data.iter().find(|u| u.id.as_str() == "u-2").unwrap();
    assert_eq!(ama.role, Role::Agent);
    assert!(state.is_provisional(&ama.id));
    assert!(!state.updating);

    // The next listing is authoritative and clears the mark.
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ok(json!([
            { "_id": "u-2", "userName": "Ama", "email": "ama@example.com", "role": "agent" },
        ])))
        .mount(&server)
        .await;
    users.fetch_all().await.unwrap();
    assert!(users.state().provisional.is_empty());
}

// ── Deleting users ──────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_user_removes_row_on_success() {
    let (server, store) = setup().await;
    mount_users(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/u-2"))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    let users = store.admin_users();
    users.fetch_all().await.unwrap();
    users.delete_user(&EntityId::new("u-2"), &admin()).await.unwrap();

    let ids: Vec<_> = users
        .state()
        .data
        .iter()
        .map(|u| u.id.to_string())
        .collect();
    assert_eq!(ids, ["admin-1", "u-3"]);
}

#[tokio::test]
async fn test_failed_delete_leaves_list_unchanged() {
    let (server, store) = setup().await;
    mount_users(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/u-3"))
        .respond_with(failure(500, "cannot delete"))
        .mount(&server)
        .await;

    let users = store.admin_users();
    users.fetch_all().await.unwrap();
    let result = users.delete_user(&EntityId::new("u-3"), &admin()).await;

    assert!(result.is_err());
    let state = users.state();
    assert_eq!(state.data.len(), 3);
    assert!(state.error.is_some());
}

#[tokio::test]
async fn test_self_and_admin_deletion_refused_without_a_request() {
    let (server, store) = setup().await;
    mount_users(&server).await;
    Mock::given(method("DELETE"))
        .respond_with(ok(json!(null)))
        .expect(0)
        .mount(&server)
        .await;

    let users = store.admin_users();
    users.fetch_all().await.unwrap();

    let own = users.delete_user(&EntityId::new("admin-1"), &admin()).await;
    assert!(matches!(own, Err(CoreError::Validation { .. })));

    let customer = User {
        role: Role::Customer,
        ..admin()
    };
    let not_admin = users.delete_user(&EntityId::new("u-2"), &customer).await;
    assert!(matches!(not_admin, Err(CoreError::Forbidden { .. })));

    let missing = users.delete_user(&EntityId::new("ghost"), &admin()).await;
    assert!(matches!(missing, Err(CoreError::NotFound { .. })));
}

// ── Admin orders ────────────────────────────────────────────────────

#[tokio::test]
async fn test_bulk_update_with_empty_selection_makes_no_call() {
    let (server, store) = setup().await;
    Mock::given(method("PATCH"))
        .respond_with(ok(json!(null)))
        .expect(0)
        .mount(&server)
        .await;

    let mut selection = Selection::new();
    let result = store
        .admin_orders(Network::Mtn)
        .bulk_update_status(&mut selection, OrderStatus::Completed)
        .await;

    assert!(matches!(result, Err(CoreError::Validation { .. })));
    let state = store.admin_orders(Network::Mtn).state();
    assert_eq!(state.error.unwrap().kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_bulk_update_patches_selected_orders_and_clears_selection() {
    let (server, store) = setup().await;
    mount_mtn_orders(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/orders/mtn/bulk-status"))
        .and(body_json(json!({ "orderIds": ["o1", "o3"], "status": "completed" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "updatedCount": 2 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let orders = store.admin_orders(Network::Mtn);
    orders.fetch_all().await.unwrap();

    let mut selection = Selection::new();
    selection.insert(EntityId::new("o3"));
    selection.insert(EntityId::new("o1"));
    let updated = orders
        .bulk_update_status(&mut selection, OrderStatus::Completed)
        .await
        .unwrap();

    assert_eq!(updated, Some(2));
    assert!(selection.is_empty());
    let state = orders.state();
    let statuses: Vec<_> = state.data.iter().map(|o| o.status).collect();
    assert_eq!(
        statuses,
        [
            OrderStatus::Completed,
            OrderStatus::Processing,
            OrderStatus::Completed
        ]
    );
    assert!(state.is_provisional(&EntityId::new("o1")));
    assert!(!state.is_provisional(&EntityId::new("o2")));
}

#[tokio::test]
async fn test_failed_bulk_update_keeps_selection_and_statuses() {
    let (server, store) = setup().await;
    mount_mtn_orders(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/orders/mtn/bulk-status"))
        .respond_with(failure(400, "Invalid status transition"))
        .mount(&server)
        .await;

    let orders = store.admin_orders(Network::Mtn);
    orders.fetch_all().await.unwrap();
    let mut selection: Selection = [EntityId::new("o2")].into_iter().collect();

    let result = orders
        .bulk_update_status(&mut selection, OrderStatus::Failed)
        .await;

    assert!(result.is_err());
    assert_eq!(selection.len(), 1);
    assert_eq!(orders.state().data[1].status, OrderStatus::Processing);
}

// ── Wallet ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_top_up_sends_minor_units_and_verify_sets_backend_balance() {
    let (server, store) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/shop/wallet/topup"))
        .and(body_json(json!({ "amount": 5000, "email": "ama@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "authorizationURL": "https://checkout.example.com/abc",
            "reference": "ref-123",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/shop/wallet/verify-topup"))
        .and(body_json(json!({ "reference": "ref-123" })))
        .respond_with(ok(json!({
            "newBalance": 125.5,
            "transaction": { "_id": "t-9", "type": "topup", "amount": 50, "status": "completed" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let wallet = store.wallet();
    let session = wallet
        .top_up(Money::from_major(50), "ama@example.com")
        .await
        .unwrap();
    assert_eq!(session.authorization_url, "https://checkout.example.com/abc");
    assert_eq!(store.session().pending_topup().as_deref(), Some("ref-123"));

    let receipt = wallet.verify_top_up("ref-123").await.unwrap();
    assert_eq!(receipt.new_balance, Money::from_minor(12_550));
    assert_eq!(*wallet.balance_state().data, Money::from_minor(12_550));
    assert!(store.session().pending_topup().is_none());
    assert_eq!(wallet.transactions_state().data.len(), 1);
}

#[tokio::test]
async fn test_missing_wallet_reads_as_zero_balance() {
    let (server, store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/shop/wallet/balance/u-1"))
        .respond_with(failure(404, "Wallet not found"))
        .mount(&server)
        .await;

    let balance = store.wallet().fetch_balance(&EntityId::new("u-1")).await.unwrap();
    assert_eq!(balance, Money::ZERO);
    assert!(store.wallet().balance_state().error.is_none());
}

// ── Shop orders ─────────────────────────────────────────────────────

fn purchase() -> PurchaseRequest {
    PurchaseRequest {
        bundle_id: EntityId::new("b-1"),
        package_name: "MTN 1GB".into(),
        network: Network::Mtn,
        recipient: "0241234567".into(),
        amount: Money::from_minor(650),
        user_id: EntityId::new("u-1"),
        email: Some("ama@example.com".into()),
    }
}

#[tokio::test]
async fn test_wallet_purchase_refreshes_balance() {
    let (server, store) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/shop/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "order": { "_id": "o-77", "packageName": "MTN 1GB", "phoneNumber": "0241234567", "amount": 6.5, "status": "pending" },
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/shop/wallet/balance/u-1"))
        .respond_with(ok(json!({ "balance": 93.5 })))
        .expect(1)
        .mount(&server)
        .await;

    let order = store.shop_orders().purchase(&purchase()).await.unwrap().unwrap();
    assert_eq!(order.id.as_str(), "o-77");
    assert_eq!(store.shop_orders().state().data[0].id.as_str(), "o-77");
    assert_eq!(*store.wallet().balance_state().data, Money::from_minor(9_350));
}

#[tokio::test]
async fn test_rejected_purchase_surfaces_backend_message() {
    let (server, store) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/shop/orders"))
        .respond_with(failure(400, "Insufficient balance"))
        .mount(&server)
        .await;

    let err = store.shop_orders().purchase(&purchase()).await.unwrap_err();
    assert!(err.to_string().contains("Insufficient balance"));
    assert!(store.shop_orders().state().data.is_empty());
}

#[tokio::test]
async fn test_card_checkout_then_capture_uses_stored_order_id() {
    let (server, store) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/shop/orders/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "authorizationURL": "https://checkout.example.com/card",
            "orderId": "ord-9",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/shop/orders/capture"))
        .and(body_json(json!({ "reference": "ps_ref", "orderId": "ord-9" })))
        .respond_with(ok(json!({ "_id": "ord-9", "status": "processing", "amount": 6.5 })))
        .expect(1)
        .mount(&server)
        .await;

    let orders = store.shop_orders();
    let checkout = orders.create_card_order(&purchase()).await.unwrap();
    assert_eq!(checkout.order_id, Some(EntityId::new("ord-9")));
    assert_eq!(store.session().current_order(), Some(EntityId::new("ord-9")));

    let captured = orders.capture_payment("ps_ref").await.unwrap().unwrap();
    assert_eq!(captured.status, OrderStatus::Processing);
    assert!(store.session().current_order().is_none());
}

#[tokio::test]
async fn test_capture_without_checkout_is_refused() {
    let (_server, store) = setup().await;
    let err = store.shop_orders().capture_payment("ps_ref").await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "orderId"));
}

// ── Settings ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_settings_are_not_sent() {
    let (server, store) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/settings"))
        .respond_with(ok(json!(null)))
        .expect(0)
        .mount(&server)
        .await;

    let settings = SystemSettings {
        min_topup_amount: Money::from_major(100),
        max_topup_amount: Money::from_major(50),
        ..SystemSettings::default()
    };
    let err = store.admin_settings().save(settings).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "maxTopupAmount"));
}

#[tokio::test]
async fn test_saved_settings_keep_submission_without_echo() {
    let (server, store) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/settings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Saved" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = SystemSettings::default();
    settings.maintenance_mode = true;
    settings.set_available(Network::Telecel, false);
    let stored = store.admin_settings().save(settings.clone()).await.unwrap();

    assert_eq!(stored, settings);
    assert_eq!(*store.admin_settings().state().data, settings);
}

// ── Access gate ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_require_role_checks_session_then_role() {
    let (server, store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": { "_id": "u-2", "userName": "Ama", "email": "ama@example.com", "role": "agent" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = store.require_role(Role::Customer).await.unwrap();
    assert_eq!(user.role, Role::Agent);
    // Cached now; no second check-auth call.
    assert!(store.require_role(Role::Agent).await.is_ok());
    let err = store.require_role(Role::Admin).await.unwrap_err();
    assert!(matches!(err, CoreError::Forbidden { .. }));
}

#[tokio::test]
async fn test_require_role_without_session_is_expired() {
    let (server, store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/check-auth"))
        .respond_with(failure(401, "Unauthorised user!"))
        .mount(&server)
        .await;

    let err = store.require_role(Role::Customer).await.unwrap_err();
    assert!(err.is_session_expired());
    assert!(store.auth().current_user().is_none());
}

#[tokio::test]
async fn test_login_then_logout_clears_local_state() {
    let (server, store) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ama@example.com", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": { "_id": "u-2", "userName": "Ama", "email": "ama@example.com", "role": "customer" },
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(failure(500, "boom"))
        .mount(&server)
        .await;

    let auth = store.auth();
    let user = auth
        .login("ama@example.com", &SecretString::from("s3cret"))
        .await
        .unwrap();
    assert_eq!(user.user_name, "Ama");
    assert!(auth.current_user().is_some());

    assert!(auth.logout().await.is_err());
    assert!(auth.current_user().is_none());
}
