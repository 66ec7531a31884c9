//! End-to-end checkout against a local axum server standing in for the backend.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use artbid_client::{ClientConfig, StorefrontApi};
use artbid_core::dto::Credentials;
use artbid_core::payment::GiftCardForm;
use artbid_core::{Address, CheckoutPolicy, CheckoutStep, PaymentMethod, BID_REJECTED_MESSAGE};
use artbid_storefront::commands::{address, auth, bid, cart, catalog, order, payment};
use artbid_storefront::{CheckoutStore, ConfigState, ErrorCode, SessionState};

// =============================================================================
// Test Backend
// =============================================================================

#[derive(Clone, Default)]
struct Backend {
    orders: Arc<Mutex<Vec<Value>>>,
}

fn product(id: u32) -> Value {
    json!({
        "id": id,
        "title": format!("Work {id}"),
        "secretPrice": 500.0,
        "currency": "DKK",
        "artistFirstName": "Ida",
        "artistLastName": "Holm",
        "sold": if id == 3 { 1 } else { 0 }
    })
}

async fn get_product(axum::extract::Path(id): axum::extract::Path<u32>) -> Response {
    if (1..=3).contains(&id) {
        Json(json!({"message": "Product found", "product": product(id)})).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("Product not found with id {id}")})),
        )
            .into_response()
    }
}

async fn place_bid(Json(body): Json<Value>) -> Response {
    let amount = body["amount"].as_f64().unwrap_or(0.0);
    if amount >= 500.0 {
        Json(json!({"message": format!("Bid for product Id: {} is accepted.", body["productId"])}))
            .into_response()
    } else if amount >= 100.0 {
        (StatusCode::BAD_REQUEST, Json(json!({"message": "Bid too low. Retry agaian."})))
            .into_response()
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({}))).into_response()
    }
}

async fn place_order(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    if body["cart"].as_array().map_or(true, |c| c.is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Cart is empty"})),
        )
            .into_response();
    }
    let mut orders = backend.orders.lock().unwrap();
    orders.push(body);
    Json(json!({"success": true, "message": format!("OrderId {} placed successfully.", orders.len())}))
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret123" {
        (
            [(header::SET_COOKIE, "jwt=token-1; Path=/; HttpOnly")],
            Json(json!({"success": true, "message": "Login successful"})),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "error": "Invalid email or password"})),
        )
            .into_response()
    }
}

fn logged_in(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("jwt=token-1"))
        .unwrap_or(false)
}

async fn saved_address(headers: HeaderMap) -> Response {
    if logged_in(&headers) {
        Json(json!({"address": {
            "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com",
            "mobileNr": "12345678", "postalCode": "2800", "city": "Lyngby",
            "address1": "Anker Engelunds Vej 1", "country": "Denmark"
        }}))
        .into_response()
    } else {
        (StatusCode::FORBIDDEN, "No address found").into_response()
    }
}

async fn spawn_backend() -> (StorefrontApi, Backend) {
    let backend = Backend::default();

    let app = Router::new()
        .route("/api/products", get(|| async { Json(json!([product(1), product(2), product(3)])) }))
        .route("/api/products/{id}", get(get_product))
        .route("/api/checkout/placebid", post(place_bid))
        .route("/api/checkout/placeorder", post(place_order))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(|| async { StatusCode::OK }))
        .route(
            "/api/auth/check",
            get(|headers: HeaderMap| async move {
                if logged_in(&headers) {
                    Json(json!({"authenticated": true, "email": "ada@example.com"}))
                } else {
                    Json(json!({"authenticated": false}))
                }
            }),
        )
        .route("/api/auth/address", get(saved_address))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = StorefrontApi::new(ClientConfig::with_base_url(format!("http://{addr}/api"))).unwrap();
    (api, backend)
}

fn address_form() -> Address {
    Address {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        mobile_nr: "12345678".into(),
        postal_code: "2100".into(),
        city: "Copenhagen".into(),
        address1: "Main St 1".into(),
        ..Address::default()
    }
}

fn gift_card() -> PaymentMethod {
    PaymentMethod::GiftCard(GiftCardForm {
        gift_card_number: "GIFT2024XY".into(),
        security_code: "123".into(),
    })
}

// =============================================================================
// Full Checkout
// =============================================================================

#[tokio::test]
async fn test_full_checkout_places_order_and_resets() {
    let (api, backend) = spawn_backend().await;
    let store = CheckoutStore::new(CheckoutPolicy::Sequential);
    let config = ConfigState::default();

    let work = catalog::get_product(&api, "1").await.unwrap();
    let receipt = bid::place_bid(&api, &store, &config, &work, "600").await.unwrap();
    assert_eq!(
        receipt.message.as_deref(),
        Some("Bid for product Id: 1 is accepted.")
    );
    assert_eq!(receipt.cart.totals.formatted_total, "600.00 DKK");

    address::save_address(&store, address_form()).unwrap();
    let paid = payment::pay(&store, &gift_card()).unwrap();
    assert_eq!(cart::get_cart(&store, &config).step, CheckoutStep::HasPayment);

    let placed = order::submit_order(&api, &store, &config).await.unwrap();
    assert_eq!(placed.message, "OrderId 1 placed successfully.");
    assert_eq!(placed.line_count, 1);
    assert_eq!(placed.payment_intent_id, paid.payment_intent_id);
    assert!(store.snapshot().is_empty());

    let orders = backend.orders.lock().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["cart"][0]["productId"], 1);
    assert_eq!(orders[0]["cart"][0]["bidPrice"], 600.0);
    assert_eq!(orders[0]["address"]["city"], "Copenhagen");
    assert_eq!(
        orders[0]["paymentIntentId"],
        paid.payment_intent_id.as_str()
    );
}

#[tokio::test]
async fn test_submit_incomplete_checkout_never_reaches_backend() {
    let (api, backend) = spawn_backend().await;
    let store = CheckoutStore::default();
    let config = ConfigState::default();

    let work = catalog::get_product(&api, "2").await.unwrap();
    bid::place_bid(&api, &store, &config, &work, "700").await.unwrap();

    let err = order::submit_order(&api, &store, &config).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CheckoutIncomplete);
    assert_eq!(
        err.message,
        "Checkout is incomplete: missing address, payment intent"
    );
    assert!(backend.orders.lock().unwrap().is_empty());
    assert_eq!(store.snapshot().line_count(), 1);
}

// =============================================================================
// Bids
// =============================================================================

#[tokio::test]
async fn test_rejected_bids_leave_cart_empty() {
    let (api, _) = spawn_backend().await;
    let store = CheckoutStore::default();
    let config = ConfigState::default();
    let work = catalog::get_product(&api, "1").await.unwrap();

    let err = bid::place_bid(&api, &store, &config, &work, "200").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BidRejected);
    assert_eq!(err.message, "Bid too low. Retry agaian.");

    let err = bid::place_bid(&api, &store, &config, &work, "50").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::BidRejected);
    assert_eq!(err.message, BID_REJECTED_MESSAGE);

    let err = bid::place_bid(&api, &store, &config, &work, "0").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(
        err.fields.unwrap().get("bidAmount"),
        Some("Bid must be greater than 0")
    );

    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_sold_product_is_not_bid_on() {
    let (api, _) = spawn_backend().await;
    let store = CheckoutStore::default();
    let work = catalog::get_product(&api, "3").await.unwrap();
    assert!(work.sold);

    let err = bid::place_bid(&api, &store, &ConfigState::default(), &work, "900")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BidRejected);
}

#[tokio::test]
async fn test_duplicate_accepted_bid_keeps_one_line() {
    let (api, _) = spawn_backend().await;
    let store = CheckoutStore::default();
    let config = ConfigState::default();
    let work = catalog::get_product(&api, "1").await.unwrap();

    bid::place_bid(&api, &store, &config, &work, "600").await.unwrap();
    let second = bid::place_bid(&api, &store, &config, &work, "800").await.unwrap();

    assert_eq!(second.cart.lines.len(), 1);
    assert_eq!(second.cart.totals.total_cents, 60000);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (api, _) = spawn_backend().await;
    let err = catalog::get_product(&api, "42").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, "Product not found: 42");
}

// =============================================================================
// Auth & Saved Address
// =============================================================================

#[tokio::test]
async fn test_login_then_saved_address() {
    let (api, _) = spawn_backend().await;
    let store = CheckoutStore::default();
    let session = SessionState::new();

    let err = address::load_saved_address(&api, &store).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = auth::login(
        &api,
        &session,
        &Credentials {
            email: "ada@example.com".into(),
            password: "wrong-password".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
    assert_eq!(err.message, "Invalid email or password");

    let info = auth::login(
        &api,
        &session,
        &Credentials {
            email: "ada@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await
    .unwrap();
    assert!(info.authenticated);
    assert!(auth::check_session(&api, &session).await.unwrap().authenticated);

    let saved = address::load_saved_address(&api, &store).await.unwrap();
    assert_eq!(saved.city, "Lyngby");
    assert_eq!(store.snapshot().address(), Some(&saved));

    let info = auth::logout(&api, &session).await.unwrap();
    assert!(!info.authenticated);
    assert_eq!(store.snapshot().address(), Some(&saved));
}
