//! Client behavior against a scripted transport.

use atelier_auth::{AuthStore, AuthToken, LoginRequest, Role, User};
use atelier_cache::MemoryStore;
use atelier_commerce::catalog::{ProductQuery, ProductSort};
use atelier_commerce::forms::{FormPart, ProductForm, ProductUpdate};
use atelier_commerce::ids::{OrderId, ProductId};
use atelier_commerce::order::OrderStatus;
use atelier_data::mock::MockTransport;
use atelier_data::{Anonymous, ApiClient, ApiError, Body, Credentials, Method};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn product_json(id: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": "Linen Tee",
        "description": "Light",
        "price": 25,
        "stock": 5,
        "category": "Tops",
        "sizeOptions": ["S", "M"],
        "colorOptions": [],
        "images": [],
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

fn order_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "orderNumber": "ORD-1",
        "items": [],
        "totalAmount": 50,
        "status": status,
        "shippingAddress": {
            "name": "Ada", "phone": "555", "address": "1 Main",
            "city": "Austin", "state": "TX", "postalCode": "73301"
        },
        "paymentMethod": "cod",
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

fn signed_in() -> Arc<Mutex<AuthStore<MemoryStore>>> {
    let mut store = AuthStore::hydrate(MemoryStore::new());
    store.login(
        User::new("u1", "Ada", "ada@example.com", Role::Customer),
        AuthToken::new("tok-1"),
    );
    Arc::new(Mutex::new(store))
}

#[tokio::test]
async fn test_list_products_sends_query() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/products",
        200,
        json!({
            "success": true,
            "message": "ok",
            "data": [product_json("p1")],
            "pagination": {"page": 2, "limit": 12, "total": 13, "totalPages": 2}
        }),
    );
    let client = ApiClient::new(mock.clone(), Arc::new(Anonymous));

    let query = ProductQuery::new()
        .with_search("linen")
        .with_sort(ProductSort::PriceLow)
        .with_pagination(2, 12);
    let page = client.list_products(&query).await.unwrap();

    assert_eq!(page.data[0].id, ProductId::new("p1"));
    assert_eq!(page.pagination.page, 2);

    let request = mock.last_request().unwrap();
    assert_eq!(request.query_param("search"), Some("linen"));
    assert_eq!(request.query_param("sortBy"), Some("price"));
    assert_eq!(request.query_param("sortOrder"), Some("asc"));
    assert_eq!(request.header("Authorization"), None);
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/orders/my-orders",
        200,
        json!({"success": true, "message": "", "data": [order_json("o1", "pending")]}),
    );
    let client = ApiClient::new(mock.clone(), signed_in());

    let orders = client.my_orders().await.unwrap();
    assert_eq!(orders[0].status, OrderStatus::Pending);
    assert_eq!(
        mock.last_request().unwrap().header("authorization"),
        Some("Bearer tok-1")
    );
}

#[tokio::test]
async fn test_unauthorized_clears_token_and_picks_customer_login() {
    let mock = MockTransport::new();
    mock.respond(Method::Get, "/auth/me", 401, json!({"success": false, "message": ""}));
    let auth = signed_in();
    let client = ApiClient::new(mock, auth.clone());
    client.set_location("/orders");

    let err = client.me().await.unwrap_err();
    assert_eq!(err.login_path(), Some("/login"));
    assert!(auth.token().is_none());
}

#[tokio::test]
async fn test_unauthorized_under_admin_picks_admin_login() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Delete,
        "/products/p1",
        401,
        json!({"success": false, "message": "Token expired"}),
    );
    let auth = signed_in();
    let client = ApiClient::new(mock, auth.clone());
    client.set_location("/admin/products");

    let err = client.delete_product(&ProductId::new("p1")).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            login_path: "/admin/login".to_string(),
            message: "Token expired".to_string(),
        }
    );
    assert_eq!(err.user_message(), "Token expired");
    assert!(auth.token().is_none());
}

#[tokio::test]
async fn test_validation_errors_decoded() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Post,
        "/auth/login",
        400,
        json!({
            "success": false,
            "message": "Validation failed",
            "errors": [{"field": "email", "message": "Email is invalid"}]
        }),
    );
    let client = ApiClient::new(mock, Arc::new(Anonymous));

    let request = LoginRequest {
        email: "nope".into(),
        password: "pw".into(),
    };
    match client.login(&request).await {
        Err(ApiError::Validation { message, errors }) => {
            assert_eq!(message, "Validation failed");
            assert_eq!(errors[0].field, "email");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_and_server_errors() {
    let mock = MockTransport::new();
    mock.respond(Method::Get, "/orders/o9", 404, json!({"success": false, "message": "Order not found"}));
    mock.respond(Method::Get, "/products/categories", 500, json!({}));
    let client = ApiClient::new(mock, Arc::new(Anonymous));

    let err = client.get_order(&OrderId::new("o9")).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Order not found");

    let err = client.categories().await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 500, .. }));
}

#[tokio::test]
async fn test_unscripted_request_is_network_error() {
    let client = ApiClient::new(MockTransport::new(), Arc::new(Anonymous));
    let err = client.categories().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message(), "Unable to reach the server. Check your connection.");
}

#[tokio::test]
async fn test_cancel_order_returns_confirmed_copy() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Put,
        "/orders/o1/cancel",
        200,
        json!({"success": true, "message": "Order cancelled", "data": order_json("o1", "cancelled")}),
    );
    let client = ApiClient::new(mock, signed_in());
    let order = client.cancel_order(&OrderId::new("o1")).await.unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn test_create_product_sends_multipart() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Post,
        "/products",
        201,
        json!({"success": true, "message": "Created", "data": product_json("p2")}),
    );
    let client = ApiClient::new(mock.clone(), signed_in());

    let mut form = ProductForm::new();
    form.apply(ProductUpdate::Title("Linen Tee".into()));
    form.apply(ProductUpdate::Description("Light".into()));
    form.apply(ProductUpdate::Price("25".into()));
    form.apply(ProductUpdate::Stock("5".into()));
    form.apply(ProductUpdate::Category("Tops".into()));
    let product = client.create_product(&form).await.unwrap();
    assert_eq!(product.id.as_str(), "p2");

    match mock.last_request().unwrap().body {
        Body::Multipart(parts) => assert!(parts.contains(&FormPart::Text {
            name: "price",
            value: "25.00".to_string()
        })),
        other => panic!("expected multipart body, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_product_form_never_sent() {
    let mock = MockTransport::new();
    let client = ApiClient::new(mock.clone(), signed_in());
    let err = client.create_product(&ProductForm::new()).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_envelope_success_false_is_error() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/auth/me",
        200,
        json!({"success": false, "message": "Account disabled"}),
    );
    let client = ApiClient::new(mock, signed_in());
    let err = client.me().await.unwrap_err();
    assert_eq!(err.user_message(), "Account disabled");
}
