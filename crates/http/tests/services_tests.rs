//! Paths, verbs and parameter shapes of the resource services

mod common;

use common::{client_with_token, fresh_token};
use serde_json::json;
use tinyyummy_core::{Role, StorageArea, StorageKey};
use tinyyummy_http::services::{
    BlogService, CartService, ComplaintService, DiscountService, MealSetService, OrderService,
    ProductService, ShippingService, UserService, WishlistService,
};
use tinyyummy_http::types::{Page, ProductQuery, ShippingFeeRequest};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn test_cart_and_wishlist() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cart"))
        .and(body_json(json!({"productId": "p-1", "quantity": 2})))
        .respond_with(ok(json!({"items": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/cart/item-7"))
        .and(body_json(json!({"quantity": 5})))
        .respond_with(ok(json!({"items": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/wishlist/p-1"))
        .respond_with(ok(json!({"removed": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, Some(&fresh_token("user-1")), true);
    let cart = CartService::new(client.clone());
    cart.add_item("p-1", 2).await.unwrap();
    cart.update_item("item-7", 5).await.unwrap();

    let removed = WishlistService::new(client).remove("p-1").await.unwrap();
    assert_eq!(removed["removed"], json!(true));
}

#[tokio::test]
async fn test_product_listing_sends_page_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "12"))
        .and(query_param("categoryId", "baby-food"))
        .and(query_param("search", "rice"))
        .respond_with(ok(json!({"products": [], "total": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, None, false);
    let query = ProductQuery {
        search: Some("rice".into()),
        category_id: Some("baby-food".into()),
        ..Default::default()
    };
    let response = ProductService::new(client)
        .list(Page::new(2, 12), &query)
        .await
        .unwrap();
    assert_eq!(response["total"], json!(0));
}

#[tokio::test]
async fn test_review_marks_session_as_reviewed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products/p-1/reviews"))
        .and(body_json(json!({"rating": 5, "comment": "Con thích lắm"})))
        .respond_with(ok(json!({"id": "r-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, Some(&fresh_token("user-1")), true);
    let store = client.store().clone();
    ProductService::new(client)
        .add_review("p-1", &json!({"rating": 5, "comment": "Con thích lắm"}))
        .await
        .unwrap();

    assert_eq!(
        store.read_area(StorageArea::Session, StorageKey::HasReviewed).as_deref(),
        Some("true")
    );
}

#[tokio::test]
async fn test_payment_return_is_forwarded_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/payment-return"))
        .and(query_param("vnp_Amount", "15000000"))
        .and(query_param("vnp_ResponseCode", "00"))
        .and(query_param("vnp_OrderInfo", "Order ORD-42"))
        .respond_with(ok(json!({"status": "paid"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, Some(&fresh_token("user-1")), true);
    let response = OrderService::new(client)
        .confirm_payment("?vnp_Amount=15000000&vnp_ResponseCode=00&vnp_OrderInfo=Order%20ORD-42")
        .await
        .unwrap();
    assert_eq!(response["status"], json!("paid"));
}

#[tokio::test]
async fn test_order_admin_calls() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/orders/ORD-42/status"))
        .and(body_json(json!({"status": "shipping"})))
        .respond_with(ok(json!({"status": "shipping"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/orders/ORD-43/cancel"))
        .respond_with(ok(json!({"status": "cancelled"})))
        .expect(1)
        .mount(&server)
        .await;

    let orders = OrderService::new(client_with_token(&server, Some(&fresh_token("admin")), true));
    orders.update_status("ORD-42", "shipping").await.unwrap();
    let cancelled = orders.cancel("ORD-43").await.unwrap();
    assert_eq!(cancelled["status"], json!("cancelled"));
}

#[tokio::test]
async fn test_back_office_crud_paths() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/blogs/b-1"))
        .and(body_json(json!({"title": "Ăn dặm"})))
        .respond_with(ok(json!({"id": "b-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/meal-sets/m-3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/users/u-5/role"))
        .and(body_json(json!({"role": "admin"})))
        .respond_with(ok(json!({"id": "u-5", "role": "admin"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/complaints/c-2"))
        .and(body_json(json!({"status": "resolved"})))
        .respond_with(ok(json!({"id": "c-2"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, Some(&fresh_token("admin")), true);
    BlogService::new(client.clone())
        .update("b-1", &json!({"title": "Ăn dặm"}))
        .await
        .unwrap();
    let deleted = MealSetService::new(client.clone()).delete("m-3").await.unwrap();
    assert!(deleted.is_null());
    UserService::new(client.clone())
        .set_role("u-5", Role::Admin)
        .await
        .unwrap();
    ComplaintService::new(client)
        .update_status("c-2", "resolved")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_profile_uses_me_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ok(json!({"email": "a@b.com"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, Some(&fresh_token("user-1")), false);
    let profile = UserService::new(client).profile().await.unwrap();
    assert_eq!(profile["email"], json!("a@b.com"));
}

#[tokio::test]
async fn test_discount_and_shipping() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/discounts/apply"))
        .and(body_json(json!({"code": "BABY10", "orderTotal": 250000})))
        .respond_with(ok(json!({"discount": 25000})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/shipping/districts"))
        .and(query_param("provinceId", "202"))
        .respond_with(ok(json!([{"DistrictID": 1442}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/shipping/fee"))
        .and(body_json(json!({
            "toDistrictId": 1442,
            "toWardCode": "20109",
            "weight": 1200
        })))
        .respond_with(ok(json!({"total": 32000})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, Some(&fresh_token("user-1")), true);
    let discount = DiscountService::new(client.clone())
        .apply("BABY10", 250_000)
        .await
        .unwrap();
    assert_eq!(discount["discount"], json!(25000));

    let shipping = ShippingService::new(client);
    shipping.districts(202).await.unwrap();
    let fee = shipping
        .fee(&ShippingFeeRequest {
            to_district_id: 1442,
            to_ward_code: "20109".into(),
            weight: 1200,
            insurance_value: None,
        })
        .await
        .unwrap();
    assert_eq!(fee["total"], json!(32000));
}
