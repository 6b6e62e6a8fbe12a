//! HTTP handlers, one module per entity

pub(crate) mod error;
mod food;
mod invoice;
mod menu;
mod order;
mod order_item;
mod table;
mod user;

use actix_web::{web, HttpRequest};
use crate::server::controller::error::CustomError;
use crate::server::model::{CommonRequestParams, Page};

/// Register every route plus the body and path extractor settings.
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| CustomError::bad_request(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _| CustomError::bad_request(err.to_string()).into()),
    )
    .service(menu::get_menus)
    .service(menu::get_menu)
    .service(menu::create_menu)
    .service(menu::update_menu)
    .service(food::get_foods)
    .service(food::get_food)
    .service(food::create_food)
    .service(food::update_food)
    .service(table::get_tables)
    .service(table::get_table)
    .service(table::create_table)
    .service(table::update_table)
    .service(order::get_orders)
    .service(order::get_order)
    .service(order::create_order)
    .service(order::update_order)
    .service(order_item::get_order_items)
    .service(order_item::get_order_items_by_order)
    .service(order_item::get_order_item)
    .service(order_item::place_order)
    .service(order_item::update_order_item)
    .service(invoice::get_invoices)
    .service(invoice::get_invoice)
    .service(invoice::create_invoice)
    .service(invoice::update_invoice)
    .service(user::get_users)
    .service(user::get_user)
    .service(user::signup)
    .service(user::login)
    .service(user::update_user);
}

/// paging from the query string, malformed values fall back to defaults
fn page_of(req: &HttpRequest) -> Page {
    web::Query::<CommonRequestParams>::from_query(req.query_string())
        .map(|params| params.page())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::App;
    use serde_json::{json, Value};
    use crate::server::database::pool::Pool;
    use crate::server::state::AppState;
    use crate::server::util::credential::TokenIssuer;
    use super::*;

    fn state() -> AppState {
        AppState::new(
            Pool::new("read"),
            Pool::new("write"),
            TokenIssuer::new("secret"),
            Duration::from_millis(10),
        )
    }

    macro_rules! app {
        () => {
            actix_test::init_service(App::new().app_data(web::Data::new(state())).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn invalid_body_is_rejected_before_touching_the_pool() {
        let app = app!();
        let req = actix_test::TestRequest::post()
            .uri("/menu")
            .set_json(json!({"name": "", "category": "Mains"}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert!(body["error"].as_str().unwrap().contains("name"));
    }

    #[actix_web::test]
    async fn malformed_json_is_a_bad_request() {
        let app = app!();
        let req = actix_test::TestRequest::post()
            .uri("/table")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"number_of_guests\": ")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn empty_placement_is_a_bad_request() {
        let app = app!();
        let req = actix_test::TestRequest::post()
            .uri("/order-item")
            .set_json(json!({"table_id": 1, "order_items": []}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn placement_with_incomplete_item_is_a_bad_request() {
        let app = app!();
        let req = actix_test::TestRequest::post()
            .uri("/order-item")
            .set_json(json!({"table_id": 1, "order_items": [{"quantity": "M", "food_id": 3}]}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert!(body["error"].as_str().unwrap().contains("unit_price"));
    }

    #[actix_web::test]
    async fn non_numeric_id_is_a_bad_request() {
        let app = app!();
        let req = actix_test::TestRequest::get().uri("/menu/abc").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn exhausted_pool_reports_busy() {
        let app = app!();
        let req = actix_test::TestRequest::get().uri("/menu?page=2&recordPerPage=5").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({"error": "server is busy"}));
    }

    #[test]
    fn page_from_query_string() {
        let req = actix_test::TestRequest::get().uri("/food?page=3&recordPerPage=20").to_http_request();
        assert_eq!(page_of(&req), Page { number: 3, size: 20 });
        let req = actix_test::TestRequest::get().uri("/food?page=x").to_http_request();
        assert_eq!(page_of(&req), Page::default());
    }
}
