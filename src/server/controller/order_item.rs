use actix_web::{get, patch, post, web, HttpRequest, Responder};
use validator::Validate;
use crate::server::controller::error::CustomError;
use crate::server::controller::page_of;
use crate::server::model::order_item::{OrderItem, PlaceOrderRequest, PlaceOrderResponse, UpdateOrderItemRequest};
use crate::server::model::MessageResponse;
use crate::server::repository::{self, order_item as repo};
use crate::server::state::AppState;

#[get("/order-item")]
pub(super) async fn get_order_items(req: HttpRequest, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let items = repository::list::<_, OrderItem>(&*conn, page_of(&req)).await?;
    Ok(web::Json(items))
}

#[get("/order-item/order/{order_id}")]
/// items of one order with their food and table, empty when the order has none
pub(super) async fn get_order_items_by_order(order_id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let lines = repo::lines_for_order(&*conn, order_id.into_inner()).await?;
    Ok(web::Json(lines))
}

#[get("/order-item/{id}")]
pub(super) async fn get_order_item(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let item: OrderItem = repository::get(&*conn, id.into_inner()).await?;
    Ok(web::Json(item))
}

#[post("/order-item")]
/// place an order together with all of its items
pub(super) async fn place_order(body: web::Json<PlaceOrderRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let mut conn = data.write_conn().await?;
    let order_id = repo::place_order(&mut *conn, &body).await?;
    Ok(web::Json(PlaceOrderResponse {
        message: "Order placed successfully".to_string(),
        order_id,
    }))
}

#[patch("/order-item/{id}")]
pub(super) async fn update_order_item(
    id: web::Path<i64>,
    body: web::Json<UpdateOrderItemRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let conn = data.write_conn().await?;
    repo::update(&*conn, id.into_inner(), &body).await?;
    Ok(web::Json(MessageResponse::new("Order item updated successfully")))
}
