use actix_web::{get, patch, post, web, HttpRequest, Responder};
use log::info;
use crate::server::controller::error::CustomError;
use crate::server::controller::page_of;
use crate::server::model::order::{CreateOrderRequest, CreateOrderResponse, Order, UpdateOrderRequest};
use crate::server::model::MessageResponse;
use crate::server::repository::{self, order as repo};
use crate::server::state::AppState;

#[get("/order")]
pub(super) async fn get_orders(req: HttpRequest, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let orders = repository::list::<_, Order>(&*conn, page_of(&req)).await?;
    Ok(web::Json(orders))
}

#[get("/order/{id}")]
pub(super) async fn get_order(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let order: Order = repository::get(&*conn, id.into_inner()).await?;
    Ok(web::Json(order))
}

#[post("/order")]
/// open an order without items, see `POST /order-item` for placing one with items
pub(super) async fn create_order(body: web::Json<CreateOrderRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.write_conn().await?;
    let order = repo::create(&*conn, &body).await?;
    info!("order {} created on table {}", order.id, order.table_id);
    Ok(web::Json(CreateOrderResponse {
        message: "Order created successfully".to_string(),
        order,
    }))
}

#[patch("/order/{id}")]
pub(super) async fn update_order(
    id: web::Path<i64>,
    body: web::Json<UpdateOrderRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let conn = data.write_conn().await?;
    repo::update(&*conn, id.into_inner(), &body).await?;
    Ok(web::Json(MessageResponse::new("Order updated successfully")))
}
