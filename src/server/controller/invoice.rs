use actix_web::{get, patch, post, web, HttpRequest, Responder};
use log::info;
use crate::server::controller::error::CustomError;
use crate::server::controller::page_of;
use crate::server::model::invoice::{CreateInvoiceRequest, CreateInvoiceResponse, Invoice, UpdateInvoiceRequest};
use crate::server::model::MessageResponse;
use crate::server::repository::{self, invoice as repo};
use crate::server::state::AppState;

#[get("/invoice")]
pub(super) async fn get_invoices(req: HttpRequest, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let invoices = repository::list::<_, Invoice>(&*conn, page_of(&req)).await?;
    Ok(web::Json(invoices))
}

#[get("/invoice/{id}")]
/// invoice with the amount due and the lines of its order
pub(super) async fn get_invoice(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let view = repo::view(&*conn, id.into_inner()).await?;
    Ok(web::Json(view))
}

#[post("/invoice")]
pub(super) async fn create_invoice(body: web::Json<CreateInvoiceRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.write_conn().await?;
    let invoice = repo::create(&*conn, &body).await?;
    info!("invoice {} created for order {}", invoice.id, invoice.order_id);
    Ok(web::Json(CreateInvoiceResponse {
        message: "Invoice created successfully".to_string(),
        invoice,
    }))
}

#[patch("/invoice/{id}")]
pub(super) async fn update_invoice(
    id: web::Path<i64>,
    body: web::Json<UpdateInvoiceRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let conn = data.write_conn().await?;
    repo::update(&*conn, id.into_inner(), &body).await?;
    Ok(web::Json(MessageResponse::new("Invoice updated successfully")))
}
