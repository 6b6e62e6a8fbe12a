use actix_web::{get, patch, post, web, HttpRequest, Responder};
use log::info;
use validator::Validate;
use crate::server::controller::error::CustomError;
use crate::server::controller::page_of;
use crate::server::model::table::{CreateTableRequest, CreateTableResponse, Table, UpdateTableRequest};
use crate::server::model::MessageResponse;
use crate::server::repository::{self, table as repo};
use crate::server::state::AppState;

#[get("/table")]
/// get tables
pub(super) async fn get_tables(req: HttpRequest, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let tables = repository::list::<_, Table>(&*conn, page_of(&req)).await?;
    Ok(web::Json(tables))
}

#[get("/table/{id}")]
pub(super) async fn get_table(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let table: Table = repository::get(&*conn, id.into_inner()).await?;
    Ok(web::Json(table))
}

#[post("/table")]
pub(super) async fn create_table(body: web::Json<CreateTableRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let conn = data.write_conn().await?;
    let table = repo::create(&*conn, &body).await?;
    info!("table {} created as number {}", table.id, table.table_number);
    Ok(web::Json(CreateTableResponse {
        message: "Table created successfully".to_string(),
        table,
    }))
}

#[patch("/table/{id}")]
pub(super) async fn update_table(
    id: web::Path<i64>,
    body: web::Json<UpdateTableRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let conn = data.write_conn().await?;
    repo::update(&*conn, id.into_inner(), &body).await?;
    Ok(web::Json(MessageResponse::new("Table updated successfully")))
}
