use actix_web::{get, patch, post, web, HttpRequest, Responder};
use log::info;
use validator::Validate;
use crate::server::controller::error::CustomError;
use crate::server::controller::page_of;
use crate::server::model::menu::{CreateMenuRequest, CreateMenuResponse, Menu, UpdateMenuRequest};
use crate::server::model::MessageResponse;
use crate::server::repository::{self, menu as repo};
use crate::server::state::AppState;

#[get("/menu")]
/// list menus page by page
pub(super) async fn get_menus(req: HttpRequest, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let menus = repository::list::<_, Menu>(&*conn, page_of(&req)).await?;
    Ok(web::Json(menus))
}

#[get("/menu/{id}")]
pub(super) async fn get_menu(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let menu: Menu = repository::get(&*conn, id.into_inner()).await?;
    Ok(web::Json(menu))
}

#[post("/menu")]
pub(super) async fn create_menu(body: web::Json<CreateMenuRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let conn = data.write_conn().await?;
    let menu = repo::create(&*conn, &body).await?;
    info!("menu {} created", menu.id);
    Ok(web::Json(CreateMenuResponse {
        message: "Menu created successfully".to_string(),
        menu,
    }))
}

#[patch("/menu/{id}")]
pub(super) async fn update_menu(
    id: web::Path<i64>,
    body: web::Json<UpdateMenuRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let conn = data.write_conn().await?;
    repo::update(&*conn, id.into_inner(), &body).await?;
    Ok(web::Json(MessageResponse::new("Menu updated successfully")))
}
