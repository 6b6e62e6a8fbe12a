use actix_web::{get, patch, post, web, HttpRequest, Responder};
use log::info;
use validator::Validate;
use crate::server::controller::error::CustomError;
use crate::server::controller::page_of;
use crate::server::model::food::{CreateFoodRequest, CreateFoodResponse, Food, UpdateFoodRequest};
use crate::server::model::MessageResponse;
use crate::server::repository::{self, food as repo};
use crate::server::state::AppState;

#[get("/food")]
pub(super) async fn get_foods(req: HttpRequest, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let foods = repository::list::<_, Food>(&*conn, page_of(&req)).await?;
    Ok(web::Json(foods))
}

#[get("/food/{id}")]
pub(super) async fn get_food(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let food: Food = repository::get(&*conn, id.into_inner()).await?;
    Ok(web::Json(food))
}

#[post("/food")]
/// add a dish to an existing menu
pub(super) async fn create_food(body: web::Json<CreateFoodRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let conn = data.write_conn().await?;
    let food = repo::create(&*conn, &body).await?;
    info!("food {} created under menu {}", food.id, food.menu_id);
    Ok(web::Json(CreateFoodResponse {
        message: "Food created successfully".to_string(),
        food,
    }))
}

#[patch("/food/{id}")]
pub(super) async fn update_food(
    id: web::Path<i64>,
    body: web::Json<UpdateFoodRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let conn = data.write_conn().await?;
    repo::update(&*conn, id.into_inner(), &body).await?;
    Ok(web::Json(MessageResponse::new("Food updated successfully")))
}
