use actix_web::{get, patch, post, web, HttpRequest, Responder};
use validator::Validate;
use crate::server::controller::error::CustomError;
use crate::server::controller::page_of;
use crate::server::model::user::{LoginRequest, SignUpRequest, UpdateUserRequest, User, UserResponse};
use crate::server::model::MessageResponse;
use crate::server::repository::{self, user as repo};
use crate::server::state::AppState;

#[get("/user")]
pub(super) async fn get_users(req: HttpRequest, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let users = repository::list::<_, User>(&*conn, page_of(&req)).await?;
    Ok(web::Json(users))
}

#[get("/user/{id}")]
pub(super) async fn get_user(id: web::Path<i64>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let conn = data.read_conn().await?;
    let user: User = repository::get(&*conn, id.into_inner()).await?;
    Ok(web::Json(user))
}

#[post("/user/signup")]
pub(super) async fn signup(body: web::Json<SignUpRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let conn = data.write_conn().await?;
    let user = repo::signup(&*conn, data.token_issuer(), &body).await?;
    Ok(web::Json(UserResponse {
        message: "User signed up successfully".to_string(),
        user,
    }))
}

#[post("/user/login")]
/// exchange email and password for a fresh token pair
pub(super) async fn login(body: web::Json<LoginRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let conn = data.write_conn().await?;
    let user = repo::login(&*conn, data.token_issuer(), &body).await?;
    Ok(web::Json(UserResponse {
        message: "Logged in successfully".to_string(),
        user,
    }))
}

#[patch("/user/{id}")]
pub(super) async fn update_user(
    id: web::Path<i64>,
    body: web::Json<UpdateUserRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    body.validate()?;
    let conn = data.write_conn().await?;
    repo::update(&*conn, id.into_inner(), &body).await?;
    Ok(web::Json(MessageResponse::new("User updated successfully")))
}
