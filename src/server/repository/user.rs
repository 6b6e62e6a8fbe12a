use log::{error, info};
use crate::server::controller::error::CustomError;
use crate::server::database::{row_into, with_deadline, DbClient, GenericRow};
use crate::server::model::user::{LoginRequest, SignUpRequest, UpdateUserRequest, User};
use crate::server::repository::{self, Entity};
use crate::server::util::credential::{hash_password, verify_password, TokenIssuer};
use crate::server::util::time::helper::get_utc_now;
use crate::server::util::update::UpdateBuilder;

impl Entity for User {
    const NAME: &'static str = "User";
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str =
        "id, first_name, last_name, password, email, phone, avatar, token, refresh_token, created_at, updated_at";
}

async fn count_where<C: DbClient>(client: &C, column: &str, value: &str) -> Result<i64, CustomError> {
    let statement = format!("SELECT COUNT(*) AS total_count FROM users WHERE {} = $1", column);
    match with_deadline(client.query_opt(&statement, &[&value])).await? {
        Some(row) => row.try_get::<i64>("total_count").map_err(CustomError::from_db),
        None => Ok(0),
    }
}

pub(crate) async fn signup<C: DbClient>(
    client: &C,
    issuer: &TokenIssuer,
    req: &SignUpRequest,
) -> Result<User, CustomError> {
    if count_where(client, "email", &req.email).await? > 0 {
        return Err(CustomError::bad_request("this email already exists"));
    }
    if count_where(client, "phone", &req.phone).await? > 0 {
        return Err(CustomError::bad_request("this phone number already exists"));
    }
    let password = hash_password(&req.password).map_err(|e| {
        error!("{:#}", e);
        CustomError::DbError
    })?;
    let tokens = issuer
        .issue(&req.email, &req.first_name, &req.last_name, &req.phone)
        .map_err(|e| {
            error!("failed to sign tokens, {}", e);
            CustomError::DbError
        })?;
    let now = get_utc_now();
    let user: User = repository::insert_returning(
        client,
        r#"
            INSERT INTO users(first_name, last_name, password, email, phone, avatar, token, refresh_token,
                              created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING id, first_name, last_name, password, email, phone, avatar, token, refresh_token,
                      created_at, updated_at
        "#,
        &[
            &req.first_name,
            &req.last_name,
            &password,
            &req.email,
            &req.phone,
            &req.avatar,
            &tokens.token,
            &tokens.refresh_token,
            &now,
        ],
    )
    .await?;
    info!("user {} signed up", user.id);
    Ok(user)
}

/// Check credentials and hand out a fresh token pair, stored on the user row.
pub(crate) async fn login<C: DbClient>(
    client: &C,
    issuer: &TokenIssuer,
    req: &LoginRequest,
) -> Result<User, CustomError> {
    let statement = format!("SELECT {} FROM users WHERE email = $1", User::COLUMNS);
    let mut user: User = match with_deadline(client.query_opt(&statement, &[&req.email])).await? {
        Some(row) => row_into(&row)?,
        None => return Err(CustomError::not_found(User::NAME)),
    };
    if !verify_password(&req.password, &user.password) {
        return Err(CustomError::bad_request("login or password is incorrect"));
    }
    let tokens = issuer
        .issue(&user.email, &user.first_name, &user.last_name, &user.phone)
        .map_err(|e| {
            error!("failed to sign tokens, {}", e);
            CustomError::DbError
        })?;
    let now = get_utc_now();
    let (statement, params) = UpdateBuilder::new(User::TABLE, &now)
        .set("token", Some(&tokens.token))
        .set("refresh_token", Some(&tokens.refresh_token))
        .finish(&user.id);
    repository::apply_update::<C, User>(client, &statement, &params).await?;
    user.token = Some(tokens.token);
    user.refresh_token = Some(tokens.refresh_token);
    user.updated_at = now;
    Ok(user)
}

pub(crate) async fn update<C: DbClient>(client: &C, id: i64, req: &UpdateUserRequest) -> Result<(), CustomError> {
    let now = get_utc_now();
    let (statement, params) = UpdateBuilder::new(User::TABLE, &now)
        .set("first_name", req.first_name.as_ref())
        .set("last_name", req.last_name.as_ref())
        .set("phone", req.phone.as_ref())
        .set("avatar", req.avatar.as_ref())
        .finish(&id);
    repository::apply_update::<C, User>(client, &statement, &params).await
}
