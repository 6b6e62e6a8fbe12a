use crate::server::controller::error::CustomError;
use crate::server::database::DbClient;
use crate::server::model::food::{CreateFoodRequest, Food, UpdateFoodRequest};
use crate::server::model::menu::Menu;
use crate::server::repository::{self, Entity};
use crate::server::util::money::{ensure_positive, round_price};
use crate::server::util::time::helper::get_utc_now;
use crate::server::util::update::UpdateBuilder;

impl Entity for Food {
    const NAME: &'static str = "Food";
    const TABLE: &'static str = "food";
    const COLUMNS: &'static str = "id, name, price, food_image, menu_id, created_at, updated_at";
}

pub(crate) async fn create<C: DbClient>(client: &C, req: &CreateFoodRequest) -> Result<Food, CustomError> {
    let price = round_price(req.price);
    ensure_positive(&price, "price")?;
    repository::ensure_exists::<C, Menu>(client, req.menu_id).await?;
    let now = get_utc_now();
    repository::insert_returning(
        client,
        r#"
            INSERT INTO food(name, price, food_image, menu_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, name, price, food_image, menu_id, created_at, updated_at
        "#,
        &[&req.name, &price, &req.food_image, &req.menu_id, &now],
    )
    .await
}

pub(crate) async fn update<C: DbClient>(client: &C, id: i64, req: &UpdateFoodRequest) -> Result<(), CustomError> {
    let price = match req.price {
        Some(price) => {
            let price = round_price(price);
            ensure_positive(&price, "price")?;
            Some(price)
        }
        None => None,
    };
    if let Some(menu_id) = req.menu_id {
        repository::ensure_exists::<C, Menu>(client, menu_id).await?;
    }
    let now = get_utc_now();
    let (statement, params) = UpdateBuilder::new(Food::TABLE, &now)
        .set("name", req.name.as_ref())
        .set("price", price.as_ref())
        .set("food_image", req.food_image.as_ref())
        .set("menu_id", req.menu_id.as_ref())
        .finish(&id);
    repository::apply_update::<C, Food>(client, &statement, &params).await
}
