use anyhow::Error;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::server::database::{FromRow, GenericRow};
use crate::server::util::time::layout;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Table {
    pub id: i64,
    pub number_of_guests: i32,
    pub table_number: i32,
    #[serde(with = "layout")]
    pub created_at: NaiveDateTime,
    #[serde(with = "layout")]
    pub updated_at: NaiveDateTime,
}

impl FromRow for Table {
    fn from_row<R: GenericRow>(row: &R) -> Result<Self, Error> {
        Ok(Self {
            id: row.try_get("id")?,
            number_of_guests: row.try_get("number_of_guests")?,
            table_number: row.try_get("table_number")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CreateTableRequest {
    #[validate(range(min = 1))]
    pub number_of_guests: i32,
    #[validate(range(min = 1))]
    pub table_number: i32,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct UpdateTableRequest {
    #[validate(range(min = 1))]
    pub number_of_guests: Option<i32>,
    #[validate(range(min = 1))]
    pub table_number: Option<i32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTableResponse {
    pub message: String,
    pub table: Table,
}
