use anyhow::Error;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::server::controller::error::CustomError;
use crate::server::database::{FromRow, GenericRow};
use crate::server::util::time::layout;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Menu {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(with = "layout::option")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(with = "layout::option")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(with = "layout")]
    pub created_at: NaiveDateTime,
    #[serde(with = "layout")]
    pub updated_at: NaiveDateTime,
}

impl FromRow for Menu {
    fn from_row<R: GenericRow>(row: &R) -> Result<Self, Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CreateMenuRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default, with = "layout::option")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "layout::option")]
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct UpdateMenuRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[serde(default, with = "layout::option")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "layout::option")]
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateMenuResponse {
    pub message: String,
    pub menu: Menu,
}

/// A menu is valid from `start` until strictly before `end`.
pub(crate) fn check_window(start: Option<&NaiveDateTime>, end: Option<&NaiveDateTime>) -> Result<(), CustomError> {
    match (start, end) {
        (Some(start), Some(end)) if start >= end => Err(CustomError::bad_request(
            "start_date must be earlier than end_date",
        )),
        _ => Ok(()),
    }
}
