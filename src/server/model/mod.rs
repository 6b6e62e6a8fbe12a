use serde::{Deserialize, Serialize};

pub(crate) mod config;
pub(crate) mod food;
pub(crate) mod invoice;
pub(crate) mod menu;
pub(crate) mod order;
pub(crate) mod order_item;
pub(crate) mod table;
pub(crate) mod user;

/// Paging query string shared by every list endpoint.
///
/// Values are kept raw so that malformed numbers fall back to the defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommonRequestParams {
    pub page: Option<String>,
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    pub const DEFAULT_NUMBER: i64 = 1;
    pub const DEFAULT_SIZE: i64 = 10;
    pub const MAX_SIZE: i64 = 100;

    /// rows to skip, `None` when the page lies beyond what an i64 offset can address
    fn checked_offset(&self) -> Option<i64> {
        (self.number - 1).checked_mul(self.size)
    }

    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(0)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: Self::DEFAULT_NUMBER,
            size: Self::DEFAULT_SIZE,
        }
    }
}

impl CommonRequestParams {
    pub fn page(&self) -> Page {
        fn positive(raw: &Option<String>) -> Option<i64> {
            raw.as_deref()
                .and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|v| *v >= 1)
        }
        let page = Page {
            number: positive(&self.page).unwrap_or(Page::DEFAULT_NUMBER),
            size: positive(&self.record_per_page)
                .unwrap_or(Page::DEFAULT_SIZE)
                .min(Page::MAX_SIZE),
        };
        match page.checked_offset() {
            Some(_) => page,
            None => Page::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ListResponse<T> {
    pub total_count: i64,
    pub items: Vec<T>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
