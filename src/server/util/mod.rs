pub(crate) mod credential;
pub(crate) mod money;
pub(crate) mod time;
pub(crate) mod update;
