pub(crate) mod create;
pub(crate) mod list;
pub mod models;
