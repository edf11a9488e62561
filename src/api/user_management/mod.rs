pub mod accounts;
pub(crate) mod login;
pub mod models;
pub(crate) mod register;
pub(crate) mod sessions;
