pub(crate) mod attribute_management;
pub(crate) mod category_management;
pub(crate) mod clothing_management;
pub(crate) mod owned_resource;
pub mod user_management;
