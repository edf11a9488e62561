use crate::api::category_management::slug::slugify;
use crate::api::owned_resource::{
    nullable_string, required_name, OwnedResource, Payload, MAX_NAME_LEN,
};
use crate::error::CatalogError;
use crate::schema::categories;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(Queryable, Identifiable, Serialize, Debug)]
#[diesel(table_name = categories)]
pub struct Category {
    pub id: i32,
    #[serde(skip_serializing)]
    pub user_id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = categories)]
struct NewCategory {
    user_id: i32,
    name: String,
    slug: String,
}

impl NewCategory {
    /// The slug is always recomputed from the name being written.
    fn new(user_id: i32, name: String) -> Result<NewCategory, CatalogError> {
        let slug = slugify(&name);
        if slug.is_empty() {
            return Err(CatalogError::validation(
                "name",
                "Name must contain at least one letter or digit",
            ));
        }
        // Normalizing and lowercasing can expand characters, so the slug is bounded on its own.
        if slug.chars().count() > MAX_NAME_LEN {
            return Err(CatalogError::validation(
                "name",
                format!("Slug would exceed {} characters", MAX_NAME_LEN),
            ));
        }
        Ok(NewCategory {
            user_id,
            name,
            slug,
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct CategoryPayload {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
}

impl Payload for CategoryPayload {
    type Valid = CategoryPayload;

    fn validated(self) -> Result<Self::Valid, CatalogError> {
        Ok(CategoryPayload {
            name: required_name("name", &self.name)?,
        })
    }
}

impl OwnedResource for Category {
    type Payload = CategoryPayload;
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> i32 {
        self.id
    }

    fn load_owned(c: &mut PgConnection, owner: i32) -> Result<Vec<Self>, CatalogError> {
        Ok(categories::table
            .filter(categories::user_id.eq(owner))
            .order((categories::name.desc(), categories::id.desc()))
            .load::<Category>(c)?)
    }

    // Slug uniqueness is enforced by `categories_slug_key`; a duplicate
    // surfaces as a conflict.
    fn insert_owned(
        c: &mut PgConnection,
        owner: i32,
        payload: CategoryPayload,
    ) -> Result<Self, CatalogError> {
        let category = NewCategory::new(owner, payload.name)?;
        Ok(diesel::insert_into(categories::table)
            .values(&category)
            .get_result::<Category>(c)?)
    }
}
