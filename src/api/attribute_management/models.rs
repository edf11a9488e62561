use crate::api::owned_resource::{bounded, nullable_string, required_name, OwnedResource, Payload};
use crate::error::CatalogError;
use crate::schema::{materials, shops, tags};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

const MAX_LINK_LEN: usize = 255;

#[derive(Queryable, Identifiable, Serialize, Debug)]
#[diesel(table_name = tags)]
pub struct Tag {
    pub id: i32,
    #[serde(skip_serializing)]
    pub user_id: i32,
    pub name: String,
}

#[derive(Queryable, Identifiable, Serialize, Debug)]
#[diesel(table_name = materials)]
pub struct Material {
    pub id: i32,
    #[serde(skip_serializing)]
    pub user_id: i32,
    pub name: String,
}

#[derive(Queryable, Identifiable, Serialize, Debug)]
#[diesel(table_name = shops)]
pub struct Shop {
    pub id: i32,
    #[serde(skip_serializing)]
    pub user_id: i32,
    pub name: String,
    pub link: String,
}

#[derive(Insertable)]
#[diesel(table_name = tags)]
struct NewTag {
    user_id: i32,
    name: String,
}

#[derive(Insertable)]
#[diesel(table_name = materials)]
struct NewMaterial {
    user_id: i32,
    name: String,
}

#[derive(Insertable)]
#[diesel(table_name = shops)]
struct NewShop {
    user_id: i32,
    name: String,
    link: String,
}

/// Body of a tag or material create request.
#[derive(Deserialize, Debug)]
pub struct NamePayload {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
}

impl Payload for NamePayload {
    type Valid = NamePayload;

    fn validated(self) -> Result<Self::Valid, CatalogError> {
        Ok(NamePayload {
            name: required_name("name", &self.name)?,
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct ShopPayload {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub link: String,
}

impl Payload for ShopPayload {
    type Valid = ShopPayload;

    fn validated(self) -> Result<Self::Valid, CatalogError> {
        Ok(ShopPayload {
            name: required_name("name", &self.name)?,
            link: bounded("link", self.link.trim(), MAX_LINK_LEN)?,
        })
    }
}

impl OwnedResource for Tag {
    type Payload = NamePayload;
    const COLLECTION: &'static str = "tags";

    fn id(&self) -> i32 {
        self.id
    }

    fn load_owned(c: &mut PgConnection, owner: i32) -> Result<Vec<Self>, CatalogError> {
        Ok(tags::table
            .filter(tags::user_id.eq(owner))
            .order((tags::name.desc(), tags::id.desc()))
            .load::<Tag>(c)?)
    }

    fn insert_owned(
        c: &mut PgConnection,
        owner: i32,
        payload: NamePayload,
    ) -> Result<Self, CatalogError> {
        let tag = NewTag {
            user_id: owner,
            name: payload.name,
        };
        Ok(diesel::insert_into(tags::table)
            .values(&tag)
            .get_result::<Tag>(c)?)
    }
}

impl OwnedResource for Material {
    type Payload = NamePayload;
    const COLLECTION: &'static str = "materials";

    fn id(&self) -> i32 {
        self.id
    }

    fn load_owned(c: &mut PgConnection, owner: i32) -> Result<Vec<Self>, CatalogError> {
        Ok(materials::table
            .filter(materials::user_id.eq(owner))
            .order((materials::name.desc(), materials::id.desc()))
            .load::<Material>(c)?)
    }

    fn insert_owned(
        c: &mut PgConnection,
        owner: i32,
        payload: NamePayload,
    ) -> Result<Self, CatalogError> {
        let material = NewMaterial {
            user_id: owner,
            name: payload.name,
        };
        Ok(diesel::insert_into(materials::table)
            .values(&material)
            .get_result::<Material>(c)?)
    }
}

impl OwnedResource for Shop {
    type Payload = ShopPayload;
    const COLLECTION: &'static str = "shops";

    fn id(&self) -> i32 {
        self.id
    }

    fn load_owned(c: &mut PgConnection, owner: i32) -> Result<Vec<Self>, CatalogError> {
        Ok(shops::table
            .filter(shops::user_id.eq(owner))
            .order((shops::name.desc(), shops::id.desc()))
            .load::<Shop>(c)?)
    }

    fn insert_owned(
        c: &mut PgConnection,
        owner: i32,
        payload: ShopPayload,
    ) -> Result<Self, CatalogError> {
        let shop = NewShop {
            user_id: owner,
            name: payload.name,
            link: payload.link,
        };
        Ok(diesel::insert_into(shops::table)
            .values(&shop)
            .get_result::<Shop>(c)?)
    }
}
