use crate::api::owned_resource::{bounded, nullable_string, required_name, OwnedResource, Payload};
use crate::error::CatalogError;
use crate::schema::{clothing, clothing_materials, clothing_shops, clothing_tags};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;

pub(crate) const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Queryable, Identifiable, Debug)]
#[diesel(table_name = clothing)]
pub struct Clothing {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub price: i32,
    pub description: String,
    pub category_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = clothing)]
struct NewClothing {
    user_id: i32,
    name: String,
    price: i32,
    description: String,
    category_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = clothing_tags)]
struct ClothingTag {
    clothing_id: i32,
    tag_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = clothing_materials)]
struct ClothingMaterial {
    clothing_id: i32,
    material_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = clothing_shops)]
struct ClothingShop {
    clothing_id: i32,
    shop_id: i32,
}

/// A clothing row together with the ids it links to.
#[derive(Serialize, Debug)]
pub struct ClothingOut {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub description: String,
    pub category: i32,
    pub tags: Vec<i32>,
    pub materials: Vec<i32>,
    pub shops: Vec<i32>,
}

#[derive(Deserialize, Debug)]
pub struct ClothingPayload {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default)]
    pub category: Option<i32>,
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub materials: Vec<i32>,
    #[serde(default)]
    pub shops: Vec<i32>,
}

#[derive(Debug)]
pub struct ValidClothing {
    name: String,
    price: i32,
    description: String,
    category: i32,
    tags: BTreeSet<i32>,
    materials: BTreeSet<i32>,
    shops: BTreeSet<i32>,
}

impl Payload for ClothingPayload {
    type Valid = ValidClothing;

    fn validated(self) -> Result<ValidClothing, CatalogError> {
        let name = required_name("name", &self.name)?;

        let price = self
            .price
            .ok_or_else(|| CatalogError::validation("price", "This field is required"))?;
        if price < 0 {
            return Err(CatalogError::validation(
                "price",
                "Ensure this value is greater than or equal to 0",
            ));
        }
        let price = i32::try_from(price).map_err(|_| {
            CatalogError::validation("price", "Ensure this value is less than or equal to 2147483647")
        })?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(CatalogError::validation(
                "description",
                "This field may not be blank",
            ));
        }
        let description = bounded("description", description, MAX_DESCRIPTION_LEN)?;

        let category = self
            .category
            .ok_or_else(|| CatalogError::validation("category", "This field is required"))?;

        Ok(ValidClothing {
            name,
            price,
            description,
            category,
            tags: self.tags.into_iter().collect(),
            materials: self.materials.into_iter().collect(),
            shops: self.shops.into_iter().collect(),
        })
    }
}

/// Groups `(clothing_id, target_id)` link rows by clothing id.
fn group_links(pairs: Vec<(i32, i32)>) -> HashMap<i32, Vec<i32>> {
    let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
    for (clothing_id, target_id) in pairs {
        grouped.entry(clothing_id).or_default().push(target_id);
    }
    grouped
}

impl OwnedResource for ClothingOut {
    type Payload = ClothingPayload;
    const COLLECTION: &'static str = "clothing";

    fn id(&self) -> i32 {
        self.id
    }

    fn load_owned(c: &mut PgConnection, owner: i32) -> Result<Vec<Self>, CatalogError> {
        let rows = clothing::table
            .filter(clothing::user_id.eq(owner))
            .order((clothing::name.desc(), clothing::id.desc()))
            .load::<Clothing>(c)?;
        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();

        let mut tags = group_links(
            clothing_tags::table
                .filter(clothing_tags::clothing_id.eq_any(&ids))
                .order(clothing_tags::tag_id)
                .load::<(i32, i32)>(c)?,
        );
        let mut materials = group_links(
            clothing_materials::table
                .filter(clothing_materials::clothing_id.eq_any(&ids))
                .order(clothing_materials::material_id)
                .load::<(i32, i32)>(c)?,
        );
        let mut shops = group_links(
            clothing_shops::table
                .filter(clothing_shops::clothing_id.eq_any(&ids))
                .order(clothing_shops::shop_id)
                .load::<(i32, i32)>(c)?,
        );

        Ok(rows
            .into_iter()
            .map(|row| ClothingOut {
                tags: tags.remove(&row.id).unwrap_or_default(),
                materials: materials.remove(&row.id).unwrap_or_default(),
                shops: shops.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                price: row.price,
                description: row.description,
                category: row.category_id,
            })
            .collect())
    }

    // Links may point at any user's tags, materials or shops; only existence
    // is enforced, by the foreign keys. The row and its links commit together.
    fn insert_owned(
        c: &mut PgConnection,
        owner: i32,
        payload: ValidClothing,
    ) -> Result<Self, CatalogError> {
        c.transaction::<_, CatalogError, _>(|c| {
            let row = diesel::insert_into(clothing::table)
                .values(&NewClothing {
                    user_id: owner,
                    name: payload.name,
                    price: payload.price,
                    description: payload.description,
                    category_id: payload.category,
                })
                .get_result::<Clothing>(c)?;

            let tag_links: Vec<ClothingTag> = payload
                .tags
                .iter()
                .map(|&tag_id| ClothingTag {
                    clothing_id: row.id,
                    tag_id,
                })
                .collect();
            if !tag_links.is_empty() {
                diesel::insert_into(clothing_tags::table)
                    .values(&tag_links)
                    .execute(c)?;
            }

            let material_links: Vec<ClothingMaterial> = payload
                .materials
                .iter()
                .map(|&material_id| ClothingMaterial {
                    clothing_id: row.id,
                    material_id,
                })
                .collect();
            if !material_links.is_empty() {
                diesel::insert_into(clothing_materials::table)
                    .values(&material_links)
                    .execute(c)?;
            }

            let shop_links: Vec<ClothingShop> = payload
                .shops
                .iter()
                .map(|&shop_id| ClothingShop {
                    clothing_id: row.id,
                    shop_id,
                })
                .collect();
            if !shop_links.is_empty() {
                diesel::insert_into(clothing_shops::table)
                    .values(&shop_links)
                    .execute(c)?;
            }

            Ok(ClothingOut {
                id: row.id,
                name: row.name,
                price: row.price,
                description: row.description,
                category: row.category_id,
                tags: payload.tags.into_iter().collect(),
                materials: payload.materials.into_iter().collect(),
                shops: payload.shops.into_iter().collect(),
            })
        })
    }
}
