diesel::table! {
    auth_tokens (key) {
        key -> Varchar,
        user_id -> Int4,
        created -> Timestamptz,
    }
}

diesel::table! {
    categories (id) {
        id -> Int4,
        user_id -> Int4,
        name -> Varchar,
        slug -> Varchar,
    }
}

diesel::table! {
    clothing (id) {
        id -> Int4,
        user_id -> Int4,
        name -> Varchar,
        price -> Int4,
        description -> Varchar,
        category_id -> Int4,
    }
}

diesel::table! {
    clothing_materials (clothing_id, material_id) {
        clothing_id -> Int4,
        material_id -> Int4,
    }
}

diesel::table! {
    clothing_shops (clothing_id, shop_id) {
        clothing_id -> Int4,
        shop_id -> Int4,
    }
}

diesel::table! {
    clothing_tags (clothing_id, tag_id) {
        clothing_id -> Int4,
        tag_id -> Int4,
    }
}

diesel::table! {
    materials (id) {
        id -> Int4,
        user_id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    shops (id) {
        id -> Int4,
        user_id -> Int4,
        name -> Varchar,
        link -> Varchar,
    }
}

diesel::table! {
    tags (id) {
        id -> Int4,
        user_id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        email -> Varchar,
        password -> Varchar,
        name -> Varchar,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
    }
}

diesel::joinable!(auth_tokens -> users (user_id));
diesel::joinable!(categories -> users (user_id));
diesel::joinable!(clothing -> categories (category_id));
diesel::joinable!(clothing -> users (user_id));
diesel::joinable!(clothing_materials -> clothing (clothing_id));
diesel::joinable!(clothing_materials -> materials (material_id));
diesel::joinable!(clothing_shops -> clothing (clothing_id));
diesel::joinable!(clothing_shops -> shops (shop_id));
diesel::joinable!(clothing_tags -> clothing (clothing_id));
diesel::joinable!(clothing_tags -> tags (tag_id));
diesel::joinable!(materials -> users (user_id));
diesel::joinable!(shops -> users (user_id));
diesel::joinable!(tags -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    auth_tokens,
    categories,
    clothing,
    clothing_materials,
    clothing_shops,
    clothing_tags,
    materials,
    shops,
    tags,
    users,
);
