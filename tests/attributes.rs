mod common;

use common::{client, create, list, names, sign_up};
use rocket::http::{Header, Status};
use serde_json::{json, Value};

const COLLECTIONS: [&str; 5] = ["tags", "materials", "shops", "categories", "clothing"];

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn login_required_for_every_resource() {
    let client = client();

    for collection in COLLECTIONS {
        let uri = format!("/api/v1/{}", collection);

        let res = client.get(uri.as_str()).dispatch();
        assert_eq!(res.status(), Status::Unauthorized, "GET {}", uri);
        let body: Value = res.into_json().expect("error body");
        assert!(body["err"].is_string());

        let res = client
            .post(uri.as_str())
            .json(&json!({ "name": "anonymous" }))
            .dispatch();
        assert_eq!(res.status(), Status::Unauthorized, "POST {}", uri);
    }
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn unknown_token_is_rejected() {
    let client = client();

    let res = client
        .get("/api/v1/tags")
        .header(Header::new("Authorization", "Token not-a-real-token"))
        .dispatch();
    assert_eq!(res.status(), Status::Unauthorized);
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn create_tag_then_list_it() {
    let client = client();
    let user = sign_up(&client, "tags");

    let tag = create(&client, &user, "tags", json!({ "name": "zanone" }));
    assert_eq!(tag["name"], "zanone");
    assert!(tag["id"].is_i64());
    assert!(tag.get("user_id").is_none());

    let rows = list(&client, &user, "tags");
    assert_eq!(rows, vec![tag]);
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn create_material_then_list_it() {
    let client = client();
    let user = sign_up(&client, "materials");

    let material = create(&client, &user, "materials", json!({ "name": "cotton" }));
    assert_eq!(material["name"], "cotton");

    let rows = list(&client, &user, "materials");
    assert_eq!(names(&rows), vec!["cotton"]);
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn shops_are_listed_by_name_descending() {
    let client = client();
    let user = sign_up(&client, "ordering");

    create(
        &client,
        &user,
        "shops",
        json!({ "name": "Modern Blue", "link": "modern_blue.com" }),
    );
    create(&client, &user, "shops", json!({ "name": "guji", "link": "guji.com" }));

    let rows = list(&client, &user, "shops");
    assert_eq!(names(&rows), vec!["guji", "Modern Blue"]);
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn resources_are_limited_to_their_owner() {
    let client = client();
    let owner = sign_up(&client, "owner");
    let other = sign_up(&client, "other");

    create(&client, &other, "shops", json!({ "name": "Fedeli official" }));
    let shop = create(&client, &owner, "shops", json!({ "name": "Gransasso official" }));
    create(&client, &other, "tags", json!({ "name": "casual" }));

    let rows = list(&client, &owner, "shops");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], shop["name"]);
    assert!(list(&client, &owner, "tags").is_empty());

    assert_eq!(names(&list(&client, &other, "shops")), vec!["Fedeli official"]);
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn owner_comes_from_the_credential() {
    let client = client();
    let owner = sign_up(&client, "caller");
    let victim = sign_up(&client, "victim");

    create(
        &client,
        &owner,
        "tags",
        json!({ "name": "smuggled", "user_id": victim.id }),
    );

    assert_eq!(names(&list(&client, &owner, "tags")), vec!["smuggled"]);
    assert!(list(&client, &victim, "tags").is_empty());
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn shop_round_trip_through_the_api() {
    let client = client();
    let user = sign_up(&client, "shopper");

    create(&client, &user, "shops", json!({ "name": "guji", "link": "guji.com" }));

    let rows = list(&client, &user, "shops");
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_object().expect("shop object");
    assert_eq!(row.len(), 3);
    assert!(row["id"].is_i64());
    assert_eq!(row["name"], "guji");
    assert_eq!(row["link"], "guji.com");
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn shop_link_is_optional() {
    let client = client();
    let user = sign_up(&client, "nolink");

    let shop = create(&client, &user, "shops", json!({ "name": "Modern Blue" }));
    assert_eq!(shop["link"], "");
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn blank_or_missing_name_is_rejected() {
    let client = client();
    let user = sign_up(&client, "invalid");

    for collection in ["tags", "materials", "shops", "categories"] {
        for payload in [json!({ "name": "" }), json!({ "name": "   " }), json!({})] {
            let res = client
                .post(format!("/api/v1/{}", collection))
                .header(user.auth())
                .json(&payload)
                .dispatch();
            assert_eq!(res.status(), Status::BadRequest, "{} {}", collection, payload);
        }
        assert!(list(&client, &user, collection).is_empty());
    }
}

#[test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
fn created_rows_carry_a_location() {
    let client = client();
    let user = sign_up(&client, "location");

    let res = client
        .post("/api/v1/tags")
        .header(user.auth())
        .json(&json!({ "name": "winter" }))
        .dispatch();
    assert_eq!(res.status(), Status::Created);
    let location = res
        .headers()
        .get_one("Location")
        .expect("location header")
        .to_string();
    let body: Value = res.into_json().expect("tag");
    assert_eq!(location, format!("/api/v1/tags/{}", body["id"]));
}
