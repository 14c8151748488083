//! Restaurant endpoints through the full router

mod common;

use common::{TestApp, id_of, restaurant_body};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn empty_list_has_empty_pagination() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/restaurants").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(body["pagination"], json!({}));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn create_returns_created_record() {
    let app = TestApp::new().await;
    let data = app.create_restaurant("  Baan Somtum  ", "Bangkok", "10500").await;

    assert_eq!(data["name"], "Baan Somtum");
    assert_eq!(data["postalcode"], "10500");
    assert_eq!(data["tel"], "021234567");
    assert!(data["createdAt"].as_i64().is_some());

    let (status, body) = app
        .get(&format!("/api/v1/restaurants/{}", id_of(&data)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], data);
}

#[tokio::test]
async fn create_without_token_is_unauthorized() {
    let app = TestApp::new().await;
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/restaurants",
            None,
            Some(restaurant_body("Nope", "Bangkok", "10110")),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["message"], "Not authorized to access this route");
}

#[tokio::test]
async fn create_with_garbage_token_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/restaurants",
            Some("not.a.jwt"),
            Some(restaurant_body("Nope", "Bangkok", "10110")),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn user_role_cannot_manage_restaurants() {
    let app = TestApp::new().await;
    let user = app.token("user");
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/restaurants",
            Some(&user),
            Some(restaurant_body("Nope", "Bangkok", "10110")),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);
    assert_eq!(
        body["message"],
        "User role user is not authorized to access this route"
    );

    let (status, _) = app
        .request(Method::DELETE, "/api/v1/restaurants/1", Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_validates_fields() {
    let app = TestApp::new().await;
    let admin = app.token("admin");

    let mut missing_name = restaurant_body("x", "Bangkok", "10110");
    missing_name.as_object_mut().unwrap().remove("name");
    let (status, body) = app
        .request(Method::POST, "/api/v1/restaurants", Some(&admin), Some(missing_name))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert_eq!(body["message"], "Please add a name");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/restaurants",
            Some(&admin),
            Some(restaurant_body("Long Code", "Bangkok", "101100")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Postalcode cannot be more than 5 digits");
    assert_eq!(body["details"]["field"], "postalcode");

    let (_, body) = app.get("/api/v1/restaurants").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let app = TestApp::new().await;
    app.create_restaurant("Jay Fai", "Bangkok", "10200").await;

    let admin = app.token("admin");
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/restaurants",
            Some(&admin),
            Some(restaurant_body("Jay Fai", "Phuket", "83000")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);
    assert_eq!(body["message"], "Duplicate field value: name");
    assert_eq!(body["details"]["field"], "name");
}

#[tokio::test]
async fn malformed_json_body_is_bad_request() {
    let app = TestApp::new().await;
    let admin = app.token("admin");
    let request = http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/restaurants")
        .header(http::header::AUTHORIZATION, format!("Bearer {admin}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
    assert_eq!(body["message"], "Request body is not valid JSON");
}

#[tokio::test]
async fn numeric_postalcode_is_stored_as_text() {
    let app = TestApp::new().await;
    let admin = app.token("admin");
    let mut payload = restaurant_body("Numeric Code", "Bangkok", "10110");
    payload["postalcode"] = json!(10110);

    let (status, body) = app
        .request(Method::POST, "/api/v1/restaurants", Some(&admin), Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["postalcode"], "10110");
}

#[tokio::test]
async fn wrongly_typed_field_gets_a_stable_message() {
    let app = TestApp::new().await;
    let admin = app.token("admin");
    let mut payload = restaurant_body("Typed", "Bangkok", "10110");
    payload["name"] = json!(["not", "a", "name"]);

    let (status, body) = app
        .request(Method::POST, "/api/v1/restaurants", Some(&admin), Some(payload))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
    assert_eq!(
        body["message"],
        "Request body contains a field of the wrong type"
    );
    assert!(!body["message"].as_str().unwrap().contains("deserialize"));
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/restaurants/12345").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
    assert_eq!(body["message"], "Restaurant not found with id of 12345");

    let (status, body) = app.get("/api/v1/restaurants/not-an-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Restaurant not found with id of not-an-id");
}

#[tokio::test]
async fn pages_of_twenty_five_link_to_each_other() {
    let app = TestApp::new().await;
    for i in 0..30 {
        app.create_restaurant(&format!("Restaurant {i:02}"), "Bangkok", "10110")
            .await;
    }

    let (status, body) = app.get("/api/v1/restaurants").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 25);
    assert_eq!(body["pagination"], json!({"next": {"page": 2, "limit": 25}}));

    let (_, body) = app.get("/api/v1/restaurants?page=2").await;
    assert_eq!(body["count"], 5);
    assert_eq!(body["pagination"], json!({"prev": {"page": 1, "limit": 25}}));

    let (_, body) = app.get("/api/v1/restaurants?page=2&limit=10").await;
    assert_eq!(body["count"], 10);
    assert_eq!(
        body["pagination"],
        json!({"next": {"page": 3, "limit": 10}, "prev": {"page": 1, "limit": 10}})
    );
}

#[tokio::test]
async fn malformed_paging_falls_back_to_defaults() {
    let app = TestApp::new().await;
    app.create_restaurant("Only One", "Bangkok", "10110").await;

    let (status, body) = app.get("/api/v1/restaurants?page=abc&limit=-4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["pagination"], json!({}));
}

#[tokio::test]
async fn filter_sort_and_select() {
    let app = TestApp::new().await;
    app.create_restaurant("Krua Apsorn", "Bangkok", "10200").await;
    app.create_restaurant("Raya", "Phuket", "83000").await;
    app.create_restaurant("Ann Kitchen", "Bangkok", "10110").await;
    app.create_restaurant("Krabi Seafood", "Krabi", "81000").await;

    let (status, body) = app
        .get("/api/v1/restaurants?province=Bangkok&sort=name&select=name,province")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ann Kitchen", "Krua Apsorn"]);

    let first = body["data"][0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["id", "name", "province"]);

    let (_, body) = app
        .get("/api/v1/restaurants?postalcode%5Bgte%5D=81000&sort=-postalcode")
        .await;
    let codes: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["postalcode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["83000", "81000"]);

    let (_, body) = app
        .get("/api/v1/restaurants?province%5Bin%5D=Phuket,Krabi")
        .await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn pagination_counts_only_matching_records() {
    let app = TestApp::new().await;
    for i in 0..3 {
        app.create_restaurant(&format!("Bangkok {i}"), "Bangkok", "10110")
            .await;
    }
    for i in 0..4 {
        app.create_restaurant(&format!("Phuket {i}"), "Phuket", "83000")
            .await;
    }

    let (_, body) = app.get("/api/v1/restaurants?province=Bangkok&limit=3").await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["pagination"], json!({}));

    let (_, body) = app.get("/api/v1/restaurants?province=Bangkok&limit=2").await;
    assert_eq!(body["pagination"], json!({"next": {"page": 2, "limit": 2}}));
}

#[tokio::test]
async fn bad_list_queries_are_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/restaurants?rating%5Bgt%5D=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
    assert_eq!(body["message"], "Unknown field: rating");

    let (status, _) = app.get("/api/v1/restaurants?sort=-secret").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get("/api/v1/restaurants?name%5Bregex%5D=K").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let app = TestApp::new().await;
    let created = app.create_restaurant("Thip Samai", "Bangkok", "10200").await;
    let id = id_of(&created);
    let admin = app.token("admin");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/restaurants/{id}"),
            Some(&admin),
            Some(json!({"tel": "022211111", "foodtype": "Pad Thai"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tel"], "022211111");
    assert_eq!(body["data"]["foodtype"], "Pad Thai");
    assert_eq!(body["data"]["name"], "Thip Samai");
    assert_eq!(body["data"]["createdAt"], created["createdAt"]);

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/restaurants/{id}"),
            Some(&admin),
            Some(json!({"postalcode": "123456"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "postalcode");
}

#[tokio::test]
async fn update_with_null_tel_clears_it() {
    let app = TestApp::new().await;
    let created = app.create_restaurant("No Phone", "Bangkok", "10110").await;
    assert_eq!(created["tel"], "021234567");
    let uri = format!("/api/v1/restaurants/{}", id_of(&created));
    let admin = app.token("admin");

    let (status, body) = app
        .request(Method::PUT, &uri, Some(&admin), Some(json!({"foodtype": "Isan"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tel"], "021234567");

    let (status, body) = app
        .request(Method::PUT, &uri, Some(&admin), Some(json!({"tel": null})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["tel"].is_null(), "{body}");
    assert_eq!(body["data"]["foodtype"], "Isan");

    let (_, body) = app.get(&uri).await;
    assert!(body["data"]["tel"].is_null());
}

#[tokio::test]
async fn update_of_missing_restaurant_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.token("admin");
    let (status, body) = app
        .request(
            Method::PUT,
            "/api/v1/restaurants/777",
            Some(&admin),
            Some(json!({"tel": "1"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn update_to_taken_name_is_rejected() {
    let app = TestApp::new().await;
    app.create_restaurant("Taken", "Bangkok", "10110").await;
    let other = app.create_restaurant("Other", "Bangkok", "10110").await;
    let admin = app.token("admin");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/restaurants/{}", id_of(&other)),
            Some(&admin),
            Some(json!({"name": "Taken"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);
}

#[tokio::test]
async fn delete_returns_empty_data() {
    let app = TestApp::new().await;
    let created = app.create_restaurant("Short Lived", "Bangkok", "10110").await;
    let uri = format!("/api/v1/restaurants/{}", id_of(&created));
    let admin = app.token("admin");

    let (status, body) = app.request(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": {}}));

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.request(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}
