//! Integration tests for pet listing, search, ordering and CRUD.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, pet_body};

#[tokio::test]
async fn test_create_pet_sets_owner_and_defaults() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;
    let mut body = pet_body("Rex");
    body["owner"] = json!({"id": "00000000-0000-0000-0000-000000000000"});
    body["id"] = json!("00000000-0000-0000-0000-000000000000");

    let response = app.request("POST", "/api/pets", Some(body), Some(&token)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let pet = &response.body;
    assert_eq!(pet["name"], "Rex");
    assert_eq!(pet["type"], "DOG");
    assert_eq!(pet["status"], "AVAILABLE");
    assert_eq!(pet["breed"], "");
    assert_eq!(pet["owner"]["username"], "alice");
    assert_eq!(pet["owner"]["email"], "alice@example.com");
    assert_ne!(pet["id"], "00000000-0000-0000-0000-000000000000");
    assert_eq!(pet["created_at"], pet["updated_at"]);
}

#[tokio::test]
async fn test_create_pet_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/pets", Some(pet_body("Rex")), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_pet_validation() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;

    let response = app
        .request(
            "POST",
            "/api/pets",
            Some(json!({"name": "", "type": "DRAGON", "age": -2, "gender": "MALE"})),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = &response.body["details"];
    assert_eq!(details["name"][0], "This field may not be blank.");
    assert_eq!(details["type"][0], "\"DRAGON\" is not a valid choice.");
    assert!(details["age"].is_array());
    assert_eq!(details["size"][0], "This field is required.");
    assert_eq!(details["description"][0], "This field is required.");
    assert!(details.get("gender").is_none());
}

#[tokio::test]
async fn test_choices_must_match_exactly() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;

    let response = app
        .request(
            "POST",
            "/api/pets",
            Some(json!({
                "name": "Tweety",
                "type": " BIRD ",
                "age": 1,
                "gender": "female",
                "size": "SMALL",
                "description": "sings",
                "status": "pending",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = &response.body["details"];
    assert_eq!(details["type"][0], "\" BIRD \" is not a valid choice.");
    assert_eq!(details["gender"][0], "\"female\" is not a valid choice.");
    assert_eq!(details["status"][0], "\"pending\" is not a valid choice.");
    assert!(details.get("size").is_none());
}

#[tokio::test]
async fn test_anonymous_can_list_and_retrieve() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;
    let id = app.create_pet(&token, pet_body("Rex")).await;

    let response = app.request("GET", "/api/pets", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.names(), vec!["Rex"]);

    let response = app
        .request("GET", &format!("/api/pets/{id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id.as_str());
    assert_eq!(response.body["owner"]["username"], "alice");
}

#[tokio::test]
async fn test_retrieve_missing_pet() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/pets/0192a0c4-7c1e-7cc0-8000-000000000000",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = app.request("GET", "/api/pets/42", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["id"][0], "\"42\" is not a valid UUID.");
}

#[tokio::test]
async fn test_reads_can_require_authentication() {
    let app = TestApp::with_config(|c| c.api.require_auth_for_reads = true);
    let token = app.register_and_login("alice").await;

    let response = app.request("GET", "/api/pets", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/api/pets", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_matches_every_term() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;

    let mut rex = pet_body("Rex");
    rex["breed"] = json!("Golden Retriever");
    app.create_pet(&token, rex).await;

    let mut tom = pet_body("Tom");
    tom["type"] = json!("CAT");
    tom["breed"] = json!("Siamese");
    app.create_pet(&token, tom).await;

    let mut max = pet_body("Max");
    max["breed"] = json!("Labrador Retriever");
    max["status"] = json!("ADOPTED");
    app.create_pet(&token, max).await;

    assert_eq!(sorted_names(&app, "/api/pets?search=retriever").await, vec!["Max", "Rex"]);
    assert_eq!(sorted_names(&app, "/api/pets?search=golden+retriever").await, vec!["Rex"]);
    assert_eq!(sorted_names(&app, "/api/pets?search=cat").await, vec!["Tom"]);
    assert_eq!(sorted_names(&app, "/api/pets?search=adopted").await, vec!["Max"]);
    assert_eq!(sorted_names(&app, "/api/pets?search=dog,labrador").await, vec!["Max"]);
    assert!(sorted_names(&app, "/api/pets?search=parrot").await.is_empty());
    assert_eq!(sorted_names(&app, "/api/pets?search=").await.len(), 3);
}

async fn sorted_names(app: &TestApp, path: &str) -> Vec<String> {
    let mut names = app.request("GET", path, None, None).await.names();
    names.sort();
    names
}

#[tokio::test]
async fn test_name_ordering_ignores_case() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;
    for name in ["Zed", "alpha", "Mango"] {
        app.create_pet(&token, pet_body(name)).await;
    }

    let response = app
        .request("GET", "/api/pets?ordering=name", None, None)
        .await;
    assert_eq!(response.names(), vec!["alpha", "Mango", "Zed"]);
}

#[tokio::test]
async fn test_ordering() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;

    for (name, age) in [("Bella", 5), ("Archie", 2), ("Coco", 5)] {
        let mut body = pet_body(name);
        body["age"] = json!(age);
        app.create_pet(&token, body).await;
    }

    let response = app
        .request("GET", "/api/pets?ordering=name", None, None)
        .await;
    assert_eq!(response.names(), vec!["Archie", "Bella", "Coco"]);

    let response = app
        .request("GET", "/api/pets?ordering=-name", None, None)
        .await;
    assert_eq!(response.names(), vec!["Coco", "Bella", "Archie"]);

    let response = app
        .request("GET", "/api/pets?ordering=-age,name", None, None)
        .await;
    assert_eq!(response.names(), vec!["Bella", "Coco", "Archie"]);

    let response = app
        .request("GET", "/api/pets?ordering=bogus,name", None, None)
        .await;
    assert_eq!(response.names(), vec!["Archie", "Bella", "Coco"]);
}

#[tokio::test]
async fn test_available_lists_only_available_pets() {
    let app = TestApp::new();
    let alice = app.register_and_login("alice").await;
    let bob = app.register_and_login("bob").await;

    app.create_pet(&alice, pet_body("Rex")).await;
    let mut adopted = pet_body("Max");
    adopted["status"] = json!("ADOPTED");
    app.create_pet(&alice, adopted).await;
    let mut pending = pet_body("Luna");
    pending["status"] = json!("PENDING");
    app.create_pet(&bob, pending).await;
    app.create_pet(&bob, pet_body("Milo")).await;

    let response = app
        .request("GET", "/api/pets/available?ordering=name", None, Some(&alice))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.names(), vec!["Milo", "Rex"]);
    for pet in response.body.as_array().unwrap() {
        assert_eq!(pet["status"], "AVAILABLE");
    }
}

#[tokio::test]
async fn test_my_pets_lists_only_own_pets() {
    let app = TestApp::new();
    let alice = app.register_and_login("alice").await;
    let bob = app.register_and_login("bob").await;

    app.create_pet(&alice, pet_body("Rex")).await;
    app.create_pet(&bob, pet_body("Milo")).await;
    let mut adopted = pet_body("Max");
    adopted["status"] = json!("ADOPTED");
    app.create_pet(&alice, adopted).await;

    let response = app
        .request("GET", "/api/pets/my_pets?ordering=name", None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.names(), vec!["Max", "Rex"]);

    let response = app.request("GET", "/api/pets/my_pets", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_patch_advances_updated_at() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;
    let id = app.create_pet(&token, pet_body("Rex")).await;
    let path = format!("/api/pets/{id}");

    let before = app.request("GET", &path, None, None).await.body;

    let response = app
        .request("PATCH", &path, Some(json!({"status": "PENDING"})), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "PENDING");
    assert_eq!(response.body["name"], "Rex");
    assert_eq!(response.body["created_at"], before["created_at"]);

    let parse = |v: &serde_json::Value| {
        chrono::DateTime::parse_from_rfc3339(v.as_str().unwrap()).unwrap()
    };
    assert!(parse(&response.body["updated_at"]) > parse(&before["updated_at"]));
}

#[tokio::test]
async fn test_put_replaces_fields() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;
    let mut body = pet_body("Rex");
    body["breed"] = json!("Beagle");
    body["status"] = json!("PENDING");
    let id = app.create_pet(&token, body).await;
    let path = format!("/api/pets/{id}");

    let response = app
        .request("PUT", &path, Some(json!({"name": "Rex"})), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mut replacement = pet_body("Rexy");
    replacement["age"] = json!(4);
    let response = app
        .request("PUT", &path, Some(replacement), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Rexy");
    assert_eq!(response.body["age"], 4);
    assert_eq!(response.body["breed"], "Beagle");
    assert_eq!(response.body["status"], "PENDING");
}

#[tokio::test]
async fn test_delete_pet() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;
    let id = app.create_pet(&token, pet_body("Rex")).await;
    let path = format!("/api/pets/{id}");

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_collection_trailing_slash() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;

    let response = app
        .request("POST", "/api/pets/", Some(pet_body("Rex")), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.request("GET", "/api/pets/", None, None).await;
    assert_eq!(response.names(), vec!["Rex"]);
}
