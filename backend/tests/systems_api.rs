use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::{json, Value};

mod helpers;

macro_rules! init_app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data($db.clone())
                .configure(backend::configure_app),
        )
        .await
    };
}

fn system_payload(name: &str) -> Value {
    json!({ "data": {
        "name": name,
        "baseUrl": "api.example.com",
        "authenticationMethod": "bearer",
        "authenticationPlace": "header",
        "key": "k1",
        "value": "v1"
    }})
}

#[actix_web::test]
async fn creating_a_system_backfills_document_id() {
    let db = helpers::test_db();
    let app = init_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/systems")
        .set_json(system_payload("X"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["documentId"], body["data"]["id"]);
    assert_eq!(body["data"]["baseUrl"], "api.example.com");

    // The backfill must also be visible on subsequent reads.
    let req = test::TestRequest::get().uri("/api/systems").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"][0]["documentId"], body["data"][0]["id"]);
}

#[actix_web::test]
async fn create_requires_a_data_member_and_valid_fields() {
    let db = helpers::test_db();
    let app = init_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/systems")
        .set_json(json!({ "items": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Data is required");

    let mut payload = system_payload("X");
    payload["data"]["baseUrl"] = json!("localhost");
    let req = test::TestRequest::post()
        .uri("/api/systems")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "baseUrl must be a valid URL (e.g., https://api.example.com or api.example.com)"
    );
}

#[actix_web::test]
async fn list_pagination_meta_matches_the_window() {
    let db = helpers::test_db();
    let app = init_app!(db);

    for i in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/systems")
            .set_json(system_payload(&format!("system-{}", i)))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/systems?pagination%5Bpage%5D=1&pagination%5BpageSize%5D=2")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["pagination"]["page"], 1);
    assert_eq!(body["meta"]["pagination"]["pageSize"], 2);
    assert_eq!(body["meta"]["pagination"]["total"], 5);
    assert_eq!(body["meta"]["pagination"]["pageCount"], 3);

    // Flat parameter form must behave identically.
    let req = test::TestRequest::get()
        .uri("/api/systems?page=3&pageSize=2")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["pagination"]["pageCount"], 3);
}

#[actix_web::test]
async fn oversized_page_size_is_capped() {
    let db = helpers::test_db();
    let app = init_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/systems")
        .set_json(system_payload("X"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::get()
        .uri("/api/systems?pageSize=500")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["meta"]["pagination"]["pageSize"], 100);
    assert_eq!(body["meta"]["pagination"]["pageCount"], 1);
}

#[actix_web::test]
async fn updating_a_missing_document_id_returns_404_without_mutation() {
    let db = helpers::test_db();
    let app = init_app!(db);

    let req = test::TestRequest::put()
        .uri("/api/systems/42")
        .set_json(system_payload("X"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/systems").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["meta"]["pagination"]["total"], 0);
}

#[actix_web::test]
async fn update_and_delete_key_on_document_id() {
    let db = helpers::test_db();
    let app = init_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/systems")
        .set_json(system_payload("before"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let document_id = body["data"]["documentId"].as_i64().unwrap();

    let mut payload = system_payload("after");
    payload["data"]["key"] = json!("k2");
    let req = test::TestRequest::put()
        .uri(&format!("/api/systems/{}", document_id))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "after");
    assert_eq!(body["data"]["documentId"], document_id);

    let req = test::TestRequest::get().uri("/api/systems").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"][0]["name"], "after");
    assert_eq!(body["data"][0]["key"], "k2");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/systems/{}", document_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], Value::Null);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/systems/{}", document_id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn non_numeric_document_id_is_rejected() {
    let db = helpers::test_db();
    let app = init_app!(db);

    let req = test::TestRequest::delete()
        .uri("/api/systems/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Valid documentId is required");
}

#[actix_web::test]
async fn health_probe_reports_the_database_connection() {
    let db = helpers::test_db();
    let app = init_app!(db);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"], "connected");
}

#[actix_web::test]
async fn unknown_routes_answer_a_json_404() {
    let db = helpers::test_db();
    let app = init_app!(db);

    let req = test::TestRequest::get().uri("/api/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Endpoint not found");
}
