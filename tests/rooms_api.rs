//! HTTP surface tests against the in-memory application state.

use actix_web::{test, web, App};
use poker_backend::routes;
use poker_backend::state::app_state::AppState;
use serde_json::{json, Value};

fn app_data() -> web::Data<AppState> {
    web::Data::new(AppState::new_in_memory())
}

#[actix_web::test]
async fn health_endpoint_responds_ok() {
    let app =
        test::init_service(App::new().app_data(app_data()).configure(routes::configure)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
}

#[actix_web::test]
async fn create_room_roundtrips_the_backlog() {
    let app =
        test::init_service(App::new().app_data(app_data()).configure(routes::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .set_json(json!({
            "name": "sprint-7",
            "creator": "amelie",
            "mode": "unanimity",
            "backlog": [{"feature": "Connexion utilisateur"}, {"feature": "Recherche avancée"}]
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["name"], "sprint-7");
    assert_eq!(created["mode"], "unanimity");
    assert_eq!(
        created["backlog"]["pending"][0]["feature"],
        "Connexion utilisateur"
    );

    let req = test::TestRequest::get()
        .uri("/api/rooms/sprint-7")
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["creator"], "amelie");
}

#[actix_web::test]
async fn create_is_get_or_create_on_an_existing_name() {
    let app =
        test::init_service(App::new().app_data(app_data()).configure(routes::configure)).await;

    for creator in ["amelie", "latecomer"] {
        let req = test::TestRequest::post()
            .uri("/api/rooms")
            .set_json(json!({
                "name": "retro",
                "creator": creator,
                "mode": "absolute_majority",
                "backlog": [{"feature": "a"}]
            }))
            .to_request();
        let room: Value = test::call_and_read_body_json(&app, req).await;
        // The second create returns the first creator's room untouched.
        assert_eq!(room["creator"], "amelie");
    }
}

#[actix_web::test]
async fn unknown_room_is_a_problem_details_404() {
    let app =
        test::init_service(App::new().app_data(app_data()).configure(routes::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/rooms/missing")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "ROOM_NOT_FOUND");
    assert_eq!(body["status"], 404);
}

#[actix_web::test]
async fn create_room_requires_a_name_and_creator() {
    let app =
        test::init_service(App::new().app_data(app_data()).configure(routes::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .set_json(json!({
            "name": " ",
            "creator": "amelie",
            "mode": "unanimity"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
}

#[actix_web::test]
async fn delete_room_then_404() {
    let app =
        test::init_service(App::new().app_data(app_data()).configure(routes::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .set_json(json!({
            "name": "short-lived",
            "creator": "amelie",
            "mode": "unanimity",
            "backlog": []
        }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete()
        .uri("/api/rooms/short-lived")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 204);

    let req = test::TestRequest::get()
        .uri("/api/rooms/short-lived")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);
}

#[actix_web::test]
async fn finalized_backlog_endpoint_starts_empty() {
    let app =
        test::init_service(App::new().app_data(app_data()).configure(routes::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .set_json(json!({
            "name": "sprint-8",
            "creator": "amelie",
            "mode": "unanimity",
            "backlog": [{"feature": "a"}]
        }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/rooms/sprint-8/backlog")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}
