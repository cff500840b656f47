use actix_web::{App, test, web};
use serde_json::{Value, json};

use quickcluster::config::AppConfig;
use quickcluster::server::{AppState, configure};

macro_rules! app {
    () => {
        test::init_service(
            App::new().app_data(web::Data::new(AppState::new(&AppConfig::default()))).configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_solve_backtracking() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({
            "edges": [["0", "1"], ["1", "2"], ["2", "3"], ["3", "4"]],
            "k": 2,
            "algorithm": "backtracking"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    eprintln!("🌐 /solve -> {}", body);
    assert_eq!(body["max_distance"], 2);
    assert_eq!(body["valid"], true);
    assert_eq!(body["algorithm"], "backtracking");
    assert!(body["modularity"].is_null());
}

#[actix_web::test]
async fn test_solve_louvain_informa_modularidad() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({
            "edges": [["A", "B"], ["C", "D"]],
            "k": 2,
            "algorithm": "louvain"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["modularity"].as_f64().is_some());
    assert_eq!(body["clusters"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["valid"], true);
}

#[actix_web::test]
async fn test_solve_distancia_inalcanzable_es_null() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({"edges": [["A", "B"]], "vertices": ["C"], "k": 1, "algorithm": "greedy"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["max_distance"].is_null());
    assert_eq!(body["valid"], false);
}

#[actix_web::test]
async fn test_solve_k_enorme() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({"edges": [["A", "B"], ["B", "C"]], "k": usize::MAX, "algorithm": "backtracking"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["clusters"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["max_distance"], 0);
    assert_eq!(body["valid"], true);
}

#[actix_web::test]
async fn test_solve_grafo_invalido_es_400() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({"edges": [], "vertices": ["A", "A"], "k": 1, "algorithm": "greedy"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_validate() {
    let app = app!();
    let valida = test::TestRequest::post()
        .uri("/validate")
        .set_json(json!({
            "edges": [["A", "B"], ["C", "D"]],
            "k": 2,
            "max_distance": 1,
            "clusters": [["A", "B"], ["C", "D"]]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, valida).await;
    assert_eq!(body["valid"], true);

    let invalida = test::TestRequest::post()
        .uri("/validate")
        .set_json(json!({
            "edges": [["A", "B"], ["C", "D"]],
            "k": 2,
            "max_distance": 1,
            "clusters": [["A", "C"], ["B", "D"]]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, invalida).await;
    assert_eq!(body["valid"], false);
}

#[actix_web::test]
async fn test_help() {
    let app = app!();
    let req = test::TestRequest::get().uri("/help").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["algorithms"].as_array().map(Vec::len), Some(3));
}

#[actix_web::test]
async fn test_validate_respeta_el_semaforo() {
    // con el único permiso tomado, /validate espera a que se libere
    let config = AppConfig { workers: 1, ..AppConfig::default() };
    let state = AppState::new(&config);
    let app = test::init_service(App::new().app_data(web::Data::new(state.clone())).configure(configure)).await;

    let permiso = state.solvers.clone().acquire_owned().await.unwrap();
    let req = test::TestRequest::post()
        .uri("/validate")
        .set_json(json!({"edges": [["A", "B"]], "k": 1, "max_distance": 1, "clusters": [["A", "B"]]}))
        .to_request();
    let pendiente = test::call_service(&app, req);
    tokio::pin!(pendiente);
    let antes = tokio::time::timeout(std::time::Duration::from_millis(50), &mut pendiente).await;
    assert!(antes.is_err(), "no debe responder sin permiso libre");

    drop(permiso);
    let resp = pendiente.await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], true);
}

#[actix_web::test]
async fn test_validate_grafo_invalido_es_400() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/validate")
        .set_json(json!({"edges": [], "vertices": ["A", "A"], "k": 1, "max_distance": 0, "clusters": [["A"]]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}
