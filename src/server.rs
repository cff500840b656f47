use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Condition;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use serde_json::json;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::algorithm::LouvainConfig;
use crate::api_json::{SolveRequest, ValidateRequest, run_solve, run_validate};
use crate::config::AppConfig;

/// Estado compartido por los handlers.
#[derive(Clone)]
pub struct AppState {
    /// Limita cuántos solvers corren a la vez en el pool bloqueante
    pub solvers: Arc<Semaphore>,
    pub louvain: LouvainConfig,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        AppState { solvers: Arc::new(Semaphore::new(config.workers.max(1))), louvain: config.louvain }
    }
}

/// POST /solve
async fn solve_handler(state: web::Data<AppState>, body: web::Json<SolveRequest>) -> impl Responder {
    let req = body.into_inner();
    let start = std::time::Instant::now();

    let permit = match state.solvers.clone().acquire_owned().await {
        Ok(p) => p,
        Err(_) => return HttpResponse::InternalServerError().json(json!({"error": "failed to acquire semaphore"})),
    };

    let louvain = state.louvain;
    let algoritmo = req.algorithm;
    let blocking_handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        run_solve(&req, &louvain)
    });

    let resultado = match blocking_handle.await {
        Ok(res) => res,
        Err(e) => return HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)})),
    };

    match resultado {
        Ok(resp) => {
            debug!("⏱️ [server] /solve {} en {:?}", algoritmo, start.elapsed());
            HttpResponse::Ok().json(resp)
        }
        Err(e) => HttpResponse::BadRequest().json(json!({"error": format!("invalid graph: {}", e)})),
    }
}

/// POST /validate. Calcula todas las distancias, así que corre igual que /solve.
async fn validate_handler(state: web::Data<AppState>, body: web::Json<ValidateRequest>) -> impl Responder {
    let req = body.into_inner();

    let permit = match state.solvers.clone().acquire_owned().await {
        Ok(p) => p,
        Err(_) => return HttpResponse::InternalServerError().json(json!({"error": "failed to acquire semaphore"})),
    };

    let blocking_handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        run_validate(&req)
    });

    match blocking_handle.await {
        Ok(Ok(valid)) => HttpResponse::Ok().json(json!({"valid": valid})),
        Ok(Err(e)) => HttpResponse::BadRequest().json(json!({"error": format!("invalid graph: {}", e)})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)})),
    }
}

async fn help_handler() -> impl Responder {
    let example = json!({
        "edges": [["0", "1"], ["1", "2"], ["2", "3"], ["3", "4"]],
        "vertices": [],
        "directed": false,
        "k": 2,
        "algorithm": "backtracking"
    });

    HttpResponse::Ok().json(json!({
        "description": "API de clustering de grafos. POST /solve parte el grafo en k clusters minimizando la distancia máxima (en saltos) dentro de un cluster. POST /validate verifica una partición.",
        "algorithms": ["backtracking", "greedy", "louvain"],
        "post_example": example,
        "validate_example": {
            "edges": [["A", "B"], ["C", "D"]],
            "k": 2,
            "max_distance": 1,
            "clusters": [["A", "B"], ["C", "D"]]
        },
        "note": "louvain ignora k y optimiza modularidad; max_distance es null si un cluster junta vértices sin camino entre ellos."
    }))
}

/// Registra las rutas; se usa en `run_server` y en los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/solve", web::post().to(solve_handler))
        .route("/validate", web::post().to(validate_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let state = AppState::new(&config);
    let cors = config.cors;
    info!("🚀 [server] escuchando en http://{} ({} solvers concurrentes)", config.bind_addr, config.workers);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Condition::new(cors, Cors::permissive()))
            .configure(configure)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
