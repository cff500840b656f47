// Configuración del servicio leída de variables de entorno (y `.env` si existe).
use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::algorithm::louvain::{DEFAULT_MAX_PASSES, LouvainConfig};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Dirección donde escucha el servidor HTTP
    pub bind_addr: String,
    /// Cantidad de solvers que pueden correr a la vez
    pub workers: usize,
    pub louvain: LouvainConfig,
    /// CORS permisivo para clientes web
    pub cors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: DEFAULT_BIND.to_string(),
            workers: num_cpus::get().max(1),
            louvain: LouvainConfig::default(),
            cors: false,
        }
    }
}

// Carga `.env` si existe; las variables ya definidas en el entorno tienen prioridad.
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl AppConfig {
    /// Honors QUICKCLUSTER_BIND / QUICKCLUSTER_WORKERS /
    /// QUICKCLUSTER_LOUVAIN_MAX_PASSES / QUICKCLUSTER_CORS.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables inyectable (tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defecto = AppConfig::default();
        let bind_addr = lookup("QUICKCLUSTER_BIND")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defecto.bind_addr);
        let workers = parse_or("QUICKCLUSTER_WORKERS", lookup("QUICKCLUSTER_WORKERS"), defecto.workers).max(1);
        let max_passes = parse_or(
            "QUICKCLUSTER_LOUVAIN_MAX_PASSES",
            lookup("QUICKCLUSTER_LOUVAIN_MAX_PASSES"),
            DEFAULT_MAX_PASSES,
        );
        let cors = lookup("QUICKCLUSTER_CORS")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        AppConfig { bind_addr, workers, louvain: LouvainConfig { max_passes }, cors }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, defecto: T) -> T {
    match raw {
        None => defecto,
        Some(s) => match s.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                warn!("[config] valor inválido para {}: {:?}, se usa {}", key, s, defecto);
                defecto
            }
        },
    }
}
