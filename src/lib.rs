// Biblioteca raíz del crate `quickcluster`.
// Grafo, tabla de distancias y las estrategias que parten el grafo en k
// clusters minimizando la distancia máxima dentro de cada uno, más la API HTTP.
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod server;

pub use error::{GraphError, LpError};
pub use graph::Graph;
pub use models::{Algorithm, Communities, DistanceTable, Partition, UNREACHABLE};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
