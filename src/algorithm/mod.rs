// Estrategias de clustering sobre un mismo modelo: grafo + tabla de distancias.
//
// Flujo: Graph -> all_pairs_distances (una vez) -> estrategia -> Partition
// -> (opcional) validate.
pub mod backtracking;
pub mod distances;
pub mod greedy;
pub mod louvain;
pub mod lp;
pub mod validator;

pub use backtracking::{solve, solve_with_distances};
pub use distances::{all_pairs_distances, diameter, max_intra_cluster_distance};
pub use greedy::solve_greedy;
pub use louvain::{LouvainConfig, solve_louvain, solve_louvain_with};
pub use lp::{LpBackend, solve_lp};
pub use validator::validate;

use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;
use tracing::info;

use crate::graph::Graph;
use crate::models::{Algorithm, DistanceTable, Partition};

/// Resultado de `run_algorithm`. `modularity` sólo se informa para Louvain.
#[derive(Debug, Clone, Serialize)]
pub struct ClusteringOutcome<V> {
    pub algorithm: Algorithm,
    pub partition: Partition<V>,
    pub modularity: Option<f64>,
}

/// Calcula la tabla de distancias una vez y ejecuta la estrategia elegida.
///
/// Louvain ignora `k`; su partición son las comunidades encontradas y la
/// distancia máxima se calcula después, sólo para informarla.
pub fn run_algorithm<V>(grafo: &Graph<V>, k: usize, algoritmo: Algorithm, louvain: &LouvainConfig) -> ClusteringOutcome<V>
where
    V: Eq + Hash + Clone + Debug,
{
    let distancias = all_pairs_distances(grafo);
    run_with_distances(grafo, k, algoritmo, louvain, &distancias)
}

pub fn run_with_distances<V>(
    grafo: &Graph<V>,
    k: usize,
    algoritmo: Algorithm,
    louvain: &LouvainConfig,
    distancias: &DistanceTable<V>,
) -> ClusteringOutcome<V>
where
    V: Eq + Hash + Clone + Debug,
{
    info!("🔁 [algorithm] {} sobre {} vértices (k={})", algoritmo, grafo.len(), k);
    let (partition, modularity) = match algoritmo {
        Algorithm::Backtracking => (solve_with_distances(grafo, k, distancias), None),
        Algorithm::Greedy => (solve_greedy(grafo, k, distancias), None),
        Algorithm::Louvain => {
            let comunidades = solve_louvain_with(grafo, louvain);
            let grupos = comunidades.groups();
            let dist_max = max_intra_cluster_distance(&grupos, distancias);
            (Partition::new(grupos, dist_max), Some(comunidades.modularity))
        }
    };
    ClusteringOutcome { algorithm: algoritmo, partition, modularity }
}
