/// greedy.rs - Heurística: k vértices más centrales como semillas y asignación
/// del resto a la semilla más cercana.
///
/// No garantiza el óptimo; además de usarse sola, su resultado es la cota
/// inicial del backtracking.
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, warn};

use super::distances::DistanceMatrix;
use crate::graph::Graph;
use crate::models::{DistanceTable, Partition, UNREACHABLE};

pub fn solve_greedy<V>(grafo: &Graph<V>, k: usize, distancias: &DistanceTable<V>) -> Partition<V>
where
    V: Eq + Hash + Clone + Debug,
{
    let vertices = grafo.vertices();
    let n = vertices.len();

    if let Some(trivial) = trivial_partition(&vertices, k) {
        return trivial;
    }

    let matriz = DistanceMatrix::new(&vertices, distancias);
    let semillas: Vec<usize> = central_ranking(&matriz, n).into_iter().take(k).collect();
    debug!("🌱 [greedy] semillas: {:?}", semillas.iter().map(|&s| &vertices[s]).collect::<Vec<_>>());

    let mut asignados: Vec<Vec<usize>> = semillas.iter().map(|&s| vec![s]).collect();
    for v in 0..n {
        if semillas.contains(&v) {
            continue;
        }
        let i = nearest_seed(&matriz, &semillas, v);
        asignados[i].push(v);
    }

    let mut dist_max = 0;
    for cluster in asignados.iter() {
        for (a, &v) in cluster.iter().enumerate() {
            for &w in cluster.iter().skip(a + 1) {
                dist_max = dist_max.max(matriz.get(v, w));
            }
        }
    }

    let clusters = asignados
        .into_iter()
        .map(|c| c.into_iter().map(|i| vertices[i].clone()).collect())
        .collect();
    debug!("✅ [greedy] k={} distancia máxima={}", k, dist_max);
    Partition::new(clusters, dist_max)
}

/// Casos que no requieren buscar: k >= |V| (singletons, óptimo) y k = 0.
///
/// Con k >= |V| se devuelven sólo los |V| singletons: `k` llega del llamador y
/// no se reserva nada en función de él.
pub(crate) fn trivial_partition<V: Clone>(vertices: &[V], k: usize) -> Option<Partition<V>> {
    let n = vertices.len();
    if k >= n {
        let clusters: Vec<Vec<V>> = vertices.iter().map(|v| vec![v.clone()]).collect();
        return Some(Partition::new(clusters, 0));
    }
    if k == 0 {
        warn!("[greedy] k = 0 con {} vértices: no hay partición posible", n);
        return Some(Partition::new(Vec::new(), UNREACHABLE));
    }
    None
}

/// Posiciones ordenadas de más a menos central. La centralidad de un vértice es
/// `(cantidad de inalcanzables, suma de distancias a los alcanzables)`, menor es
/// más central; el orden es estable respecto del orden de los vértices.
fn central_ranking(matriz: &DistanceMatrix, n: usize) -> Vec<usize> {
    let centralidad: Vec<(usize, usize)> = (0..n)
        .map(|v| {
            let mut inalcanzables = 0;
            let mut suma = 0;
            for w in (0..n).filter(|&w| w != v) {
                match matriz.directed(v, w) {
                    UNREACHABLE => inalcanzables += 1,
                    d => suma += d,
                }
            }
            (inalcanzables, suma)
        })
        .collect();

    let mut orden: Vec<usize> = (0..n).collect();
    orden.sort_by_key(|&v| centralidad[v]);
    orden
}

/// Índice de la semilla más cercana a `v`; ante empate gana la primera. Si `v`
/// no es alcanzable desde ninguna semilla va al cluster 0.
fn nearest_seed(matriz: &DistanceMatrix, semillas: &[usize], v: usize) -> usize {
    let mut mejor: Option<(usize, usize)> = None;
    for (i, &c) in semillas.iter().enumerate() {
        let d = matriz.directed(c, v);
        if d == UNREACHABLE {
            continue;
        }
        if mejor.map_or(true, |(_, dm)| d < dm) {
            mejor = Some((i, d));
        }
    }
    mejor.map_or(0, |(i, _)| i)
}
