// Verificador de soluciones de clustering. Nunca falla: devuelve false ante la
// primera condición que no se cumple.
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::graph::Graph;
use crate::models::{DistanceTable, UNREACHABLE, hops};

/// Comprueba, en orden:
/// 1. a lo sumo `k` clusters;
/// 2. ningún vértice repetido;
/// 3. la unión de los clusters es exactamente el conjunto de vértices del grafo;
/// 4. toda distancia entre miembros de un mismo cluster es <= `max_distance`
///    (un par sin camino no cumple nunca).
pub fn validate<V>(
    grafo: &Graph<V>,
    k: usize,
    max_distance: usize,
    solucion: &[Vec<V>],
    distancias: &DistanceTable<V>,
) -> bool
where
    V: Eq + Hash + Clone + Debug,
{
    if solucion.len() > k {
        debug!("[validador] {} clusters > k={}", solucion.len(), k);
        return false;
    }

    let mut visitados: HashSet<&V> = HashSet::new();
    for cluster in solucion {
        for v in cluster {
            if !grafo.contains(v) || !visitados.insert(v) {
                debug!("[validador] vértice ajeno o repetido: {:?}", v);
                return false;
            }
        }
    }
    if visitados.len() != grafo.len() {
        debug!("[validador] faltan {} vértices", grafo.len() - visitados.len());
        return false;
    }

    for cluster in solucion {
        for v in cluster {
            for w in cluster {
                if v == w {
                    continue;
                }
                let d = hops(distancias, v, w);
                if d == UNREACHABLE || d > max_distance {
                    debug!("[validador] {:?} y {:?} a distancia {} (máximo {})", v, w, d, max_distance);
                    return false;
                }
            }
        }
    }
    true
}
