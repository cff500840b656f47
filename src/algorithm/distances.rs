// Distancias entre todos los pares de vértices por BFS (saltos, sin pesos).
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::graph::Graph;
use crate::models::{DistanceTable, UNREACHABLE, hops};

/// Un BFS por vértice: O(V·(V+E)). Cada arista cuenta como 1 sin importar su
/// peso. Los pares no alcanzables quedan fuera de la tabla.
pub fn all_pairs_distances<V>(grafo: &Graph<V>) -> DistanceTable<V>
where
    V: Eq + Hash + Clone + Debug,
{
    let (vertices, adj) = grafo.dense();
    let mut distancias: DistanceTable<V> = HashMap::with_capacity(vertices.len());

    for origen in 0..vertices.len() {
        let dist_origen = bfs(&adj, origen)
            .into_iter()
            .enumerate()
            .filter(|(_, d)| *d != UNREACHABLE)
            .map(|(w, d)| (vertices[w].clone(), d))
            .collect();
        distancias.insert(vertices[origen].clone(), dist_origen);
    }

    debug!("[distancias] tabla calculada para {} vértices", vertices.len());
    distancias
}

/// Distancias (en saltos) desde `origen`; `UNREACHABLE` para los no visitados.
fn bfs(adj: &[Vec<(usize, f64)>], origen: usize) -> Vec<usize> {
    let mut dist = vec![UNREACHABLE; adj.len()];
    let mut cola: VecDeque<usize> = VecDeque::new();
    dist[origen] = 0;
    cola.push_back(origen);

    while let Some(v) = cola.pop_front() {
        for &(w, _) in adj[v].iter() {
            if dist[w] == UNREACHABLE {
                dist[w] = dist[v] + 1;
                cola.push_back(w);
            }
        }
    }
    dist
}

/// Mayor distancia entre dos vértices de un mismo cluster, sobre todos los
/// clusters (0 para clusters vacíos o unitarios).
pub fn max_intra_cluster_distance<V>(clusters: &[Vec<V>], distancias: &DistanceTable<V>) -> usize
where
    V: Eq + Hash,
{
    let mut maxima = 0;
    for cluster in clusters {
        for (i, v) in cluster.iter().enumerate() {
            for w in cluster.iter().skip(i + 1) {
                maxima = maxima.max(hops(distancias, v, w).max(hops(distancias, w, v)));
            }
        }
    }
    maxima
}

/// Diámetro del grafo en saltos (`UNREACHABLE` si no es conexo).
pub fn diameter<V>(grafo: &Graph<V>, distancias: &DistanceTable<V>) -> usize
where
    V: Eq + Hash + Clone + Debug,
{
    max_intra_cluster_distance(&[grafo.vertices()], distancias)
}

/// Matriz densa de distancias indexada por posición de vértice, para que los
/// solvers no hagan búsquedas en mapas dentro de los ciclos internos.
pub(crate) struct DistanceMatrix {
    filas: Vec<Vec<usize>>,
}

impl DistanceMatrix {
    pub(crate) fn new<V: Eq + Hash>(vertices: &[V], distancias: &DistanceTable<V>) -> Self {
        let filas = vertices
            .iter()
            .map(|v| vertices.iter().map(|w| hops(distancias, v, w)).collect())
            .collect();
        DistanceMatrix { filas }
    }

    /// Distancia simétrica: la mayor de los dos sentidos (en grafos no dirigidos
    /// coinciden).
    #[inline]
    pub(crate) fn get(&self, a: usize, b: usize) -> usize {
        self.filas[a][b].max(self.filas[b][a])
    }

    #[inline]
    pub(crate) fn directed(&self, a: usize, b: usize) -> usize {
        self.filas[a][b]
    }
}
