/// backtracking.rs - Búsqueda exacta (branch and bound) de la partición en k
/// clusters que minimiza la distancia máxima dentro de un cluster.
///
/// Los vértices se asignan en el orden del grafo a uno de los k clusters. El
/// estado de la búsqueda (`SearchState`) se modifica en el lugar y cada
/// asignación se deshace al volver de la recursión, también en las ramas podadas.
///
/// Podas:
/// - Simetría: de los clusters vacíos sólo se prueba el primero.
/// - Cota: si agregar el vértice a un cluster lleva la distancia máxima a un
///   valor >= la mejor solución conocida, esa rama no puede mejorar.
///
/// La mejor solución arranca con el resultado de la heurística greedy.
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use super::distances::{DistanceMatrix, all_pairs_distances};
use super::greedy::{solve_greedy, trivial_partition};
use crate::graph::Graph;
use crate::models::{DistanceTable, Partition};

/// Calcula la tabla de distancias y resuelve.
pub fn solve<V>(grafo: &Graph<V>, k: usize) -> Partition<V>
where
    V: Eq + Hash + Clone + Debug,
{
    let distancias = all_pairs_distances(grafo);
    solve_with_distances(grafo, k, &distancias)
}

pub fn solve_with_distances<V>(grafo: &Graph<V>, k: usize, distancias: &DistanceTable<V>) -> Partition<V>
where
    V: Eq + Hash + Clone + Debug,
{
    let vertices = grafo.vertices();
    if let Some(trivial) = trivial_partition(&vertices, k) {
        return trivial;
    }

    let greedy = solve_greedy(grafo, k, distancias);
    debug!("🧠 [backtracking] {} vértices, k={}, cota greedy={}", vertices.len(), k, greedy.max_distance);

    let matriz = DistanceMatrix::new(&vertices, distancias);
    let mut estado = SearchState::new(&matriz, k, greedy.max_distance);
    estado.search(0, vertices.len());

    debug!(
        "   [backtracking] nodos explorados={}, mejoras={}, óptimo={}",
        estado.nodos, estado.mejoras, estado.best_value
    );

    match estado.best {
        // nunca se mejoró a la cota inicial: la greedy es óptima
        None => greedy,
        Some(mejor) => {
            let clusters = mejor
                .into_iter()
                .filter(|c| !c.is_empty())
                .map(|c| c.into_iter().map(|i| vertices[i].clone()).collect())
                .collect();
            Partition::new(clusters, estado.best_value)
        }
    }
}

/// Estado mutable compartido por toda la recursión.
struct SearchState<'a> {
    matriz: &'a DistanceMatrix,
    k: usize,
    /// Miembros (posiciones de vértice) de cada cluster
    clusters: Vec<Vec<usize>>,
    /// Distancia máxima interna de la asignación parcial
    current_bound: usize,
    best_value: usize,
    best: Option<Vec<Vec<usize>>>,
    nodos: u64,
    mejoras: u32,
}

impl<'a> SearchState<'a> {
    fn new(matriz: &'a DistanceMatrix, k: usize, cota_inicial: usize) -> Self {
        SearchState {
            matriz,
            k,
            clusters: vec![Vec::new(); k],
            current_bound: 0,
            best_value: cota_inicial,
            best: None,
            nodos: 0,
            mejoras: 0,
        }
    }

    fn search(&mut self, v: usize, n: usize) {
        self.nodos += 1;

        if v == n {
            if self.current_bound < self.best_value {
                self.best_value = self.current_bound;
                self.best = Some(self.clusters.clone());
                self.mejoras += 1;
            }
            return;
        }

        let primer_vacio = self.clusters.iter().position(Vec::is_empty);
        for i in 0..self.k {
            if self.clusters[i].is_empty() && Some(i) != primer_vacio {
                continue;
            }
            let maxima = match self.cost_of_adding(i, v) {
                Some(m) => m,
                None => continue,
            };
            if maxima.max(self.current_bound) >= self.best_value {
                continue;
            }
            self.with_assignment(i, v, maxima, |estado| estado.search(v + 1, n));
        }
    }

    /// Distancia máxima de `v` a los miembros del cluster `i`, o `None` si alguna
    /// ya alcanza a la mejor solución.
    fn cost_of_adding(&self, i: usize, v: usize) -> Option<usize> {
        let mut maxima = 0;
        for &w in self.clusters[i].iter() {
            let d = self.matriz.get(v, w);
            if d >= self.best_value {
                return None;
            }
            maxima = maxima.max(d);
        }
        Some(maxima)
    }

    /// Asigna `v` al cluster `i`, ejecuta `f` y restaura el estado exacto previo.
    fn with_assignment<R>(&mut self, i: usize, v: usize, maxima: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        let cota_previa = self.current_bound;

        self.clusters[i].push(v);
        self.current_bound = cota_previa.max(maxima);

        let r = f(self);

        self.current_bound = cota_previa;
        self.clusters[i].pop();
        r
    }
}
