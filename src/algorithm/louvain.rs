/// louvain.rs - Detección de comunidades por modularidad (Louvain de un nivel).
///
/// No recibe k ni distancia máxima: cada vértice arranca en su propia
/// comunidad y se mueve a la comunidad vecina que más aumenta la modularidad,
/// sólo si la ganancia supera a la de quedarse en la propia. No hay agregación
/// del grafo en niveles.
///
///   Q  = Σ_c [ in(c) / 2W − (tot(c) / 2W)² ]
///   ΔQ = ( k_v,c − k_v · tot(c) / 2W ) / 2W
///
/// con W el peso total de las aristas, `in(c)` el peso interno de c (cada arista
/// contada en ambos sentidos), `tot(c)` la suma de grados de c y `k_v,c` el peso
/// de las aristas de v hacia c.
///
/// Los grafos dirigidos se tratan como no dirigidos: cada arco u -> v aporta
/// también v -> u con el mismo peso, así W es la suma de pesos de los arcos.
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::graph::Graph;
use crate::models::Communities;

pub const DEFAULT_MAX_PASSES: usize = 1000;

#[derive(Debug, Clone, Copy)]
pub struct LouvainConfig {
    /// Tope de pasadas completas sobre los vértices
    pub max_passes: usize,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        LouvainConfig { max_passes: DEFAULT_MAX_PASSES }
    }
}

pub fn solve_louvain<V>(grafo: &Graph<V>) -> Communities<V>
where
    V: Eq + Hash + Clone + Debug,
{
    solve_louvain_with(grafo, &LouvainConfig::default())
}

pub fn solve_louvain_with<V>(grafo: &Graph<V>, config: &LouvainConfig) -> Communities<V>
where
    V: Eq + Hash + Clone + Debug,
{
    let (vertices, mut adj) = grafo.dense();
    if grafo.is_directed() {
        adj = as_undirected(adj);
    }
    let mut louvain = Louvain::new(adj);
    let passes = louvain.improve_partition(config.max_passes);
    let modularidad = louvain.modularity();
    debug!("✅ [louvain] {} pasadas, modularidad={:.4}", passes, modularidad);

    let assignment = louvain
        .comunidad
        .iter()
        .enumerate()
        .map(|(v, &c)| (vertices[v].clone(), vertices[c].clone()))
        .collect();
    Communities { assignment, modularity: modularidad, passes }
}

/// Agrega el arco inverso de cada arco (los lazos quedan como están).
fn as_undirected(adj: Vec<Vec<(usize, f64)>>) -> Vec<Vec<(usize, f64)>> {
    let mut simetrica = adj.clone();
    for (u, arcos) in adj.iter().enumerate() {
        for &(v, peso) in arcos.iter() {
            if u != v {
                simetrica[v].push((u, peso));
            }
        }
    }
    simetrica
}

struct Louvain {
    adj: Vec<Vec<(usize, f64)>>,
    /// Comunidad de cada vértice (identificada por la posición de un vértice)
    comunidad: Vec<usize>,
    grado: Vec<f64>,
    lazo: Vec<f64>,
    /// Suma de grados de cada comunidad
    tot: Vec<f64>,
    /// Peso de aristas internas de cada comunidad
    interno: Vec<f64>,
    peso_total: f64,
}

impl Louvain {
    fn new(adj: Vec<Vec<(usize, f64)>>) -> Self {
        let n = adj.len();
        let grado: Vec<f64> = adj.iter().map(|ady| ady.iter().map(|&(_, p)| p).sum()).collect();
        let lazo: Vec<f64> = (0..n)
            .map(|v| adj[v].iter().filter(|&&(w, _)| w == v).map(|&(_, p)| p).sum())
            .collect();
        let peso_total = grado.iter().sum::<f64>() / 2.0;
        Louvain {
            comunidad: (0..n).collect(),
            tot: grado.clone(),
            interno: lazo.clone(),
            grado,
            lazo,
            adj,
            peso_total,
        }
    }

    /// Peso de las aristas de `v` (sin lazos) hacia vértices de la comunidad `c`.
    fn weight_to_community(&self, v: usize, c: usize) -> f64 {
        self.adj[v]
            .iter()
            .filter(|&&(w, _)| w != v && self.comunidad[w] == c)
            .map(|&(_, p)| p)
            .sum()
    }

    /// Mueve vértices hasta que una pasada completa no mueva ninguno, se repita
    /// una partición ya vista o se alcance el tope de pasadas. Devuelve la
    /// cantidad de pasadas.
    fn improve_partition(&mut self, max_passes: usize) -> usize {
        let dos_w = 2.0 * self.peso_total;
        let mut historial: HashSet<Vec<usize>> = HashSet::new();
        let mut pasadas = 0;
        let mut mejora = true;

        while mejora {
            if !historial.insert(self.comunidad.clone()) {
                debug!("   [louvain] partición repetida tras {} pasadas, se corta el ciclo", pasadas);
                break;
            }
            if pasadas >= max_passes {
                warn!("[louvain] se alcanzó el tope de {} pasadas", max_passes);
                break;
            }
            pasadas += 1;
            mejora = false;

            if dos_w <= 0.0 {
                break;
            }

            for v in 0..self.adj.len() {
                let actual = self.comunidad[v];
                let k_v = self.grado[v];

                // sacar a v de su comunidad
                let k_v_actual = self.weight_to_community(v, actual);
                self.tot[actual] -= k_v;
                self.interno[actual] -= 2.0 * k_v_actual + self.lazo[v];

                let mut vecinas: Vec<usize> = Vec::new();
                for &(w, _) in self.adj[v].iter() {
                    let c = self.comunidad[w];
                    if c != actual && !vecinas.contains(&c) {
                        vecinas.push(c);
                    }
                }

                // volver a la comunidad propia también es candidato: otra
                // comunidad tiene que superarla estrictamente
                let mut mejor = actual;
                let mut mejor_delta: f64 = ((k_v_actual - k_v * self.tot[actual] / dos_w) / dos_w).max(0.0);
                for c in vecinas {
                    let k_v_c = self.weight_to_community(v, c);
                    let delta = (k_v_c - k_v * self.tot[c] / dos_w) / dos_w;
                    if delta > mejor_delta {
                        mejor_delta = delta;
                        mejor = c;
                    }
                }

                let k_v_destino = if mejor == actual { k_v_actual } else { self.weight_to_community(v, mejor) };
                self.comunidad[v] = mejor;
                self.tot[mejor] += k_v;
                self.interno[mejor] += 2.0 * k_v_destino + self.lazo[v];
                if mejor != actual {
                    mejora = true;
                }
            }
        }
        pasadas
    }

    fn modularity(&self) -> f64 {
        if self.peso_total <= 0.0 {
            return 0.0;
        }
        let dos_w = 2.0 * self.peso_total;
        let activas: HashSet<usize> = self.comunidad.iter().copied().collect();
        activas
            .into_iter()
            .map(|c| self.interno[c] / dos_w - (self.tot[c] / dos_w).powi(2))
            .sum()
    }
}
