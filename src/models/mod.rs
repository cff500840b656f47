// Estructuras de datos principales
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Distancias en saltos: `tabla[u][v]`. Los pares no alcanzables no aparecen.
pub type DistanceTable<V> = HashMap<V, HashMap<V, usize>>;

/// Distancia usada para un par ausente de la tabla (vértices desconectados).
pub const UNREACHABLE: usize = usize::MAX;

/// Distancia entre `u` y `v`, o `UNREACHABLE` si el par no está en la tabla.
#[inline]
pub fn hops<V: Eq + Hash>(distancias: &DistanceTable<V>, u: &V, v: &V) -> usize {
    distancias.get(u).and_then(|d| d.get(v)).copied().unwrap_or(UNREACHABLE)
}

fn serialize_distance<S: Serializer>(d: &usize, s: S) -> Result<S::Ok, S::Error> {
    if *d == UNREACHABLE { s.serialize_none() } else { s.serialize_some(d) }
}

/// Solución de clustering: hasta k clusters disjuntos y la distancia máxima
/// dentro de un mismo cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition<V> {
    pub clusters: Vec<Vec<V>>,
    #[serde(serialize_with = "serialize_distance")]
    pub max_distance: usize,
}

impl<V> Partition<V> {
    pub fn new(clusters: Vec<Vec<V>>, max_distance: usize) -> Self {
        Partition { clusters, max_distance }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// False si algún cluster junta vértices sin camino entre ellos.
    pub fn is_reachable(&self) -> bool {
        self.max_distance != UNREACHABLE
    }

    pub fn non_empty_clusters(&self) -> impl Iterator<Item = &Vec<V>> + '_ {
        self.clusters.iter().filter(|c| !c.is_empty())
    }
}

/// Resultado de Louvain: comunidad asignada a cada vértice (la comunidad se
/// nombra con el vértice que le dio origen).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Communities<V> {
    pub assignment: Vec<(V, V)>,
    pub modularity: f64,
    pub passes: usize,
}

impl<V: Eq + Clone> Communities<V> {
    pub fn community_of(&self, v: &V) -> Option<&V> {
        self.assignment.iter().find(|(w, _)| w == v).map(|(_, c)| c)
    }

    /// Agrupa los vértices por comunidad. Las comunidades aparecen en el orden en
    /// que se encuentra su primer miembro.
    pub fn groups(&self) -> Vec<Vec<V>> {
        let mut etiquetas: Vec<&V> = Vec::new();
        let mut grupos: Vec<Vec<V>> = Vec::new();
        for (v, c) in self.assignment.iter() {
            match etiquetas.iter().position(|e| *e == c) {
                Some(i) => grupos[i].push(v.clone()),
                None => {
                    etiquetas.push(c);
                    grupos.push(vec![v.clone()]);
                }
            }
        }
        grupos
    }

    pub fn count(&self) -> usize {
        self.groups().len()
    }
}

/// Estrategias de clustering disponibles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Backtracking,
    Greedy,
    Louvain,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Algorithm::Backtracking => "backtracking",
            Algorithm::Greedy => "greedy",
            Algorithm::Louvain => "louvain",
        };
        f.write_str(s)
    }
}

impl FromStr for Algorithm {
    type Err = String;

    /// Acepta el nombre o el número de menú ("1", "3", "4").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "backtracking" | "bt" => Ok(Algorithm::Backtracking),
            "3" | "greedy" => Ok(Algorithm::Greedy),
            "4" | "louvain" => Ok(Algorithm::Louvain),
            other => Err(format!("algoritmo desconocido: {}", other)),
        }
    }
}
