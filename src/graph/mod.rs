/// graph - Grafo con pesos sobre petgraph, con ids de vértice opacos.
///
/// Los vértices se identifican por cualquier valor `Eq + Hash + Clone`. Internamente
/// se guarda un `StableGraph` dirigido; en grafos no dirigidos cada arista se
/// espeja (u->v y v->u con el mismo peso), igual que un mapa de adyacencias.
pub mod edge_list;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;

use crate::error::GraphError;

pub use edge_list::{parse_edge_list, read_edge_list};

/// Peso usado cuando el llamador no indica uno.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Graph<V> {
    directed: bool,
    inner: StableGraph<V, f64>,
    index: HashMap<V, NodeIndex>,
}

impl<V> Graph<V>
where
    V: Eq + Hash + Clone + Debug,
{
    pub fn new(directed: bool) -> Self {
        Graph { directed, inner: StableGraph::new(), index: HashMap::new() }
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Crea un grafo con los vértices indicados (en ese orden) y sin aristas.
    pub fn with_vertices<I>(directed: bool, vertices: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = V>,
    {
        let mut g = Self::new(directed);
        for v in vertices {
            g.add_vertex(v)?;
        }
        Ok(g)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn add_vertex(&mut self, v: V) -> Result<(), GraphError> {
        if self.index.contains_key(&v) {
            return Err(GraphError::duplicate(&v));
        }
        let idx = self.inner.add_node(v.clone());
        self.index.insert(v, idx);
        Ok(())
    }

    /// Borra el vértice junto con todas las aristas que lo tocan.
    pub fn remove_vertex(&mut self, v: &V) -> Result<(), GraphError> {
        let idx = self.index.remove(v).ok_or_else(|| GraphError::unknown(v))?;
        self.inner.remove_node(idx);
        Ok(())
    }

    /// Agrega (o reemplaza el peso de) la arista `u -> v`. En grafos no dirigidos
    /// también `v -> u`.
    pub fn add_edge(&mut self, u: &V, v: &V, weight: f64) -> Result<(), GraphError> {
        let (a, b) = self.endpoints(u, v)?;
        self.inner.update_edge(a, b, weight);
        if !self.directed && a != b {
            self.inner.update_edge(b, a, weight);
        }
        Ok(())
    }

    pub fn add_unit_edge(&mut self, u: &V, v: &V) -> Result<(), GraphError> {
        self.add_edge(u, v, DEFAULT_WEIGHT)
    }

    pub fn remove_edge(&mut self, u: &V, v: &V) -> Result<(), GraphError> {
        let (a, b) = self.endpoints(u, v)?;
        let e = self.inner.find_edge(a, b).ok_or_else(|| GraphError::no_edge(u, v))?;
        self.inner.remove_edge(e);
        if !self.directed && a != b {
            if let Some(back) = self.inner.find_edge(b, a) {
                self.inner.remove_edge(back);
            }
        }
        Ok(())
    }

    pub fn are_joined(&self, u: &V, v: &V) -> bool {
        match (self.index.get(u), self.index.get(v)) {
            (Some(&a), Some(&b)) => self.inner.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn weight(&self, u: &V, v: &V) -> Result<f64, GraphError> {
        let (a, b) = self.endpoints(u, v)?;
        let e = self.inner.find_edge(a, b).ok_or_else(|| GraphError::no_edge(u, v))?;
        Ok(self.inner[e])
    }

    /// Adyacentes de `v` en el orden en que se agregaron las aristas.
    pub fn adjacent(&self, v: &V) -> Result<Vec<V>, GraphError> {
        Ok(self.adjacent_weighted(v)?.into_iter().map(|(w, _)| w).collect())
    }

    pub fn adjacent_weighted(&self, v: &V) -> Result<Vec<(V, f64)>, GraphError> {
        let idx = *self.index.get(v).ok_or_else(|| GraphError::unknown(v))?;
        Ok(self
            .outgoing(idx)
            .into_iter()
            .map(|(w, peso)| (self.inner[w].clone(), peso))
            .collect())
    }

    pub fn contains(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Vértices en orden de inserción. El orden no se garantiza después de borrar
    /// vértices (los huecos liberados se reutilizan).
    pub fn vertices(&self) -> Vec<V> {
        self.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.inner.node_indices().map(move |i| &self.inner[i])
    }

    /// Vista densa del grafo para los algoritmos: vértices en orden de iteración y,
    /// por posición, la lista de `(posición_vecino, peso)`.
    pub(crate) fn dense(&self) -> (Vec<V>, Vec<Vec<(usize, f64)>>) {
        let nodes: Vec<NodeIndex> = self.inner.node_indices().collect();
        let pos: HashMap<NodeIndex, usize> =
            nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();
        let vertices = nodes.iter().map(|&n| self.inner[n].clone()).collect();
        let adj = nodes
            .iter()
            .map(|&n| self.outgoing(n).into_iter().map(|(w, peso)| (pos[&w], peso)).collect())
            .collect();
        (vertices, adj)
    }

    fn outgoing(&self, idx: NodeIndex) -> Vec<(NodeIndex, f64)> {
        // petgraph recorre las aristas de la más nueva a la más vieja
        let mut out: Vec<(NodeIndex, f64)> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), *e.weight()))
            .collect();
        out.reverse();
        out
    }

    fn endpoints(&self, u: &V, v: &V) -> Result<(NodeIndex, NodeIndex), GraphError> {
        let a = *self.index.get(u).ok_or_else(|| GraphError::unknown(u))?;
        let b = *self.index.get(v).ok_or_else(|| GraphError::unknown(v))?;
        Ok((a, b))
    }
}

impl<V> Default for Graph<V>
where
    V: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::undirected()
    }
}
