use serde::{Deserialize, Serialize};

use crate::algorithm::{LouvainConfig, all_pairs_distances, run_with_distances, validate};
use crate::error::GraphError;
use crate::graph::Graph;
use crate::models::{Algorithm, UNREACHABLE};

/// Arista de entrada: `["a", "b"]` (peso 1) o `["a", "b", 2.5]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeInput {
	Weighted(String, String, f64),
	Unit(String, String),
}

/// Grafo tal como llega en el JSON.
///
/// ```json
/// {
///   "vertices": ["aislado"],
///   "directed": false,
///   "edges": [["A", "B"], ["B", "C", 2.0]]
/// }
/// ```
///
/// - `vertices`: vértices que se agregan primero, en ese orden (opcional; sirve
///   para vértices sin aristas). Repetir uno es un error.
/// - `edges`: los extremos que no existan se agregan al mencionarse.
/// - `directed`: por defecto `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphInput {
	#[serde(default)]
	pub vertices: Vec<String>,
	#[serde(default)]
	pub directed: bool,
	pub edges: Vec<EdgeInput>,
}

impl GraphInput {
	pub fn build(&self) -> Result<Graph<String>, GraphError> {
		let mut grafo = Graph::with_vertices(self.directed, self.vertices.iter().cloned())?;
		for arista in self.edges.iter() {
			let (u, v, peso) = match arista {
				EdgeInput::Weighted(u, v, p) => (u, v, *p),
				EdgeInput::Unit(u, v) => (u, v, crate::graph::DEFAULT_WEIGHT),
			};
			for extremo in [u, v] {
				if !grafo.contains(extremo) {
					grafo.add_vertex(extremo.clone())?;
				}
			}
			grafo.add_edge(u, v, peso)?;
		}
		Ok(grafo)
	}
}

/// Cuerpo de `POST /solve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
	#[serde(flatten)]
	pub graph: GraphInput,
	/// Cantidad de clusters (ignorado por Louvain)
	pub k: usize,
	pub algorithm: Algorithm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
	pub algorithm: Algorithm,
	pub k: usize,
	pub clusters: Vec<Vec<String>>,
	/// `null` cuando algún cluster junta vértices sin camino entre ellos
	pub max_distance: Option<usize>,
	pub modularity: Option<f64>,
	pub valid: bool,
}

/// Cuerpo de `POST /validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
	#[serde(flatten)]
	pub graph: GraphInput,
	pub k: usize,
	pub max_distance: usize,
	pub clusters: Vec<Vec<String>>,
}

pub fn parse_json_input(json_str: &str) -> Result<SolveRequest, serde_json::Error> {
	serde_json::from_str::<SolveRequest>(json_str)
}

/// Construye el grafo, calcula distancias, ejecuta el algoritmo y verifica la
/// solución con su propio objetivo.
pub fn run_solve(req: &SolveRequest, louvain: &LouvainConfig) -> Result<SolveResponse, GraphError> {
	let grafo = req.graph.build()?;
	let distancias = all_pairs_distances(&grafo);
	let resultado = run_with_distances(&grafo, req.k, req.algorithm, louvain, &distancias);
	let particion = resultado.partition;

	// Louvain no respeta k: se valida contra la cantidad de comunidades
	let k_validacion = match req.algorithm {
		Algorithm::Louvain => particion.len(),
		_ => req.k,
	};
	let valid = validate(&grafo, k_validacion, particion.max_distance, &particion.clusters, &distancias);

	Ok(SolveResponse {
		algorithm: req.algorithm,
		k: req.k,
		max_distance: (particion.max_distance != UNREACHABLE).then_some(particion.max_distance),
		clusters: particion.clusters,
		modularity: resultado.modularity,
		valid,
	})
}

pub fn run_validate(req: &ValidateRequest) -> Result<bool, GraphError> {
	let grafo = req.graph.build()?;
	let distancias = all_pairs_distances(&grafo);
	Ok(validate(&grafo, req.k, req.max_distance, &req.clusters, &distancias))
}
