// Lectura de grafos desde listas de aristas en texto.
//
// Formato: la primera línea es un encabezado y se ignora; cada línea siguiente
// tiene la forma `origen,destino`. Los vértices se crean la primera vez que se
// mencionan y todas las aristas son no dirigidas con peso 1.
use std::path::Path;

use tracing::debug;

use super::Graph;
use crate::error::GraphError;

const SEPARADOR_VERTICE: char = ',';

pub fn parse_edge_list(text: &str) -> Result<Graph<String>, GraphError> {
    let mut grafo: Graph<String> = Graph::undirected();

    for (i, linea) in text.lines().enumerate().skip(1) {
        let linea = linea.trim();
        if linea.is_empty() {
            continue;
        }
        let partes: Vec<&str> = linea.split(SEPARADOR_VERTICE).map(str::trim).collect();
        let (origen, destino) = match partes.as_slice() {
            [o, d] if !o.is_empty() && !d.is_empty() => (o.to_string(), d.to_string()),
            _ => {
                return Err(GraphError::MalformedEdgeLine { line: i + 1, content: linea.to_string() });
            }
        };

        if !grafo.contains(&origen) {
            grafo.add_vertex(origen.clone())?;
        }
        if !grafo.contains(&destino) {
            grafo.add_vertex(destino.clone())?;
        }
        grafo.add_unit_edge(&origen, &destino)?;
    }

    debug!("[edge_list] {} vértices leídos", grafo.len());
    Ok(grafo)
}

pub fn read_edge_list<P: AsRef<Path>>(path: P) -> Result<Graph<String>, GraphError> {
    let contenido = std::fs::read_to_string(path)?;
    parse_edge_list(&contenido)
}
