// Errores del dominio: precondiciones violadas sobre el grafo y fallos del
// backend de programación lineal. Los solvers de clustering no devuelven errores.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// Se intentó agregar un vértice que ya pertenece al grafo
    #[error("el vértice {0} ya pertenece al grafo")]
    DuplicateVertex(String),

    /// Se referenció un vértice que no está en el grafo
    #[error("el vértice {0} no pertenece al grafo")]
    UnknownVertex(String),

    #[error("no existe la arista {from} -> {to}")]
    NoSuchEdge { from: String, to: String },

    /// Línea de lista de aristas que no tiene la forma `origen,destino`
    #[error("línea {line} mal formada: {content:?}")]
    MalformedEdgeLine { line: usize, content: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub(crate) fn duplicate<V: std::fmt::Debug>(v: &V) -> Self {
        GraphError::DuplicateVertex(format!("{:?}", v))
    }

    pub(crate) fn unknown<V: std::fmt::Debug>(v: &V) -> Self {
        GraphError::UnknownVertex(format!("{:?}", v))
    }

    pub(crate) fn no_edge<V: std::fmt::Debug>(from: &V, to: &V) -> Self {
        GraphError::NoSuchEdge { from: format!("{:?}", from), to: format!("{:?}", to) }
    }
}

#[derive(Debug, Error)]
pub enum LpError {
    /// El backend externo falló al resolver el modelo
    #[error("backend LP: {0}")]
    Backend(String),

    #[error("la solución no contiene la variable {0}")]
    MissingVariable(String),

    #[error("el modelo no tiene solución factible")]
    Infeasible,
}
