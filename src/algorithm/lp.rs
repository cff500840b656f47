/// lp.rs - Formulaciones de programación lineal entera.
///
/// El crate sólo arma los modelos y decodifica las soluciones; resolverlos es
/// trabajo de un backend externo que implementa [`LpBackend`]. `to_lp_format`
/// escribe el modelo en formato LP de CPLEX para solvers de línea de comandos.
///
/// Hay dos formulaciones y NO son intercambiables:
/// - `clustering_model`: minimiza la distancia máxima dentro de un cluster
///   (mismo objetivo que backtracking/greedy).
/// - `load_balance_model`: reparte elementos con peso en k grupos minimizando
///   `M − m`, la diferencia entre la mayor y la menor suma de un grupo.
use std::collections::HashMap;
use std::fmt::{Debug, Display, Write as _};
use std::hash::Hash;

use serde::Serialize;
use tracing::debug;

use super::distances::max_intra_cluster_distance;
use super::greedy::trivial_partition;
use crate::error::LpError;
use crate::graph::Graph;
use crate::models::{DistanceTable, Partition, UNREACHABLE, hops};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sense {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VarKind {
    Binary,
    Integer,
    Continuous,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
    /// `None` = variable libre
    pub lower_bound: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinearExpr {
    pub terms: Vec<(f64, String)>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, coef: f64, var: impl Into<String>) -> Self {
        self.terms.push((coef, var.into()));
        self
    }

    pub fn sum<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LinearExpr { terms: vars.into_iter().map(|v| (1.0, v.into())).collect(), constant: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    Le,
    Ge,
    Eq,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearProgram {
    pub name: String,
    pub sense: Sense,
    pub variables: Vec<Variable>,
    pub objective: LinearExpr,
    pub constraints: Vec<Constraint>,
}

impl LinearProgram {
    pub fn new(name: impl Into<String>, sense: Sense) -> Self {
        LinearProgram {
            name: name.into(),
            sense,
            variables: Vec::new(),
            objective: LinearExpr::new(),
            constraints: Vec::new(),
        }
    }

    pub fn add_variable(&mut self, name: impl Into<String>, kind: VarKind, lower_bound: Option<f64>) -> String {
        let name = name.into();
        self.variables.push(Variable { name: name.clone(), kind, lower_bound });
        name
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, expr: LinearExpr, relation: Relation, rhs: f64) {
        self.constraints.push(Constraint { name: name.into(), expr, relation, rhs });
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// Valores devueltos por el backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LpSolution {
    pub objective: f64,
    pub values: HashMap<String, f64>,
}

impl LpSolution {
    pub fn value(&self, name: &str) -> Result<f64, LpError> {
        self.values.get(name).copied().ok_or_else(|| LpError::MissingVariable(name.to_string()))
    }

    /// Una variable binaria está prendida si vale más de 0.5.
    pub fn is_set(&self, name: &str) -> Result<bool, LpError> {
        Ok(self.value(name)? > 0.5)
    }
}

/// Solver externo (CBC, HiGHS, ...).
pub trait LpBackend {
    fn solve(&self, model: &LinearProgram) -> Result<LpSolution, LpError>;
}

fn x_name(i: usize, c: usize) -> String {
    format!("x_{}_{}", i, c)
}

/// Modelo de clustering en k grupos minimizando la distancia máxima interna.
///
/// Variables: `x_i_c` (vértice i en el cluster c), `D_c` (distancia máxima del
/// cluster c), `Y_i_j` (i y j comparten cluster) y `D_MAX`. Los pares sin camino
/// usan distancia |V| + 1, mayor que cualquier distancia real.
pub fn clustering_model<V>(grafo: &Graph<V>, k: usize, distancias: &DistanceTable<V>) -> LinearProgram
where
    V: Eq + Hash + Clone + Debug,
{
    let vertices = grafo.vertices();
    let n = vertices.len();
    let mut prob = LinearProgram::new("clusterizar_minimizando_distancia_maxima", Sense::Minimize);

    for c in 0..k {
        prob.add_variable(format!("D_{}", c), VarKind::Integer, Some(0.0));
        for i in 0..n {
            prob.add_variable(x_name(i, c), VarKind::Binary, None);
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            prob.add_variable(format!("Y_{}_{}", i, j), VarKind::Binary, None);
        }
    }
    let d_max = prob.add_variable("D_MAX", VarKind::Integer, Some(0.0));
    prob.objective = LinearExpr::new().term(1.0, d_max.clone());

    // cada vértice en a lo sumo un cluster
    for i in 0..n {
        prob.add_constraint(format!("asignacion_{}", i), LinearExpr::sum((0..k).map(|c| x_name(i, c))), Relation::Le, 1.0);
    }
    // y entre todos cubren los n vértices
    let todas = (0..n).flat_map(|i| (0..k).map(move |c| x_name(i, c)));
    prob.add_constraint("cobertura", LinearExpr::sum(todas), Relation::Ge, n as f64);

    for c in 0..k {
        let d_c = format!("D_{}", c);
        prob.add_constraint(
            format!("dmax_{}", c),
            LinearExpr::new().term(1.0, d_max.clone()).term(-1.0, d_c.clone()),
            Relation::Ge,
            0.0,
        );
        for i in 0..n {
            for j in (i + 1)..n {
                let y = format!("Y_{}_{}", i, j);
                let dist = match hops(distancias, &vertices[i], &vertices[j]) {
                    UNREACHABLE => (n + 1) as f64,
                    d => d as f64,
                };
                prob.add_constraint(
                    format!("mismo_cluster_{}_{}_{}", i, j, c),
                    LinearExpr::new().term(1.0, y.clone()).term(-1.0, x_name(i, c)).term(-1.0, x_name(j, c)),
                    Relation::Ge,
                    -1.0,
                );
                prob.add_constraint(
                    format!("distancia_{}_{}_{}", i, j, c),
                    LinearExpr::new().term(1.0, d_c.clone()).term(-dist, y),
                    Relation::Ge,
                    0.0,
                );
            }
        }
    }

    debug!("[lp] modelo de clustering: {} variables, {} restricciones", prob.variables.len(), prob.constraints.len());
    prob
}

/// Modelo de reparto balanceado: `items` son `(nombre, peso)`.
pub fn load_balance_model<N>(items: &[(N, f64)], k: usize) -> LinearProgram {
    let n = items.len();
    let mut prob = LinearProgram::new("reparto_balanceado", Sense::Minimize);

    for i in 0..n {
        for j in 0..k {
            prob.add_variable(x_name(i, j), VarKind::Binary, None);
        }
    }
    for j in 0..k {
        prob.add_variable(format!("S_{}", j), VarKind::Continuous, Some(0.0));
    }
    let m_max = prob.add_variable("M", VarKind::Continuous, Some(0.0));
    let m_min = prob.add_variable("m", VarKind::Continuous, Some(0.0));
    prob.objective = LinearExpr::new().term(1.0, m_max.clone()).term(-1.0, m_min.clone());

    for i in 0..n {
        prob.add_constraint(format!("asignacion_{}", i), LinearExpr::sum((0..k).map(|j| x_name(i, j))), Relation::Eq, 1.0);
    }
    for j in 0..k {
        let s_j = format!("S_{}", j);
        let mut suma = LinearExpr::new().term(1.0, s_j.clone());
        for (i, (_, peso)) in items.iter().enumerate() {
            suma = suma.term(-peso, x_name(i, j));
        }
        prob.add_constraint(format!("suma_grupo_{}", j), suma, Relation::Eq, 0.0);
        prob.add_constraint(
            format!("cota_superior_{}", j),
            LinearExpr::new().term(1.0, s_j.clone()).term(-1.0, m_max.clone()),
            Relation::Le,
            0.0,
        );
        prob.add_constraint(
            format!("cota_inferior_{}", j),
            LinearExpr::new().term(1.0, s_j).term(-1.0, m_min.clone()),
            Relation::Ge,
            0.0,
        );
    }
    prob
}

/// Arma la partición a partir de las `x_i_c` prendidas. Los clusters vacíos se
/// descartan y la distancia máxima se recalcula con la tabla.
pub fn decode_clustering<V>(
    solucion: &LpSolution,
    grafo: &Graph<V>,
    k: usize,
    distancias: &DistanceTable<V>,
) -> Result<Partition<V>, LpError>
where
    V: Eq + Hash + Clone + Debug,
{
    let vertices = grafo.vertices();
    let mut clusters: Vec<Vec<V>> = Vec::with_capacity(k);
    for c in 0..k {
        let mut cluster = Vec::new();
        for (i, v) in vertices.iter().enumerate() {
            if solucion.is_set(&x_name(i, c))? {
                cluster.push(v.clone());
            }
        }
        if !cluster.is_empty() {
            clusters.push(cluster);
        }
    }
    let dist_max = max_intra_cluster_distance(&clusters, distancias);
    Ok(Partition::new(clusters, dist_max))
}

/// Devuelve `(M − m, grupos)`; los grupos conservan su índice (pueden quedar vacíos).
pub fn decode_load_balance<N: Clone>(
    solucion: &LpSolution,
    items: &[(N, f64)],
    k: usize,
) -> Result<(f64, Vec<Vec<N>>), LpError> {
    let mut grupos: Vec<Vec<N>> = vec![Vec::new(); k];
    for (j, grupo) in grupos.iter_mut().enumerate() {
        for (i, (nombre, _)) in items.iter().enumerate() {
            if solucion.is_set(&x_name(i, j))? {
                grupo.push(nombre.clone());
            }
        }
    }
    let rango = solucion.value("M")? - solucion.value("m")?;
    Ok((rango, grupos))
}

/// Arma el modelo de clustering, lo resuelve con `backend` y decodifica.
pub fn solve_lp<V, B>(grafo: &Graph<V>, k: usize, distancias: &DistanceTable<V>, backend: &B) -> Result<Partition<V>, LpError>
where
    V: Eq + Hash + Clone + Debug,
    B: LpBackend + ?Sized,
{
    if let Some(trivial) = trivial_partition(&grafo.vertices(), k) {
        return Ok(trivial);
    }
    let modelo = clustering_model(grafo, k, distancias);
    let solucion = backend.solve(&modelo)?;
    let particion = decode_clustering(&solucion, grafo, k, distancias)?;
    debug!("✅ [lp] objetivo backend={} distancia recalculada={}", solucion.objective, particion.max_distance);
    Ok(particion)
}

fn write_expr(out: &mut String, expr: &LinearExpr) {
    if expr.terms.is_empty() {
        out.push('0');
        return;
    }
    for (i, (coef, var)) in expr.terms.iter().enumerate() {
        let signo = if *coef < 0.0 { "-" } else { "+" };
        let abs = coef.abs();
        if i == 0 {
            if *coef < 0.0 {
                out.push_str("- ");
            }
        } else {
            let _ = write!(out, " {} ", signo);
        }
        if abs != 1.0 {
            let _ = write!(out, "{} ", abs);
        }
        out.push_str(var);
    }
}

/// Modelo en formato LP de CPLEX.
pub fn to_lp_format(modelo: &LinearProgram) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\\* {} *\\", modelo.name);
    out.push_str(match modelo.sense {
        Sense::Minimize => "Minimize\n",
        Sense::Maximize => "Maximize\n",
    });
    out.push_str("OBJ: ");
    write_expr(&mut out, &modelo.objective);
    out.push_str("\nSubject To\n");

    for r in modelo.constraints.iter() {
        let op = match r.relation {
            Relation::Le => "<=",
            Relation::Ge => ">=",
            Relation::Eq => "=",
        };
        let _ = write!(out, "{}: ", r.name);
        write_expr(&mut out, &r.expr);
        let _ = writeln!(out, " {} {}", op, r.rhs - r.expr.constant);
    }

    let con_cota: Vec<&Variable> = modelo.variables.iter().filter(|v| v.kind != VarKind::Binary).collect();
    if !con_cota.is_empty() {
        out.push_str("Bounds\n");
        for v in con_cota {
            match v.lower_bound {
                Some(lb) => {
                    let _ = writeln!(out, "{} >= {}", v.name, lb);
                }
                None => {
                    let _ = writeln!(out, "{} free", v.name);
                }
            }
        }
    }

    for (titulo, tipo) in [("General", VarKind::Integer), ("Binary", VarKind::Binary)] {
        let nombres: Vec<&str> = modelo.variables.iter().filter(|v| v.kind == tipo).map(|v| v.name.as_str()).collect();
        if !nombres.is_empty() {
            let _ = writeln!(out, "{}\n{}", titulo, nombres.join(" "));
        }
    }
    out.push_str("End\n");
    out
}

/// Resumen legible de los grupos de un reparto.
pub fn describe_groups<N: Display>(grupos: &[Vec<N>]) -> String {
    grupos
        .iter()
        .enumerate()
        .map(|(j, g)| format!("Grupo {}: {}", j + 1, g.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
