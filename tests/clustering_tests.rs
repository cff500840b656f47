/// Propiedades comunes a todas las estrategias de clustering.
use quickcluster::algorithm::{
    LouvainConfig, all_pairs_distances, diameter, run_algorithm, solve, solve_greedy, solve_louvain,
    solve_with_distances, validate,
};
use quickcluster::{Algorithm, Graph, UNREACHABLE};

fn camino(n: u32) -> Graph<u32> {
    let mut g = Graph::with_vertices(false, 0..n).unwrap();
    for i in 1..n {
        g.add_unit_edge(&(i - 1), &i).unwrap();
    }
    g
}

fn dos_componentes() -> Graph<&'static str> {
    let mut g = Graph::with_vertices(false, ["A", "B", "C", "D"]).unwrap();
    g.add_unit_edge(&"A", &"B").unwrap();
    g.add_unit_edge(&"C", &"D").unwrap();
    g
}

/// Grafo mediano con algo de estructura: dos ciclos de 6 unidos por un puente
/// más una cola.
fn grafo_mixto() -> Graph<u32> {
    let mut g = Graph::with_vertices(false, 0..14).unwrap();
    for i in 0..6 {
        g.add_unit_edge(&i, &((i + 1) % 6)).unwrap();
        g.add_unit_edge(&(6 + i), &(6 + (i + 1) % 6)).unwrap();
    }
    g.add_unit_edge(&2, &8).unwrap();
    g.add_unit_edge(&11, &12).unwrap();
    g.add_unit_edge(&12, &13).unwrap();
    g
}

#[test]
fn test_camino_de_5_con_k2() {
    let g = camino(5);
    let p = solve(&g, 2);
    eprintln!("🔬 camino 0-1-2-3-4, k=2 -> {:?}", p);
    assert_eq!(p.max_distance, 2, "la distancia máxima óptima es 2");
    let d = all_pairs_distances(&g);
    assert!(validate(&g, 2, 2, &p.clusters, &d));
}

#[test]
fn test_componentes_disconexas_k2() {
    let g = dos_componentes();
    let p = solve(&g, 2);
    assert_eq!(p.max_distance, 1);
    let mut clusters: Vec<Vec<&str>> = p.clusters.iter().map(|c| {
        let mut c = c.clone();
        c.sort();
        c
    }).collect();
    clusters.sort();
    assert_eq!(clusters, vec![vec!["A", "B"], vec!["C", "D"]]);
}

#[test]
fn test_backtracking_nunca_peor_que_greedy() {
    for g in [camino(7), grafo_mixto()] {
        let d = all_pairs_distances(&g);
        for k in 1..=5 {
            let greedy = solve_greedy(&g, k, &d);
            let exacto = solve_with_distances(&g, k, &d);
            assert!(
                exacto.max_distance <= greedy.max_distance,
                "k={}: backtracking {} > greedy {}",
                k,
                exacto.max_distance,
                greedy.max_distance
            );
        }
    }
}

#[test]
fn test_soluciones_se_validan_con_su_objetivo() {
    let g = grafo_mixto();
    let d = all_pairs_distances(&g);
    for k in 1..=4 {
        for p in [solve_greedy(&g, k, &d), solve_with_distances(&g, k, &d)] {
            assert!(p.len() <= k);
            assert!(validate(&g, k, p.max_distance, &p.clusters, &d), "k={} partición inválida: {:?}", k, p);
        }
    }
    let comunidades = solve_louvain(&g);
    let grupos = comunidades.groups();
    let objetivo = quickcluster::algorithm::max_intra_cluster_distance(&grupos, &d);
    assert!(validate(&g, grupos.len(), objetivo, &grupos, &d));
}

#[test]
fn test_determinismo() {
    let g = grafo_mixto();
    let d = all_pairs_distances(&g);
    assert_eq!(solve_with_distances(&g, 3, &d), solve_with_distances(&g, 3, &d));
    assert_eq!(solve_greedy(&g, 3, &d), solve_greedy(&g, 3, &d));
    assert_eq!(solve_louvain(&g), solve_louvain(&g));
}

#[test]
fn test_k_mayor_o_igual_a_vertices_da_singletons() {
    let g = camino(4);
    let d = all_pairs_distances(&g);
    for k in [4, 6] {
        for p in [solve_greedy(&g, k, &d), solve_with_distances(&g, k, &d)] {
            assert_eq!(p.max_distance, 0);
            assert!(p.clusters.iter().all(|c| c.len() == 1));
            assert_eq!(p.len(), 4);
            assert!(validate(&g, k, 0, &p.clusters, &d));
        }
    }
}

#[test]
fn test_k_enorme_no_rompe_los_solvers() {
    let g = camino(3);
    let d = all_pairs_distances(&g);
    for k in [usize::MAX / 8, usize::MAX] {
        for p in [solve_greedy(&g, k, &d), solve_with_distances(&g, k, &d)] {
            assert_eq!(p.len(), 3, "k={}: se esperaban 3 singletons", k);
            assert_eq!(p.max_distance, 0);
            assert!(validate(&g, k, 0, &p.clusters, &d));
        }
    }
}

#[test]
fn test_k1_es_el_diametro() {
    let g = grafo_mixto();
    let d = all_pairs_distances(&g);
    let p = solve_with_distances(&g, 1, &d);
    assert_eq!(p.len(), 1);
    assert_eq!(p.clusters[0].len(), g.len());
    assert_eq!(p.max_distance, diameter(&g, &d));
}

#[test]
fn test_k0_no_tiene_particion() {
    let g = camino(3);
    let p = solve(&g, 0);
    assert!(p.is_empty());
    assert_eq!(p.max_distance, UNREACHABLE);
    let d = all_pairs_distances(&g);
    assert!(!validate(&g, 0, p.max_distance, &p.clusters, &d));

    let vacio: Graph<u32> = Graph::undirected();
    let p = solve(&vacio, 0);
    assert!(p.is_empty());
    assert_eq!(p.max_distance, 0);
}

#[test]
fn test_backtracking_con_pares_ausentes() {
    // tres componentes y sólo dos clusters: toda partición junta vértices sin camino
    let mut g = Graph::with_vertices(false, ["A", "B", "C"]).unwrap();
    g.add_unit_edge(&"A", &"B").unwrap();
    let p = solve(&g, 1);
    assert_eq!(p.max_distance, UNREACHABLE);
    assert!(!p.is_reachable());

    let mut g = dos_componentes();
    g.add_vertex("E").unwrap();
    let p = solve(&g, 2);
    assert_eq!(p.max_distance, UNREACHABLE);
    let p = solve(&g, 3);
    assert_eq!(p.max_distance, 1);
}

#[test]
fn test_louvain_sin_aristas() {
    let g = Graph::with_vertices(false, 0..5u32).unwrap();
    let c = solve_louvain(&g);
    assert_eq!(c.passes, 1, "debe terminar tras una sola pasada");
    assert_eq!(c.count(), 5);
    for (v, comunidad) in c.assignment.iter() {
        assert_eq!(v, comunidad);
    }
}

fn cliques_con_puente(dirigido: bool) -> Graph<u32> {
    let mut g = Graph::with_vertices(dirigido, 0..8u32).unwrap();
    for base in [0, 4] {
        for i in 0..4 {
            for j in (i + 1)..4 {
                g.add_unit_edge(&(base + i), &(base + j)).unwrap();
            }
        }
    }
    g.add_unit_edge(&3, &4).unwrap();
    g
}

fn camino_pesado(pesos: [f64; 3]) -> Graph<u32> {
    let mut g = Graph::with_vertices(false, 0..4u32).unwrap();
    for (i, peso) in pesos.into_iter().enumerate() {
        let i = i as u32;
        g.add_edge(&i, &(i + 1), peso).unwrap();
    }
    g
}

#[test]
fn test_louvain_separa_cliques_unidas_por_puente() {
    let g = cliques_con_puente(false);
    let c = solve_louvain(&g);
    eprintln!("🧩 comunidades: {:?} Q={:.3}", c.groups(), c.modularity);
    assert_eq!(c.count(), 2);
    assert_eq!(c.groups(), vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);
    // W = 13; cada clique tiene 6 aristas internas y suma de grados 13
    let esperada = 2.0 * (12.0 / 26.0 - (13.0 / 26.0f64).powi(2));
    assert!((c.modularity - esperada).abs() < 1e-12, "Q={} esperada {}", c.modularity, esperada);
    // dos pasadas con movimientos y una última sin ninguno
    assert_eq!(c.passes, 3);
}

#[test]
fn test_louvain_usa_los_pesos() {
    // mismas aristas, distinto peso: las puntas pesadas forman dos pares
    let c = solve_louvain(&camino_pesado([5.0, 1.0, 5.0]));
    assert_eq!(c.groups(), vec![vec![0, 1], vec![2, 3]]);
    let esperada = 2.0 * (10.0 / 22.0 - (11.0 / 22.0f64).powi(2));
    assert!((c.modularity - esperada).abs() < 1e-12, "Q={} esperada {}", c.modularity, esperada);
    assert_eq!(c.passes, 2);

    // con la arista del medio pesada todo termina en una sola comunidad
    let c = solve_louvain(&camino_pesado([1.0, 5.0, 1.0]));
    assert_eq!(c.count(), 1);
    assert!(c.modularity.abs() < 1e-12);
}

#[test]
fn test_louvain_dirigido_se_trata_como_no_dirigido() {
    let no_dirigido = solve_louvain(&cliques_con_puente(false));
    let dirigido = solve_louvain(&cliques_con_puente(true));
    assert_eq!(dirigido.groups(), no_dirigido.groups());
    assert!((dirigido.modularity - no_dirigido.modularity).abs() < 1e-12);
}

#[test]
fn test_run_algorithm_despacha() {
    let g = camino(5);
    let cfg = LouvainConfig::default();
    let bt = run_algorithm(&g, 2, Algorithm::Backtracking, &cfg);
    assert_eq!(bt.partition.max_distance, 2);
    assert!(bt.modularity.is_none());

    let lv = run_algorithm(&g, 2, Algorithm::Louvain, &cfg);
    assert_eq!(lv.algorithm, Algorithm::Louvain);
    assert!(lv.modularity.is_some());
    let total: usize = lv.partition.clusters.iter().map(Vec::len).sum();
    assert_eq!(total, 5);
}

#[test]
fn test_louvain_respeta_tope_de_pasadas() {
    let g = camino(6);
    let c = quickcluster::algorithm::solve_louvain_with(&g, &LouvainConfig { max_passes: 1 });
    assert_eq!(c.passes, 1);
}
