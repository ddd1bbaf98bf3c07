//! Graph, labels and results io.

use std::path::Path;

use anyhow::Context;

use crate::gkernel::pgraph::LabelGraph;

pub mod csv;
pub mod gml;
pub mod labels;
pub mod output;

/// reads a graph, as gml if file has extension gml, as an edge list otherwise
pub fn load_graph(path: &Path) -> anyhow::Result<LabelGraph> {
    let is_gml = path
        .extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("gml"))
        .unwrap_or(false);
    if is_gml {
        gml::read_gml(path)
    } else {
        self::csv::read_edgelist(path)
    }
}

/// reads graphs in order
pub fn load_graphs<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<Vec<LabelGraph>> {
    let mut graphs = Vec::<LabelGraph>::with_capacity(paths.len());
    for path in paths {
        let graph = load_graph(path.as_ref()).with_context(|| format!("loading graph {}", graphs.len()))?;
        log::trace!("{} : {} nodes, {} edges", path.as_ref().display(), graph.node_count(), graph.edge_count());
        graphs.push(graph);
    }
    log::debug!("read {} graphs", graphs.len());
    Ok(graphs)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn dispatch_on_extension() {
        let dir = std::env::temp_dir();
        let gml_path = dir.join(format!("pwl_graph_{}.GML", std::process::id()));
        let edges_path = dir.join(format!("pwl_graph_{}.edges", std::process::id()));
        std::fs::write(&gml_path, "graph [ node [ id 0 label \"a\" ] node [ id 1 label \"b\" ] edge [ source 0 target 1 ] ]").unwrap();
        std::fs::write(&edges_path, "0 1\n1 2\n").unwrap();
        let graphs = load_graphs(&[&gml_path, &edges_path]).unwrap();
        std::fs::remove_file(&gml_path).unwrap();
        std::fs::remove_file(&edges_path).unwrap();
        assert_eq!(graphs[0].node_count(), 2);
        assert!(graphs[0].node_weights().all(|w| w.get_label().is_some()));
        assert_eq!(graphs[1].node_count(), 3);
        assert!(load_graph(Path::new("/nonexistent/g.gml")).is_err());
    }
} // end of mod tests
