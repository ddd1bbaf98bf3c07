//! Construct a graph from an edge list stored in a csv like file.
//!
//! Each record gives a source and a target node num, further fields (a weight for example) are ignored.
//! Nodes are numbered 0..=max num found, so a num that never occurs gives an isolated node. Nodes carry no label.
//! Delimiters tab, comma and blank are tried in turn, lines beginning with # or % are skipped.

use std::path::Path;

use anyhow::{anyhow, Context};
use csv::{ReaderBuilder, Trim};

use crate::gkernel::pgraph::*;

// edges decoded with a given delimiter, fails if a record does not have 2 node nums
fn edges_with_delimiter(content: &str, delim: u8) -> anyhow::Result<Vec<(usize, usize)>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .flexible(true)
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());
    let mut edges = Vec::<(usize, usize)>::new();
    for (nb_record, result) in rdr.records().enumerate() {
        let record = result?;
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.len() < 2 {
            return Err(anyhow!("record {} has {} field(s)", nb_record + 1, fields.len()));
        }
        let mut nums = [0usize; 2];
        for (num, field) in nums.iter_mut().zip(fields.iter()) {
            *num = field
                .parse::<usize>()
                .map_err(|_| anyhow!("error decoding field {} of record {}", field, nb_record + 1))?;
        }
        edges.push((nums[0], nums[1]));
    }
    Ok(edges)
} // end of edges_with_delimiter

/// decodes an edge list
pub fn parse_edgelist(text: &str) -> anyhow::Result<LabelGraph> {
    let content = text
        .lines()
        .filter(|l| {
            let l = l.trim_start();
            !l.is_empty() && !l.starts_with('#') && !l.starts_with('%')
        })
        .collect::<Vec<&str>>()
        .join("\n");
    //
    let delimiters = [b'\t', b',', b' '];
    let mut res: anyhow::Result<Vec<(usize, usize)>> = Err(anyhow!("no delimiter tried"));
    for delim in delimiters {
        res = edges_with_delimiter(&content, delim);
        match &res {
            Ok(_) => break,
            Err(e) => log::debug!("edge list : delimiter {:?} failed : {}", delim as char, e),
        }
    }
    let edges = res.context("edge list : no delimiter among tab, comma, blank could decode records")?;
    let nb_nodes = edges.iter().map(|(a, b)| a.max(b) + 1).max().unwrap_or(0);
    log::trace!("edge list : {} nodes, {} edges", nb_nodes, edges.len());
    graph_from_parts(vec![None; nb_nodes], &edges)
} // end of parse_edgelist

/// reads an edge list file
pub fn read_edgelist(path: &Path) -> anyhow::Result<LabelGraph> {
    let text = std::fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
    parse_edgelist(&text).with_context(|| format!("decoding {}", path.display()))
}

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn delimiters() {
        log_init_test();
        //
        let tab = "# FromNodeId\tToNodeId\n0\t1\n1\t2\n";
        let comma = "% header\n0,1\n1,2\n";
        let blank = "0  1 0.5\n1 2 1.5\n\n";
        for text in [tab, comma, blank] {
            let graph = parse_edgelist(text).unwrap();
            assert_eq!(graph.node_count(), 3);
            assert_eq!(graph.edge_count(), 2);
            assert!(graph.node_weights().all(|w| w.get_label().is_none()));
        }
    }

    #[test]
    fn isolated_nodes_and_errors() {
        log_init_test();
        //
        let graph = parse_edgelist("0 4\n").unwrap();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 1);
        assert!(parse_edgelist("0 a\n").is_err());
        assert!(parse_edgelist("0\n").is_err());
        assert_eq!(parse_edgelist("# nothing\n").unwrap().node_count(), 0);
    }
} // end of mod tests
