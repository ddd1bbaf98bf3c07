//! A reader for graphs in GML format.
//!
//! Only the structure needed here is decoded:
//! ```text
//! graph [
//!     node [ id 0 label "C" ]
//!     edge [ source 0 target 1 ]
//! ]
//! ```
//! Node `label` is optional and kept as text (so `label 1` and `label "1"` are the same label).
//! Other keys are skipped, the graph is read as undirected. Lines beginning with `#` are comments.

use std::path::Path;

use anyhow::{anyhow, Context};
use indexmap::IndexMap;

use crate::gkernel::pgraph::*;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Word(String),
    Quoted(String),
}

#[derive(Debug, Clone, PartialEq)]
enum GmlValue {
    Atom(String),
    List(Vec<(String, GmlValue)>),
}

fn tokenize(text: &str) -> anyhow::Result<Vec<Token>> {
    let mut tokens = Vec::<Token>::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '[' => tokens.push(Token::Open),
            ']' => tokens.push(Token::Close),
            '#' => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '"' => {
                let mut s = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    s.push(c);
                }
                if !closed {
                    return Err(anyhow!("gml : unterminated string"));
                }
                tokens.push(Token::Quoted(s));
            }
            c if c.is_whitespace() => {}
            c => {
                let mut s = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || next == '[' || next == ']' || next == '"' {
                        break;
                    }
                    s.push(next);
                    chars.next();
                }
                tokens.push(Token::Word(s));
            }
        }
    }
    Ok(tokens)
} // end of tokenize

// parses key value pairs up to the closing bracket if nested, up to the end otherwise
fn parse_list<I>(tokens: &mut I, nested: bool) -> anyhow::Result<Vec<(String, GmlValue)>>
where
    I: Iterator<Item = Token>,
{
    let mut items = Vec::<(String, GmlValue)>::new();
    loop {
        let key = match tokens.next() {
            None if nested => return Err(anyhow!("gml : unclosed list")),
            None => return Ok(items),
            Some(Token::Close) if nested => return Ok(items),
            Some(Token::Word(key)) => key,
            Some(other) => return Err(anyhow!("gml : expected a key, got {:?}", other)),
        };
        let value = match tokens.next() {
            Some(Token::Open) => GmlValue::List(parse_list(tokens, true)?),
            Some(Token::Word(s)) | Some(Token::Quoted(s)) => GmlValue::Atom(s),
            _ => return Err(anyhow!("gml : key {} has no value", key)),
        };
        items.push((key, value));
    }
} // end of parse_list

fn get_atom<'a>(attributes: &'a [(String, GmlValue)], key: &str) -> Option<&'a str> {
    attributes.iter().find_map(|(k, v)| match v {
        GmlValue::Atom(s) if k == key => Some(s.as_str()),
        _ => None,
    })
}

fn get_id(attributes: &[(String, GmlValue)], key: &str) -> anyhow::Result<i64> {
    let field = get_atom(attributes, key).ok_or_else(|| anyhow!("gml : missing {}", key))?;
    field
        .parse::<i64>()
        .map_err(|_| anyhow!("gml : {} is not an integer : {}", key, field))
}

/// decodes a graph from gml text. Nodes are ranked in order of appearance.
pub fn parse_gml(text: &str) -> anyhow::Result<LabelGraph> {
    let top = parse_list(&mut tokenize(text)?.into_iter(), false)?;
    let items = top
        .into_iter()
        .find_map(|(k, v)| match v {
            GmlValue::List(items) if k == "graph" => Some(items),
            _ => None,
        })
        .ok_or_else(|| anyhow!("gml : no graph found"))?;
    //
    let mut ids = IndexMap::<i64, Option<String>>::new();
    let mut id_edges = Vec::<(i64, i64)>::new();
    for (key, value) in &items {
        match (key.as_str(), value) {
            ("node", GmlValue::List(attributes)) => {
                let id = get_id(attributes, "id")?;
                let label = get_atom(attributes, "label").map(String::from);
                if ids.insert(id, label).is_some() {
                    return Err(anyhow!("gml : duplicate node id {}", id));
                }
            }
            ("edge", GmlValue::List(attributes)) => {
                id_edges.push((get_id(attributes, "source")?, get_id(attributes, "target")?));
            }
            _ => {}
        }
    }
    let mut edges = Vec::<(usize, usize)>::with_capacity(id_edges.len());
    for (source, target) in id_edges {
        let rank = |id: i64| ids.get_index_of(&id).ok_or_else(|| anyhow!("gml : edge refers to unknown node {}", id));
        edges.push((rank(source)?, rank(target)?));
    }
    log::trace!("gml : {} nodes, {} edges", ids.len(), edges.len());
    graph_from_parts(ids.into_values().collect(), &edges)
} // end of parse_gml

/// reads a gml file
pub fn read_gml(path: &Path) -> anyhow::Result<LabelGraph> {
    let text = std::fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
    parse_gml(&text).with_context(|| format!("decoding {}", path.display()))
}

// end of mod tests
