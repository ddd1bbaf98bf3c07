//! Reads class labels, one per line, in the order of the graph files.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context};

/// Lines are trimmed. Trailing blank lines are ignored, a blank line followed by a label is an error.
pub fn read_labels(path: &Path) -> anyhow::Result<Vec<String>> {
    let file = OpenOptions::new()
        .read(true)
        .open(path)
        .with_context(|| format!("read_labels could not open file {}", path.display()))?;
    parse_labels(BufReader::new(file)).with_context(|| format!("decoding {}", path.display()))
}

pub(crate) fn parse_labels<R: BufRead>(reader: R) -> anyhow::Result<Vec<String>> {
    let mut labels = Vec::<String>::new();
    let mut first_blank: Option<usize> = None;
    for (rank, line) in reader.lines().enumerate() {
        let line = line?;
        let label = line.trim();
        if label.is_empty() {
            first_blank.get_or_insert(rank + 1);
            continue;
        }
        if let Some(blank) = first_blank {
            return Err(anyhow!("blank line {} before label at line {}", blank, rank + 1));
        }
        labels.push(label.to_string());
    }
    log::debug!("read {} labels", labels.len());
    Ok(labels)
} // end of parse_labels

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn trailing_blanks() {
        let labels = parse_labels("A\n  B \r\nA\n\n  \n".as_bytes()).unwrap();
        assert_eq!(labels, vec!["A", "B", "A"]);
        assert!(parse_labels("A\n\nB\n".as_bytes()).is_err());
        assert!(parse_labels("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn from_file() {
        let path = std::env::temp_dir().join(format!("pwl_labels_{}.txt", std::process::id()));
        std::fs::write(&path, "1\n-1\n1\n").unwrap();
        let labels = read_labels(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(labels, vec!["1", "-1", "1"]);
        assert!(read_labels(Path::new("/nonexistent/labels.txt")).is_err());
    }
} // end of mod tests
