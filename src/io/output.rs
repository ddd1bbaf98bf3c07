//! To describe dumps of the feature matrix and of fold accuracies.

use std::path::PathBuf;

use anyhow::Context;
use ndarray::ArrayView2;
use serde::Serialize;

use crate::validation::crossval::CrossValidationResult;

pub struct Output {
    /// output files are stem_features.csv and stem_accuracies.csv
    stem: String,
}

#[derive(Serialize)]
struct AccuracyRecord<'a> {
    repetition: usize,
    fold: usize,
    accuracy: f64,
    chosen: &'a str,
}

impl Output {
    pub fn new(stem: &str) -> Self {
        Output { stem: stem.to_string() }
    }

    /// get name of feature file
    pub fn get_features_name(&self) -> PathBuf {
        PathBuf::from(format!("{}_features.csv", self.stem))
    }

    /// get name of accuracy file
    pub fn get_accuracies_name(&self) -> PathBuf {
        PathBuf::from(format!("{}_accuracies.csv", self.stem))
    }

    /// one row per graph, column j of iteration i is named it{i}_f{j}
    pub fn dump_features(&self, features: &ArrayView2<f64>, column_counts: &[usize]) -> anyhow::Result<PathBuf> {
        let path = self.get_features_name();
        let mut wtr = csv::Writer::from_path(&path).with_context(|| format!("could not create {}", path.display()))?;
        let header: Vec<String> = column_counts
            .iter()
            .enumerate()
            .flat_map(|(i, nb)| (0..*nb).map(move |j| format!("it{}_f{}", i, j)))
            .collect();
        if header.len() != features.ncols() {
            return Err(anyhow::anyhow!(
                "dump_features : {} column names for {} columns",
                header.len(),
                features.ncols()
            ));
        }
        wtr.write_record(&header)?;
        for row in features.rows() {
            wtr.write_record(row.iter().map(|v| v.to_string()))?;
        }
        wtr.flush()?;
        log::info!("features dumped in {}", path.display());
        Ok(path)
    } // end of dump_features

    /// one row per fold of successful repetitions
    pub fn dump_accuracies(&self, result: &CrossValidationResult) -> anyhow::Result<PathBuf> {
        let path = self.get_accuracies_name();
        let mut wtr = csv::Writer::from_path(&path).with_context(|| format!("could not create {}", path.display()))?;
        for fold in result.get_repetitions().iter().flat_map(|r| r.get_folds().iter()) {
            wtr.serialize(AccuracyRecord {
                repetition: fold.get_repetition(),
                fold: fold.get_fold(),
                accuracy: fold.get_accuracy(),
                chosen: fold.get_chosen().unwrap_or(""),
            })?;
        }
        wtr.flush()?;
        log::info!("accuracies dumped in {}", path.display());
        Ok(path)
    } // end of dump_accuracies
} // end of impl Output

#[cfg(test)]
mod tests {

    use super::*;

    use ndarray::array;

    #[test]
    fn features_csv() {
        let stem = std::env::temp_dir().join(format!("pwl_out_{}", std::process::id()));
        let output = Output::new(&stem.to_string_lossy());
        let x = array![[1., 2., 3.], [4., 5., 6.5]];
        let path = output.dump_features(&x.view(), &[2, 1]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["it0_f0,it0_f1,it1_f0", "1,2,3", "4,5,6.5"]);
        assert!(output.dump_features(&x.view(), &[1, 1]).is_err());
        let _ = std::fs::remove_file(output.get_features_name());
    }
} // end of mod tests
