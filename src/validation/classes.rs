//! Class labels as read in the labels file are mapped to dense codes 0..nb_classes.
//! Codes follow the order of first appearance.

use indexmap::IndexSet;

#[derive(Debug, Clone)]
pub struct ClassLabels {
    /// class names, the rank is the code
    names: IndexSet<String>,
    /// code of each sample
    codes: Vec<usize>,
}

impl ClassLabels {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut names = IndexSet::<String>::new();
        let mut codes = Vec::<usize>::with_capacity(labels.len());
        for label in labels {
            let (code, _) = names.insert_full(label.as_ref().to_string());
            codes.push(code);
        }
        ClassLabels { names, codes }
    } // end of new

    /// code of each sample, in sample order
    pub fn get_codes(&self) -> &[usize] {
        &self.codes
    }

    ///
    pub fn get_nb_classes(&self) -> usize {
        self.names.len()
    }

    /// number of samples
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// name of a class code
    pub fn get_name(&self, code: usize) -> Option<&str> {
        self.names.get_index(code).map(|s| s.as_str())
    }

    /// number of samples in each class
    pub fn class_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.get_nb_classes()];
        for c in &self.codes {
            sizes[*c] += 1;
        }
        sizes
    }
} // end of impl ClassLabels

// end of mod tests
