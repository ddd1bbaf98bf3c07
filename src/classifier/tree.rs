//! CART classification tree.
//!
//! At each node we look for the (feature, threshold) minimizing the weighted Gini impurity of the two children.
//! Only a random subset of max_features features is examined, but the search goes on past this subset
//! until a valid split is found (a split is valid if both children are non empty).
//! A node becomes a leaf when it is pure, too small, too deep, or when no feature can separate its samples.

use ndarray::ArrayView2;
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::majority;

#[derive(Debug, Clone)]
enum TreeNode {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.;
    }
    let total = total as f64;
    1. - counts.iter().map(|c| (*c as f64 / total).powi(2)).sum::<f64>()
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    /// nodes[0] is the root once fitted
    nodes: Vec<TreeNode>,
    nb_classes: usize,
    /// number of features examined at each split, 0 means all
    max_features: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
} // end of struct DecisionTree

impl DecisionTree {
    pub fn new(nb_classes: usize, max_features: usize, max_depth: Option<usize>, min_samples_split: usize) -> Self {
        DecisionTree {
            nodes: Vec::new(),
            nb_classes,
            max_features,
            max_depth,
            min_samples_split: min_samples_split.max(2),
        }
    }

    /// number of nodes, 0 if not fitted
    pub fn get_nb_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// grows the tree on rows of x given by samples (a row can appear many times, as in a bootstrap sample)
    pub fn fit(&mut self, x: &ArrayView2<f64>, y: &[usize], samples: &[usize], rng: &mut Xoshiro256PlusPlus) {
        assert!(!samples.is_empty());
        self.nodes.clear();
        self.grow(x, y, samples.to_vec(), 0, rng);
        log::trace!("DecisionTree::fit nb samples : {}, nb nodes : {}", samples.len(), self.nodes.len());
    } // end of fit

    fn class_counts(&self, y: &[usize], samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.nb_classes];
        for s in samples {
            counts[y[*s]] += 1;
        }
        counts
    }

    // returns rank of created node
    fn grow(&mut self, x: &ArrayView2<f64>, y: &[usize], samples: Vec<usize>, depth: usize, rng: &mut Xoshiro256PlusPlus) -> usize {
        let counts = self.class_counts(y, &samples);
        let is_pure = counts.iter().filter(|c| **c > 0).count() <= 1;
        let too_deep = self.max_depth.map(|d| depth >= d).unwrap_or(false);
        if is_pure || too_deep || samples.len() < self.min_samples_split {
            return self.push_leaf(&counts);
        }
        let split = match self.best_split(x, y, &samples, rng) {
            Some(split) => split,
            None => return self.push_leaf(&counts),
        };
        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .partition(|s| x[[**s, split.feature]] <= split.threshold);
        // reserve our slot before children
        let rank = self.nodes.len();
        self.nodes.push(TreeNode::Leaf { class: 0 });
        let left = self.grow(x, y, left_samples, depth + 1, rng);
        let right = self.grow(x, y, right_samples, depth + 1, rng);
        self.nodes[rank] = TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        rank
    } // end of grow

    fn push_leaf(&mut self, counts: &[usize]) -> usize {
        self.nodes.push(TreeNode::Leaf {
            class: majority(counts),
        });
        self.nodes.len() - 1
    }

    fn best_split(&self, x: &ArrayView2<f64>, y: &[usize], samples: &[usize], rng: &mut Xoshiro256PlusPlus) -> Option<SplitCandidate> {
        let nb_features = x.ncols();
        let max_features = if self.max_features == 0 {
            nb_features
        } else {
            self.max_features.min(nb_features)
        };
        let mut features: Vec<usize> = (0..nb_features).collect();
        features.shuffle(rng);
        //
        let mut best: Option<SplitCandidate> = None;
        for (nb_examined, feature) in features.into_iter().enumerate() {
            if nb_examined >= max_features && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_threshold(x, y, samples, feature) {
                match best {
                    Some(b) if b.impurity <= candidate.impurity => {}
                    _ => best = Some(candidate),
                }
            }
        }
        best
    } // end of best_split

    // sweep sorted values of one feature
    fn best_threshold(&self, x: &ArrayView2<f64>, y: &[usize], samples: &[usize], feature: usize) -> Option<SplitCandidate> {
        let mut sorted: Vec<(f64, usize)> = samples.iter().map(|s| (x[[*s, feature]], y[*s])).collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        let total = sorted.len();
        let mut left = vec![0usize; self.nb_classes];
        let mut right = vec![0usize; self.nb_classes];
        for (_, class) in &sorted {
            right[*class] += 1;
        }
        let mut best: Option<SplitCandidate> = None;
        for i in 0..total - 1 {
            let class = sorted[i].1;
            left[class] += 1;
            right[class] -= 1;
            if sorted[i].0 >= sorted[i + 1].0 {
                continue;
            }
            let nb_left = i + 1;
            let nb_right = total - nb_left;
            let impurity = (nb_left as f64 * gini(&left, nb_left) + nb_right as f64 * gini(&right, nb_right)) / total as f64;
            if best.map(|b| impurity < b.impurity).unwrap_or(true) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: 0.5 * (sorted[i].0 + sorted[i + 1].0),
                    impurity,
                });
            }
        }
        best
    } // end of best_threshold

    /// predicted class of a sample
    pub fn predict_row(&self, row: &[f64]) -> usize {
        let mut current = 0;
        loop {
            match &self.nodes[current] {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    current = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    } // end of predict_row
} // end of impl DecisionTree

#[cfg(test)]
mod tests {

    use super::*;

    use ndarray::array;
    use rand_xoshiro::rand_core::SeedableRng;

    #[test]
    fn tree_separates_on_informative_feature() {
        // feature 0 is noise, feature 1 separates classes
        let x = array![[0.3, 0.], [0.1, 1.], [0.2, 2.], [0.3, 10.], [0.1, 11.], [0.2, 12.]];
        let y = vec![0, 0, 0, 1, 1, 1];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);
        let mut tree = DecisionTree::new(2, 0, None, 2);
        let samples: Vec<usize> = (0..6).collect();
        tree.fit(&x.view(), &y, &samples, &mut rng);
        // root split and 2 leaves
        assert_eq!(tree.get_nb_nodes(), 3);
        assert_eq!(tree.predict_row(&[0.5, 1.5]), 0);
        assert_eq!(tree.predict_row(&[0.5, 9.]), 1);
    }

    #[test]
    fn constant_features_give_majority_leaf() {
        let x = array![[1., 1.], [1., 1.], [1., 1.]];
        let y = vec![1, 0, 1];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);
        let mut tree = DecisionTree::new(2, 1, None, 2);
        tree.fit(&x.view(), &y, &[0, 1, 2], &mut rng);
        assert_eq!(tree.get_nb_nodes(), 1);
        assert_eq!(tree.predict_row(&[0., 0.]), 1);
    }

    #[test]
    fn gini_values() {
        assert_eq!(gini(&[2, 0], 2), 0.);
        assert_eq!(gini(&[1, 1], 2), 0.5);
    }
} // end of mod tests
