//! Confusion matrix for multi-class classification

use ndarray::Array2;
use std::fmt;

/// Confusion matrix for multi-class classification
///
/// Element [i][j] counts samples with true label `labels[i]` predicted as `labels[j]`.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
    /// The matrix data: matrix[true_label][predicted_label] = count
    matrix: Vec<Vec<usize>>,
    /// Number of classes
    n_classes: usize,
    /// Sorted class labels
    labels: Vec<f64>,
}

impl ConfusionMatrix {
    /// Create an empty confusion matrix over the given sorted labels
    pub fn new(labels: Vec<f64>) -> Self {
        let n_classes = labels.len();
        Self {
            matrix: vec![vec![0; n_classes]; n_classes],
            n_classes,
            labels,
        }
    }

    /// Create from ground truth and predictions.
    ///
    /// Labels are the sorted union of both arrays; NaN entries must already be removed.
    pub fn from_predictions(y_true: &[f64], y_pred: &[f64]) -> Self {
        debug_assert_eq!(y_true.len(), y_pred.len());

        let mut labels: Vec<f64> = y_true.iter().chain(y_pred.iter()).copied().collect();
        labels.sort_by(f64::total_cmp);
        labels.dedup();

        let mut cm = Self::new(labels);
        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            if let (Some(i), Some(j)) = (cm.index_of(t), cm.index_of(p)) {
                cm.matrix[i][j] += 1;
            }
        }
        cm
    }

    fn index_of(&self, label: f64) -> Option<usize> {
        self.labels.binary_search_by(|l| l.total_cmp(&label)).ok()
    }

    /// Get the raw matrix
    pub fn matrix(&self) -> &Vec<Vec<usize>> {
        &self.matrix
    }

    /// Get the class labels
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Get number of classes
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Get element at [true_class][predicted_class]
    pub fn get(&self, true_class: usize, predicted_class: usize) -> usize {
        self.matrix[true_class][predicted_class]
    }

    /// Calculate true positives for a class
    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// Calculate false positives for a class (predicted as class but wasn't)
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&i| i != class)
            .map(|i| self.matrix[i][class])
            .sum()
    }

    /// Calculate false negatives for a class (was class but predicted differently)
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&j| j != class)
            .map(|j| self.matrix[class][j])
            .sum()
    }

    /// Calculate true negatives for a class
    pub fn true_negatives(&self, class: usize) -> usize {
        self.total()
            - self.true_positives(class)
            - self.false_positives(class)
            - self.false_negatives(class)
    }

    /// Calculate support (total true instances) for a class
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    /// Total number of samples
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Number of samples on the diagonal
    pub fn correct(&self) -> usize {
        (0..self.n_classes).map(|i| self.matrix[i][i]).sum()
    }

    /// Calculate accuracy; NaN for an empty matrix
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return f64::NAN;
        }
        self.correct() as f64 / total as f64
    }

    /// Matrix as a float array, rows indexed by true class
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.n_classes, self.n_classes), |(i, j)| {
            self.matrix[i][j] as f64
        })
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix:")?;

        // Header
        write!(f, "      ")?;
        for label in &self.labels {
            write!(f, "Pred {label} ")?;
        }
        writeln!(f)?;

        // Rows
        for (i, label) in self.labels.iter().enumerate() {
            write!(f, "True {label}")?;
            for j in 0..self.n_classes {
                write!(f, "{:>6} ", self.matrix[i][j])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
