//! TF-IDF + linear multiclass model.
//!
//! The artifact is a JSON export of a fitted bag-of-words model:
//!
//! ```json
//! {
//!   "classes": [0, 1, 2],
//!   "vocabulary": {"love": 0, "hate": 1},
//!   "idf": [1.7, 2.1],
//!   "coef": [[-1.0, 2.0], [0.0, 0.0], [2.0, -1.0]],
//!   "intercept": [0.0, 0.1, 0.0],
//!   "ngram_max": 1,
//!   "sublinear_tf": false
//! }
//! ```
//!
//! Features are term counts (optionally `1 + ln(tf)`) times IDF, L2
//! normalized. The class with the highest `intercept + coef · x` wins; ties
//! go to the class listed first.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use crate::error::LoadError;
use crate::scoring::Classifier;

fn default_ngram_max() -> usize {
    1
}

/// On-disk form of a [`LinearTextModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Class id for each coefficient row.
    pub classes: Vec<i64>,
    /// Term to feature column.
    pub vocabulary: FxHashMap<String, usize>,
    /// Inverse document frequency per feature column.
    pub idf: Vec<f64>,
    /// One row of feature weights per class.
    pub coef: Vec<Vec<f64>>,
    /// One bias per class.
    pub intercept: Vec<f64>,
    /// 1 for unigrams, 2 for unigrams + bigrams.
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
    /// Use `1 + ln(tf)` instead of raw counts.
    #[serde(default)]
    pub sublinear_tf: bool,
}

impl ModelArtifact {
    fn check(&self) -> Result<(), String> {
        let n_features = self.idf.len();
        let n_classes = self.classes.len();

        if n_classes == 0 {
            return Err("no classes".to_string());
        }
        if self.coef.len() != n_classes {
            return Err(format!(
                "{} coefficient rows for {} classes",
                self.coef.len(),
                n_classes
            ));
        }
        if self.intercept.len() != n_classes {
            return Err(format!(
                "{} intercepts for {} classes",
                self.intercept.len(),
                n_classes
            ));
        }
        if let Some(row) = self.coef.iter().position(|row| row.len() != n_features) {
            return Err(format!(
                "coefficient row {} has {} columns, expected {}",
                row,
                self.coef[row].len(),
                n_features
            ));
        }
        if let Some((term, &col)) = self.vocabulary.iter().find(|(_, &c)| c >= n_features) {
            return Err(format!(
                "term '{term}' maps to column {col}, only {n_features} columns"
            ));
        }
        if !(1..=2).contains(&self.ngram_max) {
            return Err(format!("unsupported ngram_max {}", self.ngram_max));
        }
        Ok(())
    }
}

/// Linear classifier over TF-IDF features.
#[derive(Debug, Clone)]
pub struct LinearTextModel {
    artifact: ModelArtifact,
}

impl LinearTextModel {
    /// Builds a model from an in-memory artifact.
    ///
    /// # Errors
    /// Returns a description of the first inconsistency found.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, String> {
        artifact.check()?;
        Ok(Self { artifact })
    }

    /// Loads and validates a JSON artifact.
    ///
    /// # Errors
    /// [`LoadError::Io`] if the file cannot be opened, [`LoadError::Parse`]
    /// for malformed JSON, [`LoadError::Shape`] for inconsistent dimensions.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        let artifact: ModelArtifact =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let model = Self::from_artifact(artifact).map_err(|reason| LoadError::Shape {
            path: path.to_path_buf(),
            reason,
        })?;

        info!(
            path = %path.display(),
            classes = ?model.artifact.classes,
            features = model.artifact.idf.len(),
            "loaded classifier artifact"
        );
        Ok(model)
    }

    /// Class ids in coefficient-row order.
    pub fn classes(&self) -> &[i64] {
        &self.artifact.classes
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.artifact.idf.len()
    }

    /// Sparse, L2-normalized TF-IDF vector of `cleaned`.
    fn features(&self, cleaned: &str) -> FxHashMap<usize, f64> {
        let a = &self.artifact;
        let tokens: SmallVec<[&str; 32]> = cleaned.split_whitespace().collect();
        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();

        for token in &tokens {
            if let Some(&col) = a.vocabulary.get(*token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        if a.ngram_max >= 2 {
            let mut bigram = String::new();
            for pair in tokens.windows(2) {
                bigram.clear();
                bigram.push_str(pair[0]);
                bigram.push(' ');
                bigram.push_str(pair[1]);
                if let Some(&col) = a.vocabulary.get(bigram.as_str()) {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }
        }

        for (col, value) in counts.iter_mut() {
            let tf = if a.sublinear_tf {
                1.0 + value.ln()
            } else {
                *value
            };
            *value = tf * a.idf[*col];
        }

        let norm = counts.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in counts.values_mut() {
                *value /= norm;
            }
        }

        counts
    }

    /// Per-class decision values, in [`LinearTextModel::classes`] order.
    pub fn decision_function(&self, cleaned: &str) -> Vec<f64> {
        let features = self.features(cleaned);
        self.artifact
            .coef
            .iter()
            .zip(&self.artifact.intercept)
            .map(|(row, bias)| {
                bias + features
                    .iter()
                    .map(|(&col, &x)| row[col] * x)
                    .sum::<f64>()
            })
            .collect()
    }
}

impl Classifier for LinearTextModel {
    fn predict_class(&self, cleaned: &str) -> i64 {
        let scores = self.decision_function(cleaned);
        let mut best = 0usize;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = i;
            }
        }
        self.artifact.classes[best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn artifact() -> ModelArtifact {
        let vocabulary = [("love", 0usize), ("hate", 1), ("phone", 2), ("not good", 3)]
            .into_iter()
            .map(|(t, c)| (t.to_string(), c))
            .collect();
        ModelArtifact {
            classes: vec![0, 1, 2],
            vocabulary,
            idf: vec![1.5, 1.5, 1.0, 2.0],
            coef: vec![
                vec![-2.0, 3.0, 0.0, 3.0],
                vec![0.0, 0.0, 0.5, 0.0],
                vec![3.0, -2.0, 0.0, -1.0],
            ],
            intercept: vec![0.0, 0.1, 0.0],
            ngram_max: 1,
            sublinear_tf: false,
        }
    }

    fn model() -> LinearTextModel {
        LinearTextModel::from_artifact(artifact()).unwrap()
    }

    #[test]
    fn predicts_each_class() {
        let m = model();
        assert_eq!(m.predict_class("i love my phone"), 2);
        assert_eq!(m.predict_class("i hate my phone"), 0);
        assert_eq!(m.predict_class("my phone"), 1);
    }

    #[test]
    fn empty_text_falls_back_to_intercepts() {
        assert_eq!(model().predict_class(""), 1);
        assert_eq!(model().predict_class("zzz unknown words"), 1);
    }

    #[test]
    fn features_are_l2_normalized() {
        let f = model().features("love love hate");
        let norm: f64 = f.values().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bigrams_only_when_enabled() {
        let mut a = artifact();
        let uni = LinearTextModel::from_artifact(a.clone()).unwrap();
        assert_eq!(uni.features("not good").len(), 0);

        a.ngram_max = 2;
        let bi = LinearTextModel::from_artifact(a).unwrap();
        assert_eq!(bi.features("not good").len(), 1);
        assert_eq!(bi.predict_class("not good"), 0);
    }

    #[test]
    fn ties_go_to_first_class() {
        let mut a = artifact();
        a.intercept = vec![0.0, 0.0, 0.0];
        let m = LinearTextModel::from_artifact(a).unwrap();
        assert_eq!(m.predict_class(""), 0);
    }

    #[test]
    fn sublinear_tf_dampens_repeats() {
        let mut a = artifact();
        a.sublinear_tf = true;
        let m = LinearTextModel::from_artifact(a).unwrap();
        let f = m.features("love love love love hate");
        let love = f[&0];
        let hate = f[&1];
        // raw counts would give a 4:1 ratio
        assert!(love / hate < 4.0);
    }

    #[test]
    fn shape_errors() {
        let mut a = artifact();
        a.intercept.pop();
        assert!(LinearTextModel::from_artifact(a).is_err());

        let mut a = artifact();
        a.coef[1].push(0.0);
        assert!(LinearTextModel::from_artifact(a).is_err());

        let mut a = artifact();
        a.vocabulary.insert("ghost".to_string(), 99);
        assert!(LinearTextModel::from_artifact(a).is_err());

        let mut a = artifact();
        a.ngram_max = 3;
        assert!(LinearTextModel::from_artifact(a).is_err());

        let mut a = artifact();
        a.classes.clear();
        a.coef.clear();
        a.intercept.clear();
        assert!(LinearTextModel::from_artifact(a).is_err());
    }

    #[test]
    fn load_round_trip_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, &artifact()).unwrap();
        file.flush().unwrap();

        let m = LinearTextModel::load(file.path()).unwrap();
        assert_eq!(m.classes(), &[0, 1, 2]);
        assert_eq!(m.n_features(), 4);
        assert_eq!(m.predict_class("love"), 2);
    }

    #[test]
    fn load_defaults_optional_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"classes":[0,1,2],"vocabulary":{{"ok":0}},"idf":[1.0],
                "coef":[[0.0],[1.0],[0.0]],"intercept":[0,0,0]}}"#
        )
        .unwrap();

        let m = LinearTextModel::load(file.path()).unwrap();
        assert_eq!(m.predict_class("ok"), 1);
    }

    #[test]
    fn missing_artifact_is_io_error() {
        let err = LinearTextModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn malformed_artifact_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = LinearTextModel::load(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn inconsistent_artifact_is_shape_error() {
        let mut a = artifact();
        a.idf.pop();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, &a).unwrap();
        file.flush().unwrap();

        let err = LinearTextModel::load(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Shape { .. }));
    }
}
