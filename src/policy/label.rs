//! Classification cardinality

use crate::data::Values;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Concrete classification cardinality. Each variant selects one averaging rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelType {
    /// Labels in {0, 1}; scalar metrics
    Binary,
    /// One label per row drawn from k classes; per-class vectors plus averages
    Multiclass,
    /// `(n, k)` indicator matrix; per-label vectors plus averages
    Multilabel,
}

/// Requested label type, possibly `Auto`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelTypeSpec {
    /// Infer from `y_true`
    #[default]
    Auto,
    Binary,
    Multiclass,
    Multilabel,
}

/// Infer the label type from `y_true` alone.
///
/// Rank 2 is multilabel; otherwise binary when every non-NaN value is 0 or 1,
/// else multiclass. Predictions never influence the decision.
pub fn resolve_label_type(y_true: &Values) -> LabelType {
    match y_true {
        Values::Matrix(_) => LabelType::Multilabel,
        Values::Vector(v) => {
            if v.iter().filter(|x| !x.is_nan()).all(|&x| x == 0.0 || x == 1.0) {
                LabelType::Binary
            } else {
                LabelType::Multiclass
            }
        }
    }
}

impl LabelTypeSpec {
    /// Convert to a concrete label type. Runs once per metric call.
    ///
    /// An explicit type is checked against `y_true`: multilabel needs a matrix,
    /// binary and multiclass need a vector, and binary needs labels in {0, 1}.
    pub fn resolve(self, y_true: &Values) -> Result<LabelType> {
        let inferred = resolve_label_type(y_true);
        let concrete = match self {
            Self::Auto => return Ok(inferred),
            Self::Binary => LabelType::Binary,
            Self::Multiclass => LabelType::Multiclass,
            Self::Multilabel => LabelType::Multilabel,
        };
        match (concrete, inferred) {
            (LabelType::Multilabel, LabelType::Multilabel) => Ok(concrete),
            (LabelType::Multilabel, _) => Err(Error::InvalidInput(
                "multilabel label type requires a 2-d y_true".into(),
            )),
            (_, LabelType::Multilabel) => Err(Error::InvalidInput(format!(
                "{concrete} label type requires a 1-d y_true"
            ))),
            (LabelType::Binary, LabelType::Multiclass) => Err(Error::InvalidInput(
                "binary label type requires y_true values in {0, 1}".into(),
            )),
            _ => Ok(concrete),
        }
    }
}

impl From<LabelType> for LabelTypeSpec {
    fn from(label_type: LabelType) -> Self {
        match label_type {
            LabelType::Binary => Self::Binary,
            LabelType::Multiclass => Self::Multiclass,
            LabelType::Multilabel => Self::Multilabel,
        }
    }
}

impl FromStr for LabelTypeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "binary" => Ok(Self::Binary),
            "multiclass" => Ok(Self::Multiclass),
            "multilabel" => Ok(Self::Multilabel),
            _ => Err(Error::InvalidLabelType(s.to_string())),
        }
    }
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Binary => "binary",
            Self::Multiclass => "multiclass",
            Self::Multilabel => "multilabel",
        })
    }
}

impl fmt::Display for LabelTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Binary => fmt::Display::fmt(&LabelType::Binary, f),
            Self::Multiclass => fmt::Display::fmt(&LabelType::Multiclass, f),
            Self::Multilabel => fmt::Display::fmt(&LabelType::Multilabel, f),
        }
    }
}
