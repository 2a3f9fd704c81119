//! Missing-value handling

use crate::data::ArrayPair;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How metric functions treat NaN in their inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NanPolicy {
    /// Keep every row; metrics touched by NaN become NaN
    #[default]
    Propagate,
    /// Drop rows holding NaN in either array before computing
    Omit,
    /// Fail as soon as a NaN is seen
    Raise,
}

impl NanPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Propagate => "propagate",
            Self::Omit => "omit",
            Self::Raise => "raise",
        }
    }

    /// Apply the policy to a pair, returning the pair to compute on and whether NaN was seen.
    ///
    /// `Omit` removes incomplete rows pairwise, keeping row order. `Propagate` returns the
    /// pair untouched. `Raise` fails naming the first array (`y_true` checked first) that
    /// holds a NaN.
    pub fn apply(self, pair: ArrayPair) -> Result<(ArrayPair, bool)> {
        let true_nan = pair.y_true().has_nan();
        let pred_nan = pair.y_pred().has_nan();
        let contains_nan = true_nan || pred_nan;

        match self {
            Self::Raise if true_nan => Err(Error::NanEncountered { array: "y_true" }),
            Self::Raise if pred_nan => Err(Error::NanEncountered { array: "y_pred" }),
            Self::Omit if contains_nan => {
                let rows = pair.complete_rows();
                tracing::debug!(
                    dropped = pair.n_rows() - rows.len(),
                    kept = rows.len(),
                    "omitting rows with NaN"
                );
                Ok((pair.select_rows(&rows), true))
            }
            _ => Ok((pair, contains_nan)),
        }
    }
}

impl FromStr for NanPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "omit" => Ok(Self::Omit),
            "raise" => Ok(Self::Raise),
            _ => Err(Error::InvalidNanPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for NanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
