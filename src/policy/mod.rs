//! Input policies resolved before any metric is computed
//!
//! - `NanPolicy`: propagate, omit or raise on missing values
//! - `LabelTypeSpec` / `LabelType`: `auto` resolution to a concrete cardinality

mod label;
mod nan;


pub use label::{resolve_label_type, LabelType, LabelTypeSpec};
pub use nan::NanPolicy;
