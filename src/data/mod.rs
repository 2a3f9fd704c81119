//! Input data containers
//!
//! - `Values`: rank-1 or rank-2 numeric arrays (labels, predictions, scores)
//! - `ArrayPair`: row-aligned `y_true`/`y_pred` with shape validation
//! - `Table`: named columns for dataset summaries

mod pair;
mod table;
mod values;


pub use pair::{check_shapes, ArrayPair};
pub use table::Table;
pub use values::{elements_equal, Values};
