//! HTML content built from evaluator metrics and plotter figures

mod generator;
mod html;


pub use generator::{Content, ContentGenerator};
