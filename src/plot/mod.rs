//! Figures
//!
//! [`Plotter`] turns a [`State`](crate::state::State) into named figures. Each
//! figure is first described backend-independently as a [`FigureSpec`], then
//! rendered by a [`FigureBackend`] looked up by name in a [`BackendTable`].
//!
//! Built-in backends:
//! - `text`: braille line and scatter charts, block-bar histograms, grids
//! - `json`: the description itself, tagged by `kind`

mod backend;
mod figure;
mod plotter;
mod specs;
mod text;

#[cfg(test)]
mod tests;

pub use backend::{BackendTable, FigureBackend, JsonBackend, TextBackend};
pub use figure::{Figure, FigureContent, FigureMap, FigureSpec, Series};
pub use plotter::Plotter;
