//! Output: a state bound to its components
//!
//! Accessors take a `lazy` flag: `true` hands back the uncomputed component in
//! [`Deferred::Lazy`], `false` computes immediately and returns
//! [`Deferred::Ready`].

mod composition;
mod deferred;


pub use composition::{evaluate_all, Output};
pub use deferred::{Component, Deferred};
