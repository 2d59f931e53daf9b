//! Data model shared by the pipeline stages.
//!
//! Fragments are the input of the structure builder, blocks are its output.
//! Neither carries behavior beyond simple accessors; classification lives in
//! [`crate::structure`] and serialization in [`crate::render`].

mod block;
mod fragment;

pub use block::Block;
pub use fragment::{indent_width, Fragment};
