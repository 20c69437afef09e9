mod error;
pub use crate::error::InvalidTree;

pub mod graph;

pub mod layout;

pub mod token;

pub mod tree;
