mod error;
pub use crate::error::{ReadError, RecordError};

pub mod io;

#[cfg(test)]
mod tests;
