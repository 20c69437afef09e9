mod error;
pub use error::{ConfigError, ConvertError};

mod config;
pub use config::{LabelPosition, Mode, RenderConfig};

mod convert;
pub use convert::{Block, Converter, Document, ErrorPolicy, Output};

pub mod graphviz;

pub mod latex;

mod render;
pub use render::{Render, Renderer};
