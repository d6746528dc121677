pub mod error;
pub mod graph;
pub mod interrupt;
pub mod io;
pub mod pipeline;
pub mod types;

pub use error::{Error, Result};
