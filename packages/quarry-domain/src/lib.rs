pub mod fusion;
pub mod lexical;
pub mod scope;

mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Candidate, Chunk, SearchMode};
