pub mod cmdline;
pub mod environment;
pub mod evaluator;
pub mod expander;
pub mod interpreter;
pub mod printer;
pub mod reader;
pub mod types;

#[macro_use]
extern crate lazy_static;

mod core;
mod tokens;

pub use types::Node;
