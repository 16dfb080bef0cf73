use crate::environment::Environment;
use crate::{evaluator, expander, printer, reader, types::Node};
use derive_more::From;
use std::fmt;
use std::rc::Rc;

pub type Result<T = Node> = std::result::Result<T, Error>;
#[derive(Debug, From)]
pub enum Error {
    Read(reader::Error),
    Expand(expander::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "{}", e),
            Error::Expand(e) => write!(f, "{}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

/// Reads and expands one value. Shape errors in special forms surface here,
/// before anything is evaluated.
#[allow(non_snake_case)]
pub fn READ(line: &str) -> Result {
    let datum = reader::read_str(line)?;
    Ok(expander::expand(&datum)?)
}

#[allow(non_snake_case)]
pub fn EVAL(ast: &Node, env: &Rc<Environment>) -> Result {
    Ok(evaluator::EVAL(ast, env)?)
}

#[allow(non_snake_case)]
pub fn PRINT(obj: &Node) -> String {
    printer::pr_str(obj)
}

pub fn rep(line: &str, env: &Rc<Environment>) -> Result<String> {
    READ(line).and_then(|ast| EVAL(&ast, env)).map(|obj| PRINT(&obj))
}

/// Evaluates the single top-level expression stored in `path`, as if it had
/// been imported at the top level of `env`.
pub fn run_file(path: &str, env: &Rc<Environment>) -> Result<String> {
    let ast = expander::expand(&reader::Datum::List(vec![
        reader::Datum::Symbol("import".into()),
        reader::Datum::Text(path.into()),
    ]))?;
    EVAL(&ast, env).map(|obj| PRINT(&obj))
}
