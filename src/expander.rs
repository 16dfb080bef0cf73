use crate::reader::Datum;
use crate::types::{Arity, BadArgCount, Define, If, Import, Lambda, Node, Symbol};
use std::fmt;
use std::fs::read_to_string;
use std::rc::Rc;

#[derive(Debug)]
pub enum Error {
    BadForm(BadArgCount),
    DefineTargetNotSymbol,
    ImportPathNotText,
    Io { path: String, source: std::io::Error },
}

pub type Result<T = Node> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadForm(e) => write!(f, "bad syntax: {}", e),
            Error::DefineTargetNotSymbol => {
                write!(f, "bad syntax: first argument to define must be a symbol")
            }
            Error::ImportPathNotText => {
                write!(f, "bad syntax: argument to import must be a string")
            }
            Error::Io { path, source } => write!(f, "io error reading {}: {}", path, source),
        }
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::BadForm(e)
    }
}

const COMPARISONS: [&str; 5] = ["<", ">", "<=", ">=", "=="];

/// Turns a read datum into a node the evaluator understands. Lists headed by
/// a special-form keyword are checked for shape here, before anything runs.
pub fn expand(datum: &Datum) -> Result {
    match datum {
        Datum::Number(x) => Ok(Node::Number(*x)),
        Datum::Text(s) => Ok(Node::Text(s.clone())),
        Datum::Symbol(s) => Ok(Node::new_symbol(s)),
        Datum::Boolean(b) => Ok(Node::Boolean(*b)),
        Datum::List(elements) => expand_list(elements),
    }
}

fn expand_list(elements: &[Datum]) -> Result {
    let keyword = match elements.first() {
        Some(Datum::Symbol(s)) => s.as_str(),
        _ => "",
    };
    // Quoted data is never classified, so it may hold anything the reader accepts.
    if keyword == "quote" {
        Arity::exactly(2).validate_for(elements.len(), "quote")?;
        return Ok(Node::Quote(Rc::new(literal(&elements[1]))));
    }

    let mut list = elements
        .iter()
        .map(expand)
        .collect::<Result<Vec<Node>>>()?;

    if let Some(op) = COMPARISONS.iter().find(|op| **op == keyword) {
        Arity::exactly(3).validate_for(list.len(), *op)?;
    }
    match keyword {
        "if" => {
            Arity::exactly(4).validate_for(list.len(), "if")?;
            let mut parts = list.drain(1..);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(test), Some(consequent), Some(alternate)) => Ok(Node::If(Rc::new(If {
                    test,
                    consequent,
                    alternate,
                }))),
                _ => unreachable!("arity checked above"),
            }
        }
        "lambda" => {
            Arity::exactly(3).validate_for(list.len(), "lambda")?;
            let body = list.pop();
            let parameters = list.pop();
            match (parameters, body) {
                (Some(parameters), Some(body)) => Ok(make_lambda(parameters, body)),
                _ => unreachable!("arity checked above"),
            }
        }
        "begin" => {
            Arity::at_least(2).validate_for(list.len(), "begin")?;
            Ok(Node::wrap_begin(list.split_off(1)))
        }
        "define" => expand_define(list),
        "import" => {
            Arity::exactly(2).validate_for(list.len(), "import")?;
            match &list[1] {
                Node::Text(path) => load(path),
                _ => Err(Error::ImportPathNotText),
            }
        }
        _ => Ok(Node::wrap_list(list)),
    }
}

fn expand_define(mut list: Vec<Node>) -> Result {
    Arity::Between(3..=4).validate_for(list.len(), "define")?;
    let name = match &list[1] {
        Node::Symbol(s) => s.clone(),
        _ => return Err(Error::DefineTargetNotSymbol),
    };
    let value = match list.len() {
        3 => list.pop(),
        _ => {
            let body = list.pop();
            let parameters = list.pop();
            parameters.zip(body).map(|(p, b)| make_lambda(p, b))
        }
    };
    match value {
        Some(value) => Ok(Node::Define(Rc::new(Define { name, value }))),
        None => unreachable!("arity checked above"),
    }
}

fn make_lambda(parameters: Node, body: Node) -> Node {
    Node::Lambda(Rc::new(Lambda { parameters, body }))
}

fn load(path: &str) -> Result {
    log::debug!("import {}", path);
    let source = read_to_string(path).map_err(|source| Error::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(Node::Import(Rc::new(Import {
        path: path.to_string(),
        source,
    })))
}

fn literal(datum: &Datum) -> Node {
    match datum {
        Datum::List(elements) => Node::wrap_list(elements.iter().map(literal).collect()),
        Datum::Symbol(s) => Node::Symbol(Symbol(s.clone())),
        Datum::Number(x) => Node::Number(*x),
        Datum::Text(s) => Node::Text(s.clone()),
        Datum::Boolean(b) => Node::Boolean(*b),
    }
}
