use crate::environment::{BindError, Environment, UnknownSymbol};
use crate::types::{BadArgCount, Closure, Node, PrimitiveFn, TypeMismatch};
use crate::{expander, reader};
use itertools::Itertools;

use std::fmt;
use std::rc::Rc;

pub type Result<T = Node> = std::result::Result<T, Error>;
#[derive(Debug)]
pub enum Error {
    UnknownSymbol(UnknownSymbol),
    TypeMismatch(TypeMismatch),
    BadArgCount(BadArgCount),
    Bind(BindError),
    NotCallable(Node),
    EmptyList(&'static str),
    // Raised while splicing in the source of an `import`.
    Read(reader::Error),
    Expand(expander::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSymbol(UnknownSymbol(s)) => write!(f, "undefined symbol: {}", s),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::Bind(e) => write!(f, "{}", e),
            Error::NotCallable(obj) => write!(f, "undefined function: {}", obj),
            Error::EmptyList(name) => write!(f, "{}: empty list", name),
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Expand(e) => write!(f, "{}", e),
        }
    }
}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<BindError> for Error {
    fn from(e: BindError) -> Self {
        Self::Bind(e)
    }
}

impl From<reader::Error> for Error {
    fn from(e: reader::Error) -> Self {
        Self::Read(e)
    }
}

impl From<expander::Error> for Error {
    fn from(e: expander::Error) -> Self {
        Self::Expand(e)
    }
}

/// Evaluates `orig_ast` in `orig_env`.
///
/// Tail positions (the chosen `if` branch, the last expression of a `begin`,
/// the body of a called closure and the source spliced in by an `import`)
/// replace the current node and environment and go round the loop again
/// instead of recursing, so they do not grow the native stack.
#[allow(non_snake_case)]
pub fn EVAL(orig_ast: &Node, orig_env: &Rc<Environment>) -> Result {
    let mut ast = orig_ast.clone();
    let mut env = orig_env.clone();
    loop {
        log::trace!("eval {}", ast);
        match &ast {
            Node::Number(_) | Node::Text(_) | Node::Boolean(_) => return Ok(ast.clone()),
            Node::Symbol(s) => return env.fetch(s).map_err(Error::UnknownSymbol),
            Node::Define(define) => {
                let value = EVAL(&define.value, &env)?;
                log::debug!("define {} as {}", define.name, value);
                return Ok(env.define(define.name.clone(), value));
            }
            Node::Lambda(lambda) => {
                return Ok(Node::Closure(Rc::new(Closure {
                    parameters: lambda.parameters.clone(),
                    body: lambda.body.clone(),
                    parent: env.clone(),
                })))
            }
            Node::Quote(body) => return Ok((**body).clone()),
            Node::Import(import) => {
                log::debug!("splice {}", import.path);
                let datum = reader::read_str(&import.source)?;
                ast = expander::expand(&datum)?;
                continue;
            }
            Node::If(if_) => {
                let test = EVAL(&if_.test, &env)?.as_bool()?;
                ast = match test {
                    true => if_.consequent.clone(),
                    false => if_.alternate.clone(),
                };
                continue;
            }
            Node::Begin(exprs) => {
                let (last, init) = match exprs.split_last() {
                    Some(split) => split,
                    None => unreachable!("begin is never empty after expansion"),
                };
                for expr in init {
                    EVAL(expr, &env)?;
                }
                ast = last.clone();
                continue;
            }
            Node::List(list) => {
                let evaluated = evaluate_sequence_elementwise(list, &env)?;
                let (callable, args) = match evaluated.split_first() {
                    Some(split) => split,
                    None => return Ok(Node::new_list()),
                };
                match callable {
                    Node::Primitive(f) => return call_primitive(f, args),
                    Node::Closure(f) => {
                        let next_env = make_closure_env(f, args.to_vec())?;
                        ast = f.body.clone();
                        env = next_env;
                        continue;
                    }
                    _ => return Err(Error::NotCallable(callable.clone())),
                }
            }
            Node::Closure(_) | Node::Primitive(_) => return Ok(ast.clone()),
        }
    }
}

pub fn evaluate_sequence_elementwise(seq: &[Node], env: &Rc<Environment>) -> Result<Vec<Node>> {
    seq.iter().map(|obj| EVAL(obj, env)).collect()
}

pub(crate) fn pretty_print_args(args: &[Node]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_primitive(func: &PrimitiveFn, args: &[Node]) -> Result {
    func.arity
        .validate_for(args.len(), func.name)
        .map_err(Error::BadArgCount)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

fn make_closure_env(func: &Closure, args: Vec<Node>) -> Result<Rc<Environment>> {
    log::trace!("Call closure ({}) with {}", func.parameters, pretty_print_args(&args));
    let env = Environment::bind(&func.parameters, args, &func.parent)?;
    Ok(env)
}
