use crate::environment::Environment;
use crate::evaluator;
use derive_more::{Deref, From};
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

pub type Number = f64;

#[derive(Deref, Debug, PartialEq)]
pub struct NodeList(pub Vec<Node>);

#[derive(Deref, From, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(name.into())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Node]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

/// A procedure value: parameter pattern and body, plus the environment the
/// `lambda` was evaluated in.
pub struct Closure {
    /// Either a single symbol (bound to the whole argument list) or a list of
    /// symbols bound positionally. Checked when the closure is called.
    pub parameters: Node,
    pub body: Node,
    pub parent: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the parent: the parent may well contain this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

#[derive(Debug)]
pub struct If {
    pub test: Node,
    pub consequent: Node,
    pub alternate: Node,
}

#[derive(Debug)]
pub struct Define {
    pub name: Symbol,
    pub value: Node,
}

#[derive(Debug)]
pub struct Lambda {
    pub parameters: Node,
    pub body: Node,
}

#[derive(Debug)]
pub struct Import {
    pub path: String,
    pub source: String,
}

/// Everything the interpreter handles: literal data, runtime values and the
/// syntax forms produced by the expander. The syntax variants (`If` through
/// `Import`) only ever appear as the node being evaluated.
#[derive(Debug, Clone)]
pub enum Node {
    Number(Number),
    Text(String),
    Symbol(Symbol),
    Boolean(bool),
    List(Rc<NodeList>),
    Closure(Rc<Closure>),
    Primitive(&'static PrimitiveFn),
    If(Rc<If>),
    Quote(Rc<Node>),
    Define(Rc<Define>),
    Lambda(Rc<Lambda>),
    Begin(Rc<NodeList>),
    Import(Rc<Import>),
}

#[derive(Debug)]
pub enum TypeMismatch {
    NotANumber,
    NotAList,
    NotASymbol,
    NotABoolean,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let expected = match self {
            TypeMismatch::NotANumber => "a number",
            TypeMismatch::NotAList => "a list",
            TypeMismatch::NotASymbol => "a symbol",
            TypeMismatch::NotABoolean => "a boolean",
        };
        write!(f, "expected {}", expected)
    }
}

impl Node {
    pub(crate) fn as_number(&self) -> Result<Number, TypeMismatch> {
        match self {
            Node::Number(x) => Ok(*x),
            _ => Err(TypeMismatch::NotANumber),
        }
    }

    pub(crate) fn as_list(&self) -> Result<&[Node], TypeMismatch> {
        match self {
            Node::List(x) => Ok(x.as_slice()),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub(crate) fn as_symbol(&self) -> Result<&Symbol, TypeMismatch> {
        match self {
            Node::Symbol(s) => Ok(s),
            _ => Err(TypeMismatch::NotASymbol),
        }
    }

    pub(crate) fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match self {
            Node::Boolean(b) => Ok(*b),
            _ => Err(TypeMismatch::NotABoolean),
        }
    }
}

impl Node {
    pub fn new_list() -> Self {
        Self::List(Rc::new(NodeList(Vec::new())))
    }
    pub fn wrap_list(elements: Vec<Node>) -> Self {
        Self::List(Rc::new(NodeList(elements)))
    }
    pub fn new_symbol(name: &str) -> Self {
        Self::Symbol(Symbol(name.into()))
    }
    pub(crate) fn wrap_begin(exprs: Vec<Node>) -> Self {
        Self::Begin(Rc::new(NodeList(exprs)))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        use Node::*;
        match [self, other] {
            [Number(x), Number(y)] => x == y,
            [Text(x), Text(y)] => x == y,
            [Symbol(x), Symbol(y)] => x == y,
            [Boolean(x), Boolean(y)] => x == y,
            [List(x), List(y)] => x == y,
            [Closure(x), Closure(y)] => Rc::ptr_eq(x, y),
            [Primitive(x), Primitive(y)] => std::ptr::eq(*x, *y),
            [Quote(x), Quote(y)] => x == y,
            [_, _] => false,
        }
    }
}
