use crate::core;
use crate::types::{Node, Symbol, TypeMismatch};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
pub struct UnknownSymbol(pub Symbol);

#[derive(Debug)]
pub enum BindError {
    WrongArgCount { expected: usize, got: usize },
    ParameterNotASymbol,
    ParametersNotSymbolOrList,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::WrongArgCount { expected, got } => write!(
                f,
                "closure expected exactly {} arguments, but received {} arguments",
                expected, got
            ),
            BindError::ParameterNotASymbol => write!(f, "closure parameter is not a symbol"),
            BindError::ParametersNotSymbolOrList => {
                write!(f, "closure parameters must be a symbol or a list of symbols")
            }
        }
    }
}

/// One frame of bindings, linked to the frame it was spawned from.
pub struct Environment {
    bindings: RefCell<HashMap<Symbol, Node>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    pub fn spawn_from(outer: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(HashMap::new()),
            outer: Some(outer.clone()),
        })
    }

    /// Creates the frame for a closure call. A lone symbol collects every
    /// argument as a list; a list of symbols needs exactly one argument each.
    pub fn bind(
        parameters: &Node,
        args: Vec<Node>,
        outer: &Rc<Environment>,
    ) -> Result<Rc<Self>, BindError> {
        let env = Self::spawn_from(outer);
        match parameters {
            Node::Symbol(name) => {
                env.define(name.clone(), Node::wrap_list(args));
            }
            Node::List(names) => {
                if names.len() != args.len() {
                    return Err(BindError::WrongArgCount {
                        expected: names.len(),
                        got: args.len(),
                    });
                }
                for (name, value) in names.iter().zip(args) {
                    let name = name
                        .as_symbol()
                        .map_err(|_: TypeMismatch| BindError::ParameterNotASymbol)?;
                    env.define(name.clone(), value);
                }
            }
            _ => return Err(BindError::ParametersNotSymbolOrList),
        }
        Ok(env)
    }

    /// Binds in this frame only, shadowing any outer binding.
    pub fn define<T>(&self, key: T, value: Node) -> Node
    where
        T: Into<Symbol>,
    {
        self.bindings.borrow_mut().insert(key.into(), value.clone());
        value
    }

    pub fn get(&self, key: &Symbol) -> Option<Node> {
        let mut env = self;
        loop {
            if let Some(value) = env.bindings.borrow().get(key) {
                return Some(value.clone());
            }
            env = env.outer.as_deref()?;
        }
    }

    pub fn fetch(&self, key: &Symbol) -> Result<Node, UnknownSymbol> {
        self.get(key).ok_or_else(|| UnknownSymbol(key.clone()))
    }
}

impl Default for Environment {
    fn default() -> Self {
        let env = Self {
            bindings: RefCell::new(HashMap::new()),
            outer: None,
        };
        env.define("pi", Node::Number(std::f64::consts::PI));
        for &func in core::CORE.iter() {
            env.define(func.name, Node::Primitive(func));
        }
        env
    }
}

/// A fresh root environment holding the primitives.
pub fn global() -> Rc<Environment> {
    Rc::new(Environment::default())
}
