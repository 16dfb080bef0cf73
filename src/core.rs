use crate::evaluator;
use crate::types::{Arity, Node, Number, PrimitiveFn};

fn grab_numbers(args: &[Node]) -> evaluator::Result<Vec<Number>> {
    let type_check: Result<Vec<_>, _> = args.iter().map(|o| o.as_number()).collect();
    type_check.map_err(evaluator::Error::TypeMismatch)
}

// The first argument seeds the fold, so there is no identity element and
// zero arguments are rejected by the arity check.
fn fold_(args: &[Node], op: fn(Number, Number) -> Number) -> evaluator::Result {
    let numbers = grab_numbers(args)?;
    match numbers.split_first() {
        Some((&seed, rest)) => Ok(Node::Number(rest.iter().fold(seed, |acc, &x| op(acc, x)))),
        None => unreachable!("arity checked by call_primitive"),
    }
}

static SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: |args| fold_(args, |x, y| x + y),
    arity: Arity::at_least(1),
};

static SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: |args| fold_(args, |x, y| x - y),
    arity: Arity::at_least(1),
};

static MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: |args| fold_(args, |x, y| x * y),
    arity: Arity::at_least(1),
};

static DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: |args| fold_(args, |x, y| x / y),
    arity: Arity::at_least(1),
};

fn comparison_(args: &[Node], comp: fn(&Number, &Number) -> bool) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(Node::Boolean(comp(x, y))),
        _ => unreachable!("arity checked by call_primitive"),
    }
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            static $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[Node]| comparison_(args, Number:: [<$NAME:lower>]),
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(<, LT);
comparison_primitive!(<=, LE);
comparison_primitive!(>, GT);
comparison_primitive!(>=, GE);
comparison_primitive!(=, EQ);

static CAR: PrimitiveFn = PrimitiveFn {
    name: "car",
    fn_ptr: car_,
    arity: Arity::exactly(1),
};

fn car_(args: &[Node]) -> evaluator::Result {
    let list = args[0].as_list()?;
    list.first().cloned().ok_or(evaluator::Error::EmptyList("car"))
}

static CDR: PrimitiveFn = PrimitiveFn {
    name: "cdr",
    fn_ptr: cdr_,
    arity: Arity::exactly(1),
};

fn cdr_(args: &[Node]) -> evaluator::Result {
    match args[0].as_list()?.split_first() {
        Some((_, rest)) => Ok(Node::wrap_list(rest.to_vec())),
        None => Err(evaluator::Error::EmptyList("cdr")),
    }
}

static LIST: PrimitiveFn = PrimitiveFn {
    name: "list",
    fn_ptr: list_,
    arity: Arity::at_least(0),
};

fn list_(args: &[Node]) -> evaluator::Result {
    Ok(Node::wrap_list(args.to_vec()))
}

static LENGTH: PrimitiveFn = PrimitiveFn {
    name: "length",
    fn_ptr: length_,
    arity: Arity::exactly(1),
};

fn length_(args: &[Node]) -> evaluator::Result {
    Ok(Node::Number(args[0].as_list()?.len() as Number))
}

pub static CORE: &[&PrimitiveFn] = &[
    // Arithmetic
    &SUM, &SUB, &MUL, &DIV, // Comparisons
    &LT, &LE, &GT, &GE, &EQ, // Working with lists
    &CAR, &CDR, &LIST, &LENGTH,
];
