use pretty_assertions::assert_eq;
use rust_scm::environment::{self, BindError, Environment};
use rust_scm::interpreter::{self, Error};
use rust_scm::{evaluator, expander, reader};
use std::rc::Rc;

fn rep(line: &str, env: &Rc<Environment>) -> String {
    match interpreter::rep(line, env) {
        Ok(output) => output,
        Err(e) => panic!("{} failed: {}", line, e),
    }
}

fn rep_err(line: &str, env: &Rc<Environment>) -> Error {
    match interpreter::rep(line, env) {
        Ok(output) => panic!("{} unexpectedly produced {}", line, output),
        Err(e) => e,
    }
}

#[test]
fn session() {
    // Each line runs in the same environment, in order.
    let env = environment::global();
    let cases = [
        ("(quote ())", "()"),
        ("(quote (define a 1))", "(define a 1)"),
        ("(begin (define a 1) (+ 1 2 3))", "6"),
        ("a", "1"),
        ("(quote (testing 1 (2) -3.14e+159))", "(testing 1 (2) -3.14e+159)"),
        ("(+ 2 2)", "4"),
        ("(+ (* 2 100) (* 1 10))", "210"),
        ("(if (> 6 5) (+ 1 1) (+ 2 2))", "2"),
        ("(if (< 6 5) (+ 1 1) (+ 2 2))", "4"),
        ("(define x 3)", "3"),
        ("x", "3"),
        ("(+ x x)", "6"),
        ("((lambda (x) (+ x x)) 5)", "10"),
        ("(define twice (lambda (x) (* 2 x)))", "#<closure (x)>"),
        ("(twice 5)", "10"),
        (
            "(define compose (lambda (f g) (lambda (x) (f (g x)))))",
            "#<closure (f g)>",
        ),
        ("((compose list twice) 5)", "(10)"),
        ("(define repeat (lambda (f) (compose f f)))", "#<closure (f)>"),
        ("((repeat twice) 5)", "20"),
        ("((repeat (repeat twice)) 5)", "80"),
        (
            "(define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))",
            "#<closure (n)>",
        ),
        ("(fact 3)", "6"),
        ("(fact 50)", "3.04141e+64"),
        (
            "(define abs (lambda (n) ((if (> n 0) + -) 0 n)))",
            "#<closure (n)>",
        ),
        ("(list (abs -3) (abs 0) (abs 3))", "(3 0 3)"),
    ];
    for &(input, expected) in cases.iter() {
        assert_eq!(rep(input, &env), expected, "evaluating {}", input);
    }
}

#[test]
fn tail_calls_do_not_grow_the_stack() {
    let env = environment::global();
    rep(
        "(define count (lambda (n acc) (if (<= n 0) acc (count (- n 1) (+ acc 1)))))",
        &env,
    );
    assert_eq!(rep("(count 200000 0)", &env), "200000");
}

#[test]
fn mutual_recursion_in_tail_position() {
    let env = environment::global();
    rep(
        "(begin
           (define even (lambda (n) (if (= n 0) true (odd (- n 1)))))
           (define odd (lambda (n) (if (= n 0) false (even (- n 1))))))",
        &env,
    );
    assert_eq!(rep("(even 100001)", &env), "false");
}

#[test]
fn begin_tail_and_side_effects_in_order() {
    let env = environment::global();
    assert_eq!(
        rep("(begin (define a 1) (define b (+ a 1)) (list a b))", &env),
        "(1 2)"
    );
    // Arguments are evaluated left to right.
    assert_eq!(rep("(list (define y 1) (define y 2) y)", &env), "(1 2 2)");
}

#[test]
fn define_binds_in_the_current_frame() {
    let env = environment::global();
    rep("(define x 1)", &env);
    rep("(define shadow (lambda (x) (begin (define x 10) x)))", &env);
    assert_eq!(rep("(shadow 5)", &env), "10");
    assert_eq!(rep("x", &env), "1");
}

#[test]
fn closures_capture_their_environment() {
    let env = environment::global();
    rep(
        "(define adder (lambda (n) (lambda (m) (+ n m))))",
        &env,
    );
    rep("(define add3 (adder 3))", &env);
    rep("(define n 100)", &env);
    assert_eq!(rep("(add3 4)", &env), "7");
}

#[test]
fn variadic_parameters() {
    let env = environment::global();
    rep("(define count-args (lambda args (length args)))", &env);
    assert_eq!(rep("(count-args 1 2 3)", &env), "3");
    assert_eq!(rep("(count-args)", &env), "0");
    assert_eq!(rep("((lambda args args) 1 \"two\" true)", &env), "(1 \"two\" true)");
}

#[test]
fn function_definition_shorthand() {
    let env = environment::global();
    rep("(define square (x) (* x x))", &env);
    assert_eq!(rep("(square 12)", &env), "144");
}

#[test]
fn list_primitives() {
    let env = environment::global();
    assert_eq!(rep("(car (quote (1 2 3)))", &env), "1");
    assert_eq!(rep("(cdr (quote (1 2 3)))", &env), "(2 3)");
    assert_eq!(rep("(cdr (list 1))", &env), "()");
    assert_eq!(rep("(length (list 1 2 3 4))", &env), "4");
    assert_eq!(rep("pi", &env), "3.14159");
}

#[test]
fn literals_evaluate_to_themselves() {
    let env = environment::global();
    assert_eq!(rep("\"hello world\"", &env), "\"hello world\"");
    assert_eq!(rep("[[two\nlines]]", &env), "\"two\nlines\"");
    assert_eq!(rep("true", &env), "true");
    assert_eq!(rep("-2.5", &env), "-2.5");
    assert_eq!(rep("()", &env), "()");
}

#[test]
fn quote_never_evaluates() {
    let env = environment::global();
    assert_eq!(rep("(quote (undefined-thing (if) 1))", &env), "(undefined-thing (if) 1)");
    assert_eq!(rep("(quote nope)", &env), "nope");
}

#[test]
fn unbound_symbol() {
    let env = environment::global();
    match rep_err("(+ 1 missing)", &env) {
        Error::Eval(evaluator::Error::UnknownSymbol(environment::UnknownSymbol(name))) => {
            assert_eq!(name.as_ref(), "missing")
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn applying_a_non_procedure() {
    let env = environment::global();
    assert!(matches!(
        rep_err("(1 2 3)", &env),
        Error::Eval(evaluator::Error::NotCallable(_))
    ));
    assert!(matches!(
        rep_err("(\"f\")", &env),
        Error::Eval(evaluator::Error::NotCallable(_))
    ));
}

#[test]
fn type_mismatches() {
    let env = environment::global();
    assert!(matches!(
        rep_err("(+ 1 \"2\")", &env),
        Error::Eval(evaluator::Error::TypeMismatch(_))
    ));
    assert!(matches!(
        rep_err("(if 1 2 3)", &env),
        Error::Eval(evaluator::Error::TypeMismatch(_))
    ));
    assert!(matches!(
        rep_err("(car 1)", &env),
        Error::Eval(evaluator::Error::TypeMismatch(_))
    ));
    assert!(matches!(
        rep_err("(car (list))", &env),
        Error::Eval(evaluator::Error::EmptyList("car"))
    ));
    assert!(matches!(
        rep_err("(+)", &env),
        Error::Eval(evaluator::Error::BadArgCount(_))
    ));
}

#[test]
fn closure_argument_count_must_match() {
    let env = environment::global();
    rep("(define pair (lambda (a b) (list a b)))", &env);
    assert!(matches!(
        rep_err("(pair 1)", &env),
        Error::Eval(evaluator::Error::Bind(BindError::WrongArgCount {
            expected: 2,
            got: 1
        }))
    ));
    assert!(matches!(
        rep_err("(pair 1 2 3)", &env),
        Error::Eval(evaluator::Error::Bind(BindError::WrongArgCount { .. }))
    ));
}

#[test]
fn malformed_forms_fail_before_evaluation() {
    let env = environment::global();
    for input in &[
        "(begin (define leaked 1) (if true 1))",
        "(begin (define leaked 1) (lambda (x)))",
        "(begin (define leaked 1) (define))",
    ] {
        assert!(
            matches!(rep_err(input, &env), Error::Expand(expander::Error::BadForm(_))),
            "{} should fail to expand",
            input
        );
    }
    // Nothing in the failed lines ran.
    assert!(matches!(
        rep_err("leaked", &env),
        Error::Eval(evaluator::Error::UnknownSymbol(_))
    ));
}

#[test]
fn parse_errors_report_the_remainder() {
    let env = environment::global();
    match rep_err("(+ 1 2) (+ 3 4)", &env) {
        Error::Read(reader::Error::TrailingInput(rest)) => assert_eq!(rest, "(+ 3 4)"),
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(
        rep_err("(+ 1 2", &env),
        Error::Read(reader::Error::UnclosedList)
    ));
    assert!(format!("{}", rep_err("(a . b)", &env)).contains(". b)"));
}

fn fixture(name: &str, contents: &str) -> String {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, contents).unwrap();
    path.display().to_string()
}

#[test]
fn import_splices_into_the_current_environment() {
    let env = environment::global();
    let path = fixture(
        "rust_scm_import_lib.scm",
        "(begin\n  (define triple (lambda (x) (* 3 x)))\n  (define greeting [[hello\nworld]]))",
    );
    assert_eq!(
        rep(&format!("(import \"{}\")", path), &env),
        "\"hello\nworld\""
    );
    assert_eq!(rep("(triple 7)", &env), "21");
}

#[test]
fn import_inside_a_closure_defines_locally() {
    let env = environment::global();
    let path = fixture("rust_scm_import_local.scm", "(define local 42)");
    rep(
        &format!("(define loader (lambda () (begin (import \"{}\") local)))", path),
        &env,
    );
    assert_eq!(rep("(loader)", &env), "42");
    assert!(matches!(
        rep_err("local", &env),
        Error::Eval(evaluator::Error::UnknownSymbol(_))
    ));
}

#[test]
fn missing_import_is_an_io_error() {
    let env = environment::global();
    assert!(matches!(
        rep_err("(import \"/no/such/file.scm\")", &env),
        Error::Expand(expander::Error::Io { .. })
    ));
}

#[test]
fn nested_import_errors_surface_from_evaluation() {
    let env = environment::global();
    let path = fixture("rust_scm_import_broken.scm", "(if true)");
    assert!(matches!(
        rep_err(&format!("(import \"{}\")", path), &env),
        Error::Eval(evaluator::Error::Expand(expander::Error::BadForm(_)))
    ));
}

#[test]
fn run_file_evaluates_in_the_given_environment() {
    let env = environment::global();
    let path = fixture("rust_scm_run_file.scm", "(begin (define z 2) (* z pi))");
    assert_eq!(interpreter::run_file(&path, &env).unwrap(), "6.28319");
    assert_eq!(rep("z", &env), "2");
}
