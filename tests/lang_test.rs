mod common;

use carlae::error::ErrorKind;
use carlae::function::EvalErr;
use carlae::number::Number;
use carlae::value::Value;
use carlae::Error;

fn int(i: i64) -> Value {
    Number::Integer(i).into()
}

fn list_of(env: &carlae::environment::Environment, source: &str) -> Value {
    carlae::eval_str(source, env).unwrap()
}


#[test]
fn basic_arithmetic() {
    let env = common::setup();

    let results = common::results(&env, &["(+ 1 2)", "(* 2 3 4)"]);
    assert_eq!(results, vec![int(3), int(24)]);

    let results = common::results(&env, &["(* (+ 1 1) 3)", "(* (+ 1 1) 3.)"]);
    assert_eq!(results, vec![int(6), Value::from(Number::Float(6.0))]);

    let results = common::results(&env, &["(/ (- 1 1) 2)", "(/ (+ 1 1) 2)", "(- 5)"]);
    assert_eq!(
        results,
        vec![
            Value::from(Number::Float(0.)),
            Value::from(Number::Float(1.)),
            int(-5)
        ]
    );
}

#[test]
fn define_function() {
    let env = common::setup();

    let results = common::results(&env, &["(define (square x) (* x x))", "(square 5)"]);
    assert_eq!(results[1], int(25));

    let results = common::results_with_errors(&env, &["(square)", "(square 1 2)"]);
    for result in results {
        assert!(matches!(
            result,
            Err(Error::Eval(EvalErr::WrongArgumentCount { .. }))
        ));
    }
}

#[test]
fn def_recursive_lambda() {
    let env = common::setup();

    let results = common::results(
        &env,
        &[
            "(define fact (lambda (n)
               (if (=? n 1) 1
                 (* n (fact (- n 1))))))",
            "(fact 4)",
        ],
    );
    assert_eq!(results[1], int(24));
}

#[test]
fn let_scoping() {
    let env = common::setup();

    let results = common::results(
        &env,
        &["(let ((a 1)
                 (b 2))
             (+ a b))"],
    );
    assert_eq!(results, vec![int(3)]);

    let results = common::results_with_errors(&env, &["a", "b"]);
    for result in results {
        assert!(matches!(
            result,
            Err(Error::Eval(EvalErr::UndefinedName(_)))
        ));
    }
}

#[test]
fn set_existing() {
    let env = common::setup();

    let results = common::results(&env, &["(define x 1)", "(set! x 2)", "x"]);
    assert_eq!(results[2], int(2));

    let err = carlae::eval_str("(set! y 5)", &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
}

#[test]
fn list_primitives() {
    let env = common::setup();

    let results = common::results(
        &env,
        &[
            "(car (list 1 2 3))",
            "(length (list))",
            "(length (list 1 2 3))",
            "(elt-at-index (list 5 6 7) 1)",
        ],
    );
    assert_eq!(results, vec![int(1), int(0), int(3), int(6)]);

    assert_eq!(
        list_of(&env, "(cdr (list 1 2 3))"),
        list_of(&env, "(list 2 3)")
    );
    assert_eq!(
        list_of(&env, "(concat (list 1) (list) (list 2 3))"),
        list_of(&env, "(list 1 2 3)")
    );

    let err = carlae::eval_str("(car (list))", &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
    let err = carlae::eval_str("(elt-at-index (list 1) 4)", &env).unwrap_err();
    assert!(matches!(
        err,
        Error::Eval(EvalErr::IndexOutOfRange { index: 4, length: 1 })
    ));
}

#[test]
fn higher_order() {
    let env = common::setup();

    assert_eq!(
        list_of(&env, "(map (lambda (x) (* x x)) (list 1 2 3))"),
        list_of(&env, "(list 1 4 9)")
    );
    assert_eq!(
        list_of(&env, "(filter (lambda (x) (> x 1)) (list 1 2 3))"),
        list_of(&env, "(list 2 3)")
    );
    assert_eq!(
        list_of(&env, "(reduce (lambda (a b) (+ a b)) (list 1 2 3) 0)"),
        int(6)
    );
    assert_eq!(
        list_of(&env, "(reduce (lambda (a b) (- a b)) (list 1 2 3) 10)"),
        int(4)
    );
}

#[test]
fn closures_capture_defining_env() {
    let env = common::setup();

    let results = common::results(
        &env,
        &[
            "(define outer 5)",
            "(define add-outer
               (let ((unused 0))
                 (lambda (x) (+ x outer))))",
            "(add-outer 1)",
            "(define (make-adder n) (lambda (x) (+ x n)))",
            "(define add3 (make-adder 3))",
            "(add3 4)",
        ],
    );
    assert_eq!(results[2], int(6));
    assert_eq!(results[5], int(7));

    // The let-bound name stays out of the global scope.
    assert!(carlae::eval_str("unused", &env).is_err());
}

#[test]
fn closures_share_mutable_state() {
    let env = common::setup();

    let results = common::results(
        &env,
        &[
            "(define (make-counter)
               (let ((count 0))
                 (lambda () (set! count (+ count 1)))))",
            "(define tick (make-counter))",
            "(begin (tick) (tick) (tick))",
        ],
    );
    assert_eq!(results[2], int(3));
}

#[test]
fn booleans() {
    let env = common::setup();

    let results = common::results(
        &env,
        &[
            "(and (> 3 2 1) (<= 1 1 2) (=? 2 2.0))",
            "(or (< 2 1) (not #t))",
            "(not (list))",
        ],
    );
    assert_eq!(
        results,
        vec![
            Value::Boolean(true),
            Value::Boolean(false),
            Value::Boolean(false)
        ]
    );
}

#[test]
fn syntax_errors() {
    for source in &["(+ 1 2", "(+ 1 2))", ")", "", "1 2"] {
        let err = common::eval_fresh(source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{:?}", source);
    }
}

#[test]
fn evaluation_errors() {
    for source in &["()", "(undefined 1)", "(1 2)", "(car 1)", "(+ 1 #t)"] {
        let err = common::eval_fresh(source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Evaluation, "{:?}", source);
    }
}

#[test]
fn repeatable_in_fresh_envs() {
    let sources = [
        "(let ((a 3)) (map (lambda (x) (* a x)) (list 1 2 3)))",
        "(reduce + (concat (list 1 2) (list 3)) 0)",
        "(if (=? (length (list 1 2)) 2) (/ 1 4) 0)",
    ];
    for source in sources.iter() {
        let a = common::eval_fresh(source).unwrap();
        let b = common::eval_fresh(source).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn recursion_through_builtins_is_bounded() {
    let env = common::setup();

    let results = common::results_with_errors(
        &env,
        &["(define (f x) (map f (list x)))", "(f 1)", "(+ 1 2)"],
    );
    assert!(matches!(
        results[1],
        Err(Error::Eval(EvalErr::RecursionLimit(_)))
    ));
    // The session is still usable afterwards.
    assert!(matches!(results[2], Ok(_)));
}

#[test]
fn deep_plain_recursion() {
    let env = common::setup();

    let results = common::results(
        &env,
        &[
            "(define (count n) (if (=? n 0) 0 (+ 1 (count (- n 1)))))",
            "(count 1000)",
        ],
    );
    assert_eq!(results[1], int(1000));
}

#[test]
fn deeply_nested_list_values() {
    let env = common::setup();

    let mut sources = vec!["(define l (list 0))"];
    sources.extend(std::iter::repeat("(set! l (concat l l))").take(18));
    sources.push("(define deep (reduce (lambda (a b) (list a)) l 0))");
    sources.push("(=? deep deep)");
    sources.push("(length deep)");
    let results = common::results(&env, &sources);
    assert_eq!(results[results.len() - 2], Value::Boolean(true));
    assert_eq!(results[results.len() - 1], int(1));

    drop(results);

    let shown = carlae::eval_str("deep", &env).unwrap().to_string();
    assert!(shown.contains("(...)"));

    // Releasing the only reference frees every nested cell.
    let after = common::results(&env, &["(set! deep 0)", "(length l)"]);
    assert_eq!(after[1], int(1 << 18));
}
