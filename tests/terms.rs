use stoat_prolog::{config::Config, context::Context, structures::term::Term};
use stoat_prolog::types::err::{ErrorKind, SolveError};

fn context() -> Context {
    Context::from_config(Config::default())
}

fn values(ctx: &mut Context, query: &str, name: &str) -> Vec<String> {
    ctx.query(query)
        .unwrap()
        .map(|solution| solution.unwrap().value(name).unwrap().to_string())
        .collect()
}

fn solution_count(ctx: &mut Context, query: &str) -> usize {
    ctx.query(query).unwrap().map(|s| s.unwrap()).count()
}

mod unification {
    use super::*;

    #[test]
    fn not_unifiable() {
        let mut ctx = context();
        assert_eq!(solution_count(&mut ctx, "a \\= b."), 1);
        assert_eq!(solution_count(&mut ctx, "a \\= a."), 0);
        assert_eq!(solution_count(&mut ctx, "f(a) \\= f(b)."), 1);
        // A variable unifies with anything, so the trial succeeds and \= fails.
        assert_eq!(solution_count(&mut ctx, "X \\= a."), 0);
    }

    #[test]
    fn trial_bindings_are_rewound() {
        let mut ctx = context();
        assert_eq!(values(&mut ctx, "f(X) \\= f(g(h)), X = kept.", "X"), Vec::<String>::new());
        assert_eq!(values(&mut ctx, "\\+ (f(X) = f(g(h))), X = kept.", "X"), Vec::<String>::new());
        // The failing trial inside \= leaves X free for the rest of the body.
        assert_eq!(values(&mut ctx, "f(X, a) \\= f(b, c), X = kept.", "X"), ["kept"]);
    }

    #[test]
    fn integers_and_floats_are_distinct_terms() {
        let mut ctx = context();
        assert_eq!(solution_count(&mut ctx, "1 = 1.0."), 0);
        assert_eq!(solution_count(&mut ctx, "1 =:= 1.0."), 1);
    }

    #[test]
    fn strings_are_not_atoms() {
        let mut ctx = context();
        assert_eq!(solution_count(&mut ctx, "\"abc\" = abc."), 0);
        assert_eq!(solution_count(&mut ctx, "\"abc\" = \"abc\"."), 1);
    }
}

mod structural_equality {
    use super::*;

    #[test]
    fn compares_without_unifying() {
        let mut ctx = context();
        assert_eq!(solution_count(&mut ctx, "a == a."), 1);
        assert_eq!(solution_count(&mut ctx, "a == b."), 0);
        assert_eq!(solution_count(&mut ctx, "X == X."), 1);
        assert_eq!(solution_count(&mut ctx, "X == Y."), 0);
        assert_eq!(solution_count(&mut ctx, "X \\== Y."), 1);
        assert_eq!(solution_count(&mut ctx, "f(X) == f(X)."), 1);
    }

    #[test]
    fn follows_bindings() {
        let mut ctx = context();
        assert_eq!(solution_count(&mut ctx, "X = a, X == a."), 1);
        assert_eq!(solution_count(&mut ctx, "X = Y, X == Y."), 1);
    }
}

mod type_tests {
    use super::*;

    #[test]
    fn on_unbound_and_bound() {
        let mut ctx = context();
        assert_eq!(solution_count(&mut ctx, "var(X)."), 1);
        assert_eq!(solution_count(&mut ctx, "X = a, var(X)."), 0);
        assert_eq!(solution_count(&mut ctx, "X = a, nonvar(X)."), 1);
    }

    #[test]
    fn by_variant() {
        let mut ctx = context();
        assert_eq!(solution_count(&mut ctx, "atom(foo)."), 1);
        assert_eq!(solution_count(&mut ctx, "atom(foo(1))."), 0);
        assert_eq!(solution_count(&mut ctx, "atom([])."), 1);
        assert_eq!(solution_count(&mut ctx, "number(3)."), 1);
        assert_eq!(solution_count(&mut ctx, "integer(3)."), 1);
        assert_eq!(solution_count(&mut ctx, "integer(3.5)."), 0);
        assert_eq!(solution_count(&mut ctx, "float(3.5)."), 1);
        assert_eq!(solution_count(&mut ctx, "compound(foo(1))."), 1);
        assert_eq!(solution_count(&mut ctx, "compound(foo)."), 0);
        assert_eq!(solution_count(&mut ctx, "atomic(foo)."), 1);
        assert_eq!(solution_count(&mut ctx, "atomic(foo(1))."), 0);
    }
}

mod inspection {
    use super::*;

    #[test]
    fn functor_decomposes() {
        let mut ctx = context();
        let solutions = ctx
            .query("functor(foo(a, b), N, A).")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(solutions[0].value("N").unwrap().to_string(), "foo");
        assert_eq!(solutions[0].value("A").unwrap().to_string(), "2");
    }

    #[test]
    fn functor_of_an_atomic_term() {
        let mut ctx = context();
        assert_eq!(values(&mut ctx, "functor(x, N, _).", "N"), ["x"]);
        assert_eq!(values(&mut ctx, "functor(7, N, _).", "N"), ["7"]);
        assert_eq!(values(&mut ctx, "functor(x, _, A).", "A"), ["0"]);
    }

    #[test]
    fn functor_constructs() {
        let mut ctx = context();
        let solutions = ctx
            .query("functor(T, foo, 2).")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let constructed = solutions[0].value("T").unwrap();
        match constructed {
            Term::Compound(c) => {
                assert_eq!(c.functor, "foo");
                assert_eq!(c.args.len(), 2);
            }
            other => panic!("expected a compound, got {other}"),
        }
    }

    #[test]
    fn functor_needs_enough_instantiation() {
        let mut ctx = context();
        let mut answers = ctx.query("functor(T, N, A).").unwrap();
        assert!(matches!(
            answers.next(),
            Some(Err(ErrorKind::Solve(SolveError::Instantiation { .. })))
        ));
    }

    #[test]
    fn arg_selects_one_based() {
        let mut ctx = context();
        assert_eq!(values(&mut ctx, "arg(2, foo(a, b, c), X).", "X"), ["b"]);
        assert_eq!(solution_count(&mut ctx, "arg(5, foo(a), X)."), 0);
    }

    #[test]
    fn arg_zero_is_a_domain_error() {
        let mut ctx = context();
        let mut answers = ctx.query("arg(0, foo(a), X).").unwrap();
        assert!(matches!(
            answers.next(),
            Some(Err(ErrorKind::Solve(SolveError::Domain { .. })))
        ));
    }

    #[test]
    fn univ_decomposes() {
        let mut ctx = context();
        assert_eq!(values(&mut ctx, "foo(a, b) =.. L.", "L"), ["[foo, a, b]"]);
        assert_eq!(values(&mut ctx, "x =.. L.", "L"), ["[x]"]);
    }

    #[test]
    fn univ_constructs() {
        let mut ctx = context();
        assert_eq!(values(&mut ctx, "T =.. [foo, a].", "T"), ["foo(a)"]);
        assert_eq!(values(&mut ctx, "T =.. [x].", "T"), ["x"]);
    }

    #[test]
    fn univ_round_trips() {
        let mut ctx = context();
        assert_eq!(
            solution_count(&mut ctx, "foo(a, b) =.. L, T =.. L, T == foo(a, b)."),
            1
        );
    }
}

mod reading {
    use super::*;

    #[test]
    fn operators_build_compounds() {
        let mut ctx = context();
        assert_eq!(solution_count(&mut ctx, "X = 2 + 3 * 4, X == +(2, *(3, 4))."), 1);
        assert_eq!(solution_count(&mut ctx, "X = (a, b), X == ','(a, b)."), 1);
        assert_eq!(solution_count(&mut ctx, "X = (a ; b), X == ';'(a, b)."), 1);
    }

    #[test]
    fn comparison_operators_are_non_associative() {
        let mut ctx = context();
        assert!(ctx.query("X = (a = b = c).").is_err());
    }

    #[test]
    fn quoted_atoms() {
        let mut ctx = context();
        assert_eq!(values(&mut ctx, "X = 'hello world'.", "X"), ["hello world"]);
        assert_eq!(solution_count(&mut ctx, "'a b' = 'a b'."), 1);
        assert_eq!(solution_count(&mut ctx, "atom('a b')."), 1);
    }

    #[test]
    fn strings_keep_their_content() {
        let mut ctx = context();
        assert_eq!(
            values(&mut ctx, "X = \"hello world\".", "X"),
            ["\"hello world\""]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let mut ctx = context();
        ctx.load("% a line comment\np(1). /* a block\ncomment */ p(2).")
            .unwrap();
        assert_eq!(solution_count(&mut ctx, "p(X)."), 2);
    }

    #[test]
    fn anonymous_variables_are_distinct() {
        let mut ctx = context();
        // Two occurrences of _ do not co-refer.
        assert_eq!(solution_count(&mut ctx, "f(_, _) = f(1, 2)."), 1);
    }

    #[test]
    fn underscore_named_variables_are_hidden_from_solutions() {
        let mut ctx = context();
        let solutions = ctx
            .query("_Hidden = 1, X = 2.")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(solutions[0].len(), 1);
        assert!(solutions[0].value("_Hidden").is_none());
    }
}

mod reading_failures {
    use super::*;

    #[test]
    fn malformed_clauses() {
        let mut ctx = context();
        assert!(matches!(ctx.load("foo("), Err(ErrorKind::Parse(_))));
        assert!(matches!(ctx.load("foo(a)"), Err(ErrorKind::Parse(_))));
        assert!(matches!(ctx.load("foo(a))."), Err(ErrorKind::Parse(_))));
        assert!(matches!(ctx.load("3."), Err(ErrorKind::Parse(_))));
    }

    #[test]
    fn malformed_characters() {
        let mut ctx = context();
        assert!(matches!(ctx.load("p(`)."), Err(ErrorKind::Tokenize(_))));
        assert!(matches!(ctx.load("p('abc)."), Err(ErrorKind::Tokenize(_))));
        assert!(matches!(ctx.load("p(\"abc)."), Err(ErrorKind::Tokenize(_))));
        assert!(matches!(ctx.load("/* open"), Err(ErrorKind::Tokenize(_))));
    }

    #[test]
    fn queries_report_errors_too() {
        let mut ctx = context();
        assert!(ctx.query("foo(").is_err());
        assert!(ctx.query("").is_err());
    }
}
