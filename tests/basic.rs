use stoat_prolog::{config::Config, context::Context};

fn context_with(source: &str) -> Context {
    let mut ctx = Context::from_config(Config::default());
    ctx.load(source).unwrap();
    ctx
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

mod basic {
    use super::*;

    const FAMILY: &str = "
        parent(tom, bob). parent(tom, liz).
        parent(bob, ann). parent(bob, pat).
        grandparent(X, Z) :- parent(X, Y), parent(Y, Z).
    ";

    #[test]
    fn grandparent() {
        let mut ctx = context_with(FAMILY);
        assert_eq!(values(&mut ctx, "grandparent(tom, G).", "G"), ["ann", "pat"]);
    }

    #[test]
    fn facts_in_insertion_order() {
        let mut ctx = context_with(FAMILY);
        assert_eq!(values(&mut ctx, "parent(tom, C).", "C"), ["bob", "liz"]);
    }

    #[test]
    fn conjunction_is_nested_for_each() {
        let mut ctx = context_with(FAMILY);
        let pairs = ctx
            .query("parent(tom, X), parent(X, Y).")
            .unwrap()
            .map(|s| {
                let s = s.unwrap();
                format!("{}-{}", s.value("X").unwrap(), s.value("Y").unwrap())
            })
            .collect::<Vec<_>>();
        assert_eq!(pairs, ["bob-ann", "bob-pat"]);
    }

    #[test]
    fn unknown_predicate_fails_silently() {
        let mut ctx = context_with(FAMILY);
        assert_eq!(solution_count(&mut ctx, "zebra(stripes)."), 0);
    }

    #[test]
    fn variable_goal_fails() {
        let mut ctx = context_with(FAMILY);
        assert_eq!(solution_count(&mut ctx, "X."), 0);
    }

    #[test]
    fn true_yields_once() {
        let mut ctx = context_with(FAMILY);
        let solutions = ctx
            .query("true.")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(solutions.len(), 1);
        assert!(solutions[0].is_empty());
        assert_eq!(solutions[0].to_string(), "true");
    }

    #[test]
    fn fail_yields_nothing() {
        let mut ctx = context_with(FAMILY);
        assert_eq!(solution_count(&mut ctx, "fail."), 0);
        assert_eq!(solution_count(&mut ctx, "false."), 0);
    }

    #[test]
    fn solution_displays_resolved_terms() {
        let mut ctx = context_with(FAMILY);
        let solutions = ctx
            .query("X = 1, Y = f(X).")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].to_string(), "X = 1, Y = f(1)");
    }

    #[test]
    fn solutions_are_reproducible() {
        let mut ctx = context_with(FAMILY);
        let first = values(&mut ctx, "grandparent(A, B).", "B");
        let second = values(&mut ctx, "grandparent(A, B).", "B");
        assert_eq!(first, second);
        assert_eq!(first, ["ann", "pat"]);
    }

    #[test]
    fn abandoned_stream_rewinds_bindings() {
        let mut ctx = context_with(FAMILY);
        let variables_before = ctx.bindings.variable_count();
        let trail_before = ctx.bindings.trail.len();

        {
            let mut answers = ctx.query("parent(tom, C).").unwrap();
            assert!(answers.next().is_some());
            // Dropped mid-stream.
        }

        assert_eq!(ctx.bindings.trail.len(), trail_before);
        for variable in variables_before as u32..ctx.bindings.variable_count() as u32 {
            assert!(ctx.bindings.lookup(variable).is_none());
        }
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reports_clause_count() {
        let mut ctx = Context::from_config(Config::default());
        assert_eq!(ctx.load("a(1). a(2). b(X) :- a(X)."), Ok(3));
    }

    #[test]
    fn parse_error_retains_earlier_clauses() {
        let mut ctx = Context::from_config(Config::default());
        ctx.load("good(1).").unwrap();
        assert!(ctx.load("bad(").is_err());
        assert_eq!(solution_count(&mut ctx, "good(1)."), 1);
    }

    #[test]
    fn assert_one_adds_a_single_clause() {
        let mut ctx = Context::from_config(Config::default());
        ctx.assert_one("likes(mary, wine).").unwrap();
        assert_eq!(solution_count(&mut ctx, "likes(mary, wine)."), 1);
        assert!(ctx.assert_one("a(1). a(2).").is_err());
    }

    #[test]
    fn directives_run_at_load_time() {
        let mut ctx = Context::from_config(Config::default());
        ctx.load(":- assertz(seen(yes)).").unwrap();
        assert_eq!(values(&mut ctx, "seen(X).", "X"), ["yes"]);
    }

    #[test]
    fn failing_directive_is_not_an_error() {
        let mut ctx = Context::from_config(Config::default());
        assert_eq!(ctx.load(":- fail. ok(1)."), Ok(1));
        assert_eq!(solution_count(&mut ctx, "ok(1)."), 1);
    }

    #[test]
    fn reset_returns_to_a_clean_state() {
        let mut ctx = context_with("p(1). p(2).");
        assert_eq!(solution_count(&mut ctx, "p(X)."), 2);

        ctx.reset();
        assert_eq!(solution_count(&mut ctx, "p(X)."), 0);
        // The prelude survives a reset.
        assert_eq!(solution_count(&mut ctx, "member(X, [a, b])."), 2);
    }
}

mod errors {
    use super::*;
    use stoat_prolog::types::err::{ErrorKind, EvaluateError, SolveError};

    #[test]
    fn runtime_error_aborts_the_stream() {
        let mut ctx = context_with("n(1). n(2).");
        let mut answers = ctx.query("n(X), Y is X + foo.").unwrap();

        match answers.next() {
            Some(Err(ErrorKind::Solve(SolveError::Evaluate(EvaluateError::NotNumeric {
                term,
            })))) => assert_eq!(term, "foo"),
            other => panic!("expected an evaluation error, got {other:?}"),
        }
        assert!(answers.next().is_none());
    }

    #[test]
    fn database_survives_a_runtime_error() {
        let mut ctx = context_with("n(1).");
        {
            let mut answers = ctx.query("n(X), Y is X / 0.").unwrap();
            assert!(matches!(answers.next(), Some(Err(_))));
        }
        assert_eq!(solution_count(&mut ctx, "n(1)."), 1);
    }
}
