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

mod assertion {
    use super::*;

    #[test]
    fn assertz_appends() {
        let mut ctx = context_with("p(1).");
        assert_eq!(solution_count(&mut ctx, "assertz(p(2))."), 1);
        assert_eq!(values(&mut ctx, "p(X).", "X"), ["1", "2"]);
    }

    #[test]
    fn asserta_prepends() {
        let mut ctx = context_with("p(1).");
        assert_eq!(solution_count(&mut ctx, "asserta(p(0))."), 1);
        assert_eq!(values(&mut ctx, "p(X).", "X"), ["0", "1"]);
    }

    #[test]
    fn search_order_of_existing_clauses_is_preserved() {
        let mut ctx = context_with("p(1). p(2).");
        assert_eq!(solution_count(&mut ctx, "assertz(p(3)), asserta(p(0))."), 1);
        assert_eq!(values(&mut ctx, "p(X).", "X"), ["0", "1", "2", "3"]);
    }

    #[test]
    fn asserted_rules_resolve() {
        let mut ctx = context_with("p(1). p(2).");
        assert_eq!(solution_count(&mut ctx, "assertz((q(X) :- p(X), X > 1))."), 1);
        assert_eq!(values(&mut ctx, "q(X).", "X"), ["2"]);
    }

    #[test]
    fn asserted_clauses_capture_current_bindings() {
        let mut ctx = context_with("p(1).");
        assert_eq!(solution_count(&mut ctx, "X = 7, assertz(fact(X))."), 1);
        assert_eq!(values(&mut ctx, "fact(Y).", "Y"), ["7"]);
    }

    #[test]
    fn a_new_predicate_may_be_asserted() {
        let mut ctx = context_with("p(1).");
        assert_eq!(solution_count(&mut ctx, "assertz(fresh(a))."), 1);
        assert_eq!(solution_count(&mut ctx, "fresh(a)."), 1);
    }
}

mod retraction {
    use super::*;

    #[test]
    fn removes_the_first_matching_clause() {
        let mut ctx = context_with("p(1). p(2). p(1).");
        assert_eq!(solution_count(&mut ctx, "retract(p(1))."), 1);
        assert_eq!(values(&mut ctx, "p(X).", "X"), ["2", "1"]);
    }

    #[test]
    fn binds_while_removing() {
        let mut ctx = context_with("p(1). p(2).");
        assert_eq!(values(&mut ctx, "retract(p(X)).", "X"), ["1"]);
        assert_eq!(values(&mut ctx, "p(X).", "X"), ["2"]);
    }

    #[test]
    fn succeeds_at_most_once() {
        let mut ctx = context_with("p(1). p(2).");
        // Semidet: no retry on backtracking.
        assert_eq!(solution_count(&mut ctx, "retract(p(_)), fail."), 0);
        assert_eq!(values(&mut ctx, "p(X).", "X"), ["2"]);
    }

    #[test]
    fn fails_without_a_match() {
        let mut ctx = context_with("p(1).");
        assert_eq!(solution_count(&mut ctx, "retract(p(2))."), 0);
        assert_eq!(solution_count(&mut ctx, "retract(q(_))."), 0);
        assert_eq!(values(&mut ctx, "p(X).", "X"), ["1"]);
    }

    #[test]
    fn matches_rules_by_head_and_body() {
        let mut ctx = context_with("q(X) :- p(X). q(9).");
        assert_eq!(solution_count(&mut ctx, "retract((q(X) :- p(X)))."), 1);
        assert_eq!(solution_count(&mut ctx, "retract((q(9) :- p(9)))."), 0);
        assert_eq!(solution_count(&mut ctx, "retract(q(9))."), 1);
    }
}

mod update_view {
    use super::*;

    #[test]
    fn a_running_call_keeps_its_snapshot() {
        let mut ctx = context_with("p(1). p(2).");
        // Clauses asserted while p/1 is being enumerated are not seen by that call.
        assert_eq!(values(&mut ctx, "p(X), assertz(p(3)).", "X"), ["1", "2"]);
        assert_eq!(values(&mut ctx, "p(X).", "X"), ["1", "2", "3", "3"]);
    }

    #[test]
    fn later_calls_see_the_update() {
        let mut ctx = context_with("p(1).");
        assert_eq!(
            solution_count(&mut ctx, "assertz(p(2)), p(2)."),
            1
        );
    }
}
