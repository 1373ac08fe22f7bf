use std::sync::{Arc, Mutex};

use constprop_ir::{Expr, Literal};
use ordered_float::OrderedFloat;

use crate::test_utils::*;
use crate::{
    ConstantPropagator, PropagationEvent, PropagationObserver, PropagationSettings,
    propagate_constants, propagate_predicate,
};

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<PropagationEvent>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<PropagationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl PropagationObserver for RecordingObserver {
    fn on_event(&self, event: &PropagationEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn recording(settings: PropagationSettings) -> (ConstantPropagator, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let propagator = ConstantPropagator::new(settings).with_observer(observer.clone());
    (propagator, observer)
}

fn wide_conditions(columns: usize) -> Vec<Expr> {
    let mut conditions = vec![eq(col("c0"), lit_i64(1))];
    conditions.extend((1..columns).map(|i| gt(col(&format!("c{}", i)), col("c0"))));
    conditions
}

#[test]
fn substitutes_and_replicates_in_one_pass() {
    let result = propagate_constants(&[
        eq(col("a"), col("b")),
        eq(col("b"), col("c")),
        lt(col("c"), lit_i64(5)),
        eq(col("d"), lit_i64(1)),
        gt(col("e"), col("d")),
    ]);

    assert_eq!(
        result,
        vec![
            eq(col("a"), col("b")),
            eq(col("b"), col("c")),
            lt(col("c"), lit_i64(5)),
            eq(col("d"), lit_i64(1)),
            gt(col("e"), lit_i64(1)),
            lt(col("a"), lit_i64(5)),
            lt(col("b"), lit_i64(5)),
        ]
    );
}

#[test]
fn transitive_inequality() {
    let result = propagate_constants(&[
        eq(col("a"), col("b")),
        eq(col("b"), col("c")),
        lt(col("c"), lit_i64(5)),
    ]);
    assert!(result.contains(&lt(col("a"), lit_i64(5))));
    assert!(result.contains(&lt(col("b"), lit_i64(5))));
    assert_eq!(result.len(), 5);
}

#[test]
fn conflicting_constants_collapse_to_false() {
    let (propagator, observer) = recording(PropagationSettings::default());
    let result = propagator.propagate(&[eq(col("a"), lit_i64(1)), eq(col("a"), lit_i64(2))]);

    assert!(is_false(&result));
    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        PropagationEvent::ConflictingConstants { existing: Literal::Int64(1), incoming: Literal::Int64(2), .. }
    ));
}

#[test]
fn null_equality_collapses_to_false() {
    let (propagator, observer) = recording(PropagationSettings::default());
    let result = propagator.propagate(&[eq(col("a"), lit_null()), eq(col("b"), lit_i64(3))]);

    assert!(is_false(&result));
    assert!(observer.events()[0].is_contradiction());
}

#[test]
fn conflict_found_in_a_later_round() {
    let result = propagate_constants(&[
        eq(col("a"), lit_i64(1)),
        eq(col("b"), col("a")),
        eq(col("d"), lit_i64(2)),
        eq(col("b"), col("d")),
    ]);
    assert!(is_false(&result));
}

#[test]
fn same_constant_twice_is_not_a_conflict() {
    let result = propagate_constants(&[
        eq(col("a"), lit_i64(1)),
        eq(lit_i64(1), col("a")),
        gt(col("b"), col("a")),
    ]);
    assert_eq!(result.len(), 3);
    assert_eq!(result[2], gt(col("b"), lit_i64(1)));
}

#[test]
fn same_nan_constant_twice_is_not_a_conflict() {
    let nan = || Expr::Literal(Literal::Float64(OrderedFloat(f64::NAN)));
    let result = propagate_constants(&[eq(col("a"), nan()), eq(col("a"), nan())]);
    assert_eq!(result, vec![eq(col("a"), nan()), eq(col("a"), nan())]);
}

#[test]
fn numeric_types_compare_across_representations() {
    let result = propagate_constants(&[
        eq(col("a"), lit_i64(1)),
        eq(col("a"), Expr::Literal(Literal::Float64(OrderedFloat(1.0)))),
    ]);
    assert!(!is_false(&result));

    let result = propagate_constants(&[
        eq(col("a"), lit_i64(1)),
        eq(col("a"), Expr::Literal(Literal::Float64(OrderedFloat(1.5)))),
    ]);
    assert!(is_false(&result));
}

#[test]
fn incomparable_constants_are_reported_not_collapsed() {
    let (propagator, observer) = recording(PropagationSettings::default());
    let result = propagator.propagate(&[eq(col("a"), lit_i64(1)), eq(col("a"), lit_str("x"))]);

    assert_eq!(result, vec![eq(col("a"), lit_i64(1)), eq(col("a"), lit_str("x"))]);
    assert!(matches!(
        observer.events().as_slice(),
        [PropagationEvent::IncomparableConstants { .. }]
    ));
}

#[test]
fn nested_substitution_without_folding() {
    let result = propagate_constants(&[
        eq(mul(col("b"), lit_i64(2)), col("c")),
        eq(col("c"), add(col("d"), lit_i64(2))),
        eq(col("b"), lit_i64(1)),
    ]);

    assert_eq!(
        result,
        vec![
            eq(mul(lit_i64(1), lit_i64(2)), col("c")),
            eq(col("c"), add(col("d"), lit_i64(2))),
            eq(col("b"), lit_i64(1)),
        ]
    );
}

#[test]
fn nested_substitution_with_folding() {
    let settings = PropagationSettings::default().with_constant_folding(true);
    let result = ConstantPropagator::new(settings).propagate(&[
        eq(mul(col("b"), lit_i64(2)), col("c")),
        eq(col("c"), add(col("d"), lit_i64(2))),
        eq(col("b"), lit_i64(1)),
    ]);

    assert_eq!(
        result,
        vec![
            eq(lit_i64(2), col("c")),
            eq(lit_i64(2), add(col("d"), lit_i64(2))),
            eq(col("b"), lit_i64(1)),
        ]
    );
}

#[test]
fn folded_contradiction_collapses_to_false() {
    let (propagator, observer) =
        recording(PropagationSettings::default().with_constant_folding(true));
    let result = propagator.propagate(&[
        eq(col("c"), lit_i64(2)),
        eq(col("c"), add(lit_i64(4), lit_i64(2))),
        lt(col("e"), col("c")),
    ]);

    assert!(is_false(&result));
    assert_eq!(
        observer.events(),
        vec![PropagationEvent::FoldedToFalse {
            condition: eq(lit_i64(2), add(lit_i64(4), lit_i64(2)))
        }]
    );
}

#[test]
fn column_cap_returns_input_unchanged() {
    let (propagator, observer) = recording(PropagationSettings::default());
    let conditions = wide_conditions(101);
    let result = propagator.propagate(&conditions);

    assert_eq!(result, conditions);
    assert_eq!(
        observer.events(),
        vec![PropagationEvent::ColumnLimitExceeded {
            columns: 101,
            max: 100
        }]
    );
}

#[test]
fn column_cap_is_inclusive() {
    let (propagator, observer) = recording(PropagationSettings::default());
    let result = propagator.propagate(&wide_conditions(100));

    assert_eq!(result[1], gt(col("c1"), lit_i64(1)));
    assert_eq!(result[99], gt(col("c99"), lit_i64(1)));
    assert!(observer.events().is_empty());
}

#[test]
fn cap_comes_from_settings() {
    let settings = PropagationSettings::from_toml_str("max_propagate_columns = 2").unwrap();
    let propagator = ConstantPropagator::new(settings);
    assert_eq!(propagator.settings().max_propagate_columns, 2);

    let conditions = vec![eq(col("a"), lit_i64(1)), gt(col("b"), col("a")), lt(col("c"), col("a"))];
    assert_eq!(propagator.propagate(&conditions), conditions);
}

#[test]
fn disjunction_without_cross_references_is_unchanged() {
    let predicate = or(
        and(eq(col("a"), lit_i64(1)), eq(col("b"), lit_i64(2))),
        and(eq(col("a"), lit_i64(1)), eq(col("c"), lit_i64(3))),
    );
    assert_eq!(propagate_constants(&[predicate.clone()]), vec![predicate]);
}

#[test]
fn disjunction_branches_are_isolated() {
    let result = propagate_constants(&[or(
        and(and(eq(col("a"), lit_i64(1)), gt(col("b"), col("a"))), lt(col("c"), col("d"))),
        and(and(eq(col("d"), lit_i64(2)), lt(col("c"), col("d"))), gt(col("b"), col("a"))),
    )]);
    assert_eq!(
        result,
        vec![or(
            and(and(eq(col("a"), lit_i64(1)), gt(col("b"), lit_i64(1))), lt(col("c"), col("d"))),
            and(and(eq(col("d"), lit_i64(2)), lt(col("c"), lit_i64(2))), gt(col("b"), col("a"))),
        )]
    );
}

#[test]
fn outer_facts_reach_into_disjunctions() {
    let result = propagate_constants(&[
        eq(col("x"), lit_i64(1)),
        or(eq(col("y"), col("x")), gt(col("z"), col("x"))),
    ]);
    assert_eq!(
        result,
        vec![
            eq(col("x"), lit_i64(1)),
            or(eq(col("y"), lit_i64(1)), gt(col("z"), lit_i64(1))),
        ]
    );
}

#[test]
fn branch_facts_substitute_within_their_branch() {
    let result = propagate_constants(&[or(
        and(eq(col("a"), lit_i64(1)), gt(col("b"), col("a"))),
        lt(col("b"), col("a")),
    )]);
    assert_eq!(
        result,
        vec![or(
            and(eq(col("a"), lit_i64(1)), gt(col("b"), lit_i64(1))),
            lt(col("b"), col("a")),
        )]
    );
}

#[test]
fn contradictory_branch_does_not_collapse_the_whole() {
    let result = propagate_constants(&[or(
        and(eq(col("a"), lit_i64(1)), eq(col("a"), lit_i64(2))),
        eq(col("b"), lit_i64(3)),
    )]);
    assert_eq!(result, vec![or(Expr::literal_false(), eq(col("b"), lit_i64(3)))]);
}

#[test]
fn replicated_inequality_keeps_orientation() {
    let result = propagate_constants(&[eq(col("a"), col("b")), gt(lit_i64(5), col("a"))]);
    assert_eq!(result[2], gt(lit_i64(5), col("b")));
}

#[test]
fn qualified_columns_stay_apart() {
    let result = propagate_constants(&[
        eq(qcol("t", "a", 0), lit_i64(1)),
        gt(qcol("u", "a", 0), qcol("t", "a", 0)),
    ]);
    assert_eq!(result[1], gt(qcol("u", "a", 0), lit_i64(1)));
}

#[test]
fn nested_and_input_is_split() {
    let result = propagate_constants(&[and(eq(col("a"), lit_i64(1)), gt(col("b"), col("a")))]);
    assert_eq!(result, vec![eq(col("a"), lit_i64(1)), gt(col("b"), lit_i64(1))]);
}

#[test]
fn empty_input_stays_empty() {
    assert!(propagate_constants(&[]).is_empty());
}

#[test]
fn conditions_without_columns_pass_through() {
    let conditions = vec![eq(lit_i64(1), lit_i64(1))];
    assert_eq!(propagate_constants(&conditions), conditions);
}

#[test]
fn rerun_adds_nothing() {
    let conditions = vec![
        eq(col("a"), col("b")),
        eq(col("b"), col("c")),
        lt(col("c"), lit_i64(5)),
        eq(col("d"), lit_i64(1)),
        gt(col("e"), col("d")),
        or(eq(col("f"), lit_i64(2)), lt(col("g"), col("d"))),
    ];
    let once = propagate_constants(&conditions);
    let twice = propagate_constants(&once);
    assert_eq!(once, twice);
}

#[test]
fn predicate_form_recombines_conjuncts() {
    let predicate = and(eq(col("a"), lit_i64(1)), gt(col("b"), col("a")));
    assert_eq!(
        propagate_predicate(&predicate),
        and(eq(col("a"), lit_i64(1)), gt(col("b"), lit_i64(1)))
    );

    let contradiction = and(eq(col("a"), lit_i64(1)), eq(col("a"), lit_i64(2)));
    assert!(propagate_predicate(&contradiction).is_literal_false());
}

#[test]
fn propagator_is_reusable() {
    let propagator = ConstantPropagator::default();
    let first = propagator.propagate(&[eq(col("a"), lit_i64(1)), eq(col("a"), lit_i64(2))]);
    let second = propagator.propagate(&[eq(col("a"), lit_i64(1)), gt(col("b"), col("a"))]);

    assert!(is_false(&first));
    assert_eq!(second[1], gt(col("b"), lit_i64(1)));
}
