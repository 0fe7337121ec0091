//! End-to-end scenarios over the public surface: building trees, querying
//! them through selectors, transforming them in place, and freezing them.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use strata_structure::{
    init_tracing, BinaryOp, Data, Func, Interpreter, Item, LambdaFunc, Num, Operator, Record,
    Selector, StructureError, Value,
};

fn get(key: &str) -> Selector {
    Selector::identity().get(key)
}

#[test]
fn tracing_setup_is_idempotent() {
    init_tracing();
    init_tracing();
}

// =============================================================================
// Querying
// =============================================================================

mod querying {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn descendants_visit_in_pre_order() {
        let tree = Record::of([
            Item::slot("a", Record::of([Item::slot("b", 1), Item::slot("c", 2)])),
            Item::slot("d", 3),
        ]);
        let mut interpreter = Interpreter::from_scope(tree);
        let all = Selector::identity()
            .descendants()
            .evaluate(&mut interpreter);
        assert_eq!(
            all,
            Item::from(Record::of([
                Item::from(Record::of([Item::slot("b", 1), Item::slot("c", 2)])),
                Item::from(1),
                Item::from(2),
                Item::from(3),
            ]))
        );
        assert_eq!(interpreter.scope_depth(), 1);
    }

    #[test]
    fn nested_lookup_and_shadowing() {
        let mut interpreter = Interpreter::from_scope(Record::of([
            Item::slot("x", 1),
            Item::slot("x", 2),
            Item::slot("user", Record::of([Item::slot("name", "ada")])),
        ]));
        assert_eq!(get("x").evaluate(&mut interpreter), Item::from(2));
        assert_eq!(
            get("user").get("name").evaluate(&mut interpreter),
            Item::from("ada")
        );

        interpreter
            .push_scope(Record::of([Item::slot("x", 3)]))
            .unwrap();
        assert_eq!(get("x").evaluate(&mut interpreter), Item::from(3));
        assert_eq!(
            get("user").get("name").evaluate(&mut interpreter),
            Item::absent()
        );
        interpreter.pop_scope().unwrap();
        assert_eq!(get("x").evaluate(&mut interpreter), Item::from(2));
    }

    #[test]
    fn inner_records_do_not_see_outer_fields() {
        let template = Record::of([
            Item::slot("a", Record::of([Item::slot("b", get("c"))])),
            Item::slot("c", 1),
        ]);
        let resolved = template.evaluate(&mut Interpreter::new());
        assert_eq!(
            resolved,
            Item::from(Record::of([
                Item::slot("a", Record::new()),
                Item::slot("c", 1),
            ]))
        );
    }

    #[test]
    fn record_expressions_resolve_together() {
        let template = Record::of([
            Item::slot("width", 4),
            Item::slot("height", 5),
            Item::slot(
                "area",
                Operator::binary(BinaryOp::Times, get("width"), get("height")),
            ),
        ]);
        let mut interpreter = Interpreter::new();
        let resolved = template.evaluate(&mut interpreter);
        assert_eq!(
            resolved.as_value().as_record().unwrap().get("area"),
            &Value::from(20)
        );
    }

    #[test]
    fn lambdas_called_from_scope() {
        let square = LambdaFunc::new("n", Operator::binary(BinaryOp::Times, get("n"), get("n")));
        let mut interpreter = Interpreter::from_scope(Record::of([
            Item::slot("square", Func::from(square)),
            Item::slot("side", 3),
        ]));
        let call = Operator::invoke(get("square"), Record::of([get("side")]));
        assert_eq!(call.evaluate(&mut interpreter), Item::from(9));
    }
}

// =============================================================================
// Transforming
// =============================================================================

mod transforming {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absent_results_delete_members_in_order() {
        let mut interpreter = Interpreter::from_scope(Record::of([1, 2, 3]));
        let result = Selector::identity()
            .children()
            .map_selected(&mut interpreter, |_, item| {
                if *item == Item::from(2) {
                    Item::absent()
                } else {
                    item.clone()
                }
            })
            .unwrap();
        assert_eq!(result, Item::from(Record::of([1, 3])));
        assert_eq!(interpreter.peek_scope(), Some(&result));
    }

    #[test]
    fn transforming_a_branch_leaves_the_source() {
        let source = Record::of([Item::slot("n", 1), Item::slot("m", 2)]);
        let mut interpreter = Interpreter::from_scope(source.branch());
        let result = get("n")
            .map_selected(&mut interpreter, |_, item| {
                Item::from(item.as_value().as_num().map_or(Num::NAN, |n| n.plus(Num::ONE)))
            })
            .unwrap();
        assert_eq!(
            result,
            Item::from(Record::of([Item::slot("n", 2), Item::slot("m", 2)]))
        );
        assert_eq!(source.get("n"), &Value::from(1));
    }

    #[test]
    fn committed_trees_reject_changes() {
        let frozen = Record::of([Item::slot("n", 1)]).committed();
        let mut interpreter = Interpreter::from_scope(frozen.clone());
        let result = get("n").map_selected(&mut interpreter, |_, _| Item::from(5));
        assert_eq!(result, Err(StructureError::Immutable { what: "record" }));

        let mut shared = frozen.clone();
        assert!(shared.push(2).is_err());

        let mut branch = frozen.branch();
        branch.push(2).unwrap();
        assert_eq!(branch.len(), 2);
        assert_eq!(frozen.len(), 1);

        let mut thawed = frozen.deep_clone();
        thawed.set("n", 5).unwrap();
        assert_eq!(thawed.get("n"), &Value::from(5));
    }
}

// =============================================================================
// Buffers and numbers
// =============================================================================

mod leaves {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn data_grows_in_powers_of_two() {
        let mut data = Data::new();
        assert_eq!(data.capacity(), 0);
        data.add_byte(1).unwrap();
        assert_eq!(data.capacity(), 32);
        data.add_buffer(&[0; 32]).unwrap();
        assert_eq!(data.len(), 33);
        assert_eq!(data.capacity(), 64);
    }

    #[test]
    fn data_branches_copy_on_write() {
        let mut data = Data::from([1, 2]);
        let mut branch = data.branch();
        branch.add_byte(3).unwrap();
        data.set_byte(0, 9).unwrap();
        assert_eq!(data.as_slice(), &[9, 2]);
        assert_eq!(branch.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn equivalence_tolerates_drift() {
        let a = Value::from(0.1 + 0.2);
        let b = Value::from(0.3);
        assert_ne!(a, b);
        assert!(a.equivalent(&b));
        assert!(!a.equivalent_to(&Value::from(0.31), 1e-8));

        let left = Item::from(Record::of([Item::slot("x", 0.1 + 0.2)]));
        let right = Item::from(Record::of([Item::slot("x", 0.3)]));
        assert!(left.equivalent(&right));
    }
}
