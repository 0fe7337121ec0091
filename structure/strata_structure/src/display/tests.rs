use pretty_assertions::assert_eq;

use crate::{BinaryOp, Data, Item, Num, Operator, Record, Selector, UnaryOp, Value};

fn get(key: &str) -> Selector {
    Selector::identity().get(key)
}

#[test]
fn test_leaves() {
    assert_eq!(Value::from(true).to_string(), "true");
    assert_eq!(Value::from(1).to_string(), "1");
    assert_eq!(Value::from(2.5).to_string(), "2.5");
    assert_eq!(Value::from("ident").to_string(), "ident");
    assert_eq!(Value::from("two words").to_string(), "\"two words\"");
    assert_eq!(Value::from(Data::from([1, 2, 3])).to_string(), "%AQID");
    assert_eq!(Value::Absent.to_string(), "");
}

#[test]
fn test_records_and_fields() {
    let record = Record::of([
        Item::attr("tag", Value::Extant),
        Item::attr("at", 1),
        Item::attr("args", Record::of([1, 2])),
        Item::slot("a", 1),
        Item::slot("empty", Value::Extant),
        Item::from("bare text"),
        Item::from(Record::new()),
    ]);
    assert_eq!(
        record.to_string(),
        "{@tag,@at(1),@args(1,2),a:1,empty:,\"bare text\",{}}"
    );
}

#[test]
fn test_operator_parentheses_follow_precedence() {
    let sum = Operator::binary(BinaryOp::Plus, 1, 2);
    let product = Operator::binary(BinaryOp::Times, sum.clone(), 3);
    assert_eq!(product.to_string(), "(1 + 2) * 3");
    assert_eq!(
        Operator::binary(BinaryOp::Plus, 1, Operator::binary(BinaryOp::Times, 2, 3)).to_string(),
        "1 + 2 * 3"
    );
    assert_eq!(
        Operator::binary(BinaryOp::Minus, 1, Operator::binary(BinaryOp::Minus, 2, 3)).to_string(),
        "1 - (2 - 3)"
    );
    assert_eq!(
        Operator::binary(BinaryOp::Minus, Operator::binary(BinaryOp::Minus, 1, 2), 3).to_string(),
        "1 - 2 - 3"
    );
    assert_eq!(Operator::unary(UnaryOp::Negative, sum).to_string(), "-(1 + 2)");
    assert_eq!(Operator::unary(UnaryOp::Not, get("a")).to_string(), "!$a");
    assert_eq!(
        Operator::conditional(get("a"), 1, 2).to_string(),
        "$a ? 1 : 2"
    );
    assert_eq!(
        Operator::invoke(get("f"), Record::of([1, 2])).to_string(),
        "$f(1,2)"
    );
}

#[test]
fn test_selectors() {
    assert_eq!(Selector::identity().to_string(), "$");
    assert_eq!(get("a").get("b").to_string(), "$a.b");
    assert_eq!(Selector::identity().get_attr("x").to_string(), "$@x");
    assert_eq!(Selector::identity().get_item(1).to_string(), "$#1");
    assert_eq!(Selector::identity().keys().to_string(), "$*:");
    assert_eq!(Selector::identity().values().to_string(), "$:*");
    assert_eq!(Selector::identity().children().to_string(), "$*");
    assert_eq!(Selector::identity().descendants().to_string(), "$**");
    assert_eq!(
        Selector::identity().children().filter(get("a")).to_string(),
        "$*[$a]"
    );
}

#[test]
fn test_debug() {
    assert_eq!(format!("{:?}", Item::slot("a", 1)), "Slot(Text(\"a\"), Num(1))");
    assert_eq!(format!("{:?}", Item::attr("t", Value::Extant)), "Attr(Text(\"t\"), Extant)");
    assert_eq!(format!("{:?}", Record::of([1, 2])), "Record[Num(1), Num(2)]");
    assert_eq!(format!("{:?}", Value::Absent), "Absent");
    assert_eq!(format!("{:?}", Value::from(get("a"))), "Selector($a)");
    assert!(format!("{:?}", Num::uint32(7)).starts_with("Num(7, "));
}
