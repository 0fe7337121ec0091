use super::*;

#[test]
fn test_empty_is_shared() {
    let a = Text::empty();
    let b = Text::from("");
    let c = Text::from(String::new());
    assert!(a.ptr_eq(&b));
    assert!(a.ptr_eq(&c));
    assert!(a.is_empty());
}

#[test]
fn test_hash_code_is_memoized() {
    let text = Text::from("hello");
    let first = text.hash_code();
    let clone = text.clone();
    assert_eq!(clone.hash_code(), first);
    assert_eq!(Text::from("hello").hash_code(), first);
    assert_ne!(Text::from("world").hash_code(), first);
}

#[test]
fn test_ordering_is_lexicographic() {
    assert!(Text::from("a") < Text::from("b"));
    assert!(Text::from("ab") > Text::from("a"));
    assert!(Text::from("B") < Text::from("a"));
}

#[test]
fn test_concat() {
    let left = Text::from("foo");
    let joined = left.concat(&Text::from("bar"));
    assert_eq!(joined, "foobar");
    assert!(left.concat(&Text::empty()).ptr_eq(&left));
}

#[test]
fn test_is_ident() {
    assert!(Text::from("name").is_ident());
    assert!(Text::from("_a-b2").is_ident());
    assert!(!Text::from("2abc").is_ident());
    assert!(!Text::from("with space").is_ident());
    assert!(!Text::empty().is_ident());
}

#[test]
fn test_borrow_lookup() {
    let mut map = rustc_hash::FxHashMap::default();
    map.insert(Text::from("key"), 1);
    assert_eq!(map.get("key"), Some(&1));
}
