use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;

use super::*;

fn hash_of(num: Num) -> u64 {
    let mut hasher = DefaultHasher::new();
    num.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_nan_equals_nan() {
    assert_eq!(Num::NAN, Num::new(f64::NAN));
    assert_eq!(hash_of(Num::NAN), hash_of(Num::new(-f64::NAN)));
}

#[test]
fn test_zero_and_negative_zero() {
    assert_eq!(Num::ZERO, Num::NEGATIVE_ZERO);
    assert_eq!(hash_of(Num::ZERO), hash_of(Num::NEGATIVE_ZERO));
    assert_eq!(Num::ZERO.cmp(&Num::NEGATIVE_ZERO), Ordering::Equal);
}

#[test]
fn test_nan_sorts_last() {
    assert!(Num::NAN > Num::new(f64::INFINITY));
    assert!(Num::new(f64::NEG_INFINITY) < Num::ONE);
}

#[test]
fn test_equivalence_tolerance() {
    let one = Num::new(1.0);
    let close = Num::new(1.0 + 1e-10);
    assert!(one.equivalent_to(close, 1.0e-8));
    assert_ne!(one, close);
    assert!(Num::NAN.equivalent_to(Num::NAN, 1.0e-8));
    assert!(!one.equivalent_to(Num::new(1.1), 1.0e-8));
}

#[test]
fn test_hints_do_not_affect_identity() {
    let plain = Num::new(7.0);
    let hinted = Num::uint32(7);
    assert!(hinted.is_uint32());
    assert!(!hinted.is_uint64());
    assert_eq!(plain, hinted);
    assert_eq!(hash_of(plain), hash_of(hinted));
    assert!(Num::from(9_u64).is_uint64());
}

#[test]
fn test_to_int32_wraps() {
    assert_eq!(Num::new(3.9).to_int32(), 3);
    assert_eq!(Num::new(-3.9).to_int32(), -3);
    assert_eq!(Num::new(4_294_967_296.0).to_int32(), 0);
    assert_eq!(Num::new(2_147_483_648.0).to_int32(), i32::MIN);
    assert_eq!(Num::NAN.to_int32(), 0);
    assert_eq!(Num::new(f64::INFINITY).to_int32(), 0);
}

#[test]
fn test_arithmetic() {
    assert_eq!(Num::new(2.0).plus(Num::new(3.0)), Num::new(5.0));
    assert_eq!(Num::new(2.0).minus(Num::new(3.0)), Num::NEGATIVE_ONE);
    assert_eq!(Num::new(2.0).times(Num::new(3.0)), Num::new(6.0));
    assert_eq!(Num::new(3.0).divide(Num::new(2.0)), Num::new(1.5));
    assert_eq!(Num::new(-7.0).modulo(Num::new(3.0)), Num::new(-1.0));
    assert_eq!(Num::new(4.0).inverse(), Num::new(0.25));
    assert_eq!(Num::ONE.negative(), Num::NEGATIVE_ONE);
}

#[test]
fn test_bitwise() {
    assert_eq!(Num::new(6.0).bitwise_and(Num::new(3.0)), Num::new(2.0));
    assert_eq!(Num::new(6.0).bitwise_or(Num::new(3.0)), Num::new(7.0));
    assert_eq!(Num::new(6.0).bitwise_xor(Num::new(3.0)), Num::new(5.0));
    assert_eq!(Num::ZERO.bitwise_not(), Num::NEGATIVE_ONE);
}

proptest! {
    #[test]
    fn prop_order_is_total(a in any::<f64>(), b in any::<f64>()) {
        let (a, b) = (Num::new(a), Num::new(b));
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
    }

    #[test]
    fn prop_equal_nums_hash_alike(a in any::<f64>()) {
        let copy = Num::new(a);
        prop_assert_eq!(hash_of(Num::new(a)), hash_of(copy));
    }
}
