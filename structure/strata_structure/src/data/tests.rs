use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::StructureError;

#[test]
fn test_empty_data() {
    let data = Data::new();
    assert!(data.is_empty());
    assert_eq!(data.capacity(), 0);
    assert_eq!(data.as_buffer(), None);
    assert_eq!(data.to_buffer(), Vec::<u8>::new());
}

#[test]
fn test_growth_floor_is_32() {
    let mut data = Data::new();
    data.add_byte(1).unwrap();
    assert_eq!(data.capacity(), 32);
    data.add_buffer(&[0; 32]).unwrap();
    assert_eq!(data.len(), 33);
    assert_eq!(data.capacity(), 64);
}

#[test]
fn test_get_and_set_byte() {
    let mut data = Data::from([1, 2, 3]);
    assert_eq!(data.get_byte(1), Ok(2));
    data.set_byte(1, 9).unwrap();
    assert_eq!(data.to_buffer(), vec![1, 9, 3]);
    assert_eq!(
        data.get_byte(3),
        Err(StructureError::IndexOutOfBounds {
            index: 3,
            length: 3
        })
    );
    assert!(data.set_byte(5, 0).is_err());
}

#[test]
fn test_commit_rejects_writes() {
    let mut data = Data::from([1, 2]);
    data.commit();
    assert_eq!(
        data.add_byte(3),
        Err(StructureError::Immutable { what: "data" })
    );
    assert!(data.set_byte(0, 0).is_err());
    assert!(data.clear().is_err());
    assert_eq!(data.get_byte(0), Ok(1));
}

#[test]
fn test_branch_copies_on_write() {
    let mut original = Data::from([1, 2, 3]);
    let mut branch = original.branch();
    assert!(branch.is_aliased());

    branch.set_byte(0, 7).unwrap();
    assert!(!branch.is_aliased());
    assert_eq!(branch.to_buffer(), vec![7, 2, 3]);
    assert_eq!(original.to_buffer(), vec![1, 2, 3]);

    original.add_byte(4).unwrap();
    assert_eq!(branch.len(), 3);
}

#[test]
fn test_branch_of_committed_is_mutable() {
    let mut frozen = Data::from([5]);
    frozen.commit();
    let mut branch = frozen.branch();
    branch.add_byte(6).unwrap();
    assert_eq!(branch.to_buffer(), vec![5, 6]);
    assert_eq!(frozen.to_buffer(), vec![5]);
}

#[test]
fn test_equality_ignores_capacity() {
    let small = Data::from([1, 2]);
    let mut large = Data::with_capacity(1000);
    large.add_buffer(&[1, 2]).unwrap();
    assert_eq!(small, large);
    assert!(Data::from([1, 2]) < Data::from([1, 2, 0]));
    assert!(Data::from([1, 3]) > Data::from([1, 2, 9]));
}

#[test]
fn test_base16() {
    let data = Data::from([0x00, 0xAB, 0x7f]);
    assert_eq!(data.to_base16(), "00AB7F");
    let mut out = String::new();
    data.write_base16(&mut out).unwrap();
    assert_eq!(out, "00AB7F");
    assert_eq!(Data::from_base16("00ab7F").unwrap(), data);
    assert!(matches!(
        Data::from_base16("ABC"),
        Err(StructureError::InvalidEncoding { encoding: "base16", .. })
    ));
}

#[test]
fn test_base64() {
    let data = Data::from(b"hello".to_vec());
    assert_eq!(data.to_base64(), "aGVsbG8=");
    let mut out = String::new();
    data.write_base64(&mut out).unwrap();
    assert_eq!(out, "aGVsbG8=");
    assert_eq!(Data::from_base64("aGVsbG8=").unwrap(), data);
    assert!(Data::from_base64("!!").is_err());
}

#[test]
fn test_encoding_uses_logical_range() {
    let mut data = Data::with_capacity(64);
    data.add_byte(0xFF).unwrap();
    assert_eq!(data.to_base16(), "FF");
    assert_eq!(data.to_base64(), "/w==");
}

proptest! {
    #[test]
    fn prop_append_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..300)) {
        let mut data = Data::new();
        for byte in &bytes {
            data.add_byte(*byte).unwrap();
        }
        prop_assert_eq!(data.to_buffer(), bytes.clone());
        if !bytes.is_empty() {
            prop_assert!(data.capacity().is_power_of_two());
            prop_assert!(data.capacity() >= bytes.len().max(32));
        }
    }
}
