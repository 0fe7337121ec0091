//! Stack growth for recursive walks over strata trees.
//!
//! Records hold records, operators hold operands and selectors chain stages,
//! so comparison, hashing, commit, deep clone, evaluation and descendant
//! traversal each recurse once per nesting level. Those entry points run
//! their bodies through [`ensure_sufficient_stack`], which grows the stack
//! before a deep tree can exhaust it. On `wasm32` it calls straight through.

/// Grow when less than this remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack by a fresh segment if less than the
/// red zone remains.
///
/// ```text
/// fn depth(item: &Item) -> usize {
///     ensure_sufficient_stack(|| match item.as_value() {
///         Value::Record(record) => 1 + record.iter().map(depth).max().unwrap_or(0),
///         _ => 0,
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
