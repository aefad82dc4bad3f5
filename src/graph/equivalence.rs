// src/graph/equivalence.rs

//! Equivalence policies for level extraction.
//!
//! By default two processes are the same node only if they are the same
//! handle. A policy lets callers declare processes with "equal" payloads
//! interchangeable: a predecessor then blocks its follower while it, or any
//! process equivalent to it, is still unplaced.
//!
//! Resource overlap is always decided on resource handles.

/// Decides whether two payloads denote interchangeable processes.
pub trait Equivalence<T: ?Sized> {
    fn equivalent(&self, a: &T, b: &T) -> bool;

    /// `true` when only handle identity matters. Lets the engine use
    /// in-degree counting instead of pairwise comparison.
    fn is_identity(&self) -> bool {
        false
    }
}

/// Handle identity only; no two distinct processes are equivalent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByIdentity;

impl<T: ?Sized> Equivalence<T> for ByIdentity {
    fn equivalent(&self, _a: &T, _b: &T) -> bool {
        false
    }

    fn is_identity(&self) -> bool {
        true
    }
}

/// Payloads equal under `PartialEq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByValue;

impl<T: PartialEq + ?Sized> Equivalence<T> for ByValue {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Payloads whose derived keys are equal.
///
/// ```
/// use topobatch::graph::{ByKey, Equivalence};
///
/// let by_len = ByKey(|s: &String| s.len());
/// assert!(by_len.equivalent(&"ab".to_string(), &"cd".to_string()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ByKey<F>(pub F);

impl<T, K, F> Equivalence<T> for ByKey<F>
where
    T: ?Sized,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.0)(a) == (self.0)(b)
    }
}

/// Arbitrary predicate over two payloads.
#[derive(Debug, Clone, Copy)]
pub struct ByFn<F>(pub F);

impl<T, F> Equivalence<T> for ByFn<F>
where
    T: ?Sized,
    F: Fn(&T, &T) -> bool,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}
