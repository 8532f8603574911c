#![forbid(unsafe_code)]

//! Equality consistency checking for change-suppression correctness.

/// Verify that a type's `==` and `!=` agree with `expected`, in both
/// directions.
///
/// Change suppression relies on `PartialEq` being symmetric and on `ne`
/// being the exact negation of `eq`. Types that hand-implement `PartialEq`
/// can violate either; this helper returns `false` for any inconsistency,
/// regardless of `expected`. Intended for downstream test suites.
#[must_use]
pub fn check_equality<T: PartialEq>(a: &T, b: &T, expected: bool) -> bool {
    let checks = [a == b, b == a, !(a != b), !(b != a)];
    checks.iter().all(|&outcome| outcome == expected)
}
