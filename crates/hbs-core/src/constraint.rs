//! # Field Constraints
//!
//! A [`Check`] inspects an already-typed value and returns a description of
//! the violated constraint when it does not hold. Checks run after the JSON
//! type has been accepted, so a bound failure is always reported as a
//! constraint violation and never as a type mismatch.
//!
//! Numeric bounds are expressed with [`Range`], which distinguishes inclusive
//! (`ge`, `le`) and exclusive (`gt`, `lt`) limits exactly. Values are never
//! clamped.

use std::fmt;

/// A constraint on a decoded value of type `T`.
pub trait Check<T: ?Sized> {
    /// `Ok(())` if `value` satisfies the constraint, otherwise a description
    /// of the constraint that failed.
    fn check(&self, value: &T) -> Result<(), String>;
}

/// Accepts every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

impl<T: ?Sized> Check<T> for Any {
    fn check(&self, _value: &T) -> Result<(), String> {
        Ok(())
    }
}

/// Both checks must hold; the first failure is reported.
impl<T: ?Sized, A: Check<T>, B: Check<T>> Check<T> for (A, B) {
    fn check(&self, value: &T) -> Result<(), String> {
        self.0.check(value)?;
        self.1.check(value)
    }
}

/// Values that expose a numeric arm for bound checking.
///
/// Sentinel arms (`Autocalculate`, `Autosize`, `NoLimit`) return `None` and
/// therefore pass every [`Range`].
pub trait AsNumber {
    /// The numeric value, if this is a numeric arm.
    fn as_number(&self) -> Option<f64>;
}

impl AsNumber for f64 {
    fn as_number(&self) -> Option<f64> {
        Some(*self)
    }
}

impl AsNumber for i64 {
    fn as_number(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Limit {
    Inclusive(f64),
    Exclusive(f64),
}

/// A closed, open, or half-open numeric interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: Option<Limit>,
    max: Option<Limit>,
}

impl Range {
    /// The unit interval `[0, 1]`, the most common bound in the schema.
    pub const UNIT: Range = Range::closed(0.0, 1.0);

    /// No bounds.
    pub const fn unbounded() -> Self {
        Self { min: None, max: None }
    }

    /// `[lo, hi]`.
    pub const fn closed(lo: f64, hi: f64) -> Self {
        Self {
            min: Some(Limit::Inclusive(lo)),
            max: Some(Limit::Inclusive(hi)),
        }
    }

    /// `value >= lo`.
    pub const fn ge(lo: f64) -> Self {
        Self {
            min: Some(Limit::Inclusive(lo)),
            max: None,
        }
    }

    /// `value > lo`.
    pub const fn gt(lo: f64) -> Self {
        Self {
            min: Some(Limit::Exclusive(lo)),
            max: None,
        }
    }

    /// `value <= hi`.
    pub const fn le(hi: f64) -> Self {
        Self {
            min: None,
            max: Some(Limit::Inclusive(hi)),
        }
    }

    /// `value < hi`.
    pub const fn lt(hi: f64) -> Self {
        Self {
            min: None,
            max: Some(Limit::Exclusive(hi)),
        }
    }

    /// Add an inclusive upper limit.
    pub const fn and_le(self, hi: f64) -> Self {
        Self {
            min: self.min,
            max: Some(Limit::Inclusive(hi)),
        }
    }

    /// Add an exclusive upper limit.
    pub const fn and_lt(self, hi: f64) -> Self {
        Self {
            min: self.min,
            max: Some(Limit::Exclusive(hi)),
        }
    }

    /// Whether `value` lies inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        let above = match self.min {
            None => true,
            Some(Limit::Inclusive(lo)) => value >= lo,
            Some(Limit::Exclusive(lo)) => value > lo,
        };
        let below = match self.max {
            None => true,
            Some(Limit::Inclusive(hi)) => value <= hi,
            Some(Limit::Exclusive(hi)) => value < hi,
        };
        above && below
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.min {
            None => f.write_str("(-inf")?,
            Some(Limit::Inclusive(lo)) => write!(f, "[{lo}")?,
            Some(Limit::Exclusive(lo)) => write!(f, "({lo}")?,
        }
        match self.max {
            None => f.write_str(", +inf)"),
            Some(Limit::Inclusive(hi)) => write!(f, ", {hi}]"),
            Some(Limit::Exclusive(hi)) => write!(f, ", {hi})"),
        }
    }
}

impl<T: AsNumber + ?Sized> Check<T> for Range {
    fn check(&self, value: &T) -> Result<(), String> {
        match value.as_number() {
            Some(n) if !self.contains(n) => Err(format!("must lie in {self}")),
            _ => Ok(()),
        }
    }
}

/// Bounds on the number of characters in a string or items in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    min: usize,
    max: Option<usize>,
}

impl Length {
    /// Identifier and reference strings: 1 to 100 characters.
    pub const IDENTIFIER: Length = Length::between(1, 100);

    /// Between `min` and `max` inclusive.
    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    /// At least `min`.
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    /// Exactly `n`.
    pub const fn exactly(n: usize) -> Self {
        Self::between(n, n)
    }

    fn verify(&self, len: usize, unit: &str) -> Result<(), String> {
        let fits = len >= self.min && self.max.map_or(true, |max| len <= max);
        if fits {
            return Ok(());
        }
        Err(match self.max {
            Some(max) if max == self.min => format!("must contain exactly {max} {unit} (got {len})"),
            Some(max) => format!("must contain between {} and {max} {unit} (got {len})", self.min),
            None => format!("must contain at least {} {unit} (got {len})", self.min),
        })
    }
}

impl Check<String> for Length {
    fn check(&self, value: &String) -> Result<(), String> {
        self.verify(value.chars().count(), "characters")
    }
}

impl<T> Check<Vec<T>> for Length {
    fn check(&self, value: &Vec<T>) -> Result<(), String> {
        self.verify(value.len(), "items")
    }
}

/// Applies a check to every item of a list.
#[derive(Debug, Clone, Copy)]
pub struct Each<C>(pub C);

impl<T, C: Check<T>> Check<Vec<T>> for Each<C> {
    fn check(&self, value: &Vec<T>) -> Result<(), String> {
        for (i, item) in value.iter().enumerate() {
            self.0.check(item).map_err(|e| format!("item {i} {e}"))?;
        }
        Ok(())
    }
}

/// Restricts an integer to an explicit set of values.
#[derive(Debug, Clone, Copy)]
pub struct OneOf(pub &'static [i64]);

impl Check<i64> for OneOf {
    fn check(&self, value: &i64) -> Result<(), String> {
        if self.0.contains(value) {
            Ok(())
        } else {
            Err(format!("must be one of {:?}", self.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_closed_range_includes_endpoints() {
        let r = Range::closed(0.5, 1.0);
        assert!(r.check(&0.5).is_ok());
        assert!(r.check(&1.0).is_ok());
        assert!(r.check(&0.3).is_err());
        assert!(r.check(&1.01).is_err());
    }

    #[test]
    fn test_exclusive_lower_bound() {
        let r = Range::gt(0.0);
        assert!(r.check(&0.0).is_err());
        assert!(r.check(&1e-9).is_ok());
    }

    #[test]
    fn test_half_open_display() {
        assert_eq!(Range::gt(0.0).and_le(1.0).to_string(), "(0, 1]");
        assert_eq!(Range::ge(-273.15).to_string(), "[-273.15, +inf)");
        assert_eq!(Range::lt(1.0).to_string(), "(-inf, 1)");
    }

    #[test]
    fn test_range_message() {
        let err = Range::UNIT.check(&1.5).unwrap_err();
        assert_eq!(err, "must lie in [0, 1]");
    }

    #[test]
    fn test_range_on_integers() {
        let r = Range::closed(-12.0, 14.0);
        assert!(r.check(&-12_i64).is_ok());
        assert!(r.check(&15_i64).is_err());
    }

    #[test]
    fn test_length_on_strings_counts_chars() {
        assert!(Length::IDENTIFIER.check(&String::new()).is_err());
        assert!(Length::IDENTIFIER.check(&"é".repeat(100)).is_ok());
        assert!(Length::IDENTIFIER.check(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_length_on_lists() {
        let l = Length::between(2, 3);
        assert!(l.check(&vec!["a"]).is_err());
        assert!(l.check(&vec!["a", "b"]).is_ok());
        assert!(l.check(&vec!["a", "b", "c", "d"]).is_err());
        assert_eq!(
            Length::exactly(3).check(&vec![1, 2]).unwrap_err(),
            "must contain exactly 3 items (got 2)"
        );
    }

    #[test]
    fn test_each_reports_index() {
        let err = Each(Range::ge(0.0)).check(&vec![1.0, -1.0]).unwrap_err();
        assert_eq!(err, "item 1 must lie in [0, +inf)");
    }

    #[test]
    fn test_pair_runs_both() {
        let both = (Length::at_least(1), Each(Range::UNIT));
        assert!(both.check(&Vec::<f64>::new()).is_err());
        assert!(both.check(&vec![2.0]).is_err());
        assert!(both.check(&vec![0.5]).is_ok());
    }

    #[test]
    fn test_one_of() {
        assert!(OneOf(&[1, 2, 4]).check(&4).is_ok());
        assert!(OneOf(&[1, 2, 4]).check(&3).is_err());
    }

    proptest! {
        #[test]
        fn prop_closed_range_matches_comparison(lo in -1e6f64..1e6, span in 0f64..1e6, x in -2e6f64..2e6) {
            let hi = lo + span;
            let r = Range::closed(lo, hi);
            prop_assert_eq!(r.check(&x).is_ok(), x >= lo && x <= hi);
            prop_assert!(r.check(&lo).is_ok());
            prop_assert!(r.check(&hi).is_ok());
        }

        #[test]
        fn prop_open_range_excludes_endpoints(lo in -1e6f64..1e6, span in 1e-3f64..1e6) {
            let hi = lo + span;
            let r = Range::gt(lo).and_lt(hi);
            prop_assert!(r.check(&lo).is_err());
            prop_assert!(r.check(&hi).is_err());
        }
    }
}
