// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Endpoints of intervals.
//!
//! A bound is a `Mark`: a value, possibly infinite, together with an openness class. Marks are totally ordered by value and then by class, with `OpenAbove < Closed < OpenBelow` at equal values. With this order the upper mark of `[a;x)` sorts before the lower mark of `[x;b)`, and the upper mark of `[a;x]` sorts before the lower mark of `(x;b)`, so the same comparison serves for overlap and adjacency tests on both sides of an interval.
//!
//! ```
//! use part::mark::{Mark, Value};
//!
//! let open_upper = Mark::upper(Value::Finite(5), false);
//! let closed_lower = Mark::lower(Value::Finite(5), true);
//! assert!(open_upper < closed_lower);
//! assert!(open_upper.near(&closed_lower));
//! assert_eq!(format!("{}", open_upper), "5-");
//! ```

use std::cmp::Ordering;
use std::fmt::{Display, Error, Formatter};
use num_traits::Float;

use self::Openness::*;
use self::Value::*;

/// A bound value: any value of `T` or one of the two infinities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value<T> {
  NegInfinity,
  Finite(T),
  PosInfinity
}

impl<T> Value<T> {
  pub fn is_finite(&self) -> bool {
    matches!(self, Finite(_))
  }

  pub fn finite(&self) -> Option<&T> {
    match self {
      Finite(value) => Some(value),
      _ => None
    }
  }

  pub fn into_finite(self) -> Option<T> {
    match self {
      Finite(value) => Some(value),
      _ => None
    }
  }
}

impl<T: PartialOrd> Value<T> {
  /// Compares two bound values, `None` when the finite values cannot be ordered (a NaN for instance).
  pub fn compare(&self, other: &Value<T>) -> Option<Ordering> {
    match (self, other) {
      (NegInfinity, NegInfinity) | (PosInfinity, PosInfinity) => Some(Ordering::Equal),
      (NegInfinity, _) | (_, PosInfinity) => Some(Ordering::Less),
      (PosInfinity, _) | (_, NegInfinity) => Some(Ordering::Greater),
      (Finite(a), Finite(b)) => a.partial_cmp(b)
    }
  }

  /// A finite value is comparable when it can be ordered with itself.
  pub fn is_comparable(&self) -> bool {
    match self {
      Finite(value) => value.partial_cmp(value).is_some(),
      _ => true
    }
  }
}

impl<T: PartialOrd> PartialOrd for Value<T>
{
  fn partial_cmp(&self, other: &Value<T>) -> Option<Ordering> {
    self.compare(other)
  }
}

impl<F: Float> Value<F> {
  /// Maps IEEE infinities onto the infinite bounds.
  pub fn from_float(value: F) -> Value<F> {
    if value == F::infinity() {
      PosInfinity
    }
    else if value == F::neg_infinity() {
      NegInfinity
    }
    else {
      Finite(value)
    }
  }
}

impl<T> From<T> for Value<T>
{
  fn from(value: T) -> Value<T> {
    Finite(value)
  }
}

impl<T: Display> Display for Value<T>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    match self {
      NegInfinity => formatter.write_str("-inf"),
      Finite(value) => value.fmt(formatter),
      PosInfinity => formatter.write_str("+inf")
    }
  }
}

/// Openness class of a mark, declared in rank order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Openness {
  /// The bound value itself is excluded and the interval lies below it.
  OpenAbove,
  Closed,
  /// The bound value itself is excluded and the interval lies above it.
  OpenBelow
}

#[derive(Clone, Copy, Debug, PartialEq, Hash)]
pub struct Mark<T> {
  value: Value<T>,
  openness: Openness
}

impl<T> Mark<T> {
  /// Lower mark of an interval. Infinite bounds are always open.
  pub fn lower(value: Value<T>, closed: bool) -> Mark<T> {
    let openness = if closed && value.is_finite() { Closed } else { OpenBelow };
    Mark { value, openness }
  }

  /// Upper mark of an interval. Infinite bounds are always open.
  pub fn upper(value: Value<T>, closed: bool) -> Mark<T> {
    let openness = if closed && value.is_finite() { Closed } else { OpenAbove };
    Mark { value, openness }
  }

  /// Closed mark used as a bisection key, infinities included.
  pub(crate) fn probe(value: Value<T>) -> Mark<T> {
    Mark { value, openness: Closed }
  }

  pub fn value(&self) -> &Value<T> {
    &self.value
  }

  pub fn into_value(self) -> Value<T> {
    self.value
  }

  pub fn openness(&self) -> Openness {
    self.openness
  }

  pub fn is_closed(&self) -> bool {
    self.openness == Closed
  }
}

impl<T: Clone> Mark<T> {
  /// Upper mark of the part of the line lying just below this lower mark: `[v` gives `v)` and `(v` gives `v]`.
  pub fn adjacent_upper(&self) -> Mark<T> {
    let openness = match self.openness {
      OpenBelow => Closed,
      _ => OpenAbove
    };
    Mark { value: self.value.clone(), openness }
  }

  /// Lower mark of the part of the line lying just above this upper mark: `v]` gives `(v` and `v)` gives `[v`.
  pub fn adjacent_lower(&self) -> Mark<T> {
    let openness = match self.openness {
      OpenAbove => Closed,
      _ => OpenBelow
    };
    Mark { value: self.value.clone(), openness }
  }
}

impl<T: PartialOrd> Mark<T> {
  /// Two marks are near when an interval ending at one and an interval starting at the other could be glued without a gap.
  pub fn near(&self, other: &Mark<T>) -> bool {
    self.value.compare(&other.value) == Some(Ordering::Equal)
      && (self.is_closed() || other.is_closed() || self.openness == other.openness)
  }
}

impl<T: PartialOrd> Eq for Mark<T> {}

// Values stored in a mark are checked to be comparable when an interval is built.
impl<T: PartialOrd> Ord for Mark<T>
{
  fn cmp(&self, other: &Mark<T>) -> Ordering {
    self.value.compare(&other.value)
      .unwrap_or(Ordering::Equal)
      .then(self.openness.cmp(&other.openness))
  }
}

impl<T: PartialOrd> PartialOrd for Mark<T>
{
  fn partial_cmp(&self, other: &Mark<T>) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<T: Display> Display for Mark<T>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    self.value.fmt(formatter)?;
    match self.openness {
      OpenAbove => formatter.write_str("-"),
      Closed => Ok(()),
      OpenBelow => formatter.write_str("+")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn finite(value: i32, openness: Openness) -> Mark<i32> {
    Mark { value: Finite(value), openness }
  }

  #[test]
  fn value_order() {
    let cases = vec![
      (1, NegInfinity, Finite(-100), Some(Ordering::Less)),
      (2, Finite(3), Finite(3), Some(Ordering::Equal)),
      (3, PosInfinity, Finite(1000), Some(Ordering::Greater)),
      (4, NegInfinity, NegInfinity, Some(Ordering::Equal)),
      (5, PosInfinity, NegInfinity, Some(Ordering::Greater)),
      (6, Finite(1), PosInfinity, Some(Ordering::Less)),
    ];
    for (id, a, b, expected) in cases {
      assert_eq!(a.compare(&b), expected, "test #{} of value order", id);
    }
    assert_eq!(Finite(f64::NAN).compare(&Finite(1.0)), None);
    assert!(!Finite(f64::NAN).is_comparable());
    assert!(Value::<f64>::PosInfinity.is_comparable());
  }

  #[test]
  fn mark_order() {
    let sorted = vec![
      Mark::lower(NegInfinity, true),
      finite(4, OpenAbove),
      finite(4, Closed),
      finite(4, OpenBelow),
      finite(5, OpenAbove),
      Mark::upper(PosInfinity, true),
    ];
    for (i, a) in sorted.iter().enumerate() {
      for (j, b) in sorted.iter().enumerate() {
        assert_eq!(a.cmp(b), i.cmp(&j), "comparing {:?} with {:?}", a, b);
      }
    }
  }

  #[test]
  fn infinite_marks_are_open() {
    assert_eq!(Mark::<i32>::lower(NegInfinity, true).openness(), OpenBelow);
    assert_eq!(Mark::<i32>::upper(PosInfinity, true).openness(), OpenAbove);
    assert_eq!(Mark::lower(Finite(1), true).openness(), Closed);
    assert_eq!(Mark::upper(Finite(1), false).openness(), OpenAbove);
  }

  #[test]
  fn near() {
    let cases = vec![
      (1, finite(4, Closed), finite(4, Closed), true),
      (2, finite(4, OpenAbove), finite(4, Closed), true),
      (3, finite(4, Closed), finite(4, OpenBelow), true),
      (4, finite(4, OpenAbove), finite(4, OpenBelow), false),
      (5, finite(4, OpenBelow), finite(4, OpenBelow), true),
      (6, finite(4, Closed), finite(5, Closed), false),
    ];
    for (id, a, b, expected) in cases {
      assert_eq!(a.near(&b), expected, "test #{} of near", id);
      assert_eq!(b.near(&a), expected, "test #{} of near (swapped)", id);
    }
  }

  #[test]
  fn adjacency() {
    assert_eq!(finite(3, Closed).adjacent_upper(), finite(3, OpenAbove));
    assert_eq!(finite(3, OpenBelow).adjacent_upper(), finite(3, Closed));
    assert_eq!(finite(3, Closed).adjacent_lower(), finite(3, OpenBelow));
    assert_eq!(finite(3, OpenAbove).adjacent_lower(), finite(3, Closed));
    for mark in vec![finite(3, Closed), finite(3, OpenAbove)] {
      assert_eq!(mark.adjacent_lower().adjacent_upper(), mark);
    }
  }

  #[test]
  fn floats() {
    assert_eq!(Value::from_float(f64::INFINITY), PosInfinity);
    assert_eq!(Value::from_float(f64::NEG_INFINITY), NegInfinity);
    assert_eq!(Value::from_float(2.5f32), Finite(2.5));
  }

  #[test]
  fn display() {
    assert_eq!(format!("{}", finite(4, Closed)), "4");
    assert_eq!(format!("{}", finite(5, OpenAbove)), "5-");
    assert_eq!(format!("{}", finite(4, OpenBelow)), "4+");
    assert_eq!(format!("{}", Mark::<i32>::lower(NegInfinity, false)), "-inf+");
    assert_eq!(format!("{}", Value::<i32>::PosInfinity), "+inf");
  }
}
