// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Convex subsets of an ordered type.
//!
//! An `Atomic` is either `Empty` or a non-empty `Interval` delimited by two [marks](../mark/index.html). Intervals are built through smart constructors that return `Empty` whenever the requested bounds are crossed or touch improperly, so that an `Interval` value always satisfies `lower <= upper` in the mark order. Infinite bounds are always open.
//!
//! Anything that can be read as an interval implements `ToAtomic`: bare scalars are closed points, pairs `(a, b)` are `[a;b)`, triples and quadruples carry the closedness flags, and the Rust ranges map onto the corresponding intervals.
//!
//! ```
//! use part::atomic::{Atomic, ToAtomic};
//!
//! let a = (0, 5).to_atomic()?;
//! let b = (3..=8).to_atomic()?;
//! assert_eq!(format!("{}", &a | &b), "[0;8]");
//! assert_eq!(format!("{}", &a & &b), "[3;5)");
//! assert_eq!(format!("{}", !&a), "(-inf;0) | [5;+inf)");
//! assert!(a.overlaps(&b, true));
//! # Ok::<(), part::Error<i32>>(())
//! ```

use std::cmp::{max, min, Ordering};
use std::fmt::{Display, Error as FmtError, Formatter};
use std::iter::once;
use std::ops::{BitAnd, BitOr, BitXor, Not, Sub};
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use gcollections::kind::Collection;
use gcollections::ops::{Complement, Contains, Difference, Intersection, Overlap, SymmetricDifference};

use crate::error::Error;
use crate::interval_set::FrozenIntervalSet;
use crate::mark::{Mark, Value};
use crate::mark::Value::*;
use crate::ops::{Hull, Whole};

/// A non-empty interval. The bounds satisfy `lower <= upper` in the mark order.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct Interval<T> {
  lower: Mark<T>,
  upper: Mark<T>
}

impl<T> Interval<T> {
  pub fn full() -> Interval<T> {
    Interval {
      lower: Mark::lower(NegInfinity, false),
      upper: Mark::upper(PosInfinity, false)
    }
  }

  // precondition: `lower <= upper`.
  pub(crate) fn from_marks(lower: Mark<T>, upper: Mark<T>) -> Interval<T> {
    Interval { lower, upper }
  }

  pub fn lower(&self) -> &Mark<T> {
    &self.lower
  }

  pub fn upper(&self) -> &Mark<T> {
    &self.upper
  }

  pub fn lower_value(&self) -> &Value<T> {
    self.lower.value()
  }

  pub fn upper_value(&self) -> &Value<T> {
    self.upper.value()
  }

  pub fn lower_closed(&self) -> bool {
    self.lower.is_closed()
  }

  pub fn upper_closed(&self) -> bool {
    self.upper.is_closed()
  }

  pub fn into_marks(self) -> (Mark<T>, Mark<T>) {
    (self.lower, self.upper)
  }
}

impl<T: PartialOrd> Interval<T> {
  /// The interval between two marks, `None` if it would be empty.
  pub(crate) fn span(lower: Mark<T>, upper: Mark<T>) -> Option<Interval<T>> {
    if lower <= upper {
      Some(Interval { lower, upper })
    }
    else {
      None
    }
  }

  pub(crate) fn extend_upper(&mut self, upper: Mark<T>) {
    if upper > self.upper {
      self.upper = upper;
    }
  }

  /// `self` ends before `other` starts. Non-strictly, the two may share their touching bound.
  pub fn before(&self, other: &Interval<T>, strict: bool) -> bool {
    if strict { self.upper < other.lower } else { self.upper <= other.lower }
  }

  /// `self` ends exactly where `other` starts. Non-strictly, the two bounds only need to be near.
  pub fn meets(&self, other: &Interval<T>, strict: bool) -> bool {
    if strict { self.upper == other.lower } else { self.upper.near(&other.lower) }
  }

  pub fn overlaps(&self, other: &Interval<T>, strict: bool) -> bool {
    if strict {
      self.lower < other.lower && other.lower < self.upper && self.upper < other.upper
    }
    else {
      self.lower <= other.lower && other.lower <= self.upper && self.upper <= other.upper
    }
  }

  pub fn starts(&self, other: &Interval<T>, strict: bool) -> bool {
    if strict {
      self.lower == other.lower && self.upper < other.upper
    }
    else {
      self.lower.near(&other.lower) && self.upper <= other.upper
    }
  }

  pub fn during(&self, other: &Interval<T>, strict: bool) -> bool {
    if strict {
      self.lower > other.lower && self.upper < other.upper
    }
    else {
      self.lower >= other.lower && self.upper <= other.upper
    }
  }

  pub fn finishes(&self, other: &Interval<T>, strict: bool) -> bool {
    if strict {
      self.lower > other.lower && self.upper == other.upper
    }
    else {
      self.lower >= other.lower && self.upper.near(&other.upper)
    }
  }

  pub fn after(&self, other: &Interval<T>, strict: bool) -> bool {
    other.before(self, strict)
  }

  pub fn met_by(&self, other: &Interval<T>, strict: bool) -> bool {
    other.meets(self, strict)
  }

  pub fn overlapped_by(&self, other: &Interval<T>, strict: bool) -> bool {
    other.overlaps(self, strict)
  }

  pub fn started_by(&self, other: &Interval<T>, strict: bool) -> bool {
    other.starts(self, strict)
  }

  /// Inverse of `during`.
  pub fn encloses(&self, other: &Interval<T>, strict: bool) -> bool {
    other.during(self, strict)
  }

  pub fn finished_by(&self, other: &Interval<T>, strict: bool) -> bool {
    other.finishes(self, strict)
  }
}

impl<T: PartialOrd + Clone> Interval<T> {
  /// The common part of two intervals.
  pub fn clip(&self, other: &Interval<T>) -> Option<Interval<T>> {
    Interval::span(
      max(&self.lower, &other.lower).clone(),
      min(&self.upper, &other.upper).clone())
  }
}

impl<T: PartialOrd> Eq for Interval<T> {}

/// Intervals are ordered when one lies entirely before the other.
impl<T: PartialOrd> PartialOrd for Interval<T>
{
  fn partial_cmp(&self, other: &Interval<T>) -> Option<Ordering> {
    if self == other {
      Some(Ordering::Equal)
    }
    else if self.upper < other.lower {
      Some(Ordering::Less)
    }
    else if self.lower > other.upper {
      Some(Ordering::Greater)
    }
    else {
      None
    }
  }
}

impl<T: Display> Display for Interval<T>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), FmtError> {
    formatter.write_str(if self.lower_closed() { "[" } else { "(" })?;
    write!(formatter, "{};{}", self.lower_value(), self.upper_value())?;
    formatter.write_str(if self.upper_closed() { "]" } else { ")" })
  }
}

/// A convex subset: empty, or delimited by an interval.
#[derive(Clone, Debug, PartialEq, Hash)]
pub enum Atomic<T> {
  Empty,
  Interval(Interval<T>)
}

impl<T> Atomic<T> {
  pub fn full() -> Atomic<T> {
    Atomic::Interval(Interval::full())
  }

  pub fn from_value<V: ToAtomic<T>>(value: V) -> Result<Atomic<T>, Error<T>> {
    value.to_atomic()
  }

  pub fn is_empty(&self) -> bool {
    matches!(self, Atomic::Empty)
  }

  pub fn as_interval(&self) -> Option<&Interval<T>> {
    match self {
      Atomic::Interval(interval) => Some(interval),
      Atomic::Empty => None
    }
  }

  pub fn into_interval(self) -> Option<Interval<T>> {
    match self {
      Atomic::Interval(interval) => Some(interval),
      Atomic::Empty => None
    }
  }

  pub fn lower(&self) -> Option<&Mark<T>> {
    self.as_interval().map(Interval::lower)
  }

  pub fn upper(&self) -> Option<&Mark<T>> {
    self.as_interval().map(Interval::upper)
  }
}

macro_rules! lift_relations {
  ($($relation:ident),*) => {$(
    pub fn $relation(&self, other: &Atomic<T>, strict: bool) -> bool {
      match (self, other) {
        (Atomic::Interval(a), Atomic::Interval(b)) => a.$relation(b, strict),
        _ => false
      }
    }
  )*}
}

impl<T: PartialOrd> Atomic<T> {
  /// Builds `lower..upper` with the given closedness, `Empty` when the bounds do not delimit any value.
  pub fn try_new(lower: Value<T>, upper: Value<T>, lower_closed: bool, upper_closed: bool)
    -> Result<Atomic<T>, Error<T>>
  {
    let lower = Mark::lower(lower, lower_closed);
    let upper = Mark::upper(upper, upper_closed);
    if !lower.value().is_comparable()
      || !upper.value().is_comparable()
      || lower.value().compare(upper.value()).is_none()
    {
      return Err(Error::NotComparable { lower: lower.into_value(), upper: upper.into_value() });
    }
    Ok(Interval::span(lower, upper).map_or(Atomic::Empty, Atomic::Interval))
  }

  /// `[value;+inf)`, or `(value;+inf)` when `closed` is false.
  pub fn lower_limit(value: T, closed: bool) -> Result<Atomic<T>, Error<T>> {
    Atomic::try_new(Finite(value), PosInfinity, closed, false)
  }

  /// `(-inf;value)`, or `(-inf;value]` when `closed` is true.
  pub fn upper_limit(value: T, closed: bool) -> Result<Atomic<T>, Error<T>> {
    Atomic::try_new(NegInfinity, Finite(value), false, closed)
  }

  // Allen relations are never satisfied by `Empty`, on either side.
  lift_relations!(before, meets, overlaps, starts, during, finishes,
    after, met_by, overlapped_by, started_by, encloses, finished_by);
}

impl<T: PartialOrd + Clone> Atomic<T> {
  pub fn point(value: T) -> Result<Atomic<T>, Error<T>> {
    Atomic::try_new(Finite(value.clone()), Finite(value), true, true)
  }

  /// The frozen set holding only this value.
  pub fn to_set(&self) -> FrozenIntervalSet<T> {
    once(self.clone()).collect()
  }

  pub fn complement(&self) -> FrozenIntervalSet<T> {
    self.to_set().complement()
  }
}

impl<T: PartialOrd> Eq for Atomic<T> {}

impl<T> Default for Atomic<T>
{
  fn default() -> Atomic<T> {
    Atomic::Empty
  }
}

impl<T> From<Interval<T>> for Atomic<T>
{
  fn from(interval: Interval<T>) -> Atomic<T> {
    Atomic::Interval(interval)
  }
}

impl<T: PartialOrd> PartialOrd for Atomic<T>
{
  fn partial_cmp(&self, other: &Atomic<T>) -> Option<Ordering> {
    match (self, other) {
      (Atomic::Interval(a), Atomic::Interval(b)) => a.partial_cmp(b),
      (Atomic::Empty, Atomic::Empty) => Some(Ordering::Equal),
      _ => None
    }
  }
}

impl<T: Display> Display for Atomic<T>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), FmtError> {
    match self {
      Atomic::Interval(interval) => interval.fmt(formatter),
      Atomic::Empty => Ok(())
    }
  }
}

impl<T: PartialOrd + Clone> Hull for Interval<T>
{
  type Output = Interval<T>;

  fn hull(&self, other: &Interval<T>) -> Interval<T> {
    Interval::from_marks(
      min(&self.lower, &other.lower).clone(),
      max(&self.upper, &other.upper).clone())
  }
}

impl<T: PartialOrd + Clone> Hull for Atomic<T>
{
  type Output = Atomic<T>;

  fn hull(&self, other: &Atomic<T>) -> Atomic<T> {
    match (self, other) {
      (Atomic::Interval(a), Atomic::Interval(b)) => Atomic::Interval(a.hull(b)),
      (Atomic::Empty, x) | (x, Atomic::Empty) => x.clone()
    }
  }
}

impl<T> Whole for Interval<T>
{
  fn whole() -> Interval<T> {
    Interval::full()
  }
}

impl<T> Whole for Atomic<T>
{
  fn whole() -> Atomic<T> {
    Atomic::full()
  }
}

impl<T> Collection for Interval<T>
{
  type Item = T;
}

impl<T> Collection for Atomic<T>
{
  type Item = T;
}

impl<T: PartialOrd + Clone> Contains for Interval<T>
{
  fn contains(&self, value: &T) -> bool {
    let probe = Mark::probe(Finite(value.clone()));
    probe.value().is_comparable() && self.lower <= probe && probe <= self.upper
  }
}

impl<T: PartialOrd + Clone> Contains for Atomic<T>
{
  fn contains(&self, value: &T) -> bool {
    self.as_interval().map_or(false, |interval| interval.contains(value))
  }
}

impl<T: PartialOrd + Clone> Intersection for Atomic<T>
{
  type Output = Atomic<T>;

  fn intersection(&self, other: &Atomic<T>) -> Atomic<T> {
    match (self, other) {
      (Atomic::Interval(a), Atomic::Interval(b)) => a.clip(b).map_or(Atomic::Empty, Atomic::Interval),
      _ => Atomic::Empty
    }
  }
}

impl<T: PartialOrd + Clone> Overlap for Interval<T>
{
  fn overlap(&self, other: &Interval<T>) -> bool {
    self.clip(other).is_some()
  }
}

impl<T: PartialOrd + Clone> Overlap for Atomic<T>
{
  fn overlap(&self, other: &Atomic<T>) -> bool {
    !self.intersection(other).is_empty()
  }
}

impl<'a, 'b, T: PartialOrd + Clone> BitOr<&'b Atomic<T>> for &'a Atomic<T>
{
  type Output = FrozenIntervalSet<T>;

  fn bitor(self, other: &'b Atomic<T>) -> FrozenIntervalSet<T> {
    vec![self.clone(), other.clone()].into_iter().collect()
  }
}

impl<'a, 'b, T: PartialOrd + Clone> BitAnd<&'b Atomic<T>> for &'a Atomic<T>
{
  type Output = FrozenIntervalSet<T>;

  fn bitand(self, other: &'b Atomic<T>) -> FrozenIntervalSet<T> {
    self.to_set().intersection(&other.to_set())
  }
}

impl<'a, 'b, T: PartialOrd + Clone> Sub<&'b Atomic<T>> for &'a Atomic<T>
{
  type Output = FrozenIntervalSet<T>;

  fn sub(self, other: &'b Atomic<T>) -> FrozenIntervalSet<T> {
    self.to_set().difference(&other.to_set())
  }
}

impl<'a, 'b, T: PartialOrd + Clone> BitXor<&'b Atomic<T>> for &'a Atomic<T>
{
  type Output = FrozenIntervalSet<T>;

  fn bitxor(self, other: &'b Atomic<T>) -> FrozenIntervalSet<T> {
    self.to_set().symmetric_difference(&other.to_set())
  }
}

forward_all_binop!([T] [T: PartialOrd + Clone] BitOr, bitor, Atomic<T>, Atomic<T> => FrozenIntervalSet<T>);
forward_all_binop!([T] [T: PartialOrd + Clone] BitAnd, bitand, Atomic<T>, Atomic<T> => FrozenIntervalSet<T>);
forward_all_binop!([T] [T: PartialOrd + Clone] Sub, sub, Atomic<T>, Atomic<T> => FrozenIntervalSet<T>);
forward_all_binop!([T] [T: PartialOrd + Clone] BitXor, bitxor, Atomic<T>, Atomic<T> => FrozenIntervalSet<T>);

impl<'a, T: PartialOrd + Clone> Not for &'a Atomic<T>
{
  type Output = FrozenIntervalSet<T>;

  fn not(self) -> FrozenIntervalSet<T> {
    self.complement()
  }
}

impl<T: PartialOrd + Clone> Not for Atomic<T>
{
  type Output = FrozenIntervalSet<T>;

  fn not(self) -> FrozenIntervalSet<T> {
    self.complement()
  }
}

/// Conversion of interval-like values into an `Atomic`.
pub trait ToAtomic<T> {
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>>;
}

impl<T> ToAtomic<T> for Atomic<T>
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Ok(self)
  }
}

impl<'a, T: Clone> ToAtomic<T> for &'a Atomic<T>
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Ok(self.clone())
  }
}

impl<T> ToAtomic<T> for Interval<T>
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Ok(Atomic::Interval(self))
  }
}

impl<T: PartialOrd + Clone> ToAtomic<T> for (T,)
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Atomic::point(self.0)
  }
}

impl<T: PartialOrd> ToAtomic<T> for (T, T)
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Atomic::try_new(Finite(self.0), Finite(self.1), true, false)
  }
}

impl<T: PartialOrd> ToAtomic<T> for (T, T, bool)
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Atomic::try_new(Finite(self.0), Finite(self.1), self.2, false)
  }
}

impl<T: PartialOrd> ToAtomic<T> for (T, T, bool, bool)
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Atomic::try_new(Finite(self.0), Finite(self.1), self.2, self.3)
  }
}

impl<T: PartialOrd> ToAtomic<T> for Range<T>
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Atomic::try_new(Finite(self.start), Finite(self.end), true, false)
  }
}

impl<T: PartialOrd> ToAtomic<T> for RangeInclusive<T>
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    let (start, end) = self.into_inner();
    Atomic::try_new(Finite(start), Finite(end), true, true)
  }
}

impl<T: PartialOrd> ToAtomic<T> for RangeFrom<T>
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Atomic::lower_limit(self.start, true)
  }
}

impl<T: PartialOrd> ToAtomic<T> for RangeTo<T>
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Atomic::upper_limit(self.end, false)
  }
}

impl<T: PartialOrd> ToAtomic<T> for RangeToInclusive<T>
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Atomic::upper_limit(self.end, true)
  }
}

impl<T> ToAtomic<T> for RangeFull
{
  fn to_atomic(self) -> Result<Atomic<T>, Error<T>> {
    Ok(Atomic::full())
  }
}

macro_rules! point_to_atomic_impl
{
  ( $( $t: ty ),* ) =>
  {$(
    impl ToAtomic<$t> for $t
    {
      fn to_atomic(self) -> Result<Atomic<$t>, Error<$t>> {
        Atomic::point(self)
      }
    }
  )*}
}

macro_rules! float_to_atomic_impl
{
  ( $( $t: ty ),* ) =>
  {$(
    impl ToAtomic<$t> for $t
    {
      fn to_atomic(self) -> Result<Atomic<$t>, Error<$t>> {
        let value = Value::from_float(self);
        Atomic::try_new(value, value, true, true)
      }
    }
  )*}
}

point_to_atomic_impl!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, String);
float_to_atomic_impl!(f32, f64);

impl<'a> ToAtomic<&'a str> for &'a str
{
  fn to_atomic(self) -> Result<Atomic<&'a str>, Error<&'a str>> {
    Atomic::point(self)
  }
}
