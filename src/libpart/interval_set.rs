// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sets of disjoint intervals.
//!
//! An `IntervalSet` stores its members as a sorted sequence of pairwise disjoint intervals, no two of them being adjacent, so that each set has a unique representation. The sequence is held by a [storage](../storage/index.html): `FrozenIntervalSet` uses an immutable vector and is hashable, `MutableIntervalSet` uses a B-tree and supports in-place updates.
//!
//! The set operations of `gcollections` are implemented between sets of any storage, the result taking the storage of the left operand. The `_all` variants accept any number of operands and stream the result in a single pass.
//!
//! ```
//! use gcollections::ops::{Complement, Intersection, Subset};
//! use part::{FrozenIntervalSet, MutableIntervalSet};
//!
//! let a = FrozenIntervalSet::try_from_iter(vec![(0, 2), (5, 10), (13, 23), (24, 25)])?;
//! let b = MutableIntervalSet::try_from_iter(vec![(1, 9), (16, 30)])?;
//! assert_eq!(format!("{}", a.intersection(&b)), "[1;2) | [5;9) | [16;23) | [24;25)");
//! assert_eq!(format!("{}", &a | &b), "[0;10) | [13;30)");
//! assert_eq!(format!("{}", a.complement()), "(-inf;0) | [2;5) | [10;13) | [23;24) | [25;+inf)");
//! assert!(a.intersection(&b).is_subset(&a));
//! # Ok::<(), part::Error<i32>>(())
//! ```

use std::cmp::Ordering;
use std::fmt::{Debug, Display, Error as FmtError, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::{once, FromIterator};
use std::marker::PhantomData;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign};

use gcollections::kind::Collection;
use gcollections::ops::{Complement, Contains, Difference, Disjoint, Empty, Intersection, Overlap};
use gcollections::ops::{ProperSubset, Subset, SymmetricDifference, Union};

use crate::atomic::{Atomic, Interval, ToAtomic};
use crate::error::Error;
use crate::mark::Mark;
use crate::mark::Value::Finite;
use crate::set_operations::{self, complement, normalize, IntersectionIter, Select, UnionIter};
use crate::storage::{collect_storage, Cursor, FrozenStorage, MutableStorage, Sequence, Storage};

/// A set of values of `T` represented by disjoint intervals.
pub struct IntervalSet<T, S = FrozenStorage<T>> {
  storage: S,
  phantom: PhantomData<T>
}

/// Immutable and hashable interval set.
pub type FrozenIntervalSet<T> = IntervalSet<T, FrozenStorage<T>>;

/// Interval set supporting in-place updates.
pub type MutableIntervalSet<T> = IntervalSet<T, MutableStorage<T>>;

impl<T: PartialOrd + Clone, S: Storage<T>> IntervalSet<T, S> {
  pub fn new() -> IntervalSet<T, S> {
    IntervalSet { storage: S::default(), phantom: PhantomData }
  }

  // precondition: `intervals` are sorted and pairwise apart.
  pub(crate) fn from_sorted<I: IntoIterator<Item = Interval<T>>>(intervals: I) -> IntervalSet<T, S> {
    IntervalSet {
      storage: collect_storage(intervals.into_iter().map(|interval| (interval, ()))),
      phantom: PhantomData
    }
  }

  /// Builds the union of interval-like values, failing on the first value that cannot be read as an interval.
  pub fn try_from_iter<I, X>(values: I) -> Result<IntervalSet<T, S>, Error<T>> where
    I: IntoIterator<Item = X>,
    X: ToAtomic<T>
  {
    let atomics: Result<Vec<Atomic<T>>, Error<T>> = values.into_iter()
      .map(|value| value.to_atomic())
      .collect();
    Ok(IntervalSet::from_sorted(normalize(atomics?)))
  }

  /// Number of disjoint intervals.
  pub fn len(&self) -> usize {
    self.storage.len()
  }

  pub fn is_empty(&self) -> bool {
    self.storage.is_empty()
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Interval<T>> + '_ {
    self.storage.entries().map(|(interval, _)| interval)
  }

  /// The `index`-th interval in ascending order.
  pub fn get(&self, index: usize) -> Option<&Interval<T>> {
    self.storage.nth(index).map(|(interval, _)| interval)
  }

  pub fn first(&self) -> Option<&Interval<T>> {
    self.iter().next()
  }

  pub fn last(&self) -> Option<&Interval<T>> {
    self.iter().next_back()
  }

  /// Smallest interval covering the whole set.
  pub fn span(&self) -> Atomic<T> {
    match (self.first(), self.last()) {
      (Some(first), Some(last)) =>
        Atomic::Interval(Interval::from_marks(first.lower().clone(), last.upper().clone())),
      _ => Atomic::Empty
    }
  }

  /// `atomic` lies inside one of the intervals. The empty atomic is always covered.
  pub fn covers(&self, atomic: &Atomic<T>) -> bool {
    match atomic.as_interval() {
      Some(interval) => self.storage.cursor(Some(interval.lower())).get()
        .map_or(false, |(cover, _)| cover.lower() <= interval.lower() && interval.upper() <= cover.upper()),
      None => true
    }
  }

  /// The intervals overlapping `query`. In strict mode, only the intervals lying inside `query` are selected, otherwise the intervals straddling its bounds are selected too.
  pub fn select<'a>(&'a self, query: &Atomic<T>, strict: bool) -> impl Iterator<Item = &'a Interval<T>> + 'a {
    Select::<T, ()>::new(&self.storage, query, strict).map(|(interval, _)| interval)
  }

  fn sources<'a>(&'a self, others: &[&'a dyn Sequence<T>]) -> Vec<&'a dyn Sequence<T>> {
    let this: &'a dyn Sequence<T> = self;
    once(this).chain(others.iter().copied()).collect()
  }

  /// Lazy intersection of `self` with all the `others`.
  pub fn iter_intersection<'a>(&'a self, others: &[&'a dyn Sequence<T>]) -> IntersectionIter<'a, T> {
    IntersectionIter::new(&self.sources(others))
  }

  /// Lazy union of `self` with all the `others`.
  pub fn iter_union<'a>(&'a self, others: &[&'a dyn Sequence<T>]) -> UnionIter<'a, T> {
    UnionIter::new(&self.sources(others))
  }

  pub fn intersection_all<'a>(&'a self, others: &[&'a dyn Sequence<T>]) -> IntervalSet<T, S> {
    IntervalSet::from_sorted(self.iter_intersection(others))
  }

  pub fn union_all<'a>(&'a self, others: &[&'a dyn Sequence<T>]) -> IntervalSet<T, S> {
    IntervalSet::from_sorted(self.iter_union(others))
  }

  /// The values of `self` belonging to none of the `others`.
  pub fn difference_all<'a>(&'a self, others: &[&'a dyn Sequence<T>]) -> IntervalSet<T, S> {
    let union: Vec<Interval<T>> = UnionIter::new(others).collect();
    let gaps: FrozenStorage<T> = collect_storage(complement(&union).into_iter().map(|interval| (interval, ())));
    IntervalSet::from_sorted(self.iter_intersection(&[&gaps]))
  }

  pub fn is_superset<R: Sequence<T>>(&self, other: &IntervalSet<T, R>) -> bool {
    set_operations::is_subset::<T, (), ()>(other, self)
  }

  /// Copies the intervals into another storage.
  pub fn convert<R: Storage<T>>(&self) -> IntervalSet<T, R> {
    IntervalSet::from_sorted(self.iter().cloned())
  }

  pub fn to_frozen(&self) -> FrozenIntervalSet<T> {
    self.convert()
  }

  pub fn to_mutable(&self) -> MutableIntervalSet<T> {
    self.convert()
  }
}

impl<T: PartialOrd + Clone> IntervalSet<T, MutableStorage<T>> {
  /// Adds the values of `value` to the set. Adding the empty atomic does nothing.
  pub fn add<X: ToAtomic<T>>(&mut self, value: X) -> Result<(), Error<T>> {
    if let Atomic::Interval(interval) = value.to_atomic()? {
      let added: FrozenIntervalSet<T> = IntervalSet::from_sorted(once(interval));
      self.update(&[&added]);
    }
    Ok(())
  }

  /// Removes `value`, which must be covered by the set.
  pub fn remove<X: ToAtomic<T>>(&mut self, value: X) -> Result<(), Error<T>> {
    let atomic = value.to_atomic()?;
    if !self.covers(&atomic) {
      return Err(Error::KeyNotFound(atomic));
    }
    self.discard(atomic)
  }

  /// Removes the values of `value` from the set, if any.
  pub fn discard<X: ToAtomic<T>>(&mut self, value: X) -> Result<(), Error<T>> {
    if let Atomic::Interval(interval) = value.to_atomic()? {
      let removed: FrozenIntervalSet<T> = IntervalSet::from_sorted(once(interval));
      self.difference_update(&[&removed]);
    }
    Ok(())
  }

  /// Removes and returns the first interval.
  pub fn pop(&mut self) -> Option<Interval<T>> {
    self.storage.pop_first().map(|(interval, _)| interval)
  }

  pub fn clear(&mut self) {
    self.storage.clear();
  }

  pub fn update(&mut self, others: &[&dyn Sequence<T>]) {
    *self = self.union_all(others);
  }

  pub fn intersection_update(&mut self, others: &[&dyn Sequence<T>]) {
    *self = self.intersection_all(others);
  }

  pub fn difference_update(&mut self, others: &[&dyn Sequence<T>]) {
    *self = self.difference_all(others);
  }

  pub fn symmetric_difference_update<R: Sequence<T>>(&mut self, other: &IntervalSet<T, R>) {
    *self = self.symmetric_difference(other);
  }
}

impl<T: PartialOrd, S: Sequence<T>> Sequence<T> for IntervalSet<T, S>
{
  fn len(&self) -> usize {
    self.storage.len()
  }

  fn cursor<'a>(&'a self, from: Option<&Mark<T>>) -> Box<dyn Cursor<'a, T, ()> + 'a>
    where T: 'a
  {
    self.storage.cursor(from)
  }

  fn entries<'a>(&'a self) -> Box<dyn DoubleEndedIterator<Item = (&'a Interval<T>, &'a ())> + 'a>
    where T: 'a
  {
    self.storage.entries()
  }

  fn nth<'a>(&'a self, index: usize) -> Option<(&'a Interval<T>, &'a ())>
    where T: 'a
  {
    self.storage.nth(index)
  }
}

impl<T: PartialOrd + Clone, S: Storage<T>> Default for IntervalSet<T, S>
{
  fn default() -> IntervalSet<T, S> {
    IntervalSet::new()
  }
}

impl<T, S: Clone> Clone for IntervalSet<T, S>
{
  fn clone(&self) -> IntervalSet<T, S> {
    IntervalSet { storage: self.storage.clone(), phantom: PhantomData }
  }
}

impl<T: PartialOrd + Clone, S: Storage<T>> FromIterator<Atomic<T>> for IntervalSet<T, S>
{
  fn from_iter<I: IntoIterator<Item = Atomic<T>>>(atomics: I) -> IntervalSet<T, S> {
    IntervalSet::from_sorted(normalize(atomics))
  }
}

impl<T: PartialOrd + Clone, S: Storage<T>> FromIterator<Interval<T>> for IntervalSet<T, S>
{
  fn from_iter<I: IntoIterator<Item = Interval<T>>>(intervals: I) -> IntervalSet<T, S> {
    IntervalSet::from_sorted(normalize(intervals.into_iter().map(Atomic::Interval)))
  }
}

impl<T: PartialOrd, S: Sequence<T>, R: Sequence<T>> PartialEq<IntervalSet<T, R>> for IntervalSet<T, S>
{
  fn eq(&self, other: &IntervalSet<T, R>) -> bool {
    self.storage.len() == other.storage.len()
      && self.storage.entries().map(|(interval, _)| interval)
        .eq(other.storage.entries().map(|(interval, _)| interval))
  }
}

impl<T: PartialOrd, S: Sequence<T>> Eq for IntervalSet<T, S> {}

/// Sets are ordered by inclusion.
impl<T: PartialOrd, S: Sequence<T>, R: Sequence<T>> PartialOrd<IntervalSet<T, R>> for IntervalSet<T, S>
{
  fn partial_cmp(&self, other: &IntervalSet<T, R>) -> Option<Ordering> {
    if self == other {
      Some(Ordering::Equal)
    }
    else if set_operations::is_subset::<T, (), ()>(self, other) {
      Some(Ordering::Less)
    }
    else if set_operations::is_subset::<T, (), ()>(other, self) {
      Some(Ordering::Greater)
    }
    else {
      None
    }
  }
}

impl<T: Hash> Hash for IntervalSet<T, FrozenStorage<T>>
{
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.storage.hash(state);
  }
}

impl<T: Display, S: Sequence<T>> Display for IntervalSet<T, S>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), FmtError> {
    for (i, (interval, _)) in self.storage.entries().enumerate() {
      if i > 0 {
        formatter.write_str(" | ")?;
      }
      Display::fmt(interval, formatter)?;
    }
    Ok(())
  }
}

impl<T: Debug, S: Sequence<T>> Debug for IntervalSet<T, S>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), FmtError> {
    formatter.debug_set()
      .entries(self.storage.entries().map(|(interval, _)| interval))
      .finish()
  }
}

impl<T, S> Collection for IntervalSet<T, S>
{
  type Item = T;
}

impl<T: PartialOrd + Clone, S: Sequence<T>> Contains for IntervalSet<T, S>
{
  fn contains(&self, value: &T) -> bool {
    let probe = Mark::probe(Finite(value.clone()));
    probe.value().is_comparable()
      && self.storage.cursor(Some(&probe)).get()
        .map_or(false, |(interval, _)| interval.lower() <= &probe)
  }
}

impl<T: PartialOrd + Clone, S: Storage<T>> Empty for IntervalSet<T, S>
{
  fn empty() -> IntervalSet<T, S> {
    IntervalSet::new()
  }
}

impl<T: PartialOrd + Clone, S: Storage<T>> Complement for IntervalSet<T, S>
{
  fn complement(&self) -> IntervalSet<T, S> {
    IntervalSet::from_sorted(complement(self.iter()))
  }
}

impl<T, S, R> Intersection<IntervalSet<T, R>> for IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  type Output = IntervalSet<T, S>;

  fn intersection(&self, other: &IntervalSet<T, R>) -> IntervalSet<T, S> {
    self.intersection_all(&[other])
  }
}

impl<T, S, R> Union<IntervalSet<T, R>> for IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  type Output = IntervalSet<T, S>;

  fn union(&self, other: &IntervalSet<T, R>) -> IntervalSet<T, S> {
    self.union_all(&[other])
  }
}

impl<T, S, R> Difference<IntervalSet<T, R>> for IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  type Output = IntervalSet<T, S>;

  fn difference(&self, other: &IntervalSet<T, R>) -> IntervalSet<T, S> {
    self.difference_all(&[other])
  }
}

impl<T, S, R> SymmetricDifference<IntervalSet<T, R>> for IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  type Output = IntervalSet<T, S>;

  fn symmetric_difference(&self, other: &IntervalSet<T, R>) -> IntervalSet<T, S> {
    let common = self.intersection_all(&[other]);
    self.union_all(&[other]).difference_all(&[&common])
  }
}

impl<T, S, R> Disjoint<IntervalSet<T, R>> for IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  fn is_disjoint(&self, other: &IntervalSet<T, R>) -> bool {
    self.iter_intersection(&[other]).next().is_none()
  }
}

impl<T, S, R> Overlap<IntervalSet<T, R>> for IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  fn overlap(&self, other: &IntervalSet<T, R>) -> bool {
    !self.is_disjoint(other)
  }
}

impl<T, S, R> Subset<IntervalSet<T, R>> for IntervalSet<T, S> where
  T: PartialOrd,
  S: Sequence<T>,
  R: Sequence<T>
{
  fn is_subset(&self, other: &IntervalSet<T, R>) -> bool {
    set_operations::is_subset::<T, (), ()>(self, other)
  }
}

impl<T, S, R> ProperSubset<IntervalSet<T, R>> for IntervalSet<T, S> where
  T: PartialOrd,
  S: Sequence<T>,
  R: Sequence<T>
{
  fn is_proper_subset(&self, other: &IntervalSet<T, R>) -> bool {
    self.is_subset(other) && self != other
  }
}

impl<'a, 'b, T, S, R> BitOr<&'b IntervalSet<T, R>> for &'a IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  type Output = IntervalSet<T, S>;

  fn bitor(self, other: &'b IntervalSet<T, R>) -> IntervalSet<T, S> {
    self.union(other)
  }
}

impl<'a, 'b, T, S, R> BitAnd<&'b IntervalSet<T, R>> for &'a IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  type Output = IntervalSet<T, S>;

  fn bitand(self, other: &'b IntervalSet<T, R>) -> IntervalSet<T, S> {
    self.intersection(other)
  }
}

impl<'a, 'b, T, S, R> Sub<&'b IntervalSet<T, R>> for &'a IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  type Output = IntervalSet<T, S>;

  fn sub(self, other: &'b IntervalSet<T, R>) -> IntervalSet<T, S> {
    self.difference(other)
  }
}

impl<'a, 'b, T, S, R> BitXor<&'b IntervalSet<T, R>> for &'a IntervalSet<T, S> where
  T: PartialOrd + Clone,
  S: Storage<T>,
  R: Sequence<T>
{
  type Output = IntervalSet<T, S>;

  fn bitxor(self, other: &'b IntervalSet<T, R>) -> IntervalSet<T, S> {
    self.symmetric_difference(other)
  }
}

forward_all_binop!([T, S, R] [T: PartialOrd + Clone, S: Storage<T>, R: Sequence<T>]
  BitOr, bitor, IntervalSet<T, S>, IntervalSet<T, R> => IntervalSet<T, S>);
forward_all_binop!([T, S, R] [T: PartialOrd + Clone, S: Storage<T>, R: Sequence<T>]
  BitAnd, bitand, IntervalSet<T, S>, IntervalSet<T, R> => IntervalSet<T, S>);
forward_all_binop!([T, S, R] [T: PartialOrd + Clone, S: Storage<T>, R: Sequence<T>]
  Sub, sub, IntervalSet<T, S>, IntervalSet<T, R> => IntervalSet<T, S>);
forward_all_binop!([T, S, R] [T: PartialOrd + Clone, S: Storage<T>, R: Sequence<T>]
  BitXor, bitxor, IntervalSet<T, S>, IntervalSet<T, R> => IntervalSet<T, S>);

impl<'a, T: PartialOrd + Clone, S: Storage<T>> Not for &'a IntervalSet<T, S>
{
  type Output = IntervalSet<T, S>;

  fn not(self) -> IntervalSet<T, S> {
    self.complement()
  }
}

impl<T: PartialOrd + Clone, S: Storage<T>> Not for IntervalSet<T, S>
{
  type Output = IntervalSet<T, S>;

  fn not(self) -> IntervalSet<T, S> {
    self.complement()
  }
}

impl<'b, T: PartialOrd + Clone, R: Sequence<T>> BitOrAssign<&'b IntervalSet<T, R>> for IntervalSet<T, MutableStorage<T>>
{
  fn bitor_assign(&mut self, other: &'b IntervalSet<T, R>) {
    self.update(&[other]);
  }
}

impl<'b, T: PartialOrd + Clone, R: Sequence<T>> BitAndAssign<&'b IntervalSet<T, R>> for IntervalSet<T, MutableStorage<T>>
{
  fn bitand_assign(&mut self, other: &'b IntervalSet<T, R>) {
    self.intersection_update(&[other]);
  }
}

impl<'b, T: PartialOrd + Clone, R: Sequence<T>> SubAssign<&'b IntervalSet<T, R>> for IntervalSet<T, MutableStorage<T>>
{
  fn sub_assign(&mut self, other: &'b IntervalSet<T, R>) {
    self.difference_update(&[other]);
  }
}

impl<'b, T: PartialOrd + Clone, R: Sequence<T>> BitXorAssign<&'b IntervalSet<T, R>> for IntervalSet<T, MutableStorage<T>>
{
  fn bitxor_assign(&mut self, other: &'b IntervalSet<T, R>) {
    self.symmetric_difference_update(other);
  }
}

forward_val_assign_op!([T, R] [T: PartialOrd + Clone, R: Sequence<T>]
  BitOrAssign, bitor_assign, IntervalSet<T, MutableStorage<T>>, IntervalSet<T, R>);
forward_val_assign_op!([T, R] [T: PartialOrd + Clone, R: Sequence<T>]
  BitAndAssign, bitand_assign, IntervalSet<T, MutableStorage<T>>, IntervalSet<T, R>);
forward_val_assign_op!([T, R] [T: PartialOrd + Clone, R: Sequence<T>]
  SubAssign, sub_assign, IntervalSet<T, MutableStorage<T>>, IntervalSet<T, R>);
forward_val_assign_op!([T, R] [T: PartialOrd + Clone, R: Sequence<T>]
  BitXorAssign, bitxor_assign, IntervalSet<T, MutableStorage<T>>, IntervalSet<T, R>);

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  fn make_set(intervals: Vec<(i32, i32)>) -> FrozenIntervalSet<i32> {
    IntervalSet::try_from_iter(intervals).unwrap()
  }

  fn make_mutable(intervals: Vec<(i32, i32)>) -> MutableIntervalSet<i32> {
    IntervalSet::try_from_iter(intervals).unwrap()
  }

  fn make_flags(intervals: Vec<(i32, i32, bool, bool)>) -> FrozenIntervalSet<i32> {
    IntervalSet::try_from_iter(intervals).unwrap()
  }

  fn sample() -> FrozenIntervalSet<i32> {
    make_set(vec![(0, 2), (5, 10), (13, 23), (24, 25)])
  }

  fn interval(lower: i32, upper: i32) -> Interval<i32> {
    (lower, upper).to_atomic().unwrap().into_interval().unwrap()
  }

  #[test]
  fn test_construction() {
    let cases = vec![
      (1, vec![], ""),
      (2, vec![(2, 3), (0, 1)], "[0;1) | [2;3)"),
      (3, vec![(0, 3), (2, 5), (5, 6)], "[0;6)"),
      (4, vec![(3, 1), (1, 2)], "[1;2)"),
      (5, vec![(0, 10), (1, 2), (3, 4)], "[0;10)"),
    ];
    for (id, intervals, expected) in cases {
      assert_eq!(format!("{}", make_set(intervals.clone())), expected, "test #{} of construction", id);
      assert_eq!(format!("{}", make_mutable(intervals)), expected, "test #{} of mutable construction", id);
    }
    assert!(FrozenIntervalSet::<i32>::from_iter(vec![Atomic::Empty]).is_empty());
    assert_eq!(format!("{}", FrozenIntervalSet::from_iter(vec![interval(4, 5), interval(0, 1)])), "[0;1) | [4;5)");
    let nan = FrozenIntervalSet::try_from_iter(vec![(0.0, 1.0), (f64::NAN, 2.0)]);
    assert!(matches!(nan, Err(Error::NotComparable { .. })));
  }

  #[test]
  fn test_accessors() {
    let a = sample();
    assert_eq!(a.len(), 4);
    assert!(!a.is_empty());
    assert!(FrozenIntervalSet::<i32>::new().is_empty());
    assert_eq!(a.get(0), Some(&interval(0, 2)));
    assert_eq!(a.get(3), Some(&interval(24, 25)));
    assert_eq!(a.get(4), None);
    let mutable = a.to_mutable();
    assert_eq!(mutable.get(1), Some(&interval(5, 10)));
    assert_eq!(mutable.get(4), None);
    assert_eq!(a.first(), Some(&interval(0, 2)));
    assert_eq!(a.last(), Some(&interval(24, 25)));
    assert_eq!(format!("{}", a.span()), "[0;25)");
    assert!(FrozenIntervalSet::<i32>::new().span().is_empty());
    let reversed: Vec<_> = make_set(vec![(2, 3), (0, 1)]).iter().rev().cloned().collect();
    assert_eq!(reversed, vec![interval(2, 3), interval(0, 1)]);
  }

  #[test]
  fn test_contains() {
    let a = make_set(vec![(0, 1), (2, 3)]);
    let cases = vec![
      (1, (0, 1).to_atomic().unwrap(), true),
      (2, (2, 3).to_atomic().unwrap(), true),
      (3, (4, 5).to_atomic().unwrap(), false),
      (4, (1, 2).to_atomic().unwrap(), false),
      (5, (2, 3, true, true).to_atomic().unwrap(), false),
      (6, 0i32.to_atomic().unwrap(), true),
      (7, Atomic::Empty, true),
      (8, (0, 3).to_atomic().unwrap(), false),
    ];
    for (id, atomic, expected) in cases {
      assert_eq!(a.covers(&atomic), expected, "test #{} of covers", id);
    }
    for (value, expected) in vec![(-1, false), (0, true), (1, false), (2, true), (3, false)] {
      assert_eq!(a.contains(&value), expected, "{} in {}", value, a);
      assert_eq!(a.to_mutable().contains(&value), expected, "{} in {}", value, a);
    }
  }

  #[test]
  fn test_operators() {
    let a = sample();
    let b = make_flags(vec![(1, 5, true, true), (8, 12, true, false), (15, 18, true, false), (20, 24, true, true)]);
    let c = make_flags(vec![(0, 6, true, false), (9, 12, true, false), (24, 30, false, false)]);
    let cases = vec![
      (1, &a & &b, "[1;2) | [5;5] | [8;10) | [15;18) | [20;23) | [24;24]"),
      (2, &a | &b, "[0;12) | [13;25)"),
      (3, !&a, "(-inf;0) | [2;5) | [10;13) | [23;24) | [25;+inf)"),
      (4, &a - &c, "[6;9) | [13;23) | [24;24]"),
      (5, &a ^ &c, "[2;5) | [6;9) | [10;12) | [13;23) | [24;24] | [25;30)"),
      (6, !FrozenIntervalSet::<i32>::new(), "(-inf;+inf)"),
      (7, !!FrozenIntervalSet::<i32>::new(), ""),
      (8, !!!FrozenIntervalSet::<i32>::new(), "(-inf;+inf)"),
      (9, a.clone() & b.to_mutable(), "[1;2) | [5;5] | [8;10) | [15;18) | [20;23) | [24;24]"),
      (10, &a - make_set(vec![]), "[0;2) | [5;10) | [13;23) | [24;25)"),
    ];
    for (id, result, expected) in cases {
      assert_eq!(format!("{}", result), expected, "test #{} of set operators", id);
    }
  }

  #[test]
  fn test_k_way() {
    let a = sample();
    let b = make_flags(vec![(1, 5, true, true), (8, 12, true, false), (15, 18, true, false), (20, 24, true, true)]);
    let c = make_mutable(vec![(1, 9), (16, 30)]);
    let cases = vec![
      (1, a.intersection_all(&[&b, &c]), "[1;2) | [5;5] | [8;9) | [16;18) | [20;23) | [24;24]"),
      (2, a.intersection_all(&[&make_set(vec![(6, 9)]), &make_set(vec![(6, 7), (8, 9)])]), "[6;7) | [8;9)"),
      (3, a.intersection_all(&[]), "[0;2) | [5;10) | [13;23) | [24;25)"),
      (4, FrozenIntervalSet::<i32>::new().intersection_all(&[]), ""),
      (5, a.union_all(&[&make_set(vec![(2, 5)]), &make_set(vec![(10, 13), (23, 24)])]), "[0;25)"),
      (6, FrozenIntervalSet::<i32>::new().union_all(&[]), ""),
      (7, a.difference_all(&[&make_set(vec![(0, 6)]), &make_set(vec![(9, 12), (24, 30)])]), "[6;9) | [13;23)"),
      (8, a.difference_all(&[]), "[0;2) | [5;10) | [13;23) | [24;25)"),
    ];
    for (id, result, expected) in cases {
      assert_eq!(format!("{}", result), expected, "test #{} of k-way operations", id);
    }
  }

  #[test]
  fn test_intersection_scenario() {
    let a = make_set(vec![(1, 3), (4, 10)]);
    let b = make_set(vec![(2, 5), (6, 8)]);
    let c = make_set(vec![(2, 3), (4, 11)]);
    assert_eq!(format!("{}", a.intersection_all(&[&b, &c])), "[2;3) | [4;5) | [6;8)");
    assert_eq!(format!("{}", a.intersection(&b).intersection(&c)), "[2;3) | [4;5) | [6;8)");
  }

  #[test]
  fn test_disjoint() {
    let a = sample();
    let cases = vec![
      (1, vec![], true),
      (2, vec![(-1, 0)], true),
      (3, vec![(1, 2)], false),
      (4, vec![(11, 12)], true),
      (5, vec![(17, 24)], false),
      (6, vec![(24, 25)], false),
      (7, vec![(30, 31)], true),
      (8, vec![(10, 13)], true),
    ];
    for (id, other, expected) in cases {
      let other = make_set(other);
      assert_eq!(a.is_disjoint(&other), expected, "test #{} of disjoint", id);
      assert_eq!(a.overlap(&other), !expected, "test #{} of overlap", id);
    }
  }

  #[test]
  fn test_inclusion() {
    let a = sample();
    let cases = vec![
      (1, make_set(vec![(0, 30)]), true, true, Some(Ordering::Less)),
      (2, make_set(vec![(0, 11), (12, 30)]), true, true, Some(Ordering::Less)),
      (3, make_set(vec![(0, 9), (12, 30)]), false, false, None),
      (4, sample(), true, false, Some(Ordering::Equal)),
      (5, make_set(vec![(5, 10)]), false, false, Some(Ordering::Greater)),
    ];
    for (id, other, subset, proper, order) in cases {
      assert_eq!(a.is_subset(&other), subset, "test #{} of subset", id);
      assert_eq!(a.is_proper_subset(&other), proper, "test #{} of proper subset", id);
      assert_eq!(a.partial_cmp(&other), order, "test #{} of inclusion order", id);
      assert_eq!(other.is_superset(&a), subset, "test #{} of superset", id);
    }
    assert!(a <= a);
    assert!(!(a < a));
    assert!(a >= a.to_mutable());
    assert!(make_set(vec![(0, 30)]) > a);
  }

  #[test]
  fn test_select() {
    let a = sample();
    let cases = vec![
      (1, (1, 14, true, false), true, vec![(5, 10)]),
      (2, (1, 14, true, false), false, vec![(0, 2), (5, 10), (13, 23)]),
      (3, (24, 31, false, false), true, vec![]),
      (4, (24, 31, false, false), false, vec![(24, 25)]),
      (5, (30, 31, true, false), true, vec![]),
      (6, (30, 31, true, false), false, vec![]),
      (7, (-1, 1, true, false), true, vec![]),
      (8, (-1, 1, true, false), false, vec![(0, 2)]),
      (9, (-1, 0, true, false), false, vec![]),
    ];
    for (id, query, strict, expected) in cases {
      let query = query.to_atomic().unwrap();
      let expected: Vec<_> = expected.into_iter().map(|(l, u)| interval(l, u)).collect();
      let selected: Vec<_> = a.select(&query, strict).cloned().collect();
      assert_eq!(selected, expected, "test #{} of select", id);
    }
    assert_eq!(a.select(&Atomic::Empty, false).count(), 0);
  }

  #[test]
  fn test_equality_and_hash() {
    let a = sample();
    assert_eq!(a, a.clone());
    assert_eq!(a, a.to_mutable());
    assert_eq!(a.to_mutable().to_frozen(), a);
    assert_ne!(a, FrozenIntervalSet::new());
    let mut seen = HashSet::new();
    seen.insert(sample());
    seen.insert(make_set(vec![(24, 25), (13, 23), (5, 10), (0, 2)]));
    seen.insert(FrozenIntervalSet::new());
    assert_eq!(seen.len(), 2);
    assert_eq!(format!("{:?}", make_set(vec![])), "{}");
  }

  #[test]
  fn test_add_remove_discard() {
    let mut a = sample().to_mutable();
    a.add((1, 3)).unwrap();
    assert_eq!(format!("{}", a), "[0;3) | [5;10) | [13;23) | [24;25)");
    a.add(Atomic::Empty).unwrap();
    assert_eq!(format!("{}", a), "[0;3) | [5;10) | [13;23) | [24;25)");

    let mut a = sample().to_mutable();
    a.remove((1, 2)).unwrap();
    assert_eq!(format!("{}", a), "[0;1) | [5;10) | [13;23) | [24;25)");
    a.remove(Atomic::Empty).unwrap();
    let misses = vec![(1, 1), (0, 1), (0, 6), (2, 6), (2, 12)];
    for (lower, upper) in misses {
      let result = a.remove((lower, upper, true, true));
      assert!(matches!(result, Err(Error::KeyNotFound(_))), "[{};{}] should not be removed", lower, upper);
    }
    assert_eq!(format!("{}", a), "[0;1) | [5;10) | [13;23) | [24;25)");

    let mut a = sample().to_mutable();
    a.discard((1, 14)).unwrap();
    assert_eq!(format!("{}", a), "[0;1) | [14;23) | [24;25)");
    a.discard((15, 16)).unwrap();
    assert_eq!(format!("{}", a), "[0;1) | [14;15) | [16;23) | [24;25)");
    a.discard((16, 17)).unwrap();
    assert_eq!(format!("{}", a), "[0;1) | [14;15) | [17;23) | [24;25)");
    a.discard(20).unwrap();
    assert_eq!(format!("{}", a), "[0;1) | [14;15) | [17;20) | (20;23) | [24;25)");
    a.discard(Atomic::Empty).unwrap();
    assert_eq!(format!("{}", a), "[0;1) | [14;15) | [17;20) | (20;23) | [24;25)");
  }

  #[test]
  fn test_in_place_operators() {
    let other = make_mutable(vec![(24, 30), (31, 34)]);
    let run = |operation: &dyn Fn(&mut MutableIntervalSet<i32>)| {
      let mut a = sample().to_mutable();
      operation(&mut a);
      format!("{}", a)
    };
    let cases = vec![
      (1, run(&|a| *a |= &other), "[0;2) | [5;10) | [13;23) | [24;30) | [31;34)"),
      (2, run(&|a| a.update(&[&other])), "[0;2) | [5;10) | [13;23) | [24;30) | [31;34)"),
      (3, run(&|a| *a &= &other), "[24;25)"),
      (4, run(&|a| a.intersection_update(&[&other])), "[24;25)"),
      (5, run(&|a| *a -= &other), "[0;2) | [5;10) | [13;23)"),
      (6, run(&|a| a.difference_update(&[&other])), "[0;2) | [5;10) | [13;23)"),
      (7, run(&|a| *a ^= &other), "[0;2) | [5;10) | [13;23) | [25;30) | [31;34)"),
      (8, run(&|a| a.symmetric_difference_update(&other)), "[0;2) | [5;10) | [13;23) | [25;30) | [31;34)"),
      (9, run(&|a| *a |= other.to_frozen()), "[0;2) | [5;10) | [13;23) | [24;30) | [31;34)"),
    ];
    for (id, result, expected) in cases {
      assert_eq!(result, expected, "test #{} of in-place operators", id);
    }
  }

  #[test]
  fn test_pop_and_clear() {
    let mut a = sample().to_mutable();
    assert_eq!(a.pop(), Some(interval(0, 2)));
    assert_eq!(format!("{}", a), "[5;10) | [13;23) | [24;25)");
    a.clear();
    assert_eq!(format!("{}", a), "");
    assert_eq!(a.pop(), None);
    assert_eq!(MutableIntervalSet::<i32>::empty().pop(), None);
  }
}
