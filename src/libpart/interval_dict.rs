// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Dictionaries keyed by disjoint intervals.
//!
//! An `IntervalDict` maps each of its disjoint intervals to a value. A key is found when it lies inside one stored interval. `FrozenIntervalDict` is immutable and hashable; `MutableIntervalDict` supports splicing assignments, removals, and updates from other dictionaries, optionally combining overlapping values with an operator (see [`update`](../update/index.html)).
//!
//! ```
//! use part::{FrozenIntervalDict, MutableIntervalDict, UpdateStrategy};
//!
//! let a = FrozenIntervalDict::try_from_iter(vec![((10, 15), 1), ((20, 25), 2), ((30, 35), 3)])?;
//! assert_eq!(a.get(12), Some(&1));
//! assert_eq!(format!("{}", a.slice(12..32)?), "{[12;15): 1, [20;25): 2, [30;32): 3}");
//!
//! let mut b = a.to_mutable()
//!   .with_operator(|x: &i32, y: &i32| x + y)
//!   .with_strategy(UpdateStrategy::Commutative);
//! let c = FrozenIntervalDict::try_from_iter(vec![((15, 22), 4)])?;
//! b.update(&[&c]);
//! assert_eq!(format!("{}", b), "{[10;15): 1, [15;20): 4, [20;22): 6, [22;25): 2, [30;35): 3}");
//! # Ok::<(), part::Error<i32>>(())
//! ```

use std::fmt::{Debug, Display, Error as FmtError, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::{once, FromIterator};
use std::marker::PhantomData;
use std::ops::{BitOr, BitOrAssign, Deref};
use std::rc::Rc;

use gcollections::ops::Difference;

use crate::atomic::{Atomic, Interval, ToAtomic};
use crate::error::Error;
use crate::interval_set::FrozenIntervalSet;
use crate::mark::Mark;
use crate::set_operations::Select;
use crate::storage::{collect_storage, Cursor, FrozenStorage, MutableStorage, Sequence, Storage};
use crate::update::{commutative_sweep, DictOptions, UpdateStrategy};

/// A mapping from disjoint intervals of `T` to values of `V`.
pub struct IntervalDict<T, V, S = FrozenStorage<T, V>> {
  storage: S,
  phantom: PhantomData<(T, V)>
}

/// Immutable and hashable interval dictionary.
pub type FrozenIntervalDict<T, V> = IntervalDict<T, V, FrozenStorage<T, V>>;

impl<T: PartialOrd + Clone, V, S: Storage<T, V>> IntervalDict<T, V, S> {
  pub fn new() -> IntervalDict<T, V, S> {
    IntervalDict { storage: S::default(), phantom: PhantomData }
  }

  // precondition: the entries are sorted and their intervals pairwise disjoint.
  pub(crate) fn from_sorted<I: IntoIterator<Item = (Interval<T>, V)>>(entries: I) -> IntervalDict<T, V, S> {
    IntervalDict { storage: collect_storage(entries), phantom: PhantomData }
  }

  pub fn len(&self) -> usize {
    self.storage.len()
  }

  pub fn is_empty(&self) -> bool {
    self.storage.is_empty()
  }

  /// The entries in ascending order of their intervals.
  pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Interval<T>, &V)> + '_ {
    self.storage.entries()
  }

  pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Interval<T>> + '_ {
    self.iter().map(|(interval, _)| interval)
  }

  pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
    self.iter().map(|(_, value)| value)
  }

  pub fn first(&self) -> Option<(&Interval<T>, &V)> {
    self.iter().next()
  }

  pub fn last(&self) -> Option<(&Interval<T>, &V)> {
    self.iter().next_back()
  }

  fn lookup(&self, key: &Atomic<T>) -> Option<&V> {
    let key = key.as_interval()?;
    self.storage.cursor(Some(key.lower())).get()
      .filter(|(found, _)| found.lower() <= key.lower() && key.upper() <= found.upper())
      .map(|(_, value)| value)
  }

  /// The value of the interval enclosing `key`. Keys that cannot be read as an interval are never found.
  pub fn get<X: ToAtomic<T>>(&self, key: X) -> Option<&V> {
    key.to_atomic().ok().and_then(|key| self.lookup(&key))
  }

  /// Same as `get`, but reports why the lookup failed.
  pub fn try_get<X: ToAtomic<T>>(&self, key: X) -> Result<&V, Error<T>> {
    let key = key.to_atomic()?;
    match self.lookup(&key) {
      Some(value) => Ok(value),
      None => Err(Error::KeyNotFound(key))
    }
  }

  /// `key` lies inside one stored interval. The empty key is always contained.
  pub fn contains_key<X: ToAtomic<T>>(&self, key: X) -> bool {
    match key.to_atomic() {
      Ok(Atomic::Empty) => true,
      Ok(key) => self.lookup(&key).is_some(),
      Err(_) => false
    }
  }

  /// The entries overlapping `query`, with the same strictness rules as `IntervalSet::select`.
  pub fn select<'a>(&'a self, query: &Atomic<T>, strict: bool) -> impl Iterator<Item = (&'a Interval<T>, &'a V)> + 'a {
    Select::<T, V>::new(&self.storage, query, strict)
  }
}

impl<T: PartialOrd + Clone, V: Clone, S: Storage<T, V>> IntervalDict<T, V, S> {
  /// Builds a dictionary from pairs applied in order, later keys overwriting earlier ones.
  pub fn try_from_iter<I, X>(pairs: I) -> Result<IntervalDict<T, V, S>, Error<T>> where
    I: IntoIterator<Item = (X, V)>,
    X: ToAtomic<T>
  {
    Ok(MutableIntervalDict::try_from_iter(pairs)?.convert())
  }

  /// The part of the dictionary lying inside `key`, the straddling entries being clipped.
  pub fn slice<X: ToAtomic<T>>(&self, key: X) -> Result<IntervalDict<T, V, S>, Error<T>> {
    let key = key.to_atomic()?;
    let clipped = match key.as_interval() {
      Some(bounds) => self.select(&key, false)
        .filter_map(|(interval, value)| interval.clip(bounds).map(|piece| (piece, value.clone())))
        .collect(),
      None => vec![]
    };
    Ok(IntervalDict::from_sorted(clipped))
  }

  /// Copies the entries into another storage.
  pub fn convert<R: Storage<T, V>>(&self) -> IntervalDict<T, V, R> {
    IntervalDict::from_sorted(self.iter().map(|(interval, value)| (interval.clone(), value.clone())))
  }

  pub fn to_frozen(&self) -> FrozenIntervalDict<T, V> {
    self.convert()
  }

  /// A mutable copy with the default options.
  pub fn to_mutable(&self) -> MutableIntervalDict<T, V> {
    MutableIntervalDict { dict: self.convert(), options: DictOptions::new() }
  }

  fn to_mutable_with(&self, options: DictOptions<V>) -> MutableIntervalDict<T, V> {
    MutableIntervalDict { dict: self.convert(), options }
  }
}

impl<T: PartialOrd + Clone, V: Clone + PartialEq, S: Storage<T, V>> IntervalDict<T, V, S> {
  /// Merges the consecutive entries holding equal values whose intervals have no gap in between.
  pub fn compress(&self) -> IntervalDict<T, V, S> {
    let mut merged: Vec<(Interval<T>, V)> = vec![];
    for (interval, value) in self.iter() {
      let glued = merged.last()
        .map_or(false, |(last, last_value)| last_value == value && last.upper().near(interval.lower()));
      match merged.last_mut() {
        Some((last, _)) if glued => last.extend_upper(interval.upper().clone()),
        _ => merged.push((interval.clone(), value.clone()))
      }
    }
    IntervalDict::from_sorted(merged)
  }
}

impl<T: PartialOrd, V, S: Sequence<T, V>> Sequence<T, V> for IntervalDict<T, V, S>
{
  fn len(&self) -> usize {
    self.storage.len()
  }

  fn cursor<'a>(&'a self, from: Option<&Mark<T>>) -> Box<dyn Cursor<'a, T, V> + 'a>
    where T: 'a, V: 'a
  {
    self.storage.cursor(from)
  }

  fn entries<'a>(&'a self) -> Box<dyn DoubleEndedIterator<Item = (&'a Interval<T>, &'a V)> + 'a>
    where T: 'a, V: 'a
  {
    self.storage.entries()
  }

  fn nth<'a>(&'a self, index: usize) -> Option<(&'a Interval<T>, &'a V)>
    where T: 'a, V: 'a
  {
    self.storage.nth(index)
  }
}

impl<T: PartialOrd + Clone, V, S: Storage<T, V>> Default for IntervalDict<T, V, S>
{
  fn default() -> IntervalDict<T, V, S> {
    IntervalDict::new()
  }
}

impl<T, V, S: Clone> Clone for IntervalDict<T, V, S>
{
  fn clone(&self) -> IntervalDict<T, V, S> {
    IntervalDict { storage: self.storage.clone(), phantom: PhantomData }
  }
}

impl<T: PartialOrd + Clone, V: Clone, S: Storage<T, V>> FromIterator<(Atomic<T>, V)> for IntervalDict<T, V, S>
{
  fn from_iter<I: IntoIterator<Item = (Atomic<T>, V)>>(pairs: I) -> IntervalDict<T, V, S> {
    let mut dict = MutableIntervalDict::new();
    for (key, value) in pairs {
      dict.assign(key, value);
    }
    dict.convert()
  }
}

impl<T, V, S, R> PartialEq<IntervalDict<T, V, R>> for IntervalDict<T, V, S> where
  T: PartialOrd,
  V: PartialEq,
  S: Sequence<T, V>,
  R: Sequence<T, V>
{
  fn eq(&self, other: &IntervalDict<T, V, R>) -> bool {
    self.storage.len() == other.storage.len() && self.storage.entries().eq(other.storage.entries())
  }
}

impl<T: PartialOrd, V: Eq, S: Sequence<T, V>> Eq for IntervalDict<T, V, S> {}

impl<T: Hash, V: Hash> Hash for IntervalDict<T, V, FrozenStorage<T, V>>
{
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.storage.hash(state);
  }
}

impl<T: Display, V: Display, S: Sequence<T, V>> Display for IntervalDict<T, V, S>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), FmtError> {
    formatter.write_str("{")?;
    for (i, (interval, value)) in self.storage.entries().enumerate() {
      if i > 0 {
        formatter.write_str(", ")?;
      }
      write!(formatter, "{}: {}", interval, value)?;
    }
    formatter.write_str("}")
  }
}

impl<T: Debug, V: Debug, S: Sequence<T, V>> Debug for IntervalDict<T, V, S>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), FmtError> {
    formatter.debug_map().entries(self.storage.entries()).finish()
  }
}

/// An interval dictionary supporting in-place assignments and updates.
///
/// The read API of `IntervalDict` is reachable through `Deref`. The options are shared with the clones of the dictionary.
#[derive(Clone)]
pub struct MutableIntervalDict<T, V> {
  dict: IntervalDict<T, V, MutableStorage<T, V>>,
  options: DictOptions<V>
}

impl<T: PartialOrd + Clone, V: Clone> MutableIntervalDict<T, V> {
  pub fn new() -> MutableIntervalDict<T, V> {
    MutableIntervalDict::from_options(DictOptions::new())
  }

  pub fn from_options(options: DictOptions<V>) -> MutableIntervalDict<T, V> {
    MutableIntervalDict { dict: IntervalDict::new(), options }
  }

  /// Builds a dictionary from pairs applied in order, later keys overwriting earlier ones.
  pub fn try_from_iter<I, X>(pairs: I) -> Result<MutableIntervalDict<T, V>, Error<T>> where
    I: IntoIterator<Item = (X, V)>,
    X: ToAtomic<T>
  {
    let mut dict = MutableIntervalDict::new();
    for (key, value) in pairs {
      dict.set(key, value)?;
    }
    Ok(dict)
  }

  /// Sets the factory called by `get_or_default` on a missed lookup.
  pub fn with_default<F: Fn() -> V + 'static>(mut self, default: F) -> MutableIntervalDict<T, V> {
    self.options.default = Some(Rc::new(default));
    self
  }

  /// Sets the operator combining an existing value with an incoming one during updates.
  pub fn with_operator<F: Fn(&V, &V) -> V + 'static>(mut self, operator: F) -> MutableIntervalDict<T, V> {
    self.options.operator = Some(Rc::new(operator));
    self
  }

  pub fn with_strategy(mut self, strategy: UpdateStrategy) -> MutableIntervalDict<T, V> {
    self.options.strategy = strategy;
    self
  }

  pub fn options(&self) -> &DictOptions<V> {
    &self.options
  }

  fn assign(&mut self, key: Atomic<T>, value: V) {
    if let Atomic::Interval(key) = key {
      self.dict.storage.splice(&key);
      self.dict.storage.insert(key, value);
    }
  }

  /// Maps the whole range of `key` to `value`. The entries previously overlapping `key` keep their value outside of it.
  pub fn set<X: ToAtomic<T>>(&mut self, key: X, value: V) -> Result<(), Error<T>> {
    let key = key.to_atomic()?;
    self.assign(key, value);
    Ok(())
  }

  /// Unmaps the whole range of `key`.
  pub fn remove<X: ToAtomic<T>>(&mut self, key: X) -> Result<(), Error<T>> {
    if let Atomic::Interval(key) = key.to_atomic()? {
      self.dict.storage.splice(&key);
    }
    Ok(())
  }

  /// Mutable access to the value of the interval enclosing `key`.
  pub fn get_mut<X: ToAtomic<T>>(&mut self, key: X) -> Option<&mut V> {
    let key = key.to_atomic().ok()?.into_interval()?;
    self.dict.storage.get_mut(&key)
  }

  /// The value at `key`. On a miss, the default factory builds a value which is stored at `key`.
  pub fn get_or_default<X: ToAtomic<T>>(&mut self, key: X) -> Result<&V, Error<T>> {
    let key = key.to_atomic()?;
    if self.dict.lookup(&key).is_none() {
      match self.options.default.clone() {
        Some(default) => self.assign(key.clone(), default()),
        None => return Err(Error::KeyNotFound(key))
      }
    }
    self.dict.lookup(&key).ok_or(Error::KeyNotFound(key))
  }

  /// The value at `key`, storing `value` there first on a miss.
  pub fn set_default<X: ToAtomic<T>>(&mut self, key: X, value: V) -> Result<&V, Error<T>> {
    let key = key.to_atomic()?;
    if self.dict.lookup(&key).is_none() {
      self.assign(key.clone(), value);
    }
    self.dict.lookup(&key).ok_or(Error::KeyNotFound(key))
  }

  /// Removes the range of `key` and returns the value that was mapped to it.
  pub fn pop<X: ToAtomic<T>>(&mut self, key: X) -> Result<V, Error<T>> {
    let key = key.to_atomic()?;
    let value = match self.dict.lookup(&key) {
      Some(value) => value.clone(),
      None => return Err(Error::KeyNotFound(key))
    };
    if let Atomic::Interval(key) = key {
      self.dict.storage.splice(&key);
    }
    Ok(value)
  }

  /// Same as `pop`, but returns `default` when `key` is not found.
  pub fn pop_or<X: ToAtomic<T>>(&mut self, key: X, default: V) -> Result<V, Error<T>> {
    match self.pop(key) {
      Err(Error::KeyNotFound(_)) => Ok(default),
      result => result
    }
  }

  /// Removes and returns the first entry.
  pub fn pop_first(&mut self) -> Option<(Interval<T>, V)> {
    self.dict.storage.pop_first()
  }

  pub fn clear(&mut self) {
    self.dict.storage.clear();
  }

  /// Updates the dictionary from the entries of `sources` with the configured options.
  pub fn update(&mut self, sources: &[&dyn Sequence<T, V>]) {
    let options = self.options.clone();
    self.update_with(sources, options.operator.as_deref(), options.strategy);
  }

  /// Updates the dictionary from `(key, value)` pairs with the configured options.
  pub fn update_pairs<I, X>(&mut self, pairs: I) -> Result<(), Error<T>> where
    I: IntoIterator<Item = (X, V)>,
    X: ToAtomic<T>
  {
    let source: FrozenIntervalDict<T, V> = IntervalDict::try_from_iter(pairs)?;
    self.update(&[&source]);
    Ok(())
  }

  /// Updates the dictionary from the entries of `sources`, combining overlapping values with `operator`, or overwriting them without operator.
  pub fn update_with(&mut self, sources: &[&dyn Sequence<T, V>], operator: Option<&dyn Fn(&V, &V) -> V>,
    strategy: UpdateStrategy)
  {
    log::debug!("updating a dictionary of {} entries from {} sources ({:?}, operator: {})",
      self.dict.len(), sources.len(), strategy, operator.is_some());
    match (operator, strategy) {
      (Some(operator), UpdateStrategy::Commutative) => {
        let merged = {
          let this: &dyn Sequence<T, V> = &self.dict;
          let all: Vec<&dyn Sequence<T, V>> = once(this).chain(sources.iter().copied()).collect();
          commutative_sweep(&all, operator)
        };
        self.dict = IntervalDict::from_sorted(merged);
      }
      (operator, _) => {
        for source in sources {
          for (key, value) in source.entries() {
            self.merge(key, value, operator);
          }
        }
      }
    }
  }

  fn merge(&mut self, key: &Interval<T>, value: &V, operator: Option<&dyn Fn(&V, &V) -> V>) {
    let operator = match operator {
      Some(operator) => operator,
      None => return self.assign(Atomic::Interval(key.clone()), value.clone())
    };
    let query = Atomic::Interval(key.clone());
    let combined: Vec<(Interval<T>, V)> = self.dict.select(&query, false)
      .filter_map(|(found, existing)| found.clip(key).map(|piece| (piece, operator(existing, value))))
      .collect();
    let covered: FrozenIntervalSet<T> = combined.iter().map(|(piece, _)| piece.clone()).collect();
    let uncovered = query.to_set().difference(&covered);
    for (piece, combined) in combined {
      self.assign(Atomic::Interval(piece), combined);
    }
    for piece in uncovered.iter() {
      self.assign(Atomic::Interval(piece.clone()), value.clone());
    }
  }
}

impl<T, V> Deref for MutableIntervalDict<T, V>
{
  type Target = IntervalDict<T, V, MutableStorage<T, V>>;

  fn deref(&self) -> &IntervalDict<T, V, MutableStorage<T, V>> {
    &self.dict
  }
}

impl<T: PartialOrd, V> Sequence<T, V> for MutableIntervalDict<T, V>
{
  fn len(&self) -> usize {
    self.dict.storage.len()
  }

  fn cursor<'a>(&'a self, from: Option<&Mark<T>>) -> Box<dyn Cursor<'a, T, V> + 'a>
    where T: 'a, V: 'a
  {
    self.dict.storage.cursor(from)
  }

  fn entries<'a>(&'a self) -> Box<dyn DoubleEndedIterator<Item = (&'a Interval<T>, &'a V)> + 'a>
    where T: 'a, V: 'a
  {
    self.dict.storage.entries()
  }
}

impl<T: PartialOrd + Clone, V: Clone> Default for MutableIntervalDict<T, V>
{
  fn default() -> MutableIntervalDict<T, V> {
    MutableIntervalDict::new()
  }
}

impl<T: PartialOrd + Clone, V: Clone> FromIterator<(Atomic<T>, V)> for MutableIntervalDict<T, V>
{
  fn from_iter<I: IntoIterator<Item = (Atomic<T>, V)>>(pairs: I) -> MutableIntervalDict<T, V> {
    let mut dict = MutableIntervalDict::new();
    for (key, value) in pairs {
      dict.assign(key, value);
    }
    dict
  }
}

impl<T, V, R> PartialEq<IntervalDict<T, V, R>> for MutableIntervalDict<T, V> where
  T: PartialOrd,
  V: PartialEq,
  R: Sequence<T, V>
{
  fn eq(&self, other: &IntervalDict<T, V, R>) -> bool {
    self.dict == *other
  }
}

impl<T: PartialOrd, V: PartialEq> PartialEq for MutableIntervalDict<T, V>
{
  fn eq(&self, other: &MutableIntervalDict<T, V>) -> bool {
    self.dict == other.dict
  }
}

impl<T: Display + PartialOrd, V: Display> Display for MutableIntervalDict<T, V>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), FmtError> {
    Display::fmt(&self.dict, formatter)
  }
}

impl<T: Debug + PartialOrd, V: Debug> Debug for MutableIntervalDict<T, V>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), FmtError> {
    formatter.debug_struct("MutableIntervalDict")
      .field("entries", &self.dict)
      .field("options", &self.options)
      .finish()
  }
}

/// The left dictionary overwritten by the right one.
impl<'a, 'b, T, V, S, R> BitOr<&'b IntervalDict<T, V, R>> for &'a IntervalDict<T, V, S> where
  T: PartialOrd + Clone,
  V: Clone,
  S: Storage<T, V>,
  R: Sequence<T, V>
{
  type Output = IntervalDict<T, V, S>;

  fn bitor(self, other: &'b IntervalDict<T, V, R>) -> IntervalDict<T, V, S> {
    let mut result = self.to_mutable();
    result.update(&[other]);
    result.convert()
  }
}

forward_all_binop!([T, V, S, R] [T: PartialOrd + Clone, V: Clone, S: Storage<T, V>, R: Sequence<T, V>]
  BitOr, bitor, IntervalDict<T, V, S>, IntervalDict<T, V, R> => IntervalDict<T, V, S>);

/// A copy of the left dictionary updated from the right one with the options of the left one.
impl<'a, 'b, T, V, R> BitOr<&'b IntervalDict<T, V, R>> for &'a MutableIntervalDict<T, V> where
  T: PartialOrd + Clone,
  V: Clone,
  R: Sequence<T, V>
{
  type Output = MutableIntervalDict<T, V>;

  fn bitor(self, other: &'b IntervalDict<T, V, R>) -> MutableIntervalDict<T, V> {
    let mut result = self.dict.to_mutable_with(self.options.clone());
    result.update(&[other]);
    result
  }
}

impl<'a, 'b, T, V> BitOr<&'b MutableIntervalDict<T, V>> for &'a MutableIntervalDict<T, V> where
  T: PartialOrd + Clone,
  V: Clone
{
  type Output = MutableIntervalDict<T, V>;

  fn bitor(self, other: &'b MutableIntervalDict<T, V>) -> MutableIntervalDict<T, V> {
    self | &other.dict
  }
}

forward_all_binop!([T, V, R] [T: PartialOrd + Clone, V: Clone, R: Sequence<T, V>]
  BitOr, bitor, MutableIntervalDict<T, V>, IntervalDict<T, V, R> => MutableIntervalDict<T, V>);
forward_all_binop!([T, V] [T: PartialOrd + Clone, V: Clone]
  BitOr, bitor, MutableIntervalDict<T, V>, MutableIntervalDict<T, V> => MutableIntervalDict<T, V>);

impl<'b, T: PartialOrd + Clone, V: Clone, R: Sequence<T, V>> BitOrAssign<&'b IntervalDict<T, V, R>> for MutableIntervalDict<T, V>
{
  fn bitor_assign(&mut self, other: &'b IntervalDict<T, V, R>) {
    self.update(&[other]);
  }
}

impl<'b, T: PartialOrd + Clone, V: Clone> BitOrAssign<&'b MutableIntervalDict<T, V>> for MutableIntervalDict<T, V>
{
  fn bitor_assign(&mut self, other: &'b MutableIntervalDict<T, V>) {
    self.update(&[other]);
  }
}

forward_val_assign_op!([T, V, R] [T: PartialOrd + Clone, V: Clone, R: Sequence<T, V>]
  BitOrAssign, bitor_assign, MutableIntervalDict<T, V>, IntervalDict<T, V, R>);
forward_val_assign_op!([T, V] [T: PartialOrd + Clone, V: Clone]
  BitOrAssign, bitor_assign, MutableIntervalDict<T, V>, MutableIntervalDict<T, V>);
