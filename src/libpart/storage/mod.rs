// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Backing storages of interval sets and interval dictionaries.
//!
//! A storage holds a sequence of `(Interval, value)` entries sorted by lower mark whose intervals are pairwise disjoint; sets use `()` as value. Two strategies are provided:
//!
//! * [`FrozenStorage`](struct.FrozenStorage.html): an append-only vector, for values that are never mutated once built.
//! * [`MutableStorage`](struct.MutableStorage.html): a B-tree keyed by lower mark, for in-place insertion and removal in O(log n).
//!
//! Both expose the contract consumed by the streaming algorithms: positioned cursors and boundary-aware bisection (`Sequence`), plus appending at the end (`Storage`).

use crate::atomic::Interval;
use crate::mark::Mark;

pub use self::frozen::FrozenStorage;
pub use self::mutable::MutableStorage;

mod frozen;
mod mutable;

/// A position in a sorted sequence of entries.
pub trait Cursor<'a, T, V> {
  /// The entry under the cursor, `None` once the sequence is exhausted.
  fn get(&self) -> Option<(&'a Interval<T>, &'a V)>;

  /// Moves to the next entry.
  fn advance(&mut self);

  /// Moves forward, staying in place if possible, to the first entry whose upper mark is not below `mark`.
  fn skip_to(&mut self, mark: &Mark<T>);
}

/// Read access to a sorted sequence of disjoint entries.
pub trait Sequence<T, V = ()> {
  /// Number of entries.
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// A cursor on the first entry, or on the first entry whose upper mark is not below `from`.
  fn cursor<'a>(&'a self, from: Option<&Mark<T>>) -> Box<dyn Cursor<'a, T, V> + 'a>
    where T: 'a, V: 'a;

  /// All the entries in ascending order.
  fn entries<'a>(&'a self) -> Box<dyn DoubleEndedIterator<Item = (&'a Interval<T>, &'a V)> + 'a>
    where T: 'a, V: 'a;

  /// The `index`-th entry in ascending order.
  fn nth<'a>(&'a self, index: usize) -> Option<(&'a Interval<T>, &'a V)>
    where T: 'a, V: 'a
  {
    self.entries().nth(index)
  }
}

/// A sequence that can be built by appending entries in ascending order.
pub trait Storage<T, V = ()>: Sequence<T, V> + Default {
  // precondition: `interval` lies after every stored interval.
  fn push(&mut self, interval: Interval<T>, value: V);
}

/// Collects entries, given in ascending order, into a storage.
pub(crate) fn collect_storage<S, T, V, I>(entries: I) -> S where
  S: Storage<T, V>,
  I: IntoIterator<Item = (Interval<T>, V)>
{
  let mut storage = S::default();
  for (interval, value) in entries {
    storage.push(interval, value);
  }
  storage
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::atomic::ToAtomic;
  use crate::mark::Value::Finite;

  fn entries(intervals: Vec<(i32, i32)>) -> Vec<(Interval<i32>, char)> {
    intervals.into_iter()
      .zip("abcdefgh".chars())
      .map(|(i, c)| (i.to_atomic().unwrap().into_interval().unwrap(), c))
      .collect()
  }

  fn probe(value: i32) -> Mark<i32> {
    Mark::probe(Finite(value))
  }

  // The sorted sequence [0;2) [5;10) [13;23) [24;25) read through both storages.
  fn check_contract<S: Storage<i32, char>>() {
    let storage: S = collect_storage(entries(vec![(0, 2), (5, 10), (13, 23), (24, 25)]));
    assert_eq!(storage.len(), 4);
    assert!(!storage.is_empty());
    assert_eq!(storage.entries().map(|(_, c)| *c).collect::<String>(), "abcd");
    assert_eq!(storage.entries().rev().map(|(_, c)| *c).collect::<String>(), "dcba");
    for (index, expected) in vec![(0, Some('a')), (2, Some('c')), (3, Some('d')), (4, None)] {
      assert_eq!(storage.nth(index).map(|(_, c)| *c), expected, "test #{} of indexed access", index);
    }

    let cases = vec![
      (1, None, Some('a')),
      (2, Some(-5), Some('a')),
      (3, Some(1), Some('a')),
      (4, Some(2), Some('b')),
      (5, Some(9), Some('b')),
      (6, Some(10), Some('c')),
      (7, Some(24), Some('d')),
      (8, Some(25), None),
    ];
    for (id, from, expected) in cases {
      let from = from.map(probe);
      let cursor = storage.cursor(from.as_ref());
      assert_eq!(cursor.get().map(|(_, c)| *c), expected, "test #{} of cursor positioning", id);
    }

    let mut cursor = storage.cursor(None);
    cursor.skip_to(&probe(1));
    assert_eq!(cursor.get().map(|(_, c)| *c), Some('a'));
    cursor.advance();
    assert_eq!(cursor.get().map(|(_, c)| *c), Some('b'));
    cursor.skip_to(&probe(0));
    assert_eq!(cursor.get().map(|(_, c)| *c), Some('b'));
    cursor.skip_to(&probe(23));
    assert_eq!(cursor.get().map(|(_, c)| *c), Some('d'));
    cursor.advance();
    assert_eq!(cursor.get(), None);
    cursor.advance();
    cursor.skip_to(&probe(100));
    assert_eq!(cursor.get(), None);

    let empty = S::default();
    assert!(empty.is_empty());
    assert!(empty.cursor(None).get().is_none());
  }

  #[test]
  fn frozen_contract() {
    check_contract::<FrozenStorage<i32, char>>();
  }

  #[test]
  fn mutable_contract() {
    check_contract::<MutableStorage<i32, char>>();
  }
}
