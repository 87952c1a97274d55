// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::atomic::Interval;
use crate::mark::Mark;
use crate::storage::{Cursor, Sequence, Storage};

/// Append-only storage backed by a vector.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct FrozenStorage<T, V = ()> {
  entries: Vec<(Interval<T>, V)>
}

impl<T, V> FrozenStorage<T, V> {
  pub fn as_slice(&self) -> &[(Interval<T>, V)] {
    &self.entries
  }
}

impl<T, V> Default for FrozenStorage<T, V>
{
  fn default() -> FrozenStorage<T, V> {
    FrozenStorage { entries: vec![] }
  }
}

/// Index of the first entry of `entries` whose upper mark is not below `mark`.
fn bisect<T: PartialOrd, V>(entries: &[(Interval<T>, V)], mark: &Mark<T>) -> usize {
  entries.partition_point(|(interval, _)| interval.upper() < mark)
}

struct SliceCursor<'a, T, V> {
  entries: &'a [(Interval<T>, V)],
  position: usize
}

impl<'a, T: PartialOrd, V> Cursor<'a, T, V> for SliceCursor<'a, T, V>
{
  fn get(&self) -> Option<(&'a Interval<T>, &'a V)> {
    self.entries.get(self.position).map(|(interval, value)| (interval, value))
  }

  fn advance(&mut self) {
    if self.position < self.entries.len() {
      self.position += 1;
    }
  }

  fn skip_to(&mut self, mark: &Mark<T>) {
    if let Some(rest) = self.entries.get(self.position..) {
      self.position += bisect(rest, mark);
    }
  }
}

impl<T: PartialOrd, V> Sequence<T, V> for FrozenStorage<T, V>
{
  fn len(&self) -> usize {
    self.entries.len()
  }

  fn cursor<'a>(&'a self, from: Option<&Mark<T>>) -> Box<dyn Cursor<'a, T, V> + 'a>
    where T: 'a, V: 'a
  {
    let position = from.map_or(0, |mark| bisect(&self.entries, mark));
    Box::new(SliceCursor { entries: &self.entries, position })
  }

  fn entries<'a>(&'a self) -> Box<dyn DoubleEndedIterator<Item = (&'a Interval<T>, &'a V)> + 'a>
    where T: 'a, V: 'a
  {
    Box::new(self.entries.iter().map(|(interval, value)| (interval, value)))
  }

  fn nth<'a>(&'a self, index: usize) -> Option<(&'a Interval<T>, &'a V)>
    where T: 'a, V: 'a
  {
    self.entries.get(index).map(|(interval, value)| (interval, value))
  }
}

impl<T: PartialOrd, V> Storage<T, V> for FrozenStorage<T, V>
{
  fn push(&mut self, interval: Interval<T>, value: V) {
    debug_assert!(self.entries.last().map_or(true, |(last, _)| last.upper() < interval.lower()),
      "Entries must be pushed in ascending order.");
    self.entries.push((interval, value));
  }
}
