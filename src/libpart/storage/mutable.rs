// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use crate::atomic::Interval;
use crate::mark::Mark;
use crate::storage::{Cursor, Sequence, Storage};

type Entries<T, V> = BTreeMap<Mark<T>, (Interval<T>, V)>;

/// Storage backed by a B-tree keyed by the lower mark of each entry.
#[derive(Clone, Debug)]
pub struct MutableStorage<T, V = ()> {
  entries: Entries<T, V>
}

impl<T, V> Default for MutableStorage<T, V>
{
  fn default() -> MutableStorage<T, V> {
    MutableStorage { entries: BTreeMap::new() }
  }
}

/// First entry whose upper mark is not below `mark`.
fn lower_bound<'a, T: PartialOrd, V>(entries: &'a Entries<T, V>, mark: &Mark<T>) -> Option<&'a (Interval<T>, V)> {
  // Only the last entry starting at or before `mark` may still reach it.
  if let Some((_, entry)) = entries.range(..=mark).next_back() {
    if entry.0.upper() >= mark {
      return Some(entry);
    }
  }
  entries.range((Excluded(mark), Unbounded)).next().map(|(_, entry)| entry)
}

impl<T: PartialOrd, V> MutableStorage<T, V> {
  /// Mutable access to the value of the entry enclosing `key`.
  pub(crate) fn get_mut(&mut self, key: &Interval<T>) -> Option<&mut V> {
    self.entries.range_mut(..=key.lower()).next_back()
      .map(|(_, entry)| entry)
      .filter(|entry| entry.0.upper() >= key.upper())
      .map(|entry| &mut entry.1)
  }

  pub(crate) fn pop_first(&mut self) -> Option<(Interval<T>, V)> {
    self.entries.pop_first().map(|(_, entry)| entry)
  }

  pub(crate) fn clear(&mut self) {
    self.entries.clear();
  }
}

impl<T: PartialOrd + Clone, V> MutableStorage<T, V> {
  // precondition: `interval` does not overlap any stored interval.
  pub(crate) fn insert(&mut self, interval: Interval<T>, value: V) {
    self.entries.insert(interval.lower().clone(), (interval, value));
  }
}

impl<T: PartialOrd + Clone, V: Clone> MutableStorage<T, V> {
  /// Removes the range covered by `key`. Entries straddling a bound of `key` are cut and keep their value on the outer side. Returns the number of entries touched.
  pub(crate) fn splice(&mut self, key: &Interval<T>) -> usize {
    let touched: Vec<Mark<T>> = match lower_bound(&self.entries, key.lower()) {
      Some((start, _)) => self.entries.range(start.lower()..)
        .take_while(|(lower, _)| *lower <= key.upper())
        .map(|(lower, _)| lower.clone())
        .collect(),
      None => vec![]
    };
    let mut remainders = vec![];
    for lower in &touched {
      if let Some((interval, value)) = self.entries.remove(lower) {
        let left = Interval::span(interval.lower().clone(), key.lower().adjacent_upper());
        let right = Interval::span(key.upper().adjacent_lower(), interval.upper().clone());
        if let Some(left) = left {
          remainders.push((left, value.clone()));
        }
        if let Some(right) = right {
          remainders.push((right, value));
        }
      }
    }
    log::trace!("splice removed {} entries and kept {} remainders", touched.len(), remainders.len());
    for (interval, value) in remainders {
      self.insert(interval, value);
    }
    touched.len()
  }
}

struct MapCursor<'a, T, V> {
  entries: &'a Entries<T, V>,
  current: Option<&'a (Interval<T>, V)>
}

impl<'a, T: PartialOrd, V> Cursor<'a, T, V> for MapCursor<'a, T, V>
{
  fn get(&self) -> Option<(&'a Interval<T>, &'a V)> {
    self.current.map(|(interval, value)| (interval, value))
  }

  fn advance(&mut self) {
    if let Some((interval, _)) = self.current {
      self.current = self.entries.range((Excluded(interval.lower()), Unbounded))
        .next()
        .map(|(_, entry)| entry);
    }
  }

  fn skip_to(&mut self, mark: &Mark<T>) {
    if let Some((interval, _)) = self.current {
      if interval.upper() < mark {
        self.current = lower_bound(self.entries, mark);
      }
    }
  }
}

impl<T: PartialOrd, V> Sequence<T, V> for MutableStorage<T, V>
{
  fn len(&self) -> usize {
    self.entries.len()
  }

  fn cursor<'a>(&'a self, from: Option<&Mark<T>>) -> Box<dyn Cursor<'a, T, V> + 'a>
    where T: 'a, V: 'a
  {
    let current = match from {
      Some(mark) => lower_bound(&self.entries, mark),
      None => self.entries.values().next()
    };
    Box::new(MapCursor { entries: &self.entries, current })
  }

  fn entries<'a>(&'a self) -> Box<dyn DoubleEndedIterator<Item = (&'a Interval<T>, &'a V)> + 'a>
    where T: 'a, V: 'a
  {
    Box::new(self.entries.values().map(|(interval, value)| (interval, value)))
  }
}

impl<T: PartialOrd + Clone, V> Storage<T, V> for MutableStorage<T, V>
{
  fn push(&mut self, interval: Interval<T>, value: V) {
    self.insert(interval, value);
  }
}
