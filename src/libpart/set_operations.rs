// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Streaming algorithms over sorted sequences of disjoint intervals.
//!
//! Every source is read through a [`Sequence`](../storage/trait.Sequence.html) cursor, so that sets backed by any storage can be mixed. Intersection and union of `k` sources are computed in a single pass driven by a binary heap holding one mark per source, each step costing `O(log k)` plus the bisection used to skip the intervals that can no longer contribute.

use std::cmp::{max, Reverse};
use std::collections::BinaryHeap;
use std::iter::FusedIterator;

use crate::atomic::{Atomic, Interval};
use crate::mark::Mark;
use crate::mark::Value::*;
use crate::storage::{Cursor, Sequence};

/// An interval starting at `lower` can be glued to an interval ending at `upper`.
pub(crate) fn joinable<T: PartialOrd>(upper: &Mark<T>, lower: &Mark<T>) -> bool {
  lower <= upper || lower.near(upper)
}

/// Sorts the intervals by lower mark and merges the overlapping or adjacent ones.
pub fn normalize<T, I>(atomics: I) -> Vec<Interval<T>> where
  T: PartialOrd,
  I: IntoIterator<Item = Atomic<T>>
{
  let mut intervals: Vec<Interval<T>> = atomics.into_iter()
    .filter_map(Atomic::into_interval)
    .collect();
  intervals.sort_by(|a, b| a.lower().cmp(b.lower()));
  let mut merged: Vec<Interval<T>> = Vec::with_capacity(intervals.len());
  for interval in intervals {
    match merged.last_mut() {
      Some(last) if joinable(last.upper(), interval.lower()) => {
        let (_, upper) = interval.into_marks();
        last.extend_upper(upper);
      }
      _ => merged.push(interval)
    }
  }
  merged
}

type Cursors<'a, T> = Vec<Box<dyn Cursor<'a, T, ()> + 'a>>;

/// Lazy intersection of several sets.
pub struct IntersectionIter<'a, T> {
  cursors: Cursors<'a, T>,
  // current upper mark of each source
  heap: BinaryHeap<Reverse<(&'a Mark<T>, usize)>>,
  // greatest current lower mark, `None` once a source is exhausted
  max_inf: Option<&'a Mark<T>>
}

impl<'a, T: PartialOrd + 'a> IntersectionIter<'a, T> {
  pub fn new(sources: &[&'a dyn Sequence<T>]) -> IntersectionIter<'a, T> {
    let mut cursors = Vec::with_capacity(sources.len());
    let mut uppers = Vec::with_capacity(sources.len());
    let mut max_inf: Option<&'a Mark<T>> = None;
    let mut exhausted = sources.is_empty();
    for (index, &source) in sources.iter().enumerate() {
      let cursor = source.cursor(None);
      match cursor.get() {
        Some((interval, _)) => {
          uppers.push(Reverse((interval.upper(), index)));
          max_inf = Some(max_inf.map_or(interval.lower(), |inf| max(inf, interval.lower())));
        }
        None => exhausted = true
      }
      cursors.push(cursor);
    }
    if exhausted {
      max_inf = None;
    }
    IntersectionIter { cursors, heap: BinaryHeap::from(uppers), max_inf }
  }
}

impl<'a, T: PartialOrd + Clone + 'a> Iterator for IntersectionIter<'a, T>
{
  type Item = Interval<T>;

  fn next(&mut self) -> Option<Interval<T>> {
    loop {
      let max_inf = self.max_inf.take()?;
      let (sup, index) = match self.heap.peek() {
        Some(Reverse(top)) => *top,
        None => return None
      };
      let emitted = if max_inf <= sup {
        Some(Interval::from_marks(max_inf.clone(), sup.clone()))
      }
      else {
        None
      };
      let cursor = &mut self.cursors[index];
      cursor.advance();
      cursor.skip_to(&Mark::probe(max_inf.value().clone()));
      if let Some((interval, _)) = cursor.get() {
        self.max_inf = Some(max(max_inf, interval.lower()));
        if let Some(mut top) = self.heap.peek_mut() {
          *top = Reverse((interval.upper(), index));
        }
      }
      if emitted.is_some() {
        return emitted;
      }
    }
  }
}

impl<'a, T: PartialOrd + Clone + 'a> FusedIterator for IntersectionIter<'a, T> {}

/// Lazy union of several sets.
pub struct UnionIter<'a, T> {
  cursors: Cursors<'a, T>,
  // current lower mark of each non-exhausted source
  heap: BinaryHeap<Reverse<(&'a Mark<T>, usize)>>,
  // pending interval, extended until a gap is found
  run: Option<(&'a Mark<T>, &'a Mark<T>)>
}

impl<'a, T: PartialOrd + 'a> UnionIter<'a, T> {
  pub fn new(sources: &[&'a dyn Sequence<T>]) -> UnionIter<'a, T> {
    let mut cursors = Vec::with_capacity(sources.len());
    let mut lowers = Vec::with_capacity(sources.len());
    for (index, &source) in sources.iter().enumerate() {
      let cursor = source.cursor(None);
      if let Some((interval, _)) = cursor.get() {
        lowers.push(Reverse((interval.lower(), index)));
      }
      cursors.push(cursor);
    }
    UnionIter { cursors, heap: BinaryHeap::from(lowers), run: None }
  }
}

impl<'a, T: PartialOrd + Clone + 'a> Iterator for UnionIter<'a, T>
{
  type Item = Interval<T>;

  fn next(&mut self) -> Option<Interval<T>> {
    loop {
      let index = match self.heap.peek() {
        Some(Reverse((_, index))) => *index,
        None => {
          return self.run.take()
            .map(|(lower, upper)| Interval::from_marks(lower.clone(), upper.clone()));
        }
      };
      let cursor = &mut self.cursors[index];
      let (inf, sup) = match cursor.get() {
        Some((interval, _)) => (interval.lower(), interval.upper()),
        None => {
          self.heap.pop();
          continue;
        }
      };
      let (flushed, run) = match self.run {
        Some((min_inf, max_sup)) if joinable(max_sup, inf) => (None, (min_inf, max(max_sup, sup))),
        run => (run, (inf, sup))
      };
      self.run = Some(run);
      cursor.advance();
      cursor.skip_to(&Mark::probe(run.1.value().clone()));
      match cursor.get() {
        Some((interval, _)) => {
          if let Some(mut top) = self.heap.peek_mut() {
            *top = Reverse((interval.lower(), index));
          }
        }
        None => {
          self.heap.pop();
        }
      }
      if let Some((lower, upper)) = flushed {
        return Some(Interval::from_marks(lower.clone(), upper.clone()));
      }
    }
  }
}

impl<'a, T: PartialOrd + Clone + 'a> FusedIterator for UnionIter<'a, T> {}

/// The gaps between sorted disjoint intervals, including the two outer half-lines.
pub fn complement<'a, T, I>(intervals: I) -> Vec<Interval<T>> where
  T: PartialOrd + Clone + 'a,
  I: IntoIterator<Item = &'a Interval<T>>
{
  let mut gaps = vec![];
  let mut lower = Mark::lower(NegInfinity, false);
  for interval in intervals {
    gaps.extend(Interval::span(lower, interval.lower().adjacent_upper()));
    lower = interval.upper().adjacent_lower();
  }
  gaps.extend(Interval::span(lower, Mark::upper(PosInfinity, false)));
  gaps
}

/// Stored entries overlapping a query interval, see `IntervalSet::select`.
pub struct Select<'a, T, V> {
  state: Option<(Box<dyn Cursor<'a, T, V> + 'a>, Interval<T>)>,
  strict: bool
}

impl<'a, T: PartialOrd + Clone + 'a, V: 'a> Select<'a, T, V> {
  pub(crate) fn new(source: &'a dyn Sequence<T, V>, query: &Atomic<T>, strict: bool) -> Select<'a, T, V> {
    let state = query.as_interval().map(|query| {
      let mut cursor = source.cursor(Some(query.lower()));
      if strict {
        if let Some((interval, _)) = cursor.get() {
          if interval.lower() < query.lower() {
            cursor.advance();
          }
        }
      }
      (cursor, query.clone())
    });
    Select { state, strict }
  }
}

impl<'a, T: PartialOrd + 'a, V: 'a> Iterator for Select<'a, T, V>
{
  type Item = (&'a Interval<T>, &'a V);

  fn next(&mut self) -> Option<(&'a Interval<T>, &'a V)> {
    let (cursor, query) = self.state.as_mut()?;
    let found = cursor.get().filter(|(interval, _)| interval.lower() <= query.upper());
    let last = match found {
      Some(entry) if entry.0.upper() <= query.upper() => {
        cursor.advance();
        return Some(entry);
      }
      Some(entry) if !self.strict => Some(entry),
      _ => None
    };
    self.state = None;
    last
  }
}

impl<'a, T: PartialOrd + 'a, V: 'a> FusedIterator for Select<'a, T, V> {}

/// Every interval of `this` lies inside an interval of `other`.
pub fn is_subset<'a, T, V, W>(this: &'a dyn Sequence<T, V>, other: &'a dyn Sequence<T, W>) -> bool where
  T: PartialOrd + 'a,
  V: 'a,
  W: 'a
{
  let mut cursor = other.cursor(None);
  this.entries().all(|(interval, _)| {
    cursor.skip_to(interval.lower());
    match cursor.get() {
      Some((cover, _)) => cover.lower() <= interval.lower() && interval.upper() <= cover.upper(),
      None => false
    }
  })
}
