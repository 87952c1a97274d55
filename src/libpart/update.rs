// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Update disciplines of mutable interval dictionaries.
//!
//! A dictionary updated from other dictionaries either overwrites the covered ranges, or combines the existing and the incoming values with an operator. Two strategies combine values:
//!
//! * `Strict` applies the source entries one after the other. For each entry, the stored pieces overlapping its key are rewritten to `operator(existing, new)` and the uncovered parts of the key receive `new`.
//! * `Commutative` sweeps the dictionary and all the sources at once. Between two consecutive cuts, the values of the entries covering the segment are folded with the operator, the dictionary's value first and then the sources in the given order. The result is meaningful only when the operator is commutative and associative, which is not checked.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt::{Debug, Error as FmtError, Formatter};
use std::rc::Rc;

use crate::atomic::Interval;
use crate::mark::Mark;
use crate::storage::{Cursor, Sequence};

/// How an operator combines overlapping values during an update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UpdateStrategy {
  #[default]
  Strict,
  Commutative
}

/// The optional functions attached to a mutable dictionary.
pub struct DictOptions<V> {
  /// Builds the value stored on a missed lookup.
  pub default: Option<Rc<dyn Fn() -> V>>,
  /// Combines an existing value with an incoming one.
  pub operator: Option<Rc<dyn Fn(&V, &V) -> V>>,
  pub strategy: UpdateStrategy
}

impl<V> DictOptions<V> {
  pub fn new() -> DictOptions<V> {
    DictOptions { default: None, operator: None, strategy: UpdateStrategy::Strict }
  }
}

impl<V> Default for DictOptions<V>
{
  fn default() -> DictOptions<V> {
    DictOptions::new()
  }
}

impl<V> Clone for DictOptions<V>
{
  fn clone(&self) -> DictOptions<V> {
    DictOptions {
      default: self.default.clone(),
      operator: self.operator.clone(),
      strategy: self.strategy
    }
  }
}

impl<V> Debug for DictOptions<V>
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), FmtError> {
    formatter.debug_struct("DictOptions")
      .field("default", &self.default.is_some())
      .field("operator", &self.operator.is_some())
      .field("strategy", &self.strategy)
      .finish()
  }
}

/// Combines all the `sources` in a single pass. A segment covered by several entries gets the left fold of their values in source order; a segment covered by a single entry keeps its value.
pub(crate) fn commutative_sweep<'a, T, V>(sources: &[&'a dyn Sequence<T, V>], operator: &dyn Fn(&V, &V) -> V)
  -> Vec<(Interval<T>, V)> where
  T: PartialOrd + Clone + 'a,
  V: Clone + 'a
{
  let mut cursors: Vec<Box<dyn Cursor<'a, T, V> + 'a>> = sources.iter()
    .map(|source| source.cursor(None))
    .collect();
  // Lower marks of the next entry of each source.
  let mut starts: BinaryHeap<Reverse<(&'a Mark<T>, usize)>> = cursors.iter()
    .enumerate()
    .filter_map(|(index, cursor)| cursor.get().map(|(interval, _)| Reverse((interval.lower(), index))))
    .collect();
  // Lower marks just past the active entries.
  let mut ends: BinaryHeap<Reverse<(Mark<T>, usize)>> = BinaryHeap::new();
  let mut active: BTreeMap<usize, &'a V> = BTreeMap::new();
  let mut position: Option<Mark<T>> = None;
  let mut result = vec![];

  loop {
    let next_start = starts.peek().map(|Reverse((mark, _))| *mark);
    let next_end = ends.peek().map(|Reverse((mark, _))| mark);
    let cut = match (next_start, next_end) {
      (Some(start), Some(end)) => if start < end { start.clone() } else { end.clone() },
      (Some(start), None) => start.clone(),
      (None, Some(end)) => end.clone(),
      (None, None) => break
    };
    if let Some(lower) = position.take() {
      if let Some(segment) = Interval::span(lower, cut.adjacent_upper()) {
        let mut values = active.values();
        if let Some(first) = values.next() {
          let value = values.fold((*first).clone(), |acc, value| operator(&acc, value));
          result.push((segment, value));
        }
      }
    }
    while let Some(Reverse((mark, index))) = ends.peek() {
      if *mark != cut {
        break;
      }
      let index = *index;
      ends.pop();
      active.remove(&index);
      cursors[index].advance();
      if let Some((interval, _)) = cursors[index].get() {
        starts.push(Reverse((interval.lower(), index)));
      }
    }
    while let Some(&Reverse((mark, index))) = starts.peek() {
      if *mark != cut {
        break;
      }
      starts.pop();
      if let Some((interval, value)) = cursors[index].get() {
        active.insert(index, value);
        ends.push(Reverse((interval.upper().adjacent_lower(), index)));
      }
    }
    if !active.is_empty() {
      position = Some(cut);
    }
  }
  log::trace!("commutative sweep of {} sources emitted {} segments", sources.len(), result.len());
  result
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::atomic::ToAtomic;
  use crate::storage::{collect_storage, FrozenStorage};

  fn make_storage<V>(entries: Vec<((i32, i32), V)>) -> FrozenStorage<i32, V> {
    collect_storage(entries.into_iter()
      .map(|(key, value)| (key.to_atomic().unwrap().into_interval().unwrap(), value)))
  }

  fn render<V: std::fmt::Display>(entries: &[(Interval<i32>, V)]) -> String {
    entries.iter()
      .map(|(interval, value)| format!("{} {}", interval, value))
      .collect::<Vec<_>>()
      .join(", ")
  }

  fn sum(sources: &[&dyn Sequence<i32, i32>]) -> String {
    render(&commutative_sweep(sources, &|x: &i32, y: &i32| x + y))
  }

  fn concat(sources: &[&dyn Sequence<i32, String>]) -> String {
    render(&commutative_sweep(sources, &|x: &String, y: &String| format!("{}{}", x, y)))
  }

  #[test]
  fn test_sum_sweep() {
    let a: FrozenStorage<i32, i32> = make_storage(vec![((10, 15), 1), ((20, 25), 2), ((30, 35), 3)]);
    let b: FrozenStorage<i32, i32> = make_storage(vec![((15, 22), 4)]);
    let c: FrozenStorage<i32, i32> = make_storage(vec![]);
    let cases = vec![
      (1, sum(&[&a, &b]), "[10;15) 1, [15;20) 4, [20;22) 6, [22;25) 2, [30;35) 3"),
      (2, sum(&[&b, &a]), "[10;15) 1, [15;20) 4, [20;22) 6, [22;25) 2, [30;35) 3"),
      (3, sum(&[&a, &c]), "[10;15) 1, [20;25) 2, [30;35) 3"),
      (4, sum(&[&c]), ""),
      (5, sum(&[]), ""),
      (6, sum(&[&a, &a]), "[10;15) 2, [20;25) 4, [30;35) 6"),
    ];
    for (id, result, expected) in cases {
      assert_eq!(result, expected, "test #{} of commutative sweep", id);
    }
  }

  #[test]
  fn test_adjacent_entries() {
    let a: FrozenStorage<i32, i32> = make_storage(vec![((1, 5), 1), ((5, 10), 2)]);
    let b: FrozenStorage<i32, i32> = make_storage(vec![((3, 7), 10)]);
    assert_eq!(sum(&[&a, &b]), "[1;3) 1, [3;5) 11, [5;7) 12, [7;10) 2");
  }

  #[test]
  fn test_closed_bounds() {
    let a: FrozenStorage<i32, i32> = collect_storage(vec![
      ((0, 5, true, true).to_atomic().unwrap().into_interval().unwrap(), 1)
    ]);
    let b: FrozenStorage<i32, i32> = collect_storage(vec![
      ((5, 8, true, true).to_atomic().unwrap().into_interval().unwrap(), 2)
    ]);
    assert_eq!(sum(&[&a, &b]), "[0;5) 1, [5;5] 3, (5;8] 2");
  }

  #[test]
  fn test_source_order_fold() {
    let a = make_storage(vec![((0, 10), "a".to_string())]);
    let b = make_storage(vec![((5, 15), "b".to_string())]);
    let c = make_storage(vec![((8, 20), "c".to_string())]);
    let cases = vec![
      (1, concat(&[&a, &b, &c]), "[0;5) a, [5;8) ab, [8;10) abc, [10;15) bc, [15;20) c"),
      (2, concat(&[&c, &b, &a]), "[0;5) a, [5;8) ba, [8;10) cba, [10;15) cb, [15;20) c"),
    ];
    for (id, result, expected) in cases {
      assert_eq!(result, expected, "test #{} of source order", id);
    }
  }

  #[test]
  fn test_options() {
    let options: DictOptions<i32> = DictOptions::default();
    assert_eq!(options.strategy, UpdateStrategy::Strict);
    assert!(options.default.is_none());
    let options = DictOptions { operator: Some(Rc::new(|x: &i32, y: &i32| x + y)), ..options };
    let copy = options.clone();
    assert_eq!(copy.operator.map(|operator| operator(&1, &2)), Some(3));
    assert_eq!(format!("{:?}", options), "DictOptions { default: false, operator: true, strategy: Strict }");
  }
}
