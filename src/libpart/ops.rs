// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Interval specific operations.
//!
//! The generic set operations (intersection, union, difference, complement, subset tests...) come from `gcollections::ops` and are implemented by atomics, interval sets and interval dictionaries.

/// Smallest convex value covering both operands.
pub trait Hull<RHS = Self>
{
  type Output;
  fn hull(&self, rhs: &RHS) -> Self::Output;
}

/// The value covering the whole ordered line.
pub trait Whole
{
  fn whole() -> Self;
}
