// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::atomic::Atomic;
use crate::mark::Value;

/// Errors raised by interval construction and interval-keyed lookups.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error<T> {
  /// The bounds of an interval cannot be ordered against each other (NaN bounds for instance).
  #[error("interval bounds {lower} and {upper} are not comparable")]
  NotComparable { lower: Value<T>, upper: Value<T> },
  #[error("key {0} not found")]
  KeyNotFound(Atomic<T>),
}
