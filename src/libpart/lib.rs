// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This library provides intervals over any totally ordered type, sets of disjoint intervals and dictionaries keyed by disjoint intervals. Bounds are open or closed, finite or infinite, and a set always keeps a unique normalized representation.
//!
//! Interval sets and dictionaries come in two flavours sharing the same algorithms: a frozen one backed by a sorted vector, hashable, and a mutable one backed by a B-tree. The set operations of [`gcollections`](https://docs.rs/gcollections) are implemented on all of them, and the operations taking several operands are computed in a single streaming pass.
//!
//! # Examples
//!
//! For examples see the [atomic module](atomic/index.html), the [interval set module](interval_set/index.html) or the [interval dict module](interval_dict/index.html).
//!
//! # References
//! * [Boost Interval Container Library](http://www.boost.org/doc/libs/1_57_0/libs/icl/doc/html/index.html)
//! * [Allen's interval algebra](https://en.wikipedia.org/wiki/Allen%27s_interval_algebra)
//!

#![crate_name = "part"]

#[macro_use]
mod macros;

pub mod mark;
pub mod atomic;
pub mod ops;
pub mod error;
pub mod storage;
pub mod set_operations;
pub mod interval_set;
pub mod interval_dict;
pub mod update;

pub use atomic::{Atomic, Interval, ToAtomic};
pub use error::Error;
pub use interval_dict::{FrozenIntervalDict, IntervalDict, MutableIntervalDict};
pub use interval_set::{FrozenIntervalSet, IntervalSet, MutableIntervalSet};
pub use mark::{Mark, Openness, Value};
pub use storage::{FrozenStorage, MutableStorage, Sequence, Storage};
pub use update::{DictOptions, UpdateStrategy};
