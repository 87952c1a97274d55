// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Each macro forwards an operator taking operands by value to the implementation on references.
// The generic parameters and their bounds are given between brackets, for instance:
//   forward_all_binop!([T] [T: PartialOrd + Clone] BitOr, bitor, Atomic<T>, Atomic<T> => FrozenIntervalSet<T>);

macro_rules! forward_val_val_binop {
  ([$($gen:tt)*] [$($bounds:tt)*] $imp:ident, $method:ident, $res:ty, $arg:ty => $out:ty) => {
    impl<$($gen)*> $imp<$arg> for $res where $($bounds)* {
      type Output = $out;

      fn $method(self, other: $arg) -> $out {
        (&self).$method(&other)
      }
    }
  }
}

macro_rules! forward_ref_val_binop {
  ([$($gen:tt)*] [$($bounds:tt)*] $imp:ident, $method:ident, $res:ty, $arg:ty => $out:ty) => {
    impl<'a, $($gen)*> $imp<$arg> for &'a $res where $($bounds)* {
      type Output = $out;

      fn $method(self, other: $arg) -> $out {
        self.$method(&other)
      }
    }
  }
}

macro_rules! forward_val_ref_binop {
  ([$($gen:tt)*] [$($bounds:tt)*] $imp:ident, $method:ident, $res:ty, $arg:ty => $out:ty) => {
    impl<'b, $($gen)*> $imp<&'b $arg> for $res where $($bounds)* {
      type Output = $out;

      fn $method(self, other: &'b $arg) -> $out {
        (&self).$method(other)
      }
    }
  }
}

macro_rules! forward_all_binop {
  ([$($gen:tt)*] [$($bounds:tt)*] $imp:ident, $method:ident, $res:ty, $arg:ty => $out:ty) => {
    forward_val_val_binop!([$($gen)*] [$($bounds)*] $imp, $method, $res, $arg => $out);
    forward_ref_val_binop!([$($gen)*] [$($bounds)*] $imp, $method, $res, $arg => $out);
    forward_val_ref_binop!([$($gen)*] [$($bounds)*] $imp, $method, $res, $arg => $out);
  };
}

// Compound assignment from the by-value operand, forwarding to the reference implementation.
macro_rules! forward_val_assign_op {
  ([$($gen:tt)*] [$($bounds:tt)*] $imp:ident, $method:ident, $res:ty, $arg:ty) => {
    impl<$($gen)*> $imp<$arg> for $res where $($bounds)* {
      fn $method(&mut self, other: $arg) {
        self.$method(&other)
      }
    }
  }
}
