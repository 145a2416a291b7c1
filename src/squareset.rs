// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A set of squares, packed into a single 64-bit word. Square A1 occupies the
//! least significant bit and H8 the most significant.

use std::fmt;
use std::iter::FromIterator;
use std::ops;

use crate::types::{Square, TableIndex, FILES, RANKS};

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SquareSet {
    bits: u64,
}

impl SquareSet {
    pub const fn none() -> SquareSet {
        SquareSet { bits: 0 }
    }

    pub const fn all() -> SquareSet {
        SquareSet { bits: !0 }
    }

    pub fn insert(&mut self, square: Square) {
        self.bits |= 1u64 << square.as_index();
    }

    pub fn remove(&mut self, square: Square) {
        self.bits &= !(1u64 << square.as_index());
    }

    pub fn contains(self, square: Square) -> bool {
        self.bits & (1u64 << square.as_index()) != 0
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// The lowest-indexed square in the set, if any.
    pub fn first(self) -> Option<Square> {
        if self.bits == 0 {
            None
        } else {
            Some(Square::from_index(self.bits.trailing_zeros() as usize))
        }
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter { bits: self.bits }
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> SquareSet {
        let mut set = SquareSet::none();
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl ops::BitAnd for SquareSet {
    type Output = SquareSet;

    fn bitand(self, rhs: SquareSet) -> SquareSet {
        SquareSet {
            bits: self.bits & rhs.bits,
        }
    }
}

impl ops::BitAndAssign for SquareSet {
    fn bitand_assign(&mut self, rhs: SquareSet) {
        self.bits &= rhs.bits;
    }
}

impl ops::BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet {
            bits: self.bits | rhs.bits,
        }
    }
}

impl ops::BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.bits |= rhs.bits;
    }
}

impl ops::BitXor for SquareSet {
    type Output = SquareSet;

    fn bitxor(self, rhs: SquareSet) -> SquareSet {
        SquareSet {
            bits: self.bits ^ rhs.bits,
        }
    }
}

impl ops::BitXorAssign for SquareSet {
    fn bitxor_assign(&mut self, rhs: SquareSet) {
        self.bits ^= rhs.bits;
    }
}

impl ops::Not for SquareSet {
    type Output = SquareSet;

    fn not(self) -> SquareSet {
        SquareSet { bits: !self.bits }
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SquareSet({:#018x})", self.bits)
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                if self.contains(Square::of(rank, file)) {
                    write!(f, " 1 ")?;
                } else {
                    write!(f, " . ")?;
                }
            }
            writeln!(f, "| {}", rank)?;
        }
        for _ in &FILES {
            write!(f, "---")?;
        }
        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }
        writeln!(f)
    }
}

pub struct SquareSetIter {
    bits: u64,
}

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }
        let next = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(Square::from_index(next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for SquareSetIter {}
