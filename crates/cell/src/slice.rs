use std::sync::Arc;

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec, view::BitView};
use num_bigint::BigUint;

use crate::{Cell, CellError, CellLoad};

/// Read cursor over one cell's data bits and references.
///
/// The position only ever advances. Descending into a reference with
/// [`load_ref_slice`](CellSlice::load_ref_slice) yields an independent cursor
/// rooted at the child cell; the parent keeps its own remaining bits and
/// references.
#[derive(Clone)]
pub struct CellSlice<'a> {
    data: &'a BitSlice<u8, Msb0>,
    references: &'a [Arc<Cell>],
}

impl<'a> CellSlice<'a> {
    #[inline]
    pub(crate) const fn new(data: &'a BitSlice<u8, Msb0>, references: &'a [Arc<Cell>]) -> Self {
        Self { data, references }
    }

    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn remaining_refs(&self) -> usize {
        self.references.len()
    }

    /// Returns whether this cursor has no more bits and references.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining_bits() == 0 && self.remaining_refs() == 0
    }

    /// Returns an error if any bits or references were left unconsumed.
    #[inline]
    pub fn ensure_empty(&self) -> Result<(), CellError> {
        if !self.is_empty() {
            return Err(CellError::TrailingData {
                bits: self.remaining_bits(),
                refs: self.remaining_refs(),
            });
        }
        Ok(())
    }

    #[inline]
    fn take_bits(&mut self, n: usize) -> Result<&'a BitSlice<u8, Msb0>, CellError> {
        if self.data.len() < n {
            return Err(CellError::BitsUnderflow {
                requested: n,
                left: self.data.len(),
            });
        }
        let (head, rest) = self.data.split_at(n);
        self.data = rest;
        Ok(head)
    }

    #[inline]
    fn fold_uint(bits: &BitSlice<u8, Msb0>) -> u64 {
        bits.iter()
            .by_vals()
            .fold(0, |acc, bit| (acc << 1) | bit as u64)
    }

    /// Look at the next `bits` (≤ 64) without consuming them.
    pub fn peek_uint(&self, bits: usize) -> Result<u64, CellError> {
        assert!(bits <= 64, "peek_uint supports at most 64 bits");
        if self.data.len() < bits {
            return Err(CellError::BitsUnderflow {
                requested: bits,
                left: self.data.len(),
            });
        }
        Ok(Self::fold_uint(&self.data[..bits]))
    }

    /// Whether at least `bits` bits remain and they start with `tag`.
    ///
    /// This is the constructor-dispatch guard: it never consumes and never
    /// fails, a too-short cursor simply does not match.
    #[inline]
    pub fn has_prefix(&self, tag: u64, bits: usize) -> bool {
        self.peek_uint(bits) == Ok(tag)
    }

    #[inline]
    pub fn load_bit(&mut self) -> Result<bool, CellError> {
        Ok(self.take_bits(1)?[0])
    }

    /// Consume a fixed-width big-endian unsigned integer (≤ 64 bits).
    pub fn load_uint(&mut self, bits: usize) -> Result<u64, CellError> {
        assert!(bits <= 64, "load_uint supports at most 64 bits");
        Ok(Self::fold_uint(self.take_bits(bits)?))
    }

    /// Consume a fixed-width big-endian integer (≤ 64 bits), sign-extended.
    pub fn load_int(&mut self, bits: usize) -> Result<i64, CellError> {
        assert!(bits >= 1 && bits <= 64, "load_int supports 1..=64 bits");
        let v = self.load_uint(bits)?;
        Ok(((v << (64 - bits)) as i64) >> (64 - bits))
    }

    /// Consume a fixed-width big-endian unsigned integer of arbitrary width.
    pub fn load_uint_big(&mut self, bits: usize) -> Result<BigUint, CellError> {
        let head = self.take_bits(bits)?;
        // left-pad to a byte boundary
        let mut padded = BitVec::<u8, Msb0>::repeat(false, (8 - bits % 8) % 8);
        padded.extend_from_bitslice(head);
        Ok(BigUint::from_bytes_be(padded.as_raw_slice()))
    }

    /// Consume `N` bytes.
    pub fn load_bytes<const N: usize>(&mut self) -> Result<[u8; N], CellError> {
        let head = self.take_bits(N * 8)?;
        let mut arr = [0u8; N];
        arr.view_bits_mut::<Msb0>().copy_from_bitslice(head);
        Ok(arr)
    }

    /// Consume `n` raw bits.
    pub fn load_bits(&mut self, n: usize) -> Result<BitVec<u8, Msb0>, CellError> {
        Ok(self.take_bits(n)?.to_bitvec())
    }

    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<(), CellError> {
        self.take_bits(n).map(drop)
    }

    /// `VarUInteger 16` ("Coins"/"Grams"): a 4-bit byte-length nibble
    /// followed by that many big-endian bytes. Non-minimal lengths are
    /// accepted on load.
    pub fn load_coins(&mut self) -> Result<BigUint, CellError> {
        let len = self.load_uint(4)? as usize;
        self.load_uint_big(len * 8)
    }

    /// Consume the next unconsumed reference.
    pub fn load_ref(&mut self) -> Result<&'a Arc<Cell>, CellError> {
        let (first, rest) = self
            .references
            .split_first()
            .ok_or(CellError::RefsUnderflow)?;
        self.references = rest;
        Ok(first)
    }

    /// Descend into the next unconsumed reference.
    #[inline]
    pub fn load_ref_slice(&mut self) -> Result<CellSlice<'a>, CellError> {
        Ok(self.load_ref()?.slice())
    }

    /// Parse a value using its [`CellLoad`] implementation.
    #[inline]
    pub fn parse<T>(&mut self) -> Result<T, CellError>
    where
        T: CellLoad,
    {
        T::load(self)
    }

    /// Parse a value from the next referenced cell. The child cursor is
    /// independent of this one; unconsumed bits or references left in the
    /// child are not an error.
    #[inline]
    pub fn parse_ref<T>(&mut self) -> Result<T, CellError>
    where
        T: CellLoad,
    {
        T::load(&mut self.load_ref_slice()?)
    }
}

#[cfg(test)]
mod tests {
    use crate::Cell;

    use super::*;

    fn cell_with_uint(value: u64, bits: usize) -> Cell {
        let mut b = Cell::builder();
        b.store_uint(value, bits).unwrap();
        b.into_cell()
    }

    #[test]
    fn load_uint() {
        let cell = cell_with_uint(0xDEAD, 16);
        assert_eq!(cell.slice().load_uint(16).unwrap(), 0xDEAD);
    }

    #[test]
    fn peek_does_not_consume() {
        let cell = cell_with_uint(0b1011, 4);
        let s = cell.slice();
        assert_eq!(s.peek_uint(2).unwrap(), 0b10);
        assert_eq!(s.peek_uint(4).unwrap(), 0b1011);
        assert_eq!(s.remaining_bits(), 4);
    }

    #[test]
    fn has_prefix_on_short_data() {
        let cell = cell_with_uint(0b10, 2);
        assert!(cell.slice().has_prefix(0b10, 2));
        assert!(!cell.slice().has_prefix(0b1000, 4));
    }

    #[test]
    fn load_int_sign_extends() {
        let mut b = Cell::builder();
        b.store_int(-1, 8).unwrap().store_int(-123, 16).unwrap();
        let cell = b.into_cell();
        let mut s = cell.slice();
        assert_eq!(s.load_int(8).unwrap(), -1);
        assert_eq!(s.load_int(16).unwrap(), -123);
    }

    #[test]
    fn underflow() {
        let cell = cell_with_uint(0xFF, 8);
        assert_eq!(
            cell.slice().load_uint(16),
            Err(CellError::BitsUnderflow {
                requested: 16,
                left: 8
            })
        );
        assert_eq!(cell.slice().load_ref().unwrap_err(), CellError::RefsUnderflow);
    }

    #[test]
    fn position_advances_monotonically() {
        let cell = cell_with_uint(0xAB_CD, 16);
        let mut s = cell.slice();
        s.skip(8).unwrap();
        assert_eq!(s.remaining_bits(), 8);
        assert_eq!(s.load_uint(8).unwrap(), 0xCD);
        assert!(s.is_empty());
    }

    #[test]
    fn load_uint_big_unaligned() {
        let mut b = Cell::builder();
        b.store_uint(0b101, 3).unwrap();
        let cell = b.into_cell();
        assert_eq!(
            cell.slice().load_uint_big(3).unwrap(),
            BigUint::from(0b101u8)
        );
    }

    #[test]
    fn accepts_non_minimal_coins() {
        let mut b = Cell::builder();
        // value 5 stretched to 2 bytes
        b.store_uint(2, 4).unwrap().store_uint(5, 16).unwrap();
        let cell = b.into_cell();
        assert_eq!(cell.slice().load_coins().unwrap(), BigUint::from(5u8));
    }

    #[test]
    fn descending_keeps_parent_state() {
        let mut child = Cell::builder();
        child.store_uint(0x0F, 8).unwrap();
        let mut b = Cell::builder();
        b.store_uint(0b1, 1)
            .unwrap()
            .store_ref(child.into_cell())
            .unwrap()
            .store_uint(0b0, 1)
            .unwrap();
        let cell = b.into_cell();

        let mut s = cell.slice();
        assert!(s.load_bit().unwrap());
        let mut sub = s.load_ref_slice().unwrap();
        assert_eq!(sub.load_uint(8).unwrap(), 0x0F);
        assert_eq!(s.remaining_bits(), 1);
        assert_eq!(s.remaining_refs(), 0);
        assert!(!s.load_bit().unwrap());
    }
}
