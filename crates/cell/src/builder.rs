use std::sync::Arc;

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec, view::BitView};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::{Cell, CellError, CellStore, MAX_DATA_BITS, MAX_REFS};

/// Write cursor accumulating data bits and references for a single cell.
///
/// Created with [`Cell::builder()`], consumed by
/// [`into_cell`](CellBuilder::into_cell). Appends that would exceed the cell
/// capacity fail with [`CellError::BitsOverflow`] or
/// [`CellError::RefsOverflow`]; a value too large for one cell is never
/// truncated or auto-split across siblings.
#[derive(Debug)]
pub struct CellBuilder {
    data: BitVec<u8, Msb0>,
    references: Vec<Arc<Cell>>,
}

impl CellBuilder {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            data: BitVec::EMPTY,
            references: Vec::new(),
        }
    }

    #[inline]
    pub fn bits_left(&self) -> usize {
        MAX_DATA_BITS - self.data.len()
    }

    #[inline]
    pub fn refs_left(&self) -> usize {
        MAX_REFS - self.references.len()
    }

    #[inline]
    fn ensure_bits(&self, appended: usize) -> Result<(), CellError> {
        if self.data.len() + appended > MAX_DATA_BITS {
            return Err(CellError::BitsOverflow {
                len: self.data.len(),
                appended,
            });
        }
        Ok(())
    }

    pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self, CellError> {
        self.ensure_bits(1)?;
        self.data.push(bit);
        Ok(self)
    }

    pub fn store_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<&mut Self, CellError> {
        self.ensure_bits(bits.len())?;
        self.data.extend_from_bitslice(bits);
        Ok(self)
    }

    /// Append `value` as a fixed-width big-endian unsigned integer.
    pub fn store_uint(&mut self, value: u64, bits: usize) -> Result<&mut Self, CellError> {
        assert!(bits <= 64, "store_uint supports at most 64 bits");
        if bits < 64 && value >> bits != 0 {
            return Err(CellError::IntOverflow { bits });
        }
        let bytes = value.to_be_bytes();
        let all = bytes.view_bits::<Msb0>();
        self.store_bits(&all[64 - bits..])
    }

    /// Append `value` as a fixed-width big-endian two's-complement integer.
    pub fn store_int(&mut self, value: i64, bits: usize) -> Result<&mut Self, CellError> {
        assert!(bits >= 1 && bits <= 64, "store_int supports 1..=64 bits");
        if bits < 64 {
            let bound = 1i64 << (bits - 1);
            if value < -bound || value >= bound {
                return Err(CellError::IntOverflow { bits });
            }
        }
        let bytes = value.to_be_bytes();
        let all = bytes.view_bits::<Msb0>();
        self.store_bits(&all[64 - bits..])
    }

    /// Append an unsigned big integer left-padded to `bits` bits.
    pub fn store_uint_big(&mut self, value: &BigUint, bits: usize) -> Result<&mut Self, CellError> {
        let used = value.bits() as usize;
        if used > bits {
            return Err(CellError::IntOverflow { bits });
        }
        self.ensure_bits(bits)?;
        let bytes = value.to_bytes_be();
        let all = bytes.view_bits::<Msb0>();
        self.data.resize(self.data.len() + (bits - used), false);
        self.data.extend_from_bitslice(&all[all.len() - used..]);
        Ok(self)
    }

    pub fn store_bytes(&mut self, bytes: impl AsRef<[u8]>) -> Result<&mut Self, CellError> {
        self.store_bits(bytes.as_ref().view_bits::<Msb0>())
    }

    /// `VarUInteger 16` ("Coins"/"Grams") with the minimal byte length:
    /// value 0 is encoded as length nibble 0 with no bytes.
    pub fn store_coins(&mut self, value: &BigUint) -> Result<&mut Self, CellError> {
        let bytes = if value.is_zero() {
            // BigUint::to_bytes_be() returns [0] instead of []
            Vec::new()
        } else {
            value.to_bytes_be()
        };
        if bytes.len() > 15 {
            return Err(CellError::CoinsOverflow);
        }
        self.store_uint(bytes.len() as u64, 4)?.store_bytes(bytes)
    }

    /// Append a finalized child cell as a reference.
    pub fn store_ref(&mut self, cell: impl Into<Arc<Cell>>) -> Result<&mut Self, CellError> {
        if self.references.len() == MAX_REFS {
            return Err(CellError::RefsOverflow);
        }
        self.references.push(cell.into());
        Ok(self)
    }

    /// Store a value using its [`CellStore`] implementation.
    #[inline]
    pub fn store<T>(&mut self, value: &T) -> Result<&mut Self, CellError>
    where
        T: CellStore + ?Sized,
    {
        value.store(self)?;
        Ok(self)
    }

    /// Encode a value into a fresh child cell and append that cell as a
    /// reference.
    pub fn store_as_ref<T>(&mut self, value: &T) -> Result<&mut Self, CellError>
    where
        T: CellStore + ?Sized,
    {
        let mut child = Self::new();
        child.store(value)?;
        self.store_ref(child.into_cell())
    }

    /// Finalize into an immutable [`Cell`].
    #[inline]
    #[must_use]
    pub fn into_cell(self) -> Cell {
        Cell {
            data: self.data,
            references: self.references,
        }
    }
}

#[cfg(test)]
mod tests {
    use bitvec::bitvec;
    use rstest::rstest;

    use super::*;

    #[test]
    fn bits_capacity() {
        let mut b = Cell::builder();
        b.store_bits(&bitvec![u8, Msb0; 0; MAX_DATA_BITS]).unwrap();
        assert_eq!(b.bits_left(), 0);
        assert_eq!(
            b.store_bit(true).unwrap_err(),
            CellError::BitsOverflow {
                len: MAX_DATA_BITS,
                appended: 1
            }
        );
    }

    #[test]
    fn refs_capacity() {
        let mut b = Cell::builder();
        for _ in 0..MAX_REFS {
            b.store_ref(Cell::default()).unwrap();
        }
        assert_eq!(
            b.store_ref(Cell::default()).unwrap_err(),
            CellError::RefsOverflow
        );
    }

    #[test]
    fn uint_range_checked() {
        let mut b = Cell::builder();
        assert_eq!(
            b.store_uint(0x10, 4).unwrap_err(),
            CellError::IntOverflow { bits: 4 }
        );
        assert_eq!(
            b.store_int(128, 8).unwrap_err(),
            CellError::IntOverflow { bits: 8 }
        );
        b.store_int(-128, 8).unwrap();
    }

    #[rstest]
    #[case(0u64, 0)]
    #[case(1, 1)]
    #[case(255, 1)]
    #[case(256, 2)]
    #[case(1_000_000_000, 4)]
    #[case(u64::MAX, 8)]
    fn coins_minimal_length(#[case] value: u64, #[case] len: u64) {
        let mut b = Cell::builder();
        b.store_coins(&value.into()).unwrap();
        let cell = b.into_cell();
        assert_eq!(cell.len() as u64, 4 + len * 8);

        let mut s = cell.slice();
        assert_eq!(s.load_uint(4).unwrap(), len);
        assert_eq!(s.load_uint_big(len as usize * 8).unwrap(), value.into());
    }

    #[test]
    fn coins_too_large() {
        let mut b = Cell::builder();
        let too_big = BigUint::from(1u8) << 120usize;
        b.store_coins(&too_big).unwrap();
        let mut b = Cell::builder();
        let way_too_big = BigUint::from(1u8) << 121usize;
        assert_eq!(
            b.store_coins(&way_too_big).unwrap_err(),
            CellError::CoinsOverflow
        );
    }

    #[test]
    fn uint_big_padded() {
        let mut b = Cell::builder();
        b.store_uint_big(&BigUint::from(1u8), 256).unwrap();
        let cell = b.into_cell();
        assert_eq!(cell.len(), 256);
        assert_eq!(cell.slice().load_uint_big(256).unwrap(), BigUint::from(1u8));
    }

    #[test]
    fn store_as_ref_builds_child() {
        let mut b = Cell::builder();
        b.store_as_ref(&0xAABB_u16).unwrap();
        let cell = b.into_cell();
        assert_eq!(cell.len(), 0);
        assert_eq!(cell.references().len(), 1);
        assert_eq!(cell.references()[0].parse_fully::<u16>().unwrap(), 0xAABB);
    }
}
