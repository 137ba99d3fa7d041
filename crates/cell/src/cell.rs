use core::fmt::{self, Debug};
use std::sync::Arc;

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec};

use crate::{CellBuilder, CellError, CellLoad, CellSlice};

/// Maximum number of data bits a single [`Cell`] can hold.
pub const MAX_DATA_BITS: usize = 1023;

/// Maximum number of child references a single [`Cell`] can hold.
pub const MAX_REFS: usize = 4;

/// An immutable node of a bit-packed tree: up to [`MAX_DATA_BITS`] bits of
/// data plus up to [`MAX_REFS`] references to child cells.
///
/// Cells are created by [`CellBuilder::into_cell()`] and never mutated
/// afterwards, so a cell can be shared read-only between any number of
/// [`CellSlice`]s without locking.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub(crate) data: BitVec<u8, Msb0>,
    pub(crate) references: Vec<Arc<Cell>>,
}

impl Cell {
    /// Create new [`CellBuilder`]
    #[inline]
    #[must_use]
    pub const fn builder() -> CellBuilder {
        CellBuilder::new()
    }

    #[inline]
    pub fn data(&self) -> &BitSlice<u8, Msb0> {
        &self.data
    }

    #[inline]
    pub fn references(&self) -> &[Arc<Self>] {
        &self.references
    }

    /// Number of data bits
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether this cell has no data and zero references.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.references.is_empty()
    }

    /// Return a read cursor positioned at the start of this cell.
    #[inline]
    #[must_use]
    pub fn slice(&self) -> CellSlice<'_> {
        CellSlice::new(&self.data, &self.references)
    }

    /// Parse a value from the root of this cell. Trailing bits and
    /// references are permitted.
    #[inline]
    pub fn parse<T>(&self) -> Result<T, CellError>
    where
        T: CellLoad,
    {
        T::load(&mut self.slice())
    }

    /// Parse a value and require that it consumed the whole cell.
    #[inline]
    pub fn parse_fully<T>(&self) -> Result<T, CellError>
    where
        T: CellLoad,
    {
        let mut slice = self.slice();
        let v = slice.parse()?;
        slice.ensure_empty()?;
        Ok(v)
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}[0b", self.len())?;
            for bit in self.data.iter().by_vals() {
                write!(f, "{}", if bit { '1' } else { '0' })?;
            }
            write!(f, "]")?;
        } else {
            write!(
                f,
                "{}[0x{}]",
                self.len(),
                hex::encode_upper(self.data.as_raw_slice())
            )?;
        }
        if self.references.is_empty() {
            return Ok(());
        }
        write!(f, " -> ")?;
        f.debug_set().entries(&self.references).finish()
    }
}
