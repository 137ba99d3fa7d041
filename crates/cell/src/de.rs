use std::sync::Arc;

use either::Either;

use crate::{Cell, CellError, CellSlice};

/// A type with a fixed TL-B layout that can be read from a [`CellSlice`].
pub trait CellLoad: Sized {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError>;
}

impl CellLoad for () {
    #[inline]
    fn load(_slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(())
    }
}

impl CellLoad for bool {
    #[inline]
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        slice.load_bit()
    }
}

macro_rules! impl_cell_load_for_uint {
    ($($t:ty)+) => {$(
        impl CellLoad for $t {
            #[inline]
            fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
                slice.load_uint(<$t>::BITS as usize).map(|v| v as $t)
            }
        }
    )+};
}
impl_cell_load_for_uint! { u8 u16 u32 u64 }

macro_rules! impl_cell_load_for_int {
    ($($t:ty)+) => {$(
        impl CellLoad for $t {
            #[inline]
            fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
                slice.load_int(<$t>::BITS as usize).map(|v| v as $t)
            }
        }
    )+};
}
impl_cell_load_for_int! { i8 i16 i32 i64 }

impl<const N: usize> CellLoad for [u8; N] {
    #[inline]
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        slice.load_bytes()
    }
}

/// Boxed (`^T`) field: the value lives in the next referenced child cell.
/// Trailing bits or references in the child are permitted.
impl<T> CellLoad for Box<T>
where
    T: CellLoad,
{
    #[inline]
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        slice.parse_ref().map(Box::new)
    }
}

/// `^Cell`: the next referenced cell, taken as-is.
impl CellLoad for Arc<Cell> {
    #[inline]
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        slice.load_ref().map(Arc::clone)
    }
}

/// [Maybe](https://docs.ton.org/develop/data-formats/tl-b-types#maybe):
/// 1 flag bit, then `T` if set.
impl<T> CellLoad for Option<T>
where
    T: CellLoad,
{
    #[inline]
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(if slice.load_bit()? {
            Some(slice.parse()?)
        } else {
            None
        })
    }
}

/// [Either](https://docs.ton.org/develop/data-formats/tl-b-types#either):
/// 1 discriminator bit, `0` selects `L`, `1` selects `R`. Whether either arm
/// is inline or boxed is chosen per call site through the payload types.
impl<L, R> CellLoad for Either<L, R>
where
    L: CellLoad,
    R: CellLoad,
{
    #[inline]
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(match slice.load_bit()? {
            false => Either::Left(slice.parse()?),
            true => Either::Right(slice.parse()?),
        })
    }
}
