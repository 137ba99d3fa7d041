use std::sync::Arc;

use either::Either;

use crate::{Cell, CellBuilder, CellError};

/// A type with a fixed TL-B layout that can be written to a [`CellBuilder`].
pub trait CellStore {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError>;
}

/// Shortcut for encoding a value into its own cell.
pub trait CellStoreExt: CellStore {
    #[inline]
    fn to_cell(&self) -> Result<Cell, CellError> {
        let mut builder = Cell::builder();
        builder.store(self)?;
        Ok(builder.into_cell())
    }
}
impl<T> CellStoreExt for T where T: CellStore + ?Sized {}

impl<T> CellStore for &T
where
    T: CellStore + ?Sized,
{
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        (**self).store(builder)
    }
}

impl CellStore for () {
    #[inline]
    fn store(&self, _builder: &mut CellBuilder) -> Result<(), CellError> {
        Ok(())
    }
}

impl CellStore for bool {
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder.store_bit(*self)?;
        Ok(())
    }
}

macro_rules! impl_cell_store_for_uint {
    ($($t:ty)+) => {$(
        impl CellStore for $t {
            #[inline]
            fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
                builder.store_uint(*self as u64, <$t>::BITS as usize)?;
                Ok(())
            }
        }
    )+};
}
impl_cell_store_for_uint! { u8 u16 u32 u64 }

macro_rules! impl_cell_store_for_int {
    ($($t:ty)+) => {$(
        impl CellStore for $t {
            #[inline]
            fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
                builder.store_int(*self as i64, <$t>::BITS as usize)?;
                Ok(())
            }
        }
    )+};
}
impl_cell_store_for_int! { i8 i16 i32 i64 }

impl<const N: usize> CellStore for [u8; N] {
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder.store_bytes(self)?;
        Ok(())
    }
}

/// Boxed (`^T`) field: encoded into a fresh child cell appended as a
/// reference.
impl<T> CellStore for Box<T>
where
    T: CellStore,
{
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder.store_as_ref(&**self)?;
        Ok(())
    }
}

/// `^Cell`: appended as a reference, as-is.
impl CellStore for Arc<Cell> {
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder.store_ref(Arc::clone(self))?;
        Ok(())
    }
}

impl<T> CellStore for Option<T>
where
    T: CellStore,
{
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        match self {
            Some(v) => builder.store_bit(true)?.store(v)?,
            None => builder.store_bit(false)?,
        };
        Ok(())
    }
}

impl<L, R> CellStore for Either<L, R>
where
    L: CellStore,
    R: CellStore,
{
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        match self {
            Either::Left(l) => builder.store_bit(false)?.store(l)?,
            Either::Right(r) => builder.store_bit(true)?.store(r)?,
        };
        Ok(())
    }
}
