//! Cell (de)serialization primitives for TON-style bit-packed trees.
//!
//! A [`Cell`] is an immutable node holding up to [`MAX_DATA_BITS`] data bits
//! and up to [`MAX_REFS`] references to child cells. [`CellSlice`] is a
//! read-only cursor over one cell, [`CellBuilder`] accumulates bits and
//! references and finalizes into a new cell.
//!
//! Schema types implement [`CellLoad`] and [`CellStore`]; the TL-B
//! combinators `Maybe`, `Either` and boxed (`^T`) fields map onto
//! [`Option`], [`Either`] and [`Box`] respectively.

mod address;
mod builder;
mod cell;
mod de;
mod error;
mod ser;
mod slice;

pub use self::{address::*, builder::*, cell::*, de::*, error::*, ser::*, slice::*};

pub use bitvec;
pub use either::Either;
pub use num_bigint::BigUint;
