use core::{
    fmt::{self, Debug, Display},
    num::ParseIntError,
    str::FromStr,
};

use bitvec::{order::Msb0, vec::BitVec};
use thiserror::Error;

use crate::{CellBuilder, CellError, CellLoad, CellSlice, CellStore};

const TAG_NONE: u64 = 0b00;
const TAG_EXTERN: u64 = 0b01;
const TAG_STD: u64 = 0b10;

/// [MsgAddress](https://docs.ton.org/develop/data-formats/msg-tlb#msgaddressext-tl-b)
/// ```tlb
/// addr_none$00 = MsgAddressExt;
/// addr_extern$01 len:(## 9) external_address:(bits len) = MsgAddressExt;
/// addr_std$10 anycast:(Maybe Anycast) workchain_id:int8 address:bits256 = MsgAddressInt;
/// ```
///
/// `addr_var$11` and a set anycast bit load as
/// [`CellError::UnsupportedAddress`]: no message family handled here ever
/// carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum MsgAddress {
    #[default]
    None,
    Extern(ExternAddress),
    Int(IntAddress),
}

/// `addr_std$10` payload: workchain plus a 256-bit account hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntAddress {
    pub workchain_id: i8,
    pub address: [u8; 32],
}

/// `addr_extern$01` payload: up to 511 raw bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternAddress {
    pub bits: BitVec<u8, Msb0>,
}

impl IntAddress {
    #[inline]
    pub const fn new(workchain_id: i8, address: [u8; 32]) -> Self {
        Self {
            workchain_id,
            address,
        }
    }

    /// [Raw](https://docs.ton.org/learn/overviews/addresses#raw-address)
    /// `workchain:hex` representation.
    #[inline]
    pub fn to_hex(&self) -> String {
        format!("{}:{}", self.workchain_id, hex::encode(self.address))
    }

    /// Parse the raw `workchain:hex` representation, the inverse of
    /// [`to_hex`](IntAddress::to_hex).
    pub fn from_hex(s: impl AsRef<str>) -> Result<Self, ParseAddressError> {
        let (workchain, addr) = s
            .as_ref()
            .split_once(':')
            .ok_or(ParseAddressError::MissingSeparator)?;
        let mut address = [0; 32];
        hex::decode_to_slice(addr, &mut address)?;
        Ok(Self {
            workchain_id: workchain.parse()?,
            address,
        })
    }
}

/// Error parsing the raw `workchain:hex` address representation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseAddressError {
    #[error("expected `workchain:hex` format")]
    MissingSeparator,
    #[error("invalid workchain id: {0}")]
    Workchain(#[from] ParseIntError),
    #[error("invalid address hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl FromStr for IntAddress {
    type Err = ParseAddressError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<IntAddress> for MsgAddress {
    #[inline]
    fn from(addr: IntAddress) -> Self {
        Self::Int(addr)
    }
}

impl Debug for IntAddress {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_hex().as_str())
    }
}

impl Display for IntAddress {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_hex().as_str())
    }
}

impl CellLoad for MsgAddress {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        match slice.load_uint(2)? {
            TAG_NONE => Ok(Self::None),
            TAG_EXTERN => {
                // len:(## 9) external_address:(bits len)
                let len = slice.load_uint(9)? as usize;
                Ok(Self::Extern(ExternAddress {
                    bits: slice.load_bits(len)?,
                }))
            }
            TAG_STD => {
                // anycast:(Maybe Anycast)
                if slice.load_bit()? {
                    return Err(CellError::UnsupportedAddress("anycast"));
                }
                Ok(Self::Int(IntAddress {
                    // workchain_id:int8
                    workchain_id: slice.load_int(8)? as i8,
                    // address:bits256
                    address: slice.load_bytes()?,
                }))
            }
            _ => Err(CellError::UnsupportedAddress("addr_var$11")),
        }
    }
}

impl CellStore for MsgAddress {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        match self {
            Self::None => {
                builder.store_uint(TAG_NONE, 2)?;
            }
            Self::Extern(ext) => {
                builder
                    .store_uint(TAG_EXTERN, 2)?
                    .store_uint(ext.bits.len() as u64, 9)?
                    .store_bits(&ext.bits)?;
            }
            Self::Int(addr) => addr.store(builder)?,
        }
        Ok(())
    }
}

/// `MsgAddressInt`: like [`MsgAddress`], but only `addr_std$10` is a valid
/// constructor.
impl CellLoad for IntAddress {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        match slice.parse()? {
            MsgAddress::Int(addr) => Ok(addr),
            _ => Err(CellError::NoConstructorMatched {
                type_name: "MsgAddressInt",
                candidates: &["addr_std"],
            }),
        }
    }
}

impl CellStore for IntAddress {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store_uint(TAG_STD, 2)?
            // anycast:(Maybe Anycast)
            .store_bit(false)?
            .store_int(self.workchain_id as i64, 8)?
            .store_bytes(self.address)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bitvec::bitvec;
    use hex_literal::hex;

    use crate::{Cell, CellStoreExt, tests::assert_store_load_eq};

    use super::*;

    #[test]
    fn int_address_round_trip() {
        let addr = MsgAddress::Int(IntAddress::new(
            0,
            hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        ));
        assert_store_load_eq(addr);
    }

    #[test]
    fn none_stays_none() {
        let cell = MsgAddress::None.to_cell().unwrap();
        assert_eq!(cell.len(), 2);
        // must not come back as an internal address with workchain 0
        assert_eq!(cell.parse_fully::<MsgAddress>().unwrap(), MsgAddress::None);
    }

    #[test]
    fn extern_round_trip() {
        assert_store_load_eq(MsgAddress::Extern(ExternAddress {
            bits: bitvec![u8, Msb0; 1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0, 1],
        }));
    }

    #[test]
    fn std_layout() {
        let cell = IntAddress::new(-1, [0xFF; 32]).to_cell().unwrap();
        assert_eq!(cell.len(), 2 + 1 + 8 + 256);
        let mut s = cell.slice();
        // addr_std$10, anycast absent
        assert_eq!(s.load_uint(3).unwrap(), 0b100);
        assert_eq!(s.load_int(8).unwrap(), -1);
    }

    #[test]
    fn int_only_field_rejects_none() {
        let cell = MsgAddress::None.to_cell().unwrap();
        assert_eq!(
            cell.parse::<IntAddress>().unwrap_err(),
            CellError::NoConstructorMatched {
                type_name: "MsgAddressInt",
                candidates: &["addr_std"],
            }
        );
    }

    #[test]
    fn anycast_rejected() {
        let mut b = Cell::builder();
        b.store_uint(TAG_STD, 2).unwrap().store_bit(true).unwrap();
        b.store_int(0, 8).unwrap().store_bytes([0u8; 32]).unwrap();
        assert_eq!(
            b.into_cell().parse::<MsgAddress>().unwrap_err(),
            CellError::UnsupportedAddress("anycast")
        );
    }

    #[test]
    fn var_rejected() {
        let mut b = Cell::builder();
        b.store_uint(0b11, 2).unwrap().store_uint(0, 32).unwrap();
        assert_eq!(
            b.into_cell().parse::<MsgAddress>().unwrap_err(),
            CellError::UnsupportedAddress("addr_var$11")
        );
    }

    #[test]
    fn to_hex() {
        assert_eq!(
            IntAddress::new(-1, [0; 32]).to_hex(),
            "-1:0000000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn from_hex_round_trip() {
        let addr = IntAddress::new(
            -1,
            hex!("aabbccddeeff00112233445566778899aabbccddeeff001122334455667788ff"),
        );
        assert_eq!(IntAddress::from_hex(addr.to_hex()).unwrap(), addr);
        assert_eq!(addr.to_hex().parse::<IntAddress>().unwrap(), addr);
    }

    #[test]
    fn from_hex_malformed() {
        assert_eq!(
            IntAddress::from_hex("no separator").unwrap_err(),
            ParseAddressError::MissingSeparator
        );
        assert!(matches!(
            IntAddress::from_hex(format!("?:{}", "00".repeat(32))).unwrap_err(),
            ParseAddressError::Workchain(_)
        ));
        // too short
        assert!(matches!(
            IntAddress::from_hex("0:aabb").unwrap_err(),
            ParseAddressError::Hex(_)
        ));
        assert!(matches!(
            IntAddress::from_hex(format!("0:{}zz", "00".repeat(31))).unwrap_err(),
            ParseAddressError::Hex(_)
        ));
    }
}
