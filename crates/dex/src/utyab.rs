//! [UtyabSwap](https://utyabswap.com/) message bodies.

use num_bigint::BigUint;
use toncell::{CellBuilder, CellError, CellLoad, CellSlice, CellStore, IntAddress};

/// ```tlb
/// asset#_ asset_type:uint8 address:uint256 = Asset;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub asset_type: u8,
    pub address: [u8; 32],
}

impl CellLoad for Asset {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(Self {
            asset_type: slice.parse()?,
            address: slice.load_bytes()?,
        })
    }
}

impl CellStore for Asset {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store_uint(self.asset_type as u64, 8)?
            .store_bytes(self.address)?;
        Ok(())
    }
}

/// ```tlb
/// swap#0daa5c46 amount:Coins asset_in:Asset receiver:MsgAddressInt
///               referral:MsgAddressInt = InMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    pub amount: BigUint,
    pub asset_in: Asset,
    pub receiver: IntAddress,
    pub referral: IntAddress,
}

const SWAP_TAG: u64 = 0x0daa5c46;

impl CellLoad for Swap {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        if !slice.has_prefix(SWAP_TAG, 32) {
            return Err(CellError::NoConstructorMatched {
                type_name: "InMsgBody",
                candidates: &["swap"],
            });
        }
        slice.skip(32)?;
        Ok(Self {
            amount: slice.load_coins()?,
            asset_in: slice.parse()?,
            receiver: slice.parse()?,
            referral: slice.parse()?,
        })
    }
}

impl CellStore for Swap {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store_uint(SWAP_TAG, 32)?
            .store_coins(&self.amount)?
            .store(&self.asset_in)?
            .store(&self.receiver)?
            .store(&self.referral)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use toncell::{Cell, CellStoreExt};

    use super::*;

    #[test]
    fn swap_round_trip() {
        let body = Swap {
            amount: BigUint::from(2_500_000_000u64),
            asset_in: Asset {
                asset_type: 1,
                address: hex!(
                    "2f0f31c91e90e71ba6bbe1f3e9a6c01e4b9e3f5d6c7a8b9c0d1e2f3a4b5c6d7e"
                ),
            },
            receiver: IntAddress::new(0, [0x01; 32]),
            referral: IntAddress::new(0, [0x02; 32]),
        };
        let cell = body.to_cell().unwrap();
        assert_eq!(cell.parse_fully::<Swap>().unwrap(), body);
    }

    #[test]
    fn wrong_tag_is_rejected() {
        let mut b = Cell::builder();
        b.store_uint(0xea06185d, 32).unwrap();
        assert_eq!(
            b.into_cell().parse::<Swap>().unwrap_err(),
            CellError::NoConstructorMatched {
                type_name: "InMsgBody",
                candidates: &["swap"],
            }
        );
    }
}
