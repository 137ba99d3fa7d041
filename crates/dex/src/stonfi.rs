//! [STON.fi](https://ston.fi/) router message bodies.

use num_bigint::BigUint;
use toncell::{
    CellBuilder, CellError, CellLoad, CellSlice, CellStore, Either, MsgAddress,
};

/// ```tlb
/// ref_body#_ from_real_user:MsgAddress ref_address:MsgAddress = RefBody;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefBody {
    pub from_real_user: MsgAddress,
    pub ref_address: MsgAddress,
}

impl CellLoad for RefBody {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(Self {
            from_real_user: slice.parse()?,
            ref_address: slice.parse()?,
        })
    }
}

impl CellStore for RefBody {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store(&self.from_real_user)?
            .store(&self.ref_address)?;
        Ok(())
    }
}

/// ```tlb
/// swap#25938561 query_id:uint64 from_user:MsgAddress token_wallet:MsgAddress
///               amount:Coins min_out:Coins ref_body:(Either RefBody ^RefBody)
///               = InternalMsgBody;
/// ```
///
/// The router inlines the referral record when it fits and boxes it
/// otherwise, so decoding has to accept both arms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    pub query_id: u64,
    pub from_user: MsgAddress,
    pub token_wallet: MsgAddress,
    pub amount: BigUint,
    pub min_out: BigUint,
    pub ref_body: Either<RefBody, Box<RefBody>>,
}

const SWAP_TAG: u64 = 0x25938561;

impl CellLoad for Swap {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        if !slice.has_prefix(SWAP_TAG, 32) {
            return Err(CellError::NoConstructorMatched {
                type_name: "InternalMsgBody",
                candidates: &["swap"],
            });
        }
        slice.skip(32)?;
        Ok(Self {
            query_id: slice.load_uint(64)?,
            from_user: slice.parse()?,
            token_wallet: slice.parse()?,
            amount: slice.load_coins()?,
            min_out: slice.load_coins()?,
            ref_body: slice.parse()?,
        })
    }
}

impl CellStore for Swap {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store_uint(SWAP_TAG, 32)?
            .store_uint(self.query_id, 64)?
            .store(&self.from_user)?
            .store(&self.token_wallet)?
            .store_coins(&self.amount)?
            .store_coins(&self.min_out)?
            .store(&self.ref_body)?;
        Ok(())
    }
}
