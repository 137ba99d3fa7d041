//! [DeDust](https://dedust.io/) vault and pool message bodies.

use std::sync::Arc;

use num_bigint::BigUint;
use toncell::{
    Cell, CellBuilder, CellError, CellLoad, CellSlice, CellStore, IntAddress, MsgAddress,
};

/// ```tlb
/// native$0000 = Asset;
/// jetton$0001 workchain_id:int8 address:uint256 = Asset;
/// extra_currency$0010 currency_id:int32 = Asset;
/// ```
///
/// The three 4-bit tags share the `00` prefix; constructors are tried in
/// declaration order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Native,
    Jetton { workchain_id: i8, address: [u8; 32] },
    ExtraCurrency { currency_id: i32 },
}

const ASSET_NATIVE_TAG: u64 = 0b0000;
const ASSET_JETTON_TAG: u64 = 0b0001;
const ASSET_EXTRA_CURRENCY_TAG: u64 = 0b0010;

impl CellLoad for Asset {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        if slice.has_prefix(ASSET_NATIVE_TAG, 4) {
            slice.skip(4)?;
            return Ok(Self::Native);
        }
        if slice.has_prefix(ASSET_JETTON_TAG, 4) {
            slice.skip(4)?;
            return Ok(Self::Jetton {
                workchain_id: slice.load_int(8)? as i8,
                address: slice.load_bytes()?,
            });
        }
        if slice.has_prefix(ASSET_EXTRA_CURRENCY_TAG, 4) {
            slice.skip(4)?;
            return Ok(Self::ExtraCurrency {
                currency_id: slice.load_int(32)? as i32,
            });
        }
        Err(CellError::NoConstructorMatched {
            type_name: "Asset",
            candidates: &["native", "jetton", "extra_currency"],
        })
    }
}

impl CellStore for Asset {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        match self {
            Self::Native => {
                builder.store_uint(ASSET_NATIVE_TAG, 4)?;
            }
            Self::Jetton {
                workchain_id,
                address,
            } => {
                builder
                    .store_uint(ASSET_JETTON_TAG, 4)?
                    .store_int(*workchain_id as i64, 8)?
                    .store_bytes(address)?;
            }
            Self::ExtraCurrency { currency_id } => {
                builder
                    .store_uint(ASSET_EXTRA_CURRENCY_TAG, 4)?
                    .store_int(*currency_id as i64, 32)?;
            }
        }
        Ok(())
    }
}

/// `timestamp#_ _:uint32 = Timestamp;`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub u32);

impl CellLoad for Timestamp {
    #[inline]
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        slice.parse().map(Self)
    }
}

impl CellStore for Timestamp {
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        self.0.store(builder)
    }
}

/// `given_in$0 = SwapKind; given_out$1 = SwapKind;`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapKind {
    GivenIn,
    GivenOut,
}

impl CellLoad for SwapKind {
    #[inline]
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(match slice.load_bit()? {
            false => Self::GivenIn,
            true => Self::GivenOut,
        })
    }
}

impl CellStore for SwapKind {
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder.store_bit(matches!(self, Self::GivenOut))?;
        Ok(())
    }
}

/// ```tlb
/// swap_params#_ deadline:Timestamp recipient_addr:MsgAddressInt referral_addr:MsgAddress
///               fulfill_payload:(Maybe ^Cell) reject_payload:(Maybe ^Cell) = SwapParams;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    pub deadline: Timestamp,
    pub recipient: IntAddress,
    pub referral: MsgAddress,
    pub fulfill_payload: Option<Arc<Cell>>,
    pub reject_payload: Option<Arc<Cell>>,
}

impl CellLoad for SwapParams {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(Self {
            deadline: slice.parse()?,
            recipient: slice.parse()?,
            referral: slice.parse()?,
            fulfill_payload: slice.parse()?,
            reject_payload: slice.parse()?,
        })
    }
}

impl CellStore for SwapParams {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store(&self.deadline)?
            .store(&self.recipient)?
            .store(&self.referral)?
            .store(&self.fulfill_payload)?
            .store(&self.reject_payload)?;
        Ok(())
    }
}

/// `step#_ pool_addr:MsgAddressInt params:SwapStepParams = SwapStep;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapStep {
    pub pool: IntAddress,
    pub params: SwapStepParams,
}

impl CellLoad for SwapStep {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(Self {
            pool: slice.parse()?,
            params: slice.parse()?,
        })
    }
}

impl CellStore for SwapStep {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder.store(&self.pool)?.store(&self.params)?;
        Ok(())
    }
}

/// `step_params#_ kind:SwapKind limit:Coins next:(Maybe ^SwapStep) = SwapStepParams;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapStepParams {
    pub kind: SwapKind,
    pub limit: BigUint,
    pub next: Option<Box<SwapStep>>,
}

impl CellLoad for SwapStepParams {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(Self {
            kind: slice.parse()?,
            limit: slice.load_coins()?,
            next: slice.parse()?,
        })
    }
}

impl CellStore for SwapStepParams {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store(&self.kind)?
            .store_coins(&self.limit)?
            .store(&self.next)?;
        Ok(())
    }
}

/// `volatile$0 = PoolType; stable$1 = PoolType;`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolType {
    Volatile,
    Stable,
}

impl CellLoad for PoolType {
    #[inline]
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(match slice.load_bit()? {
            false => Self::Volatile,
            true => Self::Stable,
        })
    }
}

impl CellStore for PoolType {
    #[inline]
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder.store_bit(matches!(self, Self::Stable))?;
        Ok(())
    }
}

/// `pool_params#_ pool_type:PoolType asset0:Asset asset1:Asset = PoolParams;`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolParams {
    pub pool_type: PoolType,
    pub asset0: Asset,
    pub asset1: Asset,
}

impl CellLoad for PoolParams {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        Ok(Self {
            pool_type: slice.parse()?,
            asset0: slice.parse()?,
            asset1: slice.parse()?,
        })
    }
}

impl CellStore for PoolParams {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store(&self.pool_type)?
            .store(&self.asset0)?
            .store(&self.asset1)?;
        Ok(())
    }
}

/// ```tlb
/// create_vault#21cfe02b query_id:uint64 asset:Asset = InMsgBody;
/// create_volatile_pool#97d51f2f query_id:uint64 asset0:Asset asset1:Asset = InMsgBody;
/// swap#ea06185d query_id:uint64 amount:Coins _:SwapStep swap_params:^SwapParams = InMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InMsgBody {
    CreateVault {
        query_id: u64,
        asset: Asset,
    },
    CreateVolatilePool {
        query_id: u64,
        asset0: Asset,
        asset1: Asset,
    },
    Swap {
        query_id: u64,
        amount: BigUint,
        step: SwapStep,
        swap_params: Box<SwapParams>,
    },
}

const CREATE_VAULT_TAG: u64 = 0x21cfe02b;
const CREATE_VOLATILE_POOL_TAG: u64 = 0x97d51f2f;
const SWAP_TAG: u64 = 0xea06185d;

impl CellLoad for InMsgBody {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        if slice.has_prefix(CREATE_VAULT_TAG, 32) {
            slice.skip(32)?;
            return Ok(Self::CreateVault {
                query_id: slice.load_uint(64)?,
                asset: slice.parse()?,
            });
        }
        if slice.has_prefix(CREATE_VOLATILE_POOL_TAG, 32) {
            slice.skip(32)?;
            return Ok(Self::CreateVolatilePool {
                query_id: slice.load_uint(64)?,
                asset0: slice.parse()?,
                asset1: slice.parse()?,
            });
        }
        if slice.has_prefix(SWAP_TAG, 32) {
            slice.skip(32)?;
            return Ok(Self::Swap {
                query_id: slice.load_uint(64)?,
                amount: slice.load_coins()?,
                step: slice.parse()?,
                swap_params: slice.parse()?,
            });
        }
        Err(CellError::NoConstructorMatched {
            type_name: "InMsgBody",
            candidates: &["create_vault", "create_volatile_pool", "swap"],
        })
    }
}

impl CellStore for InMsgBody {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        match self {
            Self::CreateVault { query_id, asset } => {
                builder
                    .store_uint(CREATE_VAULT_TAG, 32)?
                    .store_uint(*query_id, 64)?
                    .store(asset)?;
            }
            Self::CreateVolatilePool {
                query_id,
                asset0,
                asset1,
            } => {
                builder
                    .store_uint(CREATE_VOLATILE_POOL_TAG, 32)?
                    .store_uint(*query_id, 64)?
                    .store(asset0)?
                    .store(asset1)?;
            }
            Self::Swap {
                query_id,
                amount,
                step,
                swap_params,
            } => {
                builder
                    .store_uint(SWAP_TAG, 32)?
                    .store_uint(*query_id, 64)?
                    .store_coins(amount)?
                    .store(step)?
                    .store(swap_params)?;
            }
        }
        Ok(())
    }
}

/// `swap#e3a0d482 _:SwapStep swap_params:^SwapParams = ForwardPayload;`
///
/// Carried inside a jetton transfer to request a swap from a jetton vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardPayload {
    pub step: SwapStep,
    pub swap_params: Box<SwapParams>,
}

const FORWARD_PAYLOAD_TAG: u64 = 0xe3a0d482;

impl CellLoad for ForwardPayload {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        if !slice.has_prefix(FORWARD_PAYLOAD_TAG, 32) {
            return Err(CellError::NoConstructorMatched {
                type_name: "ForwardPayload",
                candidates: &["swap"],
            });
        }
        slice.skip(32)?;
        Ok(Self {
            step: slice.parse()?,
            swap_params: slice.parse()?,
        })
    }
}

impl CellStore for ForwardPayload {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store_uint(FORWARD_PAYLOAD_TAG, 32)?
            .store(&self.step)?
            .store(&self.swap_params)?;
        Ok(())
    }
}

/// ```tlb
/// swap#9c610de3 asset_in:Asset asset_out:Asset amount_in:Coins amount_out:Coins
///               ^[ sender_addr:MsgAddressInt referral_addr:MsgAddress
///               reserve0:Coins reserve1:Coins ] = ExtOutMsgBody;
/// ```
///
/// Swap event emitted by a pool; the anonymous boxed record is flattened
/// into the struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtOutMsgBody {
    pub asset_in: Asset,
    pub asset_out: Asset,
    pub amount_in: BigUint,
    pub amount_out: BigUint,
    pub sender: IntAddress,
    pub referral: MsgAddress,
    pub reserve0: BigUint,
    pub reserve1: BigUint,
}

const EXT_OUT_SWAP_TAG: u64 = 0x9c610de3;

impl CellLoad for ExtOutMsgBody {
    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        if !slice.has_prefix(EXT_OUT_SWAP_TAG, 32) {
            return Err(CellError::NoConstructorMatched {
                type_name: "ExtOutMsgBody",
                candidates: &["swap"],
            });
        }
        slice.skip(32)?;
        let asset_in = slice.parse()?;
        let asset_out = slice.parse()?;
        let amount_in = slice.load_coins()?;
        let amount_out = slice.load_coins()?;
        let mut rest = slice.load_ref_slice()?;
        Ok(Self {
            asset_in,
            asset_out,
            amount_in,
            amount_out,
            sender: rest.parse()?,
            referral: rest.parse()?,
            reserve0: rest.load_coins()?,
            reserve1: rest.load_coins()?,
        })
    }
}

impl CellStore for ExtOutMsgBody {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder
            .store_uint(EXT_OUT_SWAP_TAG, 32)?
            .store(&self.asset_in)?
            .store(&self.asset_out)?
            .store_coins(&self.amount_in)?
            .store_coins(&self.amount_out)?;
        let mut rest = Cell::builder();
        rest.store(&self.sender)?
            .store(&self.referral)?
            .store_coins(&self.reserve0)?
            .store_coins(&self.reserve1)?;
        builder.store_ref(rest.into_cell())?;
        Ok(())
    }
}
