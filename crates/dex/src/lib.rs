//! Typed message-body codecs for TON DEX contracts.
//!
//! One module per message family; constructor tags and field order follow
//! each DEX's on-chain TL-B schema. All codecs are built purely from the
//! [`toncell`] cursor/builder primitives, so a decoded value round-trips
//! bit-exactly through [`CellStore`](toncell::CellStore) and
//! [`CellLoad`](toncell::CellLoad).

pub mod dedust;
pub mod stonfi;
pub mod utyab;

use toncell::{Cell, CellError};

/// A message body successfully decoded under one of the known DEX schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DexMessage {
    DeDust(dedust::InMsgBody),
    StonFi(stonfi::Swap),
    Utyab(utyab::Swap),
}

const SCHEMAS: &[&str] = &["dedust", "stonfi", "utyab"];

/// Candidate decoders, tried in declaration order.
const CANDIDATES: &[fn(&Cell) -> Result<DexMessage, CellError>] = &[
    |cell| cell.parse().map(DexMessage::DeDust),
    |cell| cell.parse().map(DexMessage::StonFi),
    |cell| cell.parse().map(DexMessage::Utyab),
];

impl DexMessage {
    /// Try each known schema in a fixed order and return the first that
    /// decodes. A structural error selects the next candidate; any other
    /// error propagates immediately.
    pub fn decode(cell: &Cell) -> Result<Self, CellError> {
        for decode in CANDIDATES {
            match decode(cell) {
                Ok(msg) => return Ok(msg),
                Err(err) if err.is_structural() => continue,
                Err(err) => return Err(err),
            }
        }
        Err(CellError::NoConstructorMatched {
            type_name: "DexMessage",
            candidates: SCHEMAS,
        })
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use toncell::{Cell, CellStoreExt, Either, IntAddress, MsgAddress};

    use super::*;

    #[test]
    fn picks_dedust() {
        let body = dedust::InMsgBody::CreateVault {
            query_id: 1,
            asset: dedust::Asset::Native,
        };
        let cell = body.to_cell().unwrap();
        assert_eq!(
            DexMessage::decode(&cell).unwrap(),
            DexMessage::DeDust(body)
        );
    }

    #[test]
    fn picks_stonfi() {
        let body = stonfi::Swap {
            query_id: 7,
            from_user: MsgAddress::None,
            token_wallet: MsgAddress::None,
            amount: BigUint::from(1_000u32),
            min_out: BigUint::from(990u32),
            ref_body: Either::Left(stonfi::RefBody {
                from_real_user: MsgAddress::None,
                ref_address: MsgAddress::None,
            }),
        };
        let cell = body.to_cell().unwrap();
        assert_eq!(
            DexMessage::decode(&cell).unwrap(),
            DexMessage::StonFi(body)
        );
    }

    #[test]
    fn picks_utyab() {
        let body = utyab::Swap {
            amount: BigUint::from(5u8),
            asset_in: utyab::Asset {
                asset_type: 1,
                address: [0xAA; 32],
            },
            receiver: IntAddress::new(0, [1; 32]),
            referral: IntAddress::new(0, [2; 32]),
        };
        let cell = body.to_cell().unwrap();
        assert_eq!(DexMessage::decode(&cell).unwrap(), DexMessage::Utyab(body));
    }

    #[test]
    fn unknown_tag_exhausts_all_schemas() {
        let mut b = Cell::builder();
        b.store_uint(0xDEADBEEF, 32)
            .unwrap()
            .store_uint(0, 64)
            .unwrap();
        assert_eq!(
            DexMessage::decode(&b.into_cell()).unwrap_err(),
            CellError::NoConstructorMatched {
                type_name: "DexMessage",
                candidates: &["dedust", "stonfi", "utyab"],
            }
        );
    }

    #[test]
    fn empty_cell_exhausts_all_schemas() {
        let cell = Cell::builder().into_cell();
        assert!(matches!(
            DexMessage::decode(&cell).unwrap_err(),
            CellError::NoConstructorMatched { .. }
        ));
    }
}
