//! End-to-end flows over the instruction cores, driven with explicit
//! timestamps instead of the runtime clock.


use anchor_lang::prelude::*;

use crate::constants::RATE_SCALE;
use crate::instructions::initialize::init_protocol;
use crate::instructions::pool_admin::{open_pool, PoolParams};
use crate::state::{Pool, ProtocolAccount};

pub(crate) const T0: i64 = 1_700_000_000;

pub(crate) struct Harness {
    pub owner: Pubkey,
    pub protocol: ProtocolAccount,
    pub pool: Pool,
}

/// Protocol with a single pool: min 1 token, 5 second lock, 1:1 rate, 10% APY.
pub(crate) fn harness() -> Harness {
    let owner = Pubkey::new_unique();
    let mut protocol = ProtocolAccount::default();
    init_protocol(&mut protocol, owner, 255).unwrap();

    let mut pool = Pool {
        deposit_decimals: 6,
        reward_decimals: 6,
        ..Default::default()
    };
    open_pool(
        &mut protocol,
        &mut pool,
        PoolParams {
            minimum_deposit: 1_000_000,
            lock_period: 5,
            can_swap: true,
            rate: RATE_SCALE,
            apy: 1000,
        },
        T0,
    )
    .unwrap();

    Harness {
        owner,
        protocol,
        pool,
    }
}
