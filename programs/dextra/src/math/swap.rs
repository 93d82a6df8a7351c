use anchor_lang::prelude::*;

use crate::constants::RATE_SCALE;
use crate::error::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    DepositToReward,
    RewardToDeposit,
}

/// Output amount of a swap at `rate` (RATE_SCALE fixed point, reward per deposit).
pub fn quote(amount: u64, rate: u64, direction: SwapDirection) -> Result<u64> {
    require!(rate > 0, ErrorCode::InvalidRate);

    let (numerator, denominator) = match direction {
        SwapDirection::DepositToReward => (rate, RATE_SCALE),
        SwapDirection::RewardToDeposit => (RATE_SCALE, rate),
    };
    let out = u128::from(amount)
        .checked_mul(u128::from(numerator))
        .map(|v| v / u128::from(denominator))
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    u64::try_from(out).map_err(|_| error!(ErrorCode::ArithmeticOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_to_one_rate() {
        assert_eq!(quote(5_000_000, RATE_SCALE, SwapDirection::DepositToReward).unwrap(), 5_000_000);
        assert_eq!(quote(5_000_000, RATE_SCALE, SwapDirection::RewardToDeposit).unwrap(), 5_000_000);
    }

    #[test]
    fn test_directions_are_inverse() {
        let rate = 2_500_000; // 2.5 reward per deposit
        assert_eq!(quote(4_000, rate, SwapDirection::DepositToReward).unwrap(), 10_000);
        assert_eq!(quote(10_000, rate, SwapDirection::RewardToDeposit).unwrap(), 4_000);
    }

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(quote(1, 500_000, SwapDirection::DepositToReward).unwrap(), 0);
        assert_eq!(quote(10, 3_000_000, SwapDirection::RewardToDeposit).unwrap(), 3);
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert_eq!(
            quote(1, 0, SwapDirection::RewardToDeposit).unwrap_err(),
            ErrorCode::InvalidRate.into()
        );
    }

    #[test]
    fn test_output_overflow() {
        assert_eq!(
            quote(u64::MAX, 2 * RATE_SCALE, SwapDirection::DepositToReward).unwrap_err(),
            ErrorCode::ArithmeticOverflow.into()
        );
    }
}
