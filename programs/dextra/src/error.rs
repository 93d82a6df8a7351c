use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Pool does not exist")]
    PoolNotFound,
    #[msg("Deposit does not exist")]
    DepositNotFound,
    #[msg("Amount is less than minimum deposit")]
    BelowMinimumDeposit,
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,
    #[msg("Swap not supported")]
    SwapDisabled,
    #[msg("Insufficient funds")]
    InsufficientFunds,
    #[msg("CPI execution failed")]
    CpiFailed,
    #[msg("Protocol already initialized")]
    AlreadyInitialized,
    #[msg("Arithmetic operation failed due to overflow or underflow")]
    ArithmeticOverflow,
    #[msg("No reward")]
    NoReward,
    #[msg("Unauthorized signer in CPI")]
    UnauthorizedSigner,
    #[msg("Invalid program ID")]
    InvalidProgramId,
    #[msg("Masscall cannot target the protocol program")]
    ReentrantCall,
    #[msg("Rate must be greater than zero")]
    InvalidRate,
    #[msg("Referral percent exceeds 100%")]
    InvalidRefPercent,
    #[msg("Unknown approval type")]
    InvalidApprovalType,
    #[msg("Token account does not match the pool")]
    InvalidTokenAccount,
    #[msg("Referrer token account is required")]
    MissingReferrerVault,
    #[msg("Invalid authority for this account")]
    InvalidAuthority,
}
