use anchor_lang::prelude::*;

#[error_code]
pub enum SwapError {
    #[msg("Invalid amount: amount must be greater than zero")]
    InvalidAmount,
    #[msg("Invalid expiry: expiry must be in the future and within 48 hours")]
    InvalidExpiry,
    #[msg("Whitelist exceeds the maximum number of buyers")]
    WhitelistTooLarge,
    #[msg("Whitelist contains the same buyer more than once")]
    DuplicateBuyer,
    #[msg("Signer is not the seller of this swap")]
    Unauthorized,
    #[msg("Seller account does not match the swap seller")]
    SellerMismatch,
    #[msg("Buyer is not whitelisted for this swap")]
    NotWhitelisted,
    #[msg("Swap is not active")]
    SwapInactive,
    #[msg("Swap has expired")]
    SwapExpired,
    #[msg("Recipient does not match the account bound to this swap")]
    RecipientMismatch,
    #[msg("Insufficient funds")]
    InsufficientFunds,
    #[msg("An active swap already exists at this address")]
    RecordAlreadyActive,
    #[msg("Token account mint does not match the swap mint")]
    InvalidTokenMint,
    #[msg("Token account is frozen")]
    TokenAccountFrozen,
    #[msg("Escrow vault balance does not cover the swap amount")]
    CustodyMismatch,
}
