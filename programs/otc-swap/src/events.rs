use anchor_lang::prelude::*;

#[event]
pub struct SwapInitialized {
    pub swap: Pubkey,
    pub seller: Pubkey,
    pub token_mint: Pubkey,
    pub amount: u64,
    pub expiry_timestamp: i64,
    pub whitelisted_buyers: Vec<Pubkey>,
    pub buyer_recipient_account: Pubkey,
    pub price_lamports: u64,
}

#[event]
pub struct SwapExecuted {
    pub swap: Pubkey,
    pub seller: Pubkey,
    pub buyer: Pubkey,
    pub buyer_recipient_account: Pubkey,
    pub token_mint: Pubkey,
    pub amount: u64,
    pub price_lamports: u64,
}

#[event]
pub struct SwapCancelled {
    pub swap: Pubkey,
    pub seller: Pubkey,
    pub seller_recipient_account: Pubkey,
    pub token_mint: Pubkey,
    pub amount: u64,
    // 取消时报价是否已过期
    pub expired: bool,
}
