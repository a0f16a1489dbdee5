use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
mod instructions;
pub mod state;


use instructions::*;

declare_id!("5Fr9Muv6sXSjm6Kkz1jiGRKF67NJUuvZjAbTvwPKnmgD");

#[program]
pub mod otc_swap {
    use super::*;

    /// Open an offer: seller moves `amount` tokens into the swap vault
    pub fn initialize_swap(
        ctx: Context<InitializeSwap>,
        nonce: u64,
        amount: u64,
        expiry_timestamp: i64,
        whitelisted_buyers: Vec<Pubkey>,
        buyer_recipient_account: Pubkey,
        price_lamports: u64,
    ) -> Result<()> {
        instructions::initialize_swap::handler(
            ctx,
            nonce,
            amount,
            expiry_timestamp,
            whitelisted_buyers,
            buyer_recipient_account,
            price_lamports,
        )
    }

    /// Accept the offer: the whole vault goes to the bound recipient
    pub fn execute_swap(ctx: Context<ExecuteSwap>, buyer_recipient_account: Pubkey) -> Result<()> {
        instructions::execute_swap::handler(ctx, buyer_recipient_account)
    }

    /// Withdraw the offer: seller reclaims the vault, before or after expiry
    pub fn cancel_swap(ctx: Context<CancelSwap>) -> Result<()> {
        instructions::cancel_swap::handler(ctx)
    }
}
