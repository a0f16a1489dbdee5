use crate::{
    constants::SWAP_SEED,
    errors::SwapError,
    events::SwapCancelled,
    state::{SwapAccount, SwapStatus},
};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

#[derive(Accounts)]
pub struct CancelSwap<'info> {
    // 签名账户, 必须是报价的创建者 (在 handler 中检查, 以便返回 Unauthorized)
    #[account(mut)]
    pub seller: Signer<'info>,

    // swap 记录, 种子取自记录本身而不是签名者
    #[account(
        mut,
        seeds = [SWAP_SEED, swap.seller.as_ref(), swap.token_mint.as_ref(), swap.nonce.to_le_bytes().as_ref()],
        bump = swap.bump,
        has_one = token_mint @ SwapError::InvalidTokenMint,
    )]
    pub swap: Box<Account<'info, SwapAccount>>,

    #[account(mint::token_program = token_program)]
    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    // 资金托管 ATA 账户
    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = swap,
        associated_token::token_program = token_program
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    // 退款账户, 只能是创建报价时扣款的 seller token 账户
    #[account(
        mut,
        constraint = seller_recipient_account.mint == token_mint.key() @ SwapError::InvalidTokenMint,
    )]
    pub seller_recipient_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> CancelSwap<'info> {
    fn validate(&self) -> Result<()> {
        self.swap
            .ensure_cancellable(&self.seller.key(), &self.seller_recipient_account.key())?;
        require_gte!(self.vault.amount, self.swap.amount, SwapError::CustodyMismatch);

        Ok(())
    }

    /// # Return the whole vault to the seller
    fn refund_seller(&self) -> Result<()> {
        let nonce = self.swap.nonce.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[
            SWAP_SEED,
            self.swap.seller.as_ref(),
            self.swap.token_mint.as_ref(),
            nonce.as_ref(),
            &[self.swap.bump],
        ]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.token_mint.to_account_info(),
                    to: self.seller_recipient_account.to_account_info(),
                    authority: self.swap.to_account_info(),
                },
                signer_seeds,
            ),
            self.vault.amount,
            self.token_mint.decimals,
        )
    }
}

pub fn handler(ctx: Context<CancelSwap>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.validate()?;
    let refunded = ctx.accounts.vault.amount;
    ctx.accounts.refund_seller()?;
    ctx.accounts.swap.settle(SwapStatus::Cancelled, now);

    let swap = &ctx.accounts.swap;
    let expired = swap.is_expired(now);
    msg!(
        "swap {} cancelled: {} tokens returned (expired: {})",
        swap.key(),
        refunded,
        expired
    );
    emit!(SwapCancelled {
        swap: swap.key(),
        seller: swap.seller,
        seller_recipient_account: ctx.accounts.seller_recipient_account.key(),
        token_mint: swap.token_mint,
        amount: refunded,
        expired,
    });

    Ok(())
}
