use crate::{
    constants::SWAP_SEED,
    errors::SwapError,
    events::SwapExecuted,
    state::{SwapAccount, SwapStatus},
};
use anchor_lang::{
    prelude::*,
    system_program::{transfer, Transfer},
};
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

#[derive(Accounts)]
pub struct ExecuteSwap<'info> {
    // 签名账户, 即成交的买家
    #[account(mut)]
    pub buyer: Signer<'info>,

    // 报价的创建者, 接收买家支付的 SOL
    #[account(mut)]
    pub seller: SystemAccount<'info>,

    // swap 记录, 种子全部取自记录本身
    #[account(
        mut,
        seeds = [SWAP_SEED, swap.seller.as_ref(), swap.token_mint.as_ref(), swap.nonce.to_le_bytes().as_ref()],
        bump = swap.bump,
        has_one = seller @ SwapError::SellerMismatch,
        has_one = token_mint @ SwapError::InvalidTokenMint,
    )]
    pub swap: Box<Account<'info, SwapAccount>>, // 使用 Box 减少 stack 的大小

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

    // 接收 token 的账户, 必须是创建报价时绑定的那个账户 (在 handler 中检查)
    #[account(
        mut,
        constraint = buyer_recipient_account.mint == token_mint.key() @ SwapError::InvalidTokenMint,
    )]
    pub buyer_recipient_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> ExecuteSwap<'info> {
    /// # Check the buyer against the stored offer
    fn validate(&self, buyer_recipient_account: &Pubkey, now: i64) -> Result<()> {
        self.swap
            .ensure_executable(&self.buyer.key(), buyer_recipient_account, now)?;

        // 传入的参数和实际账户都必须是绑定的接收账户
        require_keys_eq!(
            self.buyer_recipient_account.key(),
            self.swap.buyer_recipient_account,
            SwapError::RecipientMismatch
        );
        require!(
            !self.buyer_recipient_account.is_frozen(),
            SwapError::TokenAccountFrozen
        );
        require_gte!(
            self.buyer.lamports(),
            self.swap.price_lamports,
            SwapError::InsufficientFunds
        );
        require_gte!(self.vault.amount, self.swap.amount, SwapError::CustodyMismatch);

        Ok(())
    }

    /// # Pay the seller
    fn pay_seller(&self) -> Result<()> {
        if self.swap.price_lamports == 0 {
            return Ok(());
        }

        transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.buyer.to_account_info(),
                    to: self.seller.to_account_info(),
                },
            ),
            self.swap.price_lamports,
        )
    }

    /// # Release the whole vault to the bound recipient
    fn release_to_buyer(&self) -> Result<()> {
        // 由于是从 vault PDA 账户中转账, 因此需要提供 swap PDA 的签名 seeds
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
                    to: self.buyer_recipient_account.to_account_info(),
                    authority: self.swap.to_account_info(),
                },
                signer_seeds,
            ),
            self.vault.amount,
            self.token_mint.decimals,
        )
    }
}

pub fn handler(ctx: Context<ExecuteSwap>, buyer_recipient_account: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.validate(&buyer_recipient_account, now)?;
    // vault 中多出的零头一并转给接收账户, 成交后 vault 必须为空
    let released = ctx.accounts.vault.amount;

    ctx.accounts.pay_seller()?;
    ctx.accounts.release_to_buyer()?;

    // 转账和状态变更在同一条指令中, 任一步失败整条指令回滚
    ctx.accounts.swap.settle(SwapStatus::Executed, now);

    let swap = &ctx.accounts.swap;
    msg!(
        "swap {} executed by {}: {} tokens",
        swap.key(),
        ctx.accounts.buyer.key(),
        released
    );
    emit!(SwapExecuted {
        swap: swap.key(),
        seller: swap.seller,
        buyer: ctx.accounts.buyer.key(),
        buyer_recipient_account,
        token_mint: swap.token_mint,
        amount: released,
        price_lamports: swap.price_lamports,
    });

    Ok(())
}
