use crate::{
    constants::SWAP_SEED,
    errors::SwapError,
    events::SwapInitialized,
    state::{SwapAccount, SwapStatus},
};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

// 定义 initialize_swap 所需的账户列表
#[derive(Accounts)]
#[instruction(nonce: u64)] // 获取指令中的 nonce 参数, 用于派生 swap PDA
pub struct InitializeSwap<'info> {
    // 签名账户, 即挂单的 seller
    #[account(mut)]
    pub seller: Signer<'info>,

    // swap 记录 PDA, 已经结束 (成交或取消) 的记录可以在同一地址上重新挂单, 所以用 init_if_needed
    #[account(
        init_if_needed,
        payer = seller,
        space = SwapAccount::DISCRIMINATOR.len() + SwapAccount::INIT_SPACE,
        seeds = [SWAP_SEED, seller.key().as_ref(), token_mint.key().as_ref(), nonce.to_le_bytes().as_ref()],
        bump,
    )]
    pub swap: Box<Account<'info, SwapAccount>>,

    // 托管 token 的 mint 账户
    #[account(
        mint::token_program = token_program // 约束 token_mint 必须由 token_program 管理
    )]
    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    // seller 的 token 账户, 托管资金从这里扣除
    #[account(
        mut,
        constraint = seller_token_account.mint == token_mint.key() @ SwapError::InvalidTokenMint,
        constraint = seller_token_account.owner == seller.key() @ SwapError::Unauthorized,
    )]
    pub seller_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    // 资金托管 ATA 账户, authority 是 swap PDA, 只有程序可以转出
    #[account(
        init_if_needed,
        payer = seller,
        associated_token::mint = token_mint,
        associated_token::authority = swap,
        associated_token::token_program = token_program
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    // Programs
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeSwap<'info> {
    /// # Check the offer against current state
    fn validate(
        &self,
        amount: u64,
        expiry_timestamp: i64,
        whitelisted_buyers: &[Pubkey],
        buyer_recipient_account: &Pubkey,
        now: i64,
    ) -> Result<()> {
        self.swap.ensure_initializable()?;
        SwapAccount::validate_terms(amount, expiry_timestamp, whitelisted_buyers, now)?;

        require!(
            !self.seller_token_account.is_frozen(),
            SwapError::TokenAccountFrozen
        );
        require_gte!(
            self.seller_token_account.amount,
            amount,
            SwapError::InsufficientFunds
        );
        // 接收账户不能是 vault 本身, 否则成交时 token 会留在 vault 中
        require_keys_neq!(
            *buyer_recipient_account,
            self.vault.key(),
            SwapError::RecipientMismatch
        );

        Ok(())
    }

    /// # Record the offer
    #[allow(clippy::too_many_arguments)]
    fn populate_swap(
        &mut self,
        nonce: u64,
        amount: u64,
        expiry_timestamp: i64,
        whitelisted_buyers: Vec<Pubkey>,
        buyer_recipient_account: Pubkey,
        price_lamports: u64,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        self.swap.set_inner(SwapAccount {
            nonce,
            seller: self.seller.key(),
            seller_token_account: self.seller_token_account.key(),
            token_mint: self.token_mint.key(),
            amount,
            expiry_timestamp,
            whitelisted_buyers,
            buyer_recipient_account,
            price_lamports,
            status: SwapStatus::Active,
            is_active: true,
            created_at: now,
            settled_at: 0,
            bump,
        });

        Ok(())
    }

    /// # Return leftovers in the vault to the seller
    fn sweep_vault(&self, nonce: u64, bump: u8) -> Result<()> {
        let leftover = self.vault.amount;
        if leftover == 0 {
            return Ok(());
        }

        let seller = self.seller.key();
        let token_mint = self.token_mint.key();
        let nonce = nonce.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[
            SWAP_SEED,
            seller.as_ref(),
            token_mint.as_ref(),
            nonce.as_ref(),
            &[bump],
        ]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.token_mint.to_account_info(),
                    to: self.seller_token_account.to_account_info(),
                    authority: self.swap.to_account_info(),
                },
                signer_seeds,
            ),
            leftover,
            self.token_mint.decimals,
        )
    }

    /// # Deposit the tokens
    fn deposit_tokens(&self, amount: u64) -> Result<()> {
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.seller_token_account.to_account_info(),
                    mint: self.token_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.seller.to_account_info(),
                },
            ),
            amount,
            self.token_mint.decimals,
        )?;

        Ok(())
    }

    /// # Check the vault holds exactly the recorded amount
    fn verify_custody(&mut self, amount: u64) -> Result<()> {
        // 带转账手续费的 mint 到账会少于 amount
        self.vault.reload()?;
        require_eq!(self.vault.amount, amount, SwapError::CustodyMismatch);

        Ok(())
    }
}

pub fn handler(
    ctx: Context<InitializeSwap>,
    nonce: u64,
    amount: u64,
    expiry_timestamp: i64,
    whitelisted_buyers: Vec<Pubkey>,
    buyer_recipient_account: Pubkey,
    price_lamports: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // 所有检查都在修改状态之前完成
    ctx.accounts.validate(
        amount,
        expiry_timestamp,
        &whitelisted_buyers,
        &buyer_recipient_account,
        now,
    )?;

    // Save the Swap Data
    ctx.accounts.populate_swap(
        nonce,
        amount,
        expiry_timestamp,
        whitelisted_buyers.clone(),
        buyer_recipient_account,
        price_lamports,
        now,
        ctx.bumps.swap,
    )?;

    // 上一个报价留下的余额 (例如他人转入的零头) 先退回 seller
    ctx.accounts.sweep_vault(nonce, ctx.bumps.swap)?;

    // Deposit Tokens
    ctx.accounts.deposit_tokens(amount)?;
    ctx.accounts.verify_custody(amount)?;

    msg!(
        "swap {} initialized: {} tokens, expires at {}",
        ctx.accounts.swap.key(),
        amount,
        expiry_timestamp
    );
    emit!(SwapInitialized {
        swap: ctx.accounts.swap.key(),
        seller: ctx.accounts.seller.key(),
        token_mint: ctx.accounts.token_mint.key(),
        amount,
        expiry_timestamp,
        whitelisted_buyers,
        buyer_recipient_account,
        price_lamports,
    });

    Ok(())
}
