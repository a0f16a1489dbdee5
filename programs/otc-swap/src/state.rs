use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_SWAP_DURATION, MAX_WHITELISTED_BUYERS},
    errors::SwapError,
};

/// Lifecycle of a single offer. `Uninitialized` only exists between account
/// creation and the first `initialize_swap` write.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum SwapStatus {
    Uninitialized,
    Active,
    Executed,
    Cancelled,
}

#[derive(InitSpace)] // 自动计算账户空间
#[account(discriminator = 1)] // 用自定义的标识符 1 代替默认账户名称哈希后的前 8 个字节
pub struct SwapAccount {
    // 随机数, 同一个 seller 和 mint 可以同时挂多个报价
    pub nonce: u64,
    // 报价的创建者, 也是唯一可以取消报价的账户
    pub seller: Pubkey,
    // 创建时扣款的 seller token 账户, 取消时资金只能退回这里
    pub seller_token_account: Pubkey,
    // 托管 token 的 mint 账户地址
    pub token_mint: Pubkey,
    // 托管的 token 数量
    pub amount: u64,
    // 过期时间 (unix 秒), 过期后不能再成交
    pub expiry_timestamp: i64,
    // 允许成交的买家, 为空表示任何人都可以成交
    #[max_len(10)]
    pub whitelisted_buyers: Vec<Pubkey>,
    // 成交时 token 必须转入的账户, 创建时绑定
    pub buyer_recipient_account: Pubkey,
    // 买家成交时支付给 seller 的 SOL 数量 (lamports), 0 表示无需支付
    pub price_lamports: u64,
    pub status: SwapStatus,
    // 与 status == Active 保持一致, 方便客户端直接读取
    pub is_active: bool,
    pub created_at: i64,
    pub settled_at: i64,
    // 缓存的 bump 值
    pub bump: u8,
}

impl SwapAccount {
    /// Terms shared by every offer, checked before anything is written.
    pub fn validate_terms(
        amount: u64,
        expiry_timestamp: i64,
        whitelisted_buyers: &[Pubkey],
        now: i64,
    ) -> Result<()> {
        require_gt!(amount, 0, SwapError::InvalidAmount);
        require!(
            expiry_timestamp > now && expiry_timestamp <= now.saturating_add(MAX_SWAP_DURATION),
            SwapError::InvalidExpiry
        );
        require!(
            whitelisted_buyers.len() <= MAX_WHITELISTED_BUYERS,
            SwapError::WhitelistTooLarge
        );
        for (i, buyer) in whitelisted_buyers.iter().enumerate() {
            require!(
                !whitelisted_buyers[..i].contains(buyer),
                SwapError::DuplicateBuyer
            );
        }

        Ok(())
    }

    /// A record can be (re)armed unless it still holds a live offer.
    pub fn ensure_initializable(&self) -> Result<()> {
        require!(!self.is_active, SwapError::RecordAlreadyActive);
        Ok(())
    }

    pub fn is_whitelisted(&self, buyer: &Pubkey) -> bool {
        self.whitelisted_buyers.is_empty() || self.whitelisted_buyers.contains(buyer)
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expiry_timestamp
    }

    /// # Execute guards
    ///
    /// Order matters: a terminated record reports `SwapInactive` even when it
    /// is also past its expiry.
    pub fn ensure_executable(&self, buyer: &Pubkey, recipient: &Pubkey, now: i64) -> Result<()> {
        require!(self.is_active, SwapError::SwapInactive);
        require!(!self.is_expired(now), SwapError::SwapExpired);
        require!(self.is_whitelisted(buyer), SwapError::NotWhitelisted);
        require_keys_eq!(
            *recipient,
            self.buyer_recipient_account,
            SwapError::RecipientMismatch
        );

        Ok(())
    }

    /// # Cancel guards
    ///
    /// Valid both before and after expiry.
    pub fn ensure_cancellable(&self, signer: &Pubkey, destination: &Pubkey) -> Result<()> {
        require!(self.is_active, SwapError::SwapInactive);
        require_keys_eq!(*signer, self.seller, SwapError::Unauthorized);
        require_keys_eq!(
            *destination,
            self.seller_token_account,
            SwapError::RecipientMismatch
        );

        Ok(())
    }

    /// Moves an active record into a terminal state.
    pub fn settle(&mut self, outcome: SwapStatus, now: i64) {
        self.status = outcome;
        self.is_active = false;
        self.settled_at = now;
    }
}
