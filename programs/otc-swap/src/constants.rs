use anchor_lang::prelude::*;

// swap 记录 PDA 的种子前缀
#[constant]
pub const SWAP_SEED: &[u8] = b"swap";

// 白名单最多容纳的买家数量, 与 SwapAccount::whitelisted_buyers 的 max_len 保持一致
pub const MAX_WHITELISTED_BUYERS: usize = 10;

// 报价最长有效期: 48 小时
#[constant]
pub const MAX_SWAP_DURATION: i64 = 48 * 60 * 60;
