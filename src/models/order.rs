// 支付订单数据模型
// 调用方每次发起支付时构造，核心流程只读不改

use serde::{Deserialize, Serialize};
use std::fmt;

/// 支付订单
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    /// 商户订单号 (调用方保证唯一)
    pub trade_no: String,
    /// 支付金额 (分)
    pub total_amount: i64,
    /// 异步通知地址
    pub notify_url: String,
    /// 支付完成后跳转地址
    pub return_url: String,
    /// 用户标识 (可选)
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// 用户标识，兼容字符串和整数两种形式
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Int(id) => write!(f, "{}", id),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Int(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId::Text(id)
    }
}
