// 异步通知数据模型
// 定义支付平台回调载荷及校验通过后的标准化结果

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 回调确认应答，必须原样返回给支付平台，否则平台会持续重发通知
pub const ACK_BODY: &str = "success";

/// 订单已完成状态
pub const STATUS_ORDER_DONE: &str = "OD";

/// 支付平台回调原始载荷 (表单字段)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct NotificationPayload(HashMap<String, String>);

impl NotificationPayload {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    /// 获取字段值，空字符串视为不存在
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.0
    }
}

impl From<HashMap<String, String>> for NotificationPayload {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NotificationPayload {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// 校验通过的支付结果
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotificationResult {
    /// 商户订单号
    pub trade_no: String,
    /// 平台交易号，没有时为空字符串
    pub callback_no: String,
    /// 必须返回给平台的确认应答
    pub ack: &'static str,
    /// 平台通知的支付金额 (元)
    pub total_fee: Option<String>,
    /// 支付金额换算后的分，用于和本地订单金额核对
    pub total_amount: Option<i64>,
    /// 下单时通过 attach 透传的用户标识
    pub user_id: Option<String>,
}
