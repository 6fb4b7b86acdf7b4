// 数据验证工具函数
// 提供订单字段和回调地址的格式检查

use crate::error::{GatewayError, GatewayResult};
use crate::models::Order;
use reqwest::Url;

/// 验证URL格式 (仅允许 http/https)
///
/// # Arguments
/// * `url` - URL字符串
///
/// # Returns
/// * URL是否有效
pub fn validate_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            (parsed.scheme() == "http" || parsed.scheme() == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}

/// 验证商户订单号
///
/// 订单号由调用方保证唯一，这里只要求非空
pub fn validate_trade_no(trade_no: &str) -> bool {
    !trade_no.trim().is_empty()
}

/// 验证支付订单
///
/// 金额的符号检查在格式化金额时完成
///
/// # Arguments
/// * `order` - 支付订单
///
/// # Returns
/// * 订单有效返回 Ok，否则返回 `GatewayError::Config`
pub fn validate_order(order: &Order) -> GatewayResult<()> {
    if !validate_trade_no(&order.trade_no) {
        return Err(GatewayError::config(format!(
            "invalid trade_no '{}'",
            order.trade_no
        )));
    }

    if !validate_url(&order.notify_url) {
        return Err(GatewayError::config("notify_url must be an http(s) URL"));
    }

    if !validate_url(&order.return_url) {
        return Err(GatewayError::config("return_url must be an http(s) URL"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order {
            trade_no: "T100".to_string(),
            total_amount: 9999,
            notify_url: "https://cb/n".to_string(),
            return_url: "https://cb/r".to_string(),
            user_id: None,
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://cb/n"));
        assert!(validate_url("http://example.com/notify?x=1"));
        assert!(!validate_url("ftp://example.com"));
        assert!(!validate_url("not a url"));
        assert!(!validate_url(""));
    }

    #[test]
    fn test_validate_trade_no() {
        assert!(validate_trade_no("T100"));
        assert!(validate_trade_no("order_2024-01"));
        assert!(validate_trade_no("ORD:2024/001"));
        assert!(validate_trade_no("a1b2c3d4-e5f6-7a8b-9c0d-e1f2a3b4c5d6"));
        assert!(!validate_trade_no(""));
        assert!(!validate_trade_no("   "));
    }

    #[test]
    fn test_validate_order() {
        assert!(validate_order(&order()).is_ok());

        let mut free = order();
        free.total_amount = 0;
        assert!(validate_order(&free).is_ok());

        let mut bad = order();
        bad.trade_no = String::new();
        assert!(validate_order(&bad).is_err());

        let mut bad = order();
        bad.notify_url = "cb/n".to_string();
        assert!(validate_order(&bad).is_err());

        let mut bad = order();
        bad.return_url = String::new();
        assert!(validate_order(&bad).is_err());
    }
}
