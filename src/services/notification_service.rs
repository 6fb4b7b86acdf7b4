// 异步通知校验服务
// 校验支付平台回调的签名和状态，并转换为标准化的支付结果

use crate::config::GatewayConfig;
use crate::models::{NotificationPayload, NotificationResult, ACK_BODY, STATUS_ORDER_DONE};
use crate::utils::{parse_to_minor_units, verify, HASH_FIELD};

/// attach 中用户标识的前缀
const USER_ID_PREFIX: &str = "user_id:";

/// 异步通知校验器
///
/// 校验失败时只记录日志并返回 None，不向调用方暴露任何校验细节
pub struct NotificationValidator<'a> {
    config: &'a GatewayConfig,
}

impl<'a> NotificationValidator<'a> {
    pub fn new(config: &'a GatewayConfig) -> Self {
        Self { config }
    }

    /// 校验回调载荷
    ///
    /// # Arguments
    /// * `raw` - 回调原始表单字段
    ///
    /// # Returns
    /// * 校验通过且订单已支付时返回支付结果，否则返回 None (忽略本次回调)
    pub fn validate(&self, raw: &NotificationPayload) -> Option<NotificationResult> {
        let trade_no = match (raw.get(HASH_FIELD), raw.get("trade_order_id")) {
            (Some(_), Some(trade_no)) => trade_no,
            _ => {
                log::warn!("Ignoring notification: missing hash or trade_order_id");
                return None;
            }
        };

        if !verify(raw.fields(), &self.config.appsecret) {
            log::warn!(
                "Ignoring notification: signature mismatch for trade_no={}",
                trade_no
            );
            return None;
        }

        let status = raw.get("status").unwrap_or_default();
        if status != STATUS_ORDER_DONE {
            log::info!(
                "Ignoring notification: trade_no={} not paid yet (status='{}')",
                trade_no,
                status
            );
            return None;
        }

        let callback_no = raw
            .get("transaction_id")
            .or_else(|| raw.get("open_order_id"))
            .unwrap_or_default()
            .to_string();

        let total_fee = raw.get("total_fee").map(str::to_string);
        let total_amount = total_fee.as_deref().and_then(parse_to_minor_units);

        let user_id = raw
            .get("attach")
            .and_then(|attach| attach.strip_prefix(USER_ID_PREFIX))
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        log::info!(
            "Payment notification accepted: trade_no={} callback_no={} total_fee={}",
            trade_no,
            callback_no,
            total_fee.as_deref().unwrap_or("-")
        );

        Some(NotificationResult {
            trade_no: trade_no.to_string(),
            callback_no,
            ack: ACK_BODY,
            total_fee,
            total_amount,
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaymentType;
    use crate::utils::canonical_sign;

    fn config() -> GatewayConfig {
        GatewayConfig {
            api_url: "https://api.example/do".to_string(),
            appid: "1000".to_string(),
            appsecret: "s3cret".to_string(),
            payment_type: PaymentType::Alipay,
            wap_name: None,
            wap_url: None,
            app_name: String::new(),
            timeout_secs: 30,
        }
    }

    fn signed(pairs: &[(&str, &str)], secret: &str) -> NotificationPayload {
        let mut payload: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let hash = canonical_sign(payload.iter().map(|(k, v)| (k.as_str(), v.as_str())), secret)
            .unwrap();
        payload.push(("hash".to_string(), hash));
        payload.into_iter().collect()
    }

    #[test]
    fn test_validate_paid_notification() {
        let config = config();
        let payload = signed(&[("trade_order_id", "T100"), ("status", "OD")], "s3cret");

        let result = NotificationValidator::new(&config).validate(&payload).unwrap();
        assert_eq!(result.trade_no, "T100");
        assert_eq!(result.callback_no, "");
        assert_eq!(result.ack, "success");
        assert_eq!(result.total_fee, None);
        assert_eq!(result.user_id, None);
    }

    #[test]
    fn test_validate_extracts_optional_fields() {
        let config = config();
        let payload = signed(
            &[
                ("trade_order_id", "T100"),
                ("status", "OD"),
                ("transaction_id", "4200001"),
                ("open_order_id", "20191"),
                ("total_fee", "99.99"),
                ("attach", "user_id:42"),
                ("plugins", ""),
            ],
            "s3cret",
        );

        let result = NotificationValidator::new(&config).validate(&payload).unwrap();
        assert_eq!(result.callback_no, "4200001");
        assert_eq!(result.total_fee.as_deref(), Some("99.99"));
        assert_eq!(result.total_amount, Some(9999));
        assert_eq!(result.user_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_validate_out_of_range_total_fee() {
        let config = config();
        let payload = signed(
            &[
                ("trade_order_id", "T100"),
                ("status", "OD"),
                ("total_fee", "79228162514264337593543950335"),
            ],
            "s3cret",
        );

        let result = NotificationValidator::new(&config).validate(&payload).unwrap();
        assert_eq!(result.total_fee.as_deref(), Some("79228162514264337593543950335"));
        assert_eq!(result.total_amount, None);
    }

    #[test]
    fn test_validate_falls_back_to_open_order_id() {
        let config = config();
        let payload = signed(
            &[("trade_order_id", "T100"), ("status", "OD"), ("open_order_id", "20191")],
            "s3cret",
        );

        let result = NotificationValidator::new(&config).validate(&payload).unwrap();
        assert_eq!(result.callback_no, "20191");
    }

    #[test]
    fn test_validate_ignores_pending_status() {
        let config = config();
        let validator = NotificationValidator::new(&config);

        let pending = signed(&[("trade_order_id", "T100"), ("status", "WP")], "s3cret");
        assert!(validator.validate(&pending).is_none());

        let no_status = signed(&[("trade_order_id", "T100")], "s3cret");
        assert!(validator.validate(&no_status).is_none());
    }

    #[test]
    fn test_validate_ignores_missing_fields() {
        let config = config();
        let validator = NotificationValidator::new(&config);

        let unsigned: NotificationPayload =
            [("trade_order_id", "T100"), ("status", "OD")].into_iter().collect();
        assert!(validator.validate(&unsigned).is_none());

        let no_trade_no = signed(&[("status", "OD"), ("transaction_id", "1")], "s3cret");
        assert!(validator.validate(&no_trade_no).is_none());
    }

    #[test]
    fn test_validate_ignores_bad_signature() {
        let config = config();
        let validator = NotificationValidator::new(&config);

        let forged = signed(&[("trade_order_id", "T100"), ("status", "OD")], "guess");
        assert!(validator.validate(&forged).is_none());

        let mut fields = signed(&[("trade_order_id", "T100"), ("status", "WP")], "s3cret")
            .fields()
            .clone();
        fields.insert("status".to_string(), "OD".to_string());
        assert!(validator.validate(&NotificationPayload::new(fields)).is_none());
    }
}
