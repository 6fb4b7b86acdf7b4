// 支付请求构造服务
// 把订单和网关配置映射为签名后的请求参数

use crate::config::{GatewayConfig, PaymentType};
use crate::error::{GatewayError, GatewayResult};
use crate::models::{Order, SignedParams};
use crate::utils::{format_minor_units, generate_nonce, validate_order, NONCE_LENGTH};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::BTreeMap;

/// 接口版本
pub const API_VERSION: &str = "1.1";

/// 订单标题后缀
pub const TITLE_SUFFIX: &str = "在线充值";

/// H5支付类型
pub const WAP_TYPE: &str = "WAP";

/// 支付请求构造器
pub struct RequestBuilder<'a> {
    config: &'a GatewayConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a GatewayConfig) -> Self {
        Self { config }
    }

    /// 构造签名后的支付请求参数
    ///
    /// # Arguments
    /// * `order` - 支付订单
    /// * `now` - 当前时间
    /// * `rng` - 随机串使用的随机源
    ///
    /// # Returns
    /// * 含 `hash` 的请求参数
    pub fn build<R: Rng + ?Sized>(
        &self,
        order: &Order,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> GatewayResult<SignedParams> {
        self.config.validate()?;
        validate_order(order)?;

        let total_fee = format_minor_units(order.total_amount)
            .ok_or_else(|| GatewayError::config("total_amount must not be negative"))?;

        let mut fields = BTreeMap::new();
        fields.insert("version".to_string(), API_VERSION.to_string());
        fields.insert("appid".to_string(), self.config.appid.clone());
        fields.insert("trade_order_id".to_string(), order.trade_no.clone());
        fields.insert("total_fee".to_string(), total_fee);
        fields.insert(
            "title".to_string(),
            format!("{}{}", self.config.app_name, TITLE_SUFFIX),
        );
        fields.insert("time".to_string(), now.timestamp().to_string());
        fields.insert("notify_url".to_string(), order.notify_url.clone());
        fields.insert("return_url".to_string(), order.return_url.clone());
        fields.insert("nonce_str".to_string(), generate_nonce(rng, NONCE_LENGTH));

        if let Some(user_id) = &order.user_id {
            fields.insert("attach".to_string(), format!("user_id:{}", user_id));
        }

        if self.config.payment_type == PaymentType::Wechat {
            fields.insert("type".to_string(), WAP_TYPE.to_string());
            fields.insert(
                "wap_url".to_string(),
                self.config.wap_url.clone().unwrap_or_default(),
            );
            fields.insert(
                "wap_name".to_string(),
                self.config.wap_name.clone().unwrap_or_default(),
            );
        }

        SignedParams::sign(fields, &self.config.appsecret)
    }
}
