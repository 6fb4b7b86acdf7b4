// 配置管理模块
// 负责加载和管理服务配置以及支付网关凭据

use crate::error::{GatewayError, GatewayResult};
use anyhow::{Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;

/// 默认请求超时时间 (秒)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 应用程序配置结构
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 支付网关配置
    pub gateway: GatewayConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 服务器监听地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 支付方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// 微信支付 (H5)
    Wechat,
    /// 支付宝
    Alipay,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Wechat => "wechat",
            PaymentType::Alipay => "alipay",
        }
    }
}

impl FromStr for PaymentType {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wechat" => Ok(PaymentType::Wechat),
            "alipay" => Ok(PaymentType::Alipay),
            other => Err(GatewayError::config(format!(
                "payment_type must be 'wechat' or 'alipay', got '{}'",
                other
            ))),
        }
    }
}

/// 支付网关配置
///
/// 由外部配置界面提供，加载后只读
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// 支付接口地址
    pub api_url: String,
    /// 应用ID
    pub appid: String,
    /// 应用密钥 (仅用于签名，不得输出到日志)
    pub appsecret: String,
    /// 支付方式
    pub payment_type: PaymentType,
    /// H5支付网站名称 (微信必填)
    #[serde(default)]
    pub wap_name: Option<String>,
    /// H5支付网站地址 (微信必填)
    #[serde(default)]
    pub wap_url: Option<String>,
    /// 应用名称，用于生成订单标题
    #[serde(default)]
    pub app_name: String,
    /// 请求超时时间 (秒)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_url", &self.api_url)
            .field("appid", &self.appid)
            .field("appsecret", &"[REDACTED]")
            .field("payment_type", &self.payment_type)
            .field("wap_name", &self.wap_name)
            .field("wap_url", &self.wap_url)
            .field("app_name", &self.app_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GatewayConfig {
    /// 校验网关配置
    ///
    /// # Returns
    /// * 配置有效返回 Ok，否则返回 `GatewayError::Config`
    pub fn validate(&self) -> GatewayResult<()> {
        let api_url = self.api_url.trim();
        if api_url.is_empty() {
            return Err(GatewayError::config("api_url cannot be empty"));
        }
        let parsed = Url::parse(api_url)
            .map_err(|e| GatewayError::config(format!("api_url is not a valid URL: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(GatewayError::config("api_url must use http or https"));
        }

        if self.appid.trim().is_empty() {
            return Err(GatewayError::config("appid cannot be empty"));
        }

        if self.appsecret.is_empty() {
            return Err(GatewayError::config("appsecret cannot be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(GatewayError::config("timeout_secs must be greater than 0"));
        }

        if self.payment_type == PaymentType::Wechat {
            if is_blank(&self.wap_name) {
                return Err(GatewayError::config("wap_name is required for wechat payments"));
            }
            if is_blank(&self.wap_url) {
                return Err(GatewayError::config("wap_url is required for wechat payments"));
            }
        }

        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // 加载.env文件，忽略错误

        let payment_type: PaymentType = env::var("HUPAY_PAYMENT_TYPE")
            .unwrap_or_else(|_| "alipay".to_string())
            .parse()
            .context("Invalid HUPAY_PAYMENT_TYPE")?;

        let config = AppConfig {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("Invalid SERVER_PORT")?,
            },
            gateway: GatewayConfig {
                api_url: env::var("HUPAY_API_URL")
                    .context("HUPAY_API_URL environment variable is required")?,
                appid: env::var("HUPAY_APPID")
                    .context("HUPAY_APPID environment variable is required")?,
                appsecret: env::var("HUPAY_APPSECRET")
                    .context("HUPAY_APPSECRET environment variable is required")?,
                payment_type,
                wap_name: env::var("HUPAY_WAP_NAME").ok(),
                wap_url: env::var("HUPAY_WAP_URL").ok(),
                app_name: env::var("HUPAY_APP_NAME").unwrap_or_default(),
                timeout_secs: env::var("HUPAY_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                    .parse()
                    .context("Invalid HUPAY_TIMEOUT_SECS")?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        self.gateway.validate()?;
        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            gateway: GatewayConfig {
                api_url: "https://api.xunhupay.com/payment/do.html".to_string(),
                appid: String::new(),
                appsecret: String::new(),
                payment_type: PaymentType::Alipay,
                wap_name: None,
                wap_url: None,
                app_name: String::new(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }
}
