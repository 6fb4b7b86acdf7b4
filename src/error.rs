// 网关错误定义
// 支付发起流程中所有可能出现的失败类型

use thiserror::Error;

/// 支付网关结果类型
pub type GatewayResult<T> = Result<T, GatewayError>;

/// 面向终端用户的通用提示
pub const PAYMENT_UNAVAILABLE_MESSAGE: &str = "支付暂时不可用，请稍后重试";

/// 支付网关错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// 配置缺失或无效
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// 网络错误、超时或非2xx响应
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// 响应格式错误或缺少必要字段
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// 支付平台返回 errcode != 0
    #[error("Gateway error: {message}")]
    Gateway { errcode: i64, message: String },

    /// 响应签名校验失败
    #[error("Signature error: {message}")]
    Signature { message: String },
}

impl GatewayError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn gateway(errcode: i64, message: impl Into<String>) -> Self {
        Self::Gateway {
            errcode,
            message: message.into(),
        }
    }

    pub fn signature(message: impl Into<String>) -> Self {
        Self::Signature {
            message: message.into(),
        }
    }

    /// 错误类型名称，用于结构化日志
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Transport { .. } => "transport",
            Self::Protocol { .. } => "protocol",
            Self::Gateway { .. } => "gateway",
            Self::Signature { .. } => "signature",
        }
    }

    /// 可以展示给用户的提示信息
    ///
    /// 只有支付平台明确返回的业务错误信息会原样展示，其余一律使用通用提示
    pub fn user_message(&self) -> String {
        match self {
            Self::Gateway { message, .. } => message.clone(),
            _ => PAYMENT_UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::transport(format!("request timed out: {}", err))
        } else {
            GatewayError::transport(format!("request failed: {}", err))
        }
    }
}
