//! hupay: 跳转支付网关适配器
//!
//! 负责支付请求签名、发起支付并校验平台响应，以及校验平台的异步支付通知。

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use config::{AppConfig, GatewayConfig, PaymentType};
pub use error::{GatewayError, GatewayResult};
pub use models::{NotificationPayload, NotificationResult, Order, PayResult, SignedParams, ACK_BODY};
pub use services::{GatewayClient, HttpTransport, NotificationValidator, RequestBuilder};
