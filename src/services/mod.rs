// 服务层模块
// 包含支付请求构造、网关通信和异步通知校验

pub mod gateway_client;
pub mod notification_service;
pub mod request_builder;

// 重新导出服务
pub use gateway_client::{GatewayClient, HttpResponse, HttpTransport, ReqwestTransport};
pub use notification_service::NotificationValidator;
pub use request_builder::RequestBuilder;
