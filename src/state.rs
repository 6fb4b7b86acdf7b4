// 应用状态管理
// 包含只读配置和共享的支付网关客户端

use crate::config::AppConfig;
use crate::error::GatewayResult;
use crate::services::GatewayClient;
use actix_web::web;

/// 应用全局状态
pub struct AppState {
    /// 应用配置
    pub config: AppConfig,
    /// 支付网关客户端
    pub gateway: GatewayClient,
}

impl AppState {
    /// 创建新的应用状态实例
    ///
    /// # Arguments
    /// * `config` - 应用配置
    ///
    /// # Returns
    /// * 应用状态实例
    pub fn new(config: AppConfig) -> GatewayResult<Self> {
        let gateway = GatewayClient::new(config.gateway.clone())?;
        Ok(Self::with_gateway(config, gateway))
    }

    /// 使用已构造的网关客户端创建应用状态
    pub fn with_gateway(config: AppConfig, gateway: GatewayClient) -> Self {
        Self { config, gateway }
    }
}

/// 应用状态数据类型别名
pub type AppStateData = web::Data<AppState>;
