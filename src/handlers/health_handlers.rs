// 健康检查API处理器
// 提供服务状态和版本信息查询接口

use crate::state::AppStateData;
use actix_web::{HttpResponse, Result as ActixResult};
use serde::Serialize;

/// 系统健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 版本信息
    pub version: String,
    /// 当前启用的支付方式
    pub payment_type: String,
    /// 当前时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// 基础健康检查
///
/// GET /health
///
/// 无需认证，不访问支付平台
pub async fn health_check(data: AppStateData) -> ActixResult<HttpResponse> {
    let config = &data.config;
    let status = match config.validate() {
        Ok(()) => "healthy",
        Err(e) => {
            log::error!("Configuration check failed: {}", e);
            "unhealthy"
        }
    };

    let health = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        payment_type: config.gateway.payment_type.as_str().to_string(),
        timestamp: chrono::Utc::now(),
    };

    if status == "healthy" {
        Ok(HttpResponse::Ok().json(health))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(health))
    }
}
