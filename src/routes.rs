// API路由配置
// 定义所有HTTP接口的路由规则

use crate::handlers::*;
use actix_web::{web, Scope};

/// API v1路由配置
pub fn api_v1_routes() -> Scope {
    web::scope("/api/v1")
        // 支付发起
        .route("/payments", web::post().to(create_payment))
        // 支付平台异步通知
        .route("/notify", web::post().to(payment_notify))
}

/// 公共路由 (无需认证)
pub fn public_routes() -> Scope {
    web::scope("").route("/health", web::get().to(health_check))
}
