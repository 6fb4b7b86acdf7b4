// 异步通知处理器
// 接收支付平台的支付结果回调

use crate::models::{NotificationPayload, ACK_BODY};
use crate::services::NotificationValidator;
use crate::state::AppStateData;
use actix_web::{web, HttpResponse};

/// 校验失败时的应答，平台收到非 `success` 应答后会重发通知
pub const NACK_BODY: &str = "fail";

/// 支付结果回调
///
/// POST /api/v1/notify
///
/// 请求体: 表单编码的 NotificationPayload
/// 响应: 校验通过返回 `success`，否则返回 `fail`
pub async fn payment_notify(data: AppStateData, body: web::Bytes) -> HttpResponse {
    let payload: NotificationPayload = match serde_urlencoded::from_bytes(&body) {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Ignoring notification: malformed form body: {}", e);
            return nack();
        }
    };

    match NotificationValidator::new(data.gateway.config()).validate(&payload) {
        Some(result) => {
            // 订单入账由调用方根据 trade_no/callback_no 幂等处理
            log::info!(
                "Order {} paid, callback_no={}, user_id={}",
                result.trade_no,
                result.callback_no,
                result.user_id.as_deref().unwrap_or("-")
            );
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(ACK_BODY)
        }
        None => nack(),
    }
}

fn nack() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(NACK_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{app_config, state_with_response};
    use crate::routes::api_v1_routes;
    use crate::utils::canonical_sign;
    use actix_web::{test, App};
    use serde_json::json;

    fn form_body(pairs: &[(&str, &str)], secret: &str) -> String {
        let hash = canonical_sign(pairs.iter().copied(), secret).unwrap();
        let mut all: Vec<(&str, &str)> = pairs.to_vec();
        all.push(("hash", hash.as_str()));
        serde_urlencoded::to_string(&all).unwrap()
    }

    async fn post_notify(body: String) -> (u16, String) {
        let state = state_with_response(app_config(), 200, json!({"errcode": 0}));
        let app = test::init_service(App::new().app_data(state).service(api_v1_routes())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/notify")
            .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn test_notify_acknowledges_paid_order() {
        let body = form_body(
            &[("trade_order_id", "T100"), ("status", "OD"), ("total_fee", "99.99")],
            "s3cret",
        );
        let (status, text) = post_notify(body).await;
        assert_eq!(status, 200);
        assert_eq!(text, "success");
    }

    #[actix_web::test]
    async fn test_notify_rejects_forged_signature() {
        let body = form_body(&[("trade_order_id", "T100"), ("status", "OD")], "guess");
        let (status, text) = post_notify(body).await;
        assert_eq!(status, 200);
        assert_eq!(text, NACK_BODY);
    }

    #[actix_web::test]
    async fn test_notify_pending_order_is_not_acknowledged() {
        let body = form_body(&[("trade_order_id", "T100"), ("status", "WP")], "s3cret");
        let (_, text) = post_notify(body).await;
        assert_eq!(text, NACK_BODY);
    }

    #[actix_web::test]
    async fn test_notify_body_without_hash_or_trade_no() {
        // 无法识别的表单仍能解析为单个空值字段，因缺少 hash 被拒绝
        let (_, text) = post_notify("%%%".to_string()).await;
        assert_eq!(text, NACK_BODY);
    }
}
