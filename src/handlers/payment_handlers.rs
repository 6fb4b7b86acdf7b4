// 支付发起API处理器
// 接收订单并返回收银台跳转地址

use crate::error::GatewayError;
use crate::models::{ApiResponse, Order, PayResult};
use crate::state::AppStateData;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Result as ActixResult};

/// 发起支付
///
/// POST /api/v1/payments
///
/// 请求体: Order
/// 响应: PayResult
pub async fn create_payment(
    data: AppStateData,
    request: web::Json<Order>,
) -> ActixResult<HttpResponse> {
    let order = request.into_inner();

    match data.gateway.pay(&order).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => {
            // 详细错误已在网关客户端记录，这里只返回可展示的信息
            let status = match e {
                GatewayError::Config { .. } | GatewayError::Gateway { .. } => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::SERVICE_UNAVAILABLE,
            };
            Ok(HttpResponse::build(status).json(ApiResponse::<PayResult>::error(
                i32::from(status.as_u16()),
                e.user_message(),
            )))
        }
    }
}
