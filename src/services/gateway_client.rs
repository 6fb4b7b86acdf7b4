// 支付网关客户端
// 负责发送支付请求、解析平台响应并校验响应签名

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{GatewayResponse, Order, PayResult, SignedParams};
use crate::services::RequestBuilder;
use crate::utils::verify;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// 平台未返回错误信息时使用的提示
pub const GENERIC_GATEWAY_ERROR: &str = "payment gateway rejected the request";

/// HTTP响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP状态码
    pub status: u16,
    /// 响应内容
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP传输层
///
/// 任何能以表单方式发送 POST 请求的客户端都可以实现该接口
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 以 `application/x-www-form-urlencoded` 发送 POST 请求
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> GatewayResult<HttpResponse>;
}

/// 基于 reqwest 的传输层实现
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 创建传输层实例
    ///
    /// # Arguments
    /// * `timeout` - 请求超时时间
    pub fn new(timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hupay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> GatewayResult<HttpResponse> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// 支付网关客户端
///
/// 除只读配置外不持有任何状态，可通过 `Arc` 在多个任务间共享
pub struct GatewayClient {
    config: GatewayConfig,
    transport: Arc<dyn HttpTransport>,
}

impl GatewayClient {
    /// 使用默认的 reqwest 传输层创建客户端
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    /// 使用自定义传输层创建客户端
    pub fn with_transport(
        config: GatewayConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> GatewayResult<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// 发起支付
    ///
    /// 使用当前时间和线程随机源构造请求，只发送一次，不做重试
    ///
    /// # Arguments
    /// * `order` - 支付订单
    ///
    /// # Returns
    /// * 收银台跳转地址
    pub async fn pay(&self, order: &Order) -> GatewayResult<PayResult> {
        let params = {
            let mut rng = rand::thread_rng();
            RequestBuilder::new(&self.config).build(order, Utc::now(), &mut rng)
        };
        self.send(order, params).await
    }

    /// 使用指定时间和随机源发起支付
    pub async fn pay_with<R: Rng + ?Sized>(
        &self,
        order: &Order,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> GatewayResult<PayResult> {
        let params = RequestBuilder::new(&self.config).build(order, now, rng);
        self.send(order, params).await
    }

    async fn send(
        &self,
        order: &Order,
        params: GatewayResult<SignedParams>,
    ) -> GatewayResult<PayResult> {
        let result = match params {
            Ok(params) => self.exchange(&params).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(pay) => log::info!(
                "Payment request accepted: trade_no={} appid={} amount={} redirect_url={}",
                order.trade_no,
                self.config.appid,
                order.total_amount,
                pay.redirect_url
            ),
            Err(e) => log::error!(
                "Payment request failed: trade_no={} appid={} amount={} kind={} error={}",
                order.trade_no,
                self.config.appid,
                order.total_amount,
                e.kind(),
                e
            ),
        }

        result
    }

    /// 单次请求/响应交换
    async fn exchange(&self, params: &SignedParams) -> GatewayResult<PayResult> {
        let form = params.to_pairs();
        let timeout = Duration::from_secs(self.config.timeout_secs);

        let response = tokio::time::timeout(
            timeout,
            self.transport.post_form(&self.config.api_url, &form),
        )
        .await
        .map_err(|_| {
            GatewayError::transport(format!(
                "request timed out after {} seconds",
                self.config.timeout_secs
            ))
        })??;

        if !response.is_success() {
            return Err(GatewayError::transport(format!(
                "unexpected HTTP status {}",
                response.status
            )));
        }

        let response = GatewayResponse::parse(&response.body)?;

        if !response.is_success() {
            let message = response
                .errmsg
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_GATEWAY_ERROR.to_string());
            return Err(GatewayError::gateway(response.errcode, message));
        }

        if response.hash().is_none() {
            return Err(GatewayError::signature("response is missing hash"));
        }

        if !verify(&response.fields, &self.config.appsecret) {
            return Err(GatewayError::signature("response hash mismatch"));
        }

        let redirect_url = response
            .url()
            .ok_or_else(|| GatewayError::protocol("response is missing url"))?
            .to_string();

        Ok(PayResult {
            redirect_url,
            qrcode_url: response
                .get("url_qrcode")
                .filter(|u| !u.is_empty())
                .map(str::to_string),
        })
    }
}
