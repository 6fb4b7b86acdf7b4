// 支付网关请求/响应数据模型
// 定义签名后的请求参数、平台响应以及支付发起结果

use crate::error::{GatewayError, GatewayResult};
use crate::utils::{canonical_sign, HASH_FIELD};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// 签名后的请求参数
///
/// `hash` 只能由 [`SignedParams::sign`] 根据其余字段和密钥计算得出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParams {
    fields: BTreeMap<String, String>,
    hash: String,
}

impl SignedParams {
    /// 对参数签名
    ///
    /// # Arguments
    /// * `fields` - 请求参数 (其中的 `hash` 字段会被忽略)
    /// * `secret` - 应用密钥
    pub fn sign(mut fields: BTreeMap<String, String>, secret: &str) -> GatewayResult<Self> {
        fields.remove(HASH_FIELD);
        let hash = canonical_sign(&fields, secret)?;
        Ok(Self { fields, hash })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        if key == HASH_FIELD {
            return Some(&self.hash);
        }
        self.fields.get(key).map(String::as_str)
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// 不含 `hash` 的参数
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// 按键排序的全部参数，`hash` 位于末尾
    pub fn to_pairs(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(std::iter::once((HASH_FIELD, self.hash.as_str())))
            .collect()
    }
}

/// 支付平台响应
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    /// 平台状态码，0 表示成功
    pub errcode: i64,
    /// 平台错误信息
    pub errmsg: Option<String>,
    /// 参与签名的标量字段 (含 `hash`)
    pub fields: BTreeMap<String, String>,
}

impl GatewayResponse {
    /// 解析平台响应体
    ///
    /// 响应必须是包含 `errcode` 的 JSON 对象
    pub fn parse(body: &str) -> GatewayResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| GatewayError::protocol(format!("response is not valid JSON: {}", e)))?;

        let object = match value {
            Value::Object(object) => object,
            _ => return Err(GatewayError::protocol("response is not a JSON object")),
        };

        let errcode = match object.get("errcode") {
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| GatewayError::protocol("errcode is not an integer"))?,
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| GatewayError::protocol("errcode is not an integer"))?,
            Some(_) => return Err(GatewayError::protocol("errcode is not an integer")),
            None => return Err(GatewayError::protocol("response is missing errcode")),
        };

        let errmsg = object
            .get("errmsg")
            .and_then(Value::as_str)
            .map(str::to_string);

        let fields = object
            .iter()
            .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k.clone(), s)))
            .collect();

        Ok(Self {
            errcode,
            errmsg,
            fields,
        })
    }

    pub fn is_success(&self) -> bool {
        self.errcode == 0
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn url(&self) -> Option<&str> {
        self.get("url").filter(|u| !u.is_empty())
    }

    pub fn hash(&self) -> Option<&str> {
        self.get(HASH_FIELD)
    }
}

/// 把 JSON 标量渲染为签名用的字符串
///
/// 布尔值按 1/0 渲染；null、数组和对象不参与签名
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// 支付发起结果
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PayResult {
    /// 收银台跳转地址
    pub redirect_url: String,
    /// 收银台二维码地址 (PC端扫码使用，平台可能不返回)
    pub qrcode_url: Option<String>,
}
