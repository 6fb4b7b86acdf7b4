// 签名工具函数
// 提供参数规范化、MD5签名计算与校验、随机串生成等安全功能

use crate::error::{GatewayError, GatewayResult};
use md5::{Digest, Md5};
use rand::{distributions::Alphanumeric, Rng};
use subtle::ConstantTimeEq;

/// 签名字段名
pub const HASH_FIELD: &str = "hash";

/// 随机串默认长度
pub const NONCE_LENGTH: usize = 16;

/// 生成规范化签名串
///
/// 去掉 `hash` 字段和空值，按键的字节序排序后以表单编码拼接
///
/// # Arguments
/// * `fields` - 待签名的参数
///
/// # Returns
/// * `k1=v1&k2=v2` 形式的规范化字符串
pub fn canonical_query<I, K, V>(fields: I) -> GatewayResult<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut entries: Vec<(K, V)> = fields
        .into_iter()
        .filter(|(k, v)| k.as_ref() != HASH_FIELD && !v.as_ref().is_empty())
        .collect();

    // 显式按字节比较，不依赖任何本地化排序规则
    entries.sort_by(|a, b| a.0.as_ref().as_bytes().cmp(b.0.as_ref().as_bytes()));

    let pairs: Vec<(&str, &str)> = entries
        .iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .collect();

    serde_urlencoded::to_string(&pairs)
        .map_err(|e| GatewayError::protocol(format!("failed to encode canonical query: {}", e)))
}

/// 计算参数签名
///
/// # Arguments
/// * `fields` - 待签名的参数
/// * `secret` - 应用密钥
///
/// # Returns
/// * 小写十六进制的 MD5(规范化签名串 + 密钥)
pub fn canonical_sign<I, K, V>(fields: I, secret: &str) -> GatewayResult<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = canonical_query(fields)?;

    let mut hasher = Md5::new();
    hasher.update(query.as_bytes());
    hasher.update(secret.as_bytes());

    Ok(hex::encode(hasher.finalize()))
}

/// 校验带 `hash` 字段的参数签名
///
/// # Arguments
/// * `fields` - 含 `hash` 的参数
/// * `secret` - 应用密钥
///
/// # Returns
/// * 签名是否有效，缺少 `hash` 时返回 false
pub fn verify<I, K, V>(fields: I, secret: &str) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let entries: Vec<(K, V)> = fields.into_iter().collect();

    let provided = match entries.iter().find(|(k, _)| k.as_ref() == HASH_FIELD) {
        Some((_, v)) => v.as_ref(),
        None => return false,
    };

    let expected = match canonical_sign(
        entries.iter().map(|(k, v)| (k.as_ref(), v.as_ref())),
        secret,
    ) {
        Ok(expected) => expected,
        Err(e) => {
            log::warn!("Failed to compute signature for verification: {}", e);
            return false;
        }
    };

    constant_time_eq(&expected, provided)
}

/// 常量时间字符串比较 (防止时序攻击)
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// 生成随机字符串
///
/// 从 `[A-Za-z0-9]` 中均匀抽取字符，随机源由调用方注入
///
/// # Arguments
/// * `rng` - 随机数生成器
/// * `length` - 字符串长度
pub fn generate_nonce<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}
