// 金额换算工具
// 最小货币单位 (分) 与元字符串之间的定点换算，全程不使用浮点数

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// 将以分为单位的金额格式化为两位小数的元
///
/// # Arguments
/// * `minor_units` - 金额 (分)
///
/// # Returns
/// * 例如 12345 -> "123.45"，金额为负时返回 None
pub fn format_minor_units(minor_units: i64) -> Option<String> {
    if minor_units < 0 {
        return None;
    }

    // scale 为 2 的 Decimal 输出时恰好保留两位小数
    Some(Decimal::new(minor_units, 2).to_string())
}

/// 将元字符串解析为以分为单位的金额
///
/// 小数位超过两位、溢出或无法解析时返回 None
pub fn parse_to_minor_units(amount: &str) -> Option<i64> {
    let value = Decimal::from_str(amount.trim()).ok()?;
    if value.is_sign_negative() {
        return None;
    }

    let minor = value.checked_mul(Decimal::ONE_HUNDRED)?;
    if !minor.fract().is_zero() {
        return None;
    }

    minor.trunc().to_i64()
}
