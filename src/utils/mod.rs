// 工具函数模块
// 包含签名、金额换算、输入校验等通用工具

pub mod amount;
pub mod crypto;
pub mod validation;

// 重新导出常用函数
pub use amount::*;
pub use crypto::*;
pub use validation::*;
