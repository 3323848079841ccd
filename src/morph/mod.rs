//! BlendShape 重缩放
//!
//! - ScaleMap: 索引 → 缩放系数
//! - rescale: 复制 Mesh 并按缩放表重建 BlendShape（纯函数，无日志、无 IO）
//! - Baker: 命名输出、日志与报告，以及多 Mesh 批处理

mod baker;
mod rescaler;
mod scale_map;

pub use baker::{bake_batch, BakeReport, Baker, ScaledShape};
pub use rescaler::rescale;
pub use scale_map::{percent_to_scale, ScaleMap};
