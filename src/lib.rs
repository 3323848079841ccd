//! BlendShape Range Baker - BlendShape 幅度重烘焙
//!
//! 将选中 BlendShape 的所有帧 delta（顶点/法线/切线）按比例缩放，
//! 使新的 100% 等于原来的 x%，其余 BlendShape 保持不变：
//! - Mesh 数据模型与 BlendShape 帧读写
//! - 缩放表（index → scale）与核心重建 `rescale`
//! - 条目/名称检索（批量粘贴、通配符）
//! - JSON Mesh 读写
//! - 全局烘焙配置

pub mod config;
pub mod io;
pub mod mesh;
pub mod morph;
pub mod selection;

pub use config::BakeConfig;
pub use mesh::{Aabb, BlendShape, BlendShapeFrame, Mesh, SubMesh, VertexWeight};
pub use morph::{bake_batch, rescale, BakeReport, Baker, ScaleMap};
pub use selection::{BakeEntries, BakeEntry};

use thiserror::Error;

/// delta 通道（用于报告长度不一致的具体数组）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeltaChannel {
    Vertices,
    Normals,
    Tangents,
}

impl std::fmt::Display for DeltaChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeltaChannel::Vertices => "vertices",
            DeltaChannel::Normals => "normals",
            DeltaChannel::Tangents => "tangents",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum BakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "BlendShape {shape_index} '{shape_name}' frame {frame_index}: delta {channel} length {actual}, expected {expected}"
    )]
    DeltaLengthMismatch {
        shape_index: usize,
        shape_name: String,
        frame_index: usize,
        channel: DeltaChannel,
        expected: usize,
        actual: usize,
    },

    #[error("BlendShape index {index} out of range (count {count})")]
    BlendShapeIndex { index: usize, count: usize },

    #[error("BlendShape {shape_index} frame index {frame_index} out of range (count {count})")]
    FrameIndex {
        shape_index: usize,
        frame_index: usize,
        count: usize,
    },

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, BakeError>;
