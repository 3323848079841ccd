//! 子网格定义

use serde::{Deserialize, Serialize};

/// 子网格（索引区间 + 材质）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubMesh {
    pub begin_index: u32,
    pub index_count: u32,
    pub material_id: i32,
}

impl SubMesh {
    pub fn new(begin_index: u32, index_count: u32, material_id: i32) -> Self {
        Self { begin_index, index_count, material_id }
    }
}
