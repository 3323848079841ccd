//! Mesh 数据模型
//!
//! 基础几何（顶点/法线/切线/UV/索引）、子网格、蒙皮权重、绑定姿势、包围盒，
//! 以及 BlendShape 帧数据。烘焙过程只重建 BlendShape，其余数据原样复制。

mod blend_shape;
mod mesh_data;
mod submesh;

pub use blend_shape::{BlendShape, BlendShapeFrame};
pub use mesh_data::Mesh;
pub use submesh::SubMesh;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 顶点骨骼权重
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VertexWeight {
    Bdef1 { bone: i32 },
    Bdef2 { bones: [i32; 2], weight: f32 },
    Bdef4 { bones: [i32; 4], weights: [f32; 4] },
    Sdef { bones: [i32; 2], weight: f32, c: Vec3, r0: Vec3, r1: Vec3 },
}

impl Default for VertexWeight {
    fn default() -> Self {
        VertexWeight::Bdef1 { bone: 0 }
    }
}

/// 轴对齐包围盒
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// 由顶点计算包围盒（空顶点返回零盒）
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (min, max) = points
            .iter()
            .skip(1)
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Self { min, max }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_aabb_empty() {
        assert_eq!(Aabb::from_points(&[]), Aabb::default());
    }
}
