//! BlendShape 定义

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{BakeError, DeltaChannel, Result};

/// BlendShape 帧
///
/// `weight` 为该帧完全生效时的百分比（通常 0~100），烘焙时原样保留。
/// 三组 delta 与基础顶点一一对应。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendShapeFrame {
    pub weight: f32,
    pub delta_vertices: Vec<Vec3>,
    pub delta_normals: Vec<Vec3>,
    pub delta_tangents: Vec<Vec3>,
}

impl BlendShapeFrame {
    pub fn new(
        weight: f32,
        delta_vertices: Vec<Vec3>,
        delta_normals: Vec<Vec3>,
        delta_tangents: Vec<Vec3>,
    ) -> Self {
        Self { weight, delta_vertices, delta_normals, delta_tangents }
    }

    /// 只有位置 delta 的帧，法线/切线 delta 填零
    pub fn from_vertices(weight: f32, delta_vertices: Vec<Vec3>) -> Self {
        let len = delta_vertices.len();
        Self {
            weight,
            delta_vertices,
            delta_normals: vec![Vec3::ZERO; len],
            delta_tangents: vec![Vec3::ZERO; len],
        }
    }

    /// 将三组 delta 逐元素乘以 `scale`
    ///
    /// 法线/切线按普通向量处理，不做归一化。
    pub fn scale_deltas(&mut self, scale: f32) {
        for v in self
            .delta_vertices
            .iter_mut()
            .chain(self.delta_normals.iter_mut())
            .chain(self.delta_tangents.iter_mut())
        {
            *v *= scale;
        }
    }

    /// 校验三组 delta 长度等于顶点数
    pub fn check_len(
        &self,
        vertex_count: usize,
        shape_index: usize,
        shape_name: &str,
        frame_index: usize,
    ) -> Result<()> {
        let channels = [
            (DeltaChannel::Vertices, self.delta_vertices.len()),
            (DeltaChannel::Normals, self.delta_normals.len()),
            (DeltaChannel::Tangents, self.delta_tangents.len()),
        ];
        for (channel, actual) in channels {
            if actual != vertex_count {
                return Err(BakeError::DeltaLengthMismatch {
                    shape_index,
                    shape_name: shape_name.to_string(),
                    frame_index,
                    channel,
                    expected: vertex_count,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// BlendShape（名称 + 有序帧列表）
///
/// 名称允许重复，身份以在 Mesh 中的位置为准。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendShape {
    pub name: String,
    pub frames: Vec<BlendShapeFrame>,
}

impl BlendShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), frames: Vec::new() }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_deltas() {
        let mut frame = BlendShapeFrame::new(
            100.0,
            vec![Vec3::new(2.0, -4.0, 1.0)],
            vec![Vec3::new(0.0, 1.0, 0.0)],
            vec![Vec3::new(1.0, 0.0, 0.0)],
        );
        frame.scale_deltas(0.25);
        assert_eq!(frame.weight, 100.0);
        assert_eq!(frame.delta_vertices[0], Vec3::new(0.5, -1.0, 0.25));
        assert_eq!(frame.delta_normals[0], Vec3::new(0.0, 0.25, 0.0));
        assert_eq!(frame.delta_tangents[0], Vec3::new(0.25, 0.0, 0.0));
    }

    #[test]
    fn test_scaled_normals_not_renormalized() {
        let mut frame = BlendShapeFrame::new(
            100.0,
            vec![Vec3::ZERO],
            vec![Vec3::Y],
            vec![Vec3::X],
        );
        frame.scale_deltas(0.5);
        assert!((frame.delta_normals[0].length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_check_len_reports_channel() {
        let frame = BlendShapeFrame::new(
            50.0,
            vec![Vec3::ZERO; 3],
            vec![Vec3::ZERO; 3],
            vec![Vec3::ZERO; 2],
        );
        assert!(frame.check_len(3, 0, "a", 0).is_err());
        match frame.check_len(3, 4, "Smile", 1) {
            Err(BakeError::DeltaLengthMismatch {
                shape_index,
                shape_name,
                frame_index,
                channel,
                expected,
                actual,
            }) => {
                assert_eq!(shape_index, 4);
                assert_eq!(shape_name, "Smile");
                assert_eq!(frame_index, 1);
                assert_eq!(channel, DeltaChannel::Tangents);
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_from_vertices_fills_zero() {
        let frame = BlendShapeFrame::from_vertices(100.0, vec![Vec3::ONE; 4]);
        assert_eq!(frame.delta_normals, vec![Vec3::ZERO; 4]);
        assert_eq!(frame.delta_tangents, vec![Vec3::ZERO; 4]);
        assert!(frame.check_len(4, 0, "x", 0).is_ok());
    }
}
