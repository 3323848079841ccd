//! Mesh 结构与 BlendShape 读写接口

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::{BakeError, Result};

use super::{Aabb, BlendShape, BlendShapeFrame, SubMesh, VertexWeight};

/// Mesh
///
/// 基础几何字段可直接访问；BlendShape 只能通过下面的接口读写，
/// 写入时会校验 delta 长度与顶点数一致。
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
    #[serde(default)]
    pub normals: Vec<Vec3>,
    #[serde(default)]
    pub tangents: Vec<Vec4>,
    #[serde(default)]
    pub uvs: Vec<Vec2>,
    #[serde(default)]
    pub indices: Vec<u32>,
    #[serde(default)]
    pub submeshes: Vec<SubMesh>,
    #[serde(default)]
    pub bone_weights: Vec<VertexWeight>,
    #[serde(default)]
    pub bind_poses: Vec<Mat4>,
    #[serde(default)]
    pub bounds: Aabb,
    #[serde(default)]
    blend_shapes: Vec<BlendShape>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// 由顶点创建 Mesh，并计算包围盒
    pub fn from_vertices(name: impl Into<String>, vertices: Vec<Vec3>) -> Self {
        let bounds = Aabb::from_points(&vertices);
        Self { name: name.into(), vertices, bounds, ..Default::default() }
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取 BlendShape 数量
    pub fn blend_shape_count(&self) -> usize {
        self.blend_shapes.len()
    }

    pub fn blend_shapes(&self) -> &[BlendShape] {
        &self.blend_shapes
    }

    fn blend_shape(&self, index: usize) -> Result<&BlendShape> {
        self.blend_shapes.get(index).ok_or(BakeError::BlendShapeIndex {
            index,
            count: self.blend_shapes.len(),
        })
    }

    fn frame(&self, index: usize, frame_index: usize) -> Result<&BlendShapeFrame> {
        let shape = self.blend_shape(index)?;
        shape.frames.get(frame_index).ok_or(BakeError::FrameIndex {
            shape_index: index,
            frame_index,
            count: shape.frames.len(),
        })
    }

    /// 获取 BlendShape 名称
    pub fn blend_shape_name(&self, index: usize) -> Result<&str> {
        Ok(&self.blend_shape(index)?.name)
    }

    /// 按顺序列出所有 BlendShape 名称
    pub fn blend_shape_names(&self) -> Vec<String> {
        self.blend_shapes.iter().map(|s| s.name.clone()).collect()
    }

    /// 通过名称查找 BlendShape（重名时返回第一个）
    pub fn find_blend_shape_by_name(&self, name: &str) -> Option<usize> {
        self.blend_shapes.iter().position(|s| s.name == name)
    }

    /// 获取帧数量
    pub fn blend_shape_frame_count(&self, index: usize) -> Result<usize> {
        Ok(self.blend_shape(index)?.frame_count())
    }

    /// 获取帧权重
    pub fn blend_shape_frame_weight(&self, index: usize, frame_index: usize) -> Result<f32> {
        Ok(self.frame(index, frame_index)?.weight)
    }

    /// 读取一帧的独立副本（权重 + 三组 delta）
    ///
    /// delta 长度与顶点数不一致时返回 `DeltaLengthMismatch`，不做截断或补齐。
    pub fn blend_shape_frame(&self, index: usize, frame_index: usize) -> Result<BlendShapeFrame> {
        let frame = self.frame(index, frame_index)?;
        frame.check_len(
            self.vertex_count(),
            index,
            &self.blend_shapes[index].name,
            frame_index,
        )?;
        Ok(frame.clone())
    }

    /// 清空所有 BlendShape
    pub fn clear_blend_shapes(&mut self) {
        self.blend_shapes.clear();
    }

    /// 追加一个空 BlendShape，返回其索引
    pub fn add_blend_shape(&mut self, name: impl Into<String>) -> usize {
        let index = self.blend_shapes.len();
        self.blend_shapes.push(BlendShape::new(name));
        index
    }

    /// 向指定 BlendShape 追加一帧
    pub fn add_blend_shape_frame(&mut self, index: usize, frame: BlendShapeFrame) -> Result<()> {
        let vertex_count = self.vertex_count();
        let count = self.blend_shapes.len();
        let shape = self
            .blend_shapes
            .get_mut(index)
            .ok_or(BakeError::BlendShapeIndex { index, count })?;
        frame.check_len(vertex_count, index, &shape.name, shape.frames.len())?;
        shape.frames.push(frame);
        Ok(())
    }

    /// 校验所有帧的 delta 长度
    pub fn validate_blend_shapes(&self) -> Result<()> {
        let vertex_count = self.vertex_count();
        for (i, shape) in self.blend_shapes.iter().enumerate() {
            for (f, frame) in shape.frames.iter().enumerate() {
                frame.check_len(vertex_count, i, &shape.name, f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_vertex_mesh() -> Mesh {
        Mesh::from_vertices("Face", vec![Vec3::ZERO, Vec3::X])
    }

    #[test]
    fn test_add_and_read_frames() {
        let mut mesh = two_vertex_mesh();
        let smile = mesh.add_blend_shape("Smile");
        mesh.add_blend_shape_frame(smile, BlendShapeFrame::from_vertices(50.0, vec![Vec3::Y; 2]))
            .unwrap();
        mesh.add_blend_shape_frame(smile, BlendShapeFrame::from_vertices(100.0, vec![Vec3::Z; 2]))
            .unwrap();

        assert_eq!(mesh.blend_shape_count(), 1);
        assert_eq!(mesh.blend_shape_name(0).unwrap(), "Smile");
        assert_eq!(mesh.blend_shape_frame_count(0).unwrap(), 2);
        assert_eq!(mesh.blend_shape_frame_weight(0, 1).unwrap(), 100.0);

        let frame = mesh.blend_shape_frame(0, 0).unwrap();
        assert_eq!(frame.delta_vertices, vec![Vec3::Y; 2]);
    }

    #[test]
    fn test_add_frame_rejects_wrong_length() {
        let mut mesh = two_vertex_mesh();
        let index = mesh.add_blend_shape("Blink");
        let result = mesh.add_blend_shape_frame(index, BlendShapeFrame::from_vertices(100.0, vec![Vec3::Y; 3]));
        assert!(matches!(result, Err(BakeError::DeltaLengthMismatch { expected: 2, actual: 3, .. })));
        assert_eq!(mesh.blend_shape_frame_count(index).unwrap(), 0);
    }

    #[test]
    fn test_index_out_of_range() {
        let mesh = two_vertex_mesh();
        assert!(matches!(
            mesh.blend_shape_name(0),
            Err(BakeError::BlendShapeIndex { index: 0, count: 0 })
        ));

        let mut mesh = mesh;
        mesh.add_blend_shape("Smile");
        assert!(matches!(
            mesh.blend_shape_frame_weight(0, 2),
            Err(BakeError::FrameIndex { shape_index: 0, frame_index: 2, count: 0 })
        ));
    }

    #[test]
    fn test_duplicate_names_find_first() {
        let mut mesh = two_vertex_mesh();
        mesh.add_blend_shape("Dup");
        mesh.add_blend_shape("Other");
        mesh.add_blend_shape("Dup");
        assert_eq!(mesh.blend_shape_count(), 3);
        assert_eq!(mesh.find_blend_shape_by_name("Dup"), Some(0));
        assert_eq!(mesh.find_blend_shape_by_name("Missing"), None);
    }

    #[test]
    fn test_clear_keeps_geometry() {
        let mut mesh = two_vertex_mesh();
        mesh.indices = vec![0, 1, 0];
        mesh.add_blend_shape("A");
        mesh.clear_blend_shapes();
        assert_eq!(mesh.blend_shape_count(), 0);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 0]);
    }
}
