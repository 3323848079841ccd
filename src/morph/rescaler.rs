//! BlendShape 重缩放核心
//!
//! 流程：复制 Mesh → 读取所有 BlendShape 帧（独立副本）→ 对缩放表中的条目按比例缩放
//! → 清空 BlendShape → 按原顺序逐帧重建。

use crate::mesh::{BlendShapeFrame, Mesh};
use crate::Result;

use super::ScaleMap;

/// 重缩放 BlendShape，返回新的 Mesh，不修改 `source`
///
/// - 缩放表中的 BlendShape：所有帧的顶点/法线/切线 delta 乘以系数，不归一化
/// - 不在缩放表中的 BlendShape：帧数据逐位保持不变
/// - 缩放表中不存在的索引被忽略
/// - 帧权重、帧顺序、BlendShape 顺序及基础几何不变
///
/// 任意帧的 delta 长度与顶点数不一致时整体失败，错误中包含 BlendShape 与帧索引。
pub fn rescale(source: &Mesh, scale_map: &ScaleMap) -> Result<Mesh> {
    let mut dst = source.clone();

    let shape_count = dst.blend_shape_count();
    let mut cached: Vec<(String, Vec<BlendShapeFrame>)> = Vec::with_capacity(shape_count);

    // 缓存并按需缩放
    for i in 0..shape_count {
        let name = dst.blend_shape_name(i)?.to_string();
        let frame_count = dst.blend_shape_frame_count(i)?;
        let scale = scale_map.get(i);

        let mut frames = Vec::with_capacity(frame_count);
        for f in 0..frame_count {
            let mut frame = dst.blend_shape_frame(i, f)?;
            if let Some(scale) = scale {
                frame.scale_deltas(scale);
            }
            frames.push(frame);
        }
        cached.push((name, frames));
    }

    // 重建帧
    dst.clear_blend_shapes();
    for (name, frames) in cached {
        let index = dst.add_blend_shape(name);
        for frame in frames {
            dst.add_blend_shape_frame(index, frame)?;
        }
    }

    Ok(dst)
}
