//! 烘焙器：在 `rescale` 外层处理命名、日志、报告和批处理

use rayon::prelude::*;

use crate::config::{get_config, BakeConfig};
use crate::mesh::Mesh;
use crate::selection::BakeEntries;
use crate::{BakeError, Result};

use super::{rescale, ScaleMap};

/// 单个被缩放的 BlendShape
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledShape {
    pub index: usize,
    pub name: String,
    pub scale: f32,
}

/// 烘焙结果报告
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BakeReport {
    pub source_name: String,
    pub output_name: String,
    pub vertex_count: usize,
    pub blend_shape_count: usize,
    /// 按索引升序
    pub scaled: Vec<ScaledShape>,
}

impl BakeReport {
    /// 形如 `Smile=65%, Blink=32.5%` 的摘要
    pub fn summary(&self) -> String {
        self.scaled
            .iter()
            .map(|s| format!("{}={}%", s.name, format_percent(s.scale * 100.0)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 最多保留一位小数，去掉末尾的 0
fn format_percent(percent: f32) -> String {
    let text = format!("{:.1}", percent);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// 烘焙器
pub struct Baker {
    config: BakeConfig,
}

impl Baker {
    /// 使用当前全局配置创建
    pub fn new() -> Self {
        Self { config: get_config() }
    }

    pub fn with_config(config: BakeConfig) -> Self {
        Self { config }
    }

    /// 输出 Mesh 名称
    pub fn output_name(&self, source_name: &str) -> String {
        format!("{}{}", source_name, self.config.output_suffix)
    }

    /// 烘焙：重缩放 + 重命名 + 生成报告
    pub fn bake(&self, source: &Mesh, scale_map: &ScaleMap) -> Result<(Mesh, BakeReport)> {
        let mut dst = rescale(source, scale_map)?;
        dst.name = self.output_name(&source.name);

        let mut scaled = Vec::with_capacity(scale_map.len());
        for (index, scale) in scale_map.iter() {
            // 不存在的索引不计入报告
            let Ok(name) = dst.blend_shape_name(index) else {
                continue;
            };
            if self.config.debug_log {
                log::debug!(
                    "[Baker] BlendShape {} '{}' x{} ({} 帧)",
                    index,
                    name,
                    scale,
                    dst.blend_shape_frame_count(index)?
                );
            }
            scaled.push(ScaledShape { index, name: name.to_string(), scale });
        }

        let report = BakeReport {
            source_name: source.name.clone(),
            output_name: dst.name.clone(),
            vertex_count: dst.vertex_count(),
            blend_shape_count: dst.blend_shape_count(),
            scaled,
        };
        log::info!("[Baker] 已生成 '{}'，缩放：{}", report.output_name, report.summary());

        Ok((dst, report))
    }

    /// 按条目烘焙；没有有效条目时返回错误
    pub fn bake_entries(&self, source: &Mesh, entries: &BakeEntries) -> Result<(Mesh, BakeReport)> {
        let scale_map = entries.to_scale_map(source.blend_shape_count());
        if scale_map.is_empty() {
            return Err(BakeError::Selection("没有有效条目".to_string()));
        }
        self.bake(source, &scale_map)
    }

    /// 批量烘焙多个相互独立的 Mesh
    ///
    /// 结果顺序与输入一致；单个任务失败不影响其它任务。
    /// `parallel_batch` 打开时使用 rayon 并行。
    pub fn bake_batch(&self, jobs: &[(Mesh, ScaleMap)]) -> Vec<Result<(Mesh, BakeReport)>> {
        log::info!(
            "[Baker] 批量烘焙 {} 个 Mesh（并行: {}）",
            jobs.len(),
            self.config.parallel_batch
        );

        let results: Vec<Result<(Mesh, BakeReport)>> = if self.config.parallel_batch {
            jobs.par_iter()
                .map(|(mesh, scale_map)| self.bake(mesh, scale_map))
                .collect()
        } else {
            jobs.iter()
                .map(|(mesh, scale_map)| self.bake(mesh, scale_map))
                .collect()
        };

        for (i, result) in results.iter().enumerate() {
            if let Err(e) = result {
                log::warn!("[Baker] Mesh '{}' 烘焙失败: {}", jobs[i].0.name, e);
            }
        }
        results
    }
}

impl Default for Baker {
    fn default() -> Self {
        Self::new()
    }
}

/// 使用全局配置批量烘焙，见 [`Baker::bake_batch`]
pub fn bake_batch(jobs: &[(Mesh, ScaleMap)]) -> Vec<Result<(Mesh, BakeReport)>> {
    Baker::new().bake_batch(jobs)
}
