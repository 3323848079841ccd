//! 缩放表（BlendShape 索引 → 缩放系数）

use std::collections::BTreeMap;

use crate::selection::BakeEntry;

/// 百分比转缩放系数：`clamp01(percent / 100)`
#[inline]
pub fn percent_to_scale(percent: f32) -> f32 {
    (percent / 100.0).clamp(0.0, 1.0)
}

/// 缩放表
///
/// 同一索引重复写入时后写覆盖先写。系数按字面值使用，
/// 这里不做钳制（2.0 会让 delta 翻倍）；百分比入口见 [`ScaleMap::from_entries`]。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScaleMap {
    scales: BTreeMap<usize, f32>,
}

impl ScaleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由条目构建，复刻烘焙前的聚合逻辑：
    /// 跳过越界索引，百分比换算并钳制到 [0, 1]，重复索引取最后一次。
    pub fn from_entries<'a, I>(entries: I, blend_shape_count: usize) -> Self
    where
        I: IntoIterator<Item = &'a BakeEntry>,
    {
        let mut map = Self::new();
        for entry in entries {
            if entry.blend_shape_index >= blend_shape_count {
                continue;
            }
            map.insert(entry.blend_shape_index, percent_to_scale(entry.new_max_percent));
        }
        map
    }

    /// 设置缩放系数，返回被覆盖的旧值
    pub fn insert(&mut self, index: usize, scale: f32) -> Option<f32> {
        self.scales.insert(index, scale)
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.scales.get(&index).copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.scales.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// 按索引升序遍历
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.scales.iter().map(|(&i, &s)| (i, s))
    }
}

impl FromIterator<(usize, f32)> for ScaleMap {
    fn from_iter<T: IntoIterator<Item = (usize, f32)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (index, scale) in iter {
            map.insert(index, scale);
        }
        map
    }
}
