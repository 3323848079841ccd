//! 烘焙条目

use crate::morph::ScaleMap;

/// 烘焙条目：新 100% = 旧 `new_max_percent`%
#[derive(Clone, Debug, PartialEq)]
pub struct BakeEntry {
    pub blend_shape_index: usize,
    pub display_name: String,
    pub new_max_percent: f32,
}

/// 条目列表（按添加顺序，索引不重复）
#[derive(Clone, Debug, Default)]
pub struct BakeEntries {
    entries: Vec<BakeEntry>,
}

impl BakeEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BakeEntry> {
        self.entries.iter()
    }

    pub fn get(&self, position: usize) -> Option<&BakeEntry> {
        self.entries.get(position)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.iter().any(|e| e.blend_shape_index == index)
    }

    /// 添加条目；越界或已存在的索引被忽略，返回是否新增
    pub fn add(&mut self, index: usize, names: &[String], percent: f32) -> bool {
        let Some(name) = names.get(index) else {
            return false;
        };
        if self.contains(index) {
            return false;
        }
        self.entries.push(BakeEntry {
            blend_shape_index: index,
            display_name: name.clone(),
            new_max_percent: percent,
        });
        true
    }

    /// 批量添加，返回新增数量
    pub fn add_all<I>(&mut self, indices: I, names: &[String], percent: f32) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        indices
            .into_iter()
            .filter(|&i| self.add(i, names, percent))
            .count()
    }

    /// 按位置删除
    pub fn remove(&mut self, position: usize) -> Option<BakeEntry> {
        if position < self.entries.len() {
            Some(self.entries.remove(position))
        } else {
            None
        }
    }

    /// 设置单个索引的比例，返回是否找到
    pub fn set_percent(&mut self, index: usize, percent: f32) -> bool {
        match self.entries.iter_mut().find(|e| e.blend_shape_index == index) {
            Some(entry) => {
                entry.new_max_percent = percent;
                true
            }
            None => false,
        }
    }

    /// 批量设定：所有条目使用同一比例
    pub fn set_all_percent(&mut self, percent: f32) {
        for entry in &mut self.entries {
            entry.new_max_percent = percent;
        }
    }

    /// 根据新的名称列表刷新：删除失效索引并更新显示名
    pub fn refresh(&mut self, names: &[String]) {
        self.entries.retain_mut(|entry| match names.get(entry.blend_shape_index) {
            Some(name) => {
                entry.display_name = name.clone();
                true
            }
            None => false,
        });
    }

    pub fn to_scale_map(&self, blend_shape_count: usize) -> ScaleMap {
        ScaleMap::from_entries(&self.entries, blend_shape_count)
    }
}

impl<'a> IntoIterator for &'a BakeEntries {
    type Item = &'a BakeEntry;
    type IntoIter = std::slice::Iter<'a, BakeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
