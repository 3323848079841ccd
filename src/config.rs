//! 烘焙配置
//!
//! 所有参数扁平化，直接在代码中修改默认值即可；命令行工具启动时会覆盖部分字段。

use once_cell::sync::Lazy;
use std::sync::RwLock;

/// 烘焙配置（扁平化，不嵌套）
#[derive(Debug, Clone)]
pub struct BakeConfig {
    // ========== 条目 ==========
    /// 新增条目的默认比例（新 100% = 旧 x%），默认 65.0
    pub default_percent: f32,

    // ========== 输出 ==========
    /// 输出 Mesh 名称后缀，默认 "_Edited"
    pub output_suffix: String,

    // ========== 批处理 ==========
    /// 多个 Mesh 批量烘焙时是否使用 rayon 并行，默认 true
    pub parallel_batch: bool,

    // ========== 调试 ==========
    /// 是否逐个 BlendShape 输出调试日志，默认 false
    pub debug_log: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            default_percent: 65.0,
            output_suffix: "_Edited".to_string(),
            parallel_batch: true,
            debug_log: false,
        }
    }
}

/// 全局配置实例
static BAKE_CONFIG: Lazy<RwLock<BakeConfig>> = Lazy::new(|| {
    RwLock::new(BakeConfig::default())
});

/// 获取当前配置（只读）
pub fn get_config() -> BakeConfig {
    BAKE_CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// 手动设置配置
pub fn set_config(config: BakeConfig) {
    *BAKE_CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config;
}

/// 重置为默认配置
pub fn reset_config() {
    *BAKE_CONFIG.write().unwrap_or_else(|e| e.into_inner()) = BakeConfig::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BakeConfig::default();
        assert_eq!(config.default_percent, 65.0);
        assert_eq!(config.output_suffix, "_Edited");
        assert!(config.parallel_batch);
        assert!(!config.debug_log);
    }

    #[test]
    fn test_set_and_reset_global() {
        let custom = BakeConfig {
            default_percent: 40.0,
            output_suffix: "_Soft".to_string(),
            parallel_batch: false,
            debug_log: true,
        };
        set_config(custom);
        let current = get_config();
        assert_eq!(current.default_percent, 40.0);
        assert_eq!(current.output_suffix, "_Soft");
        assert!(!current.parallel_batch);
        assert!(current.debug_log);

        reset_config();
        let current = get_config();
        assert_eq!(current.default_percent, 65.0);
        assert_eq!(current.output_suffix, "_Edited");
        assert!(current.parallel_batch);
    }
}
