//! BlendShape 选择
//!
//! 非交互式的条目管理与名称检索，供命令行等调用方生成缩放表。

mod entries;
mod lookup;

pub use entries::{BakeEntries, BakeEntry};
pub use lookup::{filter_indices, find_containing, find_exact, parse_bulk_names, resolve_bulk};
