//! BlendShape 名称检索

use regex::RegexBuilder;

use crate::{BakeError, Result};

/// 过滤 BlendShape 索引
///
/// - 空白查询：返回全部
/// - 含 `*`：整名通配（`*` 匹配任意字符），忽略大小写
/// - 其它：子串包含匹配，忽略大小写
pub fn filter_indices(names: &[String], query: &str) -> Result<Vec<usize>> {
    let q = query.trim();
    if q.is_empty() {
        return Ok((0..names.len()).collect());
    }

    if q.contains('*') {
        let pattern = format!("^{}$", regex::escape(q).replace("\\*", ".*"));
        let re = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        return Ok(names
            .iter()
            .enumerate()
            .filter(|(_, n)| re.is_match(n))
            .map(|(i, _)| i)
            .collect());
    }

    let needle = q.to_lowercase();
    Ok(names
        .iter()
        .enumerate()
        .filter(|(_, n)| n.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect())
}

/// 精确匹配（重名时返回第一个）
pub fn find_exact(names: &[String], name: &str) -> Option<usize> {
    names.iter().position(|n| n == name)
}

/// 包含匹配（忽略大小写），没有结果时报错
pub fn find_containing(names: &[String], needle: &str) -> Result<Vec<usize>> {
    let lower = needle.to_lowercase();
    let matches: Vec<usize> = names
        .iter()
        .enumerate()
        .filter(|(_, n)| n.to_lowercase().contains(&lower))
        .map(|(i, _)| i)
        .collect();
    if matches.is_empty() {
        return Err(BakeError::Selection(format!(
            "未找到包含 \"{}\" 的 BlendShape",
            needle
        )));
    }
    Ok(matches)
}

/// 解析批量粘贴的名称：按换行、逗号、分号、制表符分隔，去空白、去重（保留首次出现顺序）
pub fn parse_bulk_names(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in text.split(['\n', '\r', ',', ';', '\t']) {
        let token = token.trim();
        if token.is_empty() || tokens.iter().any(|t| t == token) {
            continue;
        }
        tokens.push(token.to_string());
    }
    tokens
}

/// 批量精确匹配，返回 (找到的索引, 未找到的名称)
pub fn resolve_bulk(names: &[String], text: &str) -> (Vec<usize>, Vec<String>) {
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for token in parse_bulk_names(text) {
        match find_exact(names, &token) {
            Some(i) => found.push(i),
            None => missing.push(token),
        }
    }
    (found, missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["EyeBlink_L", "EyeBlink_R", "MouthSmile", "eye_wide", "Brow.Up"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_blank_query_returns_all() {
        assert_eq!(filter_indices(&names(), "   ").unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_substring_case_insensitive() {
        assert_eq!(filter_indices(&names(), "EYE").unwrap(), vec![0, 1, 3]);
        assert_eq!(filter_indices(&names(), " smile ").unwrap(), vec![2]);
    }

    #[test]
    fn test_wildcard_whole_name() {
        assert_eq!(filter_indices(&names(), "eye*_l").unwrap(), vec![0]);
        assert_eq!(filter_indices(&names(), "*blink*").unwrap(), vec![0, 1]);
        // `.` 按字面匹配
        assert_eq!(filter_indices(&names(), "brow.*").unwrap(), vec![4]);
        assert!(filter_indices(&names(), "blink*").unwrap().is_empty());
    }

    #[test]
    fn test_find_exact_and_containing() {
        let names = names();
        assert_eq!(find_exact(&names, "MouthSmile"), Some(2));
        assert_eq!(find_exact(&names, "mouthsmile"), None);
        assert_eq!(find_containing(&names, "blink").unwrap(), vec![0, 1]);
        assert!(matches!(find_containing(&names, "cheek"), Err(BakeError::Selection(_))));
    }

    #[test]
    fn test_parse_bulk_names() {
        let text = "EyeBlink_L, MouthSmile\r\n\tEyeBlink_L;  ;Brow.Up\n";
        assert_eq!(parse_bulk_names(text), vec!["EyeBlink_L", "MouthSmile", "Brow.Up"]);
    }

    #[test]
    fn test_resolve_bulk() {
        let (found, missing) = resolve_bulk(&names(), "MouthSmile,Cheek,eye_wide");
        assert_eq!(found, vec![2, 3]);
        assert_eq!(missing, vec!["Cheek"]);
    }
}
