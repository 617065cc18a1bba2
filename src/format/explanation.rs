//! 解释文件解析
//!
//! 文件结构：
//! - `===分类===` 或 `===Specular(高光相关)===`：分类行，之后的条目归入该分类
//! - `//` 开头：注释行
//! - `显示名|原始名|类型|默认值|描述|取值范围|状态|新手可编辑`：条目行，必须正好8个字段

use regex::Regex;

use crate::format::split_lines;
use crate::model::explanation::ExplanationEntry;

lazy_static::lazy_static! {
    static ref CATEGORY_HEADER: Regex = Regex::new(r"^={3}(.*?)={3}$").unwrap();
    static ref BRACKETED: Regex = Regex::new(r"[(（](.*?)[)）]").unwrap();
}

/// 条目行的字段数
pub const FIELD_COUNT: usize = 8;

/// 字段数不正确而被拒绝的行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 行号（从1开始，按非空行计数）
    pub line_number: usize,
    pub content: String,
    pub field_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ExplanationParse {
    pub entries: Vec<ExplanationEntry>,
    pub rejected: Vec<RejectedLine>,
}

/// 解析解释文件，只返回有效条目
pub fn parse_explanations(text: &str) -> Vec<ExplanationEntry> {
    parse_explanations_detailed(text).entries
}

/// 解析解释文件，同时返回被拒绝的行；坏行不会中断后续解析
pub fn parse_explanations_detailed(text: &str) -> ExplanationParse {
    let mut result = ExplanationParse::default();
    let mut current_category = String::new();

    for (index, line) in split_lines(text).enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = CATEGORY_HEADER.captures(trimmed) {
            current_category = category_name(&caps[1]);
            continue;
        }

        if trimmed.starts_with("//") {
            continue;
        }

        let parts: Vec<&str> = trimmed.split('|').map(str::trim).collect();
        if parts.len() != FIELD_COUNT {
            tracing::warn!(
                "解释文件格式错误：{}（需{}个字段，实际{}个）",
                trimmed,
                FIELD_COUNT,
                parts.len()
            );
            result.rejected.push(RejectedLine {
                line_number: index + 1,
                content: trimmed.to_string(),
                field_count: parts.len(),
            });
            continue;
        }

        result.entries.push(ExplanationEntry {
            display_name: parts[0].to_string(),
            original_name: parts[1].to_string(),
            type_name: parts[2].to_string(),
            default_value: parts[3].to_string(),
            description: parts[4].to_string(),
            value_range: parts[5].to_string(),
            status: parts[6].to_string(),
            is_editable_by_novice: parts[7].eq_ignore_ascii_case("true"),
            category: current_category.clone(),
        });
    }

    result
}

/// 分类名：有括号时取括号内的内容，否则取 === 之间的内容
fn category_name(header: &str) -> String {
    match BRACKETED.captures(header) {
        Some(caps) => caps[1].trim().to_string(),
        None => header.trim().to_string(),
    }
}
