//! FXH（HLSL 头文件）格式
//!
//! 支持两种声明：
//! - `#define NAME VALUE // 注释`
//! - `[static] [const] TYPE NAME = VALUE; // 注释`

use regex::Regex;

use crate::format::{split_lines, LINE_ENDING};
use crate::model::constant::{ConstantRecord, NO_DESCRIPTION, UNKNOWN_TYPE};

lazy_static::lazy_static! {
    // 值一直取到分号、// 注释或行尾
    static ref C_STYLE_DECL: Regex = Regex::new(
        r"(?i)^(static\s+)?(const\s+)?(\w+)\s+(\w+)\s*=\s*([^;\s][^;]*?)\s*(?:;.*|//.*)?$"
    ).unwrap();
}

const DEFINE_DIRECTIVE: &str = "#define";

/// 解析 FXH 文本，无法识别的行直接丢弃，顺序与文件一致
pub fn parse(text: &str) -> Vec<ConstantRecord> {
    let mut constants = Vec::new();
    for line in split_lines(text) {
        let trimmed = line.trim();
        let record = if trimmed.starts_with(DEFINE_DIRECTIVE) {
            parse_define(trimmed)
        } else {
            parse_declaration(trimmed)
        };
        match record {
            Some(r) => constants.push(r),
            None => tracing::debug!("FXH 行未识别，已跳过: {}", trimmed),
        }
    }
    constants
}

fn parse_define(line: &str) -> Option<ConstantRecord> {
    let (define_part, description) = split_comment(line);
    let tokens: Vec<&str> = define_part.split(' ').filter(|t| !t.is_empty()).collect();
    if tokens.len() < 3 {
        return None;
    }
    Some(
        ConstantRecord::new(tokens[1], tokens[2], UNKNOWN_TYPE)
            .with_description(description.unwrap_or(NO_DESCRIPTION)),
    )
}

fn parse_declaration(line: &str) -> Option<ConstantRecord> {
    let caps = C_STYLE_DECL.captures(line)?;
    let is_static = caps.get(1).is_some();
    let is_const = caps.get(2).is_some();
    let type_name = caps[3].trim();
    let name = caps[4].trim();
    let value = caps[5].trim_end();
    let (_, description) = split_comment(line);

    Some(
        ConstantRecord::new(name, value, type_name)
            .with_description(description.unwrap_or(NO_DESCRIPTION))
            .with_qualifiers(is_static, is_const),
    )
}

/// 在第一个 `//` 处切开，返回（声明部分，注释）
fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.split_once("//") {
        Some((code, comment)) => (code.trim(), Some(comment.trim())),
        None => (line.trim(), None),
    }
}

/// 生成 FXH 文本：统一写成 `#define` 形式（static/const 修饰不保留）
pub fn generate(records: &[ConstantRecord]) -> String {
    records
        .iter()
        .map(|c| format!("#define {} {} // {}", c.name, c.value, c.description))
        .collect::<Vec<_>>()
        .join(LINE_ENDING)
}
