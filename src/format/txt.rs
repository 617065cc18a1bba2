//! TXT 格式：`NAME = VALUE // 注释`，`#` 开头或不含 `=` 的行视为说明并忽略

use crate::format::{split_lines, LINE_ENDING};
use crate::model::constant::{ConstantRecord, UNKNOWN_TYPE};

pub fn parse(text: &str) -> Vec<ConstantRecord> {
    let mut constants = Vec::new();
    for line in split_lines(text) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        // 只在第一个 '=' 处切开，值本身可以包含 '='
        let Some((name, rest)) = trimmed.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("TXT 行缺少常量名，已跳过: {}", trimmed);
            continue;
        }
        let (value, description) = match rest.split_once("//") {
            Some((value, comment)) => (value.trim(), comment.trim()),
            None => (rest.trim(), ""),
        };
        constants.push(ConstantRecord::new(name, value, UNKNOWN_TYPE).with_description(description));
    }
    constants
}

pub fn generate(records: &[ConstantRecord]) -> String {
    records
        .iter()
        .map(|c| format!("{} = {} // {}", c.name, c.value, c.description))
        .collect::<Vec<_>>()
        .join(LINE_ENDING)
}
