//! 展示层辅助：编辑权限、搜索过滤、按分类分组
//!
//! 权限模式由调用方显式传入，核心不持有全局的专家模式开关。

use serde::{Deserialize, Serialize};

use crate::model::constant::ConstantRecord;

/// 未链接解释或分类为空的常量所在分组
pub const UNCATEGORIZED: &str = "未分类";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// 新手模式：只有解释文件标记为可编辑的常量可修改
    #[default]
    Novice,
    Expert,
}

/// 常量在给定模式下是否只读
pub fn is_read_only(record: &ConstantRecord, mode: EditMode) -> bool {
    match mode {
        EditMode::Expert => false,
        EditMode::Novice => !record
            .explanation
            .as_ref()
            .is_some_and(|e| e.is_editable_by_novice),
    }
}

pub fn editable_count(records: &[ConstantRecord], mode: EditMode) -> usize {
    records.iter().filter(|r| !is_read_only(r, mode)).count()
}

/// 搜索匹配：名称、显示名、值、描述、类型中任一包含关键字（不区分大小写）
pub fn matches_filter(record: &ConstantRecord, filter: &str) -> bool {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        record.name.as_str(),
        record.display_name(),
        record.value.as_str(),
        record.description.as_str(),
        record.type_name.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// 一个分类下的常量（按原始顺序保存索引）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantGroup {
    pub name: String,
    /// 在常量集合中的下标
    pub indices: Vec<usize>,
}

impl ConstantGroup {
    /// 组内满足过滤条件的常量
    pub fn filtered<'a>(&self, records: &'a [ConstantRecord], filter: &str) -> Vec<&'a ConstantRecord> {
        self.indices
            .iter()
            .filter_map(|&i| records.get(i))
            .filter(|r| matches_filter(r, filter))
            .collect()
    }
}

/// 按解释分类分组，分组顺序为首次出现的顺序
pub fn group_by_category(records: &[ConstantRecord]) -> Vec<ConstantGroup> {
    let mut groups: Vec<ConstantGroup> = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let name = match record.category() {
            "" => UNCATEGORIZED,
            category => category,
        };
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.indices.push(index),
            None => groups.push(ConstantGroup {
                name: name.to_string(),
                indices: vec![index],
            }),
        }
    }
    groups
}
