//! 解释条目：为常量提供友好名称、范围、新手可编辑性与分类，并按名称链接到常量

use crate::model::constant::ConstantRecord;

/// 解释文件中的一行（8个字段）加上所在分类
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplanationEntry {
    /// 显示名称（给新手看的友好名称）
    pub display_name: String,
    /// 原始常量名，与 ConstantRecord.name 匹配
    pub original_name: String,
    pub type_name: String,
    pub default_value: String,
    pub description: String,
    /// 取值范围（如 "0-100"、"true/false"）
    pub value_range: String,
    /// 状态（如 "必填"、"可选"）
    pub status: String,
    pub is_editable_by_novice: bool,
    /// 所属分类（来自 ===xxx=== 行），之前没有分类行时为空
    pub category: String,
}

/// 将解释条目链接到常量，返回成功链接的数量
///
/// 每条常量取第一个 original_name 相同的解释（重复时先到先得），并用解释的类型覆盖常量类型。
/// 未匹配的常量会清除旧链接并恢复解析时的类型，因此重复执行结果一致。
pub fn link(records: &mut [ConstantRecord], explanations: &[ExplanationEntry]) -> usize {
    let mut linked = 0;
    for record in records.iter_mut() {
        match explanations.iter().find(|e| e.original_name == record.name) {
            Some(explanation) => {
                record.type_name = explanation.type_name.clone();
                record.explanation = Some(explanation.clone());
                linked += 1;
            }
            None => {
                record.explanation = None;
                record.type_name = record.declared_type.clone();
            }
        }
    }
    tracing::info!("解释链接完成: {}/{} 条常量已关联", linked, records.len());
    linked
}
