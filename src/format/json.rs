//! JSON 格式：常量记录数组，字段名 name / value / defaultValue / type / description / isStatic / isConst

use serde_json::Value;

use crate::model::constant::{guess_type, ConstantRecord};
use crate::model::data_core::AppError;

/// 旧版简化 JSON（键值对象）解析出的常量描述
pub const FROM_JSON_DESCRIPTION: &str = "从JSON解析";

/// 解析常量数组；任何错误都使整个文档失败，不返回部分结果
pub fn parse(text: &str) -> Result<Vec<ConstantRecord>, AppError> {
    let mut records: Vec<ConstantRecord> = serde_json::from_str(text)?;
    for (index, record) in records.iter_mut().enumerate() {
        if record.name.trim().is_empty() {
            return Err(AppError::InvalidRecord(format!("第{}条记录缺少常量名", index + 1)));
        }
        // 默认值始终为加载时的值，忽略文件中保存的 defaultValue
        record.default_value = record.value.clone();
        record.declared_type = record.type_name.clone();
    }
    Ok(records)
}

/// 解析旧版键值对象 `{"MAX_LIGHTS": 8, "AMBIENT": 0.2}`，按键在文档中的顺序生成常量
pub fn parse_flat_object(text: &str) -> Result<Vec<ConstantRecord>, AppError> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Object(map) = root else {
        return Err(AppError::InvalidRecord("根节点必须是JSON对象".into()));
    };

    let mut records = Vec::with_capacity(map.len());
    for (key, value) in map {
        if key.trim().is_empty() {
            continue;
        }
        let raw = match value {
            Value::String(s) => s,
            Value::Object(_) | Value::Array(_) => {
                tracing::debug!("键 {} 的值不是标量，已跳过", key);
                continue;
            }
            other => other.to_string(),
        };
        let type_name = guess_type(&raw);
        records.push(ConstantRecord::new(key, raw, type_name).with_description(FROM_JSON_DESCRIPTION));
    }
    Ok(records)
}

/// 生成带缩进的 JSON 数组（字段顺序固定，便于比对）
pub fn generate(records: &[ConstantRecord]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(records)?)
}
