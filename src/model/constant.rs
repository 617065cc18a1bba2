//! 常量记录：一条从常量文件中提取出的命名配置值

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::data_core::AppError;
use crate::model::explanation::ExplanationEntry;

/// 无注释时使用的描述占位符
pub const NO_DESCRIPTION: &str = "无描述";

/// 未声明类型时的类型名
pub const UNKNOWN_TYPE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantRecord {
    /// 常量名（文件内唯一，对应声明或键名）
    #[serde(alias = "Name")]
    pub name: String,
    /// 当前值，始终保存原始文本
    #[serde(default, alias = "Value", deserialize_with = "raw_text")]
    pub value: String,
    /// 加载时的值（重置目标）
    #[serde(default, alias = "DefaultValue", deserialize_with = "raw_text")]
    pub default_value: String,
    #[serde(rename = "type", default, alias = "Type")]
    pub type_name: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(default, alias = "IsStatic")]
    pub is_static: bool,
    #[serde(default, alias = "IsConst")]
    pub is_const: bool,
    /// 关联的解释条目（加载后链接，不参与序列化）
    #[serde(skip)]
    pub explanation: Option<ExplanationEntry>,
    /// 解析时得到的类型，重新链接时用于恢复
    #[serde(skip)]
    pub declared_type: String,
}

impl ConstantRecord {
    /// 新建记录：当前值与默认值相同，类型同时作为声明类型
    pub fn new(name: impl Into<String>, value: impl Into<String>, type_name: impl Into<String>) -> Self {
        let value = value.into();
        let type_name = type_name.into();
        Self {
            name: name.into(),
            default_value: value.clone(),
            value,
            declared_type: type_name.clone(),
            type_name,
            description: String::new(),
            is_static: false,
            is_const: false,
            explanation: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_qualifiers(mut self, is_static: bool, is_const: bool) -> Self {
        self.is_static = is_static;
        self.is_const = is_const;
        self
    }

    /// 修改当前值；空值（含纯空白）会被拒绝，记录保持不变
    pub fn set_value(&mut self, new_value: &str) -> Result<(), AppError> {
        let trimmed = new_value.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidValue(format!("{} 的值不能为空", self.name)));
        }
        self.value = trimmed.to_string();
        Ok(())
    }

    /// 恢复为加载时的值
    pub fn reset_to_default(&mut self) {
        self.value = self.default_value.clone();
    }

    pub fn is_modified(&self) -> bool {
        self.value != self.default_value
    }

    pub fn is_linked(&self) -> bool {
        self.explanation.is_some()
    }

    /// 界面显示名：优先使用解释文件中的友好名称
    pub fn display_name(&self) -> &str {
        match &self.explanation {
            Some(e) if !e.display_name.is_empty() => &e.display_name,
            _ => &self.name,
        }
    }

    /// 所属分类（来自解释条目，未链接时为空）
    pub fn category(&self) -> &str {
        self.explanation.as_ref().map(|e| e.category.as_str()).unwrap_or("")
    }
}

/// 根据值文本推测类型：依次尝试 int、float、bool，否则为 unknown
pub fn guess_type(value: &str) -> &'static str {
    let v = value.trim();
    if v.parse::<i32>().is_ok() {
        return "int";
    }
    if is_float_literal(v) {
        return "float";
    }
    if v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false") {
        return "bool";
    }
    UNKNOWN_TYPE
}

/// 浮点字面量，允许 HLSL 的 f/F 后缀（如 9.5f）
fn is_float_literal(v: &str) -> bool {
    if v.parse::<f32>().is_ok() && !is_special_float_word(v) {
        return true;
    }
    match v.strip_suffix(['f', 'F']) {
        Some(body) if !body.is_empty() => body.parse::<f32>().is_ok() && !is_special_float_word(body),
        _ => false,
    }
}

// Rust 会把 "inf"/"nan" 解析为浮点数，shader 常量里它们不是数字字面量
fn is_special_float_word(v: &str) -> bool {
    v.trim_start_matches(['+', '-']).chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
}

/// 反序列化值字段：字符串原样保留，数字/布尔/空转为原始文本
fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
