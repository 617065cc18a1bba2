//! 编辑器选项：解释文件自动查找、编辑模式

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::data_core::AppError;
use crate::model::view::EditMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// 加载常量文件后自动查找同名解释文件
    pub auto_load_explanation: bool,
    /// 解释文件查找目录，为空时使用常量文件所在目录
    pub explanation_dirs: Vec<PathBuf>,
    /// 解释文件扩展名，按优先级排列
    pub explanation_extensions: Vec<String>,
    pub edit_mode: EditMode,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            auto_load_explanation: true,
            explanation_dirs: Vec::new(),
            explanation_extensions: vec!["txt".into(), "expl".into()],
            edit_mode: EditMode::Novice,
        }
    }
}

impl EditorOptions {
    /// 从JSON配置文件读取，缺失的字段取默认值
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        let options: Self = serde_json::from_str(&text)?;
        tracing::info!("已读取配置: {}", path.display());
        Ok(options)
    }
}
