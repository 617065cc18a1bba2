//! AppState：常量文件会话状态（加载、解释链接、编辑、保存/导出）

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::EditorOptions;
use crate::format::{self, explanation::parse_explanations_detailed, ConstantFormat};
use crate::model::constant::ConstantRecord;
use crate::model::explanation::{link, ExplanationEntry};
use crate::utils::fs::{ensure_same_stem, find_explanation_file, read_text_file, write_text_file};

#[derive(Debug, Default)]
pub struct AppState {
    pub options: EditorOptions,
    pub source_path: Option<PathBuf>,
    pub format: ConstantFormat,
    pub constants: Vec<ConstantRecord>,
    pub explanations: Vec<ExplanationEntry>,
    pub explanation_path: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("记录无效: {0}")]
    InvalidRecord(String),
    #[error("值无效: {0}")]
    InvalidValue(String),
    #[error("未找到常量: {0}")]
    NotFound(String),
    #[error("解释文件必须与常量文件同名（当前常量文件：{expected}，解释文件：{found}）")]
    NameMismatch { expected: String, found: String },
    #[error("状态错误: {0}")]
    State(String),
}

/// 当前会话的统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub linked: usize,
    pub modified: usize,
}

impl AppState {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// 加载常量文件，成功后整体替换当前集合；失败时保持原状态
    pub fn load_file(&mut self, p: &Path) -> Result<(), AppError> {
        let text = read_text_file(p)?;
        let format = ConstantFormat::from_path(p);
        let constants = format::parse(&text, format)?;
        tracing::info!("已加载文件: {}（{} 格式，{} 条常量）", p.display(), format, constants.len());

        self.source_path = Some(p.to_path_buf());
        self.format = format;
        self.constants = constants;
        self.explanations.clear();
        self.explanation_path = None;

        if self.options.auto_load_explanation {
            self.auto_load_explanation(p);
        }
        Ok(())
    }

    /// 自动查找并加载同名解释文件；找不到或加载失败只记录日志
    fn auto_load_explanation(&mut self, constant_file: &Path) {
        let found = find_explanation_file(
            constant_file,
            &self.options.explanation_dirs,
            &self.options.explanation_extensions,
        );
        let Some(path) = found else {
            tracing::info!("未找到对应的解释文件: {}", constant_file.display());
            return;
        };
        if let Err(e) = self.load_explanation_file(&path) {
            tracing::warn!("自动加载解释文件失败: {}: {}", path.display(), e);
        }
    }

    /// 加载解释文件并重新链接；解释文件必须与常量文件同名
    pub fn load_explanation_file(&mut self, p: &Path) -> Result<usize, AppError> {
        let source = self
            .source_path
            .as_ref()
            .ok_or_else(|| AppError::State("请先加载常量文件，再加载解释文件".into()))?;
        ensure_same_stem(source, p)?;

        let text = read_text_file(p)?;
        let parsed = parse_explanations_detailed(&text);
        if !parsed.rejected.is_empty() {
            tracing::warn!("解释文件 {} 有 {} 行格式错误被跳过", p.display(), parsed.rejected.len());
        }

        self.explanations = parsed.entries;
        self.explanation_path = Some(p.to_path_buf());
        let linked = link(&mut self.constants, &self.explanations);
        tracing::info!("已加载解释文件: {}（{}条解释）", p.display(), self.explanations.len());
        Ok(linked)
    }

    /// 重新读取当前文件，丢弃未保存的修改
    pub fn reload(&mut self) -> Result<(), AppError> {
        let path = self
            .source_path
            .clone()
            .ok_or_else(|| AppError::State("常量文件尚未加载".into()))?;
        self.load_file(&path)
    }

    pub fn get(&self, name: &str) -> Option<&ConstantRecord> {
        self.constants.iter().find(|c| c.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut ConstantRecord, AppError> {
        self.constants
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| AppError::NotFound(name.to_string()))
    }

    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        self.get_mut(name)?.set_value(value)
    }

    pub fn reset_value(&mut self, name: &str) -> Result<(), AppError> {
        self.get_mut(name)?.reset_to_default();
        Ok(())
    }

    /// 全部恢复为加载时的值
    pub fn reset_all(&mut self) {
        for c in &mut self.constants {
            c.reset_to_default();
        }
    }

    /// 按原文件格式保存到原文件
    pub fn save(&self) -> Result<(), AppError> {
        let path = self
            .source_path
            .as_ref()
            .ok_or_else(|| AppError::State("未加载有效的文件，无法保存".into()))?;
        self.export(path, self.format)
    }

    /// 按指定格式导出到指定路径
    pub fn export(&self, path: &Path, format: ConstantFormat) -> Result<(), AppError> {
        let content = format::generate(&self.constants, format)?;
        write_text_file(path, &content)?;
        tracing::info!("已导出到: {}（{} 格式）", path.display(), format);
        Ok(())
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.constants.len(),
            linked: self.constants.iter().filter(|c| c.is_linked()).count(),
            modified: self.constants.iter().filter(|c| c.is_modified()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FXH: &str = "#define MAX_LIGHTS 8 // max light count\nstatic const float GAMMA = 2.2; // gamma correction\n";
    const EXPL: &str = "===Light(灯光)===\n最大灯光数|MAX_LIGHTS|int|8|灯光上限|1-16|必填|true\n";

    /// 在临时目录中创建文件
    fn create_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("写入临时文件失败");
        path
    }

    #[test]
    fn test_load_fxh_with_auto_explanation() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = create_file(&dir, "constants.fxh", FXH);
        create_file(&dir, "constants.txt", EXPL);

        let mut app_state = AppState::default();
        app_state.load_file(&path).expect("加载文件失败");

        assert_eq!(app_state.format, ConstantFormat::Fxh);
        assert_eq!(app_state.constants.len(), 2);
        assert_eq!(app_state.explanations.len(), 1, "应自动加载同名解释文件");
        let lights = app_state.get("MAX_LIGHTS").unwrap();
        assert_eq!(lights.type_name, "int", "解释类型覆盖unknown");
        assert_eq!(lights.category(), "灯光");
        assert!(app_state.get("GAMMA").unwrap().explanation.is_none());
        assert_eq!(app_state.summary(), Summary { total: 2, linked: 1, modified: 0 });
    }

    #[test]
    fn test_auto_explanation_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_file(&dir, "constants.fxh", FXH);
        create_file(&dir, "constants.txt", EXPL);

        let options = EditorOptions { auto_load_explanation: false, ..Default::default() };
        let mut app_state = AppState::new(options);
        app_state.load_file(&path).unwrap();
        assert!(app_state.explanations.is_empty());
        assert_eq!(app_state.summary().linked, 0);
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let good = create_file(&dir, "constants.fxh", FXH);
        let bad = create_file(&dir, "broken.json", r#"[{"name": "A", "value": "1"},"#);

        let mut app_state = AppState::default();
        app_state.load_file(&good).unwrap();
        app_state.set_value("GAMMA", "1.8").unwrap();

        let result = app_state.load_file(&bad);
        assert!(matches!(result, Err(AppError::Parse(_))), "坏JSON应返回解析错误");
        assert_eq!(app_state.source_path.as_deref(), Some(good.as_path()), "原路径应保持不变");
        assert_eq!(app_state.get("GAMMA").unwrap().value, "1.8", "原有编辑不应丢失");

        let missing = app_state.load_file(&dir.path().join("missing.fxh"));
        assert!(matches!(missing, Err(AppError::Io(_))));
        assert_eq!(app_state.constants.len(), 2);
    }

    #[test]
    fn test_explanation_requires_loaded_file_and_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_file(&dir, "constants.fxh", FXH);
        let wrong = create_file(&dir, "other.expl", EXPL);

        let mut app_state = AppState::new(EditorOptions { auto_load_explanation: false, ..Default::default() });
        assert!(matches!(app_state.load_explanation_file(&wrong), Err(AppError::State(_))));

        app_state.load_file(&path).unwrap();
        let result = app_state.load_explanation_file(&wrong);
        assert!(matches!(result, Err(AppError::NameMismatch { .. })), "文件名不一致应报错");
        assert!(app_state.explanations.is_empty(), "失败时不应修改状态");

        let right = create_file(&dir, "constants.expl", EXPL);
        assert_eq!(app_state.load_explanation_file(&right).unwrap(), 1);
    }

    #[test]
    fn test_edit_reset_and_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_file(&dir, "values.txt", "FOG_DENSITY = 0.05 // fog\nBLOOM = 1.0 // bloom");

        let mut app_state = AppState::default();
        app_state.load_file(&path).unwrap();

        app_state.set_value("FOG_DENSITY", "0.1").unwrap();
        app_state.set_value("BLOOM", "2.0").unwrap();
        assert_eq!(app_state.summary().modified, 2);
        assert!(matches!(app_state.set_value("NOPE", "1"), Err(AppError::NotFound(_))));
        assert!(matches!(app_state.set_value("BLOOM", ""), Err(AppError::InvalidValue(_))));

        app_state.reset_value("FOG_DENSITY").unwrap();
        assert_eq!(app_state.get("FOG_DENSITY").unwrap().value, "0.05");

        app_state.reset_all();
        assert_eq!(app_state.summary().modified, 0);
    }

    #[test]
    fn test_save_uses_original_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_file(&dir, "constants.fxh", FXH);

        let mut app_state = AppState::default();
        app_state.load_file(&path).unwrap();
        app_state.set_value("GAMMA", "1.8").unwrap();
        app_state.save().expect("保存失败");

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains("#define GAMMA 1.8 // gamma correction"), "C风格声明保存为#define形式");

        app_state.reload().unwrap();
        let gamma = app_state.get("GAMMA").unwrap();
        assert_eq!(gamma.value, "1.8");
        assert_eq!(gamma.default_value, "1.8", "重新加载后默认值为新值");
        assert!(!gamma.is_static, "保存后static修饰不保留");
    }

    #[test]
    fn test_export_json_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_file(&dir, "constants.fxh", FXH);
        let out = dir.path().join("exported.json");

        let mut app_state = AppState::default();
        app_state.load_file(&path).unwrap();
        app_state.export(&out, ConstantFormat::Json).expect("导出失败");

        let mut reloaded = AppState::default();
        reloaded.load_file(&out).unwrap();
        assert_eq!(reloaded.format, ConstantFormat::Json);
        assert_eq!(reloaded.constants, app_state.constants, "JSON导出后重新加载应一致");
    }

    #[test]
    fn test_save_without_file_is_error() {
        let app_state = AppState::default();
        assert!(matches!(app_state.save(), Err(AppError::State(_))));
    }
}
