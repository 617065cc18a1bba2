//! IO helper: 常量/解释文件的读写与解释文件查找

use std::{fs, path::{Path, PathBuf}};

use crate::model::data_core::AppError;

/// 读取UTF-8文本（去掉可能存在的BOM）
pub fn read_text_file(p: &Path) -> Result<String, AppError> {
    let text = fs::read_to_string(p)?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

pub fn write_text_file(p: &Path, content: &str) -> Result<(), AppError> {
    fs::write(p, content)?;
    Ok(())
}

/// 文件名（不含扩展名）
pub fn file_stem(p: &Path) -> String {
    p.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 解释文件必须与常量文件同名（不含扩展名）
pub fn ensure_same_stem(constant_file: &Path, explanation_file: &Path) -> Result<(), AppError> {
    let expected = file_stem(constant_file);
    let found = file_stem(explanation_file);
    if expected != found {
        return Err(AppError::NameMismatch { expected, found });
    }
    Ok(())
}

/// 在候选目录中按扩展名优先级查找 `<常量文件名>.<ext>`，跳过常量文件本身
pub fn find_explanation_file(constant_file: &Path, dirs: &[PathBuf], extensions: &[String]) -> Option<PathBuf> {
    let stem = file_stem(constant_file);
    if stem.is_empty() {
        return None;
    }
    let own_dir = constant_file.parent().map(Path::to_path_buf).unwrap_or_default();
    let search_dirs: Vec<PathBuf> = if dirs.is_empty() { vec![own_dir] } else { dirs.to_vec() };

    for dir in &search_dirs {
        for ext in extensions {
            let candidate = dir.join(format!("{}.{}", stem, ext.trim_start_matches('.')));
            if candidate.is_file() && !same_file(&candidate, constant_file) {
                return Some(candidate);
            }
        }
    }
    None
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
