//! 常量文件格式：按扩展名分发到 FXH / JSON / TXT 解析器与生成器

pub mod explanation;
pub mod fxh;
pub mod json;
pub mod txt;

use std::{fmt, path::Path, str::FromStr};

use crate::model::constant::ConstantRecord;
use crate::model::data_core::AppError;

/// 平台行分隔符（生成 FXH/TXT 时使用）
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstantFormat {
    #[default]
    Fxh,
    Json,
    Txt,
}

impl ConstantFormat {
    /// 由格式标记得到格式（不区分大小写，可带前导点），无法识别时为 None
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().trim_start_matches('.');
        if tag.eq_ignore_ascii_case("fxh") {
            Some(Self::Fxh)
        } else if tag.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if tag.eq_ignore_ascii_case("txt") {
            Some(Self::Txt)
        } else {
            None
        }
    }

    /// 由文件扩展名判断格式，未知或缺失时默认 FXH
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_tag)
            .unwrap_or_default()
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Fxh => "fxh",
            Self::Json => "json",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for ConstantFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ConstantFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| AppError::State(format!("未知格式: {}", s)))
    }
}

/// 解析常量文件文本
///
/// FXH/TXT 逐行容错，坏行直接丢弃；JSON 整体解析，失败时返回错误且不产生部分结果。
pub fn parse(text: &str, format: ConstantFormat) -> Result<Vec<ConstantRecord>, AppError> {
    let records = match format {
        ConstantFormat::Fxh => fxh::parse(text),
        ConstantFormat::Json => json::parse(text)?,
        ConstantFormat::Txt => txt::parse(text),
    };
    tracing::debug!("{} 格式解析得到 {} 条常量", format, records.len());
    Ok(records)
}

/// 将常量集合生成为指定格式的文本
pub fn generate(records: &[ConstantRecord], format: ConstantFormat) -> Result<String, AppError> {
    match format {
        ConstantFormat::Fxh => Ok(fxh::generate(records)),
        ConstantFormat::Json => json::generate(records),
        ConstantFormat::Txt => Ok(txt::generate(records)),
    }
}

/// 按 \n / \r 切行并丢弃空行（与 Windows 与 Unix 换行都兼容）
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r']).filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConstantFormat::from_path(&PathBuf::from("constants.fxh")), ConstantFormat::Fxh);
        assert_eq!(ConstantFormat::from_path(&PathBuf::from("a/b/Constants.JSON")), ConstantFormat::Json);
        assert_eq!(ConstantFormat::from_path(&PathBuf::from("values.txt")), ConstantFormat::Txt);
        assert_eq!(ConstantFormat::from_path(&PathBuf::from("shader.hlsl")), ConstantFormat::Fxh, "未知扩展名默认FXH");
        assert_eq!(ConstantFormat::from_path(&PathBuf::from("noext")), ConstantFormat::Fxh);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(".txt".parse::<ConstantFormat>().unwrap(), ConstantFormat::Txt);
        assert_eq!("Json".parse::<ConstantFormat>().unwrap(), ConstantFormat::Json);
        assert!("yaml".parse::<ConstantFormat>().is_err());
    }

    #[test]
    fn test_dispatch_by_format() {
        let fxh = parse("#define A 1 // a", ConstantFormat::Fxh).unwrap();
        assert_eq!(fxh.len(), 1);

        let txt = parse("A = 1 // a", ConstantFormat::Txt).unwrap();
        assert_eq!(txt.len(), 1);

        let json = parse(r#"[{"name": "A", "value": "1"}]"#, ConstantFormat::Json).unwrap();
        assert_eq!(json.len(), 1);

        assert!(parse("not json", ConstantFormat::Json).is_err(), "坏JSON应返回错误");
        assert!(parse("not fxh at all", ConstantFormat::Fxh).unwrap().is_empty(), "坏FXH行只会被丢弃");
    }

    #[test]
    fn test_convert_between_formats() {
        let records = parse("static const float GAMMA = 2.2; // gamma", ConstantFormat::Fxh).unwrap();

        let txt = generate(&records, ConstantFormat::Txt).unwrap();
        assert_eq!(txt, "GAMMA = 2.2 // gamma");

        let back = parse(&txt, ConstantFormat::Txt).unwrap();
        assert_eq!(back[0].value, "2.2");
        assert_eq!(back[0].description, "gamma");
    }

    #[test]
    fn test_split_lines_handles_crlf() {
        let lines: Vec<&str> = split_lines("a\r\nb\n\nc\r").collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }
}
