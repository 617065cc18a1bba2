//! Shader 常量文件工具库
//!
//! 提供 FXH / JSON / TXT 三种常量文件的解析与生成、解释文件解析与按名称链接，
//! 以及面向编辑器的会话状态（加载、编辑、保存/导出）。界面层只需传入文件文本、取回常量记录。

pub mod config;
pub mod format;
pub mod model;
pub mod utils;

// 重新导出主要类型
pub use config::EditorOptions;
pub use format::explanation::{parse_explanations, parse_explanations_detailed, ExplanationParse, RejectedLine};
pub use format::{generate, parse, ConstantFormat};
pub use model::constant::{guess_type, ConstantRecord};
pub use model::data_core::{AppError, AppState};
pub use model::explanation::{link, ExplanationEntry};
pub use model::view::EditMode;
