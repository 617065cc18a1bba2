//! 程序入口：初始化日志，解析命令行并调用常量文件工具库

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use shader_constants::format::explanation::parse_explanations_detailed;
use shader_constants::model::view::{editable_count, group_by_category, is_read_only};
use shader_constants::utils::fs::read_text_file;
use shader_constants::{AppState, ConstantFormat, EditMode, EditorOptions};

#[derive(Parser)]
#[command(version, about = "Shader 常量文件查看与转换工具（FXH / JSON / TXT）")]
struct Cli {
    #[arg(help = "JSON 配置文件", long, global = true)]
    config: Option<PathBuf>,

    #[arg(help = "输出调试日志", short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "按分类列出常量")]
    Show {
        file: PathBuf,
        #[arg(help = "解释文件（需与常量文件同名）", long)]
        explanation: Option<PathBuf>,
        #[arg(help = "只显示匹配的常量", long)]
        filter: Option<String>,
        #[arg(help = "专家模式（全部可编辑）", long, default_value_t = false)]
        expert: bool,
    },

    #[command(about = "转换常量文件格式")]
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(help = "输出格式 fxh/json/txt，默认取输出文件扩展名", long)]
        format: Option<ConstantFormat>,
    },

    #[command(about = "检查解释文件")]
    Explain { file: PathBuf },
}

fn load_state(options: EditorOptions, file: &Path) -> Result<AppState> {
    let mut state = AppState::new(options);
    state
        .load_file(file)
        .with_context(|| format!("加载常量文件失败: {}", file.display()))?;
    Ok(state)
}

fn run_show(
    options: EditorOptions,
    file: PathBuf,
    explanation: Option<PathBuf>,
    filter: Option<String>,
    expert: bool,
) -> Result<()> {
    let mode = if expert { EditMode::Expert } else { options.edit_mode };
    let mut state = load_state(options, &file)?;
    if let Some(path) = explanation {
        state
            .load_explanation_file(&path)
            .with_context(|| format!("加载解释文件失败: {}", path.display()))?;
    }

    let filter = filter.unwrap_or_default();
    for group in group_by_category(&state.constants) {
        let items = group.filtered(&state.constants, &filter);
        if items.is_empty() {
            continue;
        }
        println!("=== {} ===", group.name);
        for c in items {
            let marker = if is_read_only(c, mode) { "[只读] " } else { "" };
            let range = c
                .explanation
                .as_ref()
                .filter(|e| !e.value_range.is_empty())
                .map(|e| format!(" 范围: {}", e.value_range))
                .unwrap_or_default();
            println!(
                "  {}{} ({}) = {} [{}]{}  // {}",
                marker,
                c.display_name(),
                c.name,
                c.value,
                c.type_name,
                range,
                c.description
            );
        }
    }

    let summary = state.summary();
    println!(
        "共 {} 条常量，{} 条已关联解释，当前模式可编辑 {} 条",
        summary.total,
        summary.linked,
        editable_count(&state.constants, mode)
    );
    Ok(())
}

fn run_convert(options: EditorOptions, input: PathBuf, output: PathBuf, format: Option<ConstantFormat>) -> Result<()> {
    let format = format.unwrap_or_else(|| ConstantFormat::from_path(&output));
    let state = load_state(options, &input)?;
    state
        .export(&output, format)
        .with_context(|| format!("导出失败: {}", output.display()))?;
    println!("已导出 {} 条常量到 {}（{}）", state.constants.len(), output.display(), format);
    Ok(())
}

fn run_explain(file: PathBuf) -> Result<()> {
    let text = read_text_file(&file).with_context(|| format!("读取解释文件失败: {}", file.display()))?;
    let parsed = parse_explanations_detailed(&text);

    let mut category = None;
    for e in &parsed.entries {
        if category != Some(e.category.as_str()) {
            category = Some(e.category.as_str());
            println!("=== {} ===", e.category);
        }
        let novice = if e.is_editable_by_novice { "新手可编辑" } else { "仅专家" };
        println!("  {} -> {} [{}] 默认 {} 范围 {} {} {}", e.display_name, e.original_name, e.type_name, e.default_value, e.value_range, e.status, novice);
    }
    for r in &parsed.rejected {
        println!("第{}行格式错误（{}个字段）: {}", r.line_number, r.field_count, r.content);
    }
    println!("{} 条解释，{} 行被跳过", parsed.entries.len(), parsed.rejected.len());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志输出
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();

    let options = match &cli.config {
        Some(path) => EditorOptions::load(path).with_context(|| format!("读取配置失败: {}", path.display()))?,
        None => EditorOptions::default(),
    };

    match cli.command {
        Commands::Show { file, explanation, filter, expert } => run_show(options, file, explanation, filter, expert),
        Commands::Convert { input, output, format } => run_convert(options, input, output, format),
        Commands::Explain { file } => run_explain(file),
    }
}
