// ==========================================
// ABC 货位系统 - 命令行入口
// ==========================================
// 子命令:
//   analyze <FILE>   分类 + 货位分配, 输出分隔文本表或 JSON 报告
//   default-config   打印默认配置 (JSON)
// ==========================================

use abc_slotting::config::SlottingConfig;
use abc_slotting::engine::{AnalysisReport, SlottingOrchestrator};
use abc_slotting::export::{self, DEFAULT_EXPORT_DELIMITER};
use abc_slotting::importer::{DataCleaner, UniversalFileParser};
use abc_slotting::logging;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "abc-slotting")]
#[command(version)]
#[command(about = "库存 ABC 分类与仓库货位分配", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 对库存文件执行 ABC 分类并分配货位
    Analyze {
        /// 输入文件 (.csv / .xlsx / .xls)
        file: PathBuf,

        /// 配置文件路径 (默认: ABC_SLOTTING_CONFIG 或用户配置目录)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// 覆盖 A 类阈值
        #[arg(long)]
        a_cutoff: Option<f64>,

        /// 覆盖 B 类阈值
        #[arg(long)]
        b_cutoff: Option<f64>,

        /// 输出文件 (默认: 标准输出)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 输出完整 JSON 报告而非分隔文本表
        #[arg(long)]
        json: bool,

        /// 导出分隔符
        #[arg(short, long, default_value_t = DEFAULT_EXPORT_DELIMITER as char)]
        delimiter: char,
    },

    /// 打印默认配置
    DefaultConfig,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            config,
            a_cutoff,
            b_cutoff,
            output,
            json,
            delimiter,
        } => cmd_analyze(
            &file,
            config.as_deref(),
            a_cutoff,
            b_cutoff,
            output.as_deref(),
            json,
            delimiter,
        ),
        Commands::DefaultConfig => cmd_default_config(),
    }
}

fn cmd_analyze(
    file: &Path,
    config_path: Option<&Path>,
    a_cutoff: Option<f64>,
    b_cutoff: Option<f64>,
    output: Option<&Path>,
    json: bool,
    delimiter: char,
) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("分隔符必须是单个 ASCII 字符: {:?}", delimiter);
    }

    // 1. 配置: 文件/默认值 + 命令行覆盖
    let mut config =
        SlottingConfig::load_or_default(config_path).context("无法加载配置")?;
    if let Some(a) = a_cutoff {
        config.classification.a_cutoff = a;
    }
    if let Some(b) = b_cutoff {
        config.classification.b_cutoff = b;
    }
    config.validate().context("配置无效")?;

    // 2. 导入与清洗
    let table = UniversalFileParser
        .parse(file)
        .with_context(|| format!("无法解析文件: {}", file.display()))?;
    let cleaned = DataCleaner
        .prepare(&table, &config.columns)
        .context("数据清洗失败")?;
    info!(
        file = %file.display(),
        total_rows = cleaned.total_rows,
        dropped_rows = cleaned.dropped_rows,
        "导入完成"
    );

    // 3. 分类 + 货位分配
    let orchestrator = SlottingOrchestrator::new(config);
    let report = orchestrator.run(&cleaned.records).context("分析失败")?;
    print_summary(&report);

    // 4. 输出
    match output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("无法创建输出文件: {}", path.display()))?;
            write_report(file, &report, json, delimiter as u8)?;
            eprintln!("结果已写入: {}", path.display());
        }
        None => write_report(io::stdout().lock(), &report, json, delimiter as u8)?,
    }

    Ok(())
}

fn write_report<W: Write>(
    mut writer: W,
    report: &AnalysisReport,
    json: bool,
    delimiter: u8,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut writer, report).context("无法序列化报告")?;
        writeln!(writer)?;
    } else {
        export::write_located_csv(writer, &report.located, delimiter)
            .context("无法导出结果表")?;
    }
    Ok(())
}

/// 分类汇总写到 stderr, 不干扰 stdout 上的结果表
fn print_summary(report: &AnalysisReport) {
    eprintln!("分析编号: {}", report.run_id);
    eprintln!(
        "{:<6} {:>8} {:>10} {:>16} {:>10}",
        "class", "items", "items %", "value", "value %"
    );
    for row in &report.summary {
        eprintln!(
            "{:<6} {:>8} {:>9.2}% {:>16.2} {:>9.2}%",
            row.abc_class.as_str(), row.item_count, row.item_percentage, row.total_value,
            row.value_percentage
        );
    }

    let stats = &report.stats;
    eprintln!(
        "货位: 已分配 {} / 无可用 {} / 冲突耗尽 {}",
        stats.assigned, stats.no_location, stats.collision_exhausted
    );
    if stats.deposit_overflow > 0 {
        eprintln!("警告: {} 行超出配置库区数", stats.deposit_overflow);
    }
}

fn cmd_default_config() -> Result<()> {
    let json = SlottingConfig::default()
        .to_json_pretty()
        .context("无法序列化默认配置")?;
    println!("{}", json);
    Ok(())
}
