// ==========================================
// MRP 关键物料分析 - 命令行入口
// ==========================================
// 子命令:
//   analyze  分析 MRP 计算表，输出报表与历史副本
//   view     浏览已生成的报表（筛选 / 排序 / 分页 / 导出）
//   compare  对比两份报表
// 失败时向 stderr 输出错误信息并以状态码 1 退出
// ==========================================

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use mrp_critical_items::api::{analyze_in_background, AnalysisRequest, InputSource, MrpAnalyzer};
use mrp_critical_items::app::{RowFilter, SortKey, ViewState};
use mrp_critical_items::config::AnalyzerConfig;
use mrp_critical_items::domain::{CriticalItem, ReportColumn};
use mrp_critical_items::engine::{compare_analyses, ReportStatistics};
use mrp_critical_items::i18n::{self, t_with_args};
use mrp_critical_items::report::{export_csv, read_report, ReportWriter};
use mrp_critical_items::{logging, APP_NAME, VERSION};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "mrp-critical-items",
    about = "Identify MRP items below safety stock and write a purchase-request report",
    version
)]
struct Cli {
    #[arg(long, global = true, help = "Path to the JSON configuration file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Message language (en, pt-BR)")]
    lang: Option<String>,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Emit logs as JSON lines"
    )]
    json_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an MRP sheet and write the critical items report
    Analyze(AnalyzeArgs),
    /// Browse a previously written report
    View(ViewArgs),
    /// Compare two reports by item code
    Compare(CompareArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    #[arg(help = "Input workbook, CSV file, or SQLite database when --query is given")]
    input: PathBuf,
    #[arg(long, help = "Worksheet name (defaults to the configured sheet)")]
    sheet: Option<String>,
    #[arg(long, short, help = "Report path (defaults to the configured output file)")]
    output: Option<PathBuf>,
    #[arg(long, help = "SQL query to run against the SQLite database given as input")]
    query: Option<String>,
}

#[derive(Args)]
struct ViewArgs {
    #[arg(help = "Report file (.xlsx or .csv)")]
    report: PathBuf,
    #[arg(long, help = "Worksheet name (defaults to the first sheet)")]
    sheet: Option<String>,
    #[arg(long, help = "Column used by --contains (defaults to any column)")]
    column: Option<String>,
    #[arg(long, help = "Keep rows whose column text contains this value")]
    contains: Option<String>,
    #[arg(long, help = "Minimum quantity to request")]
    min: Option<i64>,
    #[arg(long, help = "Maximum quantity to request")]
    max: Option<i64>,
    #[arg(long, help = "Sort by this column")]
    sort: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, requires = "sort", help = "Sort descending")]
    desc: bool,
    #[arg(long, default_value_t = 1, help = "Page number, starting at 1")]
    page: usize,
    #[arg(long, help = "Export the filtered rows (.csv or .xlsx)")]
    export: Option<PathBuf>,
}

#[derive(Args)]
struct CompareArgs {
    #[arg(help = "Earlier report")]
    before: PathBuf,
    #[arg(help = "Later report")]
    after: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init("info", cli.json_log);

    if let Err(err) = run(cli).await {
        eprintln!("{}", t_with_args("cli.error", &[("message", format!("{:#}", err).as_str())]));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    tracing::debug!(app = APP_NAME, version = VERSION, "启动");

    let config_path = match cli.config {
        Some(path) => Some(path),
        None => AnalyzerConfig::default_path()
            .map_err(|e| tracing::warn!(error = %e, "无法确定配置文件位置"))
            .ok(),
    };
    let mut config = config_path
        .as_deref()
        .map(AnalyzerConfig::load_or_default)
        .unwrap_or_default();

    if let Some(lang) = cli.lang.as_deref() {
        if !i18n::available_locales().iter().any(|l| l == lang) {
            return Err(anyhow!("unsupported language: {}", lang));
        }
        i18n::set_locale(lang);
        config.report_locale = lang.to_string();
    }

    match cli.command {
        Commands::Analyze(args) => analyze(config, config_path.as_deref(), args).await,
        Commands::View(args) => view(&config, args),
        Commands::Compare(args) => compare(args),
    }
}

// ==========================================
// analyze
// ==========================================
async fn analyze(mut config: AnalyzerConfig, config_path: Option<&Path>, args: AnalyzeArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.default_output_file));
    let source = match args.query {
        Some(query) => InputSource::query(&args.input, query),
        None => InputSource::file(&args.input, args.sheet.as_deref()),
    };

    let analyzer = Arc::new(MrpAnalyzer::new(config.clone()));
    let report = analyze_in_background(analyzer, AnalysisRequest::new(source, output))
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    if report.count == 0 {
        println!("{}", i18n::t("cli.no_items"));
    } else {
        println!(
            "{}",
            t_with_args("cli.items_found", &[("count", report.count.to_string().as_str())])
        );
    }
    println!(
        "{}",
        t_with_args("cli.results_saved", &[("path", report.output_path.display().to_string().as_str())])
    );
    println!(
        "{}",
        t_with_args("cli.history_saved", &[("path", report.history_path.display().to_string().as_str())])
    );
    print_statistics(&report.statistics);

    // 记住最近使用的目录
    if let Some(path) = config_path {
        config.last_directory = args
            .input
            .parent()
            .map(|p| p.display().to_string())
            .filter(|p| !p.is_empty());
        if let Err(e) = config.save(path) {
            tracing::warn!(error = %e, "配置保存失败");
        }
    }

    Ok(())
}

// ==========================================
// view
// ==========================================
fn view(config: &AnalyzerConfig, args: ViewArgs) -> Result<()> {
    let items = read_report(&args.report, args.sheet.as_deref())
        .with_context(|| format!("failed to read report {}", args.report.display()))?;

    let mut state = ViewState::new(config.page_size);
    state.set_filter(RowFilter {
        column: args.column.as_deref().map(parse_column).transpose()?,
        contains: args.contains,
        min_quantity: args.min,
        max_quantity: args.max,
    });
    if let Some(sort) = args.sort.as_deref() {
        let column = parse_column(sort)?;
        state.set_sort(Some(if args.desc {
            SortKey::descending(column)
        } else {
            SortKey::ascending(column)
        }));
    }

    let rows = state.apply(&items);
    state.go_to_page(args.page.saturating_sub(1), rows.len());

    print_items(state.page(&rows));
    println!(
        "{}",
        t_with_args(
            "cli.page_info",
            &[
                ("page", (state.current_page() + 1).to_string().as_str()),
                ("pages", state.total_pages(rows.len()).max(1).to_string().as_str()),
            ]
        )
    );
    print_statistics(&ReportStatistics::from_items(&rows));

    if let Some(path) = args.export {
        export_rows(config, &rows, &path)?;
        println!(
            "{}",
            t_with_args(
                "cli.exported",
                &[
                    ("count", rows.len().to_string().as_str()),
                    ("path", path.display().to_string().as_str()),
                ]
            )
        );
    }

    Ok(())
}

fn parse_column(name: &str) -> Result<ReportColumn> {
    ReportColumn::from_header(name).ok_or_else(|| {
        let known: Vec<&str> = ReportColumn::ALL.iter().map(|c| c.header()).collect();
        anyhow!("unknown column '{}' (expected one of: {})", name, known.join(", "))
    })
}

fn export_rows(config: &AnalyzerConfig, rows: &[CriticalItem], path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        export_csv(rows, path)?;
    } else {
        ReportWriter::new(
            i18n::t_locale("report.sheet_name", &config.report_locale),
            config.history_dir.clone(),
            config.history_file_prefix.clone(),
        )
        .write(rows, path)?;
    }
    Ok(())
}

// ==========================================
// compare
// ==========================================
fn compare(args: CompareArgs) -> Result<()> {
    let before = read_report(&args.before, None)
        .with_context(|| format!("failed to read report {}", args.before.display()))?;
    let after = read_report(&args.after, None)
        .with_context(|| format!("failed to read report {}", args.after.display()))?;

    let rows = compare_analyses(&before, &after)?;

    println!(
        "{:<20} {:<40} {:>10} {:>10} {:>10}  {}",
        "CÓD", "DESCRIÇÃOPROMOB", "BEFORE", "AFTER", "DIFF", "STATUS"
    );
    for row in &rows {
        println!(
            "{:<20} {:<40} {:>10} {:>10} {:>+10}  {}",
            truncate(&row.code, 20),
            truncate(&row.description, 40),
            row.previous_quantity,
            row.current_quantity,
            row.difference,
            row.status.label()
        );
    }
    Ok(())
}

// ==========================================
// 输出辅助
// ==========================================
fn print_items(items: &[CriticalItem]) {
    println!(
        "{:<20} {:<30} {:<40} {:>12} {:>12}",
        ReportColumn::Code.header(),
        ReportColumn::Supplier.header(),
        ReportColumn::Description.header(),
        "DISPONÍVEL",
        "SOLICITAR"
    );
    for item in items {
        println!(
            "{:<20} {:<30} {:<40} {:>12} {:>12}",
            truncate(&item.code, 20),
            truncate(&item.supplier, 30),
            truncate(&item.description, 40),
            item.available_stock
                .map(|v| v.to_string())
                .unwrap_or_default(),
            item.quantity_to_request
        );
    }
}

fn print_statistics(stats: &ReportStatistics) {
    println!(
        "{}",
        t_with_args(
            "cli.stats",
            &[
                ("total", stats.total_items.to_string().as_str()),
                ("sum", stats.total_quantity.to_string().as_str()),
                ("avg", format!("{:.2}", stats.average_quantity).as_str()),
                ("top", stats.top_supplier.as_deref().unwrap_or("-")),
            ]
        )
    );
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut s: String = value.chars().take(width.saturating_sub(1)).collect();
        s.push('…');
        s
    }
}
