// ==========================================
// 季度奖金面板 - 命令行入口
// ==========================================
// 子命令:
// - report : 按筛选条件与周期输出面板（文本 / JSON）
// - options: 输出下拉框可选值
// ==========================================

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use quarterly_bonus_panel::api::{parse_period, PanelApi, PanelRequest};
use quarterly_bonus_panel::config::{config_keys, ConfigManager};
use quarterly_bonus_panel::engine::FilterCriteria;
use quarterly_bonus_panel::importer::BonusDataLoader;
use quarterly_bonus_panel::report::{self, OutputFormat};
use quarterly_bonus_panel::{logging, APP_NAME, VERSION};

#[derive(Parser)]
#[command(name = "quarterly-bonus-panel")]
#[command(about = "Painel de Bônus Trimestral", version)]
struct Cli {
    /// 配置文件（JSON）
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 员工数据集（.json / .csv / .xlsx）
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    /// 漏报指标表（.json）
    #[arg(long, global = true)]
    indicators: Option<PathBuf>,
    /// 报表语言（pt-BR / en）
    #[arg(long, global = true)]
    locale: Option<String>,
    /// JSON 格式日志
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 输出面板
    Report(ReportArgs),
    /// 输出筛选选项
    Options,
}

#[derive(Args)]
struct ReportArgs {
    /// 姓名关键字（不区分大小写）
    #[arg(long)]
    name: Option<String>,
    /// 公司（"Todas" = 全部）
    #[arg(long, default_value = "Todas")]
    company: String,
    /// 职位（"Todas" = 全部）
    #[arg(long, default_value = "Todas")]
    role: String,
    /// 城市（"Todas" = 全部）
    #[arg(long, default_value = "Todas")]
    city: String,
    /// 司龄分组（可重复；不指定 = 全部）
    #[arg(long = "tenure")]
    tenures: Vec<String>,
    /// 周期: Trimestre / Janeiro / Fevereiro / Março
    #[arg(long, default_value = "Trimestre")]
    period: String,
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<ConfigManager> {
    let mut config = ConfigManager::load(cli.config.as_deref())?;

    // 命令行参数优先级最高
    if let Some(path) = &cli.dataset {
        config.set(config_keys::DATASET_PATH, path.display().to_string());
    }
    if let Some(path) = &cli.indicators {
        config.set(config_keys::INDICATORS_PATH, path.display().to_string());
    }
    if let Some(locale) = &cli.locale {
        config.set(config_keys::REPORT_LOCALE, locale.clone());
    }
    Ok(config)
}

fn build_request(args: &ReportArgs) -> anyhow::Result<PanelRequest> {
    let mut criteria = FilterCriteria::new()
        .with_company(&args.company)
        .with_role(&args.role)
        .with_city(&args.city)
        .with_tenures(args.tenures.iter().cloned());
    if let Some(name) = &args.name {
        criteria = criteria.with_name_query(name);
    }

    let period = parse_period(&args.period)?;
    Ok(PanelRequest::new(criteria, period))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    logging::init(cli.log_json);
    tracing::info!("{} v{}", APP_NAME, VERSION);

    let config = build_config(&cli)?;
    let locale = config.report_locale()?;
    tracing::debug!(config = %config.get_config_snapshot()?, "生效配置");

    let loader = BonusDataLoader::new(config.warn_unknown_indicators()?);
    let api = PanelApi::load(&loader, &config)
        .await
        .context("加载面板数据失败")?;

    match &cli.command {
        Command::Report(args) => {
            let request = build_request(args)?;
            let view = api.compute(&request);
            let output = match OutputFormat::from(args.format) {
                OutputFormat::Text => report::render_text(&view, &locale),
                OutputFormat::Json => report::render_json(&view)?,
            };
            println!("{}", output.trim_end());
        }
        Command::Options => {
            let output = report::render_options(&api.filter_options(), &locale);
            println!("{}", output.trim_end());
        }
    }

    Ok(())
}
