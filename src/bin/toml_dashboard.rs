use clap::Parser;
use learner_dashboard::core::ConfigProvider;
use learner_dashboard::utils::error::ErrorSeverity;
use learner_dashboard::utils::{logger, validation::Validate};
use learner_dashboard::{DashboardEngine, DashboardPipeline, LocalStorage, StateStore, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-dashboard")]
#[command(about = "Learner dashboard report with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "dashboard.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the page number from config
    #[arg(long)]
    page_number: Option<usize>,

    /// Dry run - show what would be produced without writing files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌，-v 優先於設定檔
    if args.verbose {
        logger::init_cli_logger(true);
    } else {
        logger::init_with_level(config.log_level().unwrap_or("info"), config.json_logs());
    }

    tracing::info!("🚀 Starting TOML-based learner dashboard");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 套用命令列覆蓋設定
    if let Some(page_number) = args.page_number {
        config.query.page_number = page_number;
        tracing::info!("🔧 Page number overridden to: {}", page_number);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No report files will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let source = LocalStorage::new(".".to_string());
    let sink = LocalStorage::new(config.output_path().to_string());
    let pipeline = DashboardPipeline::new(source, sink, config);
    let engine = DashboardEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Dashboard report completed successfully!");
            println!("✅ Dashboard report completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Dashboard report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let query = config.query();

    println!("📋 Configuration Summary:");
    println!(
        "  Dashboard: {} {}",
        config.dashboard.name,
        config.dashboard.version.as_deref().unwrap_or("")
    );
    println!("  State: {}", config.state_file());
    println!("  Output: {}", config.output_path());
    println!(
        "  Sort: {} ({})",
        query.sort_by,
        if query.is_ascending { "ascending" } else { "descending" }
    );
    if !query.filters.is_empty() {
        let filters: Vec<String> = query.filters.iter().map(|f| f.to_string()).collect();
        println!("  Filters: {}", filters.join(", "));
    }
    println!("  Page: {} (size {})", query.page_number, query.page_size);

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

/// 讀取狀態檔並顯示查詢會得到的結果，不寫入任何檔案
fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let bytes = std::fs::read(config.state_file())?;
    let store = StateStore::from_json(&bytes)?;
    let state = learner_dashboard::core::StateSource::state(&store);

    let selectors = learner_dashboard::Selectors::new();
    let list = learner_dashboard::current_list(&state, &config.query())?;

    println!("🔍 Dry Run Analysis:");
    println!("  Courses in state: {}", selectors.num_courses(&state));
    println!("  Enterprise dashboards: {}", selectors.has_available_dashboards(&state));
    println!("  Pages: {}", list.num_pages);
    for card in &list.visible {
        println!("  • {}: {}", card.card_id, card.record.course.title);
    }

    let formats: Vec<String> = config.output_formats().iter().map(|f| f.to_string()).collect();
    println!();
    println!("💾 Would write: {}", formats.join(", "));

    Ok(())
}
