use anyhow::Context;
use clap::Parser;
use domain_analyzer::app::render;
use domain_analyzer::core::ConfigProvider;
use domain_analyzer::utils::{logger, validation::Validate};
use domain_analyzer::{
    parse_keyword_list, AnalysisPipeline, AnalyzerEngine, LocalStorage, TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-analyzer")]
#[command(about = "Domain keyword analysis driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "analyzer.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be analyzed without loading the dataset
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based domain analysis");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let keywords = load_keywords(&config).await?;
    display_config_summary(&config, &keywords);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No dataset will be loaded");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = AnalysisPipeline::new(storage, config, keywords);
    let engine = AnalyzerEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            render::render_dataset_status(
                &mut out,
                output.report.dataset_status,
                output.report.dataset_size,
            )?;
            render::render_table(&mut out, &output.report.results, output.report.sort)?;
            println!("✅ Analysis completed successfully!");
            println!("📁 Report saved to: {}", output.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn load_keywords(config: &TomlConfig) -> anyhow::Result<Vec<String>> {
    let mut keywords = Vec::new();

    if let Some(path) = &config.analysis.keywords_file {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read keywords file '{}'", path))?;
        keywords.extend(parse_keyword_list(&text));
    }
    if let Some(inline) = &config.analysis.keywords {
        keywords.extend(parse_keyword_list(&inline.join("\n")));
    }

    Ok(keywords)
}

fn display_config_summary(config: &TomlConfig, keywords: &[String]) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  📥 Dataset: {}", config.dataset_source());
    tracing::info!("  🏷️ Domain column: {}", config.domain_column());
    tracing::info!("  🔑 Keywords: {}", keywords.len());
    match config.sort_spec() {
        Some(sort) => tracing::info!("  ↕️ Sort: {}", sort),
        None => tracing::info!("  ↕️ Sort: keyword input order"),
    }
    tracing::info!("  📁 Output: {}", config.output_path());
    tracing::info!("  📄 Formats: {}", config.output_formats().join(", "));
    tracing::info!("  🗜️ Compression: {}", config.compress_output());
}
