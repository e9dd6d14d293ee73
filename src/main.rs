use clap::Parser;
use domain_analyzer::app::{render, repl};
use domain_analyzer::core::{ConfigProvider, Pipeline};
use domain_analyzer::utils::{logger, validation::Validate};
use domain_analyzer::{
    parse_keyword_list, AnalysisPipeline, AnalysisSession, AnalyzerEngine, AnalyzerError,
    CliConfig, DetailCategory, DetailView, LocalStorage,
};
use std::io::{self, Read, Write};

type Engine = AnalyzerEngine<AnalysisPipeline<LocalStorage, CliConfig>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting domain-analyzer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let keywords = match collect_keywords(&config).await {
        Ok(keywords) => keywords,
        Err(e) => fail(e),
    };
    if keywords.is_empty() && !config.interactive {
        tracing::warn!("⚠️ No keywords given, the report will be empty");
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }
    let interactive = config.interactive;
    let details = config.details.clone();

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = AnalysisPipeline::new(storage, config, keywords);
    let engine = AnalyzerEngine::new_with_monitoring(pipeline, monitor_enabled);

    let outcome = if interactive {
        run_interactive(&engine).await
    } else {
        run_batch(&engine, &details).await
    };

    if let Err(e) = outcome {
        fail(e);
    }
    Ok(())
}

async fn collect_keywords(config: &CliConfig) -> domain_analyzer::Result<Vec<String>> {
    let mut keywords = Vec::new();

    if let Some(path) = &config.keywords_file {
        let text = tokio::fs::read_to_string(path).await?;
        keywords.extend(parse_keyword_list(&text));
    }
    keywords.extend(parse_keyword_list(&config.keywords.join("\n")));

    if keywords.is_empty() && config.keywords_file.is_none() && !config.interactive {
        tracing::info!("Reading keywords from stdin, one per line");
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        keywords = parse_keyword_list(&text);
    }

    tracing::debug!("Collected {} keywords", keywords.len());
    Ok(keywords)
}

async fn run_batch(
    engine: &Engine,
    details: &[(String, DetailCategory)],
) -> domain_analyzer::Result<()> {
    let output = engine.run().await?;
    let report = &output.report;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::render_dataset_status(&mut out, report.dataset_status, report.dataset_size)?;
    render::render_table(&mut out, &report.results, report.sort)?;

    for (keyword, category) in details {
        let result = report
            .results
            .iter()
            .find(|result| result.keyword == *keyword)
            .or_else(|| {
                report
                    .results
                    .iter()
                    .find(|result| result.keyword.eq_ignore_ascii_case(keyword))
            });

        match result {
            Some(result) => {
                writeln!(out)?;
                render::render_detail(&mut out, &DetailView::new(result, *category))?;
            }
            None => tracing::warn!("⚠️ No result row for keyword '{}'", keyword),
        }
    }

    writeln!(out)?;
    writeln!(out, "✅ Analysis completed successfully!")?;
    writeln!(out, "📁 Report saved to: {}", output.output_path)?;
    Ok(())
}

async fn run_interactive(engine: &Engine) -> domain_analyzer::Result<()> {
    let pipeline = engine.pipeline();
    let dataset = pipeline.extract().await?;

    let mut session = AnalysisSession::new(dataset);
    session.set_sort(pipeline.config().sort_spec());
    session.analyze_keywords(pipeline.keywords().to_vec());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::render_dataset_status(&mut out, session.dataset_status(), session.dataset_size())?;
    if !session.results().is_empty() {
        render::render_table(&mut out, session.results(), session.sort())?;
    }
    writeln!(out, "Type 'help' for commands.")?;

    let stdin = io::stdin();
    repl::run_session(&mut session, stdin.lock(), &mut out)
}

fn fail(e: AnalyzerError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}
