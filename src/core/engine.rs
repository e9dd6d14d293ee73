use crate::core::{AnalysisReport, Pipeline};
use crate::domain::model::DatasetStatus;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug)]
pub struct EngineOutput {
    pub report: AnalysisReport,
    pub output_path: String,
}

pub struct AnalyzerEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalyzerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<EngineOutput> {
        tracing::info!("Starting domain analysis...");
        self.monitor.log_stats("Start");

        let dataset = self.pipeline.extract().await?;
        match dataset.status {
            DatasetStatus::Loaded => tracing::info!("📥 Loaded {} domain records", dataset.len()),
            DatasetStatus::Unavailable => {
                tracing::warn!("⚠️ Dataset unavailable, every keyword will report zero matches")
            }
        }
        self.monitor.log_stats("Extract");

        let report = self.pipeline.transform(dataset).await?;
        tracing::info!("🔎 Analyzed {} keywords", report.results.len());
        if let Some(sort) = &report.sort {
            tracing::debug!("Results sorted by {}", sort);
        }
        self.monitor.log_stats("Analyze");

        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("📁 Report saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(EngineOutput {
            report,
            output_path,
        })
    }
}
