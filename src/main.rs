use anyhow::{bail, Context, Result};
use css_dataset::{ExtractData, ModelView, PipelineConfig};
use std::{path::PathBuf, time::Instant};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configure paths ──────────────────────────────────────────
    let mut config = PipelineConfig::from_env().context("loading pipeline config")?;
    if let Some(input) = std::env::args().nth(1) {
        config.input_report = PathBuf::from(input);
    }
    info!(?config, "configured");

    // ─── 3) extract report → dataset ─────────────────────────────────
    let start = Instant::now();
    let mut data = ExtractData::new();
    data.extract_data(&config.input_report)
        .with_context(|| format!("extracting {}", config.input_report.display()))?;
    let dataset = data.dataset();
    info!(records = dataset.len(), elapsed = ?start.elapsed(), "extracted");

    // ─── 4) write outputs ────────────────────────────────────────────
    data.write_to_csv(&config.output_csv)
        .with_context(|| format!("writing {}", config.output_csv.display()))?;
    if let Some(parquet_path) = &config.output_parquet {
        let bytes = data
            .write_to_parquet(parquet_path)
            .with_context(|| format!("writing {}", parquet_path.display()))?;
        info!(path = %parquet_path.display(), bytes, "parquet written");
    }

    // ─── 5) reload and compare ───────────────────────────────────────
    if config.verify_round_trip {
        data.load_dataset(&config.output_csv)
            .with_context(|| format!("reloading {}", config.output_csv.display()))?;
        if data.dataset() != dataset {
            bail!(
                "reloaded {} does not match the extracted table",
                config.output_csv.display()
            );
        }
        info!("round trip verified");
    }

    // ─── 6) summarize what the model would see ───────────────────────
    let view = ModelView::from_dataset(&dataset);
    if view.low.is_empty() || view.high.is_empty() {
        warn!(
            low = view.low.len(),
            high = view.high.len(),
            "a segment has no usable records"
        );
    }
    info!(
        low = view.low.len(),
        high = view.high.len(),
        stocked_out = view.stocked_out,
        "all done"
    );
    Ok(())
}
