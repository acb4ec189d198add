#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[cfg(feature = "jemalloc")]
fn jemalloc_purge() {
    use tikv_jemalloc_ctl::epoch;
    // advancing the epoch lets jemalloc release dirty pages via its decay logic
    if let Ok(e) = epoch::mib() {
        let _ = e.advance();
    }
    log::debug!("jemalloc: epoch advanced");
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use xau_confluence::smart_money::mark_filled_gaps;
use xau_confluence::validation::{sanitize_series, validate_reference_bar, validate_series};
use xau_confluence::{enrich, AnalysisReport, Candle, ReferenceBar};

type BoxError = Box<dyn std::error::Error>;

/// Enrich an analysis report with technical indicators computed from candles.
#[derive(Debug, Parser)]
#[command(name = "xau_confluence", version)]
struct Args {
    /// JSON array of candles ({timestamp, open, high, low, close}).
    #[arg(long)]
    candles: PathBuf,

    /// JSON previous-period bar ({open, high, low, close}) for pivots and Fibonacci.
    #[arg(long)]
    reference: Option<PathBuf>,

    /// JSON upstream report to enrich; an empty report is used when absent.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Re-read the inputs and re-enrich every N seconds.
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,

    /// Reject unsorted, duplicated or malformed candles instead of repairing them.
    #[arg(long)]
    strict: bool,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, BoxError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(value)
}

struct Inputs {
    candles: Vec<Candle>,
    reference: Option<ReferenceBar>,
}

fn load_inputs(args: &Args) -> Result<Inputs, BoxError> {
    let candles: Vec<Candle> = read_json(&args.candles)?;
    if args.strict {
        validate_series(&candles)?;
    }
    let reference = match &args.reference {
        Some(path) => Some(read_json::<ReferenceBar>(path)?),
        None => None,
    };
    if let Some(bar) = reference.as_ref().filter(|_| args.strict) {
        validate_reference_bar(bar)?;
    }
    log::info!(
        "Loaded {} candles{}",
        candles.len(),
        if reference.is_some() { " + reference bar" } else { "" }
    );
    Ok(Inputs { candles, reference })
}

fn run_cycle(
    args: &Args,
    upstream: &AnalysisReport,
    previous: Option<&AnalysisReport>,
) -> Result<AnalysisReport, BoxError> {
    let inputs = load_inputs(args)?;
    let mut report = enrich(upstream, &inputs.candles, inputs.reference.as_ref());

    // gaps seen in the previous cycle keep their fill state
    let prev_gaps = previous
        .and_then(|p| p.technical_signals.smart_money.as_ref())
        .map(|smc| smc.fair_value_gaps.as_slice())
        .unwrap_or_default();
    let last_close = sanitize_series(&inputs.candles).last().map(|c| c.close);

    if let (Some(smc), Some(price)) = (report.technical_signals.smart_money.as_mut(), last_close) {
        for gap in smc.fair_value_gaps.iter_mut() {
            gap.is_filled = prev_gaps.iter().any(|p| {
                p.is_filled && p.kind == gap.kind && p.top == gap.top && p.bottom == gap.bottom
            });
        }
        let filled = mark_filled_gaps(&mut smc.fair_value_gaps, price);
        if filled > 0 {
            log::info!("{} fair value gap(s) filled at {:.2}", filled, price);
        }
    }

    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    env_logger::init();
    let args = Args::parse();

    let upstream: AnalysisReport = match &args.report {
        Some(path) => read_json(path)?,
        None => AnalysisReport::default(),
    };

    let Some(secs) = args.watch else {
        run_cycle(&args, &upstream, None)?;
        return Ok(());
    };

    // ── Watch loop ────────────────────────────────────────────────────────────
    log::info!("Watching inputs every {}s", secs);
    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
    let mut previous: Option<AnalysisReport> = None;
    loop {
        ticker.tick().await;
        let started = chrono::Utc::now();
        match run_cycle(&args, &upstream, previous.as_ref()) {
            Ok(next) => {
                let c = next.technical_signals.confidence_score;
                log::info!(
                    "Cycle {} → action={:?} confidence={:?}",
                    started.to_rfc3339(),
                    next.trading_action,
                    c.map(|c| c.score)
                );
                previous = Some(next);
            }
            // keep the last good report; inputs may be mid-write
            Err(e) => log::warn!("Cycle {} failed: {}", started.to_rfc3339(), e),
        }

        #[cfg(feature = "jemalloc")]
        jemalloc_purge();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tmp(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("xau_confluence_{}_{}", std::process::id(), name));
        std::fs::write(&path, body).unwrap();
        path
    }

    fn args(extra: &[&str], candles: &Path, reference: &Path) -> Args {
        let mut argv = vec![
            "xau_confluence".to_string(),
            "--candles".into(),
            candles.display().to_string(),
            "--reference".into(),
            reference.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::parse_from(argv)
    }

    #[test]
    fn strict_mode_rejects_inverted_reference_bar() {
        let candles = write_tmp(
            "candles.json",
            r#"[{"timestamp": 1700000000, "open": 2600, "high": 2610, "low": 2595, "close": 2605}]"#,
        );
        let reference = write_tmp("reference.json", r#"{"open": 2620, "high": 2600, "low": 2650, "close": 2630}"#);

        assert!(load_inputs(&args(&["--strict"], &candles, &reference)).is_err());

        // lenient mode loads it; enrich later drops it with a warning
        let inputs = load_inputs(&args(&[], &candles, &reference)).unwrap();
        assert!(inputs.reference.is_some());
        assert!(enrich(&AnalysisReport::default(), &inputs.candles, inputs.reference.as_ref())
            .technical_signals
            .pivot_points
            .is_none());
    }
}
