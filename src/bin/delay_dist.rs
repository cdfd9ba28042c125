//! 时延分布分析
//!
//! 读回 fping / iperf 解析器输出的 CSV，计算时延的 PDF/CDF/CCDF（可选指数尾部拟合），
//! 每条曲线以一行 JSON 写到 stdout，交给外部绘图工具。

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use netdelay_rs::dataset::{Dataset, LoadOptions};
use netdelay_rs::stats::{DelayDistribution, Presentation, TailFitOptions, delay_distribution};
use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "delay-dist", about = "计算 fping/iperf 时延分布曲线")]
struct Args {
    /// fping CSV 文件（可多个，按顺序拼接）
    #[arg(long, num_args = 1..)]
    fping: Vec<PathBuf>,

    /// iperf CSV 文件（可多个，按顺序拼接）
    #[arg(long, num_args = 1..)]
    iperf: Vec<PathBuf>,

    /// 相对 UTC 的小时偏移
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    utc_offset: f64,

    /// 只保留该小时及之后的样本
    #[arg(long, default_value_t = 0)]
    min_hour: u32,

    /// 只保留该小时及之前的样本
    #[arg(long, default_value_t = 24)]
    max_hour: u32,

    /// 曲线类型：pdf / cdf / ccdf
    #[arg(long = "type", default_value = "ccdf", value_parser = Presentation::parse)]
    presentation: Presentation,

    /// 同时输出指数尾部拟合（仅 ccdf）
    #[arg(long, default_value_t = false)]
    fit: bool,

    /// 尾部拟合的下侧截断分位
    #[arg(long, default_value_t = 0.01)]
    fit_quantile: f64,

    /// 要分析的 iperf 传输量分桶（MB）
    #[arg(long, value_delimiter = ',', default_values_t = [1usize, 2, 3, 10])]
    mb_buckets: Vec<usize>,
}

/// 一条曲线的输出行
#[derive(Debug, Serialize)]
struct CurveLine<'a> {
    label: &'a str,
    samples: usize,
    #[serde(flatten)]
    distribution: &'a DelayDistribution,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(curves) => {
            info!(curves, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "delay-dist failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<usize, Box<dyn std::error::Error>> {
    let load = LoadOptions {
        utc_offset_hours: args.utc_offset,
        min_hour: args.min_hour,
        max_hour: args.max_hour,
    };
    let fit = args.fit.then_some(TailFitOptions {
        q: args.fit_quantile,
    });

    let mut out = BufWriter::new(io::stdout().lock());
    let mut curves = 0;

    if !args.fping.is_empty() {
        let ping = load_files(&args.fping, &load)?;
        emit(&mut out, "Ping", ping.series("seconds")?, args, fit.as_ref())?;
        curves += 1;
    }

    if !args.iperf.is_empty() {
        let iperf = load_files(&args.iperf, &load)?;
        for &b in &args.mb_buckets {
            let group = iperf.filter_bucket("bin_mb", b)?;
            info!("{b} MB: {} samples", group.len());
            if group.is_empty() {
                warn!(bucket = b, "no samples in bucket, skipping");
                continue;
            }
            let label = format!("{b} MB");
            emit(&mut out, &label, group.series("seconds")?, args, fit.as_ref())?;
            curves += 1;
        }
    }

    out.flush()?;
    Ok(curves)
}

fn load_files(paths: &[PathBuf], options: &LoadOptions) -> Result<Dataset, Box<dyn std::error::Error>> {
    let readers = paths
        .iter()
        .map(|p| File::open(p).map(BufReader::new))
        .collect::<Result<Vec<_>, _>>()?;
    let dataset = Dataset::load(readers, options)?;
    debug!(rows = dataset.len(), columns = ?dataset.column_names(), "loaded dataset");
    Ok(dataset)
}

fn emit<W: Write>(
    out: &mut W,
    label: &str,
    seconds: &[f64],
    args: &Args,
    fit: Option<&TailFitOptions>,
) -> Result<(), Box<dyn std::error::Error>> {
    let distribution = delay_distribution(seconds, args.presentation, fit)?;
    if let Some(f) = &distribution.fit {
        info!(
            label,
            loc = f.model.loc,
            scale = f.model.scale,
            fitted_mean = f.fitted_mean(),
            empirical_mean = f.empirical_mean,
            "tail fit"
        );
    }
    let line = CurveLine {
        label,
        samples: seconds.len(),
        distribution: &distribution,
    };
    serde_json::to_writer(&mut *out, &line)?;
    writeln!(out)?;
    Ok(())
}
