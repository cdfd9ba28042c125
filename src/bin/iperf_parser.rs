//! iperf3 结果转换
//!
//! 从 stdin 读取一个或多个首尾相接的 `iperf3 -J` 结果对象，
//! 把每个子流的每个上报区间输出为一行（JSON 或 CSV）。

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use netdelay_rs::parse::interval_records;
use netdelay_rs::row::{EmitConfig, OutputFormat, RowWriter};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "iperf-parser", about = "把 iperf3 JSON 结果展开为区间记录")]
#[command(group(ArgGroup::new("format").required(true).args(["json", "csv"])))]
struct Args {
    /// 输出 JSON（每行一个对象）
    #[arg(long)]
    json: bool,

    /// 输出 CSV（`, ` 分隔）
    #[arg(long)]
    csv: bool,

    /// 在第一行数据前写表头（仅 CSV）
    #[arg(long, default_value_t = false)]
    write_header: bool,
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
    let config = EmitConfig {
        format: if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Csv
        },
        write_header: args.write_header,
    };

    match run(config) {
        Ok(rows) => {
            info!(rows, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "iperf-parser failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: EmitConfig) -> Result<u64, Box<dyn std::error::Error>> {
    let stdin = io::stdin().lock();
    let mut writer = RowWriter::new(BufWriter::new(io::stdout().lock()), config);
    for sample in interval_records(stdin) {
        writer.write(&sample?)?;
    }
    Ok(writer.rows_written())
}
