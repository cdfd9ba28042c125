//! fping 输出转换
//!
//! 从 stdin 逐行读取 fping 输出（建议 `fping -D -l`），转换为 JSON 行或逗号分隔行写到 stdout。
//! 无法解析的行会在 stderr 告警后跳过。

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use netdelay_rs::parse::probe_records;
use netdelay_rs::row::{EmitConfig, OutputFormat, RowWriter};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "fping-parser", about = "把 fping 输出解析为 JSON 或 CSV")]
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
            error!(%err, "fping-parser failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: EmitConfig) -> Result<u64, Box<dyn std::error::Error>> {
    let stdin = io::stdin().lock();
    let mut writer = RowWriter::new(BufWriter::new(io::stdout().lock()), config);
    for record in probe_records(stdin) {
        writer.write(&record?)?;
    }
    Ok(writer.rows_written())
}
