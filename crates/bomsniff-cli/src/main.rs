use anyhow::{Context, Result};
use bomsniff_core::{sniff_and_write, OutputFormat, SniffOptions};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "bomsniff", version, about = "Report the byte order mark of each file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 嗅探文件/目录并输出每个文件的 BOM
    Sniff {
        /// 输入文件或目录
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 输出文件；缺省写到标准输出
        #[arg(long)]
        output: Option<PathBuf>,

        /// 输出格式：table 或 json
        #[arg(long, default_value = "table", value_parser = ["table", "json"])]
        format: String,

        /// 线程数（"auto"=CPU 核心数）
        #[arg(long, default_value = "auto")]
        threads: String,

        /// 目录遍历最大深度
        #[arg(long, default_value_t = 1)]
        max_depth: usize,

        /// 检测窗口关闭后即停止读取文件
        #[arg(long)]
        stop_early: bool,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug、trace）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sniff { paths, output, format, threads, max_depth, stop_early } => {
            info!(inputs = paths.len(), ?output, "starting sniff");

            let format = match format.as_str() {
                "json" => OutputFormat::Json,
                _ => OutputFormat::Table,
            };
            let opts = SniffOptions { format, threads: parse_threads(&threads), max_depth, stop_early };

            let mut out: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path).context("create output file")?)),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            let stats = sniff_and_write(&paths, &mut out, &opts).context("sniff and write failed")?;
            out.flush().context("flush output")?;

            info!(
                files_sniffed = stats.files_sniffed,
                files_failed = stats.files_failed,
                with_bom = stats.with_bom,
                "sniff finished"
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，避免与 stdout 上的报告混在一起
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") {
        return None;
    }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
