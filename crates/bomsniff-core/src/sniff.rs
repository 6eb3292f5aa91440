//! 文件嗅探主流程与并行调度
use anyhow::Result;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::bom::Bom;
use crate::error::SniffError;
use crate::options::{SniffOptions, SniffStats};
use crate::reader::Reader;
use crate::report::{sink_for, FileReport, ReportSink};

const READ_BUF_SIZE: usize = 64 * 1024;

/// 打开文件并经由 [`Reader`] 读取，返回检测到的 BOM
///
/// `stop_early` 为 false 时读完整个文件（读取错误也会暴露出来）；
/// 为 true 时检测窗口一关闭即返回。
pub fn sniff_file(path: &Path, stop_early: bool) -> Result<Bom, SniffError> {
    let file = File::open(path).map_err(|source| SniffError::Open { path: path.to_path_buf(), source })?;
    let mut sniffer = Reader::new(file);
    let read_err = |source| SniffError::Read { path: path.to_path_buf(), source };

    if stop_early {
        let mut buf = [0u8; Bom::MAX_LEN];
        while !sniffer.settled() {
            match sniffer.read(&mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(read_err(e)),
            }
        }
    } else {
        let mut buf = vec![0u8; READ_BUF_SIZE];
        loop {
            match sniffer.read(&mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(read_err(e)),
            }
        }
    }

    debug!(path = %path.display(), bom = %sniffer.bom(), "sniffed");
    Ok(sniffer.bom())
}

/// 展开输入：文件原样保留，目录按 `max_depth` 遍历；按路径排序保证输出稳定
pub(crate) fn collect_files(inputs: &[PathBuf], max_depth: usize) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            // 不存在的路径也保留，由嗅探阶段报告错误
            files.push(input.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(input).min_depth(1).max_depth(max_depth) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                found.push(entry.into_path());
            }
        }
        found.sort();
        files.extend(found);
    }
    files
}

fn sniff_one(path: &Path, stop_early: bool) -> FileReport {
    match sniff_file(path, stop_early) {
        Ok(bom) => FileReport { path: path.to_path_buf(), bom: Some(bom), error: None },
        Err(e) => {
            warn!(error = %e, "sniff failed");
            FileReport { path: path.to_path_buf(), bom: None, error: Some(e.to_string()) }
        }
    }
}

fn record(stats: &mut SniffStats, report: &FileReport) {
    match report.bom {
        Some(bom) => {
            stats.files_sniffed += 1;
            if bom.is_known() {
                stats.with_bom += 1;
            }
        }
        None => stats.files_failed += 1,
    }
}

/// 嗅探 `inputs` 中的文件，并按 `opts.format` 把报告写入 `out`
/// 稳定性保证：无论是否并行，报告顺序与 [`collect_files`] 的顺序一致
pub fn sniff_and_write(inputs: &[PathBuf], out: &mut dyn Write, opts: &SniffOptions) -> Result<SniffStats> {
    let files = collect_files(inputs, opts.max_depth);
    let mut sink = sink_for(opts.format);
    let mut stats = SniffStats::default();

    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    debug!(files = files.len(), threads, "collected inputs");

    if threads > 1 && files.len() > 1 {
        sniff_and_write_parallel(files, out, opts, sink.as_mut(), &mut stats, threads)?;
    } else {
        for path in &files {
            let report = sniff_one(path, opts.stop_early);
            record(&mut stats, &report);
            sink.write_report(out, &report)?;
        }
    }

    sink.finish(out)?;
    Ok(stats)
}

/// 并行调度：
/// - Rayon 线程池并行嗅探
/// - 当前线程作为 Writer，按 idx 重排后写出，保证稳定顺序
fn sniff_and_write_parallel(
    files: Vec<PathBuf>,
    out: &mut dyn Write,
    opts: &SniffOptions,
    sink: &mut dyn ReportSink,
    stats: &mut SniffStats,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;
    use std::collections::BTreeMap;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let (tx, rx) = channel::bounded::<(usize, FileReport)>(256);
    let stop_early = opts.stop_early;

    let sniff_thread = std::thread::spawn(move || {
        pool.install(|| {
            files.par_iter().enumerate().for_each_with(tx, |tx, (idx, path)| {
                let _ = tx.send((idx, sniff_one(path, stop_early)));
            });
        });
        // 所有 Sender 随闭包一起释放，Receiver 收到关闭信号
    });

    let mut next_idx: usize = 0;
    let mut pending: BTreeMap<usize, FileReport> = BTreeMap::new();
    let mut write_result = Ok(());

    while let Ok((idx, report)) = rx.recv() {
        pending.insert(idx, report);
        while let Some(report) = pending.remove(&next_idx) {
            record(stats, &report);
            if write_result.is_ok() {
                write_result = sink.write_report(out, &report);
            }
            next_idx += 1;
        }
    }

    if sniff_thread.join().is_err() {
        anyhow::bail!("sniff worker panicked");
    }
    write_result
}
