//! 单文件报告与输出（表格 / JSON）
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use crate::bom::Bom;
use crate::options::OutputFormat;

/// 单个文件的嗅探结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// 失败时为 None
    pub bom: Option<Bom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 按顺序接收报告的输出端
pub(crate) trait ReportSink {
    fn write_report(&mut self, out: &mut dyn Write, report: &FileReport) -> Result<()>;
    fn finish(&mut self, out: &mut dyn Write) -> Result<()>;
}

pub(crate) fn sink_for(format: OutputFormat) -> Box<dyn ReportSink> {
    match format {
        OutputFormat::Table => Box::new(TableSink::default()),
        OutputFormat::Json => Box::new(JsonSink { first: true }),
    }
}

/// 表格输出：需要最宽路径来对齐，因此先缓存，finish 时一次写出
#[derive(Default)]
struct TableSink {
    rows: Vec<(String, String)>,
}

impl ReportSink for TableSink {
    fn write_report(&mut self, _out: &mut dyn Write, report: &FileReport) -> Result<()> {
        let status = match (&report.bom, &report.error) {
            (_, Some(e)) => format!("error: {e}"),
            (Some(bom), None) => bom.to_string(),
            (None, None) => Bom::Unknown.to_string(),
        };
        self.rows.push((report.path.display().to_string(), status));
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn Write) -> Result<()> {
        let width = self.rows.iter().map(|(p, _)| p.chars().count()).max().unwrap_or(0);
        for (path, status) in self.rows.drain(..) {
            writeln!(out, "{path:<width$} {status}")?;
        }
        Ok(())
    }
}

/// JSON 数组流式输出
struct JsonSink {
    first: bool,
}

impl ReportSink for JsonSink {
    fn write_report(&mut self, out: &mut dyn Write, report: &FileReport) -> Result<()> {
        if self.first {
            write!(out, "[")?;
            self.first = false;
        } else {
            write!(out, ",")?;
        }
        serde_json::to_writer(&mut *out, report)?;
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.first {
            write!(out, "[")?;
        }
        writeln!(out, "]")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reports() -> Vec<FileReport> {
        vec![
            FileReport { path: "utf8.txt".into(), bom: Some(Bom::Unknown), error: None },
            FileReport { path: "utf16lebom.txt".into(), bom: Some(Bom::Utf16Le), error: None },
            FileReport { path: "gone.txt".into(), bom: None, error: Some("not found".into()) },
        ]
    }

    fn render(format: OutputFormat, reports: &[FileReport]) -> String {
        let mut out = Vec::new();
        let mut sink = sink_for(format);
        for r in reports {
            sink.write_report(&mut out, r).unwrap();
        }
        sink.finish(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn table_pads_to_widest_path() {
        let got = render(OutputFormat::Table, &reports());
        let want = "utf8.txt       Unknown\n\
                    utf16lebom.txt UTF16LE\n\
                    gone.txt       error: not found\n";
        assert_eq!(got, want);
    }

    #[test]
    fn json_array_skips_missing_error() {
        let got = render(OutputFormat::Json, &reports());
        let want = concat!(
            r#"[{"path":"utf8.txt","bom":"Unknown"},"#,
            r#"{"path":"utf16lebom.txt","bom":"UTF16LE"},"#,
            r#"{"path":"gone.txt","bom":null,"error":"not found"}]"#,
            "\n"
        );
        assert_eq!(got, want);
    }

    #[test]
    fn empty_outputs() {
        assert_eq!(render(OutputFormat::Json, &[]), "[]\n");
        assert_eq!(render(OutputFormat::Table, &[]), "");
    }
}
