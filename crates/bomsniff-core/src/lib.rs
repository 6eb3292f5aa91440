//! BOM 嗅探库
//!
//! 设计要点：
//! - [`Reader`] 包装任意 `std::io::Read`，读取时透传全部字节，只旁观流首部最多 4 个字节。
//! - 支持五种 BOM：UTF-8、UTF-16 BE/LE、UTF-32 BE/LE；按长度从长到短匹配。
//! - 不解码、不剥离 BOM、不回退（seek）。
//! - 文件级工具（[`sniff_file`] / [`sniff_and_write`]）供 CLI 使用。
//!
//! ```
//! use std::io::{BufRead, BufReader};
//! use bomsniff_core::{Bom, Reader};
//!
//! let data: &[u8] = b"\xEF\xBB\xBFline 1\nline 2\n";
//! let mut sniffer = Reader::new(data);
//! let lines: Vec<String> = BufReader::new(&mut sniffer).lines().collect::<Result<_, _>>().unwrap();
//!
//! assert_eq!(lines, ["\u{FEFF}line 1", "line 2"]);
//! assert_eq!(sniffer.bom(), Bom::Utf8);
//! ```

mod bom;
mod error;
mod options;
mod reader;
mod report;
mod sniff;

pub use bom::Bom;
pub use error::SniffError;
pub use options::{OutputFormat, SniffOptions, SniffStats};
pub use reader::Reader;
pub use report::FileReport;
pub use sniff::{sniff_and_write, sniff_file};
