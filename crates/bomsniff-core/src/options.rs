//! 嗅探选项与统计信息

/// 报告输出格式
/// - Table：`路径<空格对齐>BOM`，便于终端阅读
/// - Json：流式 JSON 数组，便于脚本处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// 嗅探选项
#[derive(Debug, Clone)]
pub struct SniffOptions {
    /// 输出格式
    pub format: OutputFormat,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    /// 目录遍历最大深度（1 表示只看目录下一层）
    pub max_depth: usize,
    /// 检测窗口关闭后即停止读取；默认读完整个文件
    pub stop_early: bool,
}

impl Default for SniffOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            threads: None,
            max_depth: 1,
            stop_early: false,
        }
    }
}

/// 嗅探统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SniffStats {
    pub files_sniffed: usize,
    pub files_failed: usize,
    pub with_bom: usize,
}
