//! 嗅探式 Reader：透传读取，同时检查流首部的 BOM
use std::io::{self, Read};
use tracing::trace;

use crate::bom::Bom;

/// 包装任意 `Read`，在最初几个字节中检测 BOM 前缀
///
/// 读取到的字节原样交给调用方（不剥离 BOM、不解码）。
/// 分类确定或累计满 [`Bom::MAX_LEN`] 字节后不再检查，之后的读取为纯透传。
/// `FF FE` 先判为 UTF16LE；若紧随 `00 00` 则升级为 UTF32LE，此后不再变化。
/// 不负责关闭底层数据源。
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    bom: Bom,
    /// 暂存首部字节，长度不超过 MAX_LEN
    scratch: [u8; Bom::MAX_LEN],
    scratch_len: usize,
    /// 窗口已关闭：分类不会再变化
    settled: bool,
}

impl<R: Read> Reader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, bom: Bom::Unknown, scratch: [0; Bom::MAX_LEN], scratch_len: 0, settled: false }
    }
}

impl<R> Reader<R> {
    /// 当前已知的 BOM；窗口未关闭时可能在后续读取中升级（如 UTF16LE → UTF32LE）
    pub fn bom(&self) -> Bom {
        self.bom
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// 直接通过返回的引用读取的字节不会参与检测
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// 检测窗口是否已关闭
    pub(crate) fn settled(&self) -> bool {
        self.settled
    }

    /// 追加本次读到的字节并重新匹配整个暂存区
    fn inspect(&mut self, fresh: &[u8]) {
        let take = fresh.len().min(Bom::MAX_LEN - self.scratch_len);
        if take == 0 {
            return;
        }
        self.scratch[self.scratch_len..self.scratch_len + take].copy_from_slice(&fresh[..take]);
        self.scratch_len += take;

        let seen = &self.scratch[..self.scratch_len];
        self.bom = Bom::match_prefix(seen);
        // 已匹配但仍可能是更长 BOM 的前缀时（仅 FF FE），继续观察
        let extendable = Bom::DETECTION_ORDER
            .iter()
            .any(|b| b.signature().len() > seen.len() && b.signature().starts_with(seen));
        self.settled = self.scratch_len == Bom::MAX_LEN || (self.bom.is_known() && !extendable);

        if self.settled {
            trace!(bom = %self.bom, seen = self.scratch_len, "detection window closed");
        }
    }
}

impl<R: Read> Read for Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if !self.settled {
            self.inspect(&buf[..n]);
        }
        Ok(n)
    }
}
