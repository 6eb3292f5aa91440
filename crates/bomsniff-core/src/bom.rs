//! 字节序标记（BOM）分类
use serde::{Serialize, Serializer};
use std::fmt;

/// 五种 UTF 字节序标记之一，或 Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bom {
    /// 未检测到（初始状态，也是窗口关闭仍无匹配时的终态）
    #[default]
    Unknown,
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

impl Bom {
    /// 检测优先级：长序列在前，避免 `FF FE 00 00` 被 `FF FE` 遮蔽
    pub const DETECTION_ORDER: [Bom; 5] = [Bom::Utf32Be, Bom::Utf32Le, Bom::Utf8, Bom::Utf16Be, Bom::Utf16Le];

    /// 最长 BOM 的字节数，即检测窗口大小
    pub const MAX_LEN: usize = 4;

    /// 对应的 BOM 字节序列（Unknown 为空）
    pub const fn signature(self) -> &'static [u8] {
        match self {
            Bom::Unknown => &[],
            Bom::Utf8 => &[0xEF, 0xBB, 0xBF],
            Bom::Utf16Be => &[0xFE, 0xFF],
            Bom::Utf16Le => &[0xFF, 0xFE],
            Bom::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
            Bom::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
        }
    }

    /// 显示名称
    pub const fn name(self) -> &'static str {
        match self {
            Bom::Unknown => "Unknown",
            Bom::Utf8 => "UTF8",
            Bom::Utf16Be => "UTF16BE",
            Bom::Utf16Le => "UTF16LE",
            Bom::Utf32Be => "UTF32BE",
            Bom::Utf32Le => "UTF32LE",
        }
    }

    /// 按优先级对 `bytes` 做前缀匹配；字节不足以构成任何 BOM 时返回 Unknown
    pub fn match_prefix(bytes: &[u8]) -> Bom {
        Self::DETECTION_ORDER
            .into_iter()
            .find(|bom| bytes.starts_with(bom.signature()))
            .unwrap_or(Bom::Unknown)
    }

    pub fn is_known(self) -> bool {
        self != Bom::Unknown
    }
}

impl fmt::Display for Bom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad 而非 write_str，使表格输出中的宽度/对齐参数生效
        f.pad(self.name())
    }
}

impl Serialize for Bom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_are_bit_exact() {
        assert_eq!(Bom::Utf32Be.signature(), b"\x00\x00\xFE\xFF");
        assert_eq!(Bom::Utf32Le.signature(), b"\xFF\xFE\x00\x00");
        assert_eq!(Bom::Utf8.signature(), b"\xEF\xBB\xBF");
        assert_eq!(Bom::Utf16Be.signature(), b"\xFE\xFF");
        assert_eq!(Bom::Utf16Le.signature(), b"\xFF\xFE");
        assert!(Bom::Unknown.signature().is_empty());
    }

    #[test]
    fn detection_order_is_longest_first() {
        let lens: Vec<usize> = Bom::DETECTION_ORDER.iter().map(|b| b.signature().len()).collect();
        assert!(lens.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(lens[0], Bom::MAX_LEN);
    }

    #[test]
    fn utf32le_wins_over_utf16le() {
        assert_eq!(Bom::match_prefix(&[0xFF, 0xFE]), Bom::Utf16Le);
        assert_eq!(Bom::match_prefix(&[0xFF, 0xFE, 0x00]), Bom::Utf16Le);
        assert_eq!(Bom::match_prefix(&[0xFF, 0xFE, 0x00, 0x00]), Bom::Utf32Le);
        assert_eq!(Bom::match_prefix(&[0xFF, 0xFE, 0x00, 0x41]), Bom::Utf16Le);
    }

    #[test]
    fn partial_or_unmarked_prefix_is_unknown() {
        assert_eq!(Bom::match_prefix(&[]), Bom::Unknown);
        assert_eq!(Bom::match_prefix(&[0x00, 0x00, 0xFE]), Bom::Unknown);
        assert_eq!(Bom::match_prefix(&[0xEF, 0xBB]), Bom::Unknown);
        assert_eq!(Bom::match_prefix(b"hello"), Bom::Unknown);
    }

    #[test]
    fn display_and_serialize_use_name() {
        assert_eq!(Bom::Unknown.to_string(), "Unknown");
        assert_eq!(Bom::Utf16Le.to_string(), "UTF16LE");
        assert_eq!(format!("{:<8}|", Bom::Utf8), "UTF8    |");
        assert_eq!(serde_json::to_string(&Bom::Utf32Be).unwrap(), "\"UTF32BE\"");
    }
}
