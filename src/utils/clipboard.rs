//! Clipboard  cross-platform clipboard helpers

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard error: {0}")]
    Clip(String),
}

/// 将文本复制到系统剪贴板
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Clip(e.to_string()))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| ClipboardError::Clip(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use copypasta::{ClipboardContext, ClipboardProvider};

    #[test]
    #[ignore = "需要图形环境中的系统剪贴板"]
    fn test_clipboard_copy_record_json() {
        let record = "{\n  \"Properties\": {\n    \"name\": \"ADMIN@CORP.LOCAL\"\n  }\n}";

        assert!(copy_to_clipboard(record).is_ok(), "复制到剪贴板应该成功");

        let mut ctx = ClipboardContext::new().unwrap();
        assert_eq!(ctx.get_contents().unwrap(), record, "剪贴板内容应该与复制的文本一致");
    }
}
