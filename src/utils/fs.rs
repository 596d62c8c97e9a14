//! IO helper: read exported `{"data": [...]}` JSON documents

use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;
use serde_json::Value;

use crate::model::data_core::AppError;

/// 导出文件的顶层结构，只关心 `data` 数组
#[derive(Debug, Deserialize)]
struct DataFile {
    data: Vec<Value>,
}

/// 读取导出文件并取出 `data` 数组（保持文件中的顺序）
///
/// 文件缺失、JSON格式错误、缺少 `data` 键或 `data` 不是数组都返回错误
pub fn read_data_array(p: &Path) -> Result<Vec<Value>, AppError> {
    let f = File::open(p).map_err(|source| AppError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let rdr = BufReader::new(f);
    let file: DataFile = serde_json::from_reader(rdr).map_err(|source| AppError::Parse {
        path: p.to_path_buf(),
        source,
    })?;
    tracing::info!("已读取 {}: {} 条记录", p.display(), file.data.len());
    Ok(file.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("创建临时文件失败");
        file.write_all(content.as_bytes()).expect("写入临时文件失败");
        file
    }

    #[test]
    fn test_read_data_array_in_order() {
        let file = create_test_json_file(
            r#"{"meta": {"type": "users"}, "data": [{"Properties": {"name": "b"}}, 3, {"Properties": {"name": "a"}}]}"#,
        );

        let data = read_data_array(file.path()).expect("读取应该成功");

        assert_eq!(data.len(), 3);
        assert_eq!(data[1], Value::from(3));
        assert_eq!(data[2]["Properties"]["name"], "a");
    }

    #[test]
    fn test_missing_file() {
        let err = read_data_array(Path::new("/nonexistent/users.json")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/users.json"));
    }

    #[test]
    fn test_malformed_json() {
        let file = create_test_json_file(r#"{"data": [ {"invalid": json} ]}"#);
        let err = read_data_array(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
    }

    #[test]
    fn test_missing_data_key() {
        let file = create_test_json_file(r#"{"meta": {"count": 0}}"#);
        let err = read_data_array(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
    }

    #[test]
    fn test_data_not_an_array() {
        let file = create_test_json_file(r#"{"data": {"Properties": {}}}"#);
        assert!(read_data_array(file.path()).is_err());
    }

    #[test]
    fn test_empty_data_array() {
        let file = create_test_json_file(r#"{"data": []}"#);
        assert!(read_data_array(file.path()).unwrap().is_empty());
    }
}
