// ==========================================
// ABC 货位系统 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv, 自动识别分隔符) / Excel (.xlsx/.xls)
// 列名统一: 小写 + 去首尾空白
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 自动识别时依次尝试的分隔符
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

// ==========================================
// RawTable - 原始表
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>, // 每行与 headers 等长
}

impl RawTable {
    /// 列名对应的下标
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 追加一行（补齐或截断到列数, 全空行跳过）
    fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(|c| c.as_ref().trim().to_string())
            .collect();
        row.resize(self.headers.len(), String::new());

        if row.iter().all(|v| v.is_empty()) {
            return;
        }
        self.rows.push(row);
    }
}

/// 列名标准化
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser {
    delimiter: Option<u8>, // None 表示自动识别
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 固定分隔符
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    /// 解析内存中的 CSV 内容
    ///
    /// 非 UTF-8 字节以替换字符解码; 自动识别时取第一个
    /// 能解析出多于 1 列表头的分隔符
    pub fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let content = String::from_utf8_lossy(bytes);
        let content = content.trim();
        if content.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        if let Some(delimiter) = self.delimiter {
            return parse_with_delimiter(content, delimiter);
        }

        let mut error_messages = Vec::new();
        for delimiter in CANDIDATE_DELIMITERS {
            let shown = describe_delimiter(delimiter);
            match parse_with_delimiter(content, delimiter) {
                Ok(table) if table.headers.len() > 1 => {
                    debug!(delimiter = %shown, columns = table.headers.len(), "识别 CSV 分隔符");
                    return Ok(table);
                }
                Ok(_) => error_messages.push(format!("使用 '{}' 分隔只得到 1 列", shown)),
                Err(e) => error_messages.push(format!("使用 '{}' 分隔失败: {}", shown, e)),
            }
        }

        Err(ImportError::DelimiterNotDetected(error_messages.join("\n")))
    }
}

impl FileParser for CsvParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let bytes = fs::read(file_path)?;
        self.parse_bytes(&bytes)
    }
}

fn parse_with_delimiter(content: &str, delimiter: u8) -> ImportResult<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true) // 允许行长度不一致
        .from_reader(content.as_bytes());

    let mut table = RawTable {
        headers: reader.headers()?.iter().map(normalize_header).collect(),
        rows: Vec::new(),
    };

    for result in reader.records() {
        let record = result?;
        table.push_row(record.iter());
    }

    Ok(table)
}

fn describe_delimiter(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let mut table = RawTable {
            headers: header_row
                .iter()
                .map(|cell| normalize_header(&cell.to_string()))
                .collect(),
            rows: Vec::new(),
        };

        for data_row in rows {
            table.push_row(data_row.iter().map(|cell| cell.to_string()));
        }

        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser::new().parse_to_table(path),
            "xlsx" | "xls" => ExcelParser.parse_to_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
