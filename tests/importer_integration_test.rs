// ==========================================
// 导入层集成测试
// ==========================================
// 测试范围:
// 1. 扩展名分派 / 分隔符识别
// 2. 清洗规则（列缺失 / 无效行 / 全部无效）
// ==========================================

mod helpers;

use abc_slotting::config::ColumnConfig;
use abc_slotting::engine::AbcClassifier;
use abc_slotting::importer::{CsvParser, DataCleaner, FileParser, ImportError, UniversalFileParser};
use helpers::test_data_builder::write_test_file;
use tempfile::TempDir;

#[test]
fn test_parse_tab_separated_file() {
    let dir = TempDir::new().unwrap();
    let path = write_test_file(
        dir.path(),
        "stock.csv",
        "item_id\tannual_demand\tunit_cost\nA-1\t10\t2\n\t\t\nA-2\t3\t1\n",
    );

    let table = UniversalFileParser.parse(&path).unwrap();
    assert_eq!(table.headers, vec!["item_id", "annual_demand", "unit_cost"]);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_explicit_delimiter_parser() {
    let dir = TempDir::new().unwrap();
    let path = write_test_file(dir.path(), "stock.csv", "item_id|annual_demand|unit_cost\nA|1|1\n");

    let table = CsvParser::with_delimiter(b'|').parse_to_table(&path).unwrap();
    assert_eq!(table.rows, vec![vec!["A", "1", "1"]]);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_test_file(dir.path(), "stock.txt", "item_id,annual_demand,unit_cost\n");

    let err = UniversalFileParser.parse(&path).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(ext) if ext == "txt"));
}

#[test]
fn test_empty_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_test_file(dir.path(), "empty.csv", "");
    let err = UniversalFileParser.parse(&path).unwrap_err();
    assert!(matches!(err, ImportError::EmptyFile));
}

#[test]
fn test_single_column_file_reports_delimiter_failure() {
    let dir = TempDir::new().unwrap();
    let path = write_test_file(dir.path(), "single.csv", "item_id\nA\nB\n");
    let err = UniversalFileParser.parse(&path).unwrap_err();
    assert!(matches!(err, ImportError::DelimiterNotDetected(_)));
}

#[test]
fn test_clean_reports_missing_required_columns() {
    let dir = TempDir::new().unwrap();
    let path = write_test_file(dir.path(), "stock.csv", "item_id,qty\nA,1\n");
    let table = UniversalFileParser.parse(&path).unwrap();

    let err = DataCleaner.prepare(&table, &ColumnConfig::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        ImportError::MissingColumns(vec!["annual_demand".to_string(), "unit_cost".to_string()])
            .to_string()
    );
}

#[test]
fn test_clean_drops_negative_and_unparsable_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_test_file(
        dir.path(),
        "stock.csv",
        "item_id,annual_demand,unit_cost\nA,10,1\nB,-2,1\nC,1,x\nD,0,4\n",
    );
    let table = UniversalFileParser.parse(&path).unwrap();
    let cleaned = DataCleaner.prepare(&table, &ColumnConfig::default()).unwrap();

    let ids: Vec<&str> = cleaned.records.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids, vec!["A", "D"]);
    assert_eq!(cleaned.dropped_rows, 2);
}

#[test]
fn test_negative_zero_demand_ties_keep_input_order() {
    let dir = TempDir::new().unwrap();
    let path = write_test_file(
        dir.path(),
        "stock.csv",
        "item_id,annual_demand,unit_cost\nP,-0,5\nQ,0,5\nR,10,1\n",
    );
    let table = UniversalFileParser.parse(&path).unwrap();
    let cleaned = DataCleaner.prepare(&table, &ColumnConfig::default()).unwrap();
    assert_eq!(cleaned.dropped_rows, 0);

    let classified = AbcClassifier::new()
        .classify(&cleaned.records, "annual_demand", "unit_cost", 0.8, 0.95)
        .unwrap();
    let ids: Vec<&str> = classified.items.iter().map(|i| i.item_id()).collect();
    assert_eq!(ids, vec!["R", "P", "Q"]);
}
