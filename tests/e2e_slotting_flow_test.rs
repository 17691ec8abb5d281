// ==========================================
// 端到端流程测试
// ==========================================
// 流程: 文件导入 → 数据清洗 → 分类 + 货位分配 → 结果导出
// ==========================================

mod helpers;

use abc_slotting::domain::AbcClass;
use abc_slotting::engine::{AnalysisReport, SlottingOrchestrator};
use abc_slotting::export::{self, DEFAULT_EXPORT_DELIMITER, DERIVED_COLUMNS};
use abc_slotting::importer::{DataCleaner, UniversalFileParser};
use abc_slotting::logging;
use helpers::test_data_builder::{create_test_config, write_test_file};
use tempfile::TempDir;

const INVENTORY_CSV: &str = "\
Item_ID;Description;Annual_Demand;Unit_Cost
X;widget;100;10
Y;gadget;50;5
Z;bolt;10;1
W;nut;abc;1
";

fn run_pipeline(dir: &TempDir) -> AnalysisReport {
    let input = write_test_file(dir.path(), "inventory.csv", INVENTORY_CSV);
    let config = create_test_config();

    let table = UniversalFileParser.parse(&input).unwrap();
    let cleaned = DataCleaner.prepare(&table, &config.columns).unwrap();
    assert_eq!(cleaned.total_rows, 4);
    assert_eq!(cleaned.dropped_rows, 1);

    SlottingOrchestrator::new(config)
        .run(&cleaned.records)
        .unwrap()
}

#[test]
fn test_full_flow_classifies_and_locates() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let report = run_pipeline(&dir);

    let rows: Vec<(&str, AbcClass, String)> = report
        .located
        .iter()
        .map(|row| (row.item.item_id(), row.item.abc_class, row.location.to_string()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("X", AbcClass::A, "1.01.01.01.01".to_string()),
            ("Y", AbcClass::C, "1.04.01.01.01".to_string()),
            ("Z", AbcClass::C, "1.04.01.01.02".to_string()),
        ]
    );

    assert_eq!(report.stats.assigned, 3);
    assert_eq!(report.stats.failed(), 0);
    assert_eq!(report.summary.len(), 2);
    assert_eq!(report.summary[0].abc_class, AbcClass::A);
    assert_eq!(report.summary[1].item_count, 2);
}

#[test]
fn test_export_round_trips_through_parser() {
    let dir = TempDir::new().unwrap();
    let report = run_pipeline(&dir);

    let output = dir.path().join("located.csv");
    export::export_to_path(&output, &report.located, DEFAULT_EXPORT_DELIMITER).unwrap();

    let exported = UniversalFileParser.parse(&output).unwrap();
    let mut expected_headers = vec!["item_id", "description", "annual_demand", "unit_cost"];
    expected_headers.extend(DERIVED_COLUMNS);
    assert_eq!(exported.headers, expected_headers);
    assert_eq!(exported.len(), 3);

    let class_col = exported.column_index("abc_class").unwrap();
    let location_col = exported.column_index("warehouse_location").unwrap();
    assert_eq!(exported.rows[0][0], "X");
    assert_eq!(exported.rows[0][1], "widget");
    assert_eq!(exported.rows[0][class_col], "A");
    assert_eq!(exported.rows[0][location_col], "1.01.01.01.01");
    assert_eq!(exported.rows[2][location_col], "1.04.01.01.02");
}

#[test]
fn test_json_report_round_trip() {
    let dir = TempDir::new().unwrap();
    let report = run_pipeline(&dir);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"1.01.01.01.01\""));

    let restored: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.run_id, report.run_id);
    assert_eq!(restored.located, report.located);
    assert_eq!(restored.stats, report.stats);

    // 末行累计占比 0.9999999999999999 需按位还原
    let last = |r: &AnalysisReport| r.classified.items[2].cumulative_value_percentage.to_bits();
    assert_eq!(last(&restored), last(&report));
}

#[test]
fn test_each_run_gets_new_run_id() {
    let dir = TempDir::new().unwrap();
    let first = run_pipeline(&dir);
    let second = run_pipeline(&dir);

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.located, second.located);
}
