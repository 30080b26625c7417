use std::fs;

use calamine::{Reader, open_workbook_auto};
use mushak_map::HeaderReconciliation;
use mushak_model::{CellValue, ProjectedRow, TaxField, TaxLine};
use mushak_output::{
    CsvWriter, ExportFormat, JsonWriter, RowWriter, XlsxWriter, submission_payload,
};

fn sample_rows() -> Vec<ProjectedRow> {
    let mut line = TaxLine::default();
    line.set(TaxField::HsCode, CellValue::from("8471"));
    line.set(TaxField::Description, CellValue::from("Laptop"));
    line.set(TaxField::Cd, CellValue::ZERO);
    line.set(TaxField::Sd, CellValue::ZERO);
    line.set(TaxField::Rd, CellValue::ZERO);
    line.set(TaxField::Vat, CellValue::Integer(15));
    line.set(TaxField::Ait, CellValue::from("5"));
    line.set(TaxField::Tti, CellValue::ZERO);
    vec![ProjectedRow { row_index: 2, line }]
}

#[test]
fn csv_export_uses_fixed_column_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("out.csv");
    CsvWriter
        .write_rows(&sample_rows(), &path)
        .expect("write csv");

    let text = fs::read_to_string(&path).expect("read csv");
    assert_eq!(
        text,
        "HS Code,Description,CD,SD,VAT,AIT,RD,TTI\n8471,Laptop,0,0,15,5,0,0\n"
    );
}

#[test]
fn json_export_keeps_row_index() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("out.json");
    JsonWriter
        .write_rows(&sample_rows(), &path)
        .expect("write json");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read json")).expect("parse json");
    assert_eq!(value[0]["__rowIndex"], 2);
    assert_eq!(value[0]["HSCode"], "8471");
    assert_eq!(value[0]["VAT"], 15);

    let round: Vec<ProjectedRow> = serde_json::from_value(value).expect("rows");
    assert_eq!(round, sample_rows());
}

#[test]
fn xlsx_export_reimports_with_exact_matches() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("out.xlsx");
    XlsxWriter
        .write_rows(&sample_rows(), &path)
        .expect("write xlsx");

    let workbook = open_workbook_auto(&path).expect("open xlsx");
    assert_eq!(workbook.sheet_names(), vec!["HS Codes"]);

    let sheet = mushak_ingest::read_sheet(&path).expect("read back");
    assert_eq!(
        sheet.headers,
        vec!["HS Code", "Description", "CD", "SD", "VAT", "AIT", "RD", "TTI"]
    );

    let mut state = HeaderReconciliation::default();
    state.load(sheet);
    assert!(state.is_ready());
    assert_eq!(state.summary().exact, 8);

    let rows = state.import().expect("ready");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].row_index, 2);
    assert_eq!(rows[0].get(TaxField::HsCode), &CellValue::from("8471"));
    assert_eq!(rows[0].get(TaxField::Ait), &CellValue::from("5"));
    assert_eq!(rows[0].get(TaxField::Vat).as_f64(), Some(15.0));
    assert_eq!(rows[0].get(TaxField::Cd).as_f64(), Some(0.0));
}

#[test]
fn formats_dispatch_to_their_writer() {
    let dir = tempfile::tempdir().expect("temp dir");
    let rows = sample_rows();
    let csv = dir.path().join("dispatch.csv");
    let json = dir.path().join("dispatch.json");
    let xlsx = dir.path().join("dispatch.xlsx");
    ExportFormat::Csv.writer().write_rows(&rows, &csv).expect("csv");
    ExportFormat::Json.writer().write_rows(&rows, &json).expect("json");
    ExportFormat::Xlsx.writer().write_rows(&rows, &xlsx).expect("xlsx");

    assert!(
        fs::read_to_string(&csv)
            .expect("read csv")
            .starts_with("HS Code,Description,")
    );
    assert!(fs::read_to_string(&json).expect("read json").contains("\"__rowIndex\": 2"));
    let workbook = open_workbook_auto(&xlsx).expect("open xlsx");
    assert_eq!(workbook.sheet_names(), vec!["HS Codes"]);
}

#[test]
fn submission_payload_drops_row_index() {
    insta::assert_json_snapshot!(submission_payload(&sample_rows()), @r#"
    [
      {
        "HSCode": "8471",
        "Description": "Laptop",
        "CD": 0,
        "SD": 0,
        "RD": 0,
        "VAT": 15,
        "AIT": "5",
        "TTI": 0
      }
    ]
    "#);
}
