use excelmap_core::{CellValue, MapperError, RawTable, SaveOptions, SaveStatus, TableMapper};
use std::path::Path;
use tempfile::tempdir;

fn write_sample(path: &Path) {
    RawTable::new(
        vec![
            "Transaction ID".into(),
            "Amount (USD)".into(),
            "Transaction Date".into(),
            "Category".into(),
        ],
        vec![
            vec!["TXN-1".into(), 1500.5.into(), "2024-01-05".into(), "Travel".into()],
            vec!["TXN-2".into(), CellValue::Null, "2024-01-06".into(), CellValue::Null],
            vec!["TXN-3".into(), 42.0.into(), CellValue::Null, "Office".into()],
        ],
    )
    .write(path)
    .unwrap();
}

// ===== Load Tests =====

#[test]
fn test_load_xlsx() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("financial.xlsx");
    write_sample(&path);

    let mapper = TableMapper::load(&path).unwrap();

    assert_eq!(mapper.len(), 3);
    assert_eq!(mapper.source_path(), Some(path.as_path()));
    assert_eq!(
        mapper.attribute_names(),
        vec!["transaction_id", "amount_usd", "transaction_date", "category"]
    );
    assert_eq!(mapper[0].get("transaction_id").unwrap(), &CellValue::from("TXN-1"));
    assert_eq!(mapper[0].get("amount_usd").unwrap().as_float(), Some(1500.5));
    assert!(mapper[1].get("amount_usd").unwrap().is_null());
    assert!(mapper[2].get("transaction_date").unwrap().is_null());
    assert!(mapper[1].original("Category").unwrap().is_null());
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let result = TableMapper::load(dir.path().join("nope.xlsx"));
    assert!(matches!(result, Err(MapperError::Io { .. })));
}

#[test]
fn test_load_unsupported_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{}").unwrap();
    assert!(matches!(TableMapper::load(&path), Err(MapperError::Io { .. })));
}

#[test]
fn test_load_duplicate_headers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dupes.csv");
    std::fs::write(&path, "Qty,Price,Qty\n1,2,3\n").unwrap();

    let mapper = TableMapper::load(&path).unwrap();
    assert_eq!(mapper.attribute_names(), vec!["qty", "price", "qty_C"]);
    assert_eq!(mapper.original_columns(), vec!["Qty", "Price", "Qty"]);
    assert_eq!(mapper[0].get("qty_C").unwrap(), &CellValue::from("3"));
    assert_eq!(mapper[0].original("Qty"), Some(&CellValue::from("1")));
}

// ===== Save Tests =====

#[test]
fn test_roundtrip_unchanged() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.xlsx");
    let copy = dir.path().join("copy.xlsx");
    write_sample(&source);

    let original = TableMapper::load(&source).unwrap();
    let status = original.save(Some(copy.as_path()), &SaveOptions::default()).unwrap();
    assert_eq!(status, SaveStatus::Created);

    let reloaded = TableMapper::load(&copy).unwrap();
    assert_eq!(reloaded.original_columns(), original.original_columns());
    assert_eq!(reloaded.len(), original.len());
    for (a, b) in original.iter().zip(reloaded.iter()) {
        assert_eq!(a.fields().collect::<Vec<_>>(), b.fields().collect::<Vec<_>>());
    }
}

#[test]
fn test_roundtrip_csv() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.csv");
    let copy = dir.path().join("copy.csv");
    std::fs::write(&source, "Name,E-mail Address\nAlice,\nBob,bob@example.com\n").unwrap();

    let original = TableMapper::load(&source).unwrap();
    original.save(Some(copy.as_path()), &SaveOptions::default()).unwrap();

    assert_eq!(
        std::fs::read_to_string(&copy).unwrap(),
        std::fs::read_to_string(&source).unwrap()
    );
}

#[test]
fn test_save_edits_and_added_rows() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.xlsx");
    let output = dir.path().join("output.xlsx");
    write_sample(&source);

    let mut mapper = TableMapper::load(&source).unwrap();
    mapper.update_row(1, [("amount_usd", 99.25)]).unwrap();
    mapper
        .update_column("category", vec!["A", "B", "C"])
        .unwrap();
    mapper
        .add_row([("transaction_id", CellValue::from("TXN-4"))])
        .unwrap();
    mapper.save(Some(output.as_path()), &SaveOptions::default()).unwrap();

    let reloaded = TableMapper::load(&output).unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded[1].get("amount_usd").unwrap().as_float(), Some(99.25));
    assert_eq!(reloaded[2].get("category").unwrap(), &CellValue::from("C"));
    assert_eq!(reloaded[3].get("transaction_id").unwrap(), &CellValue::from("TXN-4"));
    assert!(reloaded[3].get("amount_usd").unwrap().is_null());
}

#[test]
fn test_save_existing_destination() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.xlsx");
    let output = dir.path().join("output.xlsx");
    write_sample(&source);
    std::fs::write(&output, b"keep me").unwrap();

    let mapper = TableMapper::load(&source).unwrap();
    let result = mapper.save(Some(output.as_path()), &SaveOptions::default());
    assert!(matches!(result, Err(MapperError::AlreadyExists { .. })));
    assert_eq!(std::fs::read(&output).unwrap(), b"keep me");

    let status = mapper
        .save(Some(output.as_path()), &SaveOptions::default().with_overwrite(true))
        .unwrap();
    assert_eq!(status, SaveStatus::Overwrote);
    assert_eq!(TableMapper::load(&output).unwrap().len(), 3);
}

#[test]
fn test_save_over_source() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.xlsx");
    write_sample(&source);

    let mut mapper = TableMapper::load(&source).unwrap();
    mapper.update_row(0, [("category", "Updated")]).unwrap();

    let result = mapper.save(None, &SaveOptions::default());
    assert!(matches!(result, Err(MapperError::MissingDestination(_))));

    let status = mapper
        .save(None, &SaveOptions::default().with_source_overwrite(true))
        .unwrap();
    assert_eq!(status, SaveStatus::Overwrote);

    let reloaded = TableMapper::load(&source).unwrap();
    assert_eq!(reloaded[0].get("category").unwrap(), &CellValue::from("Updated"));
}

#[test]
fn test_save_writes_original_headers() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let mapper = TableMapper::from_table(RawTable::from_data(
        vec!["Amount (USD)", "Qty", "Qty"],
        vec![vec![CellValue::from(1), CellValue::from(2), CellValue::from(3)]],
    ));
    mapper.save(Some(output.as_path()), &SaveOptions::default()).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content, "Amount (USD),Qty,Qty\n1,2,3\n");
}

#[test]
fn test_mutation_visible_through_sequence() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.xlsx");
    write_sample(&source);

    let mut mapper = TableMapper::load(&source).unwrap();
    mapper.row_mut(2).unwrap().set("category", "Changed").unwrap();

    let categories: Vec<String> = mapper
        .iter()
        .map(|row| row.get("category").unwrap().as_str())
        .collect();
    assert_eq!(categories, vec!["Travel", "", "Changed"]);
    assert_eq!(mapper[2].original("Category"), Some(&CellValue::from("Office")));
}
