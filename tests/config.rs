use anyhow::Result;
use emtable::{ColumnType, ReadOptions, Row, Value, WriteOptions};

#[test]
fn read_options_from_partial_json() -> Result<()> {
    let options: ReadOptions = serde_json::from_str(r#"{"types": {"rlnImageId": "Integer"}}"#)?;
    assert!(!options.header_only);
    assert_eq!(options.types.get("rlnImageId"), Some(&ColumnType::Integer));
    assert_eq!(
        options,
        ReadOptions::new().with_type("rlnImageId", ColumnType::Integer)
    );
    Ok(())
}

#[test]
fn write_options_defaults() -> Result<()> {
    let options: WriteOptions = serde_json::from_str(r#"{"label_ordinals": true}"#)?;
    assert_eq!(options, WriteOptions::new().label_ordinals());
    assert!(!options.single_row && !options.header_only);
    Ok(())
}

#[test]
fn rows_serialize_as_plain_values() -> Result<()> {
    let row = Row::new(vec![Value::Int(3), Value::Float(0.5), Value::from("a.mrc")]);
    let json = serde_json::to_string(&row)?;
    assert_eq!(json, r#"{"values":[3,0.5,"a.mrc"]}"#);
    let back: Row = serde_json::from_str(&json)?;
    assert_eq!(back, row);
    Ok(())
}
