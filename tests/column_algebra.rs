use anyhow::Result;
use emtable::testing::*;
use emtable::{Column, ColumnType, ReadOptions, Row, SortKey, StarError, Table, Value};
use std::io::Cursor;

fn particles() -> Result<Table> {
    Ok(Table::from_reader(
        Cursor::new(PARTICLES_3D_CLASSIFY),
        None,
        &ReadOptions::new(),
    )?)
}

fn assert_rows_match_columns(t: &Table) {
    for row in t {
        assert_eq!(row.len(), t.columns().len());
    }
}

#[test]
fn derived_columns_chain_and_constants() -> Result<()> {
    let mut t = Table::new([Column::int("colA")])?;
    for v in [3, 1, 2] {
        t.add_row([Value::from(v)])?;
    }

    t.add_columns(&["colB=colA", "colC=colB", "const=1000", "label=abc", "scale=0.5"])?;
    assert_eq!(
        t.column_names(),
        vec!["colA", "colB", "colC", "const", "label", "scale"]
    );
    let ty = |name: &str| t.columns().get(name).map(|c| c.column_type());
    assert_eq!(ty("colC"), Some(ColumnType::Integer));
    assert_eq!(ty("const"), Some(ColumnType::Integer));
    assert_eq!(ty("label"), Some(ColumnType::Text));
    assert_eq!(ty("scale"), Some(ColumnType::Float));

    for row in &t {
        assert_eq!(row[1], row[0]);
        assert_eq!(row[2], row[0]);
        assert_eq!(row[3], Value::Int(1000));
        assert_eq!(row[4], Value::from("abc"));
        assert_eq!(row[5], Value::Float(0.5));
    }
    assert_rows_match_columns(&t);
    Ok(())
}

#[test]
fn derived_column_on_real_block() -> Result<()> {
    let mut t = particles()?;
    t.add_columns(&["rlnImageIdCopy=rlnImageId", "rlnRandomSubset=1"])?;
    assert_eq!(t.columns().len(), 27);
    for row in &t {
        let cols = t.columns();
        assert_eq!(cols.value_of(row, "rlnImageIdCopy"), cols.value_of(row, "rlnImageId"));
        assert_eq!(cols.value_of(row, "rlnRandomSubset"), Some(&Value::Int(1)));
    }
    assert_rows_match_columns(&t);
    Ok(())
}

#[test]
fn add_columns_failures_leave_table_untouched() -> Result<()> {
    let mut t = particles()?;
    let before = t.column_names().len();

    let err = t.add_columns(&["rlnNew=1", "rlnImageId=2"]).unwrap_err();
    assert!(matches!(err, StarError::ColumnConflict(ref msg) if msg.contains("rlnImageId")));

    let err = t.add_columns(&["no equals sign"]).unwrap_err();
    assert!(matches!(err, StarError::InvalidColumnSpec(_)));

    let err = t.add_columns(&["a=1", "a=2"]).unwrap_err();
    assert!(matches!(err, StarError::ColumnConflict(_)));

    assert_eq!(t.column_names().len(), before);
    assert!(!t.has_column("rlnNew"));
    assert_rows_match_columns(&t);
    Ok(())
}

#[test]
fn remove_columns_permissive_and_strict() -> Result<()> {
    let mut t = particles()?;
    assert!(t.has_all_columns(&["rlnAngleRot", "rlnAngleTilt", "rlnAnglePsi"]));
    assert!(t.has_any_column(&["nope", "rlnAnglePsi"]));
    assert!(!t.has_any_column(&["nope", "neither"]));

    t.remove_columns(&["rlnAngleRot", "rlnAngleTilt", "rlnAnglePsi", "nope"])?;
    assert_eq!(t.columns().len(), 22);
    assert!(!t.has_any_column(&["rlnAngleRot", "rlnAngleTilt", "rlnAnglePsi"]));
    assert_eq!(t.column_names()[15], "rlnOriginX");
    assert_rows_match_columns(&t);
    assert_eq!(t.value(0, "rlnOriginX"), Some(&Value::Float(1.791925)));

    let err = t.remove_columns_strict(&["rlnOriginX", "rlnAngleRot"]).unwrap_err();
    assert!(matches!(err, StarError::MissingColumn(ref name) if name == "rlnAngleRot"));
    assert!(t.has_column("rlnOriginX"));

    t.remove_columns_strict(&["rlnOriginX"])?;
    assert_eq!(t.columns().len(), 21);
    assert_rows_match_columns(&t);
    Ok(())
}

#[test]
fn sort_is_stable_and_reversible() -> Result<()> {
    let mut t = particles()?;

    t.sort("rlnClassNumber")?;
    let pairs: Vec<(i64, i64)> = t
        .iter()
        .map(|row| {
            let cols = t.columns();
            (
                cols.value_of(row, "rlnClassNumber").and_then(Value::as_i64).unwrap_or(-1),
                cols.value_of(row, "rlnImageId").and_then(Value::as_i64).unwrap_or(-1),
            )
        })
        .collect();
    let mut expected = pairs.clone();
    expected.sort();
    // stable: equal classes keep ascending image ids from the file
    assert_eq!(pairs, expected);

    t.sort(SortKey::column("rlnImageId").reversed())?;
    let ids: Vec<i64> = t
        .column_values("rlnImageId")?
        .into_iter()
        .filter_map(Value::as_i64)
        .collect();
    assert_eq!(ids, (1..=16).rev().collect::<Vec<_>>());
    Ok(())
}

#[test]
fn sort_with_custom_comparator() -> Result<()> {
    let mut t = particles()?;
    // order by coordinate distance from the origin
    let x = t.columns().index_of("rlnCoordinateX").unwrap();
    let y = t.columns().index_of("rlnCoordinateY").unwrap();
    let dist = move |r: &Row| {
        let (x, y) = (r[x].as_f64().unwrap(), r[y].as_f64().unwrap());
        x * x + y * y
    };
    t.sort(SortKey::by(move |a, b| dist(a).total_cmp(&dist(b))))?;

    let dist: Vec<f64> = t.iter().map(dist).collect();
    assert!(dist.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(t.size(), 16);
    Ok(())
}

#[test]
fn sort_by_unknown_column_fails() -> Result<()> {
    let mut t = particles()?;
    let err = t.sort("rlnNope").unwrap_err();
    assert!(matches!(err, StarError::MissingColumn(_)));
    Ok(())
}

#[test]
fn column_algebra_needs_resident_rows() -> Result<()> {
    let mut t = Table::from_reader(
        Cursor::new(PARTICLES_3D_CLASSIFY),
        None,
        &ReadOptions::new().header_only(),
    )?;
    assert!(t.is_streaming());

    assert!(matches!(t.sort("rlnImageId"), Err(StarError::InvalidState(_))));
    assert!(matches!(t.add_columns(&["x=1"]), Err(StarError::InvalidState(_))));
    assert!(matches!(
        t.remove_columns(&["rlnImageId"]),
        Err(StarError::InvalidState(_))
    ));

    t.materialize()?;
    t.sort("rlnImageId")?;
    assert_eq!(t.size(), 16);
    Ok(())
}

#[test]
fn add_row_coerces_and_checks() -> Result<()> {
    let mut t = Table::new([Column::float("f"), Column::text("s")])?;
    t.add_row([Value::from(2), Value::from(7)])?;
    assert_eq!(t[0][0], Value::Float(2.0));
    assert_eq!(t[0][1], Value::from("7"));

    let err = t.add_row([Value::from(1.0)]).unwrap_err();
    assert!(matches!(err, StarError::FieldCountMismatch { expected: 2, actual: 1, .. }));

    let mut ints = Table::new([Column::int("n")])?;
    let err = ints.add_row([Value::from(1.5)]).unwrap_err();
    assert!(matches!(err, StarError::TypeMismatch { expected: ColumnType::Integer, .. }));

    let err = Table::new([Column::int("n"), Column::text("n")]).unwrap_err();
    assert!(matches!(err, StarError::ColumnConflict(_)));
    Ok(())
}

#[test]
fn strict_add_columns_rejects_unknown_sources() -> Result<()> {
    let mut t = Table::new([Column::int("colA")])?;
    t.add_row([Value::from(5)])?;

    let err = t.add_columns_strict(&["colB=colAA"]).unwrap_err();
    assert!(matches!(err, StarError::MissingColumn(ref name) if name == "colAA"));
    assert!(!t.has_column("colB"));

    // the permissive form keeps the text as a constant
    let mut lenient = Table::new([Column::int("colA")])?;
    lenient.add_row([Value::from(5)])?;
    lenient.add_columns(&["colB=colAA"])?;
    assert_eq!(lenient.value(0, "colB"), Some(&Value::from("colAA")));

    t.add_columns_strict(&["colB=colA", "colC=colB", "k=7", "w=0.25"])?;
    assert_eq!(t.value(0, "colC"), Some(&Value::Int(5)));
    assert_eq!(t.value(0, "k"), Some(&Value::Int(7)));
    assert_eq!(t.value(0, "w"), Some(&Value::Float(0.25)));
    assert_rows_match_columns(&t);
    Ok(())
}

#[test]
fn chain_through_an_inferred_constant() -> Result<()> {
    let mut t = Table::new([Column::text("name")])?;
    t.add_row([Value::from("a.mrc")])?;
    t.add_row([Value::from("b.mrc")])?;

    t.add_columns(&["k=7", "m=k", "f=1.5", "g=f", "s=abc", "u=s"])?;
    let ty = |name: &str| t.columns().get(name).map(|c| c.column_type());
    assert_eq!(ty("m"), Some(ColumnType::Integer));
    assert_eq!(ty("g"), Some(ColumnType::Float));
    assert_eq!(ty("u"), Some(ColumnType::Text));
    for row in &t {
        let cols = t.columns();
        assert_eq!(cols.value_of(row, "m"), Some(&Value::Int(7)));
        assert_eq!(cols.value_of(row, "g"), Some(&Value::Float(1.5)));
        assert_eq!(cols.value_of(row, "u"), Some(&Value::from("abc")));
    }
    assert_rows_match_columns(&t);
    Ok(())
}

#[test]
fn sort_key_across_value_kinds() -> Result<()> {
    // each row names which column holds its key, so keys mix integers,
    // floats and text
    let mut t = Table::new([
        Column::int("kind"),
        Column::int("n"),
        Column::float("x"),
        Column::text("s"),
    ])?;
    let rows = [
        (2, 0, 0.0, "b"),
        (0, 10, 0.0, "z"),
        (1, 0, 2.5, "z"),
        (2, 0, 0.0, "a"),
        (0, 2, 0.0, "z"),
        (1, 0, 2.0, "z"),
    ];
    for (kind, n, x, s) in rows {
        t.add_row([Value::from(kind), Value::from(n), Value::from(x), Value::from(s)])?;
    }
    let key = |r: &Row| -> Value { r[1 + r[0].as_i64().unwrap() as usize].clone() };

    t.sort(SortKey::by(move |a, b| key(a).total_cmp(&key(b))))?;
    let keys: Vec<Value> = t.iter().map(key).collect();
    assert_eq!(
        keys,
        vec![
            Value::Int(2),
            Value::Float(2.0),
            Value::Float(2.5),
            Value::Int(10),
            Value::from("a"),
            Value::from("b"),
        ]
    );

    t.sort(SortKey::by(move |a, b| key(a).total_cmp(&key(b))).reversed())?;
    assert_eq!(t.iter().map(key).next(), Some(Value::from("b")));
    Ok(())
}
