use anyhow::Result;
use emtable::testing::*;
use emtable::{ReadOptions, RowIter, SortKey, StarError, Table, Value, iter_rows};
use std::io::Cursor;

#[test]
fn iter_rows_matches_materialized_block() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = write_fixture(tmp.path(), "mic.star", ONE_MICROGRAPH_MC)?;

    let table = Table::from_file(&path, Some("local_motion_model"))?;
    let streamed = iter_rows(&path, Some("local_motion_model"), None)?
        .collect::<emtable::Result<Vec<_>>>()?;

    assert_eq!(streamed.len(), 36);
    assert_eq!(streamed.as_slice(), table.rows());
    Ok(())
}

#[test]
fn sorted_iteration_is_stable() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = write_fixture(tmp.path(), "particles.star", PARTICLES_3D_CLASSIFY)?;

    let iter = iter_rows(&path, Some("Particles"), Some(SortKey::column("rlnClassNumber")))?;
    let class = iter.columns().index_of("rlnClassNumber").unwrap();
    let id = iter.columns().index_of("rlnImageId").unwrap();

    let pairs: Vec<(i64, i64)> = iter
        .map(|row| {
            let row = row.unwrap();
            (row[class].as_i64().unwrap(), row[id].as_i64().unwrap())
        })
        .collect();
    let mut expected = pairs.clone();
    expected.sort();
    assert_eq!(pairs, expected);
    assert_eq!(pairs.len(), 16);
    Ok(())
}

#[test]
fn reversed_sorted_iteration() -> Result<()> {
    let iter = RowIter::new(Cursor::new(ONE_MICROGRAPH_MC), Some("global_shift"), &ReadOptions::new())?
        .sorted(&SortKey::column("rlnMicrographFrameNumber").reversed())?;
    let frames: Vec<i64> = iter
        .map(|row| row.unwrap()[0].as_i64().unwrap())
        .collect();
    assert_eq!(frames, (1..=19).rev().collect::<Vec<_>>());
    Ok(())
}

#[test]
fn streaming_table_is_single_pass() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = write_fixture(tmp.path(), "particles.star", PARTICLES_3D_CLASSIFY)?;

    let mut t = Table::open(&path, None, &ReadOptions::new().header_only())?;
    assert!(t.is_streaming());
    assert_eq!(t.size(), 0);
    assert_eq!(t.columns().len(), 25);

    let ids: Vec<i64> = t
        .stream()?
        .map(|row| row.map(|r| r[5].as_i64().unwrap_or(-1)))
        .collect::<emtable::Result<_>>()?;
    assert_eq!(ids, (1..=16).collect::<Vec<_>>());

    assert!(matches!(t.stream(), Err(StarError::InvalidState(_))));
    assert!(matches!(t.materialize(), Err(StarError::InvalidState(_))));
    Ok(())
}

#[test]
fn streaming_table_materializes() -> Result<()> {
    let mut t = Table::from_reader(
        Cursor::new(ONE_MICROGRAPH_MC),
        Some("global_shift"),
        &ReadOptions::new().header_only(),
    )?;
    let reference = Table::from_reader(
        Cursor::new(ONE_MICROGRAPH_MC),
        Some("global_shift"),
        &ReadOptions::new(),
    )?;
    assert_ne!(t, reference);

    t.materialize()?;
    assert!(!t.is_streaming());
    assert_eq!(t.size(), 19);
    assert_eq!(t, reference);

    // materialized tables hand out no stream
    assert!(matches!(t.stream(), Err(StarError::InvalidState(_))));
    Ok(())
}

#[test]
fn streaming_table_writes_only_its_header() -> Result<()> {
    let t = Table::from_reader(
        Cursor::new(PARTICLES_3D_CLASSIFY),
        None,
        &ReadOptions::new().header_only(),
    )?;
    let mut out = Vec::new();
    let err = t
        .write_star(&mut out, Some("p"), &Default::default())
        .unwrap_err();
    assert!(matches!(err, StarError::InvalidState(_)));

    let mut out = Vec::new();
    t.write_star(&mut out, Some("p"), &emtable::WriteOptions::new().header_only())?;
    let text = String::from_utf8(out)?;
    assert!(text.starts_with("\ndata_p\n\nloop_\n_rlnEnabled \n"));
    assert!(text.ends_with("_rlnNrOfSignificantSamples \n"));
    Ok(())
}

#[test]
fn error_is_reported_once_then_iteration_ends() -> Result<()> {
    let text = "data_t\nloop_\n_a\n_b\n1 2\n3 4\n5\n7 8\n";
    let mut iter = RowIter::new(Cursor::new(text), Some("t"), &ReadOptions::new())?;

    assert_eq!(iter.next().transpose()?.map(|r| r[0].clone()), Some(Value::Int(1)));
    assert_eq!(iter.next().transpose()?.map(|r| r[0].clone()), Some(Value::Int(3)));
    assert!(matches!(
        iter.next(),
        Some(Err(StarError::FieldCountMismatch { line: 7, .. }))
    ));
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
    Ok(())
}

#[test]
fn scanner_continues_after_streamed_block() -> Result<()> {
    let mut iter =
        RowIter::new(Cursor::new(ONE_MICROGRAPH_MC), Some("global_shift"), &ReadOptions::new())?;
    let rows = iter.by_ref().collect::<emtable::Result<Vec<_>>>()?;
    assert_eq!(rows.len(), 19);

    let mut source = iter.into_scanner();
    let mut t = Table::default();
    t.read_star(&mut source, Some("local_motion_model"))?;
    assert_eq!(t.size(), 36);
    Ok(())
}

#[test]
fn missing_file_is_an_open_error() {
    let err = iter_rows("/nonexistent/emtable/run_data.star", None, None).err();
    assert!(matches!(err, Some(StarError::Open { .. })));
}

#[test]
fn sorted_iteration_orders_by_column_type() -> Result<()> {
    let text = "data_t\nloop_\n_x\n_id\n2.5 9\n10 10\n3 2.5\n-1 1e3\n";
    let options = ReadOptions::new().with_type("id", emtable::ColumnType::Text);

    // inferred float column: numeric order even for integral fields
    let iter = RowIter::new(Cursor::new(text), Some("t"), &options)?.sorted(&SortKey::column("x"))?;
    let xs: Vec<f64> = iter.map(|r| r.unwrap()[0].as_f64().unwrap()).collect();
    assert_eq!(xs, vec![-1.0, 2.5, 3.0, 10.0]);

    // declared text column: lexicographic order
    let iter = RowIter::new(Cursor::new(text), Some("t"), &options)?
        .sorted(&SortKey::column("id"))?;
    let ids: Vec<String> = iter
        .map(|r| r.unwrap()[1].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["10", "1e3", "2.5", "9"]);
    Ok(())
}
