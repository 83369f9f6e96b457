//! credits.csv on disk → actors file → graph.

use std::fs;

use bacon_core::QueryResult;
use bacon_graph::actors::load_graph;
use bacon_parse::{convert_file, ParseError};
use bacon_pathfind::DegreeService;

const CREDITS: &str = r#"cast,crew,id
"[{'cast_id': 14, 'character': 'Woody (voice)', 'credit_id': '52fe4284c3a36847f8024f95', 'gender': 2, 'id': 31, 'name': 'Tom Hanks', 'order': 0, 'profile_path': '/pQFoyx7rp09CJTAb932F2g8Nlho.jpg'}, {'cast_id': 15, 'character': 'Buzz Lightyear (voice)', 'credit_id': '52fe4284c3a36847f8024f99', 'gender': 2, 'id': 12898, 'name': 'Tim Allen', 'order': 1, 'profile_path': None}]","[]",862
"[{'cast_id': 1, 'character': 'Alan Parrish', 'credit_id': '52fe44bfc3a36847f80a7c73', 'gender': 2, 'id': 2157, 'name': 'Robin Williams', 'order': 0, 'profile_path': None}, {'cast_id': 2, 'character': 'Sam', 'credit_id': '52fe44bfc3a36847f80a7c7d', 'gender': 2, 'id': 8537, 'name': 'Tim Allen', 'order': 1, 'profile_path': None}]","[]",8844
[],[],31357
"#;

#[test]
fn test_credits_to_queryable_graph() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("credits.csv");
    let out_path = dir.path().join("preprocessed").join("actors.jsonl");
    fs::write(&csv_path, CREDITS).unwrap();

    let stats = convert_file(&csv_path, &out_path).unwrap();
    assert_eq!(stats.rows, 3);
    assert_eq!(stats.credits, 4);

    let lines = fs::read_to_string(&out_path).unwrap();
    assert_eq!(
        lines,
        "[\"Tom Hanks\",\"Tim Allen\"]\n[\"Robin Williams\",\"Tim Allen\"]\n[]\n"
    );

    let service = DegreeService::new(load_graph(&out_path).unwrap());
    assert_eq!(
        service.query("Tom Hanks", "Robin Williams"),
        QueryResult::Degree(2)
    );
}

#[test]
fn test_missing_csv_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(&dir.path().join("nope.csv"), &dir.path().join("out.jsonl")).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}
