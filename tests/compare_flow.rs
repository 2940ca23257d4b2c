use paper_diff::backend::{CompareBackend, DiffProvider, LineDiffProvider};
use paper_diff::config::Settings;
use paper_diff::render::{DiffOpKind, LineBody, SpanStyle, SummaryMode, parse_ops, render};
use std::time::Duration;

#[test]
fn json_from_collaborator_renders_side_by_side() {
    let json = r#"[
        {"kind": "equal", "content": "fn main() {"},
        {"kind": "replace", "leftContent": "    let cat = 1;", "rightContent": "    let cot = 1;",
         "charDiff": [
            {"kind": "equal", "content": "    let c"},
            {"kind": "delete", "content": "a"},
            {"kind": "insert", "content": "o"},
            {"kind": "equal", "content": "t = 1;"}
         ]},
        {"kind": "delete", "content": "    dbg!(cat);"},
        {"kind": "equal", "content": "}"}
    ]"#;
    let ops = parse_ops(json).unwrap();
    let rendered = render(&ops);

    assert_eq!(rendered.len(), 4);
    let numbers: Vec<_> = rendered
        .rows()
        .map(|(l, r)| (l.line_number.map(|n| n.get()), r.line_number.map(|n| n.get())))
        .collect();
    assert_eq!(
        numbers,
        vec![(Some(1), Some(1)), (Some(2), Some(2)), (Some(3), None), (Some(4), Some(3))]
    );

    let LineBody::Spans(spans) = &rendered.left[1].body else {
        panic!("modified line should be highlighted");
    };
    assert_eq!(spans[1].style, SpanStyle::Removed);
    assert_eq!(rendered.right[2].row_class, DiffOpKind::Delete);
    assert_eq!(
        rendered.stats.summary(SummaryMode::Merged),
        "2 unchanged, -2, +1"
    );
}

#[test]
fn documents_compare_in_background_and_swap() {
    let settings = Settings {
        live_compare: true,
        ..Settings::default()
    };
    let mut backend = CompareBackend::with_settings(settings);
    backend.set_left("title\nfirst draft\nending\n");
    backend.set_right("title\nsecond draft\nending\nepilogue\n");
    assert!(backend.wait(Duration::from_secs(5)));

    let forward = backend.rendered().unwrap().stats;
    assert_eq!(forward.equal_count, 2);
    assert_eq!(forward.replace_count, 1);
    assert_eq!(forward.insert_count, 1);

    backend.swap();
    assert!(backend.wait(Duration::from_secs(5)));
    let backward = backend.rendered().unwrap().stats;
    assert_eq!(backward.equal_count, forward.equal_count);
    assert_eq!(backward.delete_count, forward.insert_count);
    assert_eq!(backward.insert_count, forward.delete_count);
}

#[test]
fn provider_output_reconstructs_modified_lines() {
    let old = "我爱你\nhello cat\nplain\n";
    let new = "我不爱你\nhello dog\nplain\n";
    let ops = LineDiffProvider::default().compute(old, new).unwrap();
    let rendered = render(&ops);

    let left: Vec<String> = rendered.left.iter().map(|l| l.body.text()).collect();
    let right: Vec<String> = rendered.right.iter().map(|l| l.body.text()).collect();
    assert_eq!(left, vec!["我爱你", "hello cat", "plain"]);
    assert_eq!(right, vec!["我不爱你", "hello dog", "plain"]);

    let chars = rendered.char_stats();
    assert_eq!(chars.added_chars, 4);
    assert_eq!(chars.removed_chars, 3);
}
