//! End-to-end pipeline tests: bytes in, styled and laid-out DOM out.

use dom::{DomTree, NodeId};
use html::{ParseError, Parser, parse};

fn find_by_id(tree: &DomTree, id: NodeId, target: &str) -> Option<NodeId> {
    if let Some(attributes) = tree.attributes(id) {
        if attributes
            .iter()
            .any(|a| a.name == "id" && a.value == target)
        {
            return Some(id);
        }
    }
    for &child in tree.children(id) {
        if let Some(found) = find_by_id(tree, child, target) {
            return Some(found);
        }
    }
    None
}

const PAGE: &str = "<html>\
<head>\
<style>\
  #container { width: 500px; height: 300px; display: flex; }\
  #container #fixed { width: 200px; height: 100px; }\
  #container .flexible { flex: 1; }\
</style>\
</head>\
<body>\
<div id=\"container\">\
<div id=\"fixed\"></div>\
<div id=\"grow\" class=\"flexible\"></div>\
</div>\
</body>\
</html>";

#[test]
fn full_document_gets_styled_and_laid_out() {
    let tree = parse(PAGE).unwrap();
    let root = tree.root();

    let container = find_by_id(&tree, root, "container").unwrap();
    let fixed = find_by_id(&tree, root, "fixed").unwrap();
    let grow = find_by_id(&tree, root, "grow").unwrap();

    let container_style = tree.resolved_style(container).unwrap();
    assert_eq!(container_style.length("width"), Some(500.0));
    assert_eq!(container_style.length("height"), Some(300.0));

    let fixed_rect = layout::absolute_rect(&tree, fixed).unwrap();
    assert_eq!(fixed_rect.x, 0.0);
    assert_eq!(fixed_rect.y, 0.0);
    assert_eq!(fixed_rect.width, 200.0);
    assert_eq!(fixed_rect.height, 100.0);

    // The flex item takes the remaining 300px and stretches to full height.
    let grow_rect = layout::absolute_rect(&tree, grow).unwrap();
    assert_eq!(grow_rect.x, 200.0);
    assert_eq!(grow_rect.width, 300.0);
    assert_eq!(grow_rect.height, 300.0);
}

#[test]
fn byte_streaming_matches_whole_input_parsing() {
    let whole = parse(PAGE).unwrap();

    for chunk_size in [1, 3, 7, 64] {
        let mut parser = Parser::new();
        for chunk in PAGE.as_bytes().chunks(chunk_size) {
            parser.push_bytes(chunk).unwrap();
        }
        let streamed = parser.finish().unwrap();
        assert_eq!(
            dom::outline(&whole),
            dom::outline(&streamed),
            "chunk size {chunk_size}"
        );
    }
}

#[test]
fn descendant_selectors_match_through_intermediate_elements() {
    let tree = parse(
        "<html>\
         <style>html .deep { color: purple; }</style>\
         <body><section><div class=\"deep\" id=\"x\"></div></section></body>\
         </html>",
    )
    .unwrap();
    let element = find_by_id(&tree, tree.root(), "x").unwrap();
    assert_eq!(
        tree.computed_style(element).unwrap().get("color"),
        Some("purple")
    );
}

#[test]
fn higher_specificity_beats_source_order_end_to_end() {
    let tree = parse(
        "<html>\
         <style>#a { color: green; } div { color: red; }</style>\
         <body><div id=\"a\"></div></body>\
         </html>",
    )
    .unwrap();
    let element = find_by_id(&tree, tree.root(), "a").unwrap();
    assert_eq!(
        tree.computed_style(element).unwrap().get("color"),
        Some("green")
    );
}

#[test]
fn structural_mismatch_reports_both_names() {
    let err = parse("<div><span></div>").unwrap_err();
    assert_eq!(
        err,
        ParseError::StructuralMismatch {
            expected: "span".to_string(),
            found: "div".to_string(),
        }
    );
    assert_eq!(err.to_string(), "end tag </div> does not close <span>");
}

#[test]
fn unclosed_document_reports_open_count() {
    let err = parse("<a><b><c>").unwrap_err();
    assert_eq!(err, ParseError::MalformedDocument { open: 3 });
}

#[test]
fn tokenizer_position_is_preserved_through_the_session() {
    let err = parse("<p></ x").unwrap_err();
    let ParseError::Tokenizer(inner) = err else {
        panic!("expected a tokenizer error");
    };
    assert_eq!(inner.position, 5);
}

#[test]
fn empty_input_yields_a_bare_document() {
    let tree = parse("").unwrap();
    assert!(tree.children(tree.root()).is_empty());
}
