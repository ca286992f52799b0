//! Snapshot tests for serialized records and list markers.
//!
//! These pin the keyed record shapes other producers rely on.

use insta::{assert_json_snapshot, assert_snapshot};
use markup_storage::{
    CssDeclaration, ElementShape, ListStyle, MarkupProvenance, SourceAttribute, SourceValue,
    TextAttachment, UnsupportedMarkup, marker_text,
};

#[test]
fn snapshot_inline_provenance() {
    let css = CssDeclaration::new("font-weight", "bold").unwrap();
    let provenance = MarkupProvenance::InlineStyle(css);
    assert_json_snapshot!(provenance, @r###"
    {
      "inline": "font-weight: bold"
    }
    "###);
}

#[test]
fn snapshot_element_provenance() {
    let shape = ElementShape::new(
        "ol",
        vec![
            SourceAttribute::string("start", "3"),
            SourceAttribute::new("reversed", SourceValue::None),
        ],
    );
    assert_json_snapshot!(MarkupProvenance::Element(shape), @r###"
    {
      "element": {
        "name": "ol",
        "attributes": [
          {
            "name": "start",
            "value": {
              "string": "3"
            }
          },
          {
            "name": "reversed",
            "value": "none"
          }
        ]
      }
    }
    "###);
}

#[test]
fn snapshot_unsupported_capsule() {
    let capsule = UnsupportedMarkup::new(vec![ElementShape::new("custom-tag", Vec::new())]);
    assert_json_snapshot!(capsule, @r###"
    {
      "representations": [
        {
          "name": "custom-tag",
          "attributes": []
        }
      ]
    }
    "###);
}

#[test]
fn snapshot_line_attachment() {
    assert_json_snapshot!(TextAttachment::line(), @r###"
    {
      "kind": "line"
    }
    "###);
}

#[test]
fn snapshot_ordered_markers_by_depth() {
    let table: Vec<String> = [1, 2, 4, 9, 27]
        .into_iter()
        .map(|n| {
            (1..=3)
                .map(|depth| marker_text(ListStyle::Ordered, n, Some(depth)).unwrap())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    assert_snapshot!(table.join("\n"), @r###"
    1. a. i.
    2. b. ii.
    4. d. iv.
    9. i. ix.
    27. aa. xxvii.
    "###);
}
