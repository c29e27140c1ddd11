use plotgrid::{AxisId, Figure, Layout, ScatterMode, Trace, merge_layouts, strip_figures};
use serde_json::json;

fn figure_with(settings: &[(&str, serde_json::Value)]) -> Figure {
    let mut layout = Layout::new();
    for (k, v) in settings {
        layout.set(*k, v.clone());
    }
    Figure::new(Vec::new(), layout)
}

#[test]
fn merge_takes_union_of_disjoint_keys() {
    let a = figure_with(&[("paper_bgcolor", json!("#fff"))]);
    let b = figure_with(&[("showlegend", json!(false))]);
    let merged = merge_layouts(&[a, b]);
    assert_eq!(merged.get("paper_bgcolor"), Some(&json!("#fff")));
    assert_eq!(merged.get("showlegend"), Some(&json!(false)));
}

#[test]
fn merge_is_last_write_wins_in_input_order() {
    let a = figure_with(&[("bargap", json!(0.1)), ("showlegend", json!(true))]);
    let b = figure_with(&[("bargap", json!(0.5))]);
    let merged = merge_layouts(&[a.clone(), b.clone()]);
    assert_eq!(merged.get("bargap"), Some(&json!(0.5)));
    assert_eq!(merged.get("showlegend"), Some(&json!(true)));

    // reversed order flips the winner
    let merged = merge_layouts(&[b, a]);
    assert_eq!(merged.get("bargap"), Some(&json!(0.1)));
}

#[test]
fn merge_replaces_axis_entries_wholesale() {
    let mut a = Figure::default();
    a.layout.axis_mut(AxisId::x(1)).set("showgrid", true);
    a.layout.axis_mut(AxisId::x(1)).set("gridcolor", "#aaa");
    let mut b = Figure::default();
    b.layout.axis_mut(AxisId::x(1)).set("zeroline", false);

    let merged = merge_layouts(&[a, b]);
    let x = merged.axis(AxisId::x(1)).unwrap();
    assert_eq!(x.get("zeroline"), Some(&json!(false)));
    assert_eq!(x.get("showgrid"), None);
    assert_eq!(x.get("gridcolor"), None);
}

#[test]
fn merge_of_empty_list_is_empty() {
    assert!(merge_layouts(&[]).is_empty());
}

#[test]
fn strip_produces_one_figure_per_trace_sharing_the_layout() {
    let mut layout = Layout::new();
    layout.set("title", "prices");
    layout.axis_mut(AxisId::y(1)).set("showgrid", false);
    let fig = Figure::new(
        vec![
            Trace::scatter(vec![1.0], vec![2.0], ScatterMode::Lines).named("a"),
            Trace::scatter(vec![3.0], vec![4.0], ScatterMode::Markers).named("b"),
            Trace::bar(vec![5.0], vec![6.0]).named("c"),
        ],
        layout,
    );

    let stripped = strip_figures(&fig);
    assert_eq!(stripped.len(), 3);
    for (i, single) in stripped.iter().enumerate() {
        assert_eq!(single.data.len(), 1);
        assert_eq!(single.data[0], fig.data[i]);
        assert_eq!(single.layout, fig.layout);
    }
    assert_eq!(stripped[0].data[0].name.as_deref(), Some("a"));
    assert_eq!(stripped[2].data[0].name.as_deref(), Some("c"));
}
