use plotgrid::{
    AxisId, CellSpec, Error, Figure, GridOptions, GridShape, Inset, Layout, ScatterMode,
    ThemeRegistry, Trace, assemble, assemble_shaped, assemble_with,
};
use serde_json::json;

fn figure_with_traces(n: usize) -> Figure {
    let data = (0..n)
        .map(|i| {
            Trace::scatter(
                vec![0.0, 1.0],
                vec![i as f64, i as f64 + 1.0],
                ScatterMode::Lines,
            )
        })
        .collect();
    Figure::new(data, Layout::default())
}

#[test]
fn two_figures_do_not_fit_one_cell() {
    let figs = [figure_with_traces(1), figure_with_traces(1)];
    let err = assemble_shaped(&figs, GridShape::new(1, 1)).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidShape {
            rows: 1,
            cols: 1,
            figures: 2
        }
    ));
}

#[test]
fn traces_keep_input_order_and_cell_bindings() {
    let figs = [
        figure_with_traces(2),
        figure_with_traces(1),
        figure_with_traces(3),
    ];
    let combined = assemble(&figs).unwrap();
    assert_eq!(combined.data.len(), 6);

    let expected = [
        (AxisId::x(1), AxisId::y(1)),
        (AxisId::x(1), AxisId::y(1)),
        (AxisId::x(2), AxisId::y(2)),
        (AxisId::x(3), AxisId::y(3)),
        (AxisId::x(3), AxisId::y(3)),
        (AxisId::x(3), AxisId::y(3)),
    ];
    for (trace, (x, y)) in combined.data.iter().zip(expected) {
        assert_eq!(trace.xaxis, Some(x));
        assert_eq!(trace.yaxis, Some(y));
        assert_eq!(trace.scene, None);
    }
}

#[test]
fn unused_grid_axes_are_pruned() {
    // three figures in a 2x2 grid leave the fourth cell unused
    let figs = [
        figure_with_traces(1),
        figure_with_traces(1),
        figure_with_traces(1),
    ];
    let combined = assemble(&figs).unwrap();
    for i in 1..=3 {
        assert!(combined.layout.axis(AxisId::x(i)).is_some());
        assert!(combined.layout.axis(AxisId::y(i)).is_some());
    }
    assert!(combined.layout.axis(AxisId::x(4)).is_none());
    assert!(combined.layout.axis(AxisId::y(4)).is_none());
    // flat settings from the theme survive the prune
    assert_eq!(
        combined.layout.get("paper_bgcolor"),
        Some(&json!("#F5F6F9"))
    );
}

#[test]
fn blank_cells_are_skipped_by_the_walk() {
    let opts = GridOptions {
        shape: Some(GridShape::new(1, 3)),
        specs: Some(vec![vec![
            Some(CellSpec::default()),
            None,
            Some(CellSpec::default()),
        ]]),
        ..GridOptions::default()
    };
    let figs = [figure_with_traces(1), figure_with_traces(1)];
    let combined = assemble_with(&figs, &opts, &ThemeRegistry::default()).unwrap();
    assert_eq!(combined.data[0].xaxis, Some(AxisId::x(1)));
    // second figure lands past the blank, on the third column's slot
    assert_eq!(combined.data[1].xaxis, Some(AxisId::x(2)));
    let x2 = combined.layout.axis(AxisId::x(2)).unwrap().domain.unwrap();
    assert!(x2[0] > 0.6);
}

#[test]
fn more_figures_than_eligible_cells_exhausts_the_grid() {
    let opts = GridOptions {
        shape: Some(GridShape::new(1, 2)),
        specs: Some(vec![vec![Some(CellSpec::default()), None]]),
        ..GridOptions::default()
    };
    let figs = [figure_with_traces(1), figure_with_traces(1)];
    let err = assemble_with(&figs, &opts, &ThemeRegistry::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::GridExhausted {
            cells: 1,
            figures: 2
        }
    ));
}

#[test]
fn inset_axes_survive_the_prune() {
    let opts = GridOptions {
        shape: Some(GridShape::new(1, 2)),
        insets: vec![Inset {
            cell: (1, 1),
            l: 0.6,
            b: 0.6,
            ..Inset::default()
        }],
        ..GridOptions::default()
    };
    let figs = [figure_with_traces(1)];
    let combined = assemble_with(&figs, &opts, &ThemeRegistry::default()).unwrap();
    // the empty second cell is pruned...
    assert!(combined.layout.axis(AxisId::x(2)).is_none());
    assert!(combined.layout.axis(AxisId::y(2)).is_none());
    // ...but the inset pair, numbered after the grid, stays
    assert!(combined.layout.axis(AxisId::x(3)).is_some());
    assert!(combined.layout.axis(AxisId::y(3)).is_some());
}

#[test]
fn shared_x_binds_one_axis_per_column() {
    let opts = GridOptions {
        shared_x: true,
        ..GridOptions::default()
    };
    let figs = [
        figure_with_traces(1),
        figure_with_traces(1),
        figure_with_traces(1),
        figure_with_traces(1),
    ];
    let combined = assemble_with(&figs, &opts, &ThemeRegistry::default()).unwrap();
    // second row reuses the column's x axis with a fresh y
    assert_eq!(combined.data[2].xaxis, Some(AxisId::x(1)));
    assert_eq!(combined.data[2].yaxis, Some(AxisId::y(3)));
    assert_eq!(combined.data[3].xaxis, Some(AxisId::x(2)));
    assert_eq!(combined.data[3].yaxis, Some(AxisId::y(4)));
}

#[test]
fn empty_figure_list_yields_an_empty_combined_figure() {
    let combined = assemble(&[]).unwrap();
    assert!(combined.data.is_empty());
    // the lone planned cell is unused, so no axis entries remain
    assert!(combined.layout.axes.is_empty());
    assert!(combined.layout.get("paper_bgcolor").is_some());
}

#[test]
fn base_layout_settings_overwrite_the_skeleton() {
    let mut base = Layout::new();
    base.set("showlegend", false);
    base.set("paper_bgcolor", "#010203");
    let opts = GridOptions {
        base_layout: Some(base),
        ..GridOptions::default()
    };
    let figs = [figure_with_traces(1)];
    let combined = assemble_with(&figs, &opts, &ThemeRegistry::default()).unwrap();
    assert_eq!(combined.layout.get("showlegend"), Some(&json!(false)));
    assert_eq!(combined.layout.get("paper_bgcolor"), Some(&json!("#010203")));
}
