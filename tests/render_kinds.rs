use std::fs;
use tempfile::tempdir;

use bluesteel_graphics::viz::{Mark, Ticks};
use bluesteel_graphics::{ChartType, InputTable, RenderOptions, create_figure, create_image, save_fig};

fn regulation() -> InputTable {
    InputTable::numeric(
        Some("year"),
        &[1970.0, 1980.0, 1990.0, 2000.0, 2010.0, 2016.0],
        vec![
            ("Agriculture", vec![40_000.0, 52_000.0, 61_000.0, 70_500.0, 80_250.0, 86_000.0]),
            ("Energy", vec![25_000.0, 31_000.0, 44_000.0, 58_000.0, 61_000.0, 64_500.0]),
        ],
    )
    .unwrap()
}

fn svg_options(kind: ChartType) -> RenderOptions {
    RenderOptions {
        type_: Some(kind.as_str().into()),
        title: Some("Accumulation of Federal Regulation, 1970-2016".into()),
        format: Some("svg".into()),
        ..Default::default()
    }
}

#[test]
fn every_chart_type_renders_to_svg() {
    let table = regulation();
    let dir = tempdir().unwrap();
    for kind in ChartType::ALL {
        let path = dir.path().join(format!("{kind}.svg"));
        let opts = RenderOptions {
            outfile: Some(path.clone()),
            ..svg_options(kind)
        };
        let written = save_fig(&table, &opts).unwrap();
        assert_eq!(written, path);
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"), "{kind}");
        assert!(svg.contains("1970\u{2013}2016"), "{kind} title missing");
        assert!(svg.contains("Agriculture"), "{kind} legend missing");
    }
}

#[test]
fn svg_output_is_bit_identical_across_runs() {
    let table = regulation();
    for kind in ChartType::ALL {
        let a = create_image(&table, &svg_options(kind)).unwrap();
        let b = create_image(&table, &svg_options(kind)).unwrap();
        assert_eq!(a, b, "{kind}");
    }
}

#[test]
fn stacked_area_upper_edge_is_the_running_sum() {
    let table = regulation();
    let fig = create_figure(&table, &svg_options(ChartType::StackedArea)).unwrap();
    let bands: Vec<&Vec<(f64, f64)>> = fig
        .marks
        .iter()
        .filter_map(|m| match m {
            Mark::Band { upper, .. } => Some(upper),
            _ => None,
        })
        .collect();
    assert_eq!(bands.len(), 2);
    let a = &table.columns()[0].values;
    let b = &table.columns()[1].values;
    for (i, (_, top)) in bands[1].iter().enumerate() {
        let expected = a[i].unwrap() + b[i].unwrap();
        assert!((top - expected).abs() < 1e-9);
    }

    // Reordering the columns changes which series sits on the baseline.
    let swapped = table.with_column_order(&["Energy", "Agriculture"]).unwrap();
    let fig2 = create_figure(&swapped, &svg_options(ChartType::StackedArea)).unwrap();
    let first_upper = |f: &bluesteel_graphics::Figure| match &f.marks[0] {
        Mark::Band { upper, .. } => upper.clone(),
        other => panic!("unexpected mark {other:?}"),
    };
    assert_ne!(first_upper(&fig), first_upper(&fig2));
    assert_eq!(first_upper(&fig2)[0].1, 25_000.0);
}

#[test]
fn text_index_becomes_bar_categories() {
    let table = InputTable::new(
        Some("country".into()),
        ["Germany", "France", "Italy"]
            .iter()
            .map(|s| bluesteel_graphics::IndexValue::Text((*s).into()))
            .collect(),
        vec![bluesteel_graphics::Column::new(
            "gdp",
            vec![Some(4.2), Some(2.9), Some(2.1)],
        )],
    )
    .unwrap();
    let opts = RenderOptions {
        type_: Some("horizontal_bar".into()),
        ..Default::default()
    };
    let fig = create_figure(&table, &opts).unwrap();
    let Ticks::Categories(cats) = &fig.y_axis.ticks else {
        panic!("expected categories on the y axis");
    };
    // First category is drawn at the top.
    let top = cats.iter().max_by(|a, b| a.0.total_cmp(&b.0)).unwrap();
    assert_eq!(top.1, "Germany");
    // The index names the vertical axis, the series the horizontal one.
    assert_eq!(fig.x_axis.label.as_deref(), Some("gdp"));
    assert_eq!(fig.y_axis.label.as_deref(), Some("country"));
}
