use std::path::PathBuf;

use bluesteel_graphics::{
    ChartError, ChartType, InputTable, OutputFormat, RenderOptions, create_figure, resolve,
};

fn table() -> InputTable {
    InputTable::numeric(
        Some("year"),
        &[2000.0, 2001.0, 2002.0, 2003.0],
        vec![("a", vec![3.0, 1.0, 4.0, 1.5]), ("b", vec![2.0, 7.0, 1.0, 8.0])],
    )
    .unwrap()
}

#[test]
fn default_type_is_line_for_many_option_sets() {
    let sets = [
        RenderOptions::default(),
        RenderOptions {
            title: Some("t".into()),
            ymin: Some(0.0),
            ..Default::default()
        },
        RenderOptions {
            outfile: Some(PathBuf::from("x.svg")),
            xlabel_off: true,
            ..Default::default()
        },
    ];
    for o in sets {
        assert_eq!(resolve(&table(), &o).unwrap().chart_type(), ChartType::Line);
    }
}

#[test]
fn inverted_ranges_never_reach_the_renderer() {
    for (lo, hi) in [(1.0, 0.0), (5.0, 5.0), (-1.0, -2.0), (1e9, -1e9)] {
        let o = RenderOptions {
            xmin: Some(lo),
            xmax: Some(hi),
            ..Default::default()
        };
        let err = create_figure(&table(), &o).unwrap_err();
        assert_eq!(err.field(), Some("axis-range"));
    }
}

#[test]
fn unsupported_type_is_a_validation_error() {
    let o = RenderOptions {
        type_: Some("pie".into()),
        ..Default::default()
    };
    let err = create_figure(&table(), &o).unwrap_err();
    assert!(matches!(err, ChartError::Validation { ref field } if field == "type_"));
}

#[test]
fn suffix_and_explicit_format_agree() {
    for fmt in OutputFormat::ALL {
        let inferred = resolve(
            &table(),
            &RenderOptions {
                outfile: Some(PathBuf::from(format!("chart.{}", fmt.as_str().to_uppercase()))),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(inferred.format(), fmt);
    }
}

#[test]
fn options_round_trip_through_json() {
    let o = RenderOptions {
        type_: Some("vertical_bar".into()),
        ymax: Some(10.0),
        ..Default::default()
    };
    let json = serde_json::to_string(&o).unwrap();
    let back: RenderOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, o);
    let fig = create_figure(&table(), &back).unwrap();
    assert_eq!(fig.y_axis.range.1, 10.0);
}
