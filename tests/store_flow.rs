use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use tempfile::{Builder, NamedTempFile};
use tsviewer::data::LoadOptions;
use tsviewer::state::Color;
use tsviewer::{Action, AppState, AxisRange, Change, Dataset, Store, ViewerError};

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn store_with(content: &str) -> Store {
    let file = csv_file(content);
    let mut store = Store::new(AppState::from_dataset(Dataset::empty(), 0));
    store.load_file(file.path(), &LoadOptions::default()).unwrap();
    store
}

#[test]
fn test_load_csv_populates_store() {
    let store = store_with("time,depth,temp\n0,1.5,20\n1,2.5,\n2,abc,22\n");

    assert_eq!(store.rows().len(), 3);
    assert_eq!(store.available_columns(), vec!["time", "depth", "temp"]);

    let ds = store.state().dataset();
    // seconds are scaled to milliseconds
    assert_eq!(ds.column_values("time"), vec![0.0, 1000.0, 2000.0]);
    assert_eq!(ds.value(1, "temp"), None);
    assert_eq!(ds.value(2, "depth"), None);
}

#[test]
fn test_startup_plot_repaired_by_upload() {
    let file = csv_file("t,x\n0,1\n1,2\n");
    let mut store = Store::new(AppState::with_demo(&Default::default()));
    let before = store.plots()[0].clone();
    assert_eq!(before.axis_column(), "time (s)");

    let rows = store.load_file(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(rows, 2);

    let plot = &store.plots()[0];
    assert_eq!(plot.id(), before.id());
    assert_eq!(plot.title(), before.title());
    assert_eq!(plot.axis_column(), "t");
    assert!(plot.value_columns().is_empty());
    assert!(plot.colors().is_empty());
}

#[test]
fn test_revalidation_drops_missing_value_columns() {
    let mut store = store_with("time,x,y\n0,1,2\n1,3,4\n");
    let id = store.plots()[0].id();
    for column in ["x", "y"] {
        store.dispatch(Action::AddValueColumn {
            plot: id,
            column: column.into(),
        });
    }
    assert_eq!(store.plots()[0].value_columns(), &["x", "y"]);

    let next = csv_file("time,x\n0,5\n");
    store.load_file(next.path(), &LoadOptions::default()).unwrap();

    let plot = &store.plots()[0];
    assert_eq!(plot.axis_column(), "time");
    assert_eq!(plot.value_columns(), &["x"]);
    assert!(plot.color_for("y").is_none());
}

#[test]
fn test_set_rows_is_idempotent() {
    let mut store = store_with("time,x,y\n0,1,2\n");
    let id = store.plots()[0].id();
    store.dispatch(Action::AddValueColumn {
        plot: id,
        column: "y".into(),
    });

    let dataset = store.state().dataset().clone();
    store.dispatch(Action::SetRows(dataset.clone()));
    let once = store.state().clone();
    store.dispatch(Action::SetRows(dataset));
    assert_eq!(store.state(), &once);
}

#[test]
fn test_empty_dataset_falls_back_to_sentinel_axis() {
    let mut store = store_with("x,y\n1,2\n");
    assert_eq!(store.plots()[0].axis_column(), "x");

    store.dispatch(Action::SetRows(Dataset::empty()));
    assert_eq!(store.plots()[0].axis_column(), "time (s)");
    assert!(store.available_columns().is_empty());
}

#[test]
fn test_range_stats_over_brush() {
    let mut store = store_with("time,v\n0,5\n1,1\n2,9\n3,7\n");
    let id = store.plots()[0].id();
    store.dispatch(Action::AddValueColumn {
        plot: id,
        column: "v".into(),
    });

    assert_eq!(store.state().range_stats(id), None);

    // inclusive on both ends, in ms
    store.dispatch(Action::SetBrush(AxisRange::new(1000.0, 2000.0)));
    assert_eq!(store.selection(), store.zoom_domain());

    let stats = store.state().range_stats(id).unwrap();
    let v = stats[0].stats.unwrap();
    assert_eq!(v.count, 2);
    assert_eq!((v.start, v.end, v.min, v.max), (1.0, 9.0, 1.0, 9.0));
    assert_eq!(v.mean, 5.0);
    assert_eq!(v.median, 5.0);

    let global = store.state().global_stats(id).unwrap();
    let g = global[0].stats.unwrap();
    assert_eq!((g.count, g.start, g.end), (4, 5.0, 7.0));
    assert_eq!(g.median, 6.0);

    store.dispatch(Action::ResetZoom);
    assert_eq!(store.zoom_domain(), None);
    assert_eq!(store.selection(), None);
    assert_eq!(store.state().range_stats(id), None);
}

#[test]
fn test_failed_upload_leaves_store_unchanged() {
    let mut store = store_with("time,x\n0,1\n");
    let before = store.state().clone();

    let header_only = csv_file("time,x\n");
    let err = store
        .load_file(header_only.path(), &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, ViewerError::NoRows));

    let err = store
        .load_file(Path::new("data.txt"), &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, ViewerError::UnsupportedFormat { .. }));

    let err = store
        .load_file(Path::new("does-not-exist.csv"), &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, ViewerError::FileIo(_)));

    assert_eq!(store.state(), &before);
}

#[test]
fn test_subscribers_follow_dispatches() {
    let mut store = store_with("time,x\n0,1\n");
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let sub = store.subscribe(move |change, state| {
        sink.borrow_mut().push((change, state.plots().len()));
    });

    let id = store.plots()[0].id();
    store.dispatch(Action::AddPlot);
    store.dispatch(Action::SetColor {
        plot: id,
        column: "x".into(),
        color: Color::rgb(1, 2, 3),
    });
    store.dispatch(Action::RemovePlot(id));
    store.dispatch(Action::RemovePlot(id));
    store.unsubscribe(sub);
    store.dispatch(Action::AddPlot);

    assert_eq!(
        *log.borrow(),
        vec![(Change::Plots, 2), (Change::Plots, 2), (Change::Plots, 1)]
    );
    assert_eq!(store.focused_plot(), None);
}

#[test]
fn test_reorder_and_titles() {
    let mut store = Store::new(AppState::from_dataset(Dataset::empty(), 0));
    store.dispatch(Action::AddPlot);
    store.dispatch(Action::AddPlot);
    let titles = |s: &Store| -> Vec<String> {
        s.plots().iter().map(|p| p.title().to_string()).collect()
    };
    assert_eq!(titles(&store), vec!["General Plot", "Plot 2", "Plot 3"]);

    assert_eq!(store.dispatch(Action::Reorder { from: 0, to: 9 }), None);
    store.dispatch(Action::Reorder { from: 0, to: 2 });
    assert_eq!(titles(&store), vec!["Plot 2", "Plot 3", "General Plot"]);

    let id = store.plots()[0].id();
    assert_eq!(
        store.dispatch(Action::SetTitle {
            plot: id,
            title: "   ".into()
        }),
        None
    );
    store.dispatch(Action::SetTitle {
        plot: id,
        title: "  Depth  ".into(),
    });
    assert_eq!(store.plots()[0].title(), "Depth");
}
