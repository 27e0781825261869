use worldcup_vis::detail;
use worldcup_vis::engine::{diff_markers, recompute, Dimensions};
use worldcup_vis::state::{AppState, VisEvent};
use worldcup_vis::{filter_range, read_records_from_csv_string, Metric, RecordStore, YearRange};

const HEADER: &str =
    "YEAR,LOCATION,WINNER,TEAMS,MATCHES,GOALS,AVERAGE_GOALS,AVERAGE_ATTENDANCE\n";

fn early_editions() -> RecordStore {
    let csv = format!(
        "{}\
1930,Uruguay,Uruguay,13,18,70,3.9,\"32,808\"
1934,Italy,Italy,16,17,70,4.1,\"21,353\"
1938,France,Italy,15,18,84,4.7,\"20,872\"
",
        HEADER
    );
    read_records_from_csv_string(&csv).expect("fixture should parse")
}

fn full_dataset() -> RecordStore {
    let csv = include_str!("../data/fifa-world-cup.csv");
    read_records_from_csv_string(csv).expect("bundled dataset should parse")
}

#[test]
fn three_editions_default_to_latest() {
    let store = early_editions();
    let plan = recompute(
        store.records(),
        YearRange::new(1930, 1938),
        Metric::Matches,
        Dimensions::default(),
        None,
    );
    assert_eq!(plan.years, vec![1930, 1934, 1938]);
    assert_eq!(plan.highlighted, Some(1938));
    assert_eq!(plan.markers.iter().filter(|m| m.highlighted).count(), 1);
}

#[test]
fn gap_range_renders_empty_chart_and_clears_panel() {
    let mut state = AppState::new(early_editions(), Dimensions::default());
    state.dispatch(VisEvent::MetricChanged(Metric::Matches));

    state.dispatch(VisEvent::RangeCommitted(YearRange::new(1932, 1936)));
    assert_eq!(state.plan().years, vec![1934]);

    state.dispatch(VisEvent::RangeCommitted(YearRange::new(1935, 1937)));
    let plan = state.plan();
    assert!(plan.is_empty());
    assert!(plan.line_path().is_none());
    assert_eq!(state.selection().highlighted_year, None);
    assert!(state.detail().is_none());
}

#[test]
fn thousands_separated_goals_parse() {
    let csv = format!("{}2014,Brazil,Germany,32,64,\"1,160\",2.7,\"52,918\"\n", HEADER);
    let store = read_records_from_csv_string(&csv).unwrap();
    assert_eq!(store.records()[0].goal_count, 1160);
}

#[test]
fn filter_matches_inclusive_bounds_for_every_range() {
    let store = full_dataset();
    let bounds = store.year_bounds();
    for lo in (bounds.lo()..=bounds.hi()).step_by(3) {
        for hi in (lo..=bounds.hi()).step_by(5) {
            let range = YearRange::new(lo, hi);
            let got: Vec<u16> = filter_range(store.records(), range)
                .iter()
                .map(|r| r.year)
                .collect();
            let want: Vec<u16> = store
                .records()
                .iter()
                .map(|r| r.year)
                .filter(|y| lo <= *y && *y <= hi)
                .collect();
            assert_eq!(got, want, "range {}", range);
            assert!(got.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn recompute_is_deterministic() {
    let store = full_dataset();
    for metric in Metric::ALL {
        let a = recompute(store.records(), YearRange::new(1950, 2010), metric, Dimensions::default(), None);
        let b = recompute(store.records(), YearRange::new(1950, 2010), metric, Dimensions::default(), None);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

#[test]
fn vertical_domain_always_starts_at_zero() {
    let store = full_dataset();
    for metric in Metric::ALL {
        for (lo, hi) in [(1930, 2014), (1990, 1990), (1954, 1970)] {
            let plan = recompute(store.records(), YearRange::new(lo, hi), metric, Dimensions::default(), None);
            let (y0, y1) = plan.y_scale.expect("non-empty range").domain();
            assert_eq!(y0, 0.0);
            let max = plan.markers.iter().map(|m| m.value).fold(0.0, f64::max);
            assert!(y1 >= max, "{} {:?}", metric, (y0, y1));
        }
    }
}

#[test]
fn narrowing_removes_only_out_of_range_markers() {
    let mut state = AppState::new(full_dataset(), Dimensions::default());
    let before = state.plan().years.clone();

    state.dispatch(VisEvent::RangeCommitted(YearRange::new(1970, 1998)));
    let diff = state.last_diff();
    let after = &state.plan().years;

    assert!(diff.entered.is_empty());
    assert_eq!(&diff.updated, after);
    let expected_exit: Vec<u16> = before.iter().copied().filter(|y| !after.contains(y)).collect();
    assert_eq!(diff.exited, expected_exit);
}

#[test]
fn click_changes_highlight_and_panel_only() {
    let mut state = AppState::new(full_dataset(), Dimensions::default());
    state.dispatch(VisEvent::RangeCommitted(YearRange::new(1950, 1990)));
    let selection = state.selection();
    let plan_before = state.plan().clone();

    state.dispatch(VisEvent::MarkerClicked(1966));

    let after = state.selection();
    assert_eq!(after.highlighted_year, Some(1966));
    assert_eq!(after.year_range, selection.year_range);
    assert_eq!(after.metric, selection.metric);
    assert_eq!(state.plan().y_scale, plan_before.y_scale);
    assert_eq!(state.plan().line, plan_before.line);

    let panel = state.detail().unwrap();
    assert_eq!(panel, detail::render(state.store().get(1966).unwrap()));
    assert_eq!(panel.title, "1966 World Cup England");
}

#[test]
fn switching_metric_moves_only_vertical_positions() {
    let store = full_dataset();
    let range = YearRange::new(1954, 2002);
    let dims = Dimensions::default();
    let matches = recompute(store.records(), range, Metric::Matches, dims, None);
    let attendance = recompute(store.records(), range, Metric::AverageAttendance, dims, None);

    assert_eq!(matches.years, attendance.years);
    assert_eq!(matches.x_scale, attendance.x_scale);
    assert_eq!(matches.x_ticks, attendance.x_ticks);
    let xs = |p: &worldcup_vis::engine::RenderPlan| p.markers.iter().map(|m| m.x).collect::<Vec<_>>();
    assert_eq!(xs(&matches), xs(&attendance));
    assert_ne!(matches.y_scale, attendance.y_scale);

    let diff = diff_markers(&matches.markers, &attendance.markers);
    assert!(diff.is_noop());
    assert_eq!(diff.updated, matches.years);
}
