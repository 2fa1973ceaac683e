// Tests covering the radial year layout over many years.
use chrono::{Datelike, NaiveDate};
use mandala::{year_grid, Locale, MandalaConfig};
use mandala_layout::calendar::{leading_fillers, CellKind, Highlight, RINGS, WEEKS, WEEK_LABELS};
use test_case::test_case;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn grid_for(today: NaiveDate) -> mandala::YearGrid {
    year_grid(&MandalaConfig::default(), &Locale::english(), today)
}

#[test]
fn every_year_has_the_same_shape() {
    for year in 1970..=2100 {
        let grid = grid_for(date(year, 6, 15));
        assert_eq!(grid.cells.len(), (WEEKS * RINGS) as usize, "{year}");
        assert_eq!(grid.week_labels.len(), WEEK_LABELS as usize, "{year}");
        assert_eq!(grid.year, year);
    }
}

#[test]
fn leading_fillers_match_the_weekday_of_new_year() {
    for year in 1970..=2100 {
        let grid = grid_for(date(year, 3, 1));
        let start = leading_fillers(date(year, 1, 1));
        assert_eq!(grid.start_offset, start);
        assert!(start < 6, "{year}");

        let week_zero: Vec<_> = (0..RINGS).map(|ring| grid.cell(0, ring).unwrap()).collect();
        let fillers = week_zero.iter().take_while(|cell| cell.is_filler()).count();
        assert_eq!(fillers as u32, start, "{year}");
        assert_eq!(week_zero[start as usize].date(), Some(date(year, 1, 1)));
    }
}

#[test]
fn dates_run_without_gaps_until_the_year_ends() {
    for year in 1970..=2100 {
        let grid = grid_for(date(year, 1, 1));
        let dates: Vec<NaiveDate> = grid.date_cells().filter_map(|cell| cell.date()).collect();

        assert_eq!(dates[0], date(year, 1, 1));
        assert!(dates.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
        assert!(dates.iter().all(|d| d.year() == year));

        // once the fillers after the year start, no date follows
        let first_trailing = grid
            .cells
            .iter()
            .enumerate()
            .skip(grid.start_offset as usize)
            .find(|(_, cell)| cell.is_filler())
            .map(|(index, _)| index);
        if let Some(index) = first_trailing {
            assert!(grid.cells[index..].iter().all(|cell| cell.is_filler()), "{year}");
        }

        assert_eq!(dates.len() as u32, date(year, 12, 31).ordinal(), "{year}");
        assert_eq!(grid.last_date(), Some(date(year, 12, 31)), "{year}");
    }
}

#[test_case(date(2023, 1, 1) ; "new year on a sunday")]
#[test_case(date(2012, 12, 31) ; "leap year opening on a sunday")]
#[test_case(date(2040, 12, 31) ; "another leap year opening on a sunday")]
#[test_case(date(2024, 2, 29) ; "leap day")]
#[test_case(date(2025, 7, 4) ; "summer")]
#[test_case(date(2026, 12, 31) ; "new years eve")]
fn exactly_one_cell_holds_today(today: NaiveDate) {
    let grid = grid_for(today);
    let todays: Vec<_> = grid
        .cells
        .iter()
        .filter(|cell| cell.highlight == Highlight::Today)
        .collect();

    assert_eq!(grid.year, today.year());
    assert_eq!(todays.len(), 1);
    assert_eq!(todays[0].date(), Some(today));
    let slot = leading_fillers(date(today.year(), 1, 1)) + today.ordinal0();
    assert_eq!((todays[0].week, todays[0].ring), (slot / RINGS, slot % RINGS));
}

#[test]
fn new_years_day_2024_opens_the_first_week() {
    let grid = grid_for(date(2024, 1, 1));
    let cell = grid.cell(0, 0).unwrap();

    assert_eq!(grid.start_offset, 0);
    assert_eq!(cell.label, "1");
    assert_eq!(cell.month_index(), Some(0));
    assert!(cell.highlights_today());
    assert!((0..RINGS).all(|ring| !grid.cell(0, ring).unwrap().is_filler()));
}

#[test]
fn new_years_eve_2024_closes_week_52() {
    let grid = grid_for(date(2024, 12, 31));
    let today = grid.today_cell().expect("today is laid out");

    assert_eq!(today.week, 52);
    assert_eq!(today.ring, 1);
    assert_eq!(today.month_index(), Some(11));
    assert_eq!(grid.date_cells().count(), 366);
    assert_eq!(grid.date_cells().last().map(|cell| cell.week), Some(52));
}

#[test]
fn json_cells_are_tagged_by_kind() {
    // 2022 opens on a Saturday
    let grid = grid_for(date(2022, 5, 9));
    let value = serde_json::to_value(&grid).expect("serialize grid");

    let first = &value["cells"][0];
    assert_eq!(first["kind"]["type"], "filler");
    assert_eq!(first["label"], "M");

    let new_year = grid.cell(0, 5).unwrap();
    assert!(matches!(new_year.kind, CellKind::Date { month_index: 0, .. }));
    assert_eq!(value["cells"][5]["kind"]["type"], "date");
    assert_eq!(value["cells"][5]["kind"]["date"], "2022-01-01");
    assert_eq!(value["ring_band"].as_array().map(Vec::len), Some(166));
}
