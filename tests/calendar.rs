#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate, Weekday};
use roster_grid::{month_dates, week_dates, ViewMode, ViewWindow};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn week_dates_start_monday_for_a_full_year() {
    let mut day = d(2025, 1, 1);
    while day < d(2026, 1, 1) {
        let week = week_dates(day).unwrap();
        assert_eq!(week[0].weekday(), Weekday::Mon, "week of {day}");
        assert_eq!(week[6].weekday(), Weekday::Sun);
        for pair in week.windows(2) {
            assert_eq!(pair[1], pair[0].succ_opt().unwrap());
        }
        assert!(week.contains(&day));
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn month_dates_always_cover_42_consecutive_days() {
    for year in [2024, 2025] {
        for month in 1..=12 {
            let first = d(year, month, 1);
            // n'importe quel jour du mois donne la même grille
            let dates = month_dates(d(year, month, 15)).unwrap();
            assert_eq!(Some(dates.clone()), month_dates(first));
            assert_eq!(dates.len(), 42, "{year}-{month}");
            assert_eq!(dates[0].weekday(), Weekday::Sun);
            for pair in dates.windows(2) {
                assert_eq!(pair[1], pair[0].succ_opt().unwrap());
            }
            let leading = first.weekday().num_days_from_sunday() as usize;
            assert_eq!(dates[leading], first);
            let in_month = dates.iter().filter(|x| x.month() == month).count();
            let next_first = if month == 12 {
                d(year + 1, 1, 1)
            } else {
                d(year, month + 1, 1)
            };
            let month_len = next_first.signed_duration_since(first).num_days() as usize;
            assert_eq!(in_month, month_len);
        }
    }
}

#[test]
fn month_grid_padding_edges() {
    // juin 2025 commence un dimanche : aucun jour de remplissage en tête
    assert_eq!(month_dates(d(2025, 6, 10)).unwrap()[0], d(2025, 6, 1));
    // novembre 2025 commence un samedi : 6 jours d'octobre
    let nov = month_dates(d(2025, 11, 1)).unwrap();
    assert_eq!(nov[0], d(2025, 10, 26));
    assert_eq!(nov[6], d(2025, 11, 1));
    // février 2015 : 28 jours à partir d'un dimanche, grille complétée en mars
    let feb = month_dates(d(2015, 2, 1)).unwrap();
    assert_eq!(feb[0], d(2015, 2, 1));
    assert_eq!(feb[41], d(2015, 3, 14));
    // passage d'année
    let dec = month_dates(d(2025, 12, 25)).unwrap();
    assert_eq!(dec[0], d(2025, 11, 30));
    assert_eq!(dec[41], d(2026, 1, 10));
    // février bissextile
    let leap = month_dates(d(2024, 2, 1)).unwrap();
    assert_eq!(leap[0], d(2024, 1, 28));
    assert!(leap.contains(&d(2024, 2, 29)));
}

#[test]
fn view_windows_expose_ranges_and_cells() {
    let week = ViewWindow::containing(ViewMode::Week, d(2025, 11, 13)).unwrap();
    assert_eq!(week.mode(), ViewMode::Week);
    assert_eq!(week.range(), Some((d(2025, 11, 10), d(2025, 11, 16))));
    assert!(week.contains(d(2025, 11, 16)));
    assert!(!week.contains(d(2025, 11, 17)));
    assert_eq!(week.next(), Some(ViewWindow::Week(d(2025, 11, 17))));
    assert!(week.month_cells().is_empty());

    let month = ViewWindow::month(2025, 11).unwrap();
    assert_eq!(month.mode(), ViewMode::Month);
    assert_eq!(month.range(), Some((d(2025, 10, 26), d(2025, 12, 6))));
    let cells = month.month_cells();
    assert_eq!(cells.len(), 42);
    assert_eq!(cells.iter().filter(|c| c.in_month).count(), 30);
    assert!(!cells[0].in_month);

    let day = ViewWindow::day(d(2025, 12, 31));
    assert_eq!(day.dates(), vec![d(2025, 12, 31)]);
    assert_eq!(day.next(), Some(ViewWindow::Day(d(2026, 1, 1))));
    assert_eq!(day.to_string(), "day 2025-12-31");
}

#[test]
fn grids_at_the_calendar_bounds_are_refused() {
    // NaiveDate::MAX tombe un lundi, NaiveDate::MIN un jeudi
    assert!(week_dates(NaiveDate::MAX).is_none());
    assert!(week_dates(NaiveDate::MIN).is_none());
    assert!(month_dates(NaiveDate::MAX).is_none());
    assert!(month_dates(NaiveDate::MIN).is_none());

    assert!(ViewWindow::containing(ViewMode::Week, NaiveDate::MAX).is_none());
    assert!(ViewWindow::containing(ViewMode::Month, NaiveDate::MIN).is_none());
    assert_eq!(
        ViewWindow::containing(ViewMode::Day, NaiveDate::MAX),
        Some(ViewWindow::Day(NaiveDate::MAX))
    );
    assert_eq!(ViewWindow::day(NaiveDate::MAX).next(), None);

    // le dernier mois dont la grille tient encore dans les bornes
    let last = ViewWindow::containing(ViewMode::Month, NaiveDate::MAX - chrono::Duration::days(40))
        .unwrap();
    assert_eq!(last.dates().len(), 42);
    assert_eq!(last.next(), None);
}
