#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roster_grid::summary::daily_counts;
use roster_grid::{
    Department, DoctorId, Roster, Selection, Shift, ShiftFilter, ShiftStatus, ShiftType, Summary,
    UnresolvedRef, Ward,
};

#[test]
fn ward_and_department_ids_resolve_to_names() {
    let roster = sample_roster();
    let by_ward = ShiftFilter {
        ward: Selection::Id("w2".into()),
        ..ShiftFilter::default()
    };
    assert_eq!(ids(&by_ward, &roster), vec!["b", "c"]);

    let both = ShiftFilter {
        ward: Selection::Id("w2".into()),
        department: Selection::Id("d1".into()),
        ..ShiftFilter::default()
    };
    assert_eq!(ids(&both, &roster), vec!["c"]);

    let all = ShiftFilter::default();
    assert!(all.is_empty());
    assert_eq!(ids(&all, &roster), vec!["a", "b", "c"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let roster = sample_roster();
    for needle in ["alice", "ALICE", "ce Mar"] {
        let f = ShiftFilter {
            search: needle.into(),
            ..ShiftFilter::default()
        };
        assert_eq!(ids(&f, &roster), vec!["a", "c"], "search {needle:?}");
    }
    let none = ShiftFilter {
        search: "zorro".into(),
        ..ShiftFilter::default()
    };
    assert!(ids(&none, &roster).is_empty());
}

#[test]
fn unresolved_reference_excludes_and_reports() {
    let roster = sample_roster();
    let f = ShiftFilter {
        ward: Selection::Id("w9".into()),
        ..ShiftFilter::default()
    };
    let outcome = f.apply(&roster, &roster.shifts);
    assert!(outcome.shifts.is_empty());
    assert_eq!(outcome.unresolved, vec![UnresolvedRef::Ward("w9".into())]);
    assert_eq!(outcome.excluded_unresolved, 3);
    assert!(outcome.has_warnings());

    let f = ShiftFilter {
        department: Selection::Id("nope".into()),
        ..ShiftFilter::default()
    };
    let outcome = f.apply(&roster, &roster.shifts);
    assert_eq!(outcome.unresolved, vec![UnresolvedRef::Department("nope".into())]);
    assert_eq!(outcome.unresolved[0].to_string(), "unknown department id nope");
}

#[test]
fn filtering_is_idempotent() {
    let roster = sample_roster();
    let f = ShiftFilter {
        ward: Selection::Id("w2".into()),
        search: "o".into(),
        ..ShiftFilter::default()
    };
    let first: Vec<Shift> = f
        .apply(&roster, &roster.shifts)
        .shifts
        .into_iter()
        .cloned()
        .collect();
    let second: Vec<Shift> = f.apply(&roster, &first).shifts.into_iter().cloned().collect();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn distinct_doctors_and_totals() {
    let shifts = vec![
        shift("x1", "1", "Dr A", "2025-11-10"),
        shift("x2", "1", "Dr A", "2025-11-10"),
        shift("x3", "2", "Dr B", "2025-11-11"),
    ];
    let all = Summary::from_shifts(&shifts);
    assert_eq!(all.total, 3);
    assert_eq!(all.distinct_doctors, 2);

    let day = Summary::for_date(&shifts, date("2025-11-10"));
    assert_eq!(day.total, 2);
    assert_eq!(day.distinct_doctors, 1);
}

#[test]
fn counts_by_status_and_day() {
    let mut shifts = vec![
        shift("x1", "1", "Dr A", "2025-11-10"),
        shift("x2", "2", "Dr B", "2025-11-10"),
        shift("x3", "3", "Dr C", "2025-11-12"),
    ];
    shifts[0].status = ShiftStatus::Confirmed;
    shifts[2].status = ShiftStatus::Confirmed;

    let summary = Summary::from_shifts(&shifts);
    assert_eq!(summary.count(ShiftStatus::Confirmed), 2);
    assert_eq!(summary.count(ShiftStatus::Scheduled), 1);
    assert_eq!(summary.count(ShiftStatus::Cancelled), 0);

    let dates = [date("2025-11-10"), date("2025-11-11"), date("2025-11-12")];
    assert_eq!(
        daily_counts(&shifts, &dates),
        vec![(dates[0], 2), (dates[1], 0), (dates[2], 1)]
    );
}

fn ids(filter: &ShiftFilter, roster: &Roster) -> Vec<String> {
    filter
        .apply(roster, &roster.shifts)
        .shifts
        .iter()
        .map(|s| s.id.as_str().to_string())
        .collect()
}

fn date(raw: &str) -> NaiveDate {
    raw.parse().unwrap()
}

fn shift(id: &str, doctor: &str, name: &str, day: &str) -> Shift {
    let mut s = Shift::new(DoctorId::new(doctor), name, date(day), ShiftType::Morning);
    s.id = roster_grid::ShiftId::new(id);
    s
}

fn sample_roster() -> Roster {
    let shifts = vec![
        shift("a", "1", "Dr. Alice Martin", "2025-11-10").with_location("Cardiology Ward", "Cardiology"),
        shift("b", "2", "Dr. Bob Stone", "2025-11-10").with_location("ICU", "Emergency"),
        shift("c", "1", "Dr. Alice Martin", "2025-11-11").with_location("ICU", "Cardiology"),
    ];
    Roster {
        doctors: Vec::new(),
        wards: vec![
            Ward {
                id: "w1".into(),
                name: "Cardiology Ward".into(),
            },
            Ward {
                id: "w2".into(),
                name: "ICU".into(),
            },
        ],
        departments: vec![
            Department {
                id: "d1".into(),
                name: "Cardiology".into(),
            },
            Department {
                id: "d2".into(),
                name: "Emergency".into(),
            },
        ],
        shifts,
    }
}
