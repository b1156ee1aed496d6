//! Génération des grilles de dates : jour, semaine (lundi → dimanche), mois (6 × 7).
//!
//! La vue semaine commence le lundi ; la grille mois commence le dimanche,
//! avec les jours de remplissage des mois voisins.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nombre de cases d'une grille mois (6 semaines complètes).
pub const MONTH_CELLS: usize = 42;

/// Les 7 dates (lundi → dimanche) de la semaine contenant `date`.
///
/// `None` quand la semaine déborde des bornes de `NaiveDate`.
pub fn week_dates(date: NaiveDate) -> Option<[NaiveDate; 7]> {
    let back = (date.weekday().num_days_from_sunday() + 6) % 7;
    let monday = date.checked_sub_signed(Duration::days(i64::from(back)))?;
    monday.checked_add_signed(Duration::days(6))?;
    Some(std::array::from_fn(|i| monday + Duration::days(i as i64)))
}

/// Les 42 dates de la grille du mois contenant `date`, ou `None` hors bornes.
pub fn month_dates(date: NaiveDate) -> Option<Vec<NaiveDate>> {
    let first = first_of_month(date);
    let leading = first.weekday().num_days_from_sunday();
    let start = first.checked_sub_signed(Duration::days(i64::from(leading)))?;
    start.checked_add_signed(Duration::days(MONTH_CELLS as i64 - 1))?;
    Some(start.iter_days().take(MONTH_CELLS).collect())
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Mois calendaire validé (porte en interne son premier jour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }
    pub fn of(date: NaiveDate) -> Self {
        Self(first_of_month(date))
    }
    pub fn year(&self) -> i32 {
        self.0.year()
    }
    pub fn month(&self) -> u32 {
        self.0.month()
    }
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Mode d'affichage demandé par l'appelant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        })
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(format!("unknown view mode: {s}")),
        }
    }
}

/// Fenêtre visible. `Week` porte toujours un lundi quand elle est construite via `week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewWindow {
    Day(NaiveDate),
    Week(NaiveDate),
    Month(YearMonth),
}

/// Case de la grille mois ; `in_month` est faux pour les jours de remplissage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub in_month: bool,
}

impl ViewWindow {
    pub fn day(date: NaiveDate) -> Self {
        ViewWindow::Day(date)
    }

    /// Normalise l'ancre sur le lundi de sa semaine.
    pub fn week(anchor: NaiveDate) -> Option<Self> {
        week_dates(anchor).map(|week| ViewWindow::Week(week[0]))
    }

    pub fn month(year: i32, month: u32) -> Option<Self> {
        YearMonth::new(year, month).and_then(Self::of_month)
    }

    fn of_month(ym: YearMonth) -> Option<Self> {
        month_dates(ym.first_day()).map(|_| ViewWindow::Month(ym))
    }

    /// Fenêtre du mode donné contenant `date` ; `None` si sa grille sort des bornes.
    pub fn containing(mode: ViewMode, date: NaiveDate) -> Option<Self> {
        match mode {
            ViewMode::Day => Some(ViewWindow::day(date)),
            ViewMode::Week => ViewWindow::week(date),
            ViewMode::Month => Self::of_month(YearMonth::of(date)),
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            ViewWindow::Day(_) => ViewMode::Day,
            ViewWindow::Week(_) => ViewMode::Week,
            ViewWindow::Month(_) => ViewMode::Month,
        }
    }

    /// Dates visibles, dans l'ordre d'affichage.
    pub fn dates(&self) -> Vec<NaiveDate> {
        match self {
            ViewWindow::Day(date) => vec![*date],
            ViewWindow::Week(anchor) => week_dates(*anchor).map(|w| w.to_vec()).unwrap_or_default(),
            ViewWindow::Month(ym) => month_dates(ym.first_day()).unwrap_or_default(),
        }
    }

    /// Première et dernière date visibles (bornes incluses).
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.dates();
        Some((*dates.first()?, *dates.last()?))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range()
            .is_some_and(|(first, last)| first <= date && date <= last)
    }

    /// Cases de la grille mois ; vide pour les vues jour/semaine.
    pub fn month_cells(&self) -> Vec<MonthCell> {
        let ViewWindow::Month(ym) = self else {
            return Vec::new();
        };
        self.dates()
            .into_iter()
            .map(|date| MonthCell {
                date,
                in_month: ym.contains(date),
            })
            .collect()
    }

    pub fn next(&self) -> Option<Self> {
        self.shift_by(1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.shift_by(-1)
    }

    fn shift_by(&self, step: i64) -> Option<Self> {
        match self {
            ViewWindow::Day(date) => date
                .checked_add_signed(Duration::days(step))
                .map(ViewWindow::Day),
            ViewWindow::Week(anchor) => anchor
                .checked_add_signed(Duration::days(7 * step))
                .and_then(ViewWindow::week),
            ViewWindow::Month(ym) => {
                let first = ym.first_day();
                let moved = if step >= 0 {
                    first.checked_add_months(Months::new(step as u32))
                } else {
                    first.checked_sub_months(Months::new(step.unsigned_abs() as u32))
                };
                moved.and_then(|d| Self::of_month(YearMonth::of(d)))
            }
        }
    }
}

impl fmt::Display for ViewWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewWindow::Day(date) => write!(f, "day {date}"),
            ViewWindow::Week(anchor) => match week_dates(*anchor) {
                Some(week) => write!(f, "week {} → {}", week[0], week[6]),
                None => write!(f, "week {anchor}"),
            },
            ViewWindow::Month(ym) => write!(f, "month {ym}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn sunday_belongs_to_the_week_before() {
        // 2025-11-16 est un dimanche
        let week = week_dates(d(2025, 11, 16)).unwrap();
        assert_eq!(week[0], d(2025, 11, 10));
        assert_eq!(week[6], d(2025, 11, 16));
    }

    #[test]
    fn week_window_is_normalized_to_monday() {
        assert_eq!(ViewWindow::week(d(2025, 11, 13)), Some(ViewWindow::Week(d(2025, 11, 10))));
    }

    #[test]
    fn month_navigation_crosses_year() {
        let dec = ViewWindow::month(2025, 12).unwrap();
        assert_eq!(dec.next(), ViewWindow::month(2026, 1));
        assert_eq!(ViewWindow::month(2026, 1).unwrap().previous(), Some(dec));
        assert!(ViewWindow::month(2025, 13).is_none());
    }
}
