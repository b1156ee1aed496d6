//! Mise en page des gardes : géométrie des créneaux, occupation horaire,
//! assemblage des colonnes (jour/semaine) et des cases (mois).

mod geometry;
mod occupancy;

pub use geometry::{duration_hours, fractional_hours, shift_geometry, SlotColor, SlotGeometry};
pub use occupancy::{cell_has_shift, occupied_hours, occupies_hour, HOURS_PER_DAY};

use crate::calendar::ViewWindow;
use crate::config::LayoutConfig;
use crate::model::Shift;
use chrono::NaiveDate;

/// Garde positionnée dans une colonne.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedShift<'a> {
    pub shift: &'a Shift,
    pub geometry: SlotGeometry,
    pub color: SlotColor,
}

/// Colonne jour : créneaux triés par heure de début + occupation des 24 cases.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub slots: Vec<PlacedShift<'a>>,
    pub occupied: [bool; HOURS_PER_DAY as usize],
}

impl DayColumn<'_> {
    pub fn can_add_at(&self, hour: u32) -> bool {
        self.occupied.get(hour as usize).is_some_and(|busy| !busy)
    }
}

/// Case de la grille mois : la colonne du jour, géométrie comprise.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthDay<'a> {
    pub in_month: bool,
    pub column: DayColumn<'a>,
}

impl MonthDay<'_> {
    pub fn date(&self) -> NaiveDate {
        self.column.date
    }

    pub fn count(&self) -> usize {
        self.column.slots.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowLayout<'a> {
    Columns(Vec<DayColumn<'a>>),
    Month(Vec<MonthDay<'a>>),
}

impl<'a> WindowLayout<'a> {
    /// Toutes les gardes positionnées, colonne par colonne. En vue mois,
    /// les jours de remplissage appartiennent aux mois voisins et sont omis.
    pub fn placed(&self) -> Vec<(NaiveDate, &PlacedShift<'a>)> {
        let columns: Vec<&DayColumn<'a>> = match self {
            WindowLayout::Columns(columns) => columns.iter().collect(),
            WindowLayout::Month(days) => days
                .iter()
                .filter(|d| d.in_month)
                .map(|d| &d.column)
                .collect(),
        };
        columns
            .into_iter()
            .flat_map(|c| c.slots.iter().map(move |p| (c.date, p)))
            .collect()
    }
}

/// Construit la colonne `date` à partir des gardes visibles.
pub fn day_column<'a>(shifts: &[&'a Shift], date: NaiveDate, config: &LayoutConfig) -> DayColumn<'a> {
    let mut slots: Vec<PlacedShift<'a>> = shifts
        .iter()
        .copied()
        .filter_map(|shift| {
            shift_geometry(shift, date, config.hour_height).map(|geometry| PlacedShift {
                shift,
                geometry,
                color: config.slot_color(shift),
            })
        })
        .collect();
    slots.sort_by(|a, b| {
        a.shift
            .start_time
            .cmp(&b.shift.start_time)
            .then_with(|| a.shift.id.cmp(&b.shift.id))
    });
    DayColumn {
        date,
        slots,
        occupied: occupied_hours(shifts.iter().copied(), date),
    }
}

/// Mise en page complète d'une fenêtre, recalculée à chaque appel.
pub fn layout_window<'a>(
    window: &ViewWindow,
    shifts: &[&'a Shift],
    config: &LayoutConfig,
) -> WindowLayout<'a> {
    #[cfg(feature = "logging")]
    tracing::debug!(%window, shifts = shifts.len(), "layout pass");

    match window {
        ViewWindow::Month(_) => WindowLayout::Month(
            window
                .month_cells()
                .into_iter()
                .map(|cell| MonthDay {
                    in_month: cell.in_month,
                    column: day_column(shifts, cell.date, config),
                })
                .collect(),
        ),
        _ => WindowLayout::Columns(
            window
                .dates()
                .into_iter()
                .map(|date| day_column(shifts, date, config))
                .collect(),
        ),
    }
}
