use crate::model::Shift;
use chrono::{NaiveDate, Timelike};

/// Nombre de lignes horaires d'une colonne jour.
pub const HOURS_PER_DAY: u32 = 24;

/// La garde occupe-t-elle l'heure `hour` de son jour de début ?
///
/// Seules les heures pleines comptent : `[début, fin)` en journée,
/// `h >= début || h < fin` quand l'heure de fin est inférieure à l'heure de début.
pub fn occupies_hour(shift: &Shift, hour: u32) -> bool {
    let start = shift.start_time.hour();
    let end = shift.end_time.hour();
    if end < start {
        hour >= start || hour < end
    } else {
        hour >= start && hour < end
    }
}

/// Vrai si une garde du jour `date` occupe la case `hour` ; le bouton
/// « ajouter une garde » est alors masqué.
pub fn cell_has_shift<'a, I>(shifts: I, date: NaiveDate, hour: u32) -> bool
where
    I: IntoIterator<Item = &'a Shift>,
{
    shifts
        .into_iter()
        .any(|s| s.date == date && occupies_hour(s, hour))
}

/// Occupation des 24 cases de la colonne `date`.
pub fn occupied_hours<'a, I>(shifts: I, date: NaiveDate) -> [bool; HOURS_PER_DAY as usize]
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut out = [false; HOURS_PER_DAY as usize];
    for shift in shifts.into_iter().filter(|s| s.date == date) {
        for (hour, cell) in out.iter_mut().enumerate() {
            if occupies_hour(shift, hour as u32) {
                *cell = true;
            }
        }
    }
    out
}
