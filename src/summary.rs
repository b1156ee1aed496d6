//! Agrégats affichés dans les badges : recalculés à chaque changement, sans cache.

use crate::model::{DoctorId, Shift, ShiftStatus};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub by_status: BTreeMap<ShiftStatus, usize>,
    pub distinct_doctors: usize,
}

impl Summary {
    pub fn from_shifts<'a, I>(shifts: I) -> Self
    where
        I: IntoIterator<Item = &'a Shift>,
    {
        let mut total = 0usize;
        let mut by_status = BTreeMap::new();
        let mut doctors: BTreeSet<&DoctorId> = BTreeSet::new();
        for shift in shifts {
            total += 1;
            *by_status.entry(shift.status).or_insert(0) += 1;
            doctors.insert(&shift.doctor_id);
        }
        Self {
            total,
            by_status,
            distinct_doctors: doctors.len(),
        }
    }

    /// Agrégats restreints aux gardes du jour `date`.
    pub fn for_date<'a, I>(shifts: I, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Shift>,
    {
        Self::from_shifts(shifts.into_iter().filter(|s| s.date == date))
    }

    pub fn count(&self, status: ShiftStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Nombre de gardes par date, dans l'ordre de `dates` (badges de la grille mois).
pub fn daily_counts<'a, I>(shifts: I, dates: &[NaiveDate]) -> Vec<(NaiveDate, usize)>
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for shift in shifts {
        *per_day.entry(shift.date).or_insert(0) += 1;
    }
    dates
        .iter()
        .map(|d| (*d, per_day.get(d).copied().unwrap_or(0)))
        .collect()
}
