use crate::model::{Roster, Shift};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Valeur d'un filtre par référence : tout, ou un id à résoudre en nom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Id(String),
}

impl Selection {
    /// `None`, chaîne vide ou `all` → `All`.
    pub fn from_arg(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Selection::All,
            Some(s) if s.eq_ignore_ascii_case("all") => Selection::All,
            Some(s) => Selection::Id(s.to_string()),
        }
    }
}

/// Référence de filtre sans correspondance dans les listes du roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedRef {
    Ward(String),
    Department(String),
}

impl fmt::Display for UnresolvedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedRef::Ward(id) => write!(f, "unknown ward id {id}"),
            UnresolvedRef::Department(id) => write!(f, "unknown department id {id}"),
        }
    }
}

/// Filtres actifs, passés explicitement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftFilter {
    #[serde(default)]
    pub ward: Selection,
    #[serde(default)]
    pub department: Selection,
    #[serde(default)]
    pub search: String,
}

/// Résultat du filtrage. Les exclusions dues à une référence inconnue
/// sont comptées à part pour rester visibles.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a> {
    pub shifts: Vec<&'a Shift>,
    pub unresolved: Vec<UnresolvedRef>,
    pub excluded_unresolved: usize,
}

impl FilterOutcome<'_> {
    pub fn has_warnings(&self) -> bool {
        !self.unresolved.is_empty()
    }
}

#[derive(Clone, Copy)]
enum Resolved<'r> {
    Any,
    Name(&'r str),
    Missing,
}

impl ShiftFilter {
    pub fn is_empty(&self) -> bool {
        self.ward == Selection::All && self.department == Selection::All && self.search.is_empty()
    }

    /// Filtre `shifts` ; les ids de service/département sont résolus via `roster`.
    pub fn apply<'a, I>(&self, roster: &Roster, shifts: I) -> FilterOutcome<'a>
    where
        I: IntoIterator<Item = &'a Shift>,
    {
        let ward = match &self.ward {
            Selection::All => Resolved::Any,
            Selection::Id(id) => roster.ward_name(id).map_or(Resolved::Missing, Resolved::Name),
        };
        let department = match &self.department {
            Selection::All => Resolved::Any,
            Selection::Id(id) => roster
                .department_name(id)
                .map_or(Resolved::Missing, Resolved::Name),
        };

        let mut unresolved = Vec::new();
        if let (Resolved::Missing, Selection::Id(id)) = (&ward, &self.ward) {
            unresolved.push(UnresolvedRef::Ward(id.clone()));
        }
        if let (Resolved::Missing, Selection::Id(id)) = (&department, &self.department) {
            unresolved.push(UnresolvedRef::Department(id.clone()));
        }

        let needle = self.search.to_lowercase();
        let mut kept = Vec::new();
        let mut excluded_unresolved = 0usize;

        for shift in shifts {
            if matches!(ward, Resolved::Missing) || matches!(department, Resolved::Missing) {
                excluded_unresolved += 1;
                continue;
            }
            if let Resolved::Name(name) = ward {
                if shift.ward != name {
                    continue;
                }
            }
            if let Resolved::Name(name) = department {
                if shift.department != name {
                    continue;
                }
            }
            if !needle.is_empty() && !shift.doctor_name.to_lowercase().contains(&needle) {
                continue;
            }
            kept.push(shift);
        }

        #[cfg(feature = "logging")]
        for r in &unresolved {
            tracing::warn!(reference = %r, excluded = excluded_unresolved, "filter reference did not resolve");
        }

        FilterOutcome {
            shifts: kept,
            unresolved,
            excluded_unresolved,
        }
    }
}
