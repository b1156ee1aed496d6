use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Doctor (référence faible vers le backend)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoctorId(String);

impl DoctorId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Médecin tel que fourni par l'API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
}

/// Service (ward) : l'id sert aux filtres, le nom est porté par les shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ward {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// Type de garde. Chaque type porte une plage horaire et une couleur par défaut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftType {
    Morning,
    Evening,
    Night,
    FullDay,
    OnCall,
}

impl ShiftType {
    pub const ALL: [ShiftType; 5] = [
        ShiftType::Morning,
        ShiftType::Evening,
        ShiftType::Night,
        ShiftType::FullDay,
        ShiftType::OnCall,
    ];

    /// Plage horaire par défaut `(début, fin)`.
    pub fn default_range(self) -> (NaiveTime, NaiveTime) {
        let (start, end) = match self {
            ShiftType::Morning => (6, 14),
            ShiftType::Evening => (14, 22),
            ShiftType::Night => (22, 6),
            ShiftType::FullDay => (8, 20),
            ShiftType::OnCall => (20, 8),
        };
        (hour(start), hour(end))
    }

    /// Couleur d'affichage par défaut (`#rrggbb`).
    pub fn default_color(self) -> &'static str {
        match self {
            ShiftType::Morning => "#3b82f6",
            ShiftType::Evening => "#f59e0b",
            ShiftType::Night => "#6366f1",
            ShiftType::FullDay => "#10b981",
            ShiftType::OnCall => "#ef4444",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftType::Morning => "Morning",
            ShiftType::Evening => "Evening",
            ShiftType::Night => "Night",
            ShiftType::FullDay => "FullDay",
            ShiftType::OnCall => "OnCall",
        }
    }
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftType {
    type Err = String;

    /// Accepte les variantes rencontrées dans les payloads (`full_day`, `Full Day`, `on-call`...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "morning" => Ok(ShiftType::Morning),
            "evening" => Ok(ShiftType::Evening),
            "night" => Ok(ShiftType::Night),
            "fullday" => Ok(ShiftType::FullDay),
            "oncall" => Ok(ShiftType::OnCall),
            _ => Err(format!("unknown shift type: {s}")),
        }
    }
}

/// Statut affiché tel quel ; les transitions sont pilotées par l'API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    pub const ALL: [ShiftStatus; 4] = [
        ShiftStatus::Scheduled,
        ShiftStatus::Confirmed,
        ShiftStatus::Completed,
        ShiftStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftStatus::Scheduled => "Scheduled",
            ShiftStatus::Confirmed => "Confirmed",
            ShiftStatus::Completed => "Completed",
            ShiftStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(ShiftStatus::Scheduled),
            "confirmed" => Ok(ShiftStatus::Confirmed),
            "completed" => Ok(ShiftStatus::Completed),
            "cancelled" | "canceled" => Ok(ShiftStatus::Cancelled),
            _ => Err(format!("unknown shift status: {s}")),
        }
    }
}

/// Garde planifiée, forme canonique produite par `io::normalize`.
///
/// Une garde de nuit (`end_time < start_time`) reste rattachée à sa seule `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    pub ward: String,
    pub department: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub shift_type: ShiftType,
    pub status: ShiftStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Shift {
    /// Crée une garde aux horaires par défaut de son type.
    pub fn new<N: Into<String>>(
        doctor_id: DoctorId,
        doctor_name: N,
        date: NaiveDate,
        shift_type: ShiftType,
    ) -> Self {
        let (start_time, end_time) = shift_type.default_range();
        Self {
            id: ShiftId::random(),
            doctor_id,
            doctor_name: doctor_name.into(),
            specialty: None,
            ward: String::new(),
            department: String::new(),
            date,
            start_time,
            end_time,
            shift_type,
            status: ShiftStatus::Scheduled,
            notes: None,
            color: None,
        }
    }

    pub fn with_times(mut self, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    pub fn with_location<W: Into<String>, D: Into<String>>(mut self, ward: W, department: D) -> Self {
        self.ward = ward.into();
        self.department = department.into();
        self
    }

    pub fn with_status(mut self, status: ShiftStatus) -> Self {
        self.status = status;
        self
    }

    /// Passe minuit : la fin est strictement avant le début.
    pub fn is_overnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Durée en minutes, repli de minuit inclus.
    pub fn duration_minutes(&self) -> i64 {
        let start = i64::from(self.start_time.num_seconds_from_midnight() / 60);
        let end = i64::from(self.end_time.num_seconds_from_midnight() / 60);
        if end < start {
            24 * 60 - start + end
        } else {
            end - start
        }
    }
}

/// Instantané immuable : listes de référence + gardes normalisées.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub wards: Vec<Ward>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

impl Roster {
    pub fn ward_name<'a>(&'a self, id: &str) -> Option<&'a str> {
        self.wards.iter().find(|w| w.id == id).map(|w| w.name.as_str())
    }
    pub fn department_name<'a>(&'a self, id: &str) -> Option<&'a str> {
        self.departments
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.as_str())
    }
}
