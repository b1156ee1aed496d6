//! Frontière avec l'API : normalisation des payloads en `Shift` canonique,
//! import JSON/CSV, export CSV de la mise en page.

use crate::config::LayoutConfig;
use crate::layout::WindowLayout;
use crate::model::{Department, Doctor, DoctorId, Roster, Shift, ShiftId, ShiftStatus, ShiftType, Ward};
use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Erreur de qualité de données sur un enregistrement de garde.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("unknown shift type: {0}")]
    UnknownShiftType(String),
    #[error("unknown shift status: {0}")]
    UnknownStatus(String),
}

/// Garde telle que renvoyée par l'API : champs optionnels, noms variables
/// (`doctorId`, `doctor_id`, `user_id`...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    #[serde(default, alias = "_id", deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(
        default,
        alias = "doctor_id",
        alias = "user_id",
        alias = "userId",
        deserialize_with = "loose_string"
    )]
    pub doctor_id: Option<String>,
    #[serde(default, alias = "doctor_name")]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "start_time")]
    pub start_time: Option<String>,
    #[serde(default, alias = "end_time")]
    pub end_time: Option<String>,
    #[serde(default, alias = "shift_type", alias = "type")]
    pub shift_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

fn loose_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Instantané brut fourni par le backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSnapshot {
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub wards: Vec<Ward>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub shifts: Vec<ShiftRecord>,
}

/// Enregistrement écarté à la normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub index: usize,
    pub id: Option<String>,
    pub error: RecordError,
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub roster: Roster,
    pub rejected: Vec<Rejected>,
}

/// Parse strict `HH:MM` (00:00 – 23:59).
pub fn parse_hhmm(raw: &str) -> Result<NaiveTime, RecordError> {
    let invalid = || RecordError::InvalidTime(raw.to_string());
    let s = raw.trim();
    let (h, m) = s.split_once(':').ok_or_else(invalid)?;
    let two_digits = |p: &str| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(h) || !two_digits(m) {
        return Err(invalid());
    }
    let h: u32 = h.parse().map_err(|_| invalid())?;
    let m: u32 = m.parse().map_err(|_| invalid())?;
    if h > 23 || m > 59 {
        return Err(invalid());
    }
    NaiveTime::from_hms_opt(h, m, 0).ok_or_else(invalid)
}

/// Date ISO ; une partie horaire éventuelle (`2025-11-10T00:00:00Z`) est ignorée.
pub fn parse_date(raw: &str) -> Result<NaiveDate, RecordError> {
    let s = raw.trim();
    let day = s.split_once('T').map_or(s, |(d, _)| d);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| RecordError::InvalidDate(raw.to_string()))
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Normalise un enregistrement ; les horaires absents prennent ceux du type.
pub fn normalize_record(
    rec: &ShiftRecord,
    doctors: &[Doctor],
    config: &LayoutConfig,
) -> Result<Shift, RecordError> {
    let doctor_id = present(&rec.doctor_id)
        .map(DoctorId::new)
        .ok_or(RecordError::MissingField("doctorId"))?;
    let doctor = doctors.iter().find(|d| d.id == doctor_id);

    let doctor_name = present(&rec.doctor_name)
        .map(str::to_string)
        .or_else(|| doctor.map(|d| d.name.clone()))
        .ok_or(RecordError::MissingField("doctorName"))?;

    let date = parse_date(present(&rec.date).ok_or(RecordError::MissingField("date"))?)?;

    let raw_type = present(&rec.shift_type).ok_or(RecordError::MissingField("shiftType"))?;
    let shift_type: ShiftType = raw_type
        .parse()
        .map_err(|_| RecordError::UnknownShiftType(raw_type.to_string()))?;

    let status = match present(&rec.status) {
        Some(raw) => raw
            .parse::<ShiftStatus>()
            .map_err(|_| RecordError::UnknownStatus(raw.to_string()))?,
        None => ShiftStatus::Scheduled,
    };

    let (default_start, default_end) = config.default_range(shift_type);
    let start_time = match present(&rec.start_time) {
        Some(raw) => parse_hhmm(raw)?,
        None => default_start,
    };
    let end_time = match present(&rec.end_time) {
        Some(raw) => parse_hhmm(raw)?,
        None => default_end,
    };

    Ok(Shift {
        id: present(&rec.id).map_or_else(ShiftId::random, ShiftId::new),
        specialty: present(&rec.specialty)
            .map(str::to_string)
            .or_else(|| doctor.and_then(|d| d.specialty.clone())),
        doctor_id,
        doctor_name,
        ward: present(&rec.ward).unwrap_or_default().to_string(),
        department: present(&rec.department).unwrap_or_default().to_string(),
        date,
        start_time,
        end_time,
        shift_type,
        status,
        notes: present(&rec.notes).map(str::to_string),
        color: present(&rec.color).map(str::to_string),
    })
}

/// Normalise tout l'instantané ; les enregistrements invalides sont écartés et rapportés.
pub fn normalize(snapshot: &RosterSnapshot, config: &LayoutConfig) -> Normalized {
    let mut shifts = Vec::with_capacity(snapshot.shifts.len());
    let mut rejected = Vec::new();

    for (index, rec) in snapshot.shifts.iter().enumerate() {
        match normalize_record(rec, &snapshot.doctors, config) {
            Ok(shift) => shifts.push(shift),
            Err(error) => {
                #[cfg(feature = "logging")]
                tracing::warn!(index, id = ?rec.id, %error, "shift record rejected");
                rejected.push(Rejected {
                    index,
                    id: rec.id.clone(),
                    error,
                });
            }
        }
    }

    Normalized {
        roster: Roster {
            doctors: snapshot.doctors.clone(),
            wards: snapshot.wards.clone(),
            departments: snapshot.departments.clone(),
            shifts,
        },
        rejected,
    }
}

/// Import CSV, header
/// `id,doctor_id,doctor_name,ward,department,date,start_time,end_time,shift_type,status`.
/// La validation est différée à `normalize`.
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("reading csv row {}", line + 1))?;
        let field = |i: usize| {
            rec.get(i)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        out.push(ShiftRecord {
            id: field(0),
            doctor_id: field(1),
            doctor_name: field(2),
            ward: field(3),
            department: field(4),
            date: field(5),
            start_time: field(6),
            end_time: field(7),
            shift_type: field(8),
            status: field(9),
            ..ShiftRecord::default()
        });
    }
    Ok(out)
}

/// Export JSON du roster normalisé (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

/// Écrit les créneaux positionnés, header
/// `date,shift_id,doctor_name,shift_type,status,top,height,color`.
/// En vue mois, seuls les jours du mois sont écrits (cf. [`WindowLayout::placed`]).
/// Renvoie le nombre de lignes écrites.
pub fn write_layout_csv<W: Write>(out: W, layout: &WindowLayout<'_>) -> anyhow::Result<usize> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(out);
    w.write_record([
        "date",
        "shift_id",
        "doctor_name",
        "shift_type",
        "status",
        "top",
        "height",
        "color",
    ])?;
    let placed = layout.placed();
    for (date, p) in &placed {
        w.write_record([
            date.to_string().as_str(),
            p.shift.id.as_str(),
            p.shift.doctor_name.as_str(),
            p.shift.shift_type.as_str(),
            p.shift.status.as_str(),
            p.geometry.top.to_string().as_str(),
            p.geometry.height.to_string().as_str(),
            p.color.css().as_str(),
        ])?;
    }
    w.flush()?;
    Ok(placed.len())
}

pub fn export_layout_csv<P: AsRef<Path>>(path: P, layout: &WindowLayout<'_>) -> anyhow::Result<usize> {
    let path = path.as_ref();
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_layout_csv(file, layout)
}
