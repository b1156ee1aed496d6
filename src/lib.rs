#![forbid(unsafe_code)]
//! Roster-grid — moteur de mise en page du planning de garde hospitalier.
//!
//! - Grilles de dates jour / semaine (lundi → dimanche) / mois (42 cases).
//! - Géométrie des créneaux dans une colonne de 24 lignes, gardes de nuit comprises.
//! - Filtres service / département / médecin, agrégats pour les badges.
//! - Fonctions pures sur un instantané immuable ; les payloads de l'API sont
//!   normalisés une seule fois à la frontière (`io`).

pub mod calendar;
pub mod config;
pub mod filter;
pub mod io;
pub mod layout;
pub mod model;
pub mod render;
pub mod storage;
pub mod summary;

pub use calendar::{month_dates, week_dates, MonthCell, ViewMode, ViewWindow, YearMonth};
pub use config::{load_config_from_file, LayoutConfig, ShiftTypeStyle};
pub use filter::{FilterOutcome, Selection, ShiftFilter, UnresolvedRef};
pub use io::{normalize, Normalized, RecordError, Rejected, RosterSnapshot, ShiftRecord};
pub use layout::{
    cell_has_shift, day_column, layout_window, occupies_hour, shift_geometry, DayColumn, MonthDay,
    PlacedShift, SlotColor, SlotGeometry, WindowLayout,
};
pub use model::{
    Department, Doctor, DoctorId, Roster, Shift, ShiftId, ShiftStatus, ShiftType, Ward,
};
pub use render::{GridRenderer, TextGrid};
pub use storage::{JsonStorage, Storage};
pub use summary::{daily_counts, Summary};
