use crate::io::parse_hhmm;
use crate::layout::SlotColor;
use crate::model::{Shift, ShiftType};
use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Hauteur par défaut d'une ligne horaire, en pixels.
pub const DEFAULT_HOUR_HEIGHT: f64 = 60.0;
/// Opacité appliquée à la couleur d'un créneau.
pub const DEFAULT_SLOT_OPACITY: f32 = 0.2;

/// Paramètres de mise en page, passés explicitement à chaque calcul.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_hour_height")]
    pub hour_height: f64,
    #[serde(default = "default_slot_opacity")]
    pub slot_opacity: f32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shift_types: BTreeMap<ShiftType, ShiftTypeStyle>,
}

/// Surcharge d'un type de garde (horaires `HH:MM`, couleur `#rrggbb`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTypeStyle {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

fn default_hour_height() -> f64 {
    DEFAULT_HOUR_HEIGHT
}

fn default_slot_opacity() -> f32 {
    DEFAULT_SLOT_OPACITY
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hour_height: DEFAULT_HOUR_HEIGHT,
            slot_opacity: DEFAULT_SLOT_OPACITY,
            shift_types: BTreeMap::new(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.hour_height.is_finite() || self.hour_height <= 0.0 {
            bail!("hour_height must be a positive number");
        }
        if !(self.slot_opacity > 0.0 && self.slot_opacity <= 1.0) {
            bail!("slot_opacity must be in (0, 1]");
        }
        for (ty, style) in &self.shift_types {
            if let Some(raw) = &style.start_time {
                parse_hhmm(raw).with_context(|| format!("{ty}: invalid start_time"))?;
            }
            if let Some(raw) = &style.end_time {
                parse_hhmm(raw).with_context(|| format!("{ty}: invalid end_time"))?;
            }
            if let Some(raw) = &style.color {
                if SlotColor::parse(raw, 1.0).is_none() {
                    bail!("{ty}: invalid color {raw}, expected #rrggbb");
                }
            }
        }
        Ok(())
    }

    /// Hauteur totale d'une colonne (24 lignes).
    pub fn column_height(&self) -> f64 {
        24.0 * self.hour_height
    }

    /// Plage horaire d'un type, surcharge comprise.
    pub fn default_range(&self, ty: ShiftType) -> (NaiveTime, NaiveTime) {
        let (start, end) = ty.default_range();
        let Some(style) = self.shift_types.get(&ty) else {
            return (start, end);
        };
        let pick = |raw: &Option<String>, fallback: NaiveTime| {
            raw.as_deref()
                .and_then(|s| parse_hhmm(s).ok())
                .unwrap_or(fallback)
        };
        (pick(&style.start_time, start), pick(&style.end_time, end))
    }

    /// Couleur d'un type, surcharge comprise.
    pub fn type_color(&self, ty: ShiftType) -> &str {
        self.shift_types
            .get(&ty)
            .and_then(|s| s.color.as_deref())
            .unwrap_or_else(|| ty.default_color())
    }

    /// Couleur d'affichage d'une garde : couleur propre, sinon celle de son type.
    pub fn slot_color(&self, shift: &Shift) -> SlotColor {
        let type_color = self.type_color(shift.shift_type);
        shift
            .color
            .as_deref()
            .and_then(|raw| SlotColor::parse(raw, self.slot_opacity))
            .or_else(|| SlotColor::parse(type_color, self.slot_opacity))
            .or_else(|| SlotColor::parse(shift.shift_type.default_color(), self.slot_opacity))
            .unwrap_or(SlotColor {
                r: 0x80,
                g: 0x80,
                b: 0x80,
                alpha: self.slot_opacity,
            })
    }
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<LayoutConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: LayoutConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
