use crate::model::Shift;
use chrono::{NaiveDate, NaiveTime, Timelike};

/// Position verticale d'un créneau dans une colonne jour, en pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    pub top: f64,
    pub height: f64,
}

impl SlotGeometry {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Couleur RGB avec opacité réduite pour le rendu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl SlotColor {
    /// Parse `#rrggbb` (ou `rrggbb`).
    pub fn parse(raw: &str, alpha: f32) -> Option<Self> {
        let hex = raw.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            alpha,
        })
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Forme CSS `rgba(r, g, b, a)`.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}

/// Heures fractionnaires depuis minuit (les secondes sont ignorées).
pub fn fractional_hours(t: NaiveTime) -> f64 {
    f64::from(t.hour()) + f64::from(t.minute()) / 60.0
}

/// Durée en heures ; une fin avant le début replie sur le lendemain.
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let start = fractional_hours(start);
    let end = fractional_hours(end);
    let duration = end - start;
    if duration < 0.0 {
        24.0 - start + end
    } else {
        duration
    }
}

/// Géométrie d'une garde dans la colonne `date`, `None` si elle n'appartient pas à ce jour.
///
/// Une garde de nuit est rendue en entier dans la colonne de son jour de début :
/// sa hauteur peut dépasser le bas de la colonne.
pub fn shift_geometry(shift: &Shift, date: NaiveDate, hour_height: f64) -> Option<SlotGeometry> {
    if shift.date != date {
        return None;
    }
    let start = fractional_hours(shift.start_time);
    let duration = duration_hours(shift.start_time, shift.end_time);
    Some(SlotGeometry {
        top: start * hour_height,
        height: duration * hour_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parsing() {
        let c = SlotColor::parse("#3b82f6", 0.2).unwrap();
        assert_eq!((c.r, c.g, c.b), (0x3b, 0x82, 0xf6));
        assert_eq!(c.hex(), "#3b82f6");
        assert_eq!(c.css(), "rgba(59, 130, 246, 0.2)");
        assert!(SlotColor::parse("#fff", 1.0).is_none());
        assert!(SlotColor::parse("#gg0000", 1.0).is_none());
    }

    #[test]
    fn minutes_are_fractional() {
        let t = NaiveTime::from_hms_opt(7, 30, 0).unwrap();
        assert_eq!(fractional_hours(t), 7.5);
    }
}
