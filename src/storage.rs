use crate::io::{RosterSnapshot, ShiftRecord};
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Support persistant de l'instantané brut du roster.
pub trait Storage {
    /// Charge l'instantané ; les enregistrements ne sont pas encore normalisés.
    fn load(&self) -> anyhow::Result<RosterSnapshot>;
    /// Sauvegarde de manière atomique.
    fn save(&self, snapshot: &RosterSnapshot) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Instantané vide si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<RosterSnapshot> {
        if self.path.exists() {
            self.load()
        } else {
            Ok(RosterSnapshot::default())
        }
    }

    /// Ajoute des gardes brutes à l'instantané (créé au besoin) et le réécrit.
    /// Les listes de référence existantes sont conservées.
    pub fn append_shifts(&self, records: Vec<ShiftRecord>) -> anyhow::Result<RosterSnapshot> {
        let mut snapshot = self.load_or_default()?;
        snapshot.shifts.extend(records);
        self.save(&snapshot)?;
        Ok(snapshot)
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<RosterSnapshot> {
        let data = fs::read(&self.path)
            .with_context(|| format!("reading roster snapshot {}", self.path.display()))?;
        let snapshot: RosterSnapshot = serde_json::from_slice(&data).with_context(|| {
            format!(
                "parsing roster snapshot {} (expected doctors/wards/departments/shifts)",
                self.path.display()
            )
        })?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &RosterSnapshot) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file next to {}", self.path.display()))?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| {
            format!(
                "replacing roster snapshot {} ({} shift record(s))",
                self.path.display(),
                snapshot.shifts.len()
            )
        })?;
        Ok(())
    }
}
