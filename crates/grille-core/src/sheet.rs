//! Score sheets: scores prepared ahead of time in a JSON or YAML file
//!
//! ```yaml
//! group: Team 4
//! scores:
//!   crit_1: 8
//!   crit_2: 5
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GradeError, Result};
use crate::session::Session;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default)]
    pub scores: BTreeMap<String, i64>,
}

impl ScoreSheet {
    /// Load a sheet; `.yaml`/`.yml` files are read as YAML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GradeError::io_operation("read score file", path.display(), e))?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );

        let parsed = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|reason| GradeError::InvalidScoreFile {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Merge another sheet on top of this one; its entries win
    pub fn merge(&mut self, other: ScoreSheet) {
        if other.group.is_some() {
            self.group = other.group;
        }
        self.scores.extend(other.scores);
    }

    /// Write the sheet's group and scores into a session.
    ///
    /// Scores are clamped like any other `set_score`; an unknown criterion
    /// id is an error.
    pub fn apply(&self, session: &mut Session) -> Result<()> {
        if let Some(group) = &self.group {
            session.set_group_name(group.clone());
        }
        for (id, value) in &self.scores {
            session.set_score(id, *value)?;
        }
        Ok(())
    }
}
