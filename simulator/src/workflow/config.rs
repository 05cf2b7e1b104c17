use crate::generator::scatter::GeneratorConfig;
use crate::gui_bridge::model::MapStyle;
use anyhow::Context;
use lmpcore::matching::{CenterMode, DEFAULT_RADIUS_KM};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One matching pass: which side is centered, around whom, how far out,
/// and where the roster comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub radius_km: f64,
    pub center_mode: CenterMode,
    /// Falls back to the first person of the centered roster.
    pub center_id: Option<u32>,
    /// JSON roster backup; the Dobong fixture is used when absent.
    pub dataset: Option<PathBuf>,
    /// Generate a synthetic roster instead of loading one.
    pub synthetic: Option<GeneratorConfig>,
    pub style: MapStyle,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            center_mode: CenterMode::User,
            center_id: None,
            dataset: None,
            synthetic: None,
            style: MapStyle::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(radius_km: f64, center_mode: CenterMode, center_id: Option<u32>) -> Self {
        Self {
            radius_km,
            center_mode,
            center_id,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_keeps_defaults_elsewhere() {
        let cfg = WorkflowConfig::from_args(1.0, CenterMode::Assistant, Some(11));
        assert_eq!(cfg.radius_km, 1.0);
        assert_eq!(cfg.center_mode, CenterMode::Assistant);
        assert!(cfg.dataset.is_none());
        assert_eq!(cfg.style, MapStyle::default());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"radius_km: 5\ncenter_mode: assistant\ncenter_id: 14\nsynthetic:\n  users: 3\n  seed: 9\nstyle:\n  circle_opacity: 0.5\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.radius_km, 5.0);
        assert_eq!(cfg.center_mode, CenterMode::Assistant);
        assert_eq!(cfg.center_id, Some(14));
        let synthetic = cfg.synthetic.unwrap();
        assert_eq!(synthetic.users, 3);
        assert_eq!(synthetic.assistants, 20);
        assert_eq!(cfg.style.circle_opacity, 0.5);
        assert_eq!(cfg.style.user_marker_color, "#60A5FA");
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{}\n").unwrap();
        let cfg = WorkflowConfig::load(temp.path()).unwrap();
        assert_eq!(cfg, WorkflowConfig::default());
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"radius_km: [oops\n").unwrap();
        let err = WorkflowConfig::load(temp.path()).unwrap_err();
        assert!(err.to_string().starts_with("parsing workflow config"));
    }
}
