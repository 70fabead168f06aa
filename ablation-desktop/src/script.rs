//! Headless replay of JSON intent scripts.

use std::path::Path;

use ablation_core::{AblationEngine, Intent};
use anyhow::{Context, Result};

/// Outcome of a script replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Intents executed.
    pub applied: usize,
    /// Executed intents that changed something.
    pub changed: usize,
    /// Intents skipped because they needed an active shape.
    pub skipped: usize,
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// intents.
pub fn load_script(path: &Path) -> Result<Vec<Intent>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let intents = Intent::parse_script(&json)
        .with_context(|| format!("Invalid script {}", path.display()))?;
    tracing::debug!(count = intents.len(), "Loaded script");
    Ok(intents)
}

/// Apply `intents` in order. Intents that target a missing active shape are
/// logged and skipped; the replay continues.
pub fn run_script(engine: &mut AblationEngine, intents: &[Intent]) -> ScriptReport {
    let mut report = ScriptReport::default();
    for (index, intent) in intents.iter().enumerate() {
        match engine.try_apply(intent) {
            Ok(changed) => {
                report.applied += 1;
                if changed {
                    report.changed += 1;
                }
            }
            Err(e) => {
                tracing::warn!(index, ?intent, "Skipping intent: {e}");
                report.skipped += 1;
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use ablation_core::{Point, ShapeKind};

    #[test]
    fn test_run_script_counts() {
        let intents = vec![
            Intent::RotateActive,
            Intent::SelectShapeType {
                kind: ShapeKind::Circle,
            },
            Intent::CreateShapeAt {
                at: Point::new(300.0, 300.0),
            },
            // Circles do not rotate.
            Intent::RotateActive,
            Intent::ResizeActive { direction: 1 },
        ];
        let mut engine = AblationEngine::default();
        let report = run_script(&mut engine, &intents);
        assert_eq!(
            report,
            ScriptReport {
                applied: 4,
                changed: 3,
                skipped: 1,
            }
        );
        assert_eq!(engine.shapes().len(), 1);
    }

    #[test]
    fn test_load_script_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("script.json");
        std::fs::write(
            &path,
            r#"[{"intent": "select_shape_type", "kind": "square"},
                {"intent": "create_shape_at", "at": {"x": 100.0, "y": 100.0}}]"#,
        )
        .expect("write script");

        let intents = load_script(&path).expect("load");
        assert_eq!(intents.len(), 2);
    }

    #[test]
    fn test_load_script_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_script(&dir.path().join("missing.json")).is_err());

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"intent": "explode"}]"#).expect("write script");
        assert!(load_script(&path).is_err());
    }
}
