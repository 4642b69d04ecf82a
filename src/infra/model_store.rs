// ============================================================
// Layer 6 — Model Store
// ============================================================
// Saves and restores the fitted model as JSON.
//
// Files in the model directory:
//   model.json            — BinaryModel (featurizer + weights)
//   pipeline_config.json  — the PipelineConfig used for training
//
// The featurizer is stored with the weights because the weight
// at slot j only means something together with slot j's
// category / scale.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::PipelineConfig;
use crate::ml::model::BinaryModel;

const MODEL_FILE:  &str = "model.json";
const CONFIG_FILE: &str = "pipeline_config.json";

pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    pub fn save_model(&self, model: &BinaryModel) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create model directory '{}'", self.dir.display()))?;

        let path = self.dir.join(MODEL_FILE);
        let json = serde_json::to_string_pretty(model)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::debug!("Saved model to '{}'", path.display());
        Ok(path)
    }

    pub fn load_model(&self) -> Result<BinaryModel> {
        let path = self.dir.join(MODEL_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read model from '{}'. Have you run 'train' first?",
                path.display()
            )
        })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Model file '{}' is corrupt", path.display()))
    }

    pub fn save_config(&self, cfg: &PipelineConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create model directory '{}'", self.dir.display()))?;

        let path = self.dir.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved pipeline config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<PipelineConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{CensusRecord, Column};
    use crate::domain::traits::Estimator;
    use crate::features::FeaturePipeline;
    use crate::ml::model::LinearBinaryModel;

    #[test]
    fn test_model_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model"));

        let mut r = CensusRecord::default();
        r.sex = "Female".to_string();
        let featurizer = FeaturePipeline::new().one_hot(Column::Sex).fit(&[r]).unwrap();
        let model = BinaryModel { featurizer, linear: LinearBinaryModel::new(vec![0.75], -0.25) };

        store.save_model(&model).unwrap();
        assert_eq!(store.load_model().unwrap(), model);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let cfg = PipelineConfig { seed: 7, ..PipelineConfig::default() };

        store.save_config(&cfg).unwrap();
        assert_eq!(store.load_config().unwrap(), cfg);
    }

    #[test]
    fn test_missing_model_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ModelStore::new(dir.path()).load_model().is_err());
    }
}
