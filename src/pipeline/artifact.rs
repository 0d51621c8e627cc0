//! Versioned persistence for the vectorizer/classifier pair.
//!
//! Each artifact is a bincode blob wrapped in an envelope carrying a magic
//! tag and a format version, so a loader can reject foreign or stale files
//! instead of deserializing garbage. The two artifacts are written and
//! loaded together: a pair whose vocabulary size and feature count disagree
//! is rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::classifier::MultinomialNb;
use crate::error::{AffError, Result};
use crate::feature::Vocabulary;

use super::PipelineConfig;

/// Magic tag for the vectorizer artifact.
const VECTORIZER_MAGIC: [u8; 4] = *b"AFFV";
/// Magic tag for the classifier artifact.
const CLASSIFIER_MAGIC: [u8; 4] = *b"AFFM";
/// Current artifact format version.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    magic: [u8; 4],
    version: u32,
    payload: T,
}

fn write_artifact<T: Serialize>(path: &Path, magic: [u8; 4], payload: &T) -> Result<()> {
    let envelope = Envelope {
        magic,
        version: FORMAT_VERSION,
        payload,
    };
    let bytes = bincode::serialize(&envelope)
        .map_err(|e| AffError::serialization(format!("encoding {}: {e}", path.display())))?;
    fs::write(path, bytes)?;
    Ok(())
}

fn read_artifact<T: DeserializeOwned>(path: &Path, magic: [u8; 4]) -> Result<T> {
    let bytes = fs::read(path)?;
    let envelope: Envelope<T> = bincode::deserialize(&bytes)
        .map_err(|e| AffError::serialization(format!("decoding {}: {e}", path.display())))?;

    if envelope.magic != magic {
        return Err(AffError::artifact(format!(
            "{} has wrong magic tag",
            path.display()
        )));
    }
    if envelope.version != FORMAT_VERSION {
        return Err(AffError::artifact(format!(
            "{} has unsupported format version {}",
            path.display(),
            envelope.version
        )));
    }

    Ok(envelope.payload)
}

/// Persist the fitted pair to the configured model directory.
pub fn save_pair(
    config: &PipelineConfig,
    vocabulary: &Vocabulary,
    model: &MultinomialNb,
) -> Result<()> {
    if vocabulary.len() != model.n_features() {
        return Err(AffError::artifact(format!(
            "refusing to save mismatched pair: vocabulary {} vs model {} features",
            vocabulary.len(),
            model.n_features()
        )));
    }

    fs::create_dir_all(&config.model_dir)?;
    write_artifact(&config.vectorizer_path(), VECTORIZER_MAGIC, vocabulary)?;
    write_artifact(&config.classifier_path(), CLASSIFIER_MAGIC, model)?;
    Ok(())
}

/// Load the persisted pair, verifying that it is matched.
///
/// Missing artifacts surface as [`AffError::NotTrained`] so callers can tell
/// "train first" apart from a corrupted file.
pub fn load_pair(config: &PipelineConfig) -> Result<(Vocabulary, MultinomialNb)> {
    let vectorizer_path = config.vectorizer_path();
    let classifier_path = config.classifier_path();

    if !vectorizer_path.exists() || !classifier_path.exists() {
        return Err(AffError::not_trained(format!(
            "model artifacts not found in {}; run the train command first",
            config.model_dir.display()
        )));
    }

    let vocabulary: Vocabulary = read_artifact(&vectorizer_path, VECTORIZER_MAGIC)?;
    let model: MultinomialNb = read_artifact(&classifier_path, CLASSIFIER_MAGIC)?;

    if vocabulary.len() != model.n_features() {
        return Err(AffError::artifact(format!(
            "artifact pair mismatch: vocabulary has {} terms, model expects {}",
            vocabulary.len(),
            model.n_features()
        )));
    }

    Ok((vocabulary, model))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted_pair() -> (Vocabulary, MultinomialNb) {
        let vocabulary =
            Vocabulary::from_terms(vec!["urgent".to_string(), "meeting".to_string()]);
        let model = MultinomialNb::fit(&[vec![2, 0], vec![0, 2]], &[1, 0]).unwrap();
        (vocabulary, model)
    }

    #[test]
    fn test_save_and_load_pair() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path().join("models"));
        let (vocabulary, model) = fitted_pair();

        save_pair(&config, &vocabulary, &model).unwrap();
        let (loaded_vocab, loaded_model) = load_pair(&config).unwrap();

        assert_eq!(loaded_vocab.len(), 2);
        assert_eq!(loaded_vocab.get("urgent"), Some(0));
        assert_eq!(loaded_model.n_features(), 2);
        assert_eq!(loaded_model.predict(&[3, 0]).unwrap(), 1);
    }

    #[test]
    fn test_missing_artifacts_are_not_trained() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path().join("empty"));

        let err = load_pair(&config).unwrap_err();
        assert!(matches!(err, AffError::NotTrained(_)));
    }

    #[test]
    fn test_swapped_magic_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path());
        let (vocabulary, model) = fitted_pair();
        save_pair(&config, &vocabulary, &model).unwrap();

        // Swap the files: the magic tags no longer match the expected slot.
        fs::rename(config.vectorizer_path(), dir.path().join("tmp")).unwrap();
        fs::rename(config.classifier_path(), config.vectorizer_path()).unwrap();
        fs::rename(dir.path().join("tmp"), config.classifier_path()).unwrap();

        let err = load_pair(&config).unwrap_err();
        assert!(matches!(
            err,
            AffError::Artifact(_) | AffError::Serialization(_)
        ));
    }

    #[test]
    fn test_save_rejects_mismatched_pair() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(dir.path());
        let vocabulary = Vocabulary::from_terms(vec!["only".to_string()]);
        let (_, model) = fitted_pair();

        let err = save_pair(&config, &vocabulary, &model).unwrap_err();
        assert!(matches!(err, AffError::Artifact(_)));
    }
}
