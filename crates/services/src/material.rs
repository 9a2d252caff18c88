use std::sync::Arc;

use crate::api::StudyApi;
use crate::error::MaterialQaError;

/// Asks free-form questions about pasted study material.
///
/// Thin wrapper over the remote answer endpoint; the material itself is
/// never stored here.
pub struct MaterialQaService {
    api: Arc<dyn StudyApi>,
}

impl MaterialQaService {
    #[must_use]
    pub fn new(api: Arc<dyn StudyApi>) -> Self {
        Self { api }
    }

    /// Answers `question` using only the given material.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMaterial`/`EmptyQuestion` for blank input (no request is
    /// made) and `MaterialQaError::Api` when the call fails.
    pub async fn ask(&self, material: &str, question: &str) -> Result<String, MaterialQaError> {
        if material.trim().is_empty() {
            return Err(MaterialQaError::EmptyMaterial);
        }
        if question.trim().is_empty() {
            return Err(MaterialQaError::EmptyQuestion);
        }
        Ok(self.api.ask_material(material, question).await?)
    }
}
