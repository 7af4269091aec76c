//! IndicTrans2 and NLLB backends on the HuggingFace Inference API.

use async_trait::async_trait;

use super::{TranslationBackend, TranslationMethod};
use crate::Result;
use crate::providers::HuggingFaceClient;
use crate::types::Language;

/// IndicTrans2 English-to-Indic model.
pub const INDICTRANS2_MODEL: &str = "ai4bharat/indictrans2-en-indic-1B";

/// NLLB-200 distilled model.
pub const NLLB_MODEL: &str = "facebook/nllb-200-distilled-600M";

/// Seq2seq translation through a hosted model.
///
/// Both models take FLORES-200 language codes; available whenever the
/// client has an API key.
#[derive(Clone)]
pub struct HfTranslator {
    client: HuggingFaceClient,
    method: TranslationMethod,
    model: String,
}

impl HfTranslator {
    /// IndicTrans2 backend.
    pub fn indictrans2(client: HuggingFaceClient) -> Self {
        Self {
            client,
            method: TranslationMethod::IndicTrans2,
            model: INDICTRANS2_MODEL.to_string(),
        }
    }

    /// NLLB backend.
    pub fn nllb(client: HuggingFaceClient) -> Self {
        Self {
            client,
            method: TranslationMethod::Nllb,
            model: NLLB_MODEL.to_string(),
        }
    }

    /// Override the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl TranslationBackend for HfTranslator {
    fn name(&self) -> &str {
        self.method.as_str()
    }

    fn method(&self) -> TranslationMethod {
        self.method
    }

    fn is_available(&self) -> bool {
        self.client.has_api_key()
    }

    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        self.client
            .translate(
                text,
                &self.model,
                Language::English.flores_code(),
                target.flores_code(),
            )
            .await
    }
}
