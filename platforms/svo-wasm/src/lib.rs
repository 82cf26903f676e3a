use serde::Serialize;
use svo_conll::{ConllReader, LabelScheme};
use svo_extractor::{ExtractorConfig, SentenceReport, SvoExtractor};
use svo_protocol::SentenceRecord;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Reports plus the sentences that could not be analysed.
#[derive(Serialize)]
pub struct AnalysisReport {
    pub sentences: Vec<SentenceReport>,
    pub errors: Vec<String>,
}

/// Extraction engine exposed to JavaScript.
#[wasm_bindgen]
pub struct SvoEngine {
    extractor: SvoExtractor,
}

#[wasm_bindgen]
impl SvoEngine {
    /// `config` is an optional JSON extractor configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<SvoEngine, JsError> {
        let config = match config {
            Some(json) => ExtractorConfig::from_json(&json)?,
            None => ExtractorConfig::default(),
        };
        Ok(Self { extractor: SvoExtractor::new(config) })
    }

    /// Analyse one sentence record (the JSON shape of `SentenceRecord`).
    pub fn analyze(&self, sentence: JsValue) -> Result<JsValue, JsError> {
        let record: SentenceRecord = serde_wasm_bindgen::from_value(sentence)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let report = self.extractor.analyze(&record)?;
        serde_wasm_bindgen::to_value(&report).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Analyse every sentence of a CoNLL document.
    pub fn analyze_conll(&self, text: &str, universal_labels: bool) -> Result<JsValue, JsError> {
        let report = self.analyze_document(text, universal_labels)?;
        serde_wasm_bindgen::to_value(&report).map_err(|e| JsError::new(&e.to_string()))
    }
}

impl SvoEngine {
    fn analyze_document(
        &self,
        text: &str,
        universal_labels: bool,
    ) -> Result<AnalysisReport, svo_conll::ConllError> {
        let scheme = if universal_labels { LabelScheme::UniversalV2 } else { LabelScheme::Clear };
        let records = ConllReader::new(scheme).read(text)?;

        let mut report = AnalysisReport { sentences: Vec::new(), errors: Vec::new() };
        for record in &records {
            match self.extractor.analyze(record) {
                Ok(sentence) => report.sentences.push(sentence),
                Err(err) => report.errors.push(format!("sentence {}: {}", record.id, err)),
            }
        }
        Ok(report)
    }
}
