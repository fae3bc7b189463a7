use image::GrayImage;
use log::{debug, info, warn};
use rayon::prelude::*;

use super::ocr::{OcrEngine, OcrOptions};

/// 单个语言假设的识别结果
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionAttempt {
    pub language_hint: String,
    pub text: String,
    pub succeeded: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BestTranscription {
    /// None when every attempt failed or came back empty
    pub language_hint: Option<String>,
    pub text: String,
}

impl BestTranscription {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub struct TranscriptionSelector<'a> {
    engine: &'a dyn OcrEngine,
    options: &'a OcrOptions,
}

impl<'a> TranscriptionSelector<'a> {
    pub fn new(engine: &'a dyn OcrEngine, options: &'a OcrOptions) -> Self {
        Self { engine, options }
    }

    /// 所有语言并行识别，结果按 hint 顺序收集
    pub fn attempt_all(&self, image: &GrayImage, language_hints: &[String]) -> Vec<TranscriptionAttempt> {
        language_hints
            .par_iter()
            .map(|hint| match self.engine.recognize(image, hint, self.options) {
                Ok(text) => {
                    debug!("OCR [{}]: {} chars", hint, text.len());
                    TranscriptionAttempt {
                        language_hint: hint.clone(),
                        text,
                        succeeded: true,
                    }
                }
                Err(e) => {
                    warn!("OCR failed for {}: {}", hint, e);
                    TranscriptionAttempt {
                        language_hint: hint.clone(),
                        text: String::new(),
                        succeeded: false,
                    }
                }
            })
            .collect()
    }

    pub fn select_best(&self, image: &GrayImage, language_hints: &[String]) -> BestTranscription {
        let attempts = self.attempt_all(image, language_hints);
        let best = pick_longest(&attempts);

        match &best.language_hint {
            Some(hint) => info!(
                "Best transcription: {} ({} chars of {} attempts)",
                hint,
                best.text.len(),
                attempts.len()
            ),
            None => warn!("No usable transcription from {} attempts", attempts.len()),
        }

        best
    }
}

/// Longest (in characters) non-empty successful text wins; on equal length the earlier hint is kept.
pub fn pick_longest(attempts: &[TranscriptionAttempt]) -> BestTranscription {
    let mut best = BestTranscription::default();

    for attempt in attempts {
        if !attempt.succeeded || attempt.text.is_empty() {
            continue;
        }
        if attempt.text.chars().count() > best.text.chars().count() {
            best = BestTranscription {
                language_hint: Some(attempt.language_hint.clone()),
                text: attempt.text.clone(),
            };
        }
    }

    best
}
