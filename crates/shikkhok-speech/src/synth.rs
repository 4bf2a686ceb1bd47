//! Text-to-speech synthesis.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// The translate TTS endpoint accepts at most ~200 characters per request.
const MAX_CHUNK_CHARS: usize = 200;

/// A synthesized audio clip.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Encoded audio bytes.
    pub bytes: Vec<u8>,
    /// MIME type of the encoding.
    pub mime: String,
}

/// Best-effort text-to-speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` in the language `lang`. `None` on any failure.
    async fn synthesize(&self, text: &str, lang: &str) -> Option<AudioClip>;
}

/// Synthesizer backed by the public translate TTS endpoint.
pub struct GttsSynthesizer {
    client: reqwest::Client,
    base_url: String,
}

impl GttsSynthesizer {
    /// Create a synthesizer with a short request timeout.
    pub fn new() -> Self {
        Self::with_base_url("https://translate.google.com/translate_tts")
    }

    /// Create a synthesizer against a specific endpoint (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_chunk(&self, chunk: &str, lang: &str) -> Option<Vec<u8>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("q", chunk),
            ])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "tts request rejected");
            return None;
        }
        response.bytes().await.ok().map(|b| b.to_vec())
    }
}

impl Default for GttsSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for GttsSynthesizer {
    async fn synthesize(&self, text: &str, lang: &str) -> Option<AudioClip> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        // Concatenated MP3 frames play back as one clip
        let mut bytes = Vec::new();
        for chunk in chunk_text(text, MAX_CHUNK_CHARS) {
            match self.fetch_chunk(&chunk, lang).await {
                Some(audio) => bytes.extend(audio),
                None => {
                    debug!(lang, "speech synthesis failed, dropping clip");
                    return None;
                }
            }
        }

        Some(AudioClip {
            bytes,
            mime: "audio/mpeg".to_string(),
        })
    }
}

/// Split text into chunks of at most `max_chars`, preferring word boundaries.
fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        // A single word longer than the limit is split hard
        if word_len > max_chars {
            for piece in word.chars().collect::<Vec<_>>().chunks(max_chars) {
                if current_len > 0 {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.extend(piece);
                current_len = piece.len();
            }
        } else {
            current.push_str(word);
            current_len += word_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
