use crate::domain::artifact::{Transcript, TranscriptSegment};
use crate::domain::video::MediaHandle;
use crate::error::Result;
use crate::ports::stage::TranscriptionEngine;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Produces a canned transcript after a configurable delay standing in
/// for real speech-to-text inference.
pub struct SimulatedTranscriber {
    stage_delay: Duration,
}

impl SimulatedTranscriber {
    pub fn new(stage_delay: Duration) -> Self {
        Self { stage_delay }
    }
}

#[async_trait]
impl TranscriptionEngine for SimulatedTranscriber {
    async fn transcribe(&self, video_id: Uuid, _media: &MediaHandle) -> Result<Transcript> {
        tokio::time::sleep(self.stage_delay).await;

        Ok(Transcript {
            transcript_id: Uuid::new_v4(),
            video_id,
            full_text: "This is a simulated transcript of the video content. In production, \
                        this would be generated by Whisper AI."
                .to_string(),
            segments: vec![
                segment(0.0, 5.0, "Introduction to the topic"),
                segment(5.0, 15.0, "Main concept explanation"),
                segment(15.0, 25.0, "Detailed examples and use cases"),
                segment(25.0, 30.0, "Conclusion and summary"),
            ],
            language: "en".to_string(),
            confidence_score: 0.95,
            created_at: Utc::now(),
        })
    }
}

fn segment(start: f64, end: f64, text: &str) -> TranscriptSegment {
    TranscriptSegment {
        start,
        end,
        text: text.to_string(),
    }
}
