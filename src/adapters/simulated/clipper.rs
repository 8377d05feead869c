use crate::domain::artifact::{Clip, Summary};
use crate::error::Result;
use crate::ports::stage::ClipEngine;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

const CLIP_LENGTH_SECS: f64 = 10.0;

/// Fabricates one clip record per summary topic after a configurable
/// delay. No media is actually cut; the file paths are placeholders the
/// stage seam would fill in with a real transcoder.
pub struct SimulatedClipper {
    stage_delay: Duration,
}

impl SimulatedClipper {
    pub fn new(stage_delay: Duration) -> Self {
        Self { stage_delay }
    }
}

#[async_trait]
impl ClipEngine for SimulatedClipper {
    async fn generate_clips(&self, video_id: Uuid, summary: &Summary) -> Result<Vec<Clip>> {
        tokio::time::sleep(self.stage_delay).await;

        let clips = summary
            .topics
            .iter()
            .enumerate()
            .map(|(i, topic)| {
                let clip_id = Uuid::new_v4();
                Clip {
                    clip_id,
                    video_id,
                    title: topic.name.clone(),
                    description: format!("Focused clip on {}", topic.name),
                    start_time: topic.timestamp,
                    end_time: topic.timestamp + CLIP_LENGTH_SECS,
                    duration: CLIP_LENGTH_SECS,
                    importance_score: 0.8 - (i as f64 * 0.1),
                    file_path: format!("clips/clip_{}.mp4", clip_id),
                    thumbnail_path: format!("thumbnails/thumb_{}.jpg", clip_id),
                    views: 0,
                    created_at: Utc::now(),
                }
            })
            .collect();

        Ok(clips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::Topic;

    fn summary_with_topics(video_id: Uuid, names: &[&str]) -> Summary {
        Summary {
            summary_id: Uuid::new_v4(),
            video_id,
            executive_summary: String::new(),
            key_concepts: vec![],
            learning_objectives: vec![],
            topics: names
                .iter()
                .enumerate()
                .map(|(i, name)| Topic {
                    name: name.to_string(),
                    timestamp: i as f64 * 5.0,
                })
                .collect(),
            difficulty_level: "intermediate".to_string(),
            key_takeaways: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn one_clip_per_topic_with_decreasing_importance() {
        let video_id = Uuid::new_v4();
        let summary = summary_with_topics(video_id, &["Intro", "Middle", "Outro"]);

        let clips = SimulatedClipper::new(Duration::ZERO)
            .generate_clips(video_id, &summary)
            .await
            .unwrap();

        assert_eq!(clips.len(), 3);
        for (i, clip) in clips.iter().enumerate() {
            assert_eq!(clip.video_id, video_id);
            assert_eq!(clip.title, summary.topics[i].name);
            assert_eq!(clip.start_time, summary.topics[i].timestamp);
            assert_eq!(clip.end_time, clip.start_time + CLIP_LENGTH_SECS);
            assert!((clip.importance_score - (0.8 - i as f64 * 0.1)).abs() < 1e-9);
        }
    }
}
