use crate::domain::artifact::{Summary, Topic, Transcript};
use crate::error::Result;
use crate::ports::stage::AnalysisEngine;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Produces a canned study summary after a configurable delay.
pub struct SimulatedAnalyzer {
    stage_delay: Duration,
}

impl SimulatedAnalyzer {
    pub fn new(stage_delay: Duration) -> Self {
        Self { stage_delay }
    }
}

#[async_trait]
impl AnalysisEngine for SimulatedAnalyzer {
    async fn summarize(&self, video_id: Uuid, _transcript: &Transcript) -> Result<Summary> {
        tokio::time::sleep(self.stage_delay).await;

        Ok(Summary {
            summary_id: Uuid::new_v4(),
            video_id,
            executive_summary: "This video covers fundamental concepts with practical examples. \
                                Perfect for beginners and intermediate learners."
                .to_string(),
            key_concepts: vec![
                "Fundamental principles".to_string(),
                "Practical applications".to_string(),
                "Best practices".to_string(),
                "Common pitfalls to avoid".to_string(),
            ],
            learning_objectives: vec![
                "Understand core concepts".to_string(),
                "Apply knowledge practically".to_string(),
                "Develop problem-solving skills".to_string(),
            ],
            topics: vec![
                topic("Introduction", 0.0),
                topic("Main Content", 5.0),
                topic("Examples", 15.0),
                topic("Conclusion", 25.0),
            ],
            difficulty_level: "intermediate".to_string(),
            key_takeaways: vec![
                "Core concept mastery is essential".to_string(),
                "Practice with real examples".to_string(),
                "Continuous learning is key".to_string(),
            ],
            created_at: Utc::now(),
        })
    }
}

fn topic(name: &str, timestamp: f64) -> Topic {
    Topic {
        name: name.to_string(),
        timestamp,
    }
}
