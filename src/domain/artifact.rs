//! Artifacts produced by the pipeline stages. Each is owned by exactly
//! one video record, written once, never mutated, and deleted with its
//! owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub transcript_id: Uuid,
    pub video_id: Uuid,
    pub full_text: String,
    pub segments: Vec<TranscriptSegment>,
    pub language: String,
    pub confidence_score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    pub name: String,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub summary_id: Uuid,
    pub video_id: Uuid,
    pub executive_summary: String,
    pub key_concepts: Vec<String>,
    pub learning_objectives: Vec<String>,
    pub topics: Vec<Topic>,
    pub difficulty_level: String,
    pub key_takeaways: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clip {
    pub clip_id: Uuid,
    pub video_id: Uuid,
    pub title: String,
    pub description: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub importance_score: f64,
    pub file_path: String,
    pub thumbnail_path: String,
    pub views: u64,
    pub created_at: DateTime<Utc>,
}
