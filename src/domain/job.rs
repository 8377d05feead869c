use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Queue message telling a worker to run the pipeline for one video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Job {
    ProcessVideo(ProcessVideoJob),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessVideoJob {
    pub id: Uuid,
    pub video_id: Uuid,
}

impl ProcessVideoJob {
    pub fn for_video(video_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            video_id,
        }
    }
}
