//! In-Memory Branch Registry Implementation

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{BranchRecord, BranchRegistryPort};
use crate::domain::branch::BranchId;
use crate::domain::story::StoryId;

/// 内存分支登记表，键为 (story_id, branch_id)
pub struct InMemoryBranchRegistry {
    branches: DashMap<(StoryId, BranchId), BranchRecord>,
}

impl InMemoryBranchRegistry {
    pub fn new() -> Self {
        Self {
            branches: DashMap::new(),
        }
    }
}

impl Default for InMemoryBranchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BranchRegistryPort for InMemoryBranchRegistry {
    async fn register(&self, record: BranchRecord) {
        let key = (record.story_id.clone(), record.branch.id.clone());
        tracing::debug!(
            story_id = %record.story_id,
            branch_id = %record.branch.id,
            "Branch registered"
        );
        self.branches.insert(key, record);
    }

    async fn find(&self, story_id: &StoryId, branch_id: &BranchId) -> Option<BranchRecord> {
        self.branches
            .get(&(story_id.clone(), branch_id.clone()))
            .map(|r| r.clone())
    }
}
