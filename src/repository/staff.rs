//! Staff directory

use std::sync::Arc;

use tokio::sync::RwLock;

use super::snapshots::{SnapshotWriter, STAFF_LIST_KEY};
use crate::models::staff::StaffMember;

#[derive(Clone)]
pub struct StaffDirectory {
    members: Arc<RwLock<Vec<StaffMember>>>,
    writer: SnapshotWriter,
}

impl StaffDirectory {
    pub fn new(members: Vec<StaffMember>, writer: SnapshotWriter) -> Self {
        Self {
            members: Arc::new(RwLock::new(members)),
            writer,
        }
    }

    pub async fn list(&self) -> Vec<StaffMember> {
        self.members.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<StaffMember> {
        self.members.read().await.iter().find(|m| m.id == id).cloned()
    }

    /// Insert or replace by id; returns true when the member is new
    pub async fn upsert(&self, member: StaffMember) -> bool {
        let mut members = self.members.write().await;
        let created = match members.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => {
                *existing = member;
                false
            }
            None => {
                members.push(member);
                true
            }
        };
        self.writer.save(STAFF_LIST_KEY, members.as_slice());
        created
    }
}
