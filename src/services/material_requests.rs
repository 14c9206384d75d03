//! Material request lifecycle service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        material_request::{
            CreateMaterialRequest, MaterialRequest, MaterialRequestQuery, MaterialRequestView,
            Transition,
        },
        staff::StaffRef,
    },
    repository::Repository,
};

const UNKNOWN_STAFF: &str = "Unknown Staff";

#[derive(Clone)]
pub struct MaterialRequestsService {
    repository: Repository,
}

impl MaterialRequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List requests, newest first
    pub async fn list(&self, query: &MaterialRequestQuery) -> Vec<MaterialRequestView> {
        let today = Utc::now().date_naive();
        self.repository
            .material_requests
            .list()
            .await
            .into_iter()
            .filter(|r| query.status.map_or(true, |s| r.status == s))
            .filter(|r| query.staff_id.as_deref().map_or(true, |id| r.staff_id == id))
            .map(|r| MaterialRequestView::new(r, today))
            .filter(|v| query.overdue.map_or(true, |o| v.is_overdue == o))
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<MaterialRequestView> {
        let request = self.repository.material_requests.get_by_id(id).await?;
        Ok(MaterialRequestView::new(request, Utc::now().date_naive()))
    }

    /// Submit a new request (status Pending)
    pub async fn submit(&self, input: CreateMaterialRequest) -> AppResult<MaterialRequest> {
        let staff_name = match self.repository.staff.get(&input.staff_id).await {
            Some(member) => member.name,
            None => {
                tracing::warn!(staff_id = %input.staff_id, "Request submitted for unknown staff id");
                UNKNOWN_STAFF.to_string()
            }
        };

        let request = MaterialRequest::submit(input, staff_name, Utc::now())?;
        let request = self.repository.material_requests.insert(request).await;

        tracing::info!(
            request_id = %request.id,
            item = %request.item_name,
            quantity = request.quantity_requested,
            "Material request submitted"
        );
        Ok(request)
    }

    /// Move a request to its next lifecycle state.
    ///
    /// `expected_version`, when given, must match the stored version.
    pub async fn transition(
        &self,
        id: Uuid,
        transition: Transition,
        actor: &StaffRef,
        expected_version: Option<u32>,
    ) -> AppResult<MaterialRequest> {
        let current = self.repository.material_requests.get_by_id(id).await?;

        if let Some(expected) = expected_version {
            if expected != current.version {
                return Err(AppError::Conflict(format!(
                    "Material request {} is at version {}, not {}",
                    id, current.version, expected
                )));
            }
        }

        let now = Utc::now();
        let next = current
            .apply(&transition, actor, now.date_naive())
            .map_err(|e| {
                tracing::warn!(request_id = %id, action = transition.action(), error = %e, "Transition rejected");
                e
            })?;

        let stored = self
            .repository
            .material_requests
            .replace(next, current.version, now)
            .await?;

        tracing::info!(
            request_id = %id,
            action = transition.action(),
            status = %stored.status,
            actor = %actor.name,
            "Material request updated"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::models::enums::{
        Category, Priority, Purpose, RequestStatus, ReturnCondition, ReturnStatus,
        SupplyCondition, UsageDuration,
    };
    use crate::models::staff::{StaffMember, StaffRole};
    use crate::repository::snapshots::{
        MemorySnapshotSink, MockSnapshotSink, MATERIAL_REQUESTS_KEY,
    };

    fn staff() -> Vec<StaffMember> {
        vec![StaffMember {
            id: "st-1".into(),
            name: "Ama Mensah".into(),
            role: StaffRole::Facilitator,
        }]
    }

    fn manager() -> StaffRef {
        StaffRef {
            staff_id: "mgr".into(),
            name: "Logistics Manager".into(),
        }
    }

    fn projector(staff_id: &str) -> CreateMaterialRequest {
        CreateMaterialRequest {
            staff_id: staff_id.into(),
            item_name: "Projector".into(),
            category: Category::Ict,
            purpose: Purpose::Teaching,
            quantity_requested: Some(1),
            date_requested: None,
            date_required: None,
            usage_duration: UsageDuration::Temporary,
            priority: Priority::Medium,
            remarks: String::new(),
        }
    }

    async fn service() -> MaterialRequestsService {
        let repository = Repository::load(Arc::new(MemorySnapshotSink::new()), staff())
            .await
            .unwrap();
        MaterialRequestsService::new(repository)
    }

    #[tokio::test]
    async fn test_submit_caches_staff_name() {
        let service = service().await;
        let known = service.submit(projector("st-1")).await.unwrap();
        assert_eq!(known.staff_name, "Ama Mensah");

        let unknown = service.submit(projector("ghost")).await.unwrap();
        assert_eq!(unknown.staff_name, UNKNOWN_STAFF);
    }

    #[tokio::test]
    async fn test_invalid_submission_creates_nothing() {
        let service = service().await;
        let mut input = projector("st-1");
        input.item_name = "".into();
        assert!(service.submit(input).await.is_err());
        assert!(service.list(&MaterialRequestQuery::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let service = service().await;
        let request = service.submit(projector("st-1")).await.unwrap();

        let approved = service
            .transition(request.id, Transition::Approve { approved_quantity: Some(1) }, &manager(), Some(1))
            .await
            .unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);
        assert_eq!(approved.version, 2);

        let issued = service
            .transition(
                request.id,
                Transition::Issue {
                    expected_return_date: None,
                    condition_on_supply: SupplyCondition::Good,
                    store_source: Some("Main Store".into()),
                },
                &manager(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(issued.status, RequestStatus::Issued);

        let returned = service
            .transition(
                request.id,
                Transition::Return {
                    quantity_returned: None,
                    condition_on_return: ReturnCondition::Good,
                    loss_description: None,
                },
                &manager(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(returned.return_record.unwrap().return_status, ReturnStatus::Completed);
    }

    #[tokio::test]
    async fn test_stale_expected_version_is_rejected() {
        let service = service().await;
        let request = service.submit(projector("st-1")).await.unwrap();

        let result = service
            .transition(request.id, Transition::Decline, &manager(), Some(7))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(service.get(request.id).await.unwrap().request.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_every_accepted_change_is_persisted() {
        let saves = Arc::new(AtomicUsize::new(0));
        let counter = saves.clone();
        let mut sink = MockSnapshotSink::new();
        sink.expect_load().returning(|_| Ok(None));
        sink.expect_save().returning(move |key, _| {
            if key == MATERIAL_REQUESTS_KEY {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        });

        let repository = Repository::load(Arc::new(sink), staff()).await.unwrap();
        let service = MaterialRequestsService::new(repository.clone());

        let request = service.submit(projector("st-1")).await.unwrap();
        service
            .transition(request.id, Transition::Decline, &manager(), None)
            .await
            .unwrap();
        // rejected: nothing saved
        assert!(service
            .transition(request.id, Transition::Decline, &manager(), None)
            .await
            .is_err());

        repository.writer.flush().await;
        assert_eq!(saves.load(Ordering::SeqCst), 2);
    }
}
