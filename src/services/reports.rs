//! Logistics analytics

use chrono::{NaiveDate, Utc};

use crate::{
    api::reports::{LogisticsReport, StatEntry},
    models::{
        enums::{Category, RequestStatus},
        material_request::{MaterialRequest, MaterialRequestView},
    },
    repository::Repository,
};

/// Requests still out with a facilitator
pub fn unreturned_count(requests: &[MaterialRequest]) -> usize {
    requests
        .iter()
        .filter(|r| r.status == RequestStatus::Issued)
        .count()
}

pub fn overdue_count(requests: &[MaterialRequest], today: NaiveDate) -> usize {
    requests.iter().filter(|r| r.is_overdue(today)).count()
}

/// Share of requests that reached `Returned`, in percent; 100 for no requests
pub fn compliance_rate(requests: &[MaterialRequest]) -> f64 {
    if requests.is_empty() {
        return 100.0;
    }
    let returned = requests
        .iter()
        .filter(|r| r.status == RequestStatus::Returned)
        .count();
    returned as f64 * 100.0 / requests.len() as f64
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn logistics_report(&self) -> LogisticsReport {
        let today = Utc::now().date_naive();
        let requests = self.repository.material_requests.list().await;

        let by_status = RequestStatus::ALL
            .iter()
            .map(|status| StatEntry {
                label: status.to_string(),
                value: requests.iter().filter(|r| r.status == *status).count() as i64,
            })
            .collect();

        let categories = [
            Category::TeachingAid,
            Category::Stationery,
            Category::Ict,
            Category::Equipment,
            Category::Other,
        ];
        let by_category = categories
            .iter()
            .map(|category| StatEntry {
                label: category.to_string(),
                value: requests.iter().filter(|r| r.category == *category).count() as i64,
            })
            .filter(|entry| entry.value > 0)
            .collect();

        let overdue_items = requests
            .iter()
            .filter(|r| r.is_overdue(today))
            .cloned()
            .map(|r| MaterialRequestView::new(r, today))
            .collect();

        let classrooms_needing_attention = self
            .repository
            .inventories
            .list()
            .await
            .iter()
            .map(|i| i.summary())
            .filter(|s| s.needs_attention)
            .collect();

        let latest_safety_summary = self
            .repository
            .safety_inspections
            .latest()
            .await
            .map(|i| i.summary());

        LogisticsReport {
            total_requests: requests.len() as i64,
            unreturned: unreturned_count(&requests) as i64,
            overdue: overdue_count(&requests, today) as i64,
            compliance_rate: compliance_rate(&requests),
            by_status,
            by_category,
            overdue_items,
            classrooms_needing_attention,
            latest_safety_summary,
        }
    }
}
