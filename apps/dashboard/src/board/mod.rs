//! Dashboard of scored job postings.
//!
//! The board consumes the same remote-resource protocol as the editable
//! collections (`/personas/{id}/jobs`), but postings are ranked by score
//! rather than user-ordered. Bulk dismissal follows the same optimistic
//! all-or-nothing discipline as a collection reorder: remove locally,
//! patch concurrently, roll back wholesale if any patch fails.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::collection::{CollectionRoute, CollectionTransport};
use crate::errors::ApiError;
use crate::models::job::{JobPosting, JobStatus};

/// Count-dependent dismissal confirmation. Callers never surface a zero
/// count: dismissing nothing is a no-op upstream.
pub fn dismissed_message(count: usize) -> String {
    if count == 1 {
        "1 job dismissed.".to_string()
    } else {
        format!("{count} jobs dismissed.")
    }
}

pub struct JobBoard {
    transport: Arc<dyn CollectionTransport>,
    route: CollectionRoute,
    jobs: Vec<JobPosting>,
    is_loading: bool,
    is_dismissing: bool,
    /// Success confirmation after a bulk dismiss, e.g. "2 jobs dismissed."
    status_message: Option<String>,
    board_error: Option<String>,
    detail_error: Option<String>,
}

impl JobBoard {
    pub fn new(transport: Arc<dyn CollectionTransport>, persona_id: Uuid) -> Self {
        Self {
            transport,
            route: CollectionRoute::persona(persona_id, "jobs"),
            jobs: Vec::new(),
            is_loading: false,
            is_dismissing: false,
            status_message: None,
            board_error: None,
            detail_error: None,
        }
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn job(&self, id: Uuid) -> Option<&JobPosting> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_dismissing(&self) -> bool {
        self.is_dismissing
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn board_error(&self) -> Option<&str> {
        self.board_error.as_deref()
    }

    pub fn detail_error(&self) -> Option<&str> {
        self.detail_error.as_deref()
    }

    /// Fetches scored postings, dropping already-dismissed ones and ranking
    /// by score descending. A failed fetch leaves the board empty rather
    /// than blocking the page.
    pub async fn load(&mut self) {
        self.is_loading = true;
        match self.transport.fetch_all(&self.route).await {
            Ok(values) => match parse_jobs(values) {
                Ok(mut jobs) => {
                    jobs.retain(|j| j.status != JobStatus::Dismissed);
                    jobs.sort_by(|a, b| b.score.cmp(&a.score));
                    debug!(count = jobs.len(), "job board loaded");
                    self.jobs = jobs;
                }
                Err(e) => warn!(error = %e, "discarding unreadable job payload"),
            },
            Err(e) => warn!(error = %e, "job fetch failed; board starts empty"),
        }
        self.is_loading = false;
    }

    /// Dismisses the selected postings in one gesture. The removals are
    /// applied optimistically and one status patch per posting is dispatched
    /// concurrently; if any patch fails, every removal is rolled back so the
    /// board never shows a half-applied dismissal. On success the
    /// count-dependent confirmation is set.
    pub async fn dismiss(&mut self, ids: &[Uuid]) {
        let targets: Vec<Uuid> = ids
            .iter()
            .copied()
            .filter(|id| self.jobs.iter().any(|j| j.id == *id))
            .collect();
        if targets.is_empty() {
            return;
        }

        let snapshot = self.jobs.clone();
        self.jobs.retain(|j| !targets.contains(&j.id));
        self.is_dismissing = true;

        let transport = Arc::clone(&self.transport);
        let route = self.route.clone();
        let body = json!({ "status": JobStatus::Dismissed });
        let results = join_all(
            targets
                .iter()
                .map(|id| transport.update(&route, *id, body.clone())),
        )
        .await;

        match results.into_iter().find_map(Result::err) {
            Some(e) => {
                warn!(error = %e, "dismiss batch failed; rolling back");
                self.jobs = snapshot;
                self.board_error = Some(e.friendly_message());
                self.status_message = None;
            }
            None => {
                self.board_error = None;
                self.status_message = Some(dismissed_message(targets.len()));
            }
        }
        self.is_dismissing = false;
    }

    /// Clears the dismissal confirmation once the shell has shown it.
    pub fn acknowledge_status(&mut self) {
        self.status_message = None;
    }

    pub async fn update_status(&mut self, id: Uuid, status: JobStatus) {
        self.patch_job(id, json!({ "status": status })).await;
    }

    pub async fn update_notes(&mut self, id: Uuid, notes: &str) {
        self.patch_job(id, json!({ "notes": notes })).await;
    }

    /// Detail-view edit: one patch, server echo replaces the posting in
    /// place. Failures land in the detail error slot and change nothing.
    async fn patch_job(&mut self, id: Uuid, body: Value) {
        if self.job(id).is_none() {
            warn!(%id, "update requested for unknown posting");
            return;
        }
        match self.transport.update(&self.route, id, body).await {
            Ok(value) => match serde_json::from_value::<JobPosting>(value) {
                Ok(job) => {
                    if let Some(slot) = self.jobs.iter_mut().find(|j| j.id == id) {
                        *slot = job;
                    }
                    self.detail_error = None;
                }
                Err(e) => {
                    warn!(%id, error = %e, "updated posting unreadable");
                    self.detail_error = Some(ApiError::Parse(e).friendly_message());
                }
            },
            Err(e) => {
                warn!(%id, error = %e, "posting update failed");
                self.detail_error = Some(e.friendly_message());
            }
        }
    }
}

fn parse_jobs(values: Vec<Value>) -> Result<Vec<JobPosting>, serde_json::Error> {
    values.into_iter().map(serde_json::from_value).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct FakeJobsApi {
        store: Mutex<Vec<Value>>,
        calls: Mutex<usize>,
        fail_fetch: bool,
        fail_update_ids: Mutex<HashSet<Uuid>>,
    }

    impl FakeJobsApi {
        fn seeded(scores: &[u32]) -> (Arc<FakeJobsApi>, Vec<Uuid>) {
            let mut ids = Vec::new();
            let store: Vec<Value> = scores
                .iter()
                .map(|score| {
                    let id = Uuid::new_v4();
                    ids.push(id);
                    json!({
                        "id": id,
                        "title": format!("Role {score}"),
                        "company": "Acme",
                        "location": null,
                        "url": null,
                        "posted_at": null,
                        "status": "new",
                        "score": score,
                        "score_breakdown": {},
                        "ghost_signals": {},
                        "notes": null,
                    })
                })
                .collect();
            (
                Arc::new(FakeJobsApi {
                    store: Mutex::new(store),
                    ..Default::default()
                }),
                ids,
            )
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl CollectionTransport for FakeJobsApi {
        async fn fetch_all(&self, _route: &CollectionRoute) -> Result<Vec<Value>, ApiError> {
            *self.calls.lock().unwrap() += 1;
            if self.fail_fetch {
                return Err(ApiError::Api {
                    status: 500,
                    code: "UNAVAILABLE".to_string(),
                    message: "down".to_string(),
                });
            }
            Ok(self.store.lock().unwrap().clone())
        }

        async fn create(&self, _route: &CollectionRoute, _body: Value) -> Result<Value, ApiError> {
            unreachable!("the board never creates postings")
        }

        async fn update(
            &self,
            _route: &CollectionRoute,
            id: Uuid,
            body: Value,
        ) -> Result<Value, ApiError> {
            *self.calls.lock().unwrap() += 1;
            if self.fail_update_ids.lock().unwrap().contains(&id) {
                return Err(ApiError::Api {
                    status: 422,
                    code: "VALIDATION_ERROR".to_string(),
                    message: "no".to_string(),
                });
            }
            let mut store = self.store.lock().unwrap();
            let slot = store.iter_mut().find(|v| v["id"] == json!(id)).unwrap();
            for (key, value) in body.as_object().unwrap() {
                slot[key] = value.clone();
            }
            Ok(slot.clone())
        }

        async fn remove(&self, _route: &CollectionRoute, _id: Uuid) -> Result<(), ApiError> {
            unreachable!("the board never deletes postings")
        }
    }

    async fn board(scores: &[u32]) -> (JobBoard, Arc<FakeJobsApi>, Vec<Uuid>) {
        let (api, ids) = FakeJobsApi::seeded(scores);
        let mut board = JobBoard::new(api.clone(), Uuid::new_v4());
        board.load().await;
        (board, api, ids)
    }

    #[test]
    fn test_message_singular_exactly_at_one() {
        assert_eq!(dismissed_message(1), "1 job dismissed.");
        assert_eq!(dismissed_message(2), "2 jobs dismissed.");
        assert_eq!(dismissed_message(17), "17 jobs dismissed.");
    }

    #[tokio::test]
    async fn test_load_ranks_by_score_descending() {
        let (board, _, _) = board(&[40, 90, 65]).await;
        let scores: Vec<u32> = board.jobs().iter().map(|j| j.score).collect();
        assert_eq!(scores, vec![90, 65, 40]);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_board_empty() {
        let api = Arc::new(FakeJobsApi {
            fail_fetch: true,
            ..Default::default()
        });
        let mut board = JobBoard::new(api, Uuid::new_v4());
        board.load().await;
        assert!(board.jobs().is_empty());
        assert!(!board.is_loading());
    }

    #[tokio::test]
    async fn test_dismiss_removes_and_sets_plural_message() {
        let (mut board, _, ids) = board(&[40, 90, 65]).await;
        board.dismiss(&[ids[0], ids[2]]).await;
        assert_eq!(board.jobs().len(), 1);
        assert_eq!(board.status_message(), Some("2 jobs dismissed."));
    }

    #[tokio::test]
    async fn test_dismiss_single_is_singular() {
        let (mut board, _, ids) = board(&[40]).await;
        board.dismiss(&[ids[0]]).await;
        assert_eq!(board.status_message(), Some("1 job dismissed."));
    }

    #[tokio::test]
    async fn test_dismiss_nothing_is_a_no_op_with_no_message() {
        let (mut board, api, _) = board(&[40]).await;
        let calls_before = api.call_count();
        board.dismiss(&[]).await;
        board.dismiss(&[Uuid::new_v4()]).await; // unknown id
        assert_eq!(api.call_count(), calls_before);
        assert!(board.status_message().is_none());
        assert_eq!(board.jobs().len(), 1);
    }

    #[tokio::test]
    async fn test_dismiss_rolls_back_wholesale_on_any_failure() {
        let (api, ids) = FakeJobsApi::seeded(&[40, 90, 65]);
        api.fail_update_ids.lock().unwrap().insert(ids[2]);
        let mut board = JobBoard::new(api.clone(), Uuid::new_v4());
        board.load().await;
        board.dismiss(&[ids[0], ids[2]]).await;
        assert_eq!(board.jobs().len(), 3, "no posting vanishes on failure");
        assert!(board.board_error().is_some());
        assert!(board.status_message().is_none());
    }

    #[tokio::test]
    async fn test_update_notes_replaces_posting_in_place() {
        let (mut board, _, ids) = board(&[40, 90]).await;
        board.update_notes(ids[1], "phone screen Friday").await;
        assert_eq!(
            board.job(ids[1]).unwrap().notes.as_deref(),
            Some("phone screen Friday")
        );
        assert!(board.detail_error().is_none());
    }

    #[tokio::test]
    async fn test_update_failure_sets_detail_error_and_changes_nothing() {
        let (api, ids) = FakeJobsApi::seeded(&[40]);
        api.fail_update_ids.lock().unwrap().insert(ids[0]);
        let mut board = JobBoard::new(api.clone(), Uuid::new_v4());
        board.load().await;
        board.update_status(ids[0], JobStatus::Applied).await;
        assert_eq!(board.job(ids[0]).unwrap().status, JobStatus::New);
        assert!(board.detail_error().is_some());
    }
}
