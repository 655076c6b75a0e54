//! Shared test utilities for caseflow-db tests.

pub(crate) mod helpers {
    use caseflow_config::WorkflowConfig;
    use caseflow_core::entities::Case;
    use caseflow_core::enums::{CaseComplexity, CaseStatus};

    use crate::CaseDb;
    use crate::service::CaseService;

    /// In-memory service with the default workflow configuration.
    pub async fn test_service() -> CaseService {
        test_service_with(WorkflowConfig::default()).await
    }

    pub async fn test_service_with(config: WorkflowConfig) -> CaseService {
        let db = CaseDb::open_local(":memory:").await.unwrap();
        CaseService::from_db(db, config)
    }

    /// Create a project and return its ID.
    pub async fn test_project(svc: &CaseService) -> String {
        svc.create_project("Cardiology").await.unwrap().id
    }

    /// Create a draft case in `project_id`.
    pub async fn draft_case(svc: &CaseService, project_id: &str) -> Case {
        svc.create_case(project_id, "Chest pain in a 54-year-old", CaseComplexity::Basic)
            .await
            .unwrap()
    }

    /// Force a recorded validation score, bypassing the scorer.
    pub async fn set_score(svc: &CaseService, case_id: &str, score: f64) {
        svc.db()
            .conn()
            .execute(
                "UPDATE cases SET validation_score = ?1, validated = 1, validation_results = '{}' WHERE id = ?2",
                libsql::params![score, case_id],
            )
            .await
            .unwrap();
    }

    /// Force a status, bypassing the workflow.
    pub async fn force_status(svc: &CaseService, case_id: &str, status: CaseStatus) {
        svc.db()
            .conn()
            .execute(
                "UPDATE cases SET status = ?1 WHERE id = ?2",
                libsql::params![status.as_str(), case_id],
            )
            .await
            .unwrap();
    }

    /// A draft case with a passing score, submitted for review.
    pub async fn in_review_case(svc: &CaseService, project_id: &str) -> Case {
        let case = draft_case(svc, project_id).await;
        set_score(svc, &case.id, 92.0).await;
        svc.submit_for_review(&case.id, project_id, "author", None)
            .await
            .unwrap()
    }
}
