//! Lifecycle engine
//!
//! [`LifecycleEngine`] ties the pieces together: it validates a stage
//! submission locally, gates it through the navigator, pushes it to the
//! store under a timeout budget, adopts the echoed record, and fans out a
//! stage event. One engine serves any number of records; per-record state
//! lives in the [`Navigator`] the caller holds.

use crate::config::EngineConfig;
use crate::error::{EngineError, SyncError, TransitionError, ValidationError};
use crate::events::{EventBus, StageEvent};
use crate::navigator::Navigator;
use crate::store::RecordStore;
use labtrack_record::{
    Caller, CreationBundle, FieldKey, Request, RequestId, Role, StageFields, StageId,
};
use labtrack_stages::StageRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Coordinates validation, navigation, persistence and events
pub struct LifecycleEngine {
    registry: StageRegistry,
    store: Arc<dyn RecordStore>,
    config: EngineConfig,
    events: EventBus,
}

impl LifecycleEngine {
    /// Create an engine over the given store
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, config: EngineConfig) -> Self {
        Self {
            registry: StageRegistry::with_defaults(),
            store,
            config,
            events: EventBus::new(),
        }
    }

    /// The stage registry this engine evaluates against
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &StageRegistry {
        &self.registry
    }

    /// Register a stage-event subscriber
    #[must_use]
    pub fn subscribe(&self) -> mpsc::Receiver<StageEvent> {
        self.events.subscribe(self.config.event_buffer)
    }

    /// Create a record from the combined stage-1/2 bundle
    ///
    /// Only a Lab In-charge may create requests. Both stages are validated
    /// locally before the store is called; the echoed record arrives with
    /// `current_step` already at stage 3.
    pub async fn create_request(
        &self,
        bundle: CreationBundle,
        caller: &Caller,
    ) -> Result<Navigator, EngineError> {
        if caller.role != Role::LabIncharge {
            return Err(TransitionError::RoleMismatch {
                stage: StageId::REPORT,
                role: caller.role,
                owner: Role::LabIncharge,
            }
            .into());
        }

        let mut draft = Request::new(RequestId::new(), caller.staff_id.clone());
        let report = StageFields::Report(bundle.report.clone());
        let endorsement = StageFields::Endorsement(bundle.endorsements.clone());
        report.apply_to(&mut draft);
        self.validate(StageId::REPORT, &draft)?;
        endorsement.apply_to(&mut draft);
        self.validate(StageId::ENDORSEMENT, &draft)?;

        let echo = self
            .call_store(
                StageId::ENDORSEMENT,
                &endorsement,
                self.store.create(bundle, caller.staff_id.clone()),
            )
            .await?;

        tracing::info!(
            request_id = %echo.id,
            created_by = %caller.staff_id,
            "maintenance request created"
        );
        self.events.publish(StageEvent {
            request_id: echo.id,
            stage_id: StageId::REPORT,
        });
        self.events.publish(StageEvent {
            request_id: echo.id,
            stage_id: StageId::ENDORSEMENT,
        });

        Ok(Navigator::new(echo, self.registry))
    }

    /// Load a navigator over the record's current server state
    pub async fn load(&self, id: RequestId) -> Result<Navigator, EngineError> {
        let record = self
            .store
            .fetch(id)
            .await
            .map_err(|e| EngineError::Sync(match e {
                crate::store::StoreError::NotFound(id) => SyncError::NotFound(id),
                crate::store::StoreError::Transport(reason) => SyncError::Transport {
                    stage: StageId::REPORT,
                    reason,
                    payload: serde_json::Map::new(),
                },
            }))?;
        Ok(Navigator::new(record, self.registry))
    }

    /// Submit one stage's fields on behalf of a caller
    ///
    /// Ordering per attempt: edit gating, local validation, store push under
    /// the timeout budget, echo adoption, event fan-out. On any failure the
    /// navigator's snapshot is left exactly as it was and the field payload
    /// rides back in the error for resubmission.
    pub async fn submit_stage(
        &self,
        nav: &mut Navigator,
        fields: StageFields,
        caller: &Caller,
    ) -> Result<(), EngineError> {
        let stage = fields.stage_id();
        nav.can_edit(stage, caller)?;

        let mut draft = nav.record().clone();
        fields.apply_to(&mut draft);
        self.validate(stage, &draft)?;

        nav.begin_submission()?;
        let pushed = self
            .call_store(stage, &fields, self.store.update_stage(nav.record().id, fields.clone()))
            .await;
        nav.finish_submission();
        let mut echo = pushed?;

        // Completion derives the equipment status server-side; pick it up
        // with a full re-fetch rather than trusting the write echo
        if stage == StageId::COMPLETION && self.config.refetch_on_completion {
            match self.store.fetch(echo.id).await {
                Ok(fresh) => echo = fresh,
                Err(err) => {
                    tracing::warn!(
                        request_id = %echo.id,
                        error = %err,
                        "completion re-fetch failed, keeping the write echo"
                    );
                }
            }
        }

        tracing::info!(
            request_id = %echo.id,
            stage = %stage,
            role = %caller.role,
            current_step = %echo.current_step,
            completed_steps = echo.completed_steps,
            "stage submission accepted"
        );
        let request_id = echo.id;
        nav.sync_with(echo);
        self.events.publish(StageEvent {
            request_id,
            stage_id: stage,
        });
        Ok(())
    }

    /// Local completeness check against the stage's required fields
    ///
    /// Admin approval validates on a decision being present, mirroring its
    /// completion exception.
    fn validate(&self, stage: StageId, draft: &Request) -> Result<(), ValidationError> {
        if stage == StageId::APPROVAL {
            let decided = draft
                .admin_approval_status
                .is_some_and(|s| s.is_decided());
            if decided {
                return Ok(());
            }
            return Err(ValidationError {
                stage,
                missing: vec![FieldKey::AdminApprovalStatus],
            });
        }

        let missing: Vec<FieldKey> = self
            .registry
            .get(stage)
            .map(|s| s.required)
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|&k| !draft.field_is_populated(k))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            tracing::debug!(stage = %stage, missing = missing.len(), "stage validation failed");
            Err(ValidationError { stage, missing })
        }
    }

    /// Run one store call under the configured timeout budget
    async fn call_store<F>(
        &self,
        stage: StageId,
        fields: &StageFields,
        fut: F,
    ) -> Result<Request, EngineError>
    where
        F: std::future::Future<Output = Result<Request, crate::store::StoreError>>,
    {
        let budget = Duration::from_secs(self.config.submit_timeout_secs);
        match tokio::time::timeout(budget, fut).await {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(store_err)) => {
                let err = store_err.into_sync_error(stage, fields);
                tracing::warn!(stage = %stage, error = %err, "stage submission failed");
                Err(err.into())
            }
            Err(_) => {
                tracing::warn!(
                    stage = %stage,
                    secs = self.config.submit_timeout_secs,
                    "stage submission timed out"
                );
                Err(SyncError::Timeout {
                    stage,
                    secs: self.config.submit_timeout_secs,
                    payload: fields.payload(),
                }
                .into())
            }
        }
    }
}

impl std::fmt::Debug for LifecycleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleEngine")
            .field("config", &self.config)
            .field("subscribers", &self.events.subscriber_count())
            .finish_non_exhaustive()
    }
}
