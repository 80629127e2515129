//! End-to-end lifecycle walks against the in-memory store

use labtrack_engine::{EngineConfig, EngineError, LifecycleEngine, MemoryStore, TransitionError};
use labtrack_record::{ApprovalStatus, Approval, EquipmentStatus, StageFields, StageId};
use labtrack_test_utils as fixtures;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn engine() -> LifecycleEngine {
    LifecycleEngine::new(Arc::new(MemoryStore::new()), EngineConfig::new())
}

#[tokio::test]
async fn creation_completes_first_two_stages() {
    let engine = engine();
    let nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();

    assert_eq!(nav.record().completed_steps, 2);
    assert_eq!(nav.record().current_step, StageId::VERIFICATION);
    assert_eq!(nav.completed(), 2);
    assert_eq!(nav.position(), StageId::VERIFICATION);
}

#[tokio::test]
async fn only_lab_incharge_may_create() {
    let engine = engine();
    let err = engine
        .create_request(fixtures::creation_bundle(), &fixtures::maintenance())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Transition(TransitionError::RoleMismatch { .. })
    ));
}

#[tokio::test]
async fn creation_with_blank_required_field_fails_locally() {
    let engine = engine();
    let mut bundle = fixtures::creation_bundle();
    bundle.report.complaint_details = "   ".to_string();

    let err = engine
        .create_request(bundle, &fixtures::lab_incharge())
        .await
        .unwrap_err();
    match err {
        EngineError::Validation(v) => {
            assert_eq!(v.stage, StageId::REPORT);
            assert_eq!(v.missing, vec![labtrack_record::FieldKey::ComplaintDetails]);
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn inhouse_resolution_skips_approval() {
    let engine = engine();
    let mut nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();

    engine
        .submit_stage(
            &mut nav,
            StageFields::Verification(fixtures::verification()),
            &fixtures::maintenance(),
        )
        .await
        .unwrap();
    engine
        .submit_stage(
            &mut nav,
            StageFields::Resolution(fixtures::resolution(true)),
            &fixtures::maintenance(),
        )
        .await
        .unwrap();

    assert_eq!(nav.record().current_step, StageId::COMPLETION);
    assert_eq!(nav.sequence().len(), 5);
    assert!(!nav.sequence().contains(StageId::APPROVAL));
    assert_eq!(nav.completed(), 5);

    // The Admin has nothing to do on this branch
    let err = nav
        .can_edit(StageId::APPROVAL, &fixtures::admin())
        .unwrap_err();
    assert_eq!(
        err,
        TransitionError::NotInSequence {
            stage: StageId::APPROVAL
        }
    );
}

#[tokio::test]
async fn external_resolution_routes_through_approval() {
    let engine = engine();
    let mut nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();

    engine
        .submit_stage(
            &mut nav,
            StageFields::Verification(fixtures::verification()),
            &fixtures::maintenance(),
        )
        .await
        .unwrap();
    engine
        .submit_stage(
            &mut nav,
            StageFields::Resolution(fixtures::resolution(false)),
            &fixtures::maintenance(),
        )
        .await
        .unwrap();

    assert_eq!(nav.record().current_step, StageId::APPROVAL);
    assert_eq!(nav.record().completed_steps, 4);
    assert_eq!(nav.sequence().len(), 6);
}

#[tokio::test]
async fn approval_decision_completes_stage_five_without_date() {
    let engine = engine();
    let mut nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();

    engine
        .submit_stage(
            &mut nav,
            StageFields::Verification(fixtures::verification()),
            &fixtures::maintenance(),
        )
        .await
        .unwrap();
    engine
        .submit_stage(
            &mut nav,
            StageFields::Resolution(fixtures::resolution(false)),
            &fixtures::maintenance(),
        )
        .await
        .unwrap();
    engine
        .submit_stage(
            &mut nav,
            StageFields::Approval(Approval {
                admin_approval_status: ApprovalStatus::Approved,
                admin_approval_date: None,
            }),
            &fixtures::admin(),
        )
        .await
        .unwrap();

    assert_eq!(nav.record().completed_steps, 5);
    assert_eq!(nav.record().current_step, StageId::COMPLETION);
    assert!(nav.record().admin_approval_date.is_none());
}

#[tokio::test]
async fn pending_approval_fails_validation() {
    let engine = engine();
    let mut nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();

    engine
        .submit_stage(
            &mut nav,
            StageFields::Verification(fixtures::verification()),
            &fixtures::maintenance(),
        )
        .await
        .unwrap();
    engine
        .submit_stage(
            &mut nav,
            StageFields::Resolution(fixtures::resolution(false)),
            &fixtures::maintenance(),
        )
        .await
        .unwrap();

    let err = engine
        .submit_stage(
            &mut nav,
            StageFields::Approval(fixtures::approval(ApprovalStatus::Pending)),
            &fixtures::admin(),
        )
        .await
        .unwrap_err();
    match err {
        EngineError::Validation(v) => {
            assert_eq!(v.stage, StageId::APPROVAL);
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert_eq!(nav.record().completed_steps, 4);
}

#[tokio::test]
async fn completion_closes_the_record_on_both_branches() {
    for inhouse in [true, false] {
        let engine = engine();
        let mut nav = engine
            .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
            .await
            .unwrap();

        engine
            .submit_stage(
                &mut nav,
                StageFields::Verification(fixtures::verification()),
                &fixtures::maintenance(),
            )
            .await
            .unwrap();
        engine
            .submit_stage(
                &mut nav,
                StageFields::Resolution(fixtures::resolution(inhouse)),
                &fixtures::maintenance(),
            )
            .await
            .unwrap();
        if !inhouse {
            engine
                .submit_stage(
                    &mut nav,
                    StageFields::Approval(fixtures::approval(ApprovalStatus::Approved)),
                    &fixtures::admin(),
                )
                .await
                .unwrap();
        }
        engine
            .submit_stage(
                &mut nav,
                StageFields::Completion(fixtures::completion()),
                &fixtures::maintenance(),
            )
            .await
            .unwrap();

        assert_eq!(nav.record().completed_steps, 6, "inhouse={inhouse}");
        assert_eq!(nav.completed(), 6, "inhouse={inhouse}");
        assert!(nav.is_closed());
        assert_eq!(
            nav.record().equipment_status,
            Some(EquipmentStatus::Active),
            "inhouse={inhouse}"
        );

        // No transition is defined past the terminal stage
        let err = nav.advance().unwrap_err();
        assert!(matches!(err, TransitionError::Terminal { .. }));
    }
}

#[tokio::test]
async fn resubmission_with_identical_fields_is_idempotent() {
    let engine = engine();
    let mut nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();

    let fields = StageFields::Verification(fixtures::verification());
    engine
        .submit_stage(&mut nav, fields.clone(), &fixtures::maintenance())
        .await
        .unwrap();
    let first = nav.record().clone();

    engine
        .submit_stage(&mut nav, fields, &fixtures::maintenance())
        .await
        .unwrap();

    assert_eq!(nav.record().completed_steps, first.completed_steps);
    assert_eq!(nav.record().current_step, first.current_step);
    assert_eq!(*nav.record(), first);
}

#[tokio::test]
async fn role_gating_rejects_before_any_store_call() {
    let engine = engine();
    let mut nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();

    let err = engine
        .submit_stage(
            &mut nav,
            StageFields::Verification(fixtures::verification()),
            &fixtures::admin(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Transition(TransitionError::RoleMismatch { .. })
    ));

    // The store never saw the rejected submission
    let fresh = engine.load(nav.record().id).await.unwrap();
    assert!(fresh.record().assigned_person.is_none());
}

#[tokio::test]
async fn endorsed_report_is_locked_for_everyone_but_the_author() {
    let engine = engine();
    let mut nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();

    // The author may still amend their own report
    let mut amended = fixtures::creation_bundle().report;
    amended.complaint_details = "Oscilloscope dead, fuse suspected".to_string();
    engine
        .submit_stage(
            &mut nav,
            StageFields::Report(amended),
            &fixtures::lab_incharge(),
        )
        .await
        .unwrap();

    let err = engine
        .submit_stage(
            &mut nav,
            StageFields::Report(fixtures::creation_bundle().report),
            &fixtures::other_lab_incharge(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Transition(TransitionError::Locked { .. })
    ));
}

#[tokio::test]
async fn creation_fans_out_events_for_both_stages() {
    let engine = engine();
    let mut rx = engine.subscribe();

    let nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.request_id, nav.record().id);
    assert_eq!(first.stage_id, StageId::REPORT);
    assert_eq!(second.stage_id, StageId::ENDORSEMENT);
}

#[tokio::test]
async fn stage_submission_publishes_one_event() {
    let engine = engine();
    let mut nav = engine
        .create_request(fixtures::creation_bundle(), &fixtures::lab_incharge())
        .await
        .unwrap();
    let mut rx = engine.subscribe();

    engine
        .submit_stage(
            &mut nav,
            StageFields::Verification(fixtures::verification()),
            &fixtures::maintenance(),
        )
        .await
        .unwrap();

    let event = rx.recv().await.unwrap();
    assert_eq!(event.stage_id, StageId::VERIFICATION);
    assert_eq!(event.request_id, nav.record().id);
}
