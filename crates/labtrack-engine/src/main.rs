use clap::{Arg, ArgAction, Command};
use labtrack_engine::{EngineConfig, EngineError, LifecycleEngine, MemoryStore, Navigator};
use labtrack_record::{
    Approval, ApprovalStatus, Caller, Completion, CreationBundle, Endorsements, ProblemReport,
    Request, Resolution, StageFields, Verification,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Command::new("labtrack")
        .version(labtrack_engine::VERSION)
        .about("Lab equipment maintenance lifecycle engine")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("walkthrough")
                .about("Drive one request through the full lifecycle in memory")
                .arg(
                    Arg::new("skip-approval")
                        .long("skip-approval")
                        .action(ArgAction::SetTrue)
                        .help("Resolve in-house so the Admin approval stage is skipped"),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Print the closed record from a sample walkthrough")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the record under its wire field names as JSON"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("walkthrough", args)) => {
            let inhouse = args.get_flag("skip-approval");
            match walkthrough(inhouse, true).await {
                Ok(record) => {
                    println!();
                    println!("Lifecycle closed.");
                    println!("  Completed stages: {}", record.completed_steps);
                    println!(
                        "  Equipment status: {}",
                        record
                            .equipment_status
                            .map_or("unknown".to_string(), |s| format!("{s:?}"))
                    );
                    println!(
                        "  Admin approval: {}",
                        record
                            .admin_approval_status
                            .map_or("skipped (resolved in-house)".to_string(), |s| format!(
                                "{s:?}"
                            ))
                    );
                }
                Err(err) => {
                    eprintln!("walkthrough failed: {err}");
                    std::process::exit(1);
                }
            }
        }
        Some(("report", args)) => {
            let json = args.get_flag("json");
            match walkthrough(false, false).await {
                Ok(record) => {
                    if json {
                        match serde_json::to_string_pretty(&record.export_view()) {
                            Ok(out) => println!("{out}"),
                            Err(err) => {
                                eprintln!("report failed: {err}");
                                std::process::exit(1);
                            }
                        }
                    } else {
                        println!("Maintenance Request Report");
                        println!("==========================");
                        println!();
                        println!("Request: {}", record.id);
                        println!("Created by: {}", record.created_by);
                        for (key, value) in record.export_view() {
                            if !value.is_null() {
                                println!("  {key}: {value}");
                            }
                        }
                    }
                }
                Err(err) => {
                    eprintln!("report failed: {err}");
                    std::process::exit(1);
                }
            }
        }
        _ => {}
    }
}

/// Run one request through every stage against the in-memory store
async fn walkthrough(inhouse: bool, verbose: bool) -> Result<Request, EngineError> {
    let engine = LifecycleEngine::new(Arc::new(MemoryStore::new()), EngineConfig::new());
    let incharge = Caller::lab_incharge("LI-01");
    let maintenance = Caller::maintenance("MT-07");
    let admin = Caller::admin("AD-01");

    let mut nav = engine.create_request(sample_bundle(), &incharge).await?;
    report_position(&nav, verbose, "created (stages 1-2 submitted together)");

    engine
        .submit_stage(
            &mut nav,
            StageFields::Verification(Verification {
                assigned_person: "R. Kumar".to_string(),
                in_charge_date: date("2024-03-04"),
                verification_remarks: "Loose HT cable confirmed on inspection".to_string(),
            }),
            &maintenance,
        )
        .await?;
    report_position(&nav, verbose, "verification submitted");

    engine
        .submit_stage(
            &mut nav,
            StageFields::Resolution(Resolution {
                materials_used: "HT cable, fuse".to_string(),
                resolved_inhouse: inhouse,
                resolved_remark: if inhouse {
                    "Re-seated cable and replaced fuse".to_string()
                } else {
                    "Requires OEM service visit".to_string()
                },
                consumables_needed: Some(true),
                consumable_details: Some("2A ceramic fuse".to_string()),
                external_agency_needed: Some(!inhouse),
                agency_name: (!inhouse).then(|| "Scientific Services Ltd".to_string()),
                approx_expenditure: (!inhouse).then_some(12_500.0),
            }),
            &maintenance,
        )
        .await?;
    report_position(&nav, verbose, "resolution submitted");

    if !inhouse {
        engine
            .submit_stage(
                &mut nav,
                StageFields::Approval(Approval {
                    admin_approval_status: ApprovalStatus::Approved,
                    admin_approval_date: Some(date("2024-03-12")),
                }),
                &admin,
            )
            .await?;
        report_position(&nav, verbose, "admin approval submitted");
    }

    engine
        .submit_stage(
            &mut nav,
            StageFields::Completion(Completion {
                completion_remark_lab: "Equipment verified working".to_string(),
                lab_completion_name: "A. Rao".to_string(),
                lab_completion_date: date("2024-03-20"),
                completion_remark_maintenance: "Closed after burn-in test".to_string(),
                maintenance_closed_date: date("2024-03-21"),
                equipment_status: None,
            }),
            &maintenance,
        )
        .await?;
    report_position(&nav, verbose, "completion submitted");

    Ok(nav.record().clone())
}

fn report_position(nav: &Navigator, verbose: bool, what: &str) {
    if verbose {
        println!(
            "{what}: now at {}, {} of {} stages complete",
            nav.position(),
            nav.completed(),
            nav.sequence().len()
        );
    }
}

fn sample_bundle() -> CreationBundle {
    CreationBundle {
        report: ProblemReport {
            type_of_problem: "Electrical".to_string(),
            date: date("2024-03-01"),
            department: "Physics".to_string(),
            location: "Lab 2, Bench 4".to_string(),
            complaint_details: "Oscilloscope will not power on".to_string(),
            equipment_id: "EQ-1042".to_string(),
            recurring_complaint: Some(false),
            recurring_times: None,
        },
        endorsements: Endorsements {
            lab_assistant: "S. Iyer".to_string(),
            lab_assistant_date: date("2024-03-02"),
            hod: "Dr. Menon".to_string(),
            hod_date: date("2024-03-02"),
        },
    }
}

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap_or_default()
}
