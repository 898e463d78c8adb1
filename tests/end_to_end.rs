use chemlab_rust::demo::{self, NEUTRALIZATION, SALT_SOLUTION};
use chemlab_rust::lab_core::{ActionRequest, ContentItem, LabEngine, LabError};
use chemlab_rust::lab_domain::{ActionKind, AmountUnit, InMemoryCatalog};
use chemlab_rust::lab_vision::{ActiveRun, BridgeExit, PassthroughDetector, ReplaySource, VisionBridge, VisionConfig};
use std::io::Cursor;
use std::sync::Arc;

fn engine() -> LabEngine<InMemoryCatalog> {
    LabEngine::new(demo::demo_catalog().unwrap())
}

fn pipette(reagent: i64, target: &str) -> ActionRequest {
    ActionRequest::new(ActionKind::TransferLiquidWithPipette).instrument(4)
                                                             .reagent(reagent)
                                                             .target(target)
                                                             .amount(10.0, "mL")
}

#[test]
fn scripted_actions_complete_the_demo_scenario() {
    let raw = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/actions.json")).unwrap();
    let actions: Vec<ActionRequest> = serde_json::from_str(&raw).unwrap();
    let engine = engine();
    let run = engine.start_run(NEUTRALIZATION).unwrap();

    let mut view = run;
    for action in &actions {
        view = engine.apply_action(view.run_id, action).unwrap();
    }
    assert_eq!(view.current_step_index, 3);
    assert!(view.containers["beaker_2"].is_empty());
    assert_eq!(view.containers["beaker_1"], vec![ContentItem::new(5, 20.0, AmountUnit::Milliliter)]);
    assert_eq!(view.message.as_deref(),
               Some("Step completed: Vierte el vaso 2 sobre el vaso 1. Neutralización: HCl + NaOH -> NaCl + H2O"));
    assert_eq!(engine.apply_action(view.run_id, &actions[2]), Err(LabError::ScenarioCompleted));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn recorded_pour_drives_the_final_step() {
    let engine = Arc::new(engine());
    let run = engine.start_run(NEUTRALIZATION).unwrap();
    engine.apply_action(run.run_id, &pipette(3, "beaker_1")).unwrap();
    engine.apply_action(run.run_id, &pipette(4, "beaker_2")).unwrap();

    let active = ActiveRun::new();
    active.set(run.run_id);
    let source = ReplaySource::from_reader("demo", Cursor::new(demo::POUR_DETECTIONS.as_bytes()));
    let handle = VisionBridge::new(Arc::clone(&engine), active, VisionConfig::default()).spawn(source,
                                                                                               PassthroughDetector)
                                                                                        .unwrap();
    let exit = tokio_test::assert_ok!(handle.join().await);
    assert_eq!(exit, BridgeExit::SourceClosed);

    let state = engine.get_run_state(run.run_id).unwrap();
    assert_eq!(state.current_step_index, 3);
    assert_eq!(state.containers["beaker_1"], vec![ContentItem::new(5, 20.0, AmountUnit::Milliliter)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn vision_pours_out_of_turn_are_ignored() {
    let engine = Arc::new(engine());
    let run = engine.start_run(NEUTRALIZATION).unwrap();

    let active = ActiveRun::new();
    active.set(run.run_id);
    let source = ReplaySource::from_reader("demo", Cursor::new(demo::POUR_DETECTIONS.as_bytes()));
    let handle = VisionBridge::new(Arc::clone(&engine), active, VisionConfig::default()).spawn(source,
                                                                                               PassthroughDetector)
                                                                                        .unwrap();
    assert_eq!(handle.join().await.unwrap(), BridgeExit::SourceClosed);

    let state = engine.get_run_state(run.run_id).unwrap();
    assert_eq!(state.current_step_index, 0);
    assert!(state.containers.values().all(Vec::is_empty));
}

#[test]
fn salt_solution_mixes_without_reaction() {
    let engine = engine();
    let run = engine.start_run(SALT_SOLUTION).unwrap();
    let spatula = ActionRequest::new(ActionKind::TransferSolidWithSpatula).instrument(5)
                                                                        .reagent(2)
                                                                        .target("beaker_1")
                                                                        .amount(5.0, "g");
    engine.apply_action(run.run_id, &spatula).unwrap();
    let water = ActionRequest::new(ActionKind::TransferLiquidWithPipette).instrument(4)
                                                                       .reagent(1)
                                                                       .target("beaker_1")
                                                                       .amount(20.0, "mL");
    let view = engine.apply_action(run.run_id, &water).unwrap();
    assert_eq!(view.containers["beaker_1"],
               vec![ContentItem::new(2, 5.0, AmountUnit::Gram), ContentItem::new(1, 20.0, AmountUnit::Milliliter)]);
    assert_eq!(view.message.as_deref(), Some("Step completed: Agrega 20 mL de agua"));
}

#[test]
fn demo_catalog_assigns_markers_to_containers() {
    let engine = engine();
    let run = engine.start_run(NEUTRALIZATION).unwrap();
    let names: Vec<&str> = run.containers_meta.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["beaker_1", "beaker_2", "flask_1", "pipette_1", "spatula_1"]);
    assert_eq!(run.containers_meta["flask_1"].allowed_physical_states.as_deref(), Some("liquid,solution"));
}
