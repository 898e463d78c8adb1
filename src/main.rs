use chemlab_rust::lab_core::ActionRequest;
use chemlab_rust::lab_domain::ActionKind;
use chemlab_rust::lab_vision::{ActiveRun, PassthroughDetector, ReplaySource, VisionBridge};
use chemlab_rust::{build_engine, config, demo, AppError};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Demo: neutralización ácido-base. Los dos pipeteos se envían como acciones
/// y el vertido final lo detecta el puente de visión a partir de una
/// grabación de marcadores.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = config::config()?;
    let engine = Arc::new(build_engine(config)?);
    let run = engine.start_run(demo::NEUTRALIZATION)?;
    println!("Ejecución {} iniciada (escenario {})", run.run_id, run.scenario_id);

    let pipette = |reagent, target: &str| {
        ActionRequest::new(ActionKind::TransferLiquidWithPipette).instrument(4)
                                                                 .reagent(reagent)
                                                                 .target(target)
                                                                 .amount(10.0, "mL")
    };
    for request in [pipette(3, "beaker_1"), pipette(4, "beaker_2")] {
        let view = engine.apply_action(run.run_id, &request)?;
        println!("[paso {}] {}", view.current_step_index, view.message.unwrap_or_default());
    }

    let active = ActiveRun::new();
    active.set(run.run_id);
    let source = ReplaySource::from_reader("demo", Cursor::new(demo::POUR_DETECTIONS.as_bytes()))
        .with_frame_interval(Duration::from_millis(30));
    let handle =
        VisionBridge::new(Arc::clone(&engine), active, config.vision.clone()).spawn(source, PassthroughDetector)?;
    let exit = handle.join().await?;
    println!("Puente de visión terminado: {exit:?}");

    let state = engine.get_run_state(run.run_id)?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
