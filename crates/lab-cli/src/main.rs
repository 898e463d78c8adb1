use lab_core::{ActionRequest, ErrorClass, LabEngine, LabError, RunStateView};
use lab_domain::{InMemoryCatalog, ScenarioId};
use lab_vision::{ActiveRun, PassthroughDetector, ReplaySource, VisionBridge, VisionConfig};
use log::info;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Uso:
  lab run    --catalog <JSON> --scenario <ID> --actions <JSON>
  lab replay --catalog <JSON> --scenario <ID> --detections <JSONL> [--interval-ms <N>]
El catálogo puede omitirse si LAB_CATALOG_PATH está definido.";

/// Opciones comunes a ambos subcomandos; `input` es el archivo de acciones o
/// de detecciones según el caso.
struct Options {
    catalog: Option<String>,
    scenario: Option<ScenarioId>,
    input: Option<String>,
    interval_ms: Option<u64>,
}

fn parse_options(args: &[String], input_flag: &str) -> Options {
    let mut opts = Options { catalog: std::env::var("LAB_CATALOG_PATH").ok(),
                             scenario: None,
                             input: None,
                             interval_ms: None };
    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--catalog" => opts.catalog = value,
            "--scenario" => opts.scenario = value.and_then(|v| v.parse().ok()),
            "--interval-ms" => opts.interval_ms = value.and_then(|v| v.parse().ok()),
            flag if flag == input_flag => opts.input = value,
            other => {
                eprintln!("[lab] opción desconocida: {other}");
                usage();
            }
        }
        i += 2;
    }
    opts
}

fn usage() -> ! {
    eprintln!("{USAGE}");
    exit(2);
}

fn fail(cmd: &str, e: &LabError) -> ! {
    eprintln!("[lab {cmd}] {e}");
    exit(match e.class() {
        ErrorClass::NotFound | ErrorClass::InvalidRequest => 4,
        ErrorClass::Internal => 5,
    });
}

fn print_state(view: &RunStateView) {
    match serde_json::to_string_pretty(view) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("[lab] no se pudo serializar el estado: {e}");
            exit(5);
        }
    }
}

fn load_engine(cmd: &str, opts: &Options) -> (LabEngine<InMemoryCatalog>, ScenarioId, String) {
    let (Some(catalog_path), Some(scenario), Some(input)) = (&opts.catalog, opts.scenario, &opts.input) else {
        usage();
    };
    let catalog = match InMemoryCatalog::from_path(catalog_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[lab {cmd}] catálogo inválido ({catalog_path}): {e}");
            exit(5);
        }
    };
    (LabEngine::new(catalog), scenario, input.clone())
}

fn cmd_run(args: &[String]) {
    let opts = parse_options(args, "--actions");
    let (engine, scenario, actions_path) = load_engine("run", &opts);
    let actions: Vec<ActionRequest> = match std::fs::read_to_string(&actions_path)
                                                .map_err(|e| e.to_string())
                                                .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
    {
        Ok(a) => a,
        Err(e) => {
            eprintln!("[lab run] acciones inválidas ({actions_path}): {e}");
            exit(5);
        }
    };

    let mut view = engine.start_run(scenario).unwrap_or_else(|e| fail("run", &e));
    for (n, action) in actions.iter().enumerate() {
        view = match engine.apply_action(view.run_id, action) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("[lab run] acción {} ({}) rechazada", n + 1, action.action_type);
                print_state(&view);
                fail("run", &e);
            }
        };
        if let Some(message) = &view.message {
            info!("{message}");
        }
    }
    print_state(&view);
}

fn cmd_replay(args: &[String]) {
    let opts = parse_options(args, "--detections");
    let (engine, scenario, detections_path) = load_engine("replay", &opts);
    let config = match VisionConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[lab replay] {e}");
            exit(2);
        }
    };
    let mut source = match ReplaySource::open(&detections_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[lab replay] {e}");
            exit(4);
        }
    };
    if let Some(ms) = opts.interval_ms {
        source = source.with_frame_interval(Duration::from_millis(ms));
    }

    let engine = Arc::new(engine);
    let run = engine.start_run(scenario).unwrap_or_else(|e| fail("replay", &e));
    let active = ActiveRun::new();
    active.set(run.run_id);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("[lab replay] runtime: {e}");
            exit(5);
        }
    };
    let exit_reason = runtime.block_on(async {
                                 let handle = VisionBridge::new(Arc::clone(&engine), active, config)
                                     .spawn(source, PassthroughDetector)?;
                                 handle.join().await
                             });
    match exit_reason {
        Ok(reason) => info!("replay finished: {reason:?}"),
        Err(e) => {
            eprintln!("[lab replay] {e}");
            exit(5);
        }
    }
    let view = engine.get_run_state(run.run_id).unwrap_or_else(|e| fail("replay", &e));
    print_state(&view);
}

fn main() {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("run") => cmd_run(&args[2..]),
        Some("replay") => cmd_replay(&args[2..]),
        _ => usage(),
    }
}
