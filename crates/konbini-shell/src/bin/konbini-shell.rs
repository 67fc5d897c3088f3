use konbini_router::Params;
use konbini_shell::{logging, run_session, screens, Shell, ShellConfig};

fn main() {
    if let Err(err) = run() {
        eprintln!("konbini-shell: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = ShellConfig::load().map_err(|e| e.to_string())?;
    logging::init_logging(&config.logging).map_err(|e| e.to_string())?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        initial_route = %config.initial_route,
        "konbini-shell starting"
    );

    let mut shell = Shell::new();
    screens::register_all(&mut shell).map_err(|e| e.to_string())?;
    let first = shell
        .start(&config.initial_route, Params::new())
        .map_err(|e| e.to_string())?;
    shell.drain(first);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(&mut shell, stdin.lock(), stdout.lock()).map_err(|e| e.to_string())?;
    tracing::info!("konbini-shell exiting");
    Ok(())
}
