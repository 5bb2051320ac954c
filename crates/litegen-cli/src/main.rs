use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = litegen_cli::run(std::env::args().collect()) {
        tracing::debug!(target: "litegen_cli", error = ?e, "command failed");
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
