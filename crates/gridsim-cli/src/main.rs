use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod command;
mod schema;
mod source;
mod util;

const DEFAULT_LOG_FILTER: &str =
    "gridsim_cli=info,gridsim_history=info,gridsim_engine=info,gridsim_montecarlo=info";

fn main() -> anyhow::Result<()> {
    init_tracing();
    command::run()
}

/// Logs go to stderr so stdout stays free for JSON and CSV output.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
