//! liveterm: live terminal rendering demo.

use liveterm_lib::{app, config, errors, ui};

fn main() {
    // Logs go to stderr so they never land inside the live area.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = config::AppConfig::parse();
    let code = match app::run(&config) {
        Ok(code) => code,
        Err(err) => {
            ui::print(ui::Tone::Error, &format!("{err:#}"));
            errors::exit_code_for(&err)
        }
    };
    std::process::exit(code);
}
