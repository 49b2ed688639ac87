//! Native preview entry point.

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = landingfx_app::PreviewArgs::parse();

    log::info!("Starting landingfx preview");
    if let Err(err) = landingfx_app::run_preview(&args) {
        log::error!("Preview failed: {}", err);
        std::process::exit(1);
    }
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
