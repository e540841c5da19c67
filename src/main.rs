use env_logger::{Builder, Env};
use ethics_manifold::ManifoldApp;

fn main() -> anyhow::Result<()> {
    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .init();

    let app = ManifoldApp::new()?;
    app.run()
}
