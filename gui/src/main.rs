mod app;
mod font;
mod frame;
mod renderer;

use shared::config::Config;
use winit::event_loop::EventLoop;

use crate::app::LifeApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::from_env();
    log::info!(
        "opening {}x{} window {:?}",
        config.window_width,
        config.window_height,
        config.title
    );

    let event_loop = EventLoop::new()?;
    let mut app = LifeApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.take_startup_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
