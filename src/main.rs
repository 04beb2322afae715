mod app;
mod config;
mod model;
mod render;
mod sched;
mod sim;
mod sprite;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
