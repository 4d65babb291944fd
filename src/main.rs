mod app;
mod audio;
mod catalog;
mod config;
mod runtime;
mod scene;
mod seek;
mod spectrum;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
