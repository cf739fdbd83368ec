mod camera;
mod core;
mod loader;
mod material;
mod pdf;
mod primitive;
mod renderer;
mod texture;

use anyhow::{Context, Result};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "dusklight", about = "Monte Carlo path tracer")]
struct Opt {
    /// Scene description JSON file
    #[structopt(parse(from_os_str))]
    scene: std::path::PathBuf,
    /// Output image path
    #[structopt(short, long, default_value = "output.png")]
    output: String,
    /// Disable partial-image snapshots during the render
    #[structopt(long)]
    no_snapshots: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    log::info!("loading scene from '{}'", opt.scene.display());
    let (scene, camera, renderer) = loader::load(&opt.scene)?;

    let output = renderer::OutputConfig {
        snapshot_path: if opt.no_snapshots {
            None
        } else {
            Some(opt.output.clone())
        },
    };
    let cancel = renderer::CancelToken::new();

    let start = std::time::Instant::now();
    let film = renderer.render(&scene, &camera, &output, &cancel);
    log::info!("render finished in {:.1?}", start.elapsed());

    film.to_image()
        .save(&opt.output)
        .with_context(|| format!("can't write image to '{}'", opt.output))?;
    log::info!("image written to '{}'", opt.output);
    Ok(())
}
