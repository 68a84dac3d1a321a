use std::process::ExitCode;

use anyhow::Context;
use env_logger::Env;
use gamelife::GameLife;
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};

mod console;
mod options;
mod stats;
mod window;

use options::Args;

fn run(args: &Args) -> anyhow::Result<()> {
    let settings = args.settings();
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut game = GameLife::new(settings, rng);

    if args.console() {
        info!("running in console mode");
        let mut render = console::ConsoleRender::new(settings.window_width, settings.window_height)
            .context("failed to set up the terminal")?;
        render.run(&mut game).context("terminal i/o failed")?;
        // restore the terminal before anything else is printed
        std::mem::drop(render);
    } else {
        window::WindowRender::new(game).run()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = match Args::from_env() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", options::usage());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{}", options::usage());
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
