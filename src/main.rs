// SPDX-License-Identifier: MPL-2.0
use soundmap::app::{self, paths, Flags};
use soundmap::scene::DEFAULT_SCENE_FILE;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();

    let config_dir: Option<String> = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(err) => {
            tracing::warn!("ignoring --config-dir: {err}");
            None
        }
    };
    paths::init_cli_override(config_dir);

    let scene_path = args
        .finish()
        .into_iter()
        .next()
        .map_or_else(|| PathBuf::from(DEFAULT_SCENE_FILE), PathBuf::from);

    app::run(Flags { scene_path })
}
