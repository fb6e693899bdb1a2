// SPDX-License-Identifier: MPL-2.0
use iced_curtain::app::{self, Flags};
use std::path::PathBuf;

const HELP: &str = "\
Iced Curtain

USAGE:
  iced_curtain [OPTIONS]

OPTIONS:
  --config <path>       Global configuration file (TOML)
  --config-dir <dir>    Directory holding curtain.toml
  --assets <dir>        Directory containing curtain-assets/
  --attr <name=value>   Marker attribute, e.g. data-curtain-auto=true (repeatable)
  -h, --help            Print this help
";

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(&mut args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        log::warn!("Ignoring unexpected arguments: {remaining:?}");
    }

    app::run(flags)
}

fn parse_flags(args: &mut pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    Ok(Flags {
        config_path: args.opt_value_from_str::<_, PathBuf>("--config")?,
        config_dir: args.opt_value_from_str::<_, PathBuf>("--config-dir")?,
        asset_root: args.opt_value_from_str::<_, PathBuf>("--assets")?,
        attrs: args.values_from_str::<_, String>("--attr")?,
    })
}
