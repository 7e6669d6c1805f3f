// SPDX-License-Identifier: MPL-2.0
use iced_toast::app::{self, Flags};
use iced_toast::toast::ToastPosition;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
iced_toast - toast notification playground

USAGE:
  iced_toast [OPTIONS]

OPTIONS:
  --position <POS>   Default toast position (top-left, top-center, top-right,
                     bottom-left, bottom-center, bottom-right)
  --reverse          Stack newer toasts after older ones
  --config <FILE>    Read settings from FILE instead of the config directory
  -h, --help         Print this help
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    app::run(flags)
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let position: Option<ToastPosition> = args.opt_value_from_str("--position")?;
    let reverse_order = args.contains("--reverse");
    let config_path: Option<PathBuf> = args.opt_value_from_os_str("--config", |s| {
        Ok::<_, std::convert::Infallible>(PathBuf::from(s))
    })?;

    if let Some(arg) = args.finish().first() {
        tracing::warn!(argument = ?arg, "ignoring unexpected argument");
    }

    Ok(Flags {
        config_path,
        position,
        reverse_order,
    })
}
