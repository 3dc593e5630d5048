//! `inspector` command line entry point.

use std::process::ExitCode;

use inspector::{cli, logging, NativeViewer, PluginRegistry};

fn main() -> ExitCode {
    let registry = PluginRegistry::with_builtin();
    let args = match cli::parse_from(&registry, std::env::args_os()) {
        Ok(args) => args,
        // prints usage or help; exits with 2 on errors and 0 for --help/--version
        Err(e) => e.exit(),
    };
    logging::init(args.verbose);

    match cli::run(args, registry, NativeViewer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("{e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
