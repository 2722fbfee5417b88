use std::process::ExitCode;

use anyhow::Context;
use png_rewrite::{config::USAGE, transform, Args, Codec, Error, PngCodec};

fn main() -> ExitCode {
    // Nothing touches the filesystem until the arguments are known to be good.
    let args = match Args::parse(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(e.exit_code());
        }
    };
    pretty_env_logger::formatted_builder()
        .filter_level(args.log_level())
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let codec = PngCodec;
    let input = codec
        .decode(&args.input)
        .context("Failed to read input image.")?;
    let output = transform::process(&input)?;
    codec
        .encode(&args.output, &output)
        .context("Failed to write output image.")?;
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>().map_or(1, Error::exit_code)
}
