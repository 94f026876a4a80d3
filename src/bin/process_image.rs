use anyhow::Context;
use rgb_png::{Channel, PNG};

const USAGE: &str = "usage: process-image [-v] <input.png> <output.png> <red|green|blue>";

fn main() -> anyhow::Result<()> {
    let mut args: Vec<_> = std::env::args().skip(1).collect();
    let verbosity = if args.first().map(String::as_str) == Some("-v") {
        args.remove(0);
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .parse_default_env()
        .init();

    let [input, output, channel] = args.as_slice() else {
        anyhow::bail!(USAGE);
    };
    let channel: Channel = channel.parse()?;
    let png = PNG::load(input).context(format!("Failed to decode {input}."))?;
    log::info!(
        "{}x{} image, isolating {channel:?}",
        png.header().width(),
        png.header().height()
    );
    png.save_rgb(output, channel)
        .context(format!("Failed to write {output}."))?;
    Ok(())
}
