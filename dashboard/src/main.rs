use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Full path to TOML dashboard config
    #[clap(short, long, value_parser)]
    config: Option<String>,

    /// Monitor server as host or host:port. Overrides VIGIL_SERVER
    #[clap(short, long, value_parser)]
    server: Option<String>,
}

fn main() {
    let args = Args::parse();
    dashboard::start(args.config.as_deref(), args.server.as_deref());
}
