use clap::Parser;

mod cmd;

use cmd::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    cli.init_logging();
    let res = match &cli.command {
        Commands::Minimize(a) => a.run(),
        Commands::Random(a) => a.run(),
        Commands::Generate(a) => a.run(),
    };
    if let Err(e) = res {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
