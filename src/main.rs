use clap::Parser;
use miette::Result;
use matte::cli::{Cli, Commands, Context};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::load(&cli)?;

    match cli.command {
        Commands::Clean(args) => matte::cli::clean::run(args, &ctx)?,
        Commands::Sheet(args) => matte::cli::sheet::run(args, &ctx)?,
        Commands::Flip(args) => matte::cli::flip::run(args, &ctx)?,
        Commands::Init(args) => matte::cli::init::run(args, &ctx)?,
        Commands::Completions(args) => {
            matte::cli::completions::run(args, &mut std::io::stdout())?
        }
    }

    Ok(())
}
