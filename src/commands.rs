use std::error::Error;

use weft_merge::MergeContext;

use crate::cli::{Cli, Command};

/// Dispatches the parsed command line. A bare invocation prints version
/// info, same as the `version` subcommand.
pub fn run(mut cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command.take().unwrap_or(Command::Version) {
        Command::Version => {
            print_version();
            Ok(())
        }
        Command::Start { verbose } => start(&cli, verbose),
        Command::Reload => reload(&cli),
    }
}

fn print_version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
}

fn start(cli: &Cli, verbose: bool) -> Result<(), Box<dyn Error>> {
    let ctx = MergeContext::open(&cli.data_dir);
    let summary = ctx.merge_all(verbose)?;
    println!("Merge complete. {}", summary);
    Ok(())
}

fn reload(cli: &Cli) -> Result<(), Box<dyn Error>> {
    // Opening runs a fresh preparation pass; report what it found.
    let ctx = MergeContext::open(&cli.data_dir);
    describe(&ctx);
    Ok(())
}

fn describe(ctx: &MergeContext) {
    let config = ctx.config();
    match ctx.target() {
        Some(world) => {
            let guard = world.read().unwrap();
            println!(
                "target world: '{}' (height {})",
                guard.name(),
                guard.max_height()
            );
        }
        None => println!("target world: '{}' (not loaded)", config.target_world),
    }
    match ctx.template() {
        Some(template) => println!(
            "template: {} ({}x{})",
            config.map_image_file,
            template.width(),
            template.height()
        ),
        None => println!("template: {} (not loaded)", config.map_image_file),
    }
    let offset = ctx.offset();
    println!("offset: ({}, {})", offset.dx, offset.dz);
    let stats = ctx.palette().stats();
    println!(
        "color mappings: {} resolved, {} unresolvable",
        stats.resolved, stats.unresolvable
    );
    println!("worlds loaded: {}", ctx.catalog().names().join(", "));
}
