//! gbacomp, a builder for Game Boy Advance emulator compilations.

#![deny(unsafe_code)]

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use gbacomp::compile::CologneOpts;
use gbacomp::compile::PceAdvanceOpts;
use gbacomp::compile::PocketNesOpts;
use gbacomp::compile::Report;
use gbacomp::compile::ZxAdvanceOpts;
use gbacomp::error::Diagnostic;
use gbacomp::inspect::InspectOpts;

#[derive(Debug, StructOpt)]
#[structopt(
  max_term_width = 80,
  about = "assembles GBA emulator compilations out of ROMs and snapshots"
)]
struct Args {
  /// Log what is being placed where.
  #[structopt(short, long, global = true)]
  verbose: bool,
  #[structopt(subcommand)]
  command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
  /// Compiles .col/.rom ColecoVision games for Cologne.
  Cologne(CologneOpts),
  /// Compiles .nes games for PocketNES.
  Pocketnes(PocketNesOpts),
  /// Compiles .pce HuCards and .iso CD-ROM tracks for PCEAdvance.
  Pceadvance(PceAdvanceOpts),
  /// Compiles .sna/.z80 snapshots for ZXAdvance.
  Zxadvance(ZxAdvanceOpts),
  /// Prints the romlist headers of an existing compilation.
  Inspect(InspectOpts),
}

fn main() {
  let args = Args::from_args();

  let default = if args.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default)),
    )
    .with_writer(std::io::stderr)
    .init();

  let report = match args.command {
    Command::Cologne(opts) => opts.run(),
    Command::Pocketnes(opts) => opts.run(),
    Command::Pceadvance(opts) => opts.run(),
    Command::Zxadvance(opts) => opts.run(),
    Command::Inspect(opts) => match opts.run() {
      Ok(text) => {
        println!("{}", text);
        return;
      }
      Err(e) => e.dump_and_die(1),
    },
  };

  match report {
    Ok(Report { listing, written }) => {
      for line in listing {
        println!("{}", line);
      }
      for path in written {
        println!("...wrote {}", path.display());
      }
    }
    Err(e) => e.dump_and_die(1),
  }
}
