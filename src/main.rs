use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use comp40::CodecError;

#[derive(Parser)]
#[command(name = "comp40", about = "Fixed 3:1-ratio lossy PPM image codec")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Compress a binary PPM image into the COMP40 container format
  Compress {
    /// Input PPM path; reads stdin if omitted
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output container path; writes stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Decompress a COMP40 container back into a binary PPM image
  Decompress {
    /// Input container path; reads stdin if omitted
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output PPM path; writes stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
}

fn open_input(path: &Option<PathBuf>) -> io::Result<Box<dyn io::Read>> {
  match path {
    Some(p) => Ok(Box::new(BufReader::new(File::open(p)?))),
    None => Ok(Box::new(BufReader::new(io::stdin()))),
  }
}

fn open_output(path: &Option<PathBuf>) -> io::Result<Box<dyn io::Write>> {
  match path {
    Some(p) => Ok(Box::new(BufWriter::new(File::create(p)?))),
    None => Ok(Box::new(BufWriter::new(io::stdout()))),
  }
}

fn run() -> Result<(), CodecError> {
  env_logger::init();
  let cli = Cli::parse();

  match cli.command {
    Command::Compress { input, output } => {
      let reader = open_input(&input)?;
      let writer = open_output(&output)?;
      comp40::compress(reader, writer)
    }
    Command::Decompress { input, output } => {
      let reader = open_input(&input)?;
      let writer = open_output(&output)?;
      comp40::decompress(reader, writer)
    }
  }
}

fn main() -> ExitCode {
  match run() {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("comp40: {err}");
      ExitCode::FAILURE
    }
  }
}
