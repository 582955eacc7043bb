use std::fs;
use std::io::{self, BufRead, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use huffman_coder::{decode_str, encode, CodeTable, Error, FrequencyTable};

/// represent all acceptable arguments
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// print the text, the codes and some statistics for humans
    /// instead of the codebook format `decode` reads
    #[clap(long, global = true)]
    report: bool,

    #[clap(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// encodes the given words, joined by single spaces
    #[clap(visible_alias = "t")]
    Text {
        #[clap(required = true)]
        words: Vec<String>,
    },

    /// encodes the whole contents of a file
    #[clap(visible_alias = "f")]
    File { path: PathBuf },

    /// encodes text from stdin
    Encode,

    /// decodes a codebook, a blank line and encoded lines from stdin
    Decode,
}

fn main() {
    // get arguments
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("huffman-coder: {}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    // prepare stdout with buffering
    let stdout = io::stdout();
    let mut stdout = BufWriter::new(stdout.lock());

    match args.mode {
        Mode::Text { words } => write_encoding(&mut stdout, &words.join(" "), args.report)?,
        Mode::File { path } => {
            let text = fs::read_to_string(&path).map_err(|err| {
                io::Error::new(err.kind(), format!("cannot read {}: {}", path.display(), err))
            })?;
            write_encoding(&mut stdout, &text, args.report)?;
        }
        Mode::Encode => {
            require_piped_stdin()?;
            // get text from stdin, waits until EOF
            let mut text = String::new();
            io::stdin().lock().read_to_string(&mut text)?;
            write_encoding(&mut stdout, &text, args.report)?;
        }
        Mode::Decode => {
            require_piped_stdin()?;
            let stdin = io::stdin();
            write_decoding(&mut stdout, stdin.lock())?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// abort when there is no input from stdin
fn require_piped_stdin() -> Result<(), Error> {
    if atty::is(atty::Stream::Stdin) {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "this mode only accepts input piped to stdin",
        )));
    }
    Ok(())
}

fn write_encoding(out: &mut impl Write, text: &str, report: bool) -> Result<(), Error> {
    let (encoded, table) = encode(text)?;
    if report {
        let frequencies = FrequencyTable::count(text.chars());
        writeln!(out, "TEXT\n{}", text)?;
        writeln!(out, "USED FOLLOWING CODES\n{}", table.format_codebook())?;
        writeln!(out, "CODED TEXT\n{}", encoded)?;
        writeln!(out, "STATISTICS")?;
        writeln!(out, "distinct symbols\t{}", table.len())?;
        writeln!(out, "encoded bits\t{}", encoded.bit_len())?;
        writeln!(
            out,
            "fixed-width bits\t{}",
            table.fixed_width_length(frequencies.total())
        )?;
    } else {
        // codebook, blank line, then the encoded bits: what `decode` reads back
        writeln!(out, "{}\n\n{}", table.format_codebook(), encoded)?;
    }
    Ok(())
}

fn write_decoding(out: &mut impl Write, input: impl BufRead) -> Result<(), Error> {
    let mut lines = input.lines();

    // codebook starts after leading empty lines and ends before the next empty line
    let mut codebook = String::new();
    for line in &mut lines {
        let line = line?;
        if line.is_empty() {
            if codebook.is_empty() {
                continue;
            }
            break;
        }
        codebook.push_str(&line);
        codebook.push('\n');
    }
    let table = CodeTable::parse_codebook(&codebook)?;

    // the encoded bits may be wrapped over any number of lines
    let mut bits = String::new();
    for line in lines {
        bits.push_str(&line?);
    }
    write!(out, "{}", decode_str(&bits, &table)?)?;
    Ok(())
}
