use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use mcu_disasm::{
    Architecture, ByteSource, Disassembler, FileType, FormatOptions, Formatter, InstructionSet,
    PrintFlags, Radix,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mcu-disasm", version)]
#[command(about = "Disassembler for 8051, AVR8 and PIC firmware images", long_about = None)]
struct Args {
    /// Target architecture: 8051, avr, pic-baseline, pic-midrange, pic-enhanced, pic-18
    #[arg(short, long)]
    architecture: Architecture,

    /// Input container: generic, ihex, srec, binary, ascii, elf (detected when omitted)
    #[arg(short = 't', long)]
    file_type: Option<FileType>,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    out_file: PathBuf,

    /// Emit assembler-ready output with labels and directives
    #[arg(long, action = ArgAction::SetTrue)]
    assembly: bool,

    /// Base of data literals [default: hex]
    #[arg(long, value_enum, group = "radix")]
    data_base: Option<DataBase>,

    /// Same as `--data-base hex`
    #[arg(long, action = ArgAction::SetTrue, group = "radix", hide_short_help = true)]
    data_base_hex: bool,

    /// Same as `--data-base bin`
    #[arg(long, action = ArgAction::SetTrue, group = "radix", hide_short_help = true)]
    data_base_bin: bool,

    /// Same as `--data-base dec`
    #[arg(long, action = ArgAction::SetTrue, group = "radix", hide_short_help = true)]
    data_base_dec: bool,

    /// Do not print instruction addresses
    #[arg(long, action = ArgAction::SetTrue)]
    no_addresses: bool,

    /// Do not print opcode bytes
    #[arg(long, action = ArgAction::SetTrue)]
    no_opcodes: bool,

    /// Do not comment relative branches with their destination
    #[arg(long, action = ArgAction::SetTrue)]
    no_destination_comments: bool,

    /// Input file, `-` for stdin
    input: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DataBase {
    Hex,
    Bin,
    Dec,
}

impl From<DataBase> for Radix {
    fn from(base: DataBase) -> Self {
        match base {
            DataBase::Hex => Radix::Hex,
            DataBase::Bin => Radix::Binary,
            DataBase::Dec => Radix::Decimal,
        }
    }
}

impl Args {
    fn data_base(&self) -> DataBase {
        match (self.data_base_bin, self.data_base_dec, self.data_base_hex) {
            (true, _, _) => DataBase::Bin,
            (_, true, _) => DataBase::Dec,
            (_, _, true) => DataBase::Hex,
            _ => self.data_base.unwrap_or(DataBase::Hex),
        }
    }

    fn format_options(&self) -> FormatOptions {
        let mut flags = PrintFlags::all();
        flags.set(PrintFlags::ASSEMBLY, self.assembly);
        flags.set(PrintFlags::ADDRESSES, !self.no_addresses);
        flags.set(PrintFlags::OPCODES, !self.no_opcodes);
        flags.set(PrintFlags::DESTINATION_COMMENT, !self.no_destination_comments);
        FormatOptions {
            flags,
            radix: self.data_base().into(),
        }
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_input(args: &Args) -> Result<Box<dyn ByteSource>> {
    let reader: Box<dyn BufRead> = if is_stdio(&args.input) {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("failed to open {}", args.input.display()))?;
        Box::new(BufReader::new(file))
    };

    let source = match args.file_type {
        Some(file_type) => file_type.open(reader),
        None => FileType::open_detected(reader),
    };
    source.with_context(|| format!("failed to read {}", args.input.display()))
}

fn open_output(args: &Args) -> Result<Box<dyn Write>> {
    if is_stdio(&args.out_file) {
        return Ok(Box::new(io::stdout().lock()));
    }
    let file = File::create(&args.out_file)
        .with_context(|| format!("failed to create {}", args.out_file.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn run<A: InstructionSet>(
    source: Box<dyn ByteSource>,
    out: &mut dyn Write,
    options: FormatOptions,
) -> Result<()> {
    debug!(isa = A::NAME, ?options, "disassembling");
    let mut formatter = Formatter::new(Disassembler::<A, _>::new(source), options);
    formatter.write_all(out).context("disassembly failed")?;
    formatter.close().context("failed to close input")?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let source = open_input(&args)?;
    let mut out = open_output(&args)?;
    let options = args.format_options();

    match args.architecture {
        Architecture::_8051 => run::<mcu_disasm::_8051::Mcs51>(source, &mut out, options),
        Architecture::Avr => run::<mcu_disasm::avr::Avr8>(source, &mut out, options),
        Architecture::PicBaseline => run::<mcu_disasm::pic::Baseline>(source, &mut out, options),
        Architecture::PicMidrange => run::<mcu_disasm::pic::Midrange>(source, &mut out, options),
        Architecture::PicEnhanced => run::<mcu_disasm::pic::Enhanced>(source, &mut out, options),
        Architecture::Pic18 => run::<mcu_disasm::pic::Pic18>(source, &mut out, options),
        // Architecture is non_exhaustive, but the cli feature enables every variant
        #[allow(unreachable_patterns)]
        _ => anyhow::bail!("unsupported architecture {}", args.architecture.name()),
    }
}
