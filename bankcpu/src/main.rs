extern crate clap;

use crossbeam_channel::{bounded, Receiver};
use log::{error, info, warn};
use thiserror::Error;

use bankcpu_core::consts::display::{VRAM_FIRST_BANK, VRAM_NUM_BANKS};
use bankcpu_core::consts::MEM_BANK_NUM_BYTES;
use bankcpu_core::cpu::{BcpuCpu, HaltReason};
use bankcpu_core::disasm::BcpuDisasm;
use bankcpu_core::host::BcpuHost;
use bankcpu_core::mem::BcpuMemoryMap;
use bankcpu_core::BcpuError;

use std::fs::File;
use std::io::Read;

#[derive(Error, Debug)]
enum LoadError {
    #[error("unable to read program file {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no program given, use the `file` or `demo` subcommand")]
    NoProgram,
    #[error("unknown demo program {0:?}")]
    UnknownDemo(String),
    #[error("invalid value for --{flag}: {value:?}")]
    InvalidArg { flag: &'static str, value: String },
    #[error(transparent)]
    Core(#[from] BcpuError),
}

fn fetch_config<'a>() -> clap::ArgMatches<'a> {
    let about = "Emulator for a small 8-bit CPU with 256 banks of 256 bytes";
    let c = clap::App::new("Banked CPU Emulator (bankcpu)")
        .version("0.1")
        .about(about)
        .arg(
            clap::Arg::with_name("max-steps")
                .long("max-steps")
                .takes_value(true)
                .help("Stop after this many instructions"),
        )
        .arg(
            clap::Arg::with_name("dump-registers")
                .long("dump-registers")
                .help("Print the register file once the machine halts"),
        )
        .arg(
            clap::Arg::with_name("dump-memory")
                .long("dump-memory")
                .takes_value(true)
                .help("Hex dump the given bank once the machine halts"),
        )
        .arg(
            clap::Arg::with_name("show-display")
                .long("show-display")
                .help("Draw the video banks in the terminal while running"),
        )
        .arg(
            clap::Arg::with_name("disasm")
                .long("disasm")
                .help("Print a listing of the program instead of running it"),
        )
        .subcommand(
            clap::SubCommand::with_name("file")
                .help("Run a raw program image from a file")
                .arg(
                    clap::Arg::with_name("filename")
                        .index(1)
                        .required(true)
                        .help("Filename of the program image to load"),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("demo")
                .help("Run one of the bundled programs")
                .arg(
                    clap::Arg::with_name("name")
                        .index(1)
                        .required(true)
                        .possible_values(&bankcpu_programs::PROGRAM_NAMES)
                        .help("Name of the bundled program"),
                ),
        );
    c.get_matches()
}

fn load_program_file(filename: &str) -> Result<Vec<u8>, LoadError> {
    let to_err = |source: std::io::Error| LoadError::Io {
        path: filename.to_string(),
        source,
    };

    let mut f = File::open(filename).map_err(to_err)?;
    let mut image = Vec::new();
    f.read_to_end(&mut image).map_err(to_err)?;

    info!("Loaded {} bytes from {:?}", image.len(), filename);
    Ok(image)
}

fn load_image(matches: &clap::ArgMatches) -> Result<Vec<u8>, LoadError> {
    match matches.subcommand() {
        ("file", Some(sub_matches)) => {
            let filename = sub_matches.value_of("filename").unwrap_or_default();
            load_program_file(filename)
        }
        ("demo", Some(sub_matches)) => {
            let name = sub_matches.value_of("name").unwrap_or_default();
            bankcpu_programs::find_program(name)
                .map(|image| image.to_vec())
                .ok_or_else(|| LoadError::UnknownDemo(name.to_string()))
        }
        _ => Err(LoadError::NoProgram),
    }
}

fn parse_arg<T: std::str::FromStr>(
    matches: &clap::ArgMatches,
    flag: &'static str,
) -> Result<Option<T>, LoadError> {
    let value = match matches.value_of(flag) {
        Some(v) => v,
        None => return Ok(None),
    };

    // Accept both decimal and 0x-prefixed hex
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok().map(|v| v.to_string()),
        None => Some(value.to_string()),
    };
    parsed
        .and_then(|v| v.parse::<T>().ok())
        .map(Some)
        .ok_or_else(|| LoadError::InvalidArg {
            flag,
            value: value.to_string(),
        })
}

///
/// Host for the command line. Polls the ctrl-c channel after every
/// instruction and, when asked to, redraws the display whenever the video
/// banks changed since the last frame.
///
struct CliHost {
    ctrlc_rx: Receiver<()>,
    show_display: bool,
    last_frame: Vec<u8>,
}

impl CliHost {
    fn new(ctrlc_rx: Receiver<()>, show_display: bool) -> Self {
        CliHost {
            ctrlc_rx,
            show_display,
            last_frame: Vec::new(),
        }
    }

    fn video_bytes(mem: &BcpuMemoryMap) -> Vec<u8> {
        let mut frame = Vec::with_capacity(VRAM_NUM_BANKS * MEM_BANK_NUM_BYTES);
        for i in 0..VRAM_NUM_BANKS {
            frame.extend_from_slice(mem.bank(VRAM_FIRST_BANK + i as u8));
        }
        frame
    }

    fn draw(mem: &BcpuMemoryMap) {
        let mut out = String::new();
        // Cursor home so frames overwrite each other
        out.push_str("\x1b[H");
        match bankcpu_periph::render_ansi(&mut out, mem) {
            Ok(_) => print!("{}", out),
            Err(e) => warn!("Unable to render display. {:?}", e),
        }
    }
}

impl BcpuHost for CliHost {
    fn refresh(&mut self, mem: &BcpuMemoryMap) {
        if !self.show_display {
            return;
        }

        let frame = CliHost::video_bytes(mem);
        if frame != self.last_frame {
            CliHost::draw(mem);
            self.last_frame = frame;
        }
    }

    fn quit_requested(&mut self) -> bool {
        // Check to see if we received a ctrlc signal. If we have, stop at
        // the end of this cycle.
        self.ctrlc_rx.len() > 0
    }
}

fn print_listing(image: &[u8]) {
    for inst in BcpuDisasm::new(image) {
        println!("{}", inst);
    }
}

fn print_dumps(cpu: &BcpuCpu, matches: &clap::ArgMatches, dump_bank: Option<u8>) {
    let mut out = String::new();
    if matches.is_present("dump-registers") {
        if cpu.dump_registers(&mut out).is_err() {
            warn!("Unable to format register dump");
        }
    }
    if let Some(bank) = dump_bank {
        if cpu.dump_memory(&mut out, bank, MEM_BANK_NUM_BYTES).is_err() {
            warn!("Unable to format memory dump");
        }
    }
    print!("{}", out);
}

fn main() {
    env_logger::init();

    // Register for a ctrlc handler which will push a signal to the application.
    // If the signal is pushed again before the machine halted, force close.
    let (ctrlc_tx, ctrlc_rx) = bounded(1);
    let res = ctrlc::set_handler(move || {
        if ctrlc_tx.is_full() {
            std::process::exit(-1);
        }
        let _res = ctrlc_tx.send(());
    });

    if let Err(x) = res {
        error!("Unable to register signal handler. {:?}.", x);
        std::process::exit(1);
    }

    let matches = fetch_config();
    let config = load_image(&matches).and_then(|image| {
        let max_steps = parse_arg::<usize>(&matches, "max-steps")?;
        let dump_bank = parse_arg::<u8>(&matches, "dump-memory")?;
        Ok((image, max_steps, dump_bank))
    });
    let (image, max_steps, dump_bank) = match config {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if matches.is_present("disasm") {
        print_listing(&image);
        return;
    }

    let mut cpu = BcpuCpu::new(BcpuMemoryMap::new());
    if let Err(e) = cpu.load_program(&image).map_err(LoadError::from) {
        error!("{}", e);
        std::process::exit(1);
    }

    let show_display = matches.is_present("show-display");
    if show_display {
        // Clear the terminal once, frames only move the cursor home
        print!("\x1b[2J");
    }

    let mut host = CliHost::new(ctrlc_rx, show_display);
    let reason = cpu.run(&mut host, max_steps);

    print_dumps(&cpu, &matches, dump_bank);

    match reason {
        HaltReason::Fault(e) => {
            // Registers were already logged by the core when it faulted
            error!("Machine faulted: {}", e);
            for inst in cpu.history() {
                error!("  {}", inst);
            }
            std::process::exit(2);
        }
        HaltReason::QuitRequested => info!("Stopped by user after {} steps", cpu.total_steps),
        HaltReason::StepLimit => warn!("Step limit reached at {}", cpu.pc),
        HaltReason::EndOfProgram => info!("Program finished after {} steps", cpu.total_steps),
    }
}
