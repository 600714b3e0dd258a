//! audio-covert - hide encrypted files in WAV audio.
//!
//! Embeds files in the least significant bits of 16-bit PCM samples and
//! produces QR hash watermarks for tamper detection.

use anyhow::{bail, Context};
use audio_covert::watermark::digest;
use audio_covert::{ChannelConfig, CovertChannel};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Exit status when a watermark does not match.
const EXIT_INVALID: i32 = 2;

#[derive(Parser)]
#[command(name = "audio-covert")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Hide encrypted files in WAV audio and watermark the result",
    long_about = "Encrypts a file with AES-256-CBC, hides it in the least significant bits of a 16-bit PCM WAV carrier, and produces QR-code SHA-256 watermarks for tamper detection."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file and hide it in a WAV carrier
    Embed {
        /// File to hide
        file: PathBuf,

        /// 16-bit PCM WAV carrier
        #[arg(long)]
        carrier: PathBuf,

        /// Where to write the modified carrier
        #[arg(long)]
        output: PathBuf,

        /// Also write a QR watermark of the output
        #[arg(long)]
        qr: Option<PathBuf>,

        /// Passphrase (prompted when omitted)
        #[arg(long)]
        passphrase: Option<String>,

        /// Override the payload size limit in bytes
        #[arg(long)]
        max_payload: Option<usize>,
    },

    /// Recover and decrypt a hidden file
    Extract {
        /// WAV carrier holding a hidden file
        #[arg(long)]
        carrier: PathBuf,

        /// Directory for the recovered file (default: current directory)
        #[arg(long, conflicts_with = "output")]
        output_dir: Option<PathBuf>,

        /// Exact output path, ignoring the stored filename
        #[arg(long)]
        output: Option<PathBuf>,

        /// Passphrase (prompted when omitted)
        #[arg(long)]
        passphrase: Option<String>,
    },

    /// Show how much a WAV carrier can hold
    Capacity {
        /// WAV carrier
        carrier: PathBuf,
    },

    /// Write a QR watermark of an audio file's SHA-256
    Watermark {
        /// Audio file
        audio: PathBuf,

        /// Where to write the QR PNG
        #[arg(long)]
        output: PathBuf,
    },

    /// Check an audio file against a QR watermark
    Verify {
        /// Audio file
        audio: PathBuf,

        /// QR watermark image
        #[arg(long)]
        qr: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut config = match &cli.config {
        Some(path) => ChannelConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChannelConfig::default(),
    };

    match cli.command {
        Commands::Embed {
            file,
            carrier,
            output,
            qr,
            passphrase,
            max_payload,
        } => {
            if max_payload.is_some() {
                config.max_payload_size = max_payload;
            }
            let channel = CovertChannel::new(config)?;
            cmd_embed(&channel, &file, &carrier, &output, qr.as_deref(), passphrase, cli.json)
        }

        Commands::Extract {
            carrier,
            output_dir,
            output,
            passphrase,
        } => {
            let channel = CovertChannel::new(config)?;
            cmd_extract(&channel, &carrier, output_dir, output, passphrase, cli.json)
        }

        Commands::Capacity { carrier } => {
            let channel = CovertChannel::new(config)?;
            cmd_capacity(&channel, &carrier, cli.json)
        }

        Commands::Watermark { audio, output } => {
            let channel = CovertChannel::new(config)?;
            cmd_watermark(&channel, &audio, &output, cli.json)
        }

        Commands::Verify { audio, qr } => {
            let channel = CovertChannel::new(config)?;
            cmd_verify(&channel, &audio, &qr, cli.json)
        }
    }
}

fn prompt_password(prompt: &str) -> io::Result<String> {
    match rpassword::prompt_password(prompt) {
        Ok(password) => Ok(password),
        Err(_) => {
            eprint!("{}", prompt);
            io::stderr().flush()?;
            let mut password = String::new();
            io::stdin().read_line(&mut password)?;
            Ok(password.trim().to_string())
        }
    }
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn write_file(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}

fn cmd_embed(
    channel: &CovertChannel,
    file: &Path,
    carrier: &Path,
    output: &Path,
    qr: Option<&Path>,
    passphrase: Option<String>,
    json: bool,
) -> anyhow::Result<i32> {
    let passphrase = match passphrase {
        Some(p) => p,
        None => {
            let password = prompt_password("Enter passphrase: ")?;
            let confirm = prompt_password("Confirm passphrase: ")?;
            if password != confirm {
                bail!("passphrases do not match");
            }
            password
        }
    };

    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("{} has no usable file name", file.display()))?;
    let content = read_file(file)?;
    let carrier_wav = read_file(carrier)?;

    let audio = match qr {
        Some(qr_path) => {
            let out = channel.embed_with_watermark(&content, filename, &passphrase, &carrier_wav)?;
            write_file(qr_path, &out.watermark)?;
            out.audio
        }
        None => channel.embed(&content, filename, &passphrase, &carrier_wav)?,
    };
    write_file(output, &audio)?;

    if json {
        println!(
            "{}",
            json!({
                "audio_file": output.display().to_string(),
                "qr_code": qr.map(|p| p.display().to_string()),
            })
        );
    } else {
        println!("Hid {} ({} bytes) in {}", filename, content.len(), output.display());
        if let Some(qr_path) = qr {
            println!("Watermark written to {}", qr_path.display());
        }
    }

    Ok(0)
}

fn cmd_extract(
    channel: &CovertChannel,
    carrier: &Path,
    output_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    passphrase: Option<String>,
    json: bool,
) -> anyhow::Result<i32> {
    let passphrase = match passphrase {
        Some(p) => p,
        None => prompt_password("Passphrase: ")?,
    };

    let carrier_wav = read_file(carrier)?;
    let payload = channel.extract(&passphrase, &carrier_wav)?;

    let path = match output {
        Some(path) => path,
        None => {
            // Only the final component of the stored name is trusted.
            let name = Path::new(&payload.filename)
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("extracted.bin"));
            output_dir.unwrap_or_else(|| PathBuf::from(".")).join(name)
        }
    };
    write_file(&path, &payload.content)?;

    if json {
        println!(
            "{}",
            json!({
                "filename": payload.filename,
                "output": path.display().to_string(),
                "size": payload.content.len(),
            })
        );
    } else {
        println!(
            "Recovered {} ({} bytes) to {}",
            payload.filename,
            payload.content.len(),
            path.display()
        );
    }

    Ok(0)
}

fn cmd_capacity(channel: &CovertChannel, carrier: &Path, json: bool) -> anyhow::Result<i32> {
    let report = channel.capacity_report(&read_file(carrier)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Carrier Capacity");
        println!("================");
        println!("Channels:         {}", report.format.channels);
        println!("Frame rate:       {} Hz", report.format.frame_rate);
        println!("Frames:           {}", report.frame_count);
        println!("Samples:          {}", report.samples);
        println!("Duration:         {:.2} s", report.duration_secs);
        println!("Capacity:         {} bytes", report.capacity_bytes);
    }

    Ok(0)
}

fn cmd_watermark(
    channel: &CovertChannel,
    audio: &Path,
    output: &Path,
    json: bool,
) -> anyhow::Result<i32> {
    let audio_bytes = read_file(audio)?;
    let qr = channel.generate_watermark(&audio_bytes)?;
    write_file(output, &qr)?;

    if json {
        println!(
            "{}",
            json!({
                "qr_code": output.display().to_string(),
                "sha256": digest(&audio_bytes),
            })
        );
    } else {
        println!("Watermark written to {}", output.display());
    }

    Ok(0)
}

fn cmd_verify(channel: &CovertChannel, audio: &Path, qr: &Path, json: bool) -> anyhow::Result<i32> {
    let valid = channel.verify_watermark(&read_file(audio)?, &read_file(qr)?);

    if json {
        println!("{}", json!({ "valid": valid }));
    } else if valid {
        println!("✓ Audio matches the watermark");
    } else {
        println!("✗ Audio does not match the watermark");
    }

    Ok(if valid { 0 } else { EXIT_INVALID })
}
