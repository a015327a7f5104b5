use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use curve25519_dalek::edwards::CompressedEdwardsY;
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use xmrhash_corelib as core;
use xmrhash_corelib::config::{Encoding, HashConfig};

#[derive(Parser)]
#[command(name = "xmrhash", version, about = "Keccak sponge and ed25519 hash derivations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct InputArgs {
    /// Input as hex
    #[arg(long, conflicts_with = "file")]
    hex: Option<String>,
    /// Read input from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Keccak digest of the input (stdin when no input flag is given)
    Keccak {
        #[command(flatten)]
        input: InputArgs,
        /// Digest profile id
        #[arg(short, long, default_value = "keccak256")]
        profile: String,
        /// Output length in bytes; overrides the profile
        #[arg(short, long)]
        len: Option<usize>,
        /// Write raw bytes instead of hex
        #[arg(long)]
        raw: bool,
    },
    /// Keccak-256 of the input reduced modulo the ed25519 group order
    Scalar {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Map a 32-byte value to a prime-order ed25519 point
    Point {
        /// 32 bytes as hex
        #[arg(long)]
        hex: String,
        /// Length parameter validated by the sponge
        #[arg(short, long, default_value_t = 32)]
        len: usize,
    },
    /// Key-image base point of a compressed ed25519 public key
    PointBase {
        /// Compressed point as hex
        #[arg(long)]
        hex: String,
    },
    /// Apply Keccak-f[1600] to a 200-byte state
    Permute {
        /// State as 400 hex characters (little-endian lanes); zero when omitted
        #[arg(long)]
        state: Option<String>,
        #[arg(short, long, default_value_t = core::KECCAK_ROUNDS)]
        rounds: usize,
    },
    /// List digest profiles
    ProfileLs {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(args: &InputArgs) -> Result<Vec<u8>> {
    if let Some(h) = &args.hex {
        return hex::decode(h.trim()).context("decoding --hex input");
    }
    if let Some(path) = &args.file {
        return std::fs::read(path).with_context(|| format!("reading {}", path.display()));
    }
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .context("reading stdin")?;
    Ok(buf)
}

fn decode_32(s: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(s.trim()).context("decoding hex")?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow!("expected 32 bytes, got {len}"))
}

fn decode_state(s: &str) -> Result<core::State> {
    let bytes = hex::decode(s.trim()).context("decoding state hex")?;
    if bytes.len() != core::STATE_BYTES {
        bail!(
            "state must be {} bytes, got {}",
            core::STATE_BYTES,
            bytes.len()
        );
    }
    let mut st = [0u64; core::STATE_WORDS];
    for (lane, chunk) in st.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *lane = u64::from_le_bytes(word);
    }
    Ok(st)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Keccak {
            input,
            profile,
            len,
            raw,
        }) => {
            let encoding = if raw { Encoding::Raw } else { Encoding::Hex };
            let cfg = HashConfig::new(profile, len, encoding);
            let profiles = core::list_profiles();
            let output_len = cfg.resolve_output_len(&profiles)?;
            debug!(profile = %cfg.profile, output_len, ?encoding, "hashing");
            let data = read_input(&input)?;
            // Unusable lengths abort inside the core.
            let digest = core::keccak(&data, output_len);
            match cfg.encoding {
                Encoding::Hex => println!("{}", hex::encode(digest)),
                Encoding::Raw => {
                    let mut out = std::io::stdout().lock();
                    out.write_all(&digest)?;
                    out.flush()?;
                }
            }
        }
        Some(Commands::Scalar { input }) => {
            let data = read_input(&input)?;
            println!("{}", hex::encode(core::hash_to_scalar_bytes(&data)));
        }
        Some(Commands::Point { hex: h, len }) => {
            let bytes = decode_32(&h)?;
            debug!(len, "hash to point");
            let point = core::hash_to_point(&bytes, len);
            println!("{}", hex::encode(point.compress().as_bytes()));
        }
        Some(Commands::PointBase { hex: h }) => {
            let bytes = decode_32(&h)?;
            let pk = CompressedEdwardsY(bytes)
                .decompress()
                .ok_or_else(|| anyhow!("not a valid compressed ed25519 point"))?;
            let base = core::hash_point_to_point(&pk);
            println!("{}", hex::encode(base.compress().as_bytes()));
        }
        Some(Commands::Permute { state, rounds }) => {
            let mut st = match state {
                Some(s) => decode_state(&s)?,
                None => [0u64; core::STATE_WORDS],
            };
            core::keccakf(&mut st, rounds);
            let bytes: Vec<u8> = st.iter().flat_map(|w| w.to_le_bytes()).collect();
            println!("{}", hex::encode(bytes));
        }
        Some(Commands::ProfileLs { json }) => {
            let profiles = core::list_profiles();
            if json {
                println!("{}", serde_json::to_string_pretty(&profiles)?);
            } else {
                for p in profiles {
                    let rate = p.rate().map(|r| r.to_string()).unwrap_or_else(|_| "-".into());
                    println!("{}  output_len={} rate={}", p.id, p.output_len, rate);
                }
            }
        }
        None => {
            println!("xmrhash {} ready", core::version());
            println!("Try: `xmrhash keccak --hex 616263` or `xmrhash profile-ls`");
        }
    }
    Ok(())
}
