use super::{resolve_cipher, DEMO_QUOTE};
use cipherforge::cipher::{decode, encode};
use cipherforge::error::CfResult;
use cipherforge::giants::GiantCandidate;
use clap::Args;
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct CodecArgs {
    /// Giant name, JSON cipher file or 26-letter alphabet string.
    #[arg(short, long, default_value = "LonelyRemark")]
    pub cipher: String,

    #[arg(short, long, default_value = DEMO_QUOTE)]
    pub text: String,
}

pub fn run_encode(args: &CodecArgs, candidates: &[GiantCandidate]) -> CfResult<()> {
    let (name, cipher) = resolve_cipher(&args.cipher, candidates)?;
    debug!("Encoding with {}: {}", name, cipher);
    println!("{}", encode(&args.text, &cipher));
    Ok(())
}

pub fn run_decode(args: &CodecArgs, candidates: &[GiantCandidate]) -> CfResult<()> {
    let (name, cipher) = resolve_cipher(&args.cipher, candidates)?;
    debug!("Decoding with {}: {}", name, cipher);
    println!("{}", decode(&args.text, &cipher));
    Ok(())
}
