//! Subcommand flows.
//!
//! Every flow starts from a fresh entropy source on the fixed seed, so the
//! same kind and subcommand always print the same bytes.

use std::io::{BufRead, Write};

use log::info;
use pqsigs_bliss_b::{
    deterministic_seed, drop_bits, generate_private_key, sign, verify_status, write_vector,
    Entropy, Params, PrivateKey, Sampler, Signature,
};

use crate::cli::Command;
use crate::error::HarnessError;
use crate::inject::read_signature;

/// Message signed and verified by the harness.
pub const MESSAGE: &[u8] = b"Hello world";

/// Runs `command` under `params`. Vectors go to `out`; prompts go to
/// `prompt`; injected components are read from `input`.
pub fn run<R: BufRead, W: Write, P: Write>(
    command: Command,
    params: &'static Params,
    input: R,
    out: &mut W,
    prompt: &mut P,
) -> Result<(), HarnessError> {
    info!("running {:?} with kind {}", command, params.kind);
    match command {
        Command::Keygen => keygen(params, out),
        Command::Sign => sign_message(params, out),
        Command::Verify => verify_injected(params, input, out, prompt),
        Command::Dropbits => dropbits(params, out),
    }
}

fn new_key(params: &'static Params) -> Result<(Entropy, PrivateKey), HarnessError> {
    let mut entropy = Entropy::new(&deterministic_seed())?;
    let sk = generate_private_key(params, &mut entropy)?;
    Ok((entropy, sk))
}

fn write_private_key<W: Write>(out: &mut W, sk: &PrivateKey) -> Result<(), HarnessError> {
    write_vector(out, &sk.s1)?;
    write_vector(out, &sk.s2)?;
    write_vector(out, &sk.a)?;
    Ok(())
}

fn write_signature<W: Write>(out: &mut W, sig: &Signature) -> Result<(), HarnessError> {
    write_vector(out, &sig.z1)?;
    write_vector(out, &sig.z2)?;
    write_vector(out, &sig.c)?;
    Ok(())
}

fn keygen<W: Write>(params: &'static Params, out: &mut W) -> Result<(), HarnessError> {
    let (_, sk) = new_key(params)?;
    write_private_key(out, &sk)
}

fn sign_message<W: Write>(params: &'static Params, out: &mut W) -> Result<(), HarnessError> {
    let (mut entropy, sk) = new_key(params)?;
    write_private_key(out, &sk)?;

    let sig = sign(&sk, MESSAGE, &mut entropy)?;
    write_signature(out, &sig)?;

    let code = verify_status(&sk.public_key(), MESSAGE, &sig);
    info!("verification of fresh signature returned {}", code);
    writeln!(out, "{}", code)?;
    Ok(())
}

fn verify_injected<R: BufRead, W: Write, P: Write>(
    params: &'static Params,
    input: R,
    out: &mut W,
    prompt: &mut P,
) -> Result<(), HarnessError> {
    let (_, sk) = new_key(params)?;
    write_private_key(out, &sk)?;
    out.flush()?;

    let sig = read_signature(params, input, prompt)?;
    write_signature(out, &sig)?;

    let code = verify_status(&sk.public_key(), MESSAGE, &sig);
    info!("verification of injected signature returned {}", code);
    writeln!(out, "{}", code)?;
    Ok(())
}

fn dropbits<W: Write>(params: &'static Params, out: &mut W) -> Result<(), HarnessError> {
    let mut entropy = Entropy::new(&deterministic_seed())?;
    let sampler = Sampler::new(params)?;
    let samples = sampler.gauss_poly(&mut entropy, params.n);
    let mut rounded = vec![0i32; params.n];
    drop_bits(&mut rounded, &samples, params.d);

    write_vector(out, &samples)?;
    write_vector(out, &rounded)?;
    Ok(())
}
