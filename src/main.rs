use std::io;
use std::process;

use anyhow::{Context, Result};

use toy_rsa::rsa::KeyPairSynthesizer;
use toy_rsa::ui::{establish_keys, install_interrupt_handler, Session};
use toy_rsa::util::{logging, SynthesisConfig};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error running session: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    logging::init();
    install_interrupt_handler()?;

    let config = SynthesisConfig::from_env().context("invalid configuration")?;
    let layout = config.layout;
    let mut synthesizer = KeyPairSynthesizer::from_config(config)?;

    let (keypair, _) = establish_keys(&mut synthesizer);

    let stdin = io::stdin();
    // left unlocked so the interrupt handler can still write
    Session::new(keypair, layout, stdin.lock(), io::stdout()).run()?;
    Ok(())
}
