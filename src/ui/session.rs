// Terminal session
// Establishes a key pair, then codes every input line forward and back

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::rsa::errors::CodecError;
use crate::rsa::keygen::{KeyPairSynthesizer, RsaKeyPair};
use crate::rsa::layout::ByteLayout;
use crate::rsa::sampler::SeedSource;
use crate::util::fingerprint::{private_fingerprint, public_fingerprint};

const PROMPT: &str = "> ";

/// Call [`KeyPairSynthesizer::generate`] until it yields a pair.
///
/// Returns the pair and the number of attempts it took.
pub fn establish_keys<R, S>(synthesizer: &mut KeyPairSynthesizer<R, S>) -> (RsaKeyPair, u64)
where
    R: RngCore + SeedableRng,
    S: SeedSource,
{
    let mut attempts = 0u64;
    loop {
        attempts += 1;
        match synthesizer.generate() {
            Ok(keypair) => {
                info!(attempts, public_key = %keypair.public_key, "key pair established");
                return (keypair, attempts);
            }
            Err(err) => debug!(attempts, %err, "synthesis attempt failed"),
        }
    }
}

/// Interactive loop over a reader and a writer, holding one key pair.
pub struct Session<R, W> {
    keypair: RsaKeyPair,
    layout: ByteLayout,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(keypair: RsaKeyPair, layout: ByteLayout, input: R, output: W) -> Self {
        Self {
            keypair,
            layout,
            input,
            output,
        }
    }

    pub fn keypair(&self) -> &RsaKeyPair {
        &self.keypair
    }

    /// Code one line forward, then back. NULs are dropped from the result.
    pub fn process_line(&self, line: &str) -> Result<(String, String), CodecError> {
        let coded = self.keypair.public_key.forward(line, self.layout);
        let decoded = self.keypair.private_key.backward(&coded, self.layout)?;
        Ok((coded, decoded.replace('\0', "")))
    }

    /// Print the keys, then serve lines until end of input.
    ///
    /// Codec errors are reported inline and the session keeps its keys.
    /// Returns the number of lines read.
    pub fn run(&mut self) -> Result<usize> {
        self.print_keys()?;

        let mut lines = 0;
        let mut line = String::new();
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            line.clear();
            let read = self.input.read_line(&mut line).context("reading input")?;
            if read == 0 {
                writeln!(self.output)?;
                info!(lines, "input closed");
                return Ok(lines);
            }
            lines += 1;

            let text = line.trim_end_matches(['\n', '\r']);
            match self.process_line(text) {
                Ok((coded, decoded)) => {
                    writeln!(self.output, "coded: {}", coded)?;
                    writeln!(self.output, "decoded: {}", decoded)?;
                }
                Err(err) => {
                    debug!(%err, "line rejected");
                    writeln!(self.output, "error: {}", err)?;
                }
            }
        }
    }

    fn print_keys(&mut self) -> Result<()> {
        let public = &self.keypair.public_key;
        let private = &self.keypair.private_key;
        writeln!(self.output, "public key:  {} sha256 {}", public, public_fingerprint(public))?;
        writeln!(self.output, "private key: {} sha256 {}", private, private_fingerprint(private))?;
        Ok(())
    }
}
