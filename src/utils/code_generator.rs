//! Short name generation.
//!
//! Produces uniformly distributed alphanumeric names from the OS CSPRNG by
//! rejection sampling, so no character is favoured by modulo bias.

use crate::error::AppError;

/// Characters a generated short name is drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated short name.
pub const GENERATED_LEN: usize = 8;

/// Bytes at or above this value are discarded. Largest multiple of 62 not above 256.
const CUTOFF: u8 = ((256 / ALPHABET.len()) * ALPHABET.len()) as u8;

const BUFFER_LEN: usize = 32;

/// Generates an 8-character short name.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random source fails. The
/// failure is not retried.
///
/// # Examples
///
/// ```ignore
/// let code = generate_short_name()?;
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_short_name() -> Result<String, AppError> {
    let mut out = String::with_capacity(GENERATED_LEN);
    let mut buffer = [0u8; BUFFER_LEN];

    while out.len() < GENERATED_LEN {
        getrandom::fill(&mut buffer)?;
        push_accepted(&buffer, &mut out, GENERATED_LEN);
    }

    Ok(out)
}

/// Appends alphabet characters for every accepted byte until `out` reaches `len`.
fn push_accepted(bytes: &[u8], out: &mut String, len: usize) {
    for &b in bytes {
        if out.len() == len {
            return;
        }
        if b >= CUTOFF {
            continue;
        }
        out.push(ALPHABET[b as usize % ALPHABET.len()] as char);
    }
}
