//! Reads signature components from a text stream in place of signing.

use std::io::{BufRead, Write};

use log::debug;
use pqsigs_bliss_b::{Params, Signature, TokenReader};

use crate::error::HarnessError;

/// Reads z1 (n values), z2 (n values) and c (kappa values) in that order,
/// writing a prompt before each to `prompt`.
pub fn read_signature<R: BufRead, P: Write>(
    params: &'static Params,
    input: R,
    prompt: &mut P,
) -> Result<Signature, HarnessError> {
    let mut reader = TokenReader::new(input);

    writeln!(prompt, "Enter z1 ({} integers):", params.n)?;
    prompt.flush()?;
    let z1: Vec<i32> = reader.read_vector(params.n, "z1")?;

    writeln!(prompt, "Enter z2 ({} integers):", params.n)?;
    prompt.flush()?;
    let z2: Vec<i32> = reader.read_vector(params.n, "z2")?;

    writeln!(prompt, "Enter c ({} indices):", params.kappa)?;
    prompt.flush()?;
    let c: Vec<u32> = reader.read_vector(params.kappa, "c")?;

    debug!("read {} + {} + {} signature values", z1.len(), z2.len(), c.len());
    Ok(Signature::from_components(params, z1, z2, c)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqsigs_bliss_b::{VectorError, BLISS_B_0};
    use std::io::Cursor;

    #[test]
    fn test_reads_components_in_order() {
        let mut text = String::new();
        text.push_str(&"1 ".repeat(256));
        text.push('\n');
        text.push_str(&"-2 ".repeat(256));
        text.push('\n');
        text.push_str("0 1 2 3 4 5 6 7 8 9 10 11\n");

        let mut prompt = Vec::new();
        let sig = read_signature(&BLISS_B_0, Cursor::new(text), &mut prompt).unwrap();
        assert!(sig.z1.iter().all(|&x| x == 1));
        assert!(sig.z2.iter().all(|&x| x == -2));
        assert_eq!(sig.c, (0..12).collect::<Vec<u32>>());
        assert_eq!(String::from_utf8(prompt).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_short_input_is_malformed() {
        let mut prompt = Vec::new();
        let err = read_signature(&BLISS_B_0, Cursor::new("1 2 3"), &mut prompt).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::MalformedInput(VectorError::Truncated { component: "z1", .. })
        ));
    }
}
