//! Identifier masking for display on the OTP step.

/// Number of mask characters after the first visible character.
pub const MASK_WIDTH: usize = 9;

const MASK_CHAR: char = '*';

/// Masks an identifier of the form `local@domain`.
///
/// Keeps the first character of the local part, then always [`MASK_WIDTH`]
/// stars, so the output never hints at the real local-part length. The split
/// is at the first `@`. Without an `@` only the masked local part is returned.
pub fn mask_identifier(identifier: &str) -> String {
    let (local, domain) = match identifier.split_once('@') {
        Some((local, domain)) => (local, Some(domain)),
        None => (identifier, None),
    };

    let Some(first) = local.chars().next() else {
        return domain.map(|d| format!("@{d}")).unwrap_or_default();
    };

    let mut masked = String::with_capacity(local.len() + MASK_WIDTH + 1);
    masked.push(first);
    masked.extend(std::iter::repeat_n(MASK_CHAR, MASK_WIDTH));
    if let Some(domain) = domain {
        masked.push('@');
        masked.push_str(domain);
    }
    masked
}
