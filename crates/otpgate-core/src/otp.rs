//! Per-digit OTP input model.
//!
//! Six single-digit slots plus focus bookkeeping. Focus movement is reported
//! back to the caller instead of being performed, so presentation decides
//! what "focus" means.

/// Number of digits in a one-time passcode.
pub const OTP_LENGTH: usize = 6;

/// Result of [`OtpEntry::set_digit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitOutcome {
    /// Input was not a single decimal digit (or the index was out of range).
    /// The entry is unchanged.
    Rejected,
    /// Digit stored. `advance_to` names the slot that should receive focus next.
    Accepted { advance_to: Option<usize> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpEntry {
    slots: [Option<char>; OTP_LENGTH],
    focused: usize,
    /// Focused slot content is selected; the next digit replaces it.
    selected: bool,
}

impl OtpEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `raw` in slot `index` if it is exactly one decimal digit.
    ///
    /// Anything else is silently discarded. After a stored digit at
    /// `index < 5` the outcome asks for focus on `index + 1`.
    pub fn set_digit(&mut self, index: usize, raw: &str) -> DigitOutcome {
        if index >= OTP_LENGTH {
            return DigitOutcome::Rejected;
        }
        let Some(digit) = single_digit(raw) else {
            return DigitOutcome::Rejected;
        };

        self.slots[index] = Some(digit);
        self.selected = false;

        let advance_to = (index + 1 < OTP_LENGTH).then_some(index + 1);
        self.focused = advance_to.unwrap_or(index);
        if advance_to.is_some() {
            self.selected = self.slots[self.focused].is_some();
        }
        DigitOutcome::Accepted { advance_to }
    }

    /// Focuses slot `index` and selects its content so retyping overwrites it.
    ///
    /// Returns false for an out-of-range index.
    pub fn focus_slot(&mut self, index: usize) -> bool {
        if index >= OTP_LENGTH {
            return false;
        }
        self.focused = index;
        self.selected = self.slots[index].is_some();
        true
    }

    /// Empties slot `index`.
    pub fn clear_slot(&mut self, index: usize) -> bool {
        if index >= OTP_LENGTH {
            return false;
        }
        self.slots[index] = None;
        self.selected = false;
        true
    }

    /// Fills every slot from a pasted code.
    ///
    /// Only a string of exactly six digits (surrounding whitespace ignored) is
    /// accepted; otherwise the entry is left untouched.
    pub fn paste(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.len() != OTP_LENGTH || !text.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        for (slot, digit) in self.slots.iter_mut().zip(text.chars()) {
            *slot = Some(digit);
        }
        self.focused = OTP_LENGTH - 1;
        self.selected = true;
        true
    }

    /// Concatenation of all slots; empty slots contribute nothing.
    pub fn assembled_code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Clears all slots and moves focus back to the first one.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.slots
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

fn single_digit(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Some(c),
        _ => None,
    }
}
