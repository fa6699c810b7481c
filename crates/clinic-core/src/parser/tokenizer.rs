//! Splits command arguments into prefixed values.
//!
//! A prefix only counts when it starts the argument string or follows
//! whitespace, so `newi/` never matches as `i/`.

use std::collections::HashMap;
use std::fmt;

/// An argument marker such as `i/` or `from/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(marker: &'static str) -> Self {
        Self(marker)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NRIC: Prefix = Prefix::new("i/");
pub const PREFIX_NAME: Prefix = Prefix::new("n/");
pub const PREFIX_DOB: Prefix = Prefix::new("b/");
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
pub const PREFIX_EMAIL: Prefix = Prefix::new("e/");
pub const PREFIX_ADDRESS: Prefix = Prefix::new("a/");

pub const PREFIX_DATE: Prefix = Prefix::new("d/");
pub const PREFIX_START: Prefix = Prefix::new("from/");
pub const PREFIX_END: Prefix = Prefix::new("to/");
pub const PREFIX_APPT_TYPE: Prefix = Prefix::new("t/");
pub const PREFIX_NOTE: Prefix = Prefix::new("note/");

pub const PREFIX_NEW_NRIC: Prefix = Prefix::new("newi/");
pub const PREFIX_NEW_NAME: Prefix = Prefix::new("newn/");
pub const PREFIX_NEW_DOB: Prefix = Prefix::new("newb/");
pub const PREFIX_NEW_PHONE: Prefix = Prefix::new("newp/");
pub const PREFIX_NEW_EMAIL: Prefix = Prefix::new("newe/");
pub const PREFIX_NEW_ADDRESS: Prefix = Prefix::new("newa/");

pub const PREFIX_NEW_DATE: Prefix = Prefix::new("newd/");
pub const PREFIX_NEW_START: Prefix = Prefix::new("newfrom/");
pub const PREFIX_NEW_END: Prefix = Prefix::new("newto/");
pub const PREFIX_NEW_APPT_TYPE: Prefix = Prefix::new("newt/");
pub const PREFIX_NEW_NOTE: Prefix = Prefix::new("newnote/");

/// Values found for each prefix, in input order, plus the text before the
/// first prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Prefixes from `prefixes` that were given more than once.
    pub fn repeated(&self, prefixes: &[Prefix]) -> Vec<Prefix> {
        prefixes
            .iter()
            .copied()
            .filter(|p| self.all_values(*p).len() > 1)
            .collect()
    }
}

/// Split `args` on every occurrence of the given prefixes.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    for &prefix in prefixes {
        let marker = prefix.as_str();
        let mut from = 0;
        while let Some(found) = args[from..].find(marker) {
            let index = from + found;
            let at_boundary = args[..index]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if at_boundary {
                positions.push((index, prefix));
            }
            from = index + marker.len();
        }
    }
    positions.sort_by_key(|(index, _)| *index);

    let preamble_end = positions.first().map_or(args.len(), |(index, _)| *index);
    let mut map = ArgumentMultimap {
        preamble: args[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };

    for (i, (index, prefix)) in positions.iter().enumerate() {
        let value_start = index + prefix.as_str().len();
        let value_end = positions.get(i + 1).map_or(args.len(), |(next, _)| *next);
        map.values
            .entry(*prefix)
            .or_default()
            .push(args[value_start..value_end].trim().to_string());
    }
    map
}
