use alloc::string::String;

use crate::info::{MethodInfo, Receiver};

// -----------------------------------------------------------------------------
// Name synthesis

/// Converts a segmented word into camelCase.
///
/// The first letter after every `_`, `-` or space is upper-cased and the
/// separator dropped; all other characters are kept as written; the very first
/// character is lower-cased.
///
/// # Examples
///
/// ```
/// use om_reflect::access::camelize;
///
/// assert_eq!(camelize("get_var_name_blah"), "getVarNameBlah");
/// assert_eq!(camelize("is-active"), "isActive");
/// assert_eq!(camelize("UserID"), "userID");
/// ```
pub fn camelize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut upper_next = true;

    for c in word.chars() {
        if matches!(c, '_' | '-' | ' ') {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    if let Some(first) = out.get_mut(..1) {
        first.make_ascii_lowercase();
    }
    out
}

/// Synthesizes the method name a probe looks for.
///
/// # Examples
///
/// ```
/// use om_reflect::access::method_name;
///
/// assert_eq!(method_name("get", "var_name_blah"), "getVarNameBlah");
/// assert_eq!(method_name("", "is_active"), "isActive");
/// ```
pub fn method_name(prefix: &str, attribute: &str) -> String {
    if prefix.is_empty() {
        camelize(attribute)
    } else {
        let mut joined = String::with_capacity(prefix.len() + 1 + attribute.len());
        joined.push_str(prefix);
        joined.push('_');
        joined.push_str(attribute);
        camelize(&joined)
    }
}

// -----------------------------------------------------------------------------
// Probes

/// The arity a probed method must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Callable without arguments.
    NoRequired,
    /// Declares at least one parameter.
    AtLeastOne,
}

/// A named-candidate probe: a method-name prefix and a structural predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub prefix: &'static str,
    pub receiver: Receiver,
    pub arity: Arity,
}

impl Probe {
    /// Returns `true` if `method` structurally fits the probe.
    pub fn matches(&self, method: &MethodInfo) -> bool {
        method.receiver() == self.receiver
            && match self.arity {
                Arity::NoRequired => method.required_param_count() == 0,
                Arity::AtLeastOne => !method.params().is_empty(),
            }
    }
}

/// Accessor probes, in preference order: `get<Name>`, `is<Name>`, `<name>`.
pub const ACCESSOR_PROBES: &[Probe] = &[
    Probe {
        prefix: "get",
        receiver: Receiver::Ref,
        arity: Arity::NoRequired,
    },
    Probe {
        prefix: "is",
        receiver: Receiver::Ref,
        arity: Arity::NoRequired,
    },
    Probe {
        prefix: "",
        receiver: Receiver::Ref,
        arity: Arity::NoRequired,
    },
];

/// Mutator probes: `set<Name>`.
pub const MUTATOR_PROBES: &[Probe] = &[Probe {
    prefix: "set",
    receiver: Receiver::Mut,
    arity: Arity::AtLeastOne,
}];

#[cfg(test)]
mod tests {
    use super::{camelize, method_name};

    #[test]
    fn camelize_words() {
        assert_eq!(camelize(""), "");
        assert_eq!(camelize("_"), "");
        assert_eq!(camelize("name"), "name");
        assert_eq!(camelize("Name"), "name");
        assert_eq!(camelize("var__name"), "varName");
        assert_eq!(camelize("first name"), "firstName");
        assert_eq!(camelize("getURL"), "getURL");
    }

    #[test]
    fn prefixed_names() {
        assert_eq!(method_name("get", "var_name_blah"), "getVarNameBlah");
        assert_eq!(method_name("is", "enabled"), "isEnabled");
        assert_eq!(method_name("set", "id"), "setId");
        assert_eq!(method_name("", "title"), "title");
    }
}
