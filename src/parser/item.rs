//! Parser output items.

use serde::Serialize;

/// How an option's value was written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    /// No value text (`-v`, `--verbose`).
    Bare,
    /// Value in the same token (`--file=x`, `-fx`).
    Inline,
    /// Value taken from the following argv element.
    NextToken,
}

/// A parsed option with its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionValue {
    pub name: String,
    /// `"true"` for presence flags.
    pub value: String,
    pub is_short: bool,
    pub prefix: String,
    pub spelling: Spelling,
    /// Continues the previous item's short-option bundle.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bundled: bool,
}

/// A semantic item produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    ProgramName { text: String },
    OptionValue(OptionValue),
    Positional { value: String },
    Separator { text: String },
}

impl Item {
    pub fn program_name(text: impl Into<String>) -> Self {
        Item::ProgramName { text: text.into() }
    }

    pub fn positional(value: impl Into<String>) -> Self {
        Item::Positional {
            value: value.into(),
        }
    }

    pub fn separator(text: impl Into<String>) -> Self {
        Item::Separator { text: text.into() }
    }

    pub fn is_option(&self) -> bool {
        matches!(self, Item::OptionValue(_))
    }

    /// The option payload, if this is an option item.
    pub fn as_option(&self) -> Option<&OptionValue> {
        match self {
            Item::OptionValue(opt) => Some(opt),
            _ => None,
        }
    }

    /// Rebuild an argv from parsed items.
    ///
    /// Without permutation the result equals the parsed argv exactly.
    pub fn strings(items: &[Item]) -> Vec<String> {
        let mut argv: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Item::ProgramName { text } | Item::Separator { text } => argv.push(text.clone()),
                Item::Positional { value } => argv.push(value.clone()),
                Item::OptionValue(opt) => opt.write_to(&mut argv),
            }
        }
        argv
    }
}

impl OptionValue {
    fn write_to(&self, argv: &mut Vec<String>) {
        if self.bundled && !argv.is_empty() {
            if let Some(last) = argv.last_mut() {
                last.push_str(&self.name);
            }
        } else {
            argv.push(format!("{}{}", self.prefix, self.name));
        }
        let Some(head) = argv.last_mut() else {
            return;
        };

        match self.spelling {
            Spelling::Bare => {}
            Spelling::Inline if self.is_short => head.push_str(&self.value),
            Spelling::Inline => {
                head.push('=');
                head.push_str(&self.value);
            }
            Spelling::NextToken => argv.push(self.value.clone()),
        }
    }
}
