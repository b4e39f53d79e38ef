//! Brace-style template interpolation.
//!
//! Supported fields: `{}` (next positional), `{0}` (positional by index),
//! `{name}` (named), each optionally followed by `:[[fill]align][width][.precision]`.
//! `{{` and `}}` are literal braces.

use std::collections::BTreeMap;

use crate::error::{I18nError, Result};

/// Widest padding a format spec may request.
pub const MAX_WIDTH: usize = 4096;

/// Arguments substituted into a resolved translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatArgs {
    positional: Vec<String>,
    named: BTreeMap<String, String>,
}

impl FormatArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.positional.push(value.to_string());
        self
    }

    /// Set a named argument, replacing any previous value for `name`.
    pub fn named(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.named.insert(name.into(), value.to_string());
        self
    }

    pub fn push(&mut self, value: impl ToString) {
        self.positional.push(value.to_string());
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.named.insert(name.into(), value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Unset,
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy)]
struct Spec {
    fill: char,
    align: Align,
    width: usize,
    precision: Option<usize>,
}

impl Default for Spec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: Align::Left,
            width: 0,
            precision: None,
        }
    }
}

/// Substitute `args` into `template`.
///
/// Fails if a field references an argument that was not supplied.
///
/// ```
/// use quicki18n::format::{FormatArgs, format_template};
///
/// let args = FormatArgs::new().arg("en").named("name", "Alice");
/// assert_eq!(format_template("{} for {name}", &args).unwrap(), "en for Alice");
/// ```
pub fn format_template(template: &str, args: &FormatArgs) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut numbering = Numbering::Unset;
    let mut next_auto = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '}' => {
                return Err(I18nError::formatting(template, "single '}' encountered"));
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => {
                            return Err(I18nError::formatting(
                                template,
                                "nested fields are not supported",
                            ));
                        }
                        _ => field.push(c),
                    }
                }
                if !closed {
                    return Err(I18nError::formatting(template, "single '{' encountered"));
                }

                let (name, spec) = match field.split_once(':') {
                    Some((name, spec)) => (name, parse_spec(template, spec)?),
                    None => (field.as_str(), Spec::default()),
                };
                let value = resolve_field(template, name, args, &mut numbering, &mut next_auto)?;
                apply_spec(&mut output, value, spec);
            }
            _ => output.push(c),
        }
    }

    Ok(output)
}

fn resolve_field<'a>(
    template: &str,
    name: &str,
    args: &'a FormatArgs,
    numbering: &mut Numbering,
    next_auto: &mut usize,
) -> Result<&'a str> {
    if name.is_empty() {
        if *numbering == Numbering::Manual {
            return Err(I18nError::formatting(
                template,
                "cannot switch from manual field numbering to automatic field numbering",
            ));
        }
        *numbering = Numbering::Automatic;
        let index = *next_auto;
        *next_auto += 1;
        return positional(template, args, index);
    }

    if let Ok(index) = name.parse::<usize>() {
        if *numbering == Numbering::Automatic {
            return Err(I18nError::formatting(
                template,
                "cannot switch from automatic field numbering to manual field numbering",
            ));
        }
        *numbering = Numbering::Manual;
        return positional(template, args, index);
    }

    if name.contains(['.', '[', '!']) {
        return Err(I18nError::formatting(
            template,
            format!("unsupported field expression '{name}'"),
        ));
    }

    args.named.get(name).map(String::as_str).ok_or_else(|| {
        I18nError::formatting(template, format!("missing named argument '{name}'"))
    })
}

fn positional<'a>(template: &str, args: &'a FormatArgs, index: usize) -> Result<&'a str> {
    args.positional.get(index).map(String::as_str).ok_or_else(|| {
        I18nError::formatting(
            template,
            format!("positional argument {index} out of range ({} supplied)", args.positional.len()),
        )
    })
}

fn parse_spec(template: &str, raw: &str) -> Result<Spec> {
    let mut spec = Spec::default();
    let chars: Vec<char> = raw.chars().collect();
    let mut pos = 0;

    let align_of = |c: char| match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        _ => None,
    };

    if let Some(align) = chars.get(1).copied().and_then(align_of) {
        spec.fill = chars[0];
        spec.align = align;
        pos = 2;
    } else if let Some(align) = chars.first().copied().and_then(align_of) {
        spec.align = align;
        pos = 1;
    }

    let width: String = chars[pos..].iter().take_while(|c| c.is_ascii_digit()).collect();
    pos += width.len();
    if !width.is_empty() {
        spec.width = width
            .parse()
            .ok()
            .filter(|width| *width <= MAX_WIDTH)
            .ok_or_else(|| I18nError::formatting(template, format!("invalid width in '{raw}'")))?;
    }

    if chars.get(pos) == Some(&'.') {
        let precision: String = chars[pos + 1..].iter().take_while(|c| c.is_ascii_digit()).collect();
        if precision.is_empty() {
            return Err(I18nError::formatting(template, format!("missing precision in '{raw}'")));
        }
        pos += 1 + precision.len();
        spec.precision = Some(precision.parse().map_err(|_| {
            I18nError::formatting(template, format!("invalid precision in '{raw}'"))
        })?);
    }

    if pos != chars.len() {
        return Err(I18nError::formatting(
            template,
            format!("unsupported format spec '{raw}'"),
        ));
    }

    Ok(spec)
}

fn apply_spec(output: &mut String, value: &str, spec: Spec) {
    let truncated: String = match spec.precision {
        Some(precision) => value.chars().take(precision).collect(),
        None => value.to_string(),
    };

    let len = truncated.chars().count();
    let padding = spec.width.saturating_sub(len);
    let (before, after) = match spec.align {
        Align::Left => (0, padding),
        Align::Right => (padding, 0),
        Align::Center => (padding / 2, padding - padding / 2),
    };

    output.extend(std::iter::repeat_n(spec.fill, before));
    output.push_str(&truncated);
    output.extend(std::iter::repeat_n(spec.fill, after));
}
