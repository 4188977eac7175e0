//! Recovers turtle commands from raw console output.
//!
//! Nothing is recognized until a line reading `draw mode` appears. After that,
//! every trimmed line is checked against the rule table in order; the first rule
//! that matches produces an [`Action`], and lines matching no rule are dropped
//! so programs can interleave debug output with commands.
//!
//! Keywords match case-insensitively. Text payloads (colors, messages) keep the
//! case they were printed with.

use crate::action::{Action, ActionList, TurtleOp};

/// The line that switches the parser into command mode.
pub const DRAW_MODE_MARKER: &str = "draw mode";

/// What a rule expects after its keyword.
#[derive(Clone, Copy, Debug)]
enum Argument {
    /// The keyword stands alone; the operation takes this default.
    Bare(f32),
    /// A non-negative decimal literal.
    Number,
    /// The literal word `off`.
    Off,
    /// Any non-empty remainder, verbatim.
    Text,
}

#[derive(Clone, Copy, Debug)]
enum Builder {
    Step,
    TurnLeft,
    TurnRight,
    SetColor,
    SetWidth,
    Say,
}

impl Builder {
    fn number(self, n: f32) -> Option<TurtleOp> {
        match self {
            Self::Step => Some(TurtleOp::Step(n)),
            Self::TurnLeft => Some(TurtleOp::TurnLeft(n)),
            Self::TurnRight => Some(TurtleOp::TurnRight(n)),
            Self::SetWidth => Some(TurtleOp::SetWidth(n)),
            Self::SetColor | Self::Say => None,
        }
    }

    fn text(self, s: &str) -> Option<TurtleOp> {
        match self {
            Self::SetColor => Some(TurtleOp::SetColor(s.to_owned())),
            Self::Say => Some(TurtleOp::Say(s.to_owned())),
            _ => None,
        }
    }
}

struct Rule {
    keywords: &'static [&'static str],
    argument: Argument,
    builder: Builder,
}

/// Command rules in priority order.
#[rustfmt::skip]
const GRAMMAR: &[Rule] = &[
    Rule { keywords: &["forward"], argument: Argument::Bare(1.0), builder: Builder::Step },
    Rule { keywords: &["forward"], argument: Argument::Number, builder: Builder::Step },
    Rule { keywords: &["left"], argument: Argument::Bare(90.0), builder: Builder::TurnLeft },
    Rule { keywords: &["left"], argument: Argument::Number, builder: Builder::TurnLeft },
    Rule { keywords: &["right"], argument: Argument::Bare(90.0), builder: Builder::TurnRight },
    Rule { keywords: &["right"], argument: Argument::Number, builder: Builder::TurnRight },
    Rule { keywords: &["color", "colour"], argument: Argument::Off, builder: Builder::SetColor },
    Rule { keywords: &["color", "colour"], argument: Argument::Text, builder: Builder::SetColor },
    Rule { keywords: &["width"], argument: Argument::Number, builder: Builder::SetWidth },
    Rule { keywords: &["say"], argument: Argument::Text, builder: Builder::Say },
];

/// Parses the full console output of a program into an [`ActionList`].
///
/// Never fails: unrecognized or malformed lines are skipped. Output without a
/// `draw mode` line yields an empty list.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = text.len()))]
pub fn parse(text: &str) -> ActionList {
    parse_lines(text.lines())
}

/// Same as [`parse`], for output that is already split into lines.
pub fn parse_lines<'a, I>(lines: I) -> ActionList
where
    I: IntoIterator<Item = &'a str>,
{
    let mut actions = Vec::new();
    let mut draw_mode = false;

    for raw in lines {
        let line = raw.trim();

        if !draw_mode {
            if line.eq_ignore_ascii_case(DRAW_MODE_MARKER) {
                tracing::trace!("draw mode enabled");
                draw_mode = true;
            }
            continue;
        }

        match parse_line(line) {
            Some(op) => actions.push(Action::new(op, line)),
            None => tracing::trace!(line, "skipping unrecognized line"),
        }
    }

    tracing::debug!(count = actions.len(), "parsed turtle actions");
    ActionList::new(actions)
}

/// Matches one trimmed line against the grammar.
fn parse_line(line: &str) -> Option<TurtleOp> {
    GRAMMAR.iter().find_map(|rule| {
        rule.keywords
            .iter()
            .find_map(|kw| match_rule(line, kw, rule.argument, rule.builder))
    })
}

fn match_rule(line: &str, keyword: &str, argument: Argument, builder: Builder) -> Option<TurtleOp> {
    if let Argument::Bare(default) = argument {
        return if line.eq_ignore_ascii_case(keyword) {
            builder.number(default)
        } else {
            None
        };
    }

    let rest = strip_keyword(line, keyword)?;
    match argument {
        Argument::Number => builder.number(parse_number(rest)?),
        Argument::Off if rest.eq_ignore_ascii_case("off") => builder.text(""),
        Argument::Text if !rest.is_empty() => builder.text(rest),
        _ => None,
    }
}

/// Returns what follows `keyword ` (exactly one space) in `line`, matching the
/// keyword case-insensitively.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    line[keyword.len()..].strip_prefix(' ')
}

/// Accepts `digits` or `digits.digits`; anything else, including a sign or an
/// exponent, is rejected. Literals too large to be finite are rejected as well.
fn parse_number(s: &str) -> Option<f32> {
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int) || frac.is_some_and(|f| !all_digits(f)) {
        return None;
    }
    s.parse::<f32>().ok().filter(|n| n.is_finite())
}
