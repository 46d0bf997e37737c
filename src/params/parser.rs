//! Line-oriented directive parser that never fails
//!
//! Each line holds one `key value` directive; the key may be separated from
//! its value by whitespace, `:` or `=`. Unknown keys, malformed values and
//! out-of-range numbers are skipped so the affected field keeps its default.

use crate::io::configuration::{MAX_CELL_SIZE, MAX_GAP, MAX_GRID_CELLS_PER_AXIS};
use crate::params::ParameterSet;
use crate::params::color::parse_color;

/// Text form of the default parameters
///
/// `parse(DEFAULT_STRING)` yields `ParameterSet::default()`.
pub const DEFAULT_STRING: &str = "rows 3\ncolumns 3\ncell_width 256\ncell_height 256\ngap 8\nbackground #ffffff\nfile grid-image.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Rows,
    Columns,
    CellWidth,
    CellHeight,
    CellSize,
    Gap,
    Background,
    FileName,
}

impl Directive {
    fn from_key(key: &str) -> Option<Self> {
        let directive = match key.to_ascii_lowercase().as_str() {
            "rows" | "row" => Self::Rows,
            "columns" | "column" | "cols" => Self::Columns,
            "cell_width" | "width" => Self::CellWidth,
            "cell_height" | "height" => Self::CellHeight,
            "cell" | "cell_size" => Self::CellSize,
            "gap" | "spacing" => Self::Gap,
            "background" | "bg" => Self::Background,
            "file" | "file_name" | "filename" => Self::FileName,
            _ => return None,
        };
        Some(directive)
    }
}

/// Parse free-form parameter text into a [`ParameterSet`]
///
/// Fields without a usable directive keep their defaults. Later directives
/// override earlier ones.
pub fn parse(text: &str) -> ParameterSet {
    let mut params = ParameterSet::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = split_directive(line) else {
            log::debug!("Ignoring parameter line without value: {line}");
            continue;
        };

        let Some(directive) = Directive::from_key(key) else {
            log::debug!("Ignoring unknown parameter '{key}'");
            continue;
        };

        if !apply(&mut params, directive, value) {
            log::debug!("Ignoring unusable value '{value}' for '{key}'");
        }
    }

    params
}

// Splits "key value", "key: value" and "key = value" forms
fn split_directive(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(|c: char| c.is_whitespace() || c == ':' || c == '=')?;
    let value = rest
        .trim_start()
        .trim_start_matches([':', '='])
        .trim();

    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

fn apply(params: &mut ParameterSet, directive: Directive, value: &str) -> bool {
    match directive {
        Directive::Rows => parse_bounded(value, 0, MAX_GRID_CELLS_PER_AXIS)
            .map(|rows| params.rows = rows)
            .is_some(),
        Directive::Columns => parse_bounded(value, 0, MAX_GRID_CELLS_PER_AXIS)
            .map(|columns| params.columns = columns)
            .is_some(),
        Directive::CellWidth => parse_bounded(value, 1, MAX_CELL_SIZE)
            .map(|width| params.cell_width = width)
            .is_some(),
        Directive::CellHeight => parse_bounded(value, 1, MAX_CELL_SIZE)
            .map(|height| params.cell_height = height)
            .is_some(),
        Directive::CellSize => parse_cell_size(value)
            .map(|(width, height)| {
                params.cell_width = width;
                params.cell_height = height;
            })
            .is_some(),
        Directive::Gap => parse_bounded(value, 0, MAX_GAP)
            .map(|gap| params.gap = gap)
            .is_some(),
        Directive::Background => {
            let tokens: Vec<&str> = value.split_whitespace().collect();
            parse_color(&tokens)
                .map(|color| params.background = color)
                .is_some()
        }
        Directive::FileName => parse_file_name(value)
            .map(|name| params.file_name = name)
            .is_some(),
    }
}

fn parse_bounded(value: &str, min: u32, max: u32) -> Option<u32> {
    let mut tokens = value.split_whitespace();
    let number = tokens.next()?.parse::<u32>().ok()?;
    // Trailing garbage makes the whole directive unusable
    if tokens.next().is_some() {
        return None;
    }
    (min..=max).contains(&number).then_some(number)
}

// Accepts "W H", "WxH" or a single "S" for square cells
fn parse_cell_size(value: &str) -> Option<(u32, u32)> {
    let normalized = value.to_ascii_lowercase().replace('x', " ");
    let mut tokens = normalized.split_whitespace();
    let first = tokens.next()?;
    let second = tokens.next();
    if tokens.next().is_some() {
        return None;
    }

    let width = parse_bounded(first, 1, MAX_CELL_SIZE)?;
    let height = match second {
        Some(token) => parse_bounded(token, 1, MAX_CELL_SIZE)?,
        None => width,
    };
    Some((width, height))
}

fn parse_file_name(value: &str) -> Option<String> {
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return None;
    }

    if std::path::Path::new(value).extension().is_some() {
        Some(value.to_string())
    } else {
        Some(format!("{value}.png"))
    }
}
