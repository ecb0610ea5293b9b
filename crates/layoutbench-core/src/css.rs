//! CSS value parsing for the Taffy host
//!
//! Only the subset the benchmark layouts use is understood: lengths, track
//! lists, `grid-column` line pairs, padding shorthands and `var()`
//! substitution. Anything else is rejected with a [`StyleError`].

use crate::error::{StyleError, StyleResult};
use crate::style::Declaration;
use taffy::prelude::*;

/// A length value as written in a declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
    Auto,
}

impl Length {
    fn to_dimension(self) -> Dimension {
        match self {
            Length::Px(v) => Dimension::Length(v),
            Length::Percent(p) => Dimension::Percent(p / 100.0),
            Length::Auto => Dimension::Auto,
        }
    }

    fn to_length_percentage(self) -> LengthPercentage {
        match self {
            Length::Px(v) => LengthPercentage::Length(v),
            Length::Percent(p) => LengthPercentage::Percent(p / 100.0),
            Length::Auto => LengthPercentage::Length(0.0),
        }
    }
}

/// One column track of a grid template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    Px(f32),
    Percent(f32),
    Fr(f32),
    Auto,
}

impl Track {
    fn to_taffy(self) -> TrackSizingFunction {
        match self {
            Track::Px(v) => length(v),
            Track::Percent(p) => percent(p / 100.0),
            Track::Fr(f) => fr(f),
            Track::Auto => auto(),
        }
    }
}

/// Value of `grid-template-columns`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TemplateColumns {
    #[default]
    None,
    Tracks(Vec<Track>),
    /// Adopt the column tracks of the parent grid.
    Subgrid,
    /// Adopt the column tracks of the owning table (rows of a table).
    TableColumns,
}

impl TemplateColumns {
    /// Whether the tracks come from an ancestor.
    pub fn is_inherited(&self) -> bool {
        matches!(self, TemplateColumns::Subgrid | TemplateColumns::TableColumns)
    }
}

/// Style of one element after cascade and `var()` substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub flex_direction: FlexDirection,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub width: Length,
    pub height: Length,
    pub padding: [Length; 4],
    pub template_columns: TemplateColumns,
    pub grid_column: Option<(i16, i16)>,
    pub table_layout_fixed: bool,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            flex_direction: FlexDirection::Row,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            width: Length::Auto,
            height: Length::Auto,
            padding: [Length::Px(0.0); 4],
            template_columns: TemplateColumns::None,
            grid_column: None,
            table_layout_fixed: false,
        }
    }
}

impl ComputedStyle {
    /// Cascade already-substituted declarations in order; later ones win.
    ///
    /// Custom properties and unknown properties are ignored here.
    pub fn from_declarations<'a>(
        declarations: impl IntoIterator<Item = &'a Declaration>,
    ) -> StyleResult<Self> {
        let mut style = ComputedStyle::default();
        for decl in declarations {
            style.apply(&decl.property, decl.value.trim())?;
        }
        Ok(style)
    }

    fn apply(&mut self, property: &str, value: &str) -> StyleResult<()> {
        match property {
            "display" => {
                self.display = match value {
                    "grid" => Display::Grid,
                    "flex" => Display::Flex,
                    "none" => Display::None,
                    _ => Display::Block,
                }
            }
            "flex-direction" => {
                self.flex_direction = match value {
                    "column" => FlexDirection::Column,
                    "column-reverse" => FlexDirection::ColumnReverse,
                    "row-reverse" => FlexDirection::RowReverse,
                    _ => FlexDirection::Row,
                }
            }
            "flex-grow" => self.flex_grow = parse_number(property, value)?,
            "flex-shrink" => self.flex_shrink = parse_number(property, value)?,
            "width" => self.width = parse_length(property, value)?,
            "height" => self.height = parse_length(property, value)?,
            "padding" => self.padding = parse_padding(value)?,
            "grid-template-columns" => self.template_columns = parse_template_columns(value)?,
            "grid-column" => self.grid_column = parse_line_pair(value)?,
            "table-layout" => self.table_layout_fixed = value == "fixed",
            _ => {}
        }
        Ok(())
    }

    /// Convert to a Taffy style. `columns` are the resolved tracks for
    /// templates that inherit them.
    pub fn to_taffy(&self, columns: Option<&[Track]>) -> Style {
        let tracks: Vec<TrackSizingFunction> = match (&self.template_columns, columns) {
            (TemplateColumns::Tracks(tracks), _) => tracks.iter().map(|t| t.to_taffy()).collect(),
            (TemplateColumns::Subgrid | TemplateColumns::TableColumns, Some(tracks)) => {
                tracks.iter().map(|t| t.to_taffy()).collect()
            }
            _ => Vec::new(),
        };

        let grid_column = match self.grid_column {
            Some((start, end)) => Line {
                start: line(start),
                end: line(end),
            },
            None => Line {
                start: GridPlacement::Auto,
                end: GridPlacement::Auto,
            },
        };

        let [top, right, bottom, left] = self.padding;

        Style {
            display: self.display,
            flex_direction: self.flex_direction,
            flex_grow: self.flex_grow,
            flex_shrink: self.flex_shrink,
            size: Size {
                width: self.width.to_dimension(),
                height: self.height.to_dimension(),
            },
            padding: Rect {
                left: left.to_length_percentage(),
                right: right.to_length_percentage(),
                top: top.to_length_percentage(),
                bottom: bottom.to_length_percentage(),
            },
            grid_template_columns: tracks,
            grid_column,
            ..Default::default()
        }
    }
}

/// Parse `150px`, `50%`, `0` or `auto`.
pub fn parse_length(property: &str, value: &str) -> StyleResult<Length> {
    let value = value.trim();
    let invalid = || StyleError::InvalidLength {
        property: property.to_string(),
        value: value.to_string(),
    };

    if value == "auto" {
        return Ok(Length::Auto);
    }
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse::<f32>().map(Length::Px).map_err(|_| invalid());
    }
    if let Some(pct) = value.strip_suffix('%') {
        return pct.trim().parse::<f32>().map(Length::Percent).map_err(|_| invalid());
    }
    match value.parse::<f32>() {
        Ok(v) if v == 0.0 => Ok(Length::Px(0.0)),
        _ => Err(invalid()),
    }
}

fn parse_number(property: &str, value: &str) -> StyleResult<f32> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| StyleError::InvalidNumber {
            property: property.to_string(),
            value: value.to_string(),
        })
}

/// Parse a one to four value padding shorthand into `[top, right, bottom, left]`.
pub fn parse_padding(value: &str) -> StyleResult<[Length; 4]> {
    let parts = value
        .split_whitespace()
        .map(|v| parse_length("padding", v))
        .collect::<StyleResult<Vec<_>>>()?;
    match parts.as_slice() {
        [all] => Ok([*all; 4]),
        [vertical, horizontal] => Ok([*vertical, *horizontal, *vertical, *horizontal]),
        [top, horizontal, bottom] => Ok([*top, *horizontal, *bottom, *horizontal]),
        [top, right, bottom, left] => Ok([*top, *right, *bottom, *left]),
        _ => Err(StyleError::InvalidLength {
            property: "padding".to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parse a `grid-template-columns` value such as `150px 1fr 1fr` or `subgrid`.
pub fn parse_template_columns(value: &str) -> StyleResult<TemplateColumns> {
    let value = value.trim();
    match value {
        "none" => return Ok(TemplateColumns::None),
        "subgrid" => return Ok(TemplateColumns::Subgrid),
        "table-columns" => return Ok(TemplateColumns::TableColumns),
        _ => {}
    }

    let invalid = || StyleError::InvalidTrackList(value.to_string());
    let tracks = value
        .split_whitespace()
        .map(|token| {
            if token == "auto" {
                Ok(Track::Auto)
            } else if let Some(n) = token.strip_suffix("fr") {
                n.parse::<f32>().map(Track::Fr).map_err(|_| invalid())
            } else {
                match parse_length("grid-template-columns", token) {
                    Ok(Length::Px(v)) => Ok(Track::Px(v)),
                    Ok(Length::Percent(p)) => Ok(Track::Percent(p)),
                    _ => Err(invalid()),
                }
            }
        })
        .collect::<StyleResult<Vec<_>>>()?;

    if tracks.is_empty() {
        return Err(invalid());
    }
    Ok(TemplateColumns::Tracks(tracks))
}

/// Parse `grid-column: <start> / <end>`; `auto` clears the placement.
pub fn parse_line_pair(value: &str) -> StyleResult<Option<(i16, i16)>> {
    let value = value.trim();
    if value == "auto" {
        return Ok(None);
    }
    let invalid = || StyleError::InvalidPlacement(value.to_string());
    let (start, end) = value.split_once('/').ok_or_else(invalid)?;
    let start = start.trim().parse::<i16>().map_err(|_| invalid())?;
    let end = end.trim().parse::<i16>().map_err(|_| invalid())?;
    if start == 0 || end == 0 {
        return Err(invalid());
    }
    Ok(Some((start, end)))
}

/// Replace every `var(--name[, fallback])` in `value`.
///
/// `lookup` resolves a custom property against the element and its
/// ancestors. A missing property without fallback is an error.
pub fn substitute_vars<F>(value: &str, lookup: &F) -> StyleResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains("var(") {
        return Ok(value.to_string());
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("var(") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 4..];
        let close = matching_paren(after).ok_or_else(|| StyleError::MalformedVar(value.to_string()))?;
        let inner = &after[..close];
        let (name, fallback) = match inner.split_once(',') {
            Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
            None => (inner.trim(), None),
        };
        if !name.starts_with("--") {
            return Err(StyleError::MalformedVar(value.to_string()));
        }

        let resolved = match (lookup(name), fallback) {
            (Some(v), _) => v,
            (None, Some(fallback)) => substitute_vars(fallback, lookup)?,
            (None, None) => {
                return Err(StyleError::UnresolvedVariable {
                    name: name.to_string(),
                })
            }
        };
        out.push_str(&resolved);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Index of the `)` closing an already-opened parenthesis.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(name: &str) -> Option<String> {
        match name {
            "--column-0-width" => Some("150px".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_parse_lengths() {
        assert_eq!(parse_length("width", "150px"), Ok(Length::Px(150.0)));
        assert_eq!(parse_length("width", "100%"), Ok(Length::Percent(100.0)));
        assert_eq!(parse_length("width", "auto"), Ok(Length::Auto));
        assert_eq!(parse_length("width", "0"), Ok(Length::Px(0.0)));
        assert!(parse_length("width", "12em").is_err());
    }

    #[test]
    fn test_parse_template_columns() {
        assert_eq!(
            parse_template_columns("250px 1fr 1fr"),
            Ok(TemplateColumns::Tracks(vec![
                Track::Px(250.0),
                Track::Fr(1.0),
                Track::Fr(1.0)
            ]))
        );
        assert_eq!(parse_template_columns("subgrid"), Ok(TemplateColumns::Subgrid));
        assert!(parse_template_columns("repeat(3, 1fr)").is_err());
        assert!(parse_template_columns("").is_err());
    }

    #[test]
    fn test_parse_line_pair() {
        assert_eq!(parse_line_pair("1 / -1"), Ok(Some((1, -1))));
        assert_eq!(parse_line_pair("auto"), Ok(None));
        assert!(parse_line_pair("0 / 2").is_err());
        assert!(parse_line_pair("span 2").is_err());
    }

    #[test]
    fn test_padding_shorthand() {
        assert_eq!(
            parse_padding("4px 8px"),
            Ok([Length::Px(4.0), Length::Px(8.0), Length::Px(4.0), Length::Px(8.0)])
        );
    }

    #[test]
    fn test_substitute_vars() {
        assert_eq!(
            substitute_vars("var(--column-0-width) 1fr 1fr", &vars),
            Ok("150px 1fr 1fr".to_string())
        );
        assert_eq!(
            substitute_vars("var(--missing, var(--column-0-width))", &vars),
            Ok("150px".to_string())
        );
        assert_eq!(
            substitute_vars("var(--missing)", &vars),
            Err(StyleError::UnresolvedVariable {
                name: "--missing".to_string()
            })
        );
        assert!(substitute_vars("var(--column-0-width", &vars).is_err());
    }

    #[test]
    fn test_later_declarations_win() {
        let decls = vec![
            Declaration::new("display", "block"),
            Declaration::new("width", "100px"),
            Declaration::new("display", "grid"),
            Declaration::new("--ignored", "1px"),
        ];
        let style = ComputedStyle::from_declarations(&decls).unwrap();
        assert_eq!(style.display, Display::Grid);
        assert_eq!(style.width, Length::Px(100.0));
    }

    #[test]
    fn test_inherited_tracks_applied() {
        let style = ComputedStyle {
            display: Display::Grid,
            template_columns: TemplateColumns::Subgrid,
            ..Default::default()
        };
        let tracks = [Track::Px(150.0), Track::Fr(1.0)];
        assert_eq!(style.to_taffy(Some(&tracks[..])).grid_template_columns.len(), 2);
        assert!(style.to_taffy(None).grid_template_columns.is_empty());
    }
}
