//! Part classification: display name -> visual archetype.
//!
//! Both color and shape come from ordered rule tables. The first matching rule
//! wins and every table has a default, so classification is total.

use assembly_types::{Archetype, ColorToken, ShapeKind};

/// Separator between a part's kind and its qualifier, e.g. `垫片：PTFE`.
pub const SEGMENT_SEPARATOR: char = '：';

/// Color for names no rule matches.
pub const DEFAULT_COLOR: ColorToken = ColorToken::rgb(0x6c, 0x75, 0x7d);

/// Shape for names no rule matches.
pub const DEFAULT_SHAPE: ShapeKind = ShapeKind::Cylinder;

/// A known part-name fragment and its color.
#[derive(Debug, Clone, Copy)]
pub struct ColorRule {
    pub key: &'static str,
    pub color: ColorToken,
}

/// Color rules, in precedence order.
pub const COLOR_RULES: &[ColorRule] = &[
    ColorRule { key: "标准快开人孔", color: ColorToken::rgb(0x4a, 0x90, 0xd9) },
    ColorRule { key: "垫片", color: ColorToken::rgb(0xe7, 0x4c, 0x3c) },
    ColorRule { key: "凸缘", color: ColorToken::rgb(0xf3, 0x9c, 0x12) },
    ColorRule { key: "过渡法兰", color: ColorToken::rgb(0x9b, 0x59, 0xb6) },
    ColorRule { key: "螺固件", color: ColorToken::rgb(0x7f, 0x8c, 0x8d) },
    ColorRule { key: "安全阀", color: ColorToken::rgb(0x27, 0xae, 0x60) },
    ColorRule { key: "螺塞", color: ColorToken::rgb(0x34, 0x49, 0x5e) },
    ColorRule { key: "球阀主体", color: ColorToken::rgb(0x34, 0x98, 0xdb) },
    ColorRule { key: "密封垫片", color: ColorToken::rgb(0xe7, 0x4c, 0x3c) },
    ColorRule { key: "手柄组件", color: ColorToken::rgb(0x1a, 0xbc, 0x9c) },
    ColorRule { key: "连接螺栓", color: ColorToken::rgb(0x7f, 0x8c, 0x8d) },
    ColorRule { key: "底阀主体", color: ColorToken::rgb(0x29, 0x80, 0xb9) },
    ColorRule { key: "法兰接口", color: ColorToken::rgb(0x8e, 0x44, 0xad) },
    ColorRule { key: "密封组件", color: ColorToken::rgb(0xc0, 0x39, 0x2b) },
];

/// Name markers that select a shape.
#[derive(Debug, Clone, Copy)]
pub struct ShapeRule {
    /// The rule matches if the name contains any of these.
    pub markers: &'static [&'static str],
    pub shape: ShapeKind,
}

/// Shape rules, in precedence order: seals before fasteners before handles.
pub const SHAPE_RULES: &[ShapeRule] = &[
    ShapeRule { markers: &["垫片", "密封"], shape: ShapeKind::Ring },
    ShapeRule { markers: &["螺"], shape: ShapeKind::Sphere },
    ShapeRule { markers: &["手柄"], shape: ShapeKind::Box },
];

/// The archetype for names that match no rule.
pub const fn default_archetype() -> Archetype {
    Archetype {
        color: DEFAULT_COLOR,
        shape: DEFAULT_SHAPE,
    }
}

/// Classify a part by its display name.
pub fn classify(name: &str) -> Archetype {
    Archetype {
        color: classify_color(name),
        shape: classify_shape(name),
    }
}

/// The portion of `name` before the first [`SEGMENT_SEPARATOR`].
pub fn name_segment(name: &str) -> &str {
    name.split(SEGMENT_SEPARATOR).next().unwrap_or(name)
}

pub fn classify_color(name: &str) -> ColorToken {
    let segment = name_segment(name);
    COLOR_RULES
        .iter()
        .find(|rule| color_rule_matches(rule, name, segment))
        .map(|rule| rule.color)
        .unwrap_or(DEFAULT_COLOR)
}

// An empty segment is contained in every key; it must not match.
fn color_rule_matches(rule: &ColorRule, name: &str, segment: &str) -> bool {
    name.contains(rule.key) || (!segment.is_empty() && rule.key.contains(segment))
}

pub fn classify_shape(name: &str) -> ShapeKind {
    SHAPE_RULES
        .iter()
        .find(|rule| rule.markers.iter().any(|m| name.contains(m)))
        .map(|rule| rule.shape)
        .unwrap_or(DEFAULT_SHAPE)
}
