//! The flex container algorithm.
//!
//! Geometry lives in resolved style as plain length entries keyed by physical
//! property names (`left`, `width`, ...). The algorithm works in main/cross
//! axis terms and maps to physical keys once, up front, from `flex-direction`
//! and `flex-wrap`. Reverse directions flip the sign of advancement, not the
//! arithmetic.

use dom::{DomTree, NodeId, ResolvedStyle};

use crate::resolve::resolve_style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl Direction {
    fn from_style(style: &ResolvedStyle) -> Self {
        match style.keyword("flex-direction") {
            Some("row-reverse") => Direction::RowReverse,
            Some("column") => Direction::Column,
            Some("column-reverse") => Direction::ColumnReverse,
            _ => Direction::Row,
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Direction::Row | Direction::RowReverse)
    }

    fn is_reverse(self) -> bool {
        matches!(self, Direction::RowReverse | Direction::ColumnReverse)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wrap {
    NoWrap,
    Wrap,
    WrapReverse,
}

impl Wrap {
    fn from_style(style: &ResolvedStyle) -> Self {
        match style.keyword("flex-wrap") {
            Some("wrap") => Wrap::Wrap,
            Some("wrap-reverse") => Wrap::WrapReverse,
            _ => Wrap::NoWrap,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Justify {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
}

impl Justify {
    fn from_style(style: &ResolvedStyle) -> Self {
        match style.keyword("justify-content") {
            Some("flex-end") => Justify::FlexEnd,
            Some("center") => Justify::Center,
            Some("space-between") => Justify::SpaceBetween,
            Some("space-around") => Justify::SpaceAround,
            _ => Justify::FlexStart,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Align {
    FlexStart,
    FlexEnd,
    Center,
    Stretch,
}

impl Align {
    fn parse(word: Option<&str>) -> Option<Self> {
        match word {
            Some("flex-start") => Some(Align::FlexStart),
            Some("flex-end") => Some(Align::FlexEnd),
            Some("center") => Some(Align::Center),
            Some("stretch") => Some(Align::Stretch),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AlignContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    Stretch,
}

impl AlignContent {
    fn from_style(style: &ResolvedStyle) -> Self {
        match style.keyword("align-content") {
            Some("flex-start") => AlignContent::FlexStart,
            Some("flex-end") => AlignContent::FlexEnd,
            Some("center") => AlignContent::Center,
            Some("space-between") => AlignContent::SpaceBetween,
            Some("space-around") => AlignContent::SpaceAround,
            _ => AlignContent::Stretch,
        }
    }
}

/// Physical property keys for the chosen main/cross axes.
struct AxisKeys {
    main_size: &'static str,
    main_start: &'static str,
    main_end: &'static str,
    cross_size: &'static str,
    cross_start: &'static str,
    cross_end: &'static str,
}

fn axis_keys(direction: Direction, wrap: Wrap) -> AxisKeys {
    let mut keys = match direction {
        Direction::Row => AxisKeys {
            main_size: "width",
            main_start: "left",
            main_end: "right",
            cross_size: "height",
            cross_start: "top",
            cross_end: "bottom",
        },
        Direction::RowReverse => AxisKeys {
            main_size: "width",
            main_start: "right",
            main_end: "left",
            cross_size: "height",
            cross_start: "top",
            cross_end: "bottom",
        },
        Direction::Column => AxisKeys {
            main_size: "height",
            main_start: "top",
            main_end: "bottom",
            cross_size: "width",
            cross_start: "left",
            cross_end: "right",
        },
        Direction::ColumnReverse => AxisKeys {
            main_size: "height",
            main_start: "bottom",
            main_end: "top",
            cross_size: "width",
            cross_start: "left",
            cross_end: "right",
        },
    };
    if wrap == Wrap::WrapReverse {
        std::mem::swap(&mut keys.cross_start, &mut keys.cross_end);
    }
    keys
}

/// Per-item working state, snapshotted before any mutation of the tree.
struct Item {
    id: NodeId,
    main: f32,
    cross: Option<f32>,
    flex: Option<f32>,
    order: f32,
    align_self: Option<Align>,
    main_start: f32,
    main_end: f32,
    cross_start: f32,
    cross_end: f32,
}

struct Line {
    items: Vec<usize>,
    main_space: f32,
    cross_space: f32,
}

impl Line {
    fn fresh(main_space: f32) -> Self {
        Self {
            items: Vec::new(),
            main_space,
            cross_space: 0.0,
        }
    }
}

/// Lay out `element`'s children if it is a flex container.
///
/// Containers without any matched style, or without `display: flex`, are left
/// untouched. Children are style-resolved here because layout is the first
/// consumer of their parsed values.
pub fn layout(tree: &mut DomTree, element: NodeId) {
    if tree.computed_style(element).is_none_or(|s| s.is_empty()) {
        return;
    }
    resolve_style(tree, element);

    let Some(style) = tree.resolved_style(element) else {
        return;
    };
    if style.keyword("display") != Some("flex") {
        return;
    }

    let direction = Direction::from_style(style);
    let wrap = Wrap::from_style(style);
    let justify = Justify::from_style(style);
    let align_items = Align::parse(style.keyword("align-items")).unwrap_or(Align::Stretch);
    let align_content = AlignContent::from_style(style);

    let declared_width = style.length("width");
    let declared_height = style.length("height");
    let (declared_main, declared_cross) = if direction.is_horizontal() {
        (declared_width, declared_height)
    } else {
        (declared_height, declared_width)
    };

    // Snapshot element children with their parsed sizes.
    let child_ids: Vec<NodeId> = tree
        .children(element)
        .iter()
        .copied()
        .filter(|&child| tree.node(child).is_element())
        .collect();
    let mut items: Vec<Item> = Vec::with_capacity(child_ids.len());
    for id in child_ids {
        resolve_style(tree, id);
        let Some(child_style) = tree.resolved_style(id) else {
            continue;
        };
        let width = child_style.length("width");
        let height = child_style.length("height");
        let (main, cross) = if direction.is_horizontal() {
            (width, height)
        } else {
            (height, width)
        };
        items.push(Item {
            id,
            main: main.unwrap_or(0.0),
            cross,
            flex: child_style.length("flex").filter(|&factor| factor > 0.0),
            order: child_style.length("order").unwrap_or(0.0),
            align_self: Align::parse(child_style.keyword("align-self")),
            main_start: 0.0,
            main_end: 0.0,
            cross_start: 0.0,
            cross_end: 0.0,
        });
    }
    items.sort_by(|a, b| a.order.total_cmp(&b.order));

    // An auto-sized main axis takes the sum of the item sizes and never wraps.
    let auto_main = declared_main.is_none();
    let container_main = declared_main.unwrap_or_else(|| items.iter().map(|i| i.main).sum());
    let wrapping = wrap != Wrap::NoWrap && !auto_main;

    let (main_sign, main_base) = if direction.is_reverse() {
        (-1.0, container_main)
    } else {
        (1.0, 0.0)
    };
    let keys = axis_keys(direction, wrap);

    // Partition into flex lines. Flex items never force a wrap; leftover
    // distribution absorbs them wherever they land.
    let mut lines: Vec<Line> = Vec::new();
    let mut current = Line::fresh(container_main);
    for (index, item) in items.iter_mut().enumerate() {
        if item.flex.is_some() {
            current.items.push(index);
            continue;
        }
        if wrapping {
            if item.main > container_main {
                item.main = container_main;
            }
            if current.main_space < item.main {
                lines.push(std::mem::replace(&mut current, Line::fresh(container_main)));
            }
        }
        current.items.push(index);
        current.main_space -= item.main;
        if let Some(cross) = item.cross {
            current.cross_space = current.cross_space.max(cross);
        }
    }
    if !wrapping {
        if let Some(cross) = declared_cross {
            current.cross_space = cross;
        }
    }
    lines.push(current);

    // Main axis distribution.
    if !wrapping && lines[0].main_space < 0.0 {
        // Single overflowing line: shrink everything proportionally, with
        // flex items collapsed to zero first.
        let line = &lines[0];
        let scale = container_main / (container_main - line.main_space);
        let mut cursor = main_base;
        for &index in &line.items {
            let item = &mut items[index];
            if item.flex.is_some() {
                item.main = 0.0;
            }
            item.main *= scale;
            item.main_start = cursor;
            item.main_end = item.main_start + main_sign * item.main;
            cursor = item.main_end;
        }
    } else {
        for line in &lines {
            let flex_total: f32 = line.items.iter().filter_map(|&i| items[i].flex).sum();
            if flex_total > 0.0 {
                // Flexible line: leftover space goes to flex items pro rata;
                // justify-content has nothing left to place.
                let mut cursor = main_base;
                for &index in &line.items {
                    let item = &mut items[index];
                    if let Some(factor) = item.flex {
                        item.main = line.main_space / flex_total * factor;
                    }
                    item.main_start = cursor;
                    item.main_end = item.main_start + main_sign * item.main;
                    cursor = item.main_end;
                }
            } else {
                let count = line.items.len() as f32;
                let leftover = line.main_space;
                let (mut cursor, step) = match justify {
                    Justify::FlexStart => (main_base, 0.0),
                    Justify::FlexEnd => (main_base + main_sign * leftover, 0.0),
                    Justify::Center => (main_base + main_sign * leftover / 2.0, 0.0),
                    Justify::SpaceBetween => {
                        let step = if count > 1.0 {
                            main_sign * leftover / (count - 1.0)
                        } else {
                            0.0
                        };
                        (main_base, step)
                    }
                    Justify::SpaceAround => {
                        let step = if count > 0.0 {
                            main_sign * leftover / count
                        } else {
                            0.0
                        };
                        (main_base + step / 2.0, step)
                    }
                };
                for &index in &line.items {
                    let item = &mut items[index];
                    item.main_start = cursor;
                    item.main_end = item.main_start + main_sign * item.main;
                    cursor = item.main_end + step;
                }
            }
        }
    }

    // Cross axis: place lines, then items within their line.
    let line_count = lines.len() as f32;
    let total_line_cross: f32 = lines.iter().map(|line| line.cross_space).sum();
    let (container_cross, cross_leftover) = match declared_cross {
        Some(size) => (size, size - total_line_cross),
        None => (total_line_cross, 0.0),
    };
    let (cross_sign, mut cross_base) = if wrap == Wrap::WrapReverse {
        (-1.0, container_cross)
    } else {
        (1.0, 0.0)
    };
    let step = match align_content {
        AlignContent::FlexStart | AlignContent::Stretch => 0.0,
        AlignContent::FlexEnd => {
            cross_base += cross_sign * cross_leftover;
            0.0
        }
        AlignContent::Center => {
            cross_base += cross_sign * cross_leftover / 2.0;
            0.0
        }
        AlignContent::SpaceBetween => {
            if line_count > 1.0 {
                cross_leftover / (line_count - 1.0)
            } else {
                0.0
            }
        }
        AlignContent::SpaceAround => {
            let step = cross_leftover / line_count;
            cross_base += cross_sign * step / 2.0;
            step
        }
    };

    for line in &lines {
        let line_cross = if align_content == AlignContent::Stretch {
            line.cross_space + cross_leftover / line_count
        } else {
            line.cross_space
        };
        for &index in &line.items {
            let item = &mut items[index];
            let align = item.align_self.unwrap_or(align_items);
            // No explicit cross size: stretch fills the line, anything else
            // collapses to zero.
            let item_cross = item.cross.unwrap_or(if align == Align::Stretch {
                line_cross
            } else {
                0.0
            });
            match align {
                Align::FlexStart | Align::Stretch => {
                    item.cross_start = cross_base;
                    item.cross_end = item.cross_start + cross_sign * item_cross;
                }
                Align::FlexEnd => {
                    item.cross_end = cross_base + cross_sign * line_cross;
                    item.cross_start = item.cross_end - cross_sign * item_cross;
                }
                Align::Center => {
                    item.cross_start = cross_base + cross_sign * (line_cross - item_cross) / 2.0;
                    item.cross_end = item.cross_start + cross_sign * item_cross;
                }
            }
            item.cross = Some(item_cross);
        }
        cross_base += cross_sign * (line_cross + step);
    }

    // Write geometry back.
    if let Some(style) = tree.resolved_style_mut(element) {
        style.set_length(keys.main_size, container_main);
        style.set_length(keys.cross_size, container_cross);
    }
    for item in &items {
        let Some(style) = tree.resolved_style_mut(item.id) else {
            continue;
        };
        style.set_length(keys.main_size, item.main);
        style.set_length(keys.main_start, item.main_start);
        style.set_length(keys.main_end, item.main_end);
        style.set_length(keys.cross_size, item.cross.unwrap_or(0.0));
        style.set_length(keys.cross_start, item.cross_start);
        style.set_length(keys.cross_end, item.cross_end);
    }
    log::trace!(
        target: "layout.flex",
        "laid out {} items across {} lines in {:?}",
        items.len(),
        lines.len(),
        tree.element_name(element)
    );
}
