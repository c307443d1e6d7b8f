// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// The visible part of a sequence that may not fit on screen: graphemes of a line
/// (horizontal) or lines of a document (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportWindow {
    /// Elements scrolled out of view in front of the window.
    pub skip: usize,
    /// Elements in the window.
    pub take: usize,
    /// Position of the cursor inside the window.
    pub cursor: usize,
}

impl ViewportWindow {
    #[must_use]
    pub fn end(&self) -> usize { self.skip + self.take }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool { index >= self.skip && index < self.end() }
}

/// Picks the lines of a document to show on a screen of `budget` rows, keeping the
/// `active` line near the middle.
///
/// Once the document is taller than the screen, every row shows a line: near the end
/// the window is pulled back instead of leaving rows blank.
#[must_use]
pub fn compute_row_window(line_count: usize, budget: usize, active: usize) -> ViewportWindow {
    let active = active.min(line_count.saturating_sub(1));

    if budget == 0 {
        return ViewportWindow {
            skip: active,
            take: 0,
            cursor: 0,
        };
    }

    if line_count <= budget {
        return ViewportWindow {
            skip: 0,
            take: line_count,
            cursor: active,
        };
    }

    let skip = active.saturating_sub(budget / 2).min(line_count - budget);
    ViewportWindow {
        skip,
        take: budget,
        cursor: active - skip,
    }
}

/// Picks the graphemes of a line to show in `budget` terminal columns, keeping the
/// `cursor` near the middle. `widths` holds the display width of each grapheme.
///
/// 1. Everything fits: no scrolling.
/// 2. Otherwise walk back from the cursor until half the budget is used, then take
///    graphemes forward while they fit.
/// 3. When that reaches the end of the line, pull the start back to fill the rest.
///
/// `cursor - skip` never exceeds `take`, and the columns in front of the cursor
/// never exceed `budget`.
#[must_use]
pub fn compute_column_window(widths: &[usize], budget: usize, cursor: usize) -> ViewportWindow {
    let len = widths.len();
    let cursor = cursor.min(len);

    if budget == 0 {
        return ViewportWindow {
            skip: cursor,
            take: 0,
            cursor: 0,
        };
    }

    if widths.iter().sum::<usize>() <= budget {
        return ViewportWindow {
            skip: 0,
            take: len,
            cursor,
        };
    }

    let middle = budget / 2;
    let mut skip = cursor;
    let mut used = 0;
    while skip > 0 && used + widths[skip - 1] <= middle {
        skip -= 1;
        used += widths[skip];
    }

    let mut end = skip;
    used = 0;
    while end < len && used + widths[end] <= budget {
        used += widths[end];
        end += 1;
    }

    if end == len {
        while skip > 0 && used + widths[skip - 1] <= budget {
            skip -= 1;
            used += widths[skip];
        }
    }

    ViewportWindow {
        skip,
        take: end - skip,
        cursor: cursor - skip,
    }
}
