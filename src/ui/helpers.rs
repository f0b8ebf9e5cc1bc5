use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Cell for a text cursor `column` cells into line `row` of `inner`, kept on
/// the last cell when the text runs past the edge.
pub(crate) fn cursor_in(inner: Rect, column: usize, row: usize) -> (u16, u16) {
    let offset = |cells: usize| u16::try_from(cells).unwrap_or(u16::MAX);
    let x = inner
        .x
        .saturating_add(offset(column))
        .min(inner.right().saturating_sub(1))
        .max(inner.x);
    let y = inner
        .y
        .saturating_add(offset(row))
        .min(inner.bottom().saturating_sub(1))
        .max(inner.y);
    (x, y)
}

/// "1 student" / "3 students".
pub(crate) fn student_count(count: usize) -> String {
    if count == 1 {
        "1 student".to_string()
    } else {
        format!("{count} students")
    }
}

/// Clamp `current + offset` into `0..len`.
pub(crate) fn offset_index(current: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = current as isize + offset;
    target.clamp(0, len as isize - 1) as usize
}
