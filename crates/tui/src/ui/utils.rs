//! Layout helpers shared by the modal views.

use ratatui::prelude::*;

/// Creates a rectangle centered in `r`, sized as a percentage of it.
///
/// ```rust,ignore
/// let parent = Rect::new(0, 0, 100, 50);
/// let centered = centered_rect(80, 70, parent);
/// ```
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

/// Like [`centered_rect`], but the result is clamped between `min` and `max`
/// (only their sizes are used) and never exceeds `r`.
pub fn centered_min_max(percent_x: u16, percent_y: u16, min: Rect, max: Rect, r: Rect) -> Rect {
    let proposed = centered_rect(percent_x, percent_y, r);
    let width = proposed.width.clamp(min.width, max.width).min(r.width);
    let height = proposed.height.clamp(min.height, max.height).min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(80, 70, parent);
        assert_eq!(parent.intersection(centered), centered);
        assert_eq!(centered.width, 80);
    }

    #[test]
    fn min_max_clamps_to_bounds() {
        let min = Rect::new(0, 0, 60, 10);
        let max = Rect::new(0, 0, 70, 12);
        let small = centered_min_max(50, 50, min, max, Rect::new(0, 0, 40, 8));
        assert_eq!((small.width, small.height), (40, 8));
        let large = centered_min_max(50, 50, min, max, Rect::new(0, 0, 200, 100));
        assert_eq!((large.width, large.height), (70, 12));
        assert_eq!((large.x, large.y), (65, 44));
    }
}
