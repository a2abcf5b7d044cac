use mancala_core::logic::board::{Board, Side};
use std::fmt::Write;

fn cell(board: &Board, pit: usize, highlight: Option<usize>) -> String {
    if highlight == Some(pit) {
        format!("<{:>2}>", board.stones(pit))
    } else {
        format!("[{:>2}]", board.stones(pit))
    }
}

/// Two rows of pits framed by the stores, North on top running right to
/// left. `highlight` marks the pit that was just sown.
#[must_use]
pub fn render(board: &Board, highlight: Option<usize>) -> String {
    let mut out = String::new();

    let north_labels: Vec<String> = Side::North.pits().rev().map(|p| format!("{p:>4}")).collect();
    let _ = writeln!(out, "      {}", north_labels.concat());

    let north_row: Vec<String> = Side::North.pits().rev().map(|p| cell(board, p, highlight)).collect();
    let _ = writeln!(out, "      {}", north_row.concat());

    let _ = writeln!(
        out,
        " N {:>2} {:width$} {:>2} S",
        board.store(Side::North),
        "",
        board.store(Side::South),
        width = 4 * Side::North.pits().len()
    );

    let south_row: Vec<String> = Side::South.pits().map(|p| cell(board, p, highlight)).collect();
    let _ = writeln!(out, "      {}", south_row.concat());

    let south_labels: Vec<String> = Side::South.pits().map(|p| format!("{p:>4}")).collect();
    let _ = writeln!(out, "      {}", south_labels.concat());

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_shows_both_rows_and_highlight() {
        let board = Board::from_layout([4, 4, 0, 5, 5, 5, 0, 4, 4, 4, 4, 4, 4, 1]).unwrap();
        let text = render(&board, Some(2));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].trim_start().starts_with("12"));
        assert!(lines[2].starts_with(" N  0"));
        assert!(lines[2].ends_with(" 1 S"));
        assert!(lines[3].contains("< 0>"));
        assert_eq!(lines[3].matches('<').count(), 1);
    }
}
