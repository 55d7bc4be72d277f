//! Text renderings of the two dice.

/// Pip positions on a 3x3 grid for a D6 face.
pub fn pip_grid(value: u32) -> [[bool; 3]; 3] {
    const O: bool = false;
    const X: bool = true;
    match value {
        1 => [[O, O, O], [O, X, O], [O, O, O]],
        2 => [[X, O, O], [O, O, O], [O, O, X]],
        3 => [[X, O, O], [O, X, O], [O, O, X]],
        4 => [[X, O, X], [O, O, O], [X, O, X]],
        5 => [[X, O, X], [O, X, O], [X, O, X]],
        6 => [[X, O, X], [X, O, X], [X, O, X]],
        _ => [[O; 3]; 3],
    }
}

/// A boxed D6 face showing `value` as pips.
pub fn d6_lines(value: u32) -> Vec<String> {
    let mut lines = Vec::with_capacity(5);
    lines.push("\u{256d}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{256e}".to_string());
    for row in pip_grid(value) {
        let cells: Vec<&str> = row
            .iter()
            .map(|&pip| if pip { "\u{25cf}" } else { " " })
            .collect();
        lines.push(format!("\u{2502} {}  {}  {} \u{2502}", cells[0], cells[1], cells[2]));
    }
    lines.push("\u{2570}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{256f}".to_string());
    lines
}

/// A diamond-framed D21 face with `value` in the middle.
pub fn d21_lines(value: u32) -> Vec<String> {
    vec![
        "    /\\    ".to_string(),
        "   /  \\   ".to_string(),
        format!("  < {value:>2} >  "),
        "   \\  /   ".to_string(),
        "    \\/    ".to_string(),
    ]
}
