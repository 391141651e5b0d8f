
mod measures;
mod techniques;

pub use measures::{HEADER_SENTINEL, MeasuresOptions, parse_measures};
pub use techniques::parse_techniques;

/// Source lines paired with their 1-based number, without line terminators or blank lines.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}
