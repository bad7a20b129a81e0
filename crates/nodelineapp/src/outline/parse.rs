use super::DONE_MARKER;

const TAB_WIDTH: usize = 4;

/// One line of outline text after the marker and indentation have been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub level: usize,
    pub done: bool,
    pub value: String,
}

/// A parsed line together with the lines nested under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub line: TextLine,
    pub children: Vec<TextNode>,
}

impl TextNode {
    fn new(line: TextLine) -> Self {
        Self {
            line,
            children: Vec::new(),
        }
    }
}

/// Parses outline text into a forest of [`TextNode`]s.
pub fn parse(text: &str) -> Vec<TextNode> {
    let mut lines: Vec<TextLine> = text.lines().map(parse_line).collect();
    normalize_levels(&mut lines);
    build_forest(lines)
}

/// Indentation level of a raw line.
pub fn line_level(line: &str) -> usize {
    let width: usize = line
        .chars()
        .map_while(|c| match c {
            '\t' => Some(TAB_WIDTH),
            ' ' => Some(1),
            _ => None,
        })
        .sum();
    width.div_ceil(TAB_WIDTH)
}

pub fn parse_line(line: &str) -> TextLine {
    let level = line_level(line);
    let done = line.contains(DONE_MARKER);
    let mut value = line.to_string();
    // Stripping can join the halves of another marker.
    while value.contains(DONE_MARKER) {
        value = value.replace(DONE_MARKER, "");
    }
    TextLine {
        level,
        done,
        value: value.trim().to_string(),
    }
}

/// Forces the first line to the root and clamps every jump deeper than one level.
///
/// Each line is compared with the *normalized* level of the line before it, so a
/// run of over-indented lines collapses into a single staircase.
pub fn normalize_levels(lines: &mut [TextLine]) {
    let mut previous: Option<usize> = None;
    for line in lines.iter_mut() {
        line.level = match previous {
            None => 0,
            Some(prev) => line.level.min(prev + 1),
        };
        previous = Some(line.level);
    }
}

/// Nests normalized lines under the closest preceding line one level up.
///
/// Levels that skip ahead are clamped to the current depth, so un-normalized input
/// still produces a well-formed forest.
pub fn build_forest(lines: Vec<TextLine>) -> Vec<TextNode> {
    let mut roots = Vec::new();
    // Open path from a root down to the most recent node.
    let mut open: Vec<TextNode> = Vec::new();

    for line in lines {
        let depth = line.level.min(open.len());
        close_to(&mut open, &mut roots, depth);
        open.push(TextNode::new(line));
    }
    close_to(&mut open, &mut roots, 0);
    roots
}

fn close_to(open: &mut Vec<TextNode>, roots: &mut Vec<TextNode>, depth: usize) {
    while open.len() > depth {
        let Some(node) = open.pop() else {
            break;
        };
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(level: usize, value: &str) -> TextLine {
        TextLine {
            level,
            done: false,
            value: value.to_string(),
        }
    }

    fn levels(lines: &[TextLine]) -> Vec<usize> {
        lines.iter().map(|l| l.level).collect()
    }

    fn shape(nodes: &[TextNode]) -> Vec<(String, usize)> {
        nodes
            .iter()
            .map(|n| (n.line.value.clone(), n.children.len()))
            .collect()
    }

    #[test]
    fn test_level_from_tabs_and_spaces() {
        assert_eq!(line_level("root"), 0);
        assert_eq!(line_level("\tone"), 1);
        assert_eq!(line_level("\t\ttwo"), 2);
        assert_eq!(line_level("    four spaces"), 1);
        assert_eq!(line_level("  two spaces"), 1);
        assert_eq!(line_level("     five spaces"), 2);
        assert_eq!(line_level("\t  mixed"), 2);
        assert_eq!(line_level(""), 0);
    }

    #[test]
    fn test_level_stops_at_first_text_char() {
        assert_eq!(line_level("a\t\tb"), 0);
        assert_eq!(line_level("\tx    y"), 1);
    }

    #[test]
    fn test_done_marker_removed_and_trimmed() {
        assert_eq!(
            parse_line("\t\t02 @done trailing"),
            TextLine {
                level: 2,
                done: true,
                value: "02  trailing".to_string()
            }
        );
    }

    #[test]
    fn test_done_marker_every_occurrence() {
        let parsed = parse_line("@done task @done");
        assert!(parsed.done);
        assert_eq!(parsed.value, "task");
    }

    #[test]
    fn test_marker_revealed_by_stripping_is_removed() {
        let parsed = parse_line("call @do@donene");
        assert!(parsed.done);
        assert_eq!(parsed.value, "call");
    }

    #[test]
    fn test_marker_only_line() {
        let parsed = parse_line("\t @done  ");
        assert!(parsed.done);
        assert_eq!(parsed.value, "");
    }

    #[test]
    fn test_plain_line_not_done() {
        let parsed = parse_line("  buy milk  ");
        assert!(!parsed.done);
        assert_eq!(parsed.value, "buy milk");
    }

    #[test]
    fn test_normalize_first_line_is_root() {
        let mut lines = vec![line(3, "a"), line(4, "b")];
        normalize_levels(&mut lines);
        assert_eq!(levels(&lines), vec![0, 1]);
    }

    #[test]
    fn test_normalize_clamps_jumps_against_normalized_previous() {
        let mut lines = vec![line(0, "a"), line(3, "b"), line(5, "c"), line(1, "d"), line(0, "e")];
        normalize_levels(&mut lines);
        assert_eq!(levels(&lines), vec![0, 1, 2, 1, 0]);
    }

    #[test]
    fn test_normalize_over_indented_child() {
        let mut lines = vec![line(0, "a"), line(3, "b"), line(1, "c"), line(2, "d")];
        normalize_levels(&mut lines);
        assert_eq!(levels(&lines), vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_normalize_empty() {
        let mut lines: Vec<TextLine> = Vec::new();
        normalize_levels(&mut lines);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_builds_forest() {
        let text = "0\n\t0-0\n\t\t0-0-0\n\t0-1\n1\n\t1-0";
        let forest = parse(text);

        assert_eq!(shape(&forest), vec![("0".to_string(), 2), ("1".to_string(), 1)]);
        assert_eq!(
            shape(&forest[0].children),
            vec![("0-0".to_string(), 1), ("0-1".to_string(), 0)]
        );
        assert_eq!(forest[0].children[0].children[0].line.value, "0-0-0");
        assert_eq!(forest[1].children[0].line.value, "1-0");
    }

    #[test]
    fn test_parse_does_not_reuse_deeper_parents() {
        // "c" closes the level-2 branch, so "d" must nest under "c", not under "b".
        let forest = parse("a\n\t\tb\n\tc\n\t\td");
        assert_eq!(shape(&forest), vec![("a".to_string(), 2)]);
        assert_eq!(shape(&forest[0].children), vec![("b".to_string(), 0), ("c".to_string(), 1)]);
        assert_eq!(forest[0].children[1].children[0].line.value, "d");
    }

    #[test]
    fn test_parse_crlf_lines() {
        let forest = parse("a\r\n\tb\r\n");
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children[0].line.value, "b");
    }

    #[test]
    fn test_blank_line_is_empty_root() {
        let forest = parse("a\n\nb");
        assert_eq!(
            shape(&forest),
            vec![("a".to_string(), 0), ("".to_string(), 0), ("b".to_string(), 0)]
        );
    }

    #[test]
    fn test_build_forest_tolerates_unnormalized_levels() {
        let forest = build_forest(vec![line(2, "a"), line(0, "b")]);
        assert_eq!(shape(&forest), vec![("a".to_string(), 0), ("b".to_string(), 0)]);
    }
}
