use indexmap::IndexMap;

use crate::error::Error;
use crate::section::Section;

/// Represents an on-going read.
///
/// One instance lives for exactly one read call, so independent stores (or
/// repeated reads into the same store) never share parse state.
#[derive(Debug, Default)]
pub(crate) struct Parser {
    // Empty until the first `[section]` header; option lines seen before
    // that only land somewhere if the store pre-created the "" section.
    current_section: String,
    // Target for continuation lines; cleared by every section header.
    current_option: Option<String>,
    // TODO: Track current line number for better error messages.
}

impl Parser {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Classify one line and fold it into `sections`.
    ///
    /// Classification order: comment, section header, option, continuation.
    /// Blank lines and lines matching none of these are skipped without
    /// touching parser state.
    pub(crate) fn feed(
        &mut self,
        line: &str,
        sections: &mut IndexMap<String, Section>,
    ) -> Result<(), Error> {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with(['#', ';']) {
            return Ok(());
        }

        if let Some(name) = section_header(line) {
            self.current_option = None;
            self.current_section = name.to_owned();
            // A repeated header re-opens the section; its existing options
            // are kept and later lines merge into them.
            sections.entry(self.current_section.clone()).or_default();
            return Ok(());
        }

        if let Some((key, value)) = split_option(line) {
            let Some(section) = sections.get_mut(&self.current_section) else {
                return Err(Error::NoSection(self.current_section.clone()));
            };
            section.set(key.to_owned(), collapse_percent_escapes(value));
            self.current_option = Some(key.to_owned());
            return Ok(());
        }

        if line.starts_with(char::is_whitespace) {
            if let (Some(option), Some(section)) = (
                &self.current_option,
                sections.get_mut(&self.current_section),
            ) {
                section.append_line(option, &collapse_percent_escapes(trimmed));
            }
        }

        Ok(())
    }
}

/// Extract the name from an unindented `[name]` header line.
///
/// The name is the longest run of non-`]` characters; anything after the
/// closing bracket is ignored. Returns `None` for an empty name.
fn section_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let name = &rest[..rest.find(']')?];

    if name.is_empty() { None } else { Some(name) }
}

/// Split a `key = value` / `key: value` line at the first separator, with
/// surrounding whitespace trimmed from both halves.
fn split_option(line: &str) -> Option<(&str, &str)> {
    let separator = line.find(['=', ':'])?;

    Some((line[..separator].trim(), line[separator + 1..].trim()))
}

/// Collapse each doubled percent sign into a literal one.
///
/// This is the only substitution performed on values; there is no
/// `%key%`-style interpolation in this format.
fn collapse_percent_escapes(value: &str) -> String {
    value.replace("%%", "%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> IndexMap<String, Section> {
        let mut sections = IndexMap::new();
        let mut parser = Parser::new();

        for line in input.lines() {
            parser
                .feed(line, &mut sections)
                .expect("failed to parse hardcoded config");
        }

        sections
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let sections = parse("# leading comment\n  ; indented comment\n\n[empty]\n; more\n");

        assert_eq!(sections.keys().collect::<Vec<_>>(), ["empty"]);
        assert_eq!(sections["empty"].options().count(), 0);
    }

    #[test]
    fn first_separator_wins() {
        let sections = parse("[urls]\nhome: https://example.net/index\nexpr = a:b\n");

        assert_eq!(sections["urls"].get("home"), Some("https://example.net/index"));
        assert_eq!(sections["urls"].get("expr"), Some("a:b"));
    }

    #[test]
    fn same_key_overwrites() {
        let sections = parse("[main]\nkey = old\nkey = new\n");

        assert_eq!(sections["main"].get("key"), Some("new"));
    }

    #[test]
    fn repeated_header_merges() {
        let sections = parse("[main]\none = 1\n[other]\nx = y\n[main]\ntwo = 2\n");

        assert_eq!(sections["main"].get("one"), Some("1"));
        assert_eq!(sections["main"].get("two"), Some("2"));
        assert_eq!(sections.keys().collect::<Vec<_>>(), ["main", "other"]);
    }

    #[test]
    fn option_before_header_fails() {
        let mut sections = IndexMap::new();
        let mut parser = Parser::new();
        let result = parser.feed("orphan = 1", &mut sections);

        assert!(matches!(result, Err(Error::NoSection(name)) if name.is_empty()));
    }

    #[test]
    fn continuation_lines_join_with_newline() {
        let sections = parse("[main]\ndescription: first line\n    second line\n\tthird line\n");

        assert_eq!(
            sections["main"].get("description"),
            Some("first line\nsecond line\nthird line")
        );
    }

    #[test]
    fn indented_option_is_a_fresh_key() {
        // An indented line that still looks like `key = value` starts a new
        // option rather than continuing the previous one.
        let sections = parse("[main]\nfirst = 1\n  second = 2\n");

        assert_eq!(sections["main"].get("first"), Some("1"));
        assert_eq!(sections["main"].get("second"), Some("2"));
    }

    #[test]
    fn empty_value_is_empty_string() {
        let sections = parse("[main]\nblank =\n");

        assert_eq!(sections["main"].get("blank"), Some(""));
    }

    #[test]
    fn percent_escapes_collapse_everywhere() {
        let sections = parse("[main]\nratio: 50%%\nreport: %%start\n    100%% done\n");

        assert_eq!(sections["main"].get("ratio"), Some("50%"));
        assert_eq!(sections["main"].get("report"), Some("%start\n100% done"));
    }

    #[test]
    fn unrecognized_lines_are_ignored() {
        // Neither a header (no closing bracket / empty name) nor an option
        // (no separator); the original parser skips these silently.
        let sections = parse("[main]\nnoise without separator\n[]\n[broken\nkey = value\n");

        assert_eq!(sections.keys().collect::<Vec<_>>(), ["main"]);
        assert_eq!(sections["main"].get("key"), Some("value"));
    }

    #[test]
    fn header_trailing_text_is_ignored() {
        let sections = parse("[main] ; trailing comment\nkey = value\n");

        assert_eq!(sections["main"].get("key"), Some("value"));
    }
}
