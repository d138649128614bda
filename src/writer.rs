use std::io::{self, Write};

use indexmap::IndexMap;

use crate::section::Section;

/// Serialize `sections` to `sink` in a form the parser reads back.
///
/// Sections and options come out in insertion order, so repeated writes of
/// an unchanged store are byte-identical. Values are written as stored:
/// a literal percent sign is NOT re-escaped to `%%`, so a read/write cycle
/// is lossy for values that contained the escape on the way in.
pub(crate) fn write_sections<W: Write>(
    sections: &IndexMap<String, Section>,
    mut sink: W,
    spaces: bool,
) -> io::Result<()> {
    let separator = if spaces { " = " } else { "=" };

    for (name, section) in sections {
        // The no-header section is written with no [ ] line at all.
        if !name.is_empty() {
            writeln!(sink, "[{name}]")?;
        }

        for (option, value) in section.iter() {
            writeln!(sink, "{option}{separator}{value}")?;
        }

        writeln!(sink)?;
    }

    Ok(())
}
