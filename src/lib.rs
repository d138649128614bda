#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod error;
mod parser;
mod section;
mod writer;

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use indexmap::IndexMap;

pub use crate::error::Error;
pub use crate::section::Section;

use crate::parser::Parser;

/// An INI-style configuration store.
///
/// Sections map option names to raw string values; typed getters convert on
/// demand. Both maps preserve insertion order so that [`Ini::write`] output
/// is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Ini {
    sections: IndexMap<String, Section>,

    /// Allow input with no leading `[section]` header. Options seen before
    /// the first header then land in a section whose name is the empty
    /// string, reachable as `get("", option)`.
    pub allow_no_section_header: bool,
}

impl Ini {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config = Self::new();
        config.read_file(path)?;
        Ok(config)
    }

    /// Parse configuration text from `reader`, merging into this store.
    ///
    /// Reading is additive: sections and options accumulate across calls,
    /// same-named options are overwritten, and nothing already present is
    /// removed. A structural error aborts the read but keeps everything
    /// applied before the failing line; there is no rollback.
    pub fn read<R: Read>(&mut self, reader: R) -> Result<(), Error> {
        if self.allow_no_section_header {
            self.sections.entry(String::new()).or_default();
        }

        let mut parser = Parser::new();

        for line in BufReader::new(reader).lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::warn!("configuration read failed: {err}");
                    return Err(Error::Io(err));
                }
            };

            parser.feed(&line, &mut self.sections)?;
        }

        Ok(())
    }

    pub fn read_str(&mut self, text: &str) -> Result<(), Error> {
        self.read(text.as_bytes())
    }

    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        self.read(File::open(path)?)
    }

    /// Return the raw string value of `option` in `section`.
    pub fn get(&self, section: &str, option: &str) -> Result<&str, Error> {
        self.section(section)?.get(option).ok_or_else(|| Error::NoOption {
            section: section.to_owned(),
            option: option.to_owned(),
        })
    }

    /// Like [`Ini::get`], parsed as a base-10 signed integer.
    pub fn get_int(&self, section: &str, option: &str) -> Result<i64, Error> {
        let value = self.get(section, option)?;

        value.parse().map_err(|source| Error::InvalidInt {
            value: value.to_owned(),
            source,
        })
    }

    /// Like [`Ini::get`], parsed as a 64-bit float.
    pub fn get_float(&self, section: &str, option: &str) -> Result<f64, Error> {
        let value = self.get(section, option)?;

        value.parse().map_err(|source| Error::InvalidFloat {
            value: value.to_owned(),
            source,
        })
    }

    /// Like [`Ini::get`], interpreted as a boolean. Accepts,
    /// case-insensitively: `1`, `yes`, `true`, `on` as true and `0`, `no`,
    /// `false`, `off` as false. Anything else is an error.
    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool, Error> {
        let value = self.get(section, option)?;

        match value.to_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Ok(true),
            "0" | "no" | "false" | "off" => Ok(false),
            _ => Err(Error::NotBoolean {
                section: section.to_owned(),
                option: option.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    /// All known section names, in insertion order. Includes the unnamed
    /// `""` section when present.
    #[must_use]
    pub fn sections(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    pub fn options(&self, section: &str) -> Result<Vec<&str>, Error> {
        Ok(self.section(section)?.options().collect())
    }

    #[must_use]
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    #[must_use]
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.sections
            .get(section)
            .is_some_and(|sect| sect.contains(option))
    }

    /// Create a new empty section. Refuses to touch an existing one.
    pub fn add_section(&mut self, section: &str) -> Result<(), Error> {
        if self.sections.contains_key(section) {
            return Err(Error::SectionExists(section.to_owned()));
        }

        self.sections.insert(section.to_owned(), Section::new());
        Ok(())
    }

    /// Insert or overwrite `option` in an existing section.
    ///
    /// The section must already exist (parsed or [`Ini::add_section`]ed);
    /// `set` never creates one. The value is stored verbatim; percent
    /// collapsing applies on read only.
    pub fn set(&mut self, section: &str, option: &str, value: &str) -> Result<(), Error> {
        self.section_mut(section)?
            .set(option.to_owned(), value.to_owned());
        Ok(())
    }

    /// Deleting an option leaves its (possibly now empty) section in place.
    pub fn remove_option(&mut self, section: &str, option: &str) -> Result<(), Error> {
        self.section_mut(section)?
            .remove(option)
            .map(|_| ())
            .ok_or_else(|| Error::NoOption {
                section: section.to_owned(),
                option: option.to_owned(),
            })
    }

    pub fn remove_section(&mut self, section: &str) -> Result<(), Error> {
        self.sections
            .shift_remove(section)
            .map(|_| ())
            .ok_or_else(|| Error::NoSection(section.to_owned()))
    }

    /// Serialize the store to `sink` in a form [`Ini::read`] accepts.
    ///
    /// `spaces` pads the separator as `key = value` instead of `key=value`.
    pub fn write<W: Write>(&self, sink: W, spaces: bool) -> Result<(), Error> {
        writer::write_sections(&self.sections, sink, spaces)?;
        Ok(())
    }

    /// Serialize the store to the file at `path`, created with the given
    /// permission bits (ignored on non-unix targets).
    pub fn write_file<P: AsRef<Path>>(&self, path: P, spaces: bool, mode: u32) -> Result<(), Error> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let mut sink = BufWriter::new(options.open(path)?);
        self.write(&mut sink, spaces)?;
        sink.flush()?;
        Ok(())
    }

    fn section(&self, section: &str) -> Result<&Section, Error> {
        self.sections
            .get(section)
            .ok_or_else(|| Error::NoSection(section.to_owned()))
    }

    fn section_mut(&mut self, section: &str) -> Result<&mut Section, Error> {
        self.sections
            .get_mut(section)
            .ok_or_else(|| Error::NoSection(section.to_owned()))
    }
}
