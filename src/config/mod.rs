// Author: Dustin Pilgrim
// License: MIT

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::parser::Parser;
use crate::tree::Configuration;
use crate::ConfError;

mod access;
mod options;

pub use access::PATH_SEPARATOR;
pub use options::ParseOptions;

/// Open `path` and parse it into a [`Configuration`].
///
/// The file is closed on every exit path. An unopenable file is reported as
/// [`ConfError::Io`] before any tokenizing starts.
pub fn load_and_parse<P: AsRef<Path>>(path: P) -> Result<Configuration, ConfError> {
    ConfSlice::from_file(path).map(ConfSlice::into_configuration)
}

/// Parse configuration text held in memory.
pub fn parse_str(content: &str) -> Result<Configuration, ConfError> {
    Parser::new(content.as_bytes()).parse()
}

/// A parsed configuration plus the options it was parsed with.
///
/// Lookups through [`ConfSlice::get`] and friends never consume the tree;
/// reach for [`ConfSlice::configuration_mut`] to drain it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfSlice {
    configuration: Configuration,
    options: ParseOptions,
}

impl ConfSlice {
    /// Load a configuration file with default options.
    ///
    /// # Example
    /// ```no_run
    /// let conf = confslice::ConfSlice::from_file("server.conf")?;
    /// let port: u16 = conf.get("server/port")?;
    /// # Ok::<(), confslice::ConfError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfError> {
        Self::load_file(path, ParseOptions::default())
    }

    /// Parse a configuration from a string with default options.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfError> {
        Self::load_reader(content.as_bytes(), ParseOptions::default())
    }

    /// Parse a configuration from any reader with default options.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfError> {
        Self::load_reader(reader, ParseOptions::default())
    }

    pub fn load_file<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self, ConfError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "configuration file opened");

        Self::load_reader(file, options)
    }

    pub fn load_reader<R: Read>(reader: R, options: ParseOptions) -> Result<Self, ConfError> {
        let configuration = Parser::with_options(reader, options.clone()).parse()?;
        Ok(Self {
            configuration,
            options,
        })
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn configuration_mut(&mut self) -> &mut Configuration {
        &mut self.configuration
    }

    pub fn into_configuration(self) -> Configuration {
        self.configuration
    }
}
