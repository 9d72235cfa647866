//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration files of the
//! `treatpath` binaries.  It is a configuration struct neutral loading engine: the struct itself
//! tells us its filename and the version it expects through the `IntoConfig` trait.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

/// Main name for the directory base
const TAG: &str = "treatpath";

/// Every configuration file carries a version number.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

/// A struct that can be loaded by `ConfigFile`.
///
pub trait IntoConfig: Versioned {
    /// Filename inside the configuration directory
    fn filename() -> &'static str;
    /// Version number we know how to read
    fn expected_version() -> usize;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file {0:?}")]
    MissingConfig(PathBuf),
    #[error("Bad file version {found} in {path:?}, expected {expected}")]
    BadFileVersion {
        path: PathBuf,
        found: usize,
        expected: usize,
    },
    #[error("No home directory, can not find configuration")]
    NoHome,
}

#[derive(Debug)]
pub struct ConfigFile<T: Debug + Default + DeserializeOwned + IntoConfig> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Where we actually read the data from, `None` for built-in defaults.
    source: Option<PathBuf>,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned + IntoConfig,
{
    /// Returns the default config directory, `$HOME/.config/treatpath` on Unix and
    /// `%LOCALAPPDATA%\treatpath` on Windows.
    ///
    pub fn config_dir() -> Result<PathBuf> {
        let base = BaseDirs::new().ok_or(ConfigError::NoHome)?;

        #[cfg(unix)]
        let base: PathBuf = crate::makepath!(base.home_dir(), ".config", TAG);

        #[cfg(windows)]
        let base: PathBuf = crate::makepath!(base.data_local_dir(), TAG);

        debug!("base = {base:?}");
        Ok(base)
    }

    /// Load the file from the default directory or the one specified on the CLI.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>) -> Result<ConfigFile<T>> {
        Self::load_from(Self::config_dir()?, fname)
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI, which must exist
    /// - `T::filename()` in `basedir`, falling back to `T::default()` if not there
    ///
    #[tracing::instrument]
    pub fn load_from(basedir: PathBuf, fname: Option<&str>) -> Result<ConfigFile<T>> {
        let fname = match fname {
            Some(fname) => {
                let fname = PathBuf::from(fname);
                if !fname.exists() {
                    return Err(ConfigError::MissingConfig(fname).into());
                }
                fname
            }
            None => {
                let def = basedir.join(T::filename());
                if !def.exists() {
                    debug!("no {def:?}, using defaults");
                    return Ok(ConfigFile {
                        basedir,
                        source: None,
                        inner: T::default(),
                    });
                }
                def
            }
        };

        trace!("Loading config file {fname:?} from {basedir:?}");

        let data = fs::read_to_string(&fname)?;
        debug!("string data = {data}");

        let data: T = hcl::from_str(&data).map_err(|e| eyre!("{fname:?}: {e}"))?;
        debug!("struct data = {data:?}");

        if data.version() != T::expected_version() {
            return Err(ConfigError::BadFileVersion {
                path: fname,
                found: data.version(),
                expected: T::expected_version(),
            }
            .into());
        }

        Ok(ConfigFile {
            basedir,
            source: Some(fname),
            inner: data,
        })
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// File actually read, if any
    ///
    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the file and keep the configuration
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Foo {
        version: usize,
        name: String,
    }

    impl Versioned for Foo {
        fn version(&self) -> usize {
            self.version
        }
    }

    impl IntoConfig for Foo {
        fn filename() -> &'static str {
            "foo.hcl"
        }

        fn expected_version() -> usize {
            1
        }
    }

    #[test_pretty_log::test]
    fn test_config_engine_load_default_file() -> Result<()> {
        let cfg = ConfigFile::<Foo>::load_from(PathBuf::from("testdata"), None)?;
        assert_eq!(1, cfg.inner().version());
        assert_eq!("local", cfg.inner().name);
        assert_eq!(Some(&PathBuf::from("testdata/foo.hcl")), cfg.source());
        Ok(())
    }

    #[test]
    fn test_config_engine_load_file() -> Result<()> {
        let cfg = ConfigFile::<Foo>::load_from(PathBuf::from("/nonexistent"), Some("testdata/foo.hcl"))?;
        assert_eq!("local", cfg.inner().name);
        Ok(())
    }

    #[test]
    fn test_config_engine_no_file_gives_defaults() -> Result<()> {
        let mut cfg = ConfigFile::<Foo>::load_from(PathBuf::from("/nonexistent"), None)?;
        assert_eq!(&Foo::default(), cfg.inner());
        assert!(cfg.source().is_none());

        cfg.inner_mut().name = "changed".to_string();
        assert_eq!("changed", cfg.inner().name);
        assert_eq!("changed", cfg.into_inner().name);
        Ok(())
    }

    #[rstest]
    #[case("testdata/nope.hcl", None)]
    #[case("/nonexistent/foo.hcl", None)]
    #[case("testdata/bad-version.hcl", Some(9))]
    fn test_config_engine_load_errors(#[case] fname: &str, #[case] found: Option<usize>) {
        let err = ConfigFile::<Foo>::load_from(PathBuf::from("testdata"), Some(fname)).unwrap_err();
        match (err.downcast_ref::<ConfigError>(), found) {
            (Some(ConfigError::MissingConfig(path)), None) => {
                assert_eq!(&PathBuf::from(fname), path)
            }
            (
                Some(ConfigError::BadFileVersion {
                    found: f,
                    expected: 1,
                    ..
                }),
                Some(v),
            ) => assert_eq!(v, *f),
            (e, _) => panic!("unexpected error {e:?}"),
        }
    }
}
