//! Navigation routes: the result list and a single movie's detail page.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

/// Path prefix of detail routes.
const DETAIL_PREFIX: &str = "/movie/";

/// A navigable view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    /// `/`: result list with pagination.
    #[default]
    List,
    /// `/movie/{id}`: details for one IMDb identifier.
    Detail(String),
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Ok(Self::List);
        }
        if let Some(id) = path.strip_prefix(DETAIL_PREFIX) {
            let id = id.trim_end_matches('/');
            if id.is_empty() || id.contains('/') {
                bail!("invalid movie route: {path}");
            }
            return Ok(Self::Detail(String::from(id)));
        }
        bail!("unknown route: {path} (expected / or /movie/{{id}})")
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("/"),
            Self::Detail(id) => write!(f, "{DETAIL_PREFIX}{id}"),
        }
    }
}
