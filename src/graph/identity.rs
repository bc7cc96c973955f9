//! Compact, parseable identifier references
//!
//! Three fixed textual shapes, told apart by part count and markers:
//!
//! ```text
//! pkg:Holder:Field                 struct/class field
//! pkg:file:[function]:line:name    function-local variable
//! pkg:file:line:name               package-level variable or constant
//! ```
//!
//! Parsing checks the field shape first, then the local shape, then the
//! package-level shape. The format is closed: anything else is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    Field,
    Local,
    Package,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub kind: IdentityKind,
    /// Package path as written in the reference
    pub pkg_path: String,
    /// Last `/` segment of `pkg_path`
    pub package: String,
    /// Owning type for field references
    pub holder_type: String,
    pub file: String,
    pub function: String,
    pub line: usize,
    /// `Holder.Field` for fields, the bare identifier otherwise
    pub name: String,
}

impl Identity {
    pub fn field(pkg_path: &str, holder: &str, field: &str) -> Self {
        Self {
            kind: IdentityKind::Field,
            pkg_path: pkg_path.to_string(),
            package: last_segment(pkg_path),
            holder_type: holder.to_string(),
            file: String::new(),
            function: String::new(),
            line: 0,
            name: format!("{}.{}", holder, field),
        }
    }

    pub fn local(pkg_path: &str, file: &str, function: &str, line: usize, name: &str) -> Self {
        Self {
            kind: IdentityKind::Local,
            pkg_path: pkg_path.to_string(),
            package: last_segment(pkg_path),
            holder_type: String::new(),
            file: file.to_string(),
            function: function.to_string(),
            line,
            name: name.to_string(),
        }
    }

    pub fn package_level(pkg_path: &str, file: &str, line: usize, name: &str) -> Self {
        Self {
            kind: IdentityKind::Package,
            pkg_path: pkg_path.to_string(),
            package: last_segment(pkg_path),
            holder_type: String::new(),
            file: file.to_string(),
            function: String::new(),
            line,
            name: name.to_string(),
        }
    }

    pub fn parse(text: &str) -> Result<Identity> {
        let parts: Vec<&str> = text.split(':').collect();
        let invalid = || Error::InvalidIdentity(text.to_string());

        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        match parts.as_slice() {
            [pkg, holder, field] => Ok(Identity::field(pkg, holder, field)),
            [pkg, file, function, line, name]
                if function.starts_with('[') && function.ends_with(']') && function.len() > 2 =>
            {
                let line = line.parse::<usize>().map_err(|_| invalid())?;
                let function = &function[1..function.len() - 1];
                Ok(Identity::local(pkg, file, function, line, name))
            }
            [pkg, file, line, name] => {
                let line = line.parse::<usize>().map_err(|_| invalid())?;
                Ok(Identity::package_level(pkg, file, line, name))
            }
            _ => Err(invalid()),
        }
    }

    /// Field name without the holder prefix
    pub fn field_name(&self) -> &str {
        match self.kind {
            IdentityKind::Field => self
                .name
                .strip_prefix(&self.holder_type)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(&self.name),
            _ => &self.name,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IdentityKind::Field => write!(
                f,
                "{}:{}:{}",
                self.pkg_path,
                self.holder_type,
                self.field_name()
            ),
            IdentityKind::Local => write!(
                f,
                "{}:{}:[{}]:{}:{}",
                self.pkg_path, self.file, self.function, self.line, self.name
            ),
            IdentityKind::Package => write!(
                f,
                "{}:{}:{}:{}",
                self.pkg_path, self.file, self.line, self.name
            ),
        }
    }
}

impl FromStr for Identity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Identity::parse(s)
    }
}

fn last_segment(pkg_path: &str) -> String {
    pkg_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(pkg_path)
        .to_string()
}
