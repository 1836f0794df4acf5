//! Component descriptors and the orderings used to build prioritized lists of them.
pub mod compare;

use std::fmt;
use std::str::FromStr;

use crate::errors::Error;

pub use compare::{compare, compare_priority, compatible, is_compatible};

/// Only this many leading bytes of a type name take part in comparisons.
pub const MAX_TYPE_NAME_LEN: usize = 31;
/// Only this many leading bytes of a component name take part in comparisons.
pub const MAX_COMPONENT_NAME_LEN: usize = 63;

/// Name and version of a pluggable component.
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    pub type_name: String,
    pub component_name: String,
    pub major: i32,
    pub minor: i32,
    pub release: i32,
}

/// A component together with the priority it was selected with.
#[derive(Debug, Clone)]
pub struct PriorityItem {
    pub priority: i32,
    pub component: ComponentDescriptor,
}

impl ComponentDescriptor {
    pub fn new(
        type_name: &str,
        component_name: &str,
        major: i32,
        minor: i32,
        release: i32,
    ) -> Self {
        Self {
            type_name: String::from(type_name),
            component_name: String::from(component_name),
            major,
            minor,
            release,
        }
    }
}

/// Renders as `type.name.major.minor`.
impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.type_name, self.component_name, self.major, self.minor
        )
    }
}

impl fmt::Display for PriorityItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.priority, self.component)
    }
}

fn parse_number(field: &str, what: &str, input: &str) -> Result<i32, Error> {
    field.trim().parse::<i32>().map_err(|_| {
        Error::InvalidDescriptor(format!("Invalid {} `{}` in `{}`", what, field, input))
    })
}

/// Parses `type.name.major.minor` with an optional trailing `.release`.
impl FromStr for ComponentDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split('.').collect();
        if fields.len() != 4 && fields.len() != 5 {
            return Err(Error::InvalidDescriptor(format!(
                "Expected type.name.major.minor[.release], got `{}`",
                s
            )));
        }
        if fields[0].is_empty() || fields[1].is_empty() {
            return Err(Error::InvalidDescriptor(format!(
                "Empty type or component name in `{}`",
                s
            )));
        }

        let release = match fields.get(4) {
            Some(field) => parse_number(field, "release version", s)?,
            None => 0,
        };

        Ok(Self {
            type_name: String::from(fields[0]),
            component_name: String::from(fields[1]),
            major: parse_number(fields[2], "major version", s)?,
            minor: parse_number(fields[3], "minor version", s)?,
            release,
        })
    }
}

/// Parses `priority:type.name.major.minor[.release]`.
impl FromStr for PriorityItem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (priority, component) = s.split_once(':').ok_or_else(|| {
            Error::InvalidDescriptor(format!("Missing `priority:` prefix in `{}`", s))
        })?;

        Ok(Self {
            priority: parse_number(priority, "priority", s)?,
            component: component.parse()?,
        })
    }
}
