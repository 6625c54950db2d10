use std::str::FromStr;

use strum::{Display, EnumString, IntoStaticStr};

use crate::engine::error::InvocationError;

/// Declared type of a raw input.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    /// only meaningful for arguments.
    Regex,
}

impl TypeTag {
    /// Resolves a caller supplied tag. Spelling is exact, as in `"number"`.
    pub fn resolve(tag: &str) -> Result<Self, InvocationError> {
        Self::from_str(tag).map_err(|_| InvocationError::UnsupportedType {
            tag: tag.to_string(),
        })
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// The subset of [`TypeTag`] a receiver may carry.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ReceiverTypeTag {
    String,
    Number,
    Boolean,
}

impl ReceiverTypeTag {
    pub fn resolve(tag: &str) -> Result<Self, InvocationError> {
        match TypeTag::resolve(tag)? {
            TypeTag::String => Ok(Self::String),
            TypeTag::Number => Ok(Self::Number),
            TypeTag::Boolean => Ok(Self::Boolean),
            TypeTag::Regex => Err(InvocationError::UnsupportedType {
                tag: tag.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        TypeTag::from(self).name()
    }
}

impl From<ReceiverTypeTag> for TypeTag {
    fn from(tag: ReceiverTypeTag) -> Self {
        match tag {
            ReceiverTypeTag::String => Self::String,
            ReceiverTypeTag::Number => Self::Number,
            ReceiverTypeTag::Boolean => Self::Boolean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_tags() {
        assert_eq!(TypeTag::resolve("string").unwrap(), TypeTag::String);
        assert_eq!(TypeTag::resolve("regex").unwrap(), TypeTag::Regex);
        assert_eq!(TypeTag::Boolean.to_string(), "boolean");
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = TypeTag::resolve("object").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported type 'object'.");
    }

    #[test]
    fn regex_is_not_a_receiver_type() {
        let err = ReceiverTypeTag::resolve("regex").unwrap_err();
        assert!(matches!(err, InvocationError::UnsupportedType { ref tag } if tag == "regex"));
        assert_eq!(ReceiverTypeTag::resolve("number").unwrap().name(), "number");
    }
}
