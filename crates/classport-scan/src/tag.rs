//! Constant-pool tag bytes and the payload width each one implies.

use core::fmt;

/// Discriminator byte at the start of every constant-pool record.
///
/// Only the tags understood by the scanner get their own variant. Anything
/// else (including tags added by newer class-file versions, such as
/// `CONSTANT_Dynamic`) is carried as [`PoolTag::Unknown`] and skipped
/// without consuming any payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PoolTag {
    Utf8,
    Integer,
    Float,
    Long,
    Double,
    Class,
    String,
    Fieldref,
    Methodref,
    InterfaceMethodref,
    NameAndType,
    MethodHandle,
    MethodType,
    InvokeDynamic,
    Module,
    Package,
    Unknown(u8),
}

/// How many payload bytes follow the tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadWidth {
    /// A fixed number of bytes.
    Fixed(usize),
    /// A big-endian `u16` length prefix followed by that many bytes.
    LengthPrefixed,
}

impl PoolTag {
    pub const UTF8: u8 = 1;
    pub const INTEGER: u8 = 3;
    pub const FLOAT: u8 = 4;
    pub const LONG: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const CLASS: u8 = 7;
    pub const STRING: u8 = 8;
    pub const FIELDREF: u8 = 9;
    pub const METHODREF: u8 = 10;
    pub const INTERFACE_METHODREF: u8 = 11;
    pub const NAME_AND_TYPE: u8 = 12;
    pub const METHOD_HANDLE: u8 = 15;
    pub const METHOD_TYPE: u8 = 16;
    pub const INVOKE_DYNAMIC: u8 = 18;
    pub const MODULE: u8 = 19;
    pub const PACKAGE: u8 = 20;

    /// Every tag byte the scanner knows how to size.
    pub const KNOWN: [u8; 16] = [
        Self::UTF8,
        Self::INTEGER,
        Self::FLOAT,
        Self::LONG,
        Self::DOUBLE,
        Self::CLASS,
        Self::STRING,
        Self::FIELDREF,
        Self::METHODREF,
        Self::INTERFACE_METHODREF,
        Self::NAME_AND_TYPE,
        Self::METHOD_HANDLE,
        Self::METHOD_TYPE,
        Self::INVOKE_DYNAMIC,
        Self::MODULE,
        Self::PACKAGE,
    ];

    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            Self::UTF8 => Self::Utf8,
            Self::INTEGER => Self::Integer,
            Self::FLOAT => Self::Float,
            Self::LONG => Self::Long,
            Self::DOUBLE => Self::Double,
            Self::CLASS => Self::Class,
            Self::STRING => Self::String,
            Self::FIELDREF => Self::Fieldref,
            Self::METHODREF => Self::Methodref,
            Self::INTERFACE_METHODREF => Self::InterfaceMethodref,
            Self::NAME_AND_TYPE => Self::NameAndType,
            Self::METHOD_HANDLE => Self::MethodHandle,
            Self::METHOD_TYPE => Self::MethodType,
            Self::INVOKE_DYNAMIC => Self::InvokeDynamic,
            Self::MODULE => Self::Module,
            Self::PACKAGE => Self::Package,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Utf8 => Self::UTF8,
            Self::Integer => Self::INTEGER,
            Self::Float => Self::FLOAT,
            Self::Long => Self::LONG,
            Self::Double => Self::DOUBLE,
            Self::Class => Self::CLASS,
            Self::String => Self::STRING,
            Self::Fieldref => Self::FIELDREF,
            Self::Methodref => Self::METHODREF,
            Self::InterfaceMethodref => Self::INTERFACE_METHODREF,
            Self::NameAndType => Self::NAME_AND_TYPE,
            Self::MethodHandle => Self::METHOD_HANDLE,
            Self::MethodType => Self::METHOD_TYPE,
            Self::InvokeDynamic => Self::INVOKE_DYNAMIC,
            Self::Module => Self::MODULE,
            Self::Package => Self::PACKAGE,
            Self::Unknown(b) => b,
        }
    }

    /// Payload width following the tag byte.
    ///
    /// Unknown tags report `Fixed(0)`: the scanner steps over the tag byte
    /// alone and resynchronizes on whatever comes next.
    #[must_use]
    pub const fn width(self) -> PayloadWidth {
        match self {
            Self::Utf8 => PayloadWidth::LengthPrefixed,
            Self::Integer | Self::Float => PayloadWidth::Fixed(4),
            Self::Long | Self::Double => PayloadWidth::Fixed(8),
            Self::Class | Self::String | Self::MethodType | Self::Module | Self::Package => {
                PayloadWidth::Fixed(2)
            }
            Self::Fieldref
            | Self::Methodref
            | Self::InterfaceMethodref
            | Self::NameAndType
            | Self::InvokeDynamic => PayloadWidth::Fixed(4),
            Self::MethodHandle => PayloadWidth::Fixed(3),
            Self::Unknown(_) => PayloadWidth::Fixed(0),
        }
    }

    /// Number of constant-pool index slots the record occupies. Long and
    /// Double entries take two.
    #[must_use]
    pub const fn slots(self) -> u16 {
        match self {
            Self::Long | Self::Double => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<u8> for PoolTag {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

impl fmt::Display for PoolTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(b) => write!(f, "unknown({b})"),
            known => write!(f, "{known:?}({})", known.to_byte()),
        }
    }
}
