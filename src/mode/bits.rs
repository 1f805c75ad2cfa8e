//! Structured file mode: type tag + special flags + permission bits

use bitflags::bitflags;

/// Kind of filesystem object a mode describes.
///
/// Exactly one tag applies to a mode; `Regular` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FileType {
    #[default]
    Regular,
    Directory,
    SymbolicLink,
    /// Block device
    Device,
    CharDevice,
    NamedPipe,
    Socket,
    Temporary,
}

impl FileType {
    /// All type tags, in declaration order.
    pub const ALL: [FileType; 8] = [
        FileType::Regular,
        FileType::Directory,
        FileType::SymbolicLink,
        FileType::Device,
        FileType::CharDevice,
        FileType::NamedPipe,
        FileType::Socket,
        FileType::Temporary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Regular => "regular",
            FileType::Directory => "directory",
            FileType::SymbolicLink => "symlink",
            FileType::Device => "device",
            FileType::CharDevice => "char-device",
            FileType::NamedPipe => "pipe",
            FileType::Socket => "socket",
            FileType::Temporary => "temporary",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown file type '{}'", s))
    }
}

bitflags! {
    /// Special mode bits, independent of the type tag and permissions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SpecialFlags: u8 {
        /// Append-only
        const APPEND    = 1 << 0;
        /// Exclusive use
        const EXCLUSIVE = 1 << 1;
        const SETUID    = 1 << 2;
        const SETGID    = 1 << 3;
        const STICKY    = 1 << 4;
    }
}

bitflags! {
    /// Owner/group/other read-write-execute bits, laid out as POSIX octal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u16 {
        const OWNER_READ  = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC  = 0o100;
        const GROUP_READ  = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC  = 0o010;
        const OTHER_READ  = 0o004;
        const OTHER_WRITE = 0o002;
        const OTHER_EXEC  = 0o001;

        const ALL_EXEC = Self::OWNER_EXEC.bits() | Self::GROUP_EXEC.bits() | Self::OTHER_EXEC.bits();
    }
}

impl Permissions {
    /// Build from an octal permission value; bits above `0o777` are dropped.
    pub fn from_octal(octal: u32) -> Self {
        Permissions::from_bits_truncate((octal & 0o777) as u16)
    }

    pub fn octal(&self) -> u32 {
        self.bits() as u32
    }
}

/// A complete, platform-independent file mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileModeBits {
    file_type: FileType,
    special: SpecialFlags,
    permissions: Permissions,
}

impl Default for FileModeBits {
    fn default() -> Self {
        Self {
            file_type: FileType::Regular,
            special: SpecialFlags::empty(),
            permissions: Permissions::empty(),
        }
    }
}

impl FileModeBits {
    pub fn new(file_type: FileType, permissions: Permissions) -> Self {
        Self {
            file_type,
            special: SpecialFlags::empty(),
            permissions,
        }
    }

    /// Shorthand for `new(file_type, Permissions::from_octal(octal))`.
    pub fn from_octal(file_type: FileType, octal: u32) -> Self {
        Self::new(file_type, Permissions::from_octal(octal))
    }

    pub fn with_special(mut self, special: SpecialFlags) -> Self {
        self.special = special;
        self
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn special(&self) -> SpecialFlags {
        self.special
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    /// Permission bits as an octal value, e.g. `0o644`.
    pub fn octal(&self) -> u32 {
        self.permissions.octal()
    }

    pub fn is_regular(&self) -> bool {
        self.file_type == FileType::Regular
    }

    /// Whether objects with this mode have readable content.
    ///
    /// `Temporary` is a regular file with a marker, so it carries content too.
    pub fn has_content(&self) -> bool {
        matches!(self.file_type, FileType::Regular | FileType::Temporary)
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::SymbolicLink
    }
}
