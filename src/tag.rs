//! Tag handles and the capability snapshot taken after connecting

uniffi::custom_newtype!(TagId, u64);

/// Opaque handle for one detected tag, minted by the radio layer.
/// Valid only for the session that detected it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum NdefStatus {
    NotSupported,
    ReadOnly,
    ReadWrite,
}

/// Queried once right after connect, read-only for the rest of the session
#[derive(Debug, Copy, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TagCapability {
    pub status: NdefStatus,
    pub capacity: u32,
}

impl TagCapability {
    pub fn is_readable(&self) -> bool {
        matches!(self.status, NdefStatus::ReadOnly | NdefStatus::ReadWrite)
    }

    pub fn is_writable(&self) -> bool {
        matches!(self.status, NdefStatus::ReadWrite)
    }
}
