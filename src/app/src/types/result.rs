use serde_repr::{Deserialize_repr, Serialize_repr};

/// Outcome of a firmware upgrade as reported by the device
#[derive(Debug, Clone, Copy, Serialize_repr, Deserialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum ResultCode {
    Success = 0,
    OutOfMemory = 1,
    OpenFailed = 2,
    InvalidFormat = 3,
    WrongDataSize = 4,
    BadChecksum = 5,
    UpgradeRunning = 6,
    UnexpectedData = 7,
    ResetFailed = 8,
    TooManyRetries = 9,
    TooManyMismatches = 10,
    WrongTarget = 11,
}

impl ResultCode {
    const ALL: [ResultCode; 12] = [
        Self::Success,
        Self::OutOfMemory,
        Self::OpenFailed,
        Self::InvalidFormat,
        Self::WrongDataSize,
        Self::BadChecksum,
        Self::UpgradeRunning,
        Self::UnexpectedData,
        Self::ResetFailed,
        Self::TooManyRetries,
        Self::TooManyMismatches,
        Self::WrongTarget,
    ];

    /// Look up a raw code from the wire
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::OutOfMemory => "Not enough memory",
            Self::OpenFailed => "Failed to open the firmware file",
            Self::InvalidFormat => "Invalid firmware file format",
            Self::WrongDataSize => "Wrong data size in hex file",
            Self::BadChecksum => "Bad checksum in hex file",
            Self::UpgradeRunning => "A previous firmware upgrade is running",
            Self::UnexpectedData => "Hex file contains unexpected data",
            Self::ResetFailed => "Failed to reset the target device",
            Self::TooManyRetries => "Too many retries",
            Self::TooManyMismatches => "Too many mismatches",
            Self::WrongTarget => "Firmware is for a different target device",
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// Status text for a raw result code, including codes the protocol does not define
pub fn result_message(code: i64) -> String {
    match ResultCode::from_code(code) {
        Some(result) => result.message().to_string(),
        None => format!("Unknown result {code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_code() {
        for (index, code) in ResultCode::ALL.iter().enumerate() {
            assert_eq!(*code as usize, index);
        }
    }

    #[test]
    fn known_codes_map_to_messages() {
        assert_eq!(result_message(0), "Success");
        assert_eq!(result_message(6), "A previous firmware upgrade is running");
        assert_eq!(result_message(9), "Too many retries");
        assert_eq!(result_message(11), "Firmware is for a different target device");
    }

    #[test]
    fn out_of_range_codes_fall_back() {
        assert_eq!(result_message(12), "Unknown result 12");
        assert_eq!(result_message(-1), "Unknown result -1");
        assert_eq!(result_message(i64::MAX), format!("Unknown result {}", i64::MAX));
    }

    #[test]
    fn deserializes_from_wire_integer() {
        let code: ResultCode = serde_json::from_str("5").unwrap();
        assert_eq!(code, ResultCode::BadChecksum);
        assert!(serde_json::from_str::<ResultCode>("42").is_err());
    }
}
