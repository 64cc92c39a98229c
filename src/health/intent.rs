//! Intent names the Docs skill answers

use std::fmt;
use std::str::FromStr;

/// Every intent with a built-in handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinIntent {
    DataRecord,
    DataRetrieve,
    DoctorsEmail,
    UpdateDocEmail,
    Stop,
    Cancel,
    Help,
}

impl BuiltinIntent {
    pub const ALL: [BuiltinIntent; 7] = [
        BuiltinIntent::DataRecord,
        BuiltinIntent::DataRetrieve,
        BuiltinIntent::DoctorsEmail,
        BuiltinIntent::UpdateDocEmail,
        BuiltinIntent::Stop,
        BuiltinIntent::Cancel,
        BuiltinIntent::Help,
    ];

    /// Name as sent by the platform
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinIntent::DataRecord => "DataRecordIntent",
            BuiltinIntent::DataRetrieve => "DataRetrieveIntent",
            BuiltinIntent::DoctorsEmail => "DoctorsEmailIntent",
            BuiltinIntent::UpdateDocEmail => "UpdateDocEmailIntent",
            BuiltinIntent::Stop => "AMAZON.StopIntent",
            BuiltinIntent::Cancel => "AMAZON.CancelIntent",
            BuiltinIntent::Help => "AMAZON.HelpIntent",
        }
    }

    /// Whether the handler needs a linked account
    pub fn requires_account(&self) -> bool {
        matches!(
            self,
            BuiltinIntent::DataRecord
                | BuiltinIntent::DataRetrieve
                | BuiltinIntent::DoctorsEmail
                | BuiltinIntent::UpdateDocEmail
        )
    }
}

impl fmt::Display for BuiltinIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinIntent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| format!("Unknown intent: {}", s))
    }
}
