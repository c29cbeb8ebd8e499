use serde::{Deserialize, Serialize};

use crate::parsing::body::BodyBlocks;
use crate::parsing::personal_info::PersonalInfo;

/// Terminal artifact of résumé parsing: personal fields from the header plus
/// the four body blocks.
///
/// Serialized keys: `name`, `email`, `mobile`, `websites`, `location`, `others`,
/// `Education`, `Experience`, `Skills`, `Others`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(flatten)]
    pub personal: PersonalInfo,
    #[serde(flatten)]
    pub body: BodyBlocks,
}
