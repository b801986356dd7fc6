use crate::core::error::ValidationError;
use crate::core::program::ProgramId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque applicant identifier.
///
/// The ranking publisher uses an insurance-number-like registration code,
/// but the engine makes no assumption about its length or alphabet.
///
/// # Examples
///
/// ```
/// use admission_engine::core::applicant::ApplicantId;
///
/// let a = ApplicantId::new("123-456-789 01");
/// let b = ApplicantId::new("987-654-321 00");
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(String);

impl ApplicantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ApplicantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ApplicantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Kind of seat an entry in a contract-phase ranking refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    /// A contract has already been executed. Binding, never displaced.
    Signed,
    /// Application submitted, contract not yet signed.
    Pending,
}

impl PlaceType {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaceType::Signed => "signed",
            PlaceType::Pending => "pending",
        }
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "signed" => Ok(PlaceType::Signed),
            "pending" => Ok(PlaceType::Pending),
            other => Err(other.to_string()),
        }
    }
}

/// One applicant's standing in one program's ranking.
///
/// `score` is the total ranking score (higher is better). `priority` is the
/// applicant's declared preference rank for this program (lower is more
/// preferred). Records are validated on construction from
/// [`RawApplicantRecord`]; neither numeric field is ever defaulted.
///
/// # Examples
///
/// ```
/// use admission_engine::core::applicant::{ApplicantRecord, PlaceType};
///
/// let record = ApplicantRecord::new("A-1", 271, 1).with_place_type(PlaceType::Pending);
/// assert_eq!(record.score(), 271);
/// assert_eq!(record.place_type(), Some(PlaceType::Pending));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    identifier: ApplicantId,
    score: i32,
    priority: i32,
    /// Present for contract-phase rankings only.
    place_type: Option<PlaceType>,
    /// Published rank in the program's list. Informational.
    position: Option<u32>,
    /// Points for individual achievements, already included in `score`.
    individual_achievements: Option<i32>,
    /// Whether original documents were submitted.
    has_originals: bool,
}

impl ApplicantRecord {
    pub fn new(identifier: impl Into<ApplicantId>, score: i32, priority: i32) -> Self {
        Self {
            identifier: identifier.into(),
            score,
            priority,
            place_type: None,
            position: None,
            individual_achievements: None,
            has_originals: false,
        }
    }

    pub fn with_place_type(mut self, place_type: PlaceType) -> Self {
        self.place_type = Some(place_type);
        self
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_individual_achievements(mut self, points: i32) -> Self {
        self.individual_achievements = Some(points);
        self
    }

    pub fn with_originals(mut self, has_originals: bool) -> Self {
        self.has_originals = has_originals;
        self
    }

    // --- Accessors ---

    pub fn identifier(&self) -> &ApplicantId {
        &self.identifier
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn place_type(&self) -> Option<PlaceType> {
        self.place_type
    }

    pub fn position(&self) -> Option<u32> {
        self.position
    }

    pub fn individual_achievements(&self) -> Option<i32> {
        self.individual_achievements
    }

    pub fn has_originals(&self) -> bool {
        self.has_originals
    }
}

/// Applicant record as handed over by the ranking-store collaborator.
///
/// Every field may be missing. Use [`RawApplicantRecord::validate`] to turn
/// it into an [`ApplicantRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawApplicantRecord {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub place_type: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub individual_achievements: Option<i32>,
    #[serde(default)]
    pub has_originals: Option<bool>,
}

impl RawApplicantRecord {
    /// Validate the record found at `index` of `program`'s ranking.
    ///
    /// A missing or blank identifier, score or priority is rejected. Zero is
    /// a legitimate score and priority, so nothing is ever filled in.
    pub fn validate(
        &self,
        program: ProgramId,
        index: usize,
    ) -> Result<ApplicantRecord, ValidationError> {
        let identifier = self
            .identifier
            .as_deref()
            .ok_or(ValidationError::MissingField {
                program,
                index,
                field: "identifier",
            })?;
        if identifier.trim().is_empty() {
            return Err(ValidationError::BlankIdentifier { program, index });
        }
        let score = self.score.ok_or(ValidationError::MissingField {
            program,
            index,
            field: "score",
        })?;
        let priority = self.priority.ok_or(ValidationError::MissingField {
            program,
            index,
            field: "priority",
        })?;
        let place_type = match self.place_type.as_deref() {
            None => None,
            Some(tag) => Some(tag.parse::<PlaceType>().map_err(|value| {
                ValidationError::UnknownPlaceType {
                    program,
                    index,
                    value,
                }
            })?),
        };

        Ok(ApplicantRecord {
            identifier: ApplicantId::new(identifier.trim()),
            score,
            priority,
            place_type,
            position: self.position,
            individual_achievements: self.individual_achievements,
            has_originals: self.has_originals.unwrap_or(false),
        })
    }
}
